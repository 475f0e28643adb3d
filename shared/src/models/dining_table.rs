//! Dining Table Model

use serde::{Deserialize, Serialize};

/// Table occupancy status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    #[default]
    Available,
    Occupied,
    Reserved,
}

/// Dining table entity (mesa)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiningTable {
    pub id: String,
    pub number: i32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default = "default_capacity")]
    pub capacity: i32,
    #[serde(default)]
    pub status: TableStatus,
}

fn default_capacity() -> i32 {
    4
}

impl DiningTable {
    pub fn new(id: impl Into<String>, number: i32) -> Self {
        Self {
            id: id.into(),
            number,
            name: None,
            capacity: default_capacity(),
            status: TableStatus::Available,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == TableStatus::Available
    }

    /// Display name, falling back to "Mesa {number}"
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| format!("Mesa {}", self.number))
    }
}
