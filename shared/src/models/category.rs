//! Category Model

use serde::{Deserialize, Serialize};

/// Label shown when a category lookup misses
pub const CATEGORY_NOT_FOUND_LABEL: &str = "N/A";

/// Category entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub sort_order: i32,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

fn default_true() -> bool {
    true
}
