//! Product Model

use serde::{Deserialize, Serialize};

/// Label shown when a product referenced by an order or cart no longer exists
pub const PRODUCT_NOT_FOUND_LABEL: &str = "Produto não encontrado";

/// Product entity (cardápio)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    /// Category reference (String ID)
    #[serde(default)]
    pub category_id: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub sort_order: i32,
}

fn default_true() -> bool {
    true
}

impl Product {
    /// Freeze the current name/price into a snapshot for a cart or order line
    pub fn to_ref(&self) -> ProductRef {
        ProductRef {
            id: self.id.clone(),
            name: self.name.clone(),
            price: self.price,
            is_available: self.is_available,
            category_id: self.category_id.clone(),
        }
    }
}

/// Immutable product snapshot captured at add time
///
/// Name and price are never re-fetched after the snapshot is taken.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductRef {
    pub id: String,
    pub name: String,
    pub price: f64,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<String>,
}

impl ProductRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            is_available: true,
            category_id: None,
        }
    }
}
