//! Data models
//!
//! Catalog, table and delivery records as loaded from the persistence
//! boundary. All IDs are strings.

pub mod catalog;
pub mod category;
pub mod delivery;
pub mod dining_table;
pub mod product;

// Re-exports
pub use catalog::*;
pub use category::*;
pub use delivery::*;
pub use dining_table::*;
pub use product::*;
