//! Cart persistence port
//!
//! Carts survive page reloads through a `CartStore` keyed by session ID.
//! The redb-backed `OrderStorage` and the in-process `MemoryCartStore`
//! both implement it.

use super::CartError;
use crate::orders::storage::OrderStorage;
use parking_lot::Mutex;
use shared::cart::CartLine;
use std::collections::HashMap;

/// Session-keyed cart persistence
pub trait CartStore {
    fn load_cart(&self, session_id: &str) -> Result<Option<Vec<CartLine>>, CartError>;
    fn save_cart(&self, session_id: &str, lines: &[CartLine]) -> Result<(), CartError>;
    fn delete_cart(&self, session_id: &str) -> Result<(), CartError>;
}

impl CartStore for OrderStorage {
    fn load_cart(&self, session_id: &str) -> Result<Option<Vec<CartLine>>, CartError> {
        self.get_cart(session_id)
            .map_err(|e| CartError::Store(e.to_string()))
    }

    fn save_cart(&self, session_id: &str, lines: &[CartLine]) -> Result<(), CartError> {
        self.store_cart(session_id, lines)
            .map_err(|e| CartError::Store(e.to_string()))
    }

    fn delete_cart(&self, session_id: &str) -> Result<(), CartError> {
        self.remove_cart(session_id)
            .map_err(|e| CartError::Store(e.to_string()))
    }
}

/// In-process cart store
#[derive(Debug, Default)]
pub struct MemoryCartStore {
    carts: Mutex<HashMap<String, Vec<CartLine>>>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.carts.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.carts.lock().is_empty()
    }
}

impl CartStore for MemoryCartStore {
    fn load_cart(&self, session_id: &str) -> Result<Option<Vec<CartLine>>, CartError> {
        Ok(self.carts.lock().get(session_id).cloned())
    }

    fn save_cart(&self, session_id: &str, lines: &[CartLine]) -> Result<(), CartError> {
        self.carts
            .lock()
            .insert(session_id.to_string(), lines.to_vec());
        Ok(())
    }

    fn delete_cart(&self, session_id: &str) -> Result<(), CartError> {
        self.carts.lock().remove(session_id);
        Ok(())
    }
}

impl<T: CartStore + ?Sized> CartStore for &T {
    fn load_cart(&self, session_id: &str) -> Result<Option<Vec<CartLine>>, CartError> {
        (**self).load_cart(session_id)
    }

    fn save_cart(&self, session_id: &str, lines: &[CartLine]) -> Result<(), CartError> {
        (**self).save_cart(session_id, lines)
    }

    fn delete_cart(&self, session_id: &str) -> Result<(), CartError> {
        (**self).delete_cart(session_id)
    }
}
