//! Cart provider
//!
//! Owns the cart of one storefront session and writes it through the
//! `CartStore` after every mutation. Access goes through [`CartProvider::use_cart`],
//! which fails fast until [`CartProvider::init`] has loaded the session.

use super::{Cart, CartAction, CartError, CartStore};
use shared::cart::CartLine;
use shared::models::ProductRef;

/// Cart state container for one session
pub struct CartProvider<S: CartStore> {
    session_id: String,
    store: S,
    cart: Option<Cart>,
}

impl<S: CartStore> std::fmt::Debug for CartProvider<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartProvider")
            .field("session_id", &self.session_id)
            .field("initialized", &self.cart.is_some())
            .finish()
    }
}

impl<S: CartStore> CartProvider<S> {
    /// Create an uninitialized provider
    pub fn new(store: S, session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            store,
            cart: None,
        }
    }

    /// Load the session's saved cart (or start empty)
    pub fn init(&mut self) -> Result<(), CartError> {
        let lines = self.store.load_cart(&self.session_id)?.unwrap_or_default();
        tracing::debug!(session_id = %self.session_id, lines = lines.len(), "Cart loaded");
        self.cart = Some(Cart::from_lines(lines));
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.cart.is_some()
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    /// Access the cart; `ProviderMissing` before `init`
    pub fn use_cart(&mut self) -> Result<CartHandle<'_, S>, CartError> {
        let cart = self.cart.as_mut().ok_or(CartError::ProviderMissing)?;
        Ok(CartHandle {
            session_id: &self.session_id,
            store: &self.store,
            cart,
        })
    }
}

/// Borrowed access to an initialized cart
pub struct CartHandle<'a, S: CartStore> {
    session_id: &'a str,
    store: &'a S,
    cart: &'a mut Cart,
}

impl<S: CartStore> CartHandle<'_, S> {
    pub fn lines(&self) -> &[CartLine] {
        self.cart.lines()
    }

    pub fn cart(&self) -> &Cart {
        &*self.cart
    }

    pub fn total_items(&self) -> i32 {
        self.cart.total_items()
    }

    pub fn total_price(&self) -> f64 {
        self.cart.total_price()
    }

    pub fn add_item(&mut self, product: ProductRef, quantity: i32) -> Result<(), CartError> {
        self.dispatch(CartAction::AddItem { product, quantity })
    }

    pub fn remove_item(&mut self, product_id: &str) -> Result<(), CartError> {
        self.dispatch(CartAction::RemoveItem {
            product_id: product_id.to_string(),
        })
    }

    pub fn update_quantity(&mut self, product_id: &str, quantity: i32) -> Result<(), CartError> {
        self.dispatch(CartAction::UpdateQuantity {
            product_id: product_id.to_string(),
            quantity,
        })
    }

    pub fn clear(&mut self) -> Result<(), CartError> {
        self.dispatch(CartAction::Clear)
    }

    /// Apply an action, then persist
    ///
    /// A failed save is reported but the in-memory cart keeps the change.
    pub fn dispatch(&mut self, action: CartAction) -> Result<(), CartError> {
        self.cart.apply(&action)?;

        let saved = if self.cart.is_empty() {
            self.store.delete_cart(self.session_id)
        } else {
            self.store.save_cart(self.session_id, self.cart.lines())
        };
        if let Err(e) = &saved {
            tracing::warn!(session_id = %self.session_id, error = %e, "Failed to persist cart");
        }
        saved
    }
}
