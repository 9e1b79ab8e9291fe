use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::Utc;

use cartbundle_core::{ProductId, SessionId, StoreError, StoreResult};
use cartbundle_events::execute;

use crate::{AddItem, Cart, CartCommand, CartEvent, CartLine};

/// Session-scoped cart storage.
///
/// `list_items` followed by `add_item` is not atomic; callers that need
/// check-then-add semantics across concurrent requests for one session get no
/// guarantee beyond what the implementation provides.
pub trait CartStore: Send + Sync {
    /// Lines of the session's cart in insertion order (empty for unknown sessions).
    fn list_items(&self, session_id: SessionId) -> StoreResult<Vec<CartLine>>;

    /// Add `quantity` units of a product, creating the cart if needed.
    fn add_item(
        &self,
        session_id: SessionId,
        product_id: ProductId,
        quantity: u32,
    ) -> StoreResult<Vec<CartEvent>>;

    fn contains(&self, session_id: SessionId, product_id: ProductId) -> StoreResult<bool> {
        Ok(self
            .list_items(session_id)?
            .iter()
            .any(|line| line.product_id == product_id))
    }
}

impl<S> CartStore for Arc<S>
where
    S: CartStore + ?Sized,
{
    fn list_items(&self, session_id: SessionId) -> StoreResult<Vec<CartLine>> {
        (**self).list_items(session_id)
    }

    fn add_item(
        &self,
        session_id: SessionId,
        product_id: ProductId,
        quantity: u32,
    ) -> StoreResult<Vec<CartEvent>> {
        (**self).add_item(session_id, product_id, quantity)
    }

    fn contains(&self, session_id: SessionId, product_id: ProductId) -> StoreResult<bool> {
        (**self).contains(session_id, product_id)
    }
}

/// In-memory cart store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCartStore {
    carts: RwLock<HashMap<SessionId, Cart>>,
}

fn poisoned() -> StoreError {
    StoreError::unavailable("cart lock poisoned")
}

impl InMemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a session's cart, if one exists.
    pub fn cart(&self, session_id: SessionId) -> StoreResult<Option<Cart>> {
        let carts = self.carts.read().map_err(|_| poisoned())?;
        Ok(carts.get(&session_id).cloned())
    }

    /// Drop a session's cart (e.g. after checkout or expiry).
    pub fn clear(&self, session_id: SessionId) -> StoreResult<bool> {
        let mut carts = self.carts.write().map_err(|_| poisoned())?;
        Ok(carts.remove(&session_id).is_some())
    }
}

impl CartStore for InMemoryCartStore {
    fn list_items(&self, session_id: SessionId) -> StoreResult<Vec<CartLine>> {
        let carts = self.carts.read().map_err(|_| poisoned())?;
        Ok(carts
            .get(&session_id)
            .map(|cart| cart.lines().to_vec())
            .unwrap_or_default())
    }

    fn add_item(
        &self,
        session_id: SessionId,
        product_id: ProductId,
        quantity: u32,
    ) -> StoreResult<Vec<CartEvent>> {
        let mut carts = self.carts.write().map_err(|_| poisoned())?;
        let cart = carts
            .entry(session_id)
            .or_insert_with(|| Cart::empty(session_id));

        let command = CartCommand::AddItem(AddItem {
            session_id,
            product_id,
            quantity,
            occurred_at: Utc::now(),
        });
        let events = execute(cart, &command)?;

        tracing::debug!(
            session_id = %session_id,
            product_id = %product_id,
            quantity,
            "cart item added"
        );
        Ok(events)
    }
}
