pub mod storage;

use rust_decimal::Decimal;
use tracing::{error, info};

use crate::domain::cart::{CartItem, CartItemId};
use crate::errors::ApplicationError;

use self::storage::CartStorage;

/// Ordered cart lines backed by a snapshot store. Every mutation is saved immediately.
pub struct CartStore<S> {
    items: Vec<CartItem>,
    storage: S,
}

impl<S: CartStorage> CartStore<S> {
    /// Restores the last snapshot. An unreadable snapshot is logged and the cart starts empty.
    pub fn open(storage: S) -> Self {
        let items = match storage.load() {
            Ok(items) => items,
            Err(load_error) => {
                error!(
                    event_name = "cart.restore_failed",
                    storage = storage.name(),
                    error = %load_error,
                    "discarding unreadable cart snapshot"
                );
                Vec::new()
            }
        };

        Self { items, storage }
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn find(&self, id: &CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Appends `item`, or adds its quantity to the line that already carries the same id.
    pub fn add_item(&mut self, item: CartItem) -> Result<(), ApplicationError> {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(item.quantity),
            None => {
                info!(
                    event_name = "cart.item_added",
                    item_id = %item.id.0,
                    service_id = %item.service_id,
                    quantity = item.quantity,
                    "cart line added"
                );
                self.items.push(item);
            }
        }
        self.persist()
    }

    /// Sets the quantity of line `id`. Quantities below one are ignored.
    pub fn update_item(&mut self, id: &CartItemId, quantity: u32) -> Result<(), ApplicationError> {
        if quantity < 1 {
            return Ok(());
        }
        let Some(item) = self.items.iter_mut().find(|item| &item.id == id) else {
            return Ok(());
        };
        item.quantity = quantity;
        self.persist()
    }

    pub fn remove_item(&mut self, id: &CartItemId) -> Result<(), ApplicationError> {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        if self.items.len() == before {
            return Ok(());
        }
        self.persist()
    }

    pub fn clear(&mut self) -> Result<(), ApplicationError> {
        self.items.clear();
        self.persist()
    }

    /// Number of units across all lines.
    pub fn total_items(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    pub fn subtotal(&self) -> Decimal {
        self.items.iter().map(CartItem::line_total).sum()
    }

    fn persist(&mut self) -> Result<(), ApplicationError> {
        self.storage.save(&self.items)
    }
}
