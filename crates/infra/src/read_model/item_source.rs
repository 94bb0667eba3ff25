use std::sync::{Arc, RwLock};

use serde_json::Value as JsonValue;
use thiserror::Error;

use stockline_core::{Entity, ItemId};
use stockline_inventory::InventoryItem;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SourceError {
    #[error("item source unavailable: {0}")]
    Unavailable(String),

    #[error("failed to decode item record: {0}")]
    Decode(String),
}

/// Read-only view of the external record store's inventory items.
///
/// Implementations return items already filtered and ordered the way the
/// store was asked to; callers treat the order as the display order.
pub trait ItemSource: Send + Sync {
    fn list_items(&self) -> Result<Vec<InventoryItem>, SourceError>;
}

impl<S> ItemSource for Arc<S>
where
    S: ItemSource + ?Sized,
{
    fn list_items(&self) -> Result<Vec<InventoryItem>, SourceError> {
        (**self).list_items()
    }
}

/// In-memory item source for tests/dev. Preserves insertion order.
#[derive(Debug, Default)]
pub struct InMemoryItemSource {
    inner: RwLock<Vec<InventoryItem>>,
}

impl InMemoryItemSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_items(items: Vec<InventoryItem>) -> Self {
        Self {
            inner: RwLock::new(items),
        }
    }

    /// Build from raw store records (a JSON array of loosely-typed objects).
    pub fn from_json(records: JsonValue) -> Result<Self, SourceError> {
        let items: Vec<InventoryItem> =
            serde_json::from_value(records).map_err(|e| SourceError::Decode(e.to_string()))?;
        Ok(Self::with_items(items))
    }

    /// Insert a new item or replace the one with the same id in place.
    pub fn upsert(&self, item: InventoryItem) {
        match self.inner.write() {
            Ok(mut items) => match items.iter_mut().find(|i| i.id() == item.id()) {
                Some(existing) => *existing = item,
                None => items.push(item),
            },
            Err(_) => tracing::warn!(item_id = %item.id_typed(), "item store lock poisoned; upsert skipped"),
        }
    }

    /// Returns whether an item was removed.
    pub fn remove(&self, item_id: ItemId) -> bool {
        match self.inner.write() {
            Ok(mut items) => {
                let before = items.len();
                items.retain(|i| i.id_typed() != item_id);
                items.len() != before
            }
            Err(_) => {
                tracing::warn!(%item_id, "item store lock poisoned; remove skipped");
                false
            }
        }
    }
}

impl ItemSource for InMemoryItemSource {
    fn list_items(&self) -> Result<Vec<InventoryItem>, SourceError> {
        self.inner
            .read()
            .map(|items| items.clone())
            .map_err(|_| SourceError::Unavailable("item store lock poisoned".to_string()))
    }
}
