//! Read-only access to the external record store.

pub mod item_source;

pub use item_source::{InMemoryItemSource, ItemSource, SourceError};
