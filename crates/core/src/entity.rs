//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Records owned by the external store (inventory items) are entities: two
/// snapshots with the same id describe the same item at different times.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}
