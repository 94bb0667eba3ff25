//! Value object trait: equality by value, not identity.
//!
//! Transaction deltas and trajectory points are value objects: they carry an
//! item id, but two points with the same fields are interchangeable.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one. A computed trajectory is never patched in place; the whole
/// window is recomputed instead.
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Delta {
///     quantity: u32,
/// }
///
/// impl ValueObject for Delta {}
///
/// assert_eq!(Delta { quantity: 5 }, Delta { quantity: 5 });
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
