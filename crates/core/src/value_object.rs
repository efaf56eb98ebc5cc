//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**: a SKU or a single
/// sales-history entry has no identity of its own. To "modify" one, build a new
/// value.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
