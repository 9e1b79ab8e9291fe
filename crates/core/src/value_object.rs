//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects are **immutable** and **compared by value**. To "modify" one,
/// build a new one.
///
/// - **Value Object**: `CartLine { product_id: 7, quantity: 1 }`, the auto-bundle
///   `Configuration`
/// - **Entity**: `Product { id: 7, .. }`
///
/// ```ignore
/// #[derive(Debug, Clone, PartialEq, Eq)]
/// struct Quantity(u32);
///
/// impl ValueObject for Quantity {}
///
/// assert_eq!(Quantity(2), Quantity(2));
/// ```
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
