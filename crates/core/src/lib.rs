//! `cartbundle-core` — storefront domain building blocks.
//!
//! This crate contains **pure domain** primitives (no infrastructure concerns).

pub mod aggregate;
pub mod entity;
pub mod error;
pub mod id;
pub mod value_object;

pub use aggregate::{Aggregate, AggregateRoot};
pub use entity::Entity;
pub use error::{DomainError, DomainResult, StoreError, StoreResult};
pub use id::{CategoryId, ProductId, SessionId};
pub use value_object::ValueObject;
