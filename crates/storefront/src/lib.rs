//! Storefront host facade.
//!
//! Wires the catalog, cart store, settings and the add-to-cart validation
//! pipeline together the way a shop front end drives them.

pub mod error;
pub mod storefront;

pub use error::StorefrontError;
pub use storefront::{AddToCartOutcome, InMemoryStorefront, Storefront};
