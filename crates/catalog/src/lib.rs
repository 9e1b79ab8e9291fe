//! Product catalog for the storefront.
//!
//! Holds products, categories and category membership, and answers the
//! questions the cart rules ask of it through [`CatalogLookup`].

pub mod category;
pub mod in_memory;
pub mod lookup;
pub mod product;

pub use category::Category;
pub use in_memory::InMemoryCatalog;
pub use lookup::CatalogLookup;
pub use product::{Product, ProductStatus};
