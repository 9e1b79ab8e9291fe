//! Shopping cart domain module.
//!
//! The [`Cart`] aggregate holds one line per product for a single customer
//! session; [`CartStore`] is the collaborator interface the storefront and
//! cart rules use to read and extend carts.

pub mod cart;
pub mod line;
pub mod store;

pub use cart::{AddItem, Cart, CartCommand, CartEvent, LineAdded, LineQuantityIncreased};
pub use line::CartLine;
pub use store::{CartStore, InMemoryCartStore};
