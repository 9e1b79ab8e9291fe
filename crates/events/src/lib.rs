//! Storefront events and add-to-cart hook mechanics.

pub mod event;
pub mod handler;
pub mod hook;

pub use event::Event;
pub use handler::execute;
pub use hook::{AddToCartRequest, ValidationHook, ValidationPipeline};
