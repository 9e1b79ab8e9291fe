//! Cart rules run during add-to-cart validation.
//!
//! [`AutoBundleRule`] makes sure a configured product is in the cart whenever
//! a product from the trigger category is added. [`AutoBundleHook`] plugs it
//! into the storefront's validation pipeline, reading settings per event.

pub mod auto_bundle;
pub mod error;
pub mod hook;

pub use auto_bundle::{AutoBundleRule, BundleOutcome, DEFAULT_BUNDLE_QUANTITY};
pub use error::RuleError;
pub use hook::{AUTO_BUNDLE_PRIORITY, AutoBundleHook};
