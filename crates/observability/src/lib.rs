//! Process-wide tracing/logging setup for storefront hosts.

pub mod logging;

pub use logging::{LogFormat, init, init_for_tests, init_with};
