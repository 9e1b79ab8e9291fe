use thiserror::Error;

use cartbundle_core::StoreError;

/// A collaborator failed while the rule was running.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RuleError {
    #[error("catalog lookup failed: {0}")]
    Catalog(#[source] StoreError),

    #[error("cart store failed: {0}")]
    Cart(#[source] StoreError),
}
