use thiserror::Error;

use cartbundle_core::{DomainError, StoreError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SettingsError {
    /// The configuration was rejected.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// The settings store or catalog failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}
