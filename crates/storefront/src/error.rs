use thiserror::Error;

use cartbundle_core::{ProductId, StoreError};
use cartbundle_settings::SettingsError;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StorefrontError {
    #[error("quantity must be positive")]
    InvalidQuantity,

    #[error("unknown product {0}")]
    UnknownProduct(ProductId),

    #[error("product {0} cannot be purchased")]
    NotPurchasable(ProductId),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Settings(#[from] SettingsError),
}
