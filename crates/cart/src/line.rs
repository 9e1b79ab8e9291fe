use serde::{Deserialize, Serialize};

use cartbundle_core::{ProductId, ValueObject};

/// One cart entry: a product and how many units of it.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product_id: ProductId, quantity: u32) -> Self {
        Self {
            product_id,
            quantity,
        }
    }
}

impl ValueObject for CartLine {}
