use core::num::NonZeroU32;

use cartbundle_cart::CartStore;
use cartbundle_catalog::CatalogLookup;
use cartbundle_events::AddToCartRequest;
use cartbundle_settings::Configuration;

use crate::RuleError;

/// Units of the bundled product added when it is missing.
pub const DEFAULT_BUNDLE_QUANTITY: NonZeroU32 = NonZeroU32::MIN;

/// What the rule did for one add-to-cart event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleOutcome {
    /// Trigger category or bundled product not set.
    Unconfigured,
    /// The pending product is not in the trigger category.
    NotTriggered,
    /// The bundled product is unknown to the catalog or not published.
    InvalidConfiguration,
    /// The bundled product is itself in the trigger category.
    SelfReference,
    /// The cart already has a line for the bundled product.
    AlreadyPresent,
    /// The bundled product was added to the cart.
    Added,
}

/// Adds the configured bundled product to the cart when a product from the
/// trigger category is added, at most once per cart.
///
/// The rule never rejects or alters the pending add. It reads the cart and
/// then writes to it without holding a lock, so two concurrent requests for
/// the same session may both add the bundle.
#[derive(Debug)]
pub struct AutoBundleRule<C, K> {
    catalog: C,
    cart: K,
    bundle_quantity: NonZeroU32,
}

impl<C, K> AutoBundleRule<C, K>
where
    C: CatalogLookup,
    K: CartStore,
{
    pub fn new(catalog: C, cart: K) -> Self {
        Self {
            catalog,
            cart,
            bundle_quantity: DEFAULT_BUNDLE_QUANTITY,
        }
    }

    pub fn with_bundle_quantity(mut self, quantity: NonZeroU32) -> Self {
        self.bundle_quantity = quantity;
        self
    }

    /// Run the rule and return `passed` unchanged.
    ///
    /// Collaborator failures are logged and swallowed.
    pub fn evaluate(&self, passed: bool, request: &AddToCartRequest, config: &Configuration) -> bool {
        match self.apply(request, config) {
            Ok(BundleOutcome::Added) => {
                tracing::info!(
                    session_id = %request.session_id,
                    product_id = %request.product_id,
                    bundled_product_id = ?config.bundled_product_id,
                    "bundled product added to cart"
                );
            }
            Ok(outcome) => {
                tracing::debug!(
                    session_id = %request.session_id,
                    product_id = %request.product_id,
                    ?outcome,
                    "auto-bundle skipped"
                );
            }
            Err(e) => {
                tracing::error!(
                    session_id = %request.session_id,
                    product_id = %request.product_id,
                    error = %e,
                    "auto-bundle failed; add-to-cart continues"
                );
            }
        }
        passed
    }

    /// Decide and, when needed, add the bundled product.
    pub fn apply(
        &self,
        request: &AddToCartRequest,
        config: &Configuration,
    ) -> Result<BundleOutcome, RuleError> {
        let Some((trigger_category_id, bundled_product_id)) = config.active() else {
            return Ok(BundleOutcome::Unconfigured);
        };

        let triggered = self
            .catalog
            .has_category(request.product_id, trigger_category_id)
            .map_err(RuleError::Catalog)?;
        if !triggered {
            return Ok(BundleOutcome::NotTriggered);
        }

        let bundled = self
            .catalog
            .product(bundled_product_id)
            .map_err(RuleError::Catalog)?;
        if !bundled.is_some_and(|p| p.is_published()) {
            return Ok(BundleOutcome::InvalidConfiguration);
        }

        // The pending add is not in the cart yet; a bundle from the trigger
        // category would be added on top of it.
        let self_reference = self
            .catalog
            .has_category(bundled_product_id, trigger_category_id)
            .map_err(RuleError::Catalog)?;
        if self_reference {
            tracing::warn!(
                bundled_product_id = %bundled_product_id,
                trigger_category_id = %trigger_category_id,
                "bundled product belongs to the trigger category; not adding"
            );
            return Ok(BundleOutcome::SelfReference);
        }

        let present = self
            .cart
            .contains(request.session_id, bundled_product_id)
            .map_err(RuleError::Cart)?;
        if present {
            return Ok(BundleOutcome::AlreadyPresent);
        }

        self.cart
            .add_item(request.session_id, bundled_product_id, self.bundle_quantity.get())
            .map_err(RuleError::Cart)?;
        Ok(BundleOutcome::Added)
    }
}
