use cartbundle_cart::CartStore;
use cartbundle_catalog::CatalogLookup;
use cartbundle_events::{AddToCartRequest, ValidationHook};
use cartbundle_settings::{Configuration, SettingsStore};

use crate::AutoBundleRule;

/// Pipeline priority of the auto-bundle hook (after default-priority hooks at 10).
pub const AUTO_BUNDLE_PRIORITY: i32 = 20;

/// Validation hook that loads the current configuration for every event and
/// hands it to an [`AutoBundleRule`].
#[derive(Debug)]
pub struct AutoBundleHook<C, K, S> {
    rule: AutoBundleRule<C, K>,
    settings: S,
}

impl<C, K, S> AutoBundleHook<C, K, S>
where
    C: CatalogLookup,
    K: CartStore,
    S: SettingsStore,
{
    pub fn new(rule: AutoBundleRule<C, K>, settings: S) -> Self {
        Self { rule, settings }
    }

    pub fn rule(&self) -> &AutoBundleRule<C, K> {
        &self.rule
    }
}

impl<C, K, S> ValidationHook for AutoBundleHook<C, K, S>
where
    C: CatalogLookup,
    K: CartStore,
    S: SettingsStore,
{
    fn name(&self) -> &'static str {
        "auto_bundle"
    }

    fn validate(&self, passed: bool, request: &AddToCartRequest) -> bool {
        match Configuration::load(&self.settings) {
            Ok(config) => self.rule.evaluate(passed, request, &config),
            Err(e) => {
                tracing::error!(
                    session_id = %request.session_id,
                    product_id = %request.product_id,
                    error = %e,
                    "could not read auto-add settings; add-to-cart continues"
                );
                passed
            }
        }
    }
}
