use std::sync::Arc;

use cartbundle_cart::{CartEvent, CartLine, CartStore, InMemoryCartStore};
use cartbundle_catalog::{CatalogLookup, InMemoryCatalog};
use cartbundle_core::{ProductId, SessionId};
use cartbundle_events::{AddToCartRequest, ValidationHook, ValidationPipeline};
use cartbundle_rules::{AUTO_BUNDLE_PRIORITY, AutoBundleHook, AutoBundleRule};
use cartbundle_settings::{InMemorySettingsStore, SettingsSection, SettingsService, SettingsStore};

use crate::StorefrontError;

/// Result of a customer add-to-cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddToCartOutcome {
    /// The pending item was committed; events describe the change to its line.
    Added(Vec<CartEvent>),
    /// A validation hook failed the request; the pending item was not added.
    Rejected,
}

/// Storefront with every collaborator held in memory.
pub type InMemoryStorefront = Storefront<InMemoryCatalog, InMemoryCartStore, InMemorySettingsStore>;

pub struct Storefront<C, K, S> {
    catalog: Arc<C>,
    cart: Arc<K>,
    settings: SettingsService<Arc<S>, Arc<C>>,
    validation: ValidationPipeline,
}

impl<C, K, S> Storefront<C, K, S>
where
    C: CatalogLookup + 'static,
    K: CartStore + 'static,
    S: SettingsStore + 'static,
{
    /// Storefront with an empty validation pipeline.
    pub fn new(catalog: Arc<C>, cart: Arc<K>, settings: Arc<S>) -> Self {
        Self {
            settings: SettingsService::new(settings, Arc::clone(&catalog)),
            catalog,
            cart,
            validation: ValidationPipeline::new(),
        }
    }

    /// Register the auto-bundle hook at [`AUTO_BUNDLE_PRIORITY`].
    pub fn with_auto_bundle(mut self) -> Self {
        let rule = AutoBundleRule::new(Arc::clone(&self.catalog), Arc::clone(&self.cart));
        let hook = AutoBundleHook::new(rule, Arc::clone(self.settings.store()));
        self.register_hook(AUTO_BUNDLE_PRIORITY, Arc::new(hook));
        self
    }

    pub fn register_hook(&mut self, priority: i32, hook: Arc<dyn ValidationHook>) {
        tracing::debug!(hook = hook.name(), priority, "validation hook registered");
        self.validation.register(priority, hook);
    }

    pub fn catalog(&self) -> &Arc<C> {
        &self.catalog
    }

    pub fn settings(&self) -> &SettingsService<Arc<S>, Arc<C>> {
        &self.settings
    }

    pub fn settings_section(&self) -> Result<SettingsSection, StorefrontError> {
        Ok(self.settings.section()?)
    }

    pub fn cart(&self, session_id: SessionId) -> Result<Vec<CartLine>, StorefrontError> {
        Ok(self.cart.list_items(session_id)?)
    }

    /// Validate and commit a customer add-to-cart.
    ///
    /// Hooks run before the pending item is written, so none of them see it
    /// in cart state.
    pub fn add_to_cart(
        &self,
        session_id: SessionId,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<AddToCartOutcome, StorefrontError> {
        if quantity == 0 {
            return Err(StorefrontError::InvalidQuantity);
        }

        let product = self
            .catalog
            .product(product_id)?
            .ok_or(StorefrontError::UnknownProduct(product_id))?;
        if !product.is_published() {
            return Err(StorefrontError::NotPurchasable(product_id));
        }

        let request = AddToCartRequest {
            session_id,
            product_id,
            quantity,
        };
        if !self.validation.run(true, &request) {
            tracing::info!(
                session_id = %session_id,
                product_id = %product_id,
                "add-to-cart rejected by validation"
            );
            return Ok(AddToCartOutcome::Rejected);
        }

        let events = self.cart.add_item(session_id, product_id, quantity)?;
        Ok(AddToCartOutcome::Added(events))
    }
}

impl InMemoryStorefront {
    /// Fresh in-memory storefront with the auto-bundle hook registered.
    pub fn in_memory() -> Self {
        Self::new(
            Arc::new(InMemoryCatalog::new()),
            Arc::new(InMemoryCartStore::new()),
            Arc::new(InMemorySettingsStore::new()),
        )
        .with_auto_bundle()
    }
}

impl<C, K, S> core::fmt::Debug for Storefront<C, K, S> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Storefront")
            .field("validation", &self.validation)
            .finish_non_exhaustive()
    }
}
