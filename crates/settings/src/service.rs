use cartbundle_catalog::CatalogLookup;
use cartbundle_core::DomainError;

use crate::{Configuration, SettingsError, SettingsSection, SettingsStore, keys, settings_section};

/// Admin-side access to the auto-add settings.
///
/// Saving validates against the catalog; the cart rule itself only ever reads.
#[derive(Debug)]
pub struct SettingsService<S, C> {
    store: S,
    catalog: C,
}

impl<S, C> SettingsService<S, C>
where
    S: SettingsStore,
    C: CatalogLookup,
{
    pub fn new(store: S, catalog: C) -> Self {
        Self { store, catalog }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn load(&self) -> Result<Configuration, SettingsError> {
        Ok(Configuration::load(&self.store)?)
    }

    pub fn section(&self) -> Result<SettingsSection, SettingsError> {
        Ok(settings_section(&self.catalog)?)
    }

    /// Check `config` against the current catalog.
    ///
    /// The bundled product must exist and be published, the trigger category
    /// must exist, and the bundled product must not itself be a member of the
    /// trigger category.
    pub fn validate(&self, config: &Configuration) -> Result<(), SettingsError> {
        if let Some(product_id) = config.bundled_product_id {
            let product = self.catalog.product(product_id)?.ok_or_else(|| {
                DomainError::validation(format!("unknown bundled product {product_id}"))
            })?;
            if !product.is_published() {
                return Err(DomainError::validation(format!(
                    "bundled product {product_id} is not published"
                ))
                .into());
            }
        }

        if let Some(category_id) = config.trigger_category_id {
            if self.catalog.category(category_id)?.is_none() {
                return Err(DomainError::validation(format!(
                    "unknown trigger category {category_id}"
                ))
                .into());
            }
        }

        if let Some((category_id, product_id)) = config.active() {
            if self.catalog.has_category(product_id, category_id)? {
                return Err(DomainError::validation(format!(
                    "bundled product {product_id} belongs to trigger category {category_id}"
                ))
                .into());
            }
        }

        Ok(())
    }

    /// Validate and persist. Unset fields remove their key.
    pub fn save(&self, config: &Configuration) -> Result<(), SettingsError> {
        self.validate(config)?;

        match config.trigger_category_id {
            Some(id) => self.store.set(keys::TRIGGER_CATEGORY, id.to_string())?,
            None => self.store.remove(keys::TRIGGER_CATEGORY)?,
        }
        match config.bundled_product_id {
            Some(id) => self.store.set(keys::BUNDLED_PRODUCT, id.to_string())?,
            None => self.store.remove(keys::BUNDLED_PRODUCT)?,
        }

        tracing::info!(
            trigger_category_id = ?config.trigger_category_id,
            bundled_product_id = ?config.bundled_product_id,
            "auto-add settings saved"
        );
        Ok(())
    }
}
