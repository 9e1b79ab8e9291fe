use core::str::FromStr;

use serde::{Deserialize, Serialize};

use cartbundle_core::{CategoryId, ProductId, StoreResult, ValueObject};

use crate::{SettingsStore, keys};

/// Auto-add configuration: which category triggers, which product is added.
///
/// Both fields stay `None` until an administrator sets them.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Configuration {
    pub trigger_category_id: Option<CategoryId>,
    pub bundled_product_id: Option<ProductId>,
}

impl ValueObject for Configuration {}

impl Configuration {
    pub fn new(trigger_category_id: CategoryId, bundled_product_id: ProductId) -> Self {
        Self {
            trigger_category_id: Some(trigger_category_id),
            bundled_product_id: Some(bundled_product_id),
        }
    }

    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Both ids, when both are set.
    pub fn active(&self) -> Option<(CategoryId, ProductId)> {
        Some((self.trigger_category_id?, self.bundled_product_id?))
    }

    pub fn is_configured(&self) -> bool {
        self.active().is_some()
    }

    /// Read the current configuration from `store`.
    ///
    /// Blank values are unset. Values that do not parse as ids are logged and
    /// treated as unset.
    pub fn load<S>(store: &S) -> StoreResult<Self>
    where
        S: SettingsStore + ?Sized,
    {
        Ok(Self {
            trigger_category_id: read_id(store, keys::TRIGGER_CATEGORY)?,
            bundled_product_id: read_id(store, keys::BUNDLED_PRODUCT)?,
        })
    }
}

fn read_id<S, T>(store: &S, key: &str) -> StoreResult<Option<T>>
where
    S: SettingsStore + ?Sized,
    T: FromStr,
    T::Err: core::fmt::Display,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };
    if raw.trim().is_empty() {
        return Ok(None);
    }

    match raw.parse::<T>() {
        Ok(id) => Ok(Some(id)),
        Err(e) => {
            tracing::warn!(key, value = %raw, error = %e, "ignoring malformed setting");
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InMemorySettingsStore;

    #[test]
    fn empty_store_loads_unconfigured() {
        let store = InMemorySettingsStore::new();
        let config = Configuration::load(&store).unwrap();
        assert_eq!(config, Configuration::unconfigured());
        assert!(!config.is_configured());
    }

    #[test]
    fn load_reads_both_keys() {
        let store = InMemorySettingsStore::new();
        store.set(keys::TRIGGER_CATEGORY, "5".to_string()).unwrap();
        store.set(keys::BUNDLED_PRODUCT, "42".to_string()).unwrap();

        let config = Configuration::load(&store).unwrap();
        assert_eq!(
            config.active(),
            Some((CategoryId::new(5).unwrap(), ProductId::new(42).unwrap()))
        );
    }

    #[test]
    fn malformed_and_blank_values_degrade_to_unset() {
        let store = InMemorySettingsStore::new();
        store.set(keys::TRIGGER_CATEGORY, "accessories".to_string()).unwrap();
        store.set(keys::BUNDLED_PRODUCT, "".to_string()).unwrap();

        let config = Configuration::load(&store).unwrap();
        assert_eq!(config.trigger_category_id, None);
        assert_eq!(config.bundled_product_id, None);
    }

    #[test]
    fn zero_means_nothing_selected() {
        let store = InMemorySettingsStore::new();
        store.set(keys::TRIGGER_CATEGORY, "5".to_string()).unwrap();
        store.set(keys::BUNDLED_PRODUCT, "0".to_string()).unwrap();

        let config = Configuration::load(&store).unwrap();
        assert!(config.trigger_category_id.is_some());
        assert!(config.active().is_none());
    }
}
