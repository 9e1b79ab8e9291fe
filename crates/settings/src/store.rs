use std::collections::BTreeMap;
use std::sync::{Arc, RwLock};

use anyhow::Context;

use cartbundle_core::{CategoryId, ProductId, StoreError, StoreResult};

use crate::keys;

/// String-valued settings keyed by stable names.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;

    fn set(&self, key: &str, value: String) -> StoreResult<()>;

    fn remove(&self, key: &str) -> StoreResult<()>;
}

impl<S> SettingsStore for Arc<S>
where
    S: SettingsStore + ?Sized,
{
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: String) -> StoreResult<()> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// In-memory settings store for tests/dev.
#[derive(Debug, Default)]
pub struct InMemorySettingsStore {
    values: RwLock<BTreeMap<String, String>>,
}

fn poisoned() -> StoreError {
    StoreError::unavailable("settings lock poisoned")
}

impl InMemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed from the process environment (see [`keys::ENV_TRIGGER_CATEGORY`]
    /// and [`keys::ENV_BUNDLED_PRODUCT`]).
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_vars(std::env::vars())
    }

    /// Seed from `(name, value)` pairs; unrelated names are ignored and blank
    /// values leave the setting unset.
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let store = Self::new();
        for (name, value) in vars {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match name.as_str() {
                keys::ENV_TRIGGER_CATEGORY => {
                    let id: CategoryId = value
                        .parse()
                        .with_context(|| format!("{name} must be a positive category id"))?;
                    store.set(keys::TRIGGER_CATEGORY, id.to_string())?;
                }
                keys::ENV_BUNDLED_PRODUCT => {
                    let id: ProductId = value
                        .parse()
                        .with_context(|| format!("{name} must be a positive product id"))?;
                    store.set(keys::BUNDLED_PRODUCT, id.to_string())?;
                }
                _ => {}
            }
        }
        Ok(store)
    }
}

impl SettingsStore for InMemorySettingsStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let values = self.values.read().map_err(|_| poisoned())?;
        Ok(values.get(key).cloned())
    }

    fn set(&self, key: &str, value: String) -> StoreResult<()> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        let mut values = self.values.write().map_err(|_| poisoned())?;
        values.remove(key);
        Ok(())
    }
}
