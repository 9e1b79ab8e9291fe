//! Typed description of the admin "Auto Add to Cart" section.
//!
//! This is data for whatever settings renderer the host provides; nothing
//! here renders UI.

use serde::{Deserialize, Serialize};

use cartbundle_catalog::CatalogLookup;
use cartbundle_core::StoreResult;

use crate::keys;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SettingKind {
    /// Plain dropdown.
    Select,
    /// Dropdown with type-ahead search, for long lists.
    SearchableSelect,
}

/// One selectable option: an entity id and its display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllowedValue {
    pub value: u64,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingDescriptor {
    pub key: String,
    pub label: String,
    pub kind: SettingKind,
    pub help: String,
    pub allowed_values: Vec<AllowedValue>,
}

impl SettingDescriptor {
    pub fn allows(&self, value: u64) -> bool {
        self.allowed_values.iter().any(|v| v.value == value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsSection {
    pub id: String,
    pub title: String,
    pub description: String,
    pub fields: Vec<SettingDescriptor>,
}

impl SettingsSection {
    pub fn field(&self, key: &str) -> Option<&SettingDescriptor> {
        self.fields.iter().find(|f| f.key == key)
    }

    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}

/// Build the section from the catalog as it is now.
///
/// Products: every published product. Categories: every non-empty category,
/// ordered by name.
pub fn settings_section<C>(catalog: &C) -> StoreResult<SettingsSection>
where
    C: CatalogLookup + ?Sized,
{
    let products = catalog
        .published_products()?
        .into_iter()
        .map(|p| AllowedValue {
            value: p.id_typed().get(),
            label: p.name().to_string(),
        })
        .collect();

    let categories = catalog
        .non_empty_categories()?
        .into_iter()
        .map(|c| AllowedValue {
            value: c.id_typed().get(),
            label: c.name().to_string(),
        })
        .collect();

    Ok(SettingsSection {
        id: keys::SECTION_ID.to_string(),
        title: "Auto Add to Cart".to_string(),
        description: "Automatically add a product to the cart when a product from a \
                      chosen category is added."
            .to_string(),
        fields: vec![
            SettingDescriptor {
                key: keys::BUNDLED_PRODUCT.to_string(),
                label: "Auto add product".to_string(),
                kind: SettingKind::SearchableSelect,
                help: "This product will be automatically added to the shopping cart when a \
                       product from the trigger category is added to the cart."
                    .to_string(),
                allowed_values: products,
            },
            SettingDescriptor {
                key: keys::TRIGGER_CATEGORY.to_string(),
                label: "Trigger category".to_string(),
                kind: SettingKind::Select,
                help: "When a product from this category is added to the shopping cart, the \
                       auto add product will also be added to the cart."
                    .to_string(),
                allowed_values: categories,
            },
        ],
    })
}
