use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use cartbundle_core::{CategoryId, DomainError, DomainResult, Entity, ProductId};

/// Product publication status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Draft,
    Pending,
    Private,
    Published,
}

/// A catalog product and its category memberships.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    id: ProductId,
    name: String,
    status: ProductStatus,
    categories: BTreeSet<CategoryId>,
}

impl Product {
    /// New draft product without categories.
    pub fn new(id: ProductId, name: impl Into<String>) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("product name cannot be empty"));
        }

        Ok(Self {
            id,
            name,
            status: ProductStatus::Draft,
            categories: BTreeSet::new(),
        })
    }

    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = status;
        self
    }

    pub fn published(self) -> Self {
        self.with_status(ProductStatus::Published)
    }

    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.categories.insert(category_id);
        self
    }

    pub fn id_typed(&self) -> ProductId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn status(&self) -> ProductStatus {
        self.status
    }

    pub fn categories(&self) -> &BTreeSet<CategoryId> {
        &self.categories
    }

    /// Direct membership only; parent categories are not implied.
    pub fn belongs_to(&self, category_id: CategoryId) -> bool {
        self.categories.contains(&category_id)
    }

    /// Only published products can be bought or offered in settings.
    pub fn is_published(&self) -> bool {
        self.status == ProductStatus::Published
    }

    pub(crate) fn categories_mut(&mut self) -> &mut BTreeSet<CategoryId> {
        &mut self.categories
    }
}

impl Entity for Product {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product_id(raw: u64) -> ProductId {
        ProductId::new(raw).unwrap()
    }

    fn category_id(raw: u64) -> CategoryId {
        CategoryId::new(raw).unwrap()
    }

    #[test]
    fn new_products_are_drafts_without_categories() {
        let product = Product::new(product_id(7), "Phone case").unwrap();
        assert_eq!(product.status(), ProductStatus::Draft);
        assert!(!product.is_published());
        assert!(product.categories().is_empty());
        assert_eq!(*product.id(), product_id(7));
    }

    #[test]
    fn new_product_rejects_blank_name() {
        let err = Product::new(product_id(7), "   ").unwrap_err();
        match err {
            DomainError::Validation(_) => {}
            _ => panic!("Expected Validation error for blank name"),
        }
    }

    #[test]
    fn membership_is_direct_only() {
        let product = Product::new(product_id(7), "Phone case")
            .unwrap()
            .published()
            .with_category(category_id(5));

        assert!(product.belongs_to(category_id(5)));
        assert!(!product.belongs_to(category_id(1)));
        assert!(product.is_published());
    }

    #[test]
    fn status_serializes_lowercase() {
        let json = serde_json::to_string(&ProductStatus::Published).unwrap();
        assert_eq!(json, "\"published\"");
    }
}
