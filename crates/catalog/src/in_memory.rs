use std::collections::{BTreeMap, BTreeSet};
use std::sync::RwLock;

use cartbundle_core::{CategoryId, DomainError, ProductId, StoreError, StoreResult};

use crate::{CatalogLookup, Category, Product};

#[derive(Debug, Default)]
struct CatalogState {
    products: BTreeMap<ProductId, Product>,
    categories: BTreeMap<CategoryId, Category>,
}

impl CatalogState {
    fn ensure_category(&self, category_id: CategoryId) -> Result<(), DomainError> {
        if self.categories.contains_key(&category_id) {
            Ok(())
        } else {
            Err(DomainError::validation(format!("unknown category {category_id}")))
        }
    }

    /// Walk the parent chain from `parent`; reaching `child` means a cycle.
    fn creates_cycle(&self, child: CategoryId, parent: CategoryId) -> bool {
        let mut cursor = Some(parent);
        let mut seen = BTreeSet::new();
        while let Some(current) = cursor {
            if current == child || !seen.insert(current) {
                return true;
            }
            cursor = self.categories.get(&current).and_then(Category::parent);
        }
        false
    }
}

/// In-memory catalog for tests/dev.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    inner: RwLock<CatalogState>,
}

fn poisoned() -> StoreError {
    StoreError::unavailable("catalog lock poisoned")
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a category. Its parent must already exist.
    pub fn upsert_category(&self, category: Category) -> StoreResult<()> {
        let mut state = self.inner.write().map_err(|_| poisoned())?;
        if let Some(parent) = category.parent() {
            state.ensure_category(parent)?;
            if state.creates_cycle(category.id_typed(), parent) {
                return Err(DomainError::invariant("category parent chain forms a cycle").into());
            }
        }
        state.categories.insert(category.id_typed(), category);
        Ok(())
    }

    /// Insert or replace a product. Every category it references must exist.
    pub fn upsert_product(&self, product: Product) -> StoreResult<()> {
        let mut state = self.inner.write().map_err(|_| poisoned())?;
        for category_id in product.categories() {
            state.ensure_category(*category_id)?;
        }
        tracing::debug!(product_id = %product.id_typed(), "catalog product upserted");
        state.products.insert(product.id_typed(), product);
        Ok(())
    }

    pub fn remove_product(&self, product_id: ProductId) -> StoreResult<Option<Product>> {
        let mut state = self.inner.write().map_err(|_| poisoned())?;
        Ok(state.products.remove(&product_id))
    }

    /// Assign an existing product to an existing category.
    pub fn assign_category(&self, product_id: ProductId, category_id: CategoryId) -> StoreResult<()> {
        let mut state = self.inner.write().map_err(|_| poisoned())?;
        state.ensure_category(category_id)?;
        let product = state
            .products
            .get_mut(&product_id)
            .ok_or_else(DomainError::not_found)?;
        product.categories_mut().insert(category_id);
        Ok(())
    }

    /// Returns whether the product was assigned to the category.
    pub fn unassign_category(
        &self,
        product_id: ProductId,
        category_id: CategoryId,
    ) -> StoreResult<bool> {
        let mut state = self.inner.write().map_err(|_| poisoned())?;
        let product = state
            .products
            .get_mut(&product_id)
            .ok_or_else(DomainError::not_found)?;
        Ok(product.categories_mut().remove(&category_id))
    }
}

impl CatalogLookup for InMemoryCatalog {
    fn has_category(&self, product_id: ProductId, category_id: CategoryId) -> StoreResult<bool> {
        let state = self.inner.read().map_err(|_| poisoned())?;
        Ok(state
            .products
            .get(&product_id)
            .is_some_and(|p| p.belongs_to(category_id)))
    }

    fn product(&self, product_id: ProductId) -> StoreResult<Option<Product>> {
        let state = self.inner.read().map_err(|_| poisoned())?;
        Ok(state.products.get(&product_id).cloned())
    }

    fn category(&self, category_id: CategoryId) -> StoreResult<Option<Category>> {
        let state = self.inner.read().map_err(|_| poisoned())?;
        Ok(state.categories.get(&category_id).cloned())
    }

    fn published_products(&self) -> StoreResult<Vec<Product>> {
        let state = self.inner.read().map_err(|_| poisoned())?;
        Ok(state
            .products
            .values()
            .filter(|p| p.is_published())
            .cloned()
            .collect())
    }

    fn non_empty_categories(&self) -> StoreResult<Vec<Category>> {
        let state = self.inner.read().map_err(|_| poisoned())?;
        let used: BTreeSet<CategoryId> = state
            .products
            .values()
            .filter(|p| p.is_published())
            .flat_map(|p| p.categories().iter().copied())
            .collect();

        let mut categories: Vec<Category> = state
            .categories
            .values()
            .filter(|c| used.contains(&c.id_typed()))
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name().cmp(b.name()).then(a.id_typed().cmp(&b.id_typed())));
        Ok(categories)
    }
}
