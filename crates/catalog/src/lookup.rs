use std::sync::Arc;

use cartbundle_core::{CategoryId, ProductId, StoreResult};

use crate::{Category, Product};

/// Read access to the catalog.
///
/// Every call reflects the catalog as it is now; implementations must not
/// cache answers across calls.
pub trait CatalogLookup: Send + Sync {
    /// Whether `product_id` is directly assigned to `category_id`.
    ///
    /// Unknown products and categories answer `false`.
    fn has_category(&self, product_id: ProductId, category_id: CategoryId) -> StoreResult<bool>;

    fn product(&self, product_id: ProductId) -> StoreResult<Option<Product>>;

    fn category(&self, category_id: CategoryId) -> StoreResult<Option<Category>>;

    /// All published products, ordered by id.
    fn published_products(&self) -> StoreResult<Vec<Product>>;

    /// Categories with at least one published product, ordered by name.
    fn non_empty_categories(&self) -> StoreResult<Vec<Category>>;
}

impl<C> CatalogLookup for Arc<C>
where
    C: CatalogLookup + ?Sized,
{
    fn has_category(&self, product_id: ProductId, category_id: CategoryId) -> StoreResult<bool> {
        (**self).has_category(product_id, category_id)
    }

    fn product(&self, product_id: ProductId) -> StoreResult<Option<Product>> {
        (**self).product(product_id)
    }

    fn category(&self, category_id: CategoryId) -> StoreResult<Option<Category>> {
        (**self).category(category_id)
    }

    fn published_products(&self) -> StoreResult<Vec<Product>> {
        (**self).published_products()
    }

    fn non_empty_categories(&self) -> StoreResult<Vec<Category>> {
        (**self).non_empty_categories()
    }
}
