//! Black-box checks of the auto-bundle behaviour through the storefront.

use std::sync::Arc;

use cartbundle_cart::{CartEvent, CartLine, CartStore, InMemoryCartStore};
use cartbundle_catalog::{Category, InMemoryCatalog, Product};
use cartbundle_core::{CategoryId, DomainError, ProductId, SessionId, StoreError, StoreResult};
use cartbundle_settings::{Configuration, InMemorySettingsStore, SettingsError, SettingsStore, keys};
use cartbundle_storefront::{AddToCartOutcome, InMemoryStorefront, Storefront};

fn cid(raw: u64) -> CategoryId {
    CategoryId::new(raw).unwrap()
}

fn pid(raw: u64) -> ProductId {
    ProductId::new(raw).unwrap()
}

/// Accessories (5): phone case (7), charger (8). Services (6): warranty (42).
/// Laptop (3) has no category.
fn seed(catalog: &InMemoryCatalog) {
    catalog.upsert_category(Category::new(cid(5), "Accessories").unwrap()).unwrap();
    catalog.upsert_category(Category::new(cid(6), "Services").unwrap()).unwrap();
    for (id, name, category) in [(7, "Phone case", Some(5)), (8, "Charger", Some(5)), (3, "Laptop", None)] {
        let mut product = Product::new(pid(id), name).unwrap().published();
        if let Some(category) = category {
            product = product.with_category(cid(category));
        }
        catalog.upsert_product(product).unwrap();
    }
    catalog
        .upsert_product(Product::new(pid(42), "Warranty").unwrap().published().with_category(cid(6)))
        .unwrap();
}

fn configured_shop() -> InMemoryStorefront {
    cartbundle_observability::init_for_tests();
    let shop = InMemoryStorefront::in_memory();
    seed(shop.catalog());
    shop.settings()
        .save(&Configuration::new(cid(5), pid(42)))
        .unwrap();
    shop
}

#[test]
fn adding_a_trigger_product_bundles_the_warranty_once() {
    let shop = configured_shop();
    let session = SessionId::new();

    shop.add_to_cart(session, pid(7), 1).unwrap();
    assert_eq!(
        shop.cart(session).unwrap(),
        vec![CartLine::new(pid(42), 1), CartLine::new(pid(7), 1)]
    );

    shop.add_to_cart(session, pid(7), 1).unwrap();
    assert_eq!(
        shop.cart(session).unwrap(),
        vec![CartLine::new(pid(42), 1), CartLine::new(pid(7), 2)]
    );
}

#[test]
fn different_trigger_products_share_one_bundle_line() {
    let shop = configured_shop();
    let session = SessionId::new();

    shop.add_to_cart(session, pid(7), 1).unwrap();
    shop.add_to_cart(session, pid(8), 3).unwrap();

    let lines = shop.cart(session).unwrap();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines.iter().filter(|l| l.product_id == pid(42)).count(), 1);
}

#[test]
fn non_trigger_products_are_added_alone() {
    let shop = configured_shop();
    let session = SessionId::new();

    let outcome = shop.add_to_cart(session, pid(3), 1).unwrap();

    assert!(matches!(outcome, AddToCartOutcome::Added(_)));
    assert_eq!(shop.cart(session).unwrap(), vec![CartLine::new(pid(3), 1)]);
}

#[test]
fn unconfigured_shop_never_bundles() {
    cartbundle_observability::init_for_tests();
    let shop = InMemoryStorefront::in_memory();
    seed(shop.catalog());
    let session = SessionId::new();

    shop.add_to_cart(session, pid(7), 1).unwrap();
    assert_eq!(shop.cart(session).unwrap(), vec![CartLine::new(pid(7), 1)]);
}

#[test]
fn bundles_are_scoped_to_each_session() {
    let shop = configured_shop();
    let first = SessionId::new();
    let second = SessionId::new();

    shop.add_to_cart(first, pid(7), 1).unwrap();
    shop.add_to_cart(second, pid(3), 1).unwrap();

    assert_eq!(shop.cart(first).unwrap().len(), 2);
    assert_eq!(shop.cart(second).unwrap(), vec![CartLine::new(pid(3), 1)]);
}

#[test]
fn self_bundling_configuration_cannot_be_saved() {
    let shop = configured_shop();

    let err = shop
        .settings()
        .save(&Configuration::new(cid(5), pid(7)))
        .unwrap_err();
    assert!(matches!(err, SettingsError::Domain(DomainError::Validation(_))));
    assert_eq!(shop.settings().load().unwrap(), Configuration::new(cid(5), pid(42)));
}

#[test]
fn self_bundling_written_behind_the_service_is_ignored() {
    let shop = configured_shop();
    shop.settings()
        .store()
        .set(keys::BUNDLED_PRODUCT, "8".to_string())
        .unwrap();
    let session = SessionId::new();

    shop.add_to_cart(session, pid(7), 1).unwrap();
    assert_eq!(shop.cart(session).unwrap(), vec![CartLine::new(pid(7), 1)]);
}

#[test]
fn settings_section_lists_catalog_choices() {
    let shop = configured_shop();
    let json = shop.settings_section().unwrap().to_json().unwrap();

    assert_eq!(json["id"], "auto_add");
    let categories: Vec<&str> = json["fields"][1]["allowed_values"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["label"].as_str().unwrap())
        .collect();
    assert_eq!(categories, vec!["Accessories", "Services"]);
}

/// Cart store whose reads always fail but whose writes succeed.
#[derive(Default)]
struct UnreadableCart {
    inner: InMemoryCartStore,
}

impl CartStore for UnreadableCart {
    fn list_items(&self, _: SessionId) -> StoreResult<Vec<CartLine>> {
        Err(StoreError::unavailable("cart replica lagging"))
    }

    fn add_item(
        &self,
        session_id: SessionId,
        product_id: ProductId,
        quantity: u32,
    ) -> StoreResult<Vec<CartEvent>> {
        self.inner.add_item(session_id, product_id, quantity)
    }
}

#[test]
fn cart_failures_do_not_block_the_customer() {
    cartbundle_observability::init_for_tests();
    let catalog = Arc::new(InMemoryCatalog::new());
    seed(&catalog);
    let cart = Arc::new(UnreadableCart::default());
    let shop = Storefront::new(
        catalog,
        Arc::clone(&cart),
        Arc::new(InMemorySettingsStore::new()),
    )
    .with_auto_bundle();
    shop.settings()
        .save(&Configuration::new(cid(5), pid(42)))
        .unwrap();
    let session = SessionId::new();

    let outcome = shop.add_to_cart(session, pid(7), 1).unwrap();

    assert!(matches!(outcome, AddToCartOutcome::Added(_)));
    assert_eq!(cart.inner.list_items(session).unwrap(), vec![CartLine::new(pid(7), 1)]);
}
