//! Stable setting keys and the admin section they live in.

/// Trigger category id.
pub const TRIGGER_CATEGORY: &str = "auto_add_category_id";

/// Bundled (auto-added) product id.
pub const BUNDLED_PRODUCT: &str = "auto_add_product_id";

/// Section id under the host's product settings tab.
pub const SECTION_ID: &str = "auto_add";

/// Environment variable seeding [`TRIGGER_CATEGORY`].
pub const ENV_TRIGGER_CATEGORY: &str = "CARTBUNDLE_TRIGGER_CATEGORY_ID";

/// Environment variable seeding [`BUNDLED_PRODUCT`].
pub const ENV_BUNDLED_PRODUCT: &str = "CARTBUNDLE_BUNDLED_PRODUCT_ID";
