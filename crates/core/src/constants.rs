//! Shared constants for the import pipeline.
//!
//! Field names are exact, case-sensitive headers as they appear in the
//! storefront export files.

/// Required field carrying the stock keeping unit.
pub const PRODUCT_SKU_KEY: &str = "Product SKU";

/// Required field carrying the URL slug (the record lookup key).
pub const PRODUCT_SLUG_KEY: &str = "Slug";

pub const PRODUCT_NAME_KEY: &str = "Product Name";
pub const PRICE_KEY: &str = "Price";
pub const TAX_CLASS_KEY: &str = "Tax Class";
pub const PRODUCT_PUBLISHED_KEY: &str = "Product Published";
pub const PRODUCT_STATUS_KEY: &str = "Product Status";
pub const EXCERPT_KEY: &str = "Excerpt";
pub const PRODUCT_ID_KEY: &str = "Product ID";
pub const CATEGORY_KEY: &str = "Category";
pub const FEATURED_IMAGE_KEY: &str = "Featured Image";
pub const FEATURED_IMAGE_ALT_KEY: &str = "Featured Image Alternative Text";

/// `Product Status` value that marks a product as available.
pub const PUBLISHED_STATUS: &str = "Publish";

/// Tax percentage applied when the export carries no usable `Tax Class`.
pub const DEFAULT_TAX_PERCENT: i32 = 22;

/// Name of the shipping classification looked up for every imported product.
pub const DEFAULT_SHIPPING_CATEGORY: &str = "Default";

/// Taxonomy holding the category hierarchy from the `Category` field.
pub const CATEGORIES_TAXONOMY: &str = "Categories";

/// Taxonomy holding brand facets derived from the product name.
pub const BRAND_TAXONOMY: &str = "Brand";

/// Literal separator between a brand prefix and the rest of a product name.
/// An en-dash with surrounding spaces, as emitted by the export.
pub const BRAND_SEPARATOR: &str = " – ";

/// Separator between alternative category paths in the `Category` field.
pub const PATH_SEPARATOR: char = '|';

/// Separator between segments inside one category path.
pub const SEGMENT_SEPARATOR: char = '>';

/// Product property key the source record id is stored under.
pub const SOURCE_ID_PROPERTY: &str = "woocommerce_id";
