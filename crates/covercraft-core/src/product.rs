use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The canonical product document served to the storefront, normalized from
/// the upstream catalog vendor and immutable for the life of a page session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductDocument {
    /// Vendor numeric product ID, reused verbatim.
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    /// Product gallery image URLs, in vendor order. The first entry is the
    /// fallback display image when a variant has no image of its own.
    pub images: Vec<String>,
    /// Ordered, non-empty customization dimensions (e.g. Character, Size).
    pub option_groups: Vec<OptionGroup>,
    /// All purchasable variants. Each is a full point in the option-group
    /// cross-product; disabled and partially-mapped vendor SKUs never
    /// appear here.
    pub variants: Vec<Variant>,
    pub max_quantity_per_order: u32,
    pub min_quantity_per_order: u32,
}

impl ProductDocument {
    /// Returns the total number of purchasable variants.
    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.variants.len()
    }

    /// Returns `true` if at least one variant has stock remaining.
    #[must_use]
    pub fn has_stock(&self) -> bool {
        self.variants.iter().any(Variant::is_in_stock)
    }

    /// Looks up an option group by its vendor ID.
    #[must_use]
    pub fn option_group(&self, group_id: i64) -> Option<&OptionGroup> {
        self.option_groups.iter().find(|g| g.id == group_id)
    }

    /// Returns the first gallery image, if any.
    #[must_use]
    pub fn first_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// One dimension of product customization, e.g. `Size`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionGroup {
    /// Vendor numeric option-group ID, reused verbatim.
    pub id: i64,
    pub name: String,
    /// Choices within this group, in vendor order. Option-value IDs are
    /// globally unique across all groups of a product.
    pub options: Vec<OptionValue>,
}

impl OptionGroup {
    /// Looks up an option value within this group by its vendor ID.
    #[must_use]
    pub fn option(&self, option_value_id: i64) -> Option<&OptionValue> {
        self.options.iter().find(|o| o.id == option_value_id)
    }

    /// Returns `true` if `option_value_id` belongs to this group.
    #[must_use]
    pub fn contains_option(&self, option_value_id: i64) -> bool {
        self.options.iter().any(|o| o.id == option_value_id)
    }
}

/// One concrete choice within an [`OptionGroup`], e.g. `Adult`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionValue {
    /// Vendor numeric option-value ID, reused verbatim.
    pub id: i64,
    pub name: String,
}

/// A single purchasable combination of option values, with its own stock,
/// price, and image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    /// Vendor numeric SKU ID, reused verbatim.
    pub id: i64,
    /// Vendor SKU code; synthesized from the numeric ID when the vendor
    /// provides none.
    pub sku: String,
    /// Display name derived from the referenced option-value names, joined
    /// in option-group declaration order.
    pub name: String,
    /// Exactly one option-value ID per option group of the product.
    pub option_value_ids: Vec<i64>,
    /// Remaining sellable quantity.
    pub stock: u32,
    /// Unit price with two decimal places. Serialized as a string (e.g.
    /// `"19.99"`) but always a decimal for arithmetic.
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
}

impl Variant {
    /// Returns `true` if the variant has stock remaining.
    #[must_use]
    pub fn is_in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Returns `true` if this variant carries the given option value.
    #[must_use]
    pub fn contains_option_value(&self, option_value_id: i64) -> bool {
        self.option_value_ids.contains(&option_value_id)
    }
}
