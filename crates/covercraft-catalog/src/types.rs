//! Vendor API response types for the upstream goods endpoint.
//!
//! ## Observed shape from the live order API
//!
//! ### Envelope
//! Every response wraps the payload in `{ "status": "...", "good": {...} }`.
//! `status` is `"OK"` on success; anything else (observed: `"FAIL"`) means
//! the record is unusable even when HTTP reports 200. `good` may be `null`
//! on logical failures.
//!
//! ### Inventory
//! SKUs carry both `inventory` (raw/total) and `remaining_inventory`
//! (sellable). Normalization reads `remaining_inventory` and only falls
//! back to `inventory` when the remaining field is absent.
//!
//! ### `is_enabled`
//! Sent as a JSON bool by newer API versions and as `0`/`1` by older ones;
//! both are accepted. Absent means enabled.
//!
//! ### SKU images
//! Some records populate `images`, others `sku_images`; either may be an
//! empty array. Both are modeled and tried in that order.

use serde::{Deserialize, Deserializer};

/// Top-level response from the vendor goods endpoint.
#[derive(Debug, Deserialize)]
pub struct VendorProductResponse {
    /// `"OK"` on success; any other value invalidates the record.
    pub status: String,

    /// The product record. `null` when the vendor reports a logical failure.
    #[serde(default)]
    pub good: Option<VendorGood>,
}

/// A single product record from the vendor.
#[derive(Debug, Deserialize)]
pub struct VendorGood {
    /// Vendor numeric product ID.
    pub goods_id: i64,

    pub goods_name: String,

    #[serde(default)]
    pub description: Option<String>,

    /// Per-order purchase cap. Absent or `0` means the vendor imposes none.
    #[serde(default)]
    pub max_per_user: Option<u32>,

    /// Product gallery, in display order.
    #[serde(default)]
    pub goods_images: Vec<VendorImage>,

    /// Customization dimensions, in display order.
    #[serde(default)]
    pub options: Vec<VendorOptionGroup>,

    /// All SKUs, including disabled ones — filtering happens during
    /// normalization.
    #[serde(default)]
    pub goods_sku: Vec<VendorSku>,
}

/// An image reference. Only the URL is consumed.
#[derive(Debug, Deserialize)]
pub struct VendorImage {
    pub url: String,
}

/// A customization dimension (e.g. Character, Size).
#[derive(Debug, Deserialize)]
pub struct VendorOptionGroup {
    pub option_id: i64,
    pub option_name: String,
    #[serde(default)]
    pub option_values: Vec<VendorOptionValue>,
}

/// One concrete choice within a [`VendorOptionGroup`].
#[derive(Debug, Deserialize)]
pub struct VendorOptionValue {
    pub option_value_id: i64,
    pub option_value_name: String,
}

/// A purchasable SKU record.
#[derive(Debug, Deserialize)]
pub struct VendorSku {
    /// Vendor numeric SKU ID.
    pub sku_id: i64,

    /// SKU code string. Absent on some records; the numeric ID is used as a
    /// substitute during normalization.
    #[serde(default)]
    pub sku: Option<String>,

    /// Unit price as a JSON number, e.g. `19.99`.
    pub price: f64,

    /// Raw/total inventory. Only a fallback for stock.
    #[serde(default)]
    pub inventory: Option<i64>,

    /// Remaining sellable inventory — the source of truth for stock.
    #[serde(default)]
    pub remaining_inventory: Option<i64>,

    /// Whether the SKU is purchasable. Disabled SKUs never reach the
    /// normalized document.
    #[serde(default = "default_enabled", deserialize_with = "bool_from_int_or_bool")]
    pub is_enabled: bool,

    /// Primary SKU image list.
    #[serde(default)]
    pub images: Vec<VendorImage>,

    /// Secondary SKU image list used by older records.
    #[serde(default)]
    pub sku_images: Vec<VendorImage>,

    /// One mapping per option group this SKU covers.
    #[serde(default)]
    pub sku_option_mappings: Vec<VendorOptionMapping>,
}

/// Links a SKU to one option value within one option group.
#[derive(Debug, Deserialize)]
pub struct VendorOptionMapping {
    pub option_id: i64,
    pub option_value_id: i64,
}

fn default_enabled() -> bool {
    true
}

/// Accepts both JSON bool and the older `0`/`1` integer encoding.
fn bool_from_int_or_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Flag {
        Bool(bool),
        Int(i64),
    }

    match Flag::deserialize(deserializer)? {
        Flag::Bool(b) => Ok(b),
        Flag::Int(i) => Ok(i != 0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn is_enabled_accepts_bool() {
        let sku: VendorSku =
            serde_json::from_str(r#"{"sku_id": 1, "price": 19.99, "is_enabled": false}"#)
                .expect("deserialization failed");
        assert!(!sku.is_enabled);
    }

    #[test]
    fn is_enabled_accepts_legacy_int() {
        let sku: VendorSku =
            serde_json::from_str(r#"{"sku_id": 1, "price": 19.99, "is_enabled": 0}"#)
                .expect("deserialization failed");
        assert!(!sku.is_enabled);

        let sku: VendorSku =
            serde_json::from_str(r#"{"sku_id": 1, "price": 19.99, "is_enabled": 1}"#)
                .expect("deserialization failed");
        assert!(sku.is_enabled);
    }

    #[test]
    fn is_enabled_defaults_to_true_when_absent() {
        let sku: VendorSku = serde_json::from_str(r#"{"sku_id": 1, "price": 19.99}"#)
            .expect("deserialization failed");
        assert!(sku.is_enabled);
    }

    #[test]
    fn good_may_be_null_in_envelope() {
        let response: VendorProductResponse =
            serde_json::from_str(r#"{"status": "FAIL", "good": null}"#)
                .expect("deserialization failed");
        assert_eq!(response.status, "FAIL");
        assert!(response.good.is_none());
    }
}
