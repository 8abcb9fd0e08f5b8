//! Normalization from raw vendor types to [`covercraft_core::ProductDocument`].
//!
//! Pure structural conversion — no I/O. Fetching and fallback policy live in
//! [`crate::gateway`]; this module only decides what a valid document looks
//! like. A vendor record either normalizes completely or fails; no partial
//! document is ever produced.

use covercraft_core::{OptionGroup, OptionValue, ProductDocument, Variant};
use rust_decimal::Decimal;

use crate::error::CatalogError;
use crate::types::{VendorProductResponse, VendorSku};

/// Purchase cap applied when the vendor omits `max_per_user` or sets it to 0.
const DEFAULT_MAX_PER_ORDER: u32 = 99;

/// Separator between option-value names in a derived variant display name.
const NAME_SEPARATOR: &str = " - ";

/// Normalizes a raw [`VendorProductResponse`] into a [`ProductDocument`].
///
/// Vendor IDs (product, option group, option value, SKU) are reused
/// verbatim. Disabled SKUs and SKUs that do not map every option group
/// exactly once are excluded, so every variant in the output is a full
/// point in the option-group cross-product.
///
/// # Errors
///
/// Returns [`CatalogError::InvalidRecord`] when the top-level status is not
/// `"OK"` or the `good` payload is missing.
pub fn normalize(response: VendorProductResponse) -> Result<ProductDocument, CatalogError> {
    if response.status != "OK" {
        return Err(CatalogError::InvalidRecord(format!(
            "vendor status is {:?}",
            response.status
        )));
    }
    let good = response
        .good
        .ok_or_else(|| CatalogError::InvalidRecord("vendor record has no good payload".into()))?;

    let option_groups: Vec<OptionGroup> = good
        .options
        .into_iter()
        .map(|group| OptionGroup {
            id: group.option_id,
            name: group.option_name,
            options: group
                .option_values
                .into_iter()
                .map(|value| OptionValue {
                    id: value.option_value_id,
                    name: value.option_value_name,
                })
                .collect(),
        })
        .collect();

    let images: Vec<String> = good.goods_images.into_iter().map(|i| i.url).collect();
    let product_image = images.first().cloned();

    let variants: Vec<Variant> = good
        .goods_sku
        .into_iter()
        .filter_map(|sku| normalize_sku(sku, &option_groups, product_image.as_deref()))
        .collect();

    let max_quantity_per_order = good
        .max_per_user
        .filter(|m| *m > 0)
        .unwrap_or(DEFAULT_MAX_PER_ORDER);

    Ok(ProductDocument {
        id: good.goods_id,
        name: good.goods_name,
        description: good.description,
        images,
        option_groups,
        variants,
        max_quantity_per_order,
        min_quantity_per_order: 1,
    })
}

/// Normalizes one vendor SKU, or returns `None` when it must be excluded.
///
/// Exclusion reasons: SKU disabled, a missing/duplicate mapping for some
/// option group, a mapping to an unknown option value, or a price that is
/// not a finite number. Malformed SKUs are logged and skipped rather than
/// failing the whole document.
fn normalize_sku(
    sku: VendorSku,
    option_groups: &[OptionGroup],
    product_image: Option<&str>,
) -> Option<Variant> {
    if !sku.is_enabled {
        return None;
    }

    // Walk groups in declaration order so both the id set and the derived
    // display name follow the product's group ordering, not the vendor's
    // mapping order.
    let mut option_value_ids = Vec::with_capacity(option_groups.len());
    let mut name_parts = Vec::with_capacity(option_groups.len());
    for group in option_groups {
        let mut mappings = sku
            .sku_option_mappings
            .iter()
            .filter(|m| m.option_id == group.id);
        let Some(mapping) = mappings.next() else {
            tracing::warn!(
                sku_id = sku.sku_id,
                group_id = group.id,
                "SKU has no mapping for option group, excluding partial variant"
            );
            return None;
        };
        if mappings.next().is_some() {
            tracing::warn!(
                sku_id = sku.sku_id,
                group_id = group.id,
                "SKU maps the same option group more than once, excluding"
            );
            return None;
        }
        let Some(value) = group.option(mapping.option_value_id) else {
            tracing::warn!(
                sku_id = sku.sku_id,
                group_id = group.id,
                option_value_id = mapping.option_value_id,
                "SKU references an unknown option value, excluding"
            );
            return None;
        };
        option_value_ids.push(value.id);
        name_parts.push(value.name.clone());
    }

    let name = if name_parts.is_empty() {
        format!("SKU {}", sku.sku_id)
    } else {
        name_parts.join(NAME_SEPARATOR)
    };

    let price = match Decimal::try_from(sku.price) {
        Ok(p) => p.round_dp(2),
        Err(e) => {
            tracing::warn!(
                sku_id = sku.sku_id,
                price = sku.price,
                error = %e,
                "SKU price is not a representable decimal, excluding"
            );
            return None;
        }
    };

    // Sellable quantity, not raw inventory; the raw field is only consulted
    // when the vendor omits the remaining field entirely.
    let raw_stock = sku
        .remaining_inventory
        .or(sku.inventory)
        .unwrap_or(0)
        .max(0);
    let stock = u32::try_from(raw_stock).unwrap_or(u32::MAX);

    let image = sku
        .images
        .first()
        .or_else(|| sku.sku_images.first())
        .map(|i| i.url.clone())
        .or_else(|| product_image.map(ToOwned::to_owned));

    let sku_code = sku
        .sku
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| sku.sku_id.to_string());

    Some(Variant {
        id: sku.sku_id,
        sku: sku_code,
        name,
        option_value_ids,
        stock,
        price,
        image,
    })
}
