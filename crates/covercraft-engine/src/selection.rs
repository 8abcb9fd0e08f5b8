use covercraft_core::{ProductDocument, Variant};
use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// How one option button should render given the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionState {
    /// This option is the group's current selection.
    Selected,
    /// Choosing this option is still consistent with at least one in-stock
    /// variant, given every other group's current selection.
    Available,
    /// No in-stock variant is reachable through this option.
    Disabled,
}

/// A selection call referenced an ID the product does not have.
///
/// Distinct from "no variant matches": that is a normal, observable state
/// surfaced via [`SelectionEngine::resolved_variant`] returning `None`.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("unknown option group: {0}")]
    UnknownOptionGroup(i64),

    #[error("option value {option_value_id} does not belong to group {group_id}")]
    UnknownOptionValue { group_id: i64, option_value_id: i64 },
}

/// Owns the shopper's in-progress choice for one product session.
///
/// State is the product document (immutable), one selection slot per option
/// group, and the chosen quantity. Everything else is derived on demand.
pub struct SelectionEngine {
    product: ProductDocument,
    /// One slot per option group, in declaration order. `None` = unset.
    selection: Vec<(i64, Option<i64>)>,
    quantity: u32,
}

impl SelectionEngine {
    /// Creates an engine with the default selection.
    ///
    /// Defaults are chosen by a greedy, declaration-order, first-fit pass:
    /// for each group, the first option carried by some variant that is
    /// also consistent with the options already chosen for earlier groups.
    /// Stock is deliberately ignored here, and no backtracking happens —
    /// a later group can end up unset even when a different earlier choice
    /// would have permitted a full match. Quantity starts at the product's
    /// minimum per order.
    #[must_use]
    pub fn new(product: ProductDocument) -> Self {
        let mut selection: Vec<(i64, Option<i64>)> =
            Vec::with_capacity(product.option_groups.len());
        for group in &product.option_groups {
            let chosen = group
                .options
                .iter()
                .find(|option| {
                    product.variants.iter().any(|variant| {
                        variant.contains_option_value(option.id)
                            && selection.iter().all(|(_, earlier)| {
                                earlier.is_none_or(|id| variant.contains_option_value(id))
                            })
                    })
                })
                .map(|option| option.id);
            selection.push((group.id, chosen));
        }

        let quantity = product.min_quantity_per_order;
        Self {
            product,
            selection,
            quantity,
        }
    }

    /// The immutable product document this session was created from.
    #[must_use]
    pub fn product(&self) -> &ProductDocument {
        &self.product
    }

    /// The current selection for a group, if the group exists and is set.
    #[must_use]
    pub fn selected_option(&self, group_id: i64) -> Option<i64> {
        self.selection
            .iter()
            .find(|(gid, _)| *gid == group_id)
            .and_then(|(_, selected)| *selected)
    }

    #[must_use]
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Records the shopper's choice for one group.
    ///
    /// Only that group's slot changes — other groups are never reset, even
    /// when the combination can no longer resolve to any variant (that
    /// outcome is shopper intent, surfaced via [`Self::resolved_variant`]
    /// returning `None`). Quantity is re-clamped against the new variant's
    /// bounds afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError`] when `group_id` names no option group or
    /// `option_value_id` is not one of that group's options. The selection
    /// is untouched in that case.
    pub fn select_option(&mut self, group_id: i64, option_value_id: i64) -> Result<(), EngineError> {
        let group = self
            .product
            .option_group(group_id)
            .ok_or(EngineError::UnknownOptionGroup(group_id))?;
        if !group.contains_option(option_value_id) {
            return Err(EngineError::UnknownOptionValue {
                group_id,
                option_value_id,
            });
        }

        for slot in &mut self.selection {
            if slot.0 == group_id {
                slot.1 = Some(option_value_id);
                break;
            }
        }
        self.reclamp_quantity();
        Ok(())
    }

    /// The unique variant matching the complete current selection, if any.
    ///
    /// `None` while any group is unset, and `None` when no variant's
    /// option-value set equals the selected set exactly (size and
    /// containment both required — extra or missing IDs disqualify).
    #[must_use]
    pub fn resolved_variant(&self) -> Option<&Variant> {
        if self.selection.iter().any(|(_, selected)| selected.is_none()) {
            return None;
        }
        let selected: Vec<i64> = self
            .selection
            .iter()
            .filter_map(|(_, selected)| *selected)
            .collect();

        let mut matches = self.product.variants.iter().filter(|variant| {
            variant.option_value_ids.len() == selected.len()
                && selected.iter().all(|id| variant.contains_option_value(*id))
        });
        let first = matches.next()?;
        if matches.next().is_some() {
            // Catalog data is inconsistent; the first in declared order wins.
            tracing::warn!(
                product_id = self.product.id,
                variant_id = first.id,
                "multiple variants match the selection exactly, using the first"
            );
        }
        Some(first)
    }

    /// Classifies one option button against the current selection.
    ///
    /// `Selected` when it is the group's current choice. Otherwise the
    /// selection is hypothetically overridden with this option: `Available`
    /// when some in-stock variant carries it and agrees with every *other*
    /// group's current selection (unset groups constrain nothing), else
    /// `Disabled`. Unknown IDs classify as `Disabled` — queries are total.
    #[must_use]
    pub fn option_state(&self, group_id: i64, option_value_id: i64) -> OptionState {
        if self.selected_option(group_id) == Some(option_value_id) {
            return OptionState::Selected;
        }

        let reachable = self.product.variants.iter().any(|variant| {
            variant.contains_option_value(option_value_id)
                && variant.is_in_stock()
                && self.selection.iter().all(|(gid, selected)| {
                    *gid == group_id
                        || selected.is_none_or(|id| variant.contains_option_value(id))
                })
        });

        if reachable {
            OptionState::Available
        } else {
            OptionState::Disabled
        }
    }

    /// Stores a quantity, clamped into
    /// `[effective_min_quantity, effective_max_quantity]`. Never errors.
    pub fn set_quantity(&mut self, quantity: u32) {
        self.quantity = self
            .effective_min_quantity()
            .max(quantity.min(self.effective_max_quantity()));
    }

    /// Upper quantity bound: `min(stock, max_per_order)` once a variant is
    /// resolved, `0` otherwise.
    #[must_use]
    pub fn effective_max_quantity(&self) -> u32 {
        self.resolved_variant()
            .map_or(0, |variant| variant.stock.min(self.product.max_quantity_per_order))
    }

    /// Lower quantity bound, independent of resolution state.
    #[must_use]
    pub fn effective_min_quantity(&self) -> u32 {
        self.product.min_quantity_per_order
    }

    /// Total price for the current quantity, once a variant is resolved.
    #[must_use]
    pub fn current_price(&self) -> Option<Decimal> {
        self.resolved_variant()
            .map(|variant| variant.price * Decimal::from(self.quantity))
    }

    /// The image to display: the resolved variant's own image, else the
    /// product's first gallery image, else nothing.
    #[must_use]
    pub fn current_image(&self) -> Option<&str> {
        self.resolved_variant()
            .and_then(|variant| variant.image.as_deref())
            .or_else(|| self.product.first_image())
    }

    /// `false` while the selection is incomplete (not yet classified);
    /// once every group is set, `true` iff no variant resolves or the
    /// resolved variant has zero stock.
    #[must_use]
    pub fn is_sold_out(&self) -> bool {
        if self.selection.iter().any(|(_, selected)| selected.is_none()) {
            return false;
        }
        self.resolved_variant()
            .is_none_or(|variant| variant.stock == 0)
    }

    /// Recomputes the full derived state for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let option_states = self
            .product
            .option_groups
            .iter()
            .flat_map(|group| {
                group.options.iter().map(|option| OptionStateRow {
                    group_id: group.id,
                    option_value_id: option.id,
                    state: self.option_state(group.id, option.id),
                })
            })
            .collect();

        Snapshot {
            variant_id: self.resolved_variant().map(|variant| variant.id),
            price: self.current_price(),
            image: self.current_image().map(ToOwned::to_owned),
            quantity: self.quantity,
            min_quantity: self.effective_min_quantity(),
            max_quantity: self.effective_max_quantity(),
            sold_out: self.is_sold_out(),
            option_states,
        }
    }

    /// Re-clamps quantity after the resolved variant may have changed:
    /// keep the previous quantity within the new bounds when a variant is
    /// resolved, otherwise fall back to the minimum.
    fn reclamp_quantity(&mut self) {
        let stock = self.resolved_variant().map(|variant| variant.stock);
        let min = self.product.min_quantity_per_order;
        self.quantity = match stock {
            Some(stock) => min.max(
                self.quantity
                    .min(stock)
                    .min(self.product.max_quantity_per_order),
            ),
            None => min,
        };
    }
}

/// One derived-state snapshot, consumed by the presentation layer after
/// every mutating call.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub variant_id: Option<i64>,
    pub price: Option<Decimal>,
    pub image: Option<String>,
    pub quantity: u32,
    pub min_quantity: u32,
    pub max_quantity: u32,
    pub sold_out: bool,
    pub option_states: Vec<OptionStateRow>,
}

/// The render state of one option button.
#[derive(Debug, Clone, Serialize)]
pub struct OptionStateRow {
    pub group_id: i64,
    pub option_value_id: i64,
    pub state: OptionState,
}
