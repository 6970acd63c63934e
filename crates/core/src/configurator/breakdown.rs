use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::configurator::selection::SelectionState;
use crate::domain::package::{AddonDefinition, Package};

pub const QUANTITY_ITEM_ID: &str = "quantity-multiplier";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakdownKind {
    Base,
    Option,
    Addon,
    Discount,
    Quantity,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBreakdownItem {
    pub id: String,
    pub label: String,
    pub price: Decimal,
    pub kind: BreakdownKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakdown {
    /// Price of one configured unit.
    pub unit_total: Decimal,
    pub quantity: u32,
    pub total: Decimal,
    pub items: Vec<PriceBreakdownItem>,
}

impl Breakdown {
    pub fn item(&self, id: &str) -> Option<&PriceBreakdownItem> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn items_total(&self) -> Decimal {
        self.items.iter().map(|item| item.price).sum()
    }
}

pub trait PricingEngine: Send + Sync {
    fn breakdown(&self, package: &Package, state: &SelectionState) -> Breakdown;
}

#[derive(Default)]
pub struct DeterministicPricingEngine;

impl PricingEngine for DeterministicPricingEngine {
    fn breakdown(&self, package: &Package, state: &SelectionState) -> Breakdown {
        compute_breakdown(package, state)
    }
}

/// Selected add-ons in breakdown order: catalog add-ons as declared, then inline rule add-ons.
pub fn selected_addons_in_order(
    package: &Package,
    state: &SelectionState,
) -> Vec<(AddonDefinition, u32)> {
    let catalog = package.catalog_addons().iter().map(AddonDefinition::from);
    let inline = package.inline_addons().into_iter().cloned();

    catalog
        .chain(inline)
        .filter_map(|addon| state.addon_quantity(&addon.id).map(|quantity| (addon, quantity)))
        .collect()
}

pub fn addon_label(name: &str, quantity: u32) -> String {
    if quantity > 1 {
        format!("{name} (×{quantity})")
    } else {
        name.to_owned()
    }
}

/// Rebuilds the itemized breakdown from scratch. The quantity line carries only the marginal
/// cost of the extra units so that the item prices always sum to `total`.
pub fn compute_breakdown(package: &Package, state: &SelectionState) -> Breakdown {
    let mut items = vec![PriceBreakdownItem {
        id: format!("base-{}", package.id),
        label: package.name.clone(),
        price: package.base_price,
        kind: BreakdownKind::Base,
        quantity: None,
    }];

    for group in package.single_select_groups() {
        let Some(choice) = state.selected_option(&group.name) else {
            continue;
        };
        if choice.price.is_zero() {
            continue;
        }

        let kind =
            if choice.price < Decimal::ZERO { BreakdownKind::Discount } else { BreakdownKind::Option };
        items.push(PriceBreakdownItem {
            id: format!("option-{}", choice.id),
            label: format!("{}: {}", group.name, choice.name),
            price: choice.price,
            kind,
            quantity: None,
        });
    }

    for (addon, quantity) in selected_addons_in_order(package, state) {
        items.push(PriceBreakdownItem {
            id: format!("addon-{}", addon.id),
            label: format!("Add-on: {}", addon_label(&addon.name, quantity)),
            price: addon.price * Decimal::from(quantity),
            kind: BreakdownKind::Addon,
            quantity: Some(quantity),
        });
    }

    let unit_total: Decimal = items.iter().map(|item| item.price).sum();
    let quantity = state.quantity();

    if quantity > 1 {
        items.push(PriceBreakdownItem {
            id: QUANTITY_ITEM_ID.to_owned(),
            label: format!("Quantity (×{quantity})"),
            price: unit_total * Decimal::from(quantity - 1),
            kind: BreakdownKind::Quantity,
            quantity: Some(quantity),
        });
    }

    Breakdown { unit_total, quantity, total: unit_total * Decimal::from(quantity), items }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use crate::configurator::catalog::Catalog;
    use crate::configurator::selection::{reduce, QuantityLimits, SelectionAction, SelectionState};
    use crate::domain::package::{Package, PackageId};
    use crate::domain::service::ServiceId;

    use super::{compute_breakdown, BreakdownKind, QUANTITY_ITEM_ID};

    fn package(id: &str) -> Package {
        Catalog::seeded()
            .find_package(&ServiceId("salon-women".to_owned()), &PackageId(id.to_owned()))
            .cloned()
            .expect("seeded package")
    }

    fn apply_all(package: &Package, actions: &[SelectionAction]) -> SelectionState {
        actions.iter().fold(SelectionState::initial(package), |state, action| {
            reduce(package, &state, action, &QuantityLimits::default())
        })
    }

    fn select(group: &str, choice_id: &str) -> SelectionAction {
        SelectionAction::SelectOption { group: group.to_owned(), choice_id: choice_id.to_owned() }
    }

    fn toggle(addon_id: &str) -> SelectionAction {
        SelectionAction::ToggleAddon { addon_id: addon_id.to_owned() }
    }

    #[test]
    fn diamond_facial_with_massage_totals_2298() {
        let facial = package("facial");
        let state = apply_all(&facial, &[select("Type", "diamond"), toggle("massage")]);

        let breakdown = compute_breakdown(&facial, &state);

        assert_eq!(breakdown.total, Decimal::from(2298));
        let ids: Vec<_> = breakdown.items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["base-facial", "option-diamond", "addon-massage"]);
        assert_eq!(breakdown.items[1].label, "Type: Diamond Facial");
        assert_eq!(breakdown.items[2].label, "Add-on: Face Massage (10 mins)");
    }

    #[test]
    fn quantity_line_carries_only_the_marginal_cost() {
        let facial = package("facial");
        let state = apply_all(
            &facial,
            &[
                select("Type", "diamond"),
                toggle("massage"),
                SelectionAction::AdjustQuantity { delta: 1 },
            ],
        );

        let breakdown = compute_breakdown(&facial, &state);
        let quantity_line = breakdown.item(QUANTITY_ITEM_ID).expect("quantity line");

        assert_eq!(quantity_line.price, Decimal::from(2298));
        assert_eq!(quantity_line.kind, BreakdownKind::Quantity);
        assert_eq!(quantity_line.label, "Quantity (×2)");
        assert_eq!(breakdown.unit_total, Decimal::from(2298));
        assert_eq!(breakdown.total, Decimal::from(4596));
        assert_eq!(breakdown.items_total(), breakdown.total);
    }

    #[test]
    fn zero_delta_choices_are_omitted_and_negative_ones_are_discounts() {
        let waxing = package("waxing");
        let initial = compute_breakdown(&waxing, &SelectionState::initial(&waxing));
        assert_eq!(initial.items.len(), 1);
        assert_eq!(initial.total, Decimal::from(599));

        let state = apply_all(&waxing, &[select("Area", "half-arms"), select("Type", "rica")]);
        let breakdown = compute_breakdown(&waxing, &state);

        let ids: Vec<_> = breakdown.items.iter().map(|item| item.id.as_str()).collect();
        assert_eq!(ids, vec!["base-waxing", "option-rica", "option-half-arms"]);
        let discount = breakdown.item("option-half-arms").expect("discount line");
        assert_eq!(discount.kind, BreakdownKind::Discount);
        assert_eq!(discount.price, Decimal::from(-100));
        assert_eq!(breakdown.total, Decimal::from(699));
    }

    #[test]
    fn addons_follow_catalog_order_not_selection_order() {
        let facial = package("facial");
        let state = apply_all(&facial, &[toggle("eye-treatment"), toggle("mask"), toggle("massage")]);

        let breakdown = compute_breakdown(&facial, &state);
        let ids: Vec<_> = breakdown.items.iter().map(|item| item.id.as_str()).collect();

        assert_eq!(ids, vec!["base-facial", "addon-massage", "addon-mask", "addon-eye-treatment"]);
        assert_eq!(breakdown.total, Decimal::from(999 + 299 + 399 + 349));
    }

    #[test]
    fn addon_quantity_multiplies_and_annotates_the_line() {
        let facial = package("facial");
        let state = apply_all(
            &facial,
            &[
                toggle("mask"),
                SelectionAction::AdjustAddonQuantity { addon_id: "mask".to_owned(), delta: 2 },
            ],
        );

        let breakdown = compute_breakdown(&facial, &state);
        let mask = breakdown.item("addon-mask").expect("mask line");

        assert_eq!(mask.price, Decimal::from(399 * 3));
        assert_eq!(mask.quantity, Some(3));
        assert_eq!(mask.label, "Add-on: Premium Face Mask (×3)");
    }

    #[test]
    fn items_always_sum_to_total() {
        let catalog = Catalog::seeded();
        for service in catalog.services() {
            for package in &service.packages {
                let mut actions = Vec::new();
                for group in package.single_select_groups() {
                    if let Some(last) = group.choices.last() {
                        actions.push(select(&group.name, &last.id));
                    }
                }
                for addon in package.catalog_addons() {
                    actions.push(toggle(&addon.id));
                    actions.push(SelectionAction::AdjustAddonQuantity {
                        addon_id: addon.id.clone(),
                        delta: 1,
                    });
                }
                for inline in package.inline_addons() {
                    actions.push(toggle(&inline.id));
                }

                for quantity_delta in 0..12 {
                    let mut with_quantity = actions.clone();
                    with_quantity.push(SelectionAction::AdjustQuantity { delta: quantity_delta });
                    let state = apply_all(package, &with_quantity);
                    let breakdown = compute_breakdown(package, &state);

                    assert_eq!(
                        breakdown.items_total(),
                        breakdown.total,
                        "package {} at quantity {}",
                        package.id,
                        state.quantity()
                    );
                }
            }
        }
    }
}
