pub mod breakdown;
pub mod catalog;
pub mod hints;
pub mod recommendations;
pub mod selection;

use std::time::Duration;

use rust_decimal::Decimal;
use tracing::{debug, info};

use crate::config::ConfiguratorConfig;
use crate::domain::cart::{CartItem, CartItemId, CartOption};
use crate::domain::package::{Package, PackageId};
use crate::domain::service::Service;
use crate::errors::DomainError;

use self::{
    breakdown::{
        addon_label, selected_addons_in_order, Breakdown, DeterministicPricingEngine,
        PricingEngine, QUANTITY_ITEM_ID,
    },
    hints::{HintLog, HintSink, PresentationHint},
    recommendations::{RecommendationEngine, Recommendations, RuleRecommendationEngine},
    selection::{check, reduce, QuantityLimits, SelectionAction, SelectionState},
};

const DEFAULT_HIGHLIGHT_TTL: Duration = Duration::from_secs(3);
const DEFAULT_RECOMMENDATION_TTL: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConfiguratorSettings {
    pub limits: QuantityLimits,
    pub highlight_ttl: Duration,
    pub recommendation_ttl: Duration,
}

impl Default for ConfiguratorSettings {
    fn default() -> Self {
        Self {
            limits: QuantityLimits::default(),
            highlight_ttl: DEFAULT_HIGHLIGHT_TTL,
            recommendation_ttl: DEFAULT_RECOMMENDATION_TTL,
        }
    }
}

impl From<&ConfiguratorConfig> for ConfiguratorSettings {
    fn from(config: &ConfiguratorConfig) -> Self {
        Self {
            limits: QuantityLimits {
                max_addon: config.max_addon_quantity,
                max_order: config.max_order_quantity,
            },
            highlight_ttl: Duration::from_secs(config.highlight_secs),
            recommendation_ttl: Duration::from_secs(config.recommendation_highlight_secs),
        }
    }
}

/// Owns the selection for one service page and keeps the derived views in sync with it.
pub struct Configurator<P = DeterministicPricingEngine, R = RuleRecommendationEngine, H = HintLog> {
    service: Service,
    package: Package,
    state: SelectionState,
    breakdown: Breakdown,
    recommendations: Recommendations,
    settings: ConfiguratorSettings,
    pricing_engine: P,
    recommendation_engine: R,
    hints: H,
}

impl Configurator {
    pub fn new(service: Service, settings: ConfiguratorSettings) -> Result<Self, DomainError> {
        Self::with_engines(
            service,
            settings,
            DeterministicPricingEngine,
            RuleRecommendationEngine,
            HintLog::default(),
        )
    }
}

impl<P, R, H> Configurator<P, R, H>
where
    P: PricingEngine,
    R: RecommendationEngine,
    H: HintSink,
{
    /// Starts on the first package of `service`, like the service page does on load.
    pub fn with_engines(
        service: Service,
        settings: ConfiguratorSettings,
        pricing_engine: P,
        recommendation_engine: R,
        hints: H,
    ) -> Result<Self, DomainError> {
        let package = service.packages.first().cloned().ok_or_else(|| {
            DomainError::InvariantViolation(format!("service `{}` has no packages", service.id))
        })?;
        let state = SelectionState::initial(&package);
        let breakdown = pricing_engine.breakdown(&package, &state);
        let recommendations = recommendation_engine.recommend(&package, &state, &[]);

        Ok(Self {
            service,
            package,
            state,
            breakdown,
            recommendations,
            settings,
            pricing_engine,
            recommendation_engine,
            hints,
        })
    }

    pub fn service(&self) -> &Service {
        &self.service
    }

    pub fn package(&self) -> &Package {
        &self.package
    }

    pub fn state(&self) -> &SelectionState {
        &self.state
    }

    pub fn breakdown(&self) -> &Breakdown {
        &self.breakdown
    }

    pub fn total(&self) -> Decimal {
        self.breakdown.total
    }

    pub fn recommendations(&self) -> &Recommendations {
        &self.recommendations
    }

    pub fn hints(&self) -> &H {
        &self.hints
    }

    pub fn hints_mut(&mut self) -> &mut H {
        &mut self.hints
    }

    /// Switches package and discards the whole selection. Nothing carries over.
    pub fn select_package(&mut self, package_id: &PackageId) -> Result<(), DomainError> {
        let package = self.service.find_package(package_id).cloned().ok_or_else(|| {
            DomainError::UnknownPackage {
                service: self.service.id.0.clone(),
                package: package_id.0.clone(),
            }
        })?;

        info!(
            event_name = "configurator.package_selected",
            service_id = %self.service.id,
            package_id = %package.id,
            "package selected, selection reset"
        );

        self.state = SelectionState::initial(&package);
        self.package = package;
        self.recommendations = Recommendations::default();
        self.hints.reset();
        self.recompute();
        Ok(())
    }

    pub fn select_option(&mut self, group: &str, choice_id: &str) -> bool {
        self.dispatch(SelectionAction::SelectOption {
            group: group.to_owned(),
            choice_id: choice_id.to_owned(),
        })
    }

    pub fn toggle_addon(&mut self, addon_id: &str) -> bool {
        self.dispatch(SelectionAction::ToggleAddon { addon_id: addon_id.to_owned() })
    }

    pub fn set_addon_quantity(&mut self, addon_id: &str, delta: i32) -> bool {
        self.dispatch(SelectionAction::AdjustAddonQuantity { addon_id: addon_id.to_owned(), delta })
    }

    pub fn set_overall_quantity(&mut self, delta: i32) -> bool {
        self.dispatch(SelectionAction::AdjustQuantity { delta })
    }

    /// Selects a currently recommended add-on, catalog or inline alike.
    pub fn accept_recommendation(&mut self, addon_id: &str) -> bool {
        if !self.recommendations.contains(addon_id) || self.state.is_addon_selected(addon_id) {
            return false;
        }
        self.toggle_addon(addon_id)
    }

    pub fn try_select_option(&mut self, group: &str, choice_id: &str) -> Result<(), DomainError> {
        self.try_dispatch(SelectionAction::SelectOption {
            group: group.to_owned(),
            choice_id: choice_id.to_owned(),
        })
    }

    pub fn try_set_addon_quantity(&mut self, addon_id: &str, delta: i32) -> Result<(), DomainError> {
        self.try_dispatch(SelectionAction::AdjustAddonQuantity {
            addon_id: addon_id.to_owned(),
            delta,
        })
    }

    pub fn try_set_overall_quantity(&mut self, delta: i32) -> Result<(), DomainError> {
        self.try_dispatch(SelectionAction::AdjustQuantity { delta })
    }

    /// Applies `action` with clamping semantics. Returns whether the selection changed.
    pub fn dispatch(&mut self, action: SelectionAction) -> bool {
        let next = reduce(&self.package, &self.state, &action, &self.settings.limits);
        if next == self.state {
            debug!(
                event_name = "configurator.action_ignored",
                package_id = %self.package.id,
                ?action,
                "selection unchanged"
            );
            return false;
        }

        self.state = next;
        self.recompute();
        self.highlight(&action);
        true
    }

    /// Applies `action` only when it is in range and refers to this package.
    pub fn try_dispatch(&mut self, action: SelectionAction) -> Result<(), DomainError> {
        check(&self.package, &self.state, &action, &self.settings.limits)?;
        self.dispatch(action);
        Ok(())
    }

    fn recompute(&mut self) {
        self.breakdown = self.pricing_engine.breakdown(&self.package, &self.state);
        let recommendations = self.recommendation_engine.recommend(
            &self.package,
            &self.state,
            &self.recommendations.items,
        );

        if let Some(addon_id) = recommendations.highlight() {
            self.hints.emit(
                PresentationHint::NewRecommendation { addon_id: addon_id.to_owned() },
                self.settings.recommendation_ttl,
            );
        }
        self.recommendations = recommendations;

        debug!(
            event_name = "configurator.recomputed",
            package_id = %self.package.id,
            total = %self.breakdown.total,
            items = self.breakdown.items.len(),
            recommendations = self.recommendations.items.len(),
            "derived views rebuilt"
        );
    }

    fn highlight(&mut self, action: &SelectionAction) {
        let (item_id, label) = match action {
            SelectionAction::SelectOption { group, choice_id } => {
                (format!("option-{choice_id}"), group.clone())
            }
            SelectionAction::ToggleAddon { addon_id }
            | SelectionAction::AdjustAddonQuantity { addon_id, .. } => {
                let name = self
                    .package
                    .resolve_addon(addon_id)
                    .map(|addon| addon.name)
                    .unwrap_or_else(|| addon_id.clone());
                (format!("addon-{addon_id}"), format!("Add-on: {name}"))
            }
            SelectionAction::AdjustQuantity { .. } => {
                (QUANTITY_ITEM_ID.to_owned(), "quantity".to_owned())
            }
        };

        self.hints
            .emit(PresentationHint::HighlightItem { item_id, label }, self.settings.highlight_ttl);
    }

    /// Finalized line item for the cart: unit price is the total divided by the quantity.
    pub fn to_cart_item(&self) -> CartItem {
        let mut options: Vec<CartOption> = self
            .package
            .single_select_groups()
            .filter_map(|group| {
                self.state.selected_option(&group.name).map(|choice| CartOption {
                    name: group.name.clone(),
                    value: choice.name.clone(),
                    price: Some(choice.price),
                })
            })
            .collect();

        options.extend(selected_addons_in_order(&self.package, &self.state).into_iter().map(
            |(addon, quantity)| CartOption {
                name: "Add-on".to_owned(),
                value: addon_label(&addon.name, quantity),
                price: Some(addon.price * Decimal::from(quantity)),
            },
        ));

        let quantity = self.breakdown.quantity;
        CartItem {
            id: CartItemId::generate(),
            service_id: self.service.id.clone(),
            name: self.service.line_name(&self.package),
            price: self.breakdown.total / Decimal::from(quantity),
            quantity,
            image: self.package.image.clone(),
            options,
        }
    }
}
