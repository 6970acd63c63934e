use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::configurator::selection::SelectionState;
use crate::domain::package::{AddonDefinition, AddonRef, Package, RecommendationRule};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedAddon {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Decimal,
    pub reason: String,
    pub match_score: u8,
}

impl RecommendedAddon {
    fn materialize(addon: AddonDefinition, rule: &RecommendationRule) -> Self {
        Self {
            id: addon.id,
            name: addon.name,
            description: addon.description,
            price: addon.price,
            reason: rule.reason.clone(),
            match_score: rule.match_score,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendations {
    /// Ranked by match score, highest first; ties keep rule declaration order.
    pub items: Vec<RecommendedAddon>,
    /// Ids absent from the previous round, in rank order.
    pub fresh: Vec<String>,
}

impl Recommendations {
    /// Recommendation that deserves the transient "new" highlight, if any.
    pub fn highlight(&self) -> Option<&str> {
        self.fresh.first().map(String::as_str)
    }

    pub fn contains(&self, addon_id: &str) -> bool {
        self.items.iter().any(|item| item.id == addon_id)
    }

    pub fn find(&self, addon_id: &str) -> Option<&RecommendedAddon> {
        self.items.iter().find(|item| item.id == addon_id)
    }
}

pub trait RecommendationEngine: Send + Sync {
    fn recommend(
        &self,
        package: &Package,
        state: &SelectionState,
        previous: &[RecommendedAddon],
    ) -> Recommendations;
}

#[derive(Default)]
pub struct RuleRecommendationEngine;

impl RecommendationEngine for RuleRecommendationEngine {
    fn recommend(
        &self,
        package: &Package,
        state: &SelectionState,
        previous: &[RecommendedAddon],
    ) -> Recommendations {
        compute_recommendations(package, state, previous)
    }
}

pub fn is_triggered(rule: &RecommendationRule, state: &SelectionState) -> bool {
    state
        .selected_option(&rule.trigger.group)
        .is_some_and(|choice| choice.id == rule.trigger.choice)
}

fn resolve_target(package: &Package, target: &AddonRef) -> Option<AddonDefinition> {
    match target {
        AddonRef::Catalog(addon_id) => package.find_catalog_addon(addon_id).map(AddonDefinition::from),
        AddonRef::Inline(definition) => Some(definition.clone()),
    }
}

pub fn compute_recommendations(
    package: &Package,
    state: &SelectionState,
    previous: &[RecommendedAddon],
) -> Recommendations {
    let mut items: Vec<RecommendedAddon> = package
        .rules
        .iter()
        .filter(|rule| is_triggered(rule, state))
        .filter(|rule| !state.is_addon_selected(rule.recommend.addon_id()))
        .filter_map(|rule| {
            resolve_target(package, &rule.recommend)
                .map(|addon| RecommendedAddon::materialize(addon, rule))
        })
        .collect();

    // Stable: equal scores keep declaration order.
    items.sort_by(|left, right| right.match_score.cmp(&left.match_score));

    let mut seen = Vec::with_capacity(items.len());
    items.retain(|item| {
        if seen.contains(&item.id) {
            return false;
        }
        seen.push(item.id.clone());
        true
    });

    let fresh = items
        .iter()
        .filter(|item| !previous.iter().any(|known| known.id == item.id))
        .map(|item| item.id.clone())
        .collect();

    Recommendations { items, fresh }
}
