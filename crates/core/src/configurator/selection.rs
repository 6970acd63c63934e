use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::package::{Choice, Package};
use crate::errors::DomainError;

pub const MIN_QUANTITY: u32 = 1;
pub const DEFAULT_MAX_ADDON_QUANTITY: u32 = 5;
pub const DEFAULT_MAX_ORDER_QUANTITY: u32 = 10;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityLimits {
    pub max_addon: u32,
    pub max_order: u32,
}

impl Default for QuantityLimits {
    fn default() -> Self {
        Self { max_addon: DEFAULT_MAX_ADDON_QUANTITY, max_order: DEFAULT_MAX_ORDER_QUANTITY }
    }
}

/// User intents applied to a [`SelectionState`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SelectionAction {
    SelectOption { group: String, choice_id: String },
    ToggleAddon { addon_id: String },
    AdjustAddonQuantity { addon_id: String, delta: i32 },
    AdjustQuantity { delta: i32 },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionState {
    options: BTreeMap<String, Choice>,
    addons: BTreeMap<String, u32>,
    quantity: u32,
}

impl Default for SelectionState {
    fn default() -> Self {
        Self { options: BTreeMap::new(), addons: BTreeMap::new(), quantity: MIN_QUANTITY }
    }
}

impl SelectionState {
    /// Fresh state for `package`: every required group starts on its first choice.
    pub fn initial(package: &Package) -> Self {
        let options = package
            .required_groups()
            .filter_map(|group| {
                group.choices.first().map(|choice| (group.name.clone(), choice.clone()))
            })
            .collect();

        Self { options, ..Self::default() }
    }

    pub fn selected_option(&self, group: &str) -> Option<&Choice> {
        self.options.get(group)
    }

    pub fn selected_options(&self) -> impl Iterator<Item = (&str, &Choice)> {
        self.options.iter().map(|(group, choice)| (group.as_str(), choice))
    }

    pub fn is_addon_selected(&self, addon_id: &str) -> bool {
        self.addons.contains_key(addon_id)
    }

    pub fn addon_quantity(&self, addon_id: &str) -> Option<u32> {
        self.addons.get(addon_id).copied()
    }

    pub fn selected_addons(&self) -> impl Iterator<Item = &str> {
        self.addons.keys().map(String::as_str)
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Applies `action` to `state` and returns the next state. Out-of-range quantities are clamped
/// and choices or add-ons foreign to `package` leave the state untouched.
pub fn reduce(
    package: &Package,
    state: &SelectionState,
    action: &SelectionAction,
    limits: &QuantityLimits,
) -> SelectionState {
    let mut next = state.clone();

    match action {
        SelectionAction::SelectOption { group, choice_id } => {
            let choice = package
                .group(group)
                .filter(|group| !group.is_addons())
                .and_then(|group| group.find_choice(choice_id));
            if let Some(choice) = choice {
                next.options.insert(group.clone(), choice.clone());
            }
        }
        SelectionAction::ToggleAddon { addon_id } => {
            if next.addons.remove(addon_id).is_none() && package.resolve_addon(addon_id).is_some()
            {
                next.addons.insert(addon_id.clone(), MIN_QUANTITY);
            }
        }
        SelectionAction::AdjustAddonQuantity { addon_id, delta } => {
            if let Some(quantity) = next.addons.get_mut(addon_id) {
                *quantity = clamp_adjusted(*quantity, *delta, limits.max_addon);
            }
        }
        SelectionAction::AdjustQuantity { delta } => {
            next.quantity = clamp_adjusted(next.quantity, *delta, limits.max_order);
        }
    }

    next
}

/// Strict counterpart of [`reduce`]: reports what `reduce` would silently clamp or ignore.
pub fn check(
    package: &Package,
    state: &SelectionState,
    action: &SelectionAction,
    limits: &QuantityLimits,
) -> Result<(), DomainError> {
    match action {
        SelectionAction::SelectOption { group, choice_id } => {
            let known = package
                .group(group)
                .filter(|group| !group.is_addons())
                .and_then(|group| group.find_choice(choice_id))
                .is_some();
            if !known {
                return Err(DomainError::UnknownChoice {
                    group: group.clone(),
                    choice: choice_id.clone(),
                });
            }
        }
        SelectionAction::ToggleAddon { addon_id } => {
            if !state.is_addon_selected(addon_id) && package.resolve_addon(addon_id).is_none() {
                return Err(DomainError::UnknownAddon(addon_id.clone()));
            }
        }
        SelectionAction::AdjustAddonQuantity { addon_id, delta } => {
            let current = state
                .addon_quantity(addon_id)
                .ok_or_else(|| DomainError::UnknownAddon(addon_id.clone()))?;
            ensure_in_range("addon quantity", current, *delta, limits.max_addon)?;
        }
        SelectionAction::AdjustQuantity { delta } => {
            ensure_in_range("quantity", state.quantity, *delta, limits.max_order)?;
        }
    }

    Ok(())
}

fn clamp_adjusted(current: u32, delta: i32, max: u32) -> u32 {
    let max = max.max(MIN_QUANTITY);
    let adjusted = i64::from(current) + i64::from(delta);
    adjusted.clamp(i64::from(MIN_QUANTITY), i64::from(max)) as u32
}

fn ensure_in_range(field: &str, current: u32, delta: i32, max: u32) -> Result<(), DomainError> {
    let adjusted = i64::from(current) + i64::from(delta);
    let (min, max) = (i64::from(MIN_QUANTITY), i64::from(max.max(MIN_QUANTITY)));
    if adjusted < min || adjusted > max {
        return Err(DomainError::OutOfRange { field: field.to_owned(), value: adjusted, min, max });
    }
    Ok(())
}
