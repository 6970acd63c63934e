use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Option group whose choices toggle independently instead of replacing each other.
pub const ADDONS_GROUP: &str = "Add-ons";

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PackageId(pub String);

impl std::fmt::Display for PackageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    pub id: String,
    pub name: String,
    /// Signed delta against the package base price. Negative values render as discounts.
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OptionGroup {
    pub name: String,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl OptionGroup {
    pub fn is_addons(&self) -> bool {
        self.name == ADDONS_GROUP
    }

    pub fn find_choice(&self, choice_id: &str) -> Option<&Choice> {
        self.choices.iter().find(|choice| choice.id == choice_id)
    }
}

/// Fully specified add-on, either lifted from the catalog `Add-ons` group or declared inline by
/// a recommendation rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonDefinition {
    pub id: String,
    pub name: String,
    pub price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl From<&Choice> for AddonDefinition {
    fn from(choice: &Choice) -> Self {
        Self {
            id: choice.id.clone(),
            name: choice.name.clone(),
            price: choice.price,
            description: choice.description.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AddonRef {
    Catalog(String),
    Inline(AddonDefinition),
}

impl AddonRef {
    pub fn addon_id(&self) -> &str {
        match self {
            Self::Catalog(id) => id,
            Self::Inline(definition) => &definition.id,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTrigger {
    pub group: String,
    pub choice: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationRule {
    pub trigger: RuleTrigger,
    pub recommend: AddonRef,
    pub reason: String,
    /// Ranking weight in 0..=100.
    pub match_score: u8,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    pub id: PackageId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub options: Vec<OptionGroup>,
    #[serde(default)]
    pub rules: Vec<RecommendationRule>,
}

impl Package {
    pub fn group(&self, name: &str) -> Option<&OptionGroup> {
        self.options.iter().find(|group| group.name == name)
    }

    pub fn required_groups(&self) -> impl Iterator<Item = &OptionGroup> {
        self.options.iter().filter(|group| group.required && !group.is_addons())
    }

    pub fn single_select_groups(&self) -> impl Iterator<Item = &OptionGroup> {
        self.options.iter().filter(|group| !group.is_addons())
    }

    /// Add-ons declared in the catalog, in declaration order.
    pub fn catalog_addons(&self) -> &[Choice] {
        self.options
            .iter()
            .find(|group| group.is_addons())
            .map(|group| group.choices.as_slice())
            .unwrap_or(&[])
    }

    pub fn find_catalog_addon(&self, addon_id: &str) -> Option<&Choice> {
        self.catalog_addons().iter().find(|choice| choice.id == addon_id)
    }

    /// Add-ons that only exist as inline rule targets, deduplicated by id in rule order.
    pub fn inline_addons(&self) -> Vec<&AddonDefinition> {
        let mut inline: Vec<&AddonDefinition> = Vec::new();
        for rule in &self.rules {
            if let AddonRef::Inline(definition) = &rule.recommend {
                let shadowed = self.find_catalog_addon(&definition.id).is_some()
                    || inline.iter().any(|seen| seen.id == definition.id);
                if !shadowed {
                    inline.push(definition);
                }
            }
        }
        inline
    }

    /// Resolves an add-on id against the catalog first, then against inline rule targets.
    pub fn resolve_addon(&self, addon_id: &str) -> Option<AddonDefinition> {
        if let Some(choice) = self.find_catalog_addon(addon_id) {
            return Some(AddonDefinition::from(choice));
        }

        self.inline_addons().into_iter().find(|definition| definition.id == addon_id).cloned()
    }
}
