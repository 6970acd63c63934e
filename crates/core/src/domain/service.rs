use serde::{Deserialize, Serialize};

use crate::domain::package::{Package, PackageId};

#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ServiceId(pub String);

impl std::fmt::Display for ServiceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: ServiceId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub rating_count: u32,
    #[serde(default)]
    pub packages: Vec<Package>,
}

impl Service {
    pub fn find_package(&self, package_id: &PackageId) -> Option<&Package> {
        self.packages.iter().find(|package| &package.id == package_id)
    }

    /// Line item name used by the cart, e.g. `Salon for Women - Facial`.
    pub fn line_name(&self, package: &Package) -> String {
        format!("{} - {}", self.name, package.name)
    }
}
