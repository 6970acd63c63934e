use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::domain::package::{AddonRef, Package, PackageId};
use crate::domain::service::{Service, ServiceId};
use crate::errors::{ApplicationError, DomainError};
use crate::fixtures;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(default)]
    services: Vec<Service>,
}

impl Catalog {
    pub fn new(services: Vec<Service>) -> Self {
        Self { services }
    }

    /// Built-in catalog used when no catalog file is configured.
    pub fn seeded() -> Self {
        Self::new(fixtures::seed_services())
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ApplicationError> {
        let catalog: Catalog =
            toml::from_str(raw).map_err(|error| ApplicationError::Catalog(error.to_string()))?;
        catalog.validate().map_err(|error| ApplicationError::Catalog(error.to_string()))?;
        Ok(catalog)
    }

    pub fn load(path: &Path) -> Result<Self, ApplicationError> {
        let raw = fs::read_to_string(path).map_err(|error| {
            ApplicationError::Catalog(format!("could not read `{}`: {error}", path.display()))
        })?;
        let catalog = Self::from_toml_str(&raw)?;
        info!(
            event_name = "catalog.loaded",
            path = %path.display(),
            services = catalog.services.len(),
            "catalog file loaded"
        );
        Ok(catalog)
    }

    /// Loads `path` when set, otherwise falls back to the seeded catalog.
    pub fn load_or_seeded(path: Option<&Path>) -> Result<Self, ApplicationError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::seeded()),
        }
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn find_service(&self, service_id: &ServiceId) -> Option<&Service> {
        self.services.iter().find(|service| &service.id == service_id)
    }

    pub fn find_package(&self, service_id: &ServiceId, package_id: &PackageId) -> Option<&Package> {
        self.find_service(service_id).and_then(|service| service.find_package(package_id))
    }

    pub fn require_service(&self, service_id: &ServiceId) -> Result<&Service, DomainError> {
        self.find_service(service_id)
            .ok_or_else(|| DomainError::UnknownService(service_id.0.clone()))
    }

    /// Structural checks the configurator relies on.
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut service_ids = HashSet::new();
        for service in &self.services {
            if !service_ids.insert(&service.id) {
                return Err(invariant(format!("duplicate service id `{}`", service.id)));
            }

            let mut package_ids = HashSet::new();
            for package in &service.packages {
                if !package_ids.insert(&package.id) {
                    return Err(invariant(format!(
                        "duplicate package id `{}` in service `{}`",
                        package.id, service.id
                    )));
                }
                validate_package(package)?;
            }
        }
        Ok(())
    }
}

fn validate_package(package: &Package) -> Result<(), DomainError> {
    let mut group_names = HashSet::new();
    for group in &package.options {
        if !group_names.insert(group.name.as_str()) {
            return Err(invariant(format!(
                "package `{}` declares option group `{}` twice",
                package.id, group.name
            )));
        }
        if group.required && group.choices.is_empty() {
            return Err(invariant(format!(
                "required option group `{}` in package `{}` has no choices",
                group.name, package.id
            )));
        }
    }

    for rule in &package.rules {
        if rule.match_score > 100 {
            return Err(invariant(format!(
                "rule for `{}` in package `{}` has match score {} above 100",
                rule.recommend.addon_id(),
                package.id,
                rule.match_score
            )));
        }
        if let AddonRef::Catalog(addon_id) = &rule.recommend {
            if package.find_catalog_addon(addon_id).is_none() {
                return Err(invariant(format!(
                    "rule in package `{}` references unknown add-on `{addon_id}`",
                    package.id
                )));
            }
        }
    }

    Ok(())
}

fn invariant(message: String) -> DomainError {
    DomainError::InvariantViolation(message)
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::Catalog;
    use crate::domain::package::{AddonRef, PackageId};
    use crate::domain::service::ServiceId;
    use crate::errors::{ApplicationError, DomainError};

    const EXAMPLE_CATALOG: &str = include_str!("../../../../config/catalog.example.toml");

    #[test]
    fn seeded_catalog_is_valid() {
        let catalog = Catalog::seeded();

        assert!(catalog.validate().is_ok());
        let salon = catalog
            .find_service(&ServiceId("salon-women".to_owned()))
            .expect("salon service is seeded");
        let ids: Vec<_> = salon.packages.iter().map(|package| package.id.0.as_str()).collect();
        assert_eq!(ids, vec!["facial", "haircut", "waxing"]);
    }

    #[test]
    fn example_catalog_file_parses() {
        let catalog = Catalog::from_toml_str(EXAMPLE_CATALOG).expect("example catalog parses");

        let package = catalog
            .find_package(&ServiceId("plumbing".to_owned()), &PackageId("tap-repair".to_owned()))
            .expect("tap repair package");
        assert_eq!(package.base_price, Decimal::from(349));
        assert!(package.rules.iter().any(|rule| matches!(rule.recommend, AddonRef::Inline(_))));
        assert!(package.rules.iter().any(|rule| matches!(rule.recommend, AddonRef::Catalog(_))));
    }

    #[test]
    fn dangling_catalog_reference_is_rejected() {
        let raw = r#"
[[services]]
id = "cleaning"
name = "Home Cleaning"

[[services.packages]]
id = "deep-clean"
name = "Deep Clean"
base_price = 1499

[[services.packages.rules]]
recommend = "sofa"
reason = "Sofas collect dust"
match_score = 70
trigger = { group = "Rooms", choice = "3bhk" }
"#;

        let error = Catalog::from_toml_str(raw).expect_err("dangling add-on");
        assert!(matches!(
            error,
            ApplicationError::Catalog(ref message) if message.contains("unknown add-on `sofa`")
        ));
    }

    #[test]
    fn malformed_toml_is_a_catalog_error() {
        let error = Catalog::from_toml_str("[[services]]\nid = ").expect_err("bad toml");
        assert!(matches!(error, ApplicationError::Catalog(_)));
    }

    #[test]
    fn unknown_service_is_a_domain_error() {
        let catalog = Catalog::seeded();

        assert_eq!(
            catalog.require_service(&ServiceId("pest-control".to_owned())).err(),
            Some(DomainError::UnknownService("pest-control".to_owned()))
        );
    }
}
