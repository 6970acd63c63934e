use homeserv_core::config::AppConfig;
use homeserv_core::{ApplicationError, Catalog, Package, Service, ServiceId};

use crate::commands::{money, CommandResult};

pub fn run(config: &AppConfig, service_id: Option<&str>) -> CommandResult {
    let catalog = match load(config) {
        Ok(catalog) => catalog,
        Err(error) => return CommandResult::from_error("catalog", error),
    };

    let services: Vec<&Service> = match service_id {
        Some(id) => match catalog.require_service(&ServiceId(id.to_string())) {
            Ok(service) => vec![service],
            Err(error) => return CommandResult::from_error("catalog", error.into()),
        },
        None => catalog.services().iter().collect(),
    };

    let mut lines = Vec::new();
    for service in services {
        lines.push(format!(
            "{} ({}) rated {:.1} from {} reviews",
            service.name, service.id, service.rating, service.rating_count
        ));
        for package in &service.packages {
            render_package(&mut lines, package);
        }
    }

    CommandResult::success("catalog", lines.join("\n"))
}

/// Catalog file from config, or the built-in salon catalog.
pub fn load(config: &AppConfig) -> Result<Catalog, ApplicationError> {
    Catalog::load_or_seeded(config.catalog.path.as_deref())
}

fn render_package(lines: &mut Vec<String>, package: &Package) {
    lines.push(format!("  - {} [{}] from {}", package.name, package.id, money(package.base_price)));

    for group in &package.options {
        let marker = if group.required { " (required)" } else { "" };
        let choices = group
            .choices
            .iter()
            .map(|choice| {
                if choice.price.is_zero() {
                    format!("{}={}", choice.id, choice.name)
                } else if choice.price.is_sign_negative() {
                    format!("{}={} ({})", choice.id, choice.name, money(choice.price))
                } else {
                    format!("{}={} (+{})", choice.id, choice.name, money(choice.price))
                }
            })
            .collect::<Vec<_>>()
            .join(", ");
        lines.push(format!("      {}{marker}: {choices}", group.name));
    }
}
