use clap::Args;
use homeserv_core::config::AppConfig;
use homeserv_core::{
    ApplicationError, Configurator, ConfiguratorSettings, DomainError, PackageId, SelectionAction,
    ServiceId,
};
use tracing::debug;

use crate::commands::{catalog, money, CommandResult};

/// Selection flags shared by `quote` and `cart add`. Applied in flag order:
/// options, accepted recommendations, add-ons, add-on quantities, overall quantity.
#[derive(Debug, Clone, Args)]
pub struct SelectionArgs {
    #[arg(help = "Service id, e.g. salon-women")]
    pub service: String,
    #[arg(long, help = "Package id (defaults to the first package of the service)")]
    pub package: Option<String>,
    #[arg(
        long = "option",
        value_name = "GROUP=CHOICE",
        value_parser = parse_option,
        help = "Pick a choice in a single-select option group"
    )]
    pub options: Vec<(String, String)>,
    #[arg(long = "accept", value_name = "ADDON", help = "Accept a current recommendation")]
    pub accept: Vec<String>,
    #[arg(long = "addon", value_name = "ADDON", help = "Select an add-on")]
    pub addons: Vec<String>,
    #[arg(
        long = "addon-quantity",
        value_name = "ADDON=N",
        value_parser = parse_addon_quantity,
        help = "Set an add-on quantity, selecting it first if needed"
    )]
    pub addon_quantities: Vec<(String, u32)>,
    #[arg(long, default_value_t = 1, help = "Number of units to book")]
    pub quantity: u32,
}

pub fn run(config: &AppConfig, args: &SelectionArgs) -> CommandResult {
    let configurator = match configure(config, args) {
        Ok(configurator) => configurator,
        Err(error) => return CommandResult::from_error("quote", error),
    };

    CommandResult::success("quote", render(&configurator, &config.checkout.currency))
}

/// Builds a configurator and replays `args` on it with the strict (erroring) operations.
pub fn configure(config: &AppConfig, args: &SelectionArgs) -> Result<Configurator, ApplicationError> {
    let catalog = catalog::load(config)?;
    let service = catalog.require_service(&ServiceId(args.service.clone()))?.clone();
    let mut configurator =
        Configurator::new(service, ConfiguratorSettings::from(&config.configurator))?;

    if let Some(package_id) = &args.package {
        configurator.select_package(&PackageId(package_id.clone()))?;
    }

    for (group, choice_id) in &args.options {
        configurator.try_select_option(group, choice_id)?;
    }

    for addon_id in &args.accept {
        if !configurator.accept_recommendation(addon_id) {
            return Err(DomainError::UnknownAddon(format!("{addon_id} (not currently recommended)"))
                .into());
        }
    }

    for addon_id in &args.addons {
        ensure_addon_selected(&mut configurator, addon_id)?;
    }

    for (addon_id, quantity) in &args.addon_quantities {
        ensure_addon_selected(&mut configurator, addon_id)?;
        let current = configurator.state().addon_quantity(addon_id).unwrap_or(1);
        configurator.try_set_addon_quantity(addon_id, delta(*quantity, current))?;
    }

    let current = configurator.state().quantity();
    configurator.try_set_overall_quantity(delta(args.quantity, current))?;

    debug!(
        event_name = "cli.quote.configured",
        service_id = %configurator.service().id,
        package_id = %configurator.package().id,
        total = %configurator.total(),
        "selection replayed"
    );

    Ok(configurator)
}

fn ensure_addon_selected(
    configurator: &mut Configurator,
    addon_id: &str,
) -> Result<(), ApplicationError> {
    if configurator.state().is_addon_selected(addon_id) {
        return Ok(());
    }
    configurator.try_dispatch(SelectionAction::ToggleAddon { addon_id: addon_id.to_string() })?;
    Ok(())
}

fn delta(target: u32, current: u32) -> i32 {
    let delta = i64::from(target) - i64::from(current);
    i32::try_from(delta).unwrap_or(if delta < 0 { i32::MIN } else { i32::MAX })
}

fn render(configurator: &Configurator, currency: &str) -> String {
    let breakdown = configurator.breakdown();
    let mut lines = vec![format!(
        "{} x{}",
        configurator.service().line_name(configurator.package()),
        breakdown.quantity
    )];

    for item in &breakdown.items {
        lines.push(format!("- {}: {}", item.label, money(item.price)));
    }
    lines.push(format!("total: {} {currency}", money(breakdown.total)));

    let recommendations = &configurator.recommendations().items;
    if !recommendations.is_empty() {
        lines.push("recommended:".to_string());
        for addon in recommendations {
            lines.push(format!(
                "  * {} [{}] +{} (match {}): {}",
                addon.name,
                addon.id,
                money(addon.price),
                addon.match_score,
                addon.reason
            ));
        }
    }

    lines.join("\n")
}

fn parse_option(raw: &str) -> Result<(String, String), String> {
    let (group, choice) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected GROUP=CHOICE, got `{raw}`"))?;
    if group.trim().is_empty() || choice.trim().is_empty() {
        return Err(format!("expected GROUP=CHOICE, got `{raw}`"));
    }
    Ok((group.trim().to_string(), choice.trim().to_string()))
}

fn parse_addon_quantity(raw: &str) -> Result<(String, u32), String> {
    let (addon_id, quantity) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected ADDON=N, got `{raw}`"))?;
    let quantity = quantity
        .trim()
        .parse::<u32>()
        .map_err(|_| format!("add-on quantity must be a whole number, got `{quantity}`"))?;
    Ok((addon_id.trim().to_string(), quantity))
}
