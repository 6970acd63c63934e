use clap::Subcommand;
use homeserv_core::config::AppConfig;
use homeserv_core::{CartItemId, CartStore, CheckoutPolicy, CheckoutSummary, JsonFileCartStorage};

use crate::commands::quote::{self, SelectionArgs};
use crate::commands::{money, CommandResult};

#[derive(Debug, Clone, Subcommand)]
pub enum CartCommand {
    #[command(about = "List cart lines with the checkout summary")]
    Show,
    #[command(about = "Configure a package and add it to the cart")]
    Add(SelectionArgs),
    #[command(about = "Change the quantity of a cart line")]
    Update {
        id: String,
        #[arg(value_parser = clap::value_parser!(u32).range(1..))]
        quantity: u32,
    },
    #[command(about = "Remove a cart line")]
    Remove { id: String },
    #[command(about = "Remove every cart line")]
    Clear,
}

pub fn open(config: &AppConfig) -> CartStore<JsonFileCartStorage> {
    CartStore::open(JsonFileCartStorage::new(&config.cart.snapshot_path))
}

pub fn run(config: &AppConfig, command: &CartCommand) -> CommandResult {
    let mut cart = open(config);

    let outcome = match command {
        CartCommand::Show => Ok(render(&cart, config)),
        CartCommand::Add(args) => add(&mut cart, config, args),
        CartCommand::Update { id, quantity } => {
            let id = CartItemId(id.clone());
            if cart.find(&id).is_none() {
                return missing_line(&id);
            }
            cart.update_item(&id, *quantity)
                .map(|()| format!("updated {} to quantity {quantity}", id.0))
        }
        CartCommand::Remove { id } => {
            let id = CartItemId(id.clone());
            if cart.find(&id).is_none() {
                return missing_line(&id);
            }
            cart.remove_item(&id).map(|()| format!("removed {}", id.0))
        }
        CartCommand::Clear => cart.clear().map(|()| "cart cleared".to_string()),
    };

    match outcome {
        Ok(message) => CommandResult::success("cart", message),
        Err(error) => CommandResult::from_error("cart", error),
    }
}

fn add(
    cart: &mut CartStore<JsonFileCartStorage>,
    config: &AppConfig,
    args: &SelectionArgs,
) -> Result<String, homeserv_core::ApplicationError> {
    let configurator = quote::configure(config, args)?;
    let item = configurator.to_cart_item();
    let message = format!(
        "added {}: {} x{} = {} {}",
        item.id.0,
        item.name,
        item.quantity,
        money(item.line_total()),
        config.checkout.currency
    );
    cart.add_item(item)?;
    Ok(message)
}

fn missing_line(id: &CartItemId) -> CommandResult {
    CommandResult::failure("cart", "not_found", format!("no cart line with id `{}`", id.0), 1)
}

fn render(cart: &CartStore<JsonFileCartStorage>, config: &AppConfig) -> String {
    if cart.is_empty() {
        return "cart is empty".to_string();
    }

    let currency = &config.checkout.currency;
    let mut lines = Vec::new();
    for item in cart.items() {
        lines.push(format!(
            "- {} {} x{} @ {} = {}",
            item.id.0,
            item.name,
            item.quantity,
            money(item.price),
            money(item.line_total())
        ));
        for option in &item.options {
            match option.price {
                Some(price) => lines.push(format!("    {}: {} ({})", option.name, option.value, money(price))),
                None => lines.push(format!("    {}: {}", option.name, option.value)),
            }
        }
    }

    let summary = CheckoutSummary::from_cart(cart, &CheckoutPolicy::from(&config.checkout));
    lines.push(format!("items: {}", cart.total_items()));
    lines.push(format!("subtotal: {} {currency}", money(summary.subtotal)));
    lines.push(format!("taxes & fees: {} {currency}", money(summary.taxes)));
    lines.push(format!("delivery: {} {currency}", money(summary.delivery_charge)));
    lines.push(format!("total: {} {currency}", money(summary.total)));
    lines.join("\n")
}
