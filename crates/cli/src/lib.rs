pub mod commands;

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{anyhow, Context, Result};
use clap::{Parser, Subcommand};
use homeserv_core::config::{AppConfig, ConfigOverrides, LoadOptions, LogFormat, LoggingConfig};
use tracing::Level;

use crate::commands::{
    cart::CartCommand, checkout::CheckoutArgs, quote::SelectionArgs, CommandResult,
};

#[derive(Debug, Parser)]
#[command(
    name = "homeserv",
    about = "Home services storefront CLI",
    long_about = "Browse the service catalog, price package configurations, manage the cart and place simulated bookings.",
    after_help = "Examples:\n  homeserv catalog\n  homeserv quote salon-women --package facial --option Type=diamond --accept massage\n  homeserv cart add salon-women --package haircut --option Length=long --quantity 2\n  homeserv checkout --name Asha --email asha@example.com --phone 9876543210 --address \"12 Marine Drive\" --date 2026-11-02 --time \"10:00 AM\""
)]
pub struct Cli {
    #[arg(long, global = true, value_name = "PATH", help = "Config file (defaults to homeserv.toml)")]
    config: Option<PathBuf>,
    #[arg(long, global = true, value_name = "PATH", help = "Cart snapshot file")]
    cart: Option<PathBuf>,
    #[arg(long, global = true, value_name = "PATH", help = "Catalog TOML file")]
    catalog: Option<PathBuf>,
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "List services, packages and option groups")]
    Catalog {
        #[arg(long, help = "Only show this service")]
        service: Option<String>,
    },
    #[command(about = "Price a package configuration and show recommendations")]
    Quote(SelectionArgs),
    #[command(about = "Inspect or change the cart", subcommand)]
    Cart(CartCommand),
    #[command(about = "Book the cart for a date and time slot")]
    Checkout(CheckoutArgs),
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
}

impl Cli {
    fn load_options(&self) -> LoadOptions {
        LoadOptions {
            config_path: self.config.clone(),
            require_file: self.config.is_some(),
            overrides: ConfigOverrides {
                log_level: self.log_level.clone(),
                cart_snapshot_path: self.cart.clone(),
                catalog_path: self.catalog.clone(),
            },
        }
    }
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    if let Err(error) = bootstrap_logging(&cli.load_options()) {
        eprintln!("homeserv: {error:#}");
    }

    let result = execute(cli);
    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

/// Runs a parsed command line and returns its JSON payload.
pub fn execute(cli: Cli) -> CommandResult {
    let options = cli.load_options();

    match &cli.command {
        Command::Config => commands::config::run(&options),
        Command::Catalog { service } => with_config("catalog", options, |config| {
            commands::catalog::run(config, service.as_deref())
        }),
        Command::Quote(args) => {
            with_config("quote", options, |config| commands::quote::run(config, args))
        }
        Command::Cart(command) => {
            with_config("cart", options, |config| commands::cart::run(config, command))
        }
        Command::Checkout(args) => {
            with_config("checkout", options, |config| commands::checkout::run(config, args))
        }
    }
}

fn with_config(
    command: &str,
    options: LoadOptions,
    run: impl FnOnce(&AppConfig) -> CommandResult,
) -> CommandResult {
    match AppConfig::load(options) {
        Ok(config) => run(&config),
        Err(error) => CommandResult::from_error(command, error.into()),
    }
}

fn bootstrap_logging(options: &LoadOptions) -> Result<()> {
    let config = AppConfig::load(options.clone()).context("failed to load logging configuration")?;
    init_logging(&config.logging)
}

fn init_logging(logging: &LoggingConfig) -> Result<()> {
    let log_level = logging.level.parse::<Level>().unwrap_or(Level::INFO);
    let builder = tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(log_level)
        .with_writer(io::stderr);

    let installed = match logging.format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
    installed.map_err(|error| anyhow!("failed to install tracing subscriber: {error}"))
}
