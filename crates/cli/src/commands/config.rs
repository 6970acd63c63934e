use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use homeserv_core::config::{resolve_config_path, AppConfig, LoadOptions};
use toml::Value;

use crate::commands::{money, CommandResult};

struct SourceContext {
    file_doc: Option<Value>,
    file_path: Option<PathBuf>,
}

pub fn run(options: &LoadOptions) -> CommandResult {
    let config = match AppConfig::load(options.clone()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "config",
                "config_validation",
                format!("config validation failed: {error}"),
                2,
            );
        }
    };

    let file_path = resolve_config_path(options.config_path.as_deref());
    let context =
        SourceContext { file_doc: load_config_file_doc(file_path.as_deref()), file_path };
    let overrides = &options.overrides;

    let mut lines = vec![
        "effective config (source precedence: override > env > file > default):".to_string()
    ];

    lines.push(context.render(
        "logging.level",
        &config.logging.level,
        &["HOMESERV_LOGGING_LEVEL", "HOMESERV_LOG_LEVEL"],
        overrides.log_level.is_some().then_some("--log-level"),
    ));
    lines.push(context.render(
        "logging.format",
        &format!("{:?}", config.logging.format),
        &["HOMESERV_LOGGING_FORMAT", "HOMESERV_LOG_FORMAT"],
        None,
    ));

    lines.push(context.render(
        "configurator.max_addon_quantity",
        &config.configurator.max_addon_quantity.to_string(),
        &["HOMESERV_CONFIGURATOR_MAX_ADDON_QUANTITY"],
        None,
    ));
    lines.push(context.render(
        "configurator.max_order_quantity",
        &config.configurator.max_order_quantity.to_string(),
        &["HOMESERV_CONFIGURATOR_MAX_ORDER_QUANTITY"],
        None,
    ));
    lines.push(context.render(
        "configurator.highlight_secs",
        &config.configurator.highlight_secs.to_string(),
        &["HOMESERV_CONFIGURATOR_HIGHLIGHT_SECS"],
        None,
    ));
    lines.push(context.render(
        "configurator.recommendation_highlight_secs",
        &config.configurator.recommendation_highlight_secs.to_string(),
        &["HOMESERV_CONFIGURATOR_RECOMMENDATION_HIGHLIGHT_SECS"],
        None,
    ));

    lines.push(context.render(
        "cart.snapshot_path",
        &config.cart.snapshot_path.display().to_string(),
        &["HOMESERV_CART_SNAPSHOT_PATH"],
        overrides.cart_snapshot_path.is_some().then_some("--cart"),
    ));

    lines.push(context.render(
        "checkout.currency",
        &config.checkout.currency,
        &["HOMESERV_CHECKOUT_CURRENCY"],
        None,
    ));
    lines.push(context.render(
        "checkout.tax_rate_pct",
        &money(config.checkout.tax_rate_pct),
        &["HOMESERV_CHECKOUT_TAX_RATE_PCT"],
        None,
    ));
    lines.push(context.render(
        "checkout.delivery_fee",
        &money(config.checkout.delivery_fee),
        &["HOMESERV_CHECKOUT_DELIVERY_FEE"],
        None,
    ));

    let catalog_path = config
        .catalog
        .path
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "<built-in salon catalog>".to_string());
    lines.push(context.render(
        "catalog.path",
        &catalog_path,
        &["HOMESERV_CATALOG_PATH"],
        overrides.catalog_path.is_some().then_some("--catalog"),
    ));

    CommandResult::success("config", lines.join("\n"))
}

impl SourceContext {
    fn render(
        &self,
        key_path: &str,
        value: &str,
        env_keys: &[&str],
        override_flag: Option<&str>,
    ) -> String {
        let source = self.field_source(key_path, env_keys, override_flag);
        format!("- {key_path} = {value} (source: {source})")
    }

    fn field_source(&self, key_path: &str, env_keys: &[&str], override_flag: Option<&str>) -> String {
        if let Some(flag) = override_flag {
            return format!("override ({flag})");
        }

        if let Some(env_key) = env_keys.iter().find(|key| is_set(key)) {
            return format!("env ({env_key})");
        }

        if let Some(doc) = &self.file_doc {
            if contains_path(doc, key_path) {
                let file_path = self
                    .file_path
                    .as_ref()
                    .map(|path| path.display().to_string())
                    .unwrap_or_else(|| "config file".to_string());
                return format!("file ({file_path})");
            }
        }

        "default".to_string()
    }
}

fn is_set(key: &str) -> bool {
    env::var(key).map(|value| !value.trim().is_empty()).unwrap_or(false)
}

fn load_config_file_doc(path: Option<&Path>) -> Option<Value> {
    let path = path?;
    let raw = fs::read_to_string(path).ok()?;
    raw.parse::<Value>().ok()
}

fn contains_path(root: &Value, key_path: &str) -> bool {
    let mut current = root;
    for key in key_path.split('.') {
        let Some(next) = current.get(key) else {
            return false;
        };
        current = next;
    }
    true
}
