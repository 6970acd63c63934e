use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::checkout::{DEFAULT_CURRENCY, DEFAULT_DELIVERY_FEE, DEFAULT_TAX_RATE_PCT};
use crate::configurator::selection::{DEFAULT_MAX_ADDON_QUANTITY, DEFAULT_MAX_ORDER_QUANTITY};
use crate::errors::ApplicationError;

pub const CONFIG_FILE_CANDIDATES: [&str; 2] = ["homeserv.toml", "config/homeserv.toml"];

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub logging: LoggingConfig,
    pub configurator: ConfiguratorConfig,
    pub cart: CartConfig,
    pub checkout: CheckoutConfig,
    pub catalog: CatalogConfig,
}

#[derive(Clone, Debug)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Debug)]
pub struct ConfiguratorConfig {
    pub max_addon_quantity: u32,
    pub max_order_quantity: u32,
    pub highlight_secs: u64,
    pub recommendation_highlight_secs: u64,
}

#[derive(Clone, Debug)]
pub struct CartConfig {
    pub snapshot_path: PathBuf,
}

#[derive(Clone, Debug)]
pub struct CheckoutConfig {
    pub currency: String,
    pub tax_rate_pct: Decimal,
    pub delivery_fee: Decimal,
}

#[derive(Clone, Debug, Default)]
pub struct CatalogConfig {
    /// TOML catalog to load instead of the built-in salon catalog.
    pub path: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
    Json,
}

#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub log_level: Option<String>,
    pub cart_snapshot_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
    pub require_file: bool,
    pub overrides: ConfigOverrides,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("required config file was not found: `{0}`")]
    MissingConfigFile(PathBuf),
    #[error("environment variable interpolation failed for `{var}`")]
    MissingEnvInterpolation { var: String },
    #[error("unterminated environment interpolation expression")]
    UnterminatedInterpolation,
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

impl From<ConfigError> for ApplicationError {
    fn from(error: ConfigError) -> Self {
        Self::Configuration(error.to_string())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            logging: LoggingConfig { level: "info".to_string(), format: LogFormat::Compact },
            configurator: ConfiguratorConfig {
                max_addon_quantity: DEFAULT_MAX_ADDON_QUANTITY,
                max_order_quantity: DEFAULT_MAX_ORDER_QUANTITY,
                highlight_secs: 3,
                recommendation_highlight_secs: 5,
            },
            cart: CartConfig { snapshot_path: PathBuf::from("homeserv-cart.json") },
            checkout: CheckoutConfig {
                currency: DEFAULT_CURRENCY.to_string(),
                tax_rate_pct: DEFAULT_TAX_RATE_PCT,
                delivery_fee: DEFAULT_DELIVERY_FEE,
            },
            catalog: CatalogConfig::default(),
        }
    }
}

impl std::str::FromStr for LogFormat {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ConfigError::Validation(format!(
                "unsupported log format `{other}` (expected compact|pretty|json)"
            ))),
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let maybe_path = resolve_config_path(options.config_path.as_deref());

        if let Some(path) = maybe_path {
            let patch = read_patch(&path)?;
            config.apply_patch(patch);
        } else if options.require_file {
            let expected = options
                .config_path
                .unwrap_or_else(|| PathBuf::from(CONFIG_FILE_CANDIDATES[0]));
            return Err(ConfigError::MissingConfigFile(expected));
        }

        config.apply_env_overrides()?;
        config.apply_overrides(options.overrides);
        config.validate()?;

        Ok(config)
    }

    fn apply_patch(&mut self, patch: ConfigPatch) {
        if let Some(logging) = patch.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }

        if let Some(configurator) = patch.configurator {
            if let Some(max_addon_quantity) = configurator.max_addon_quantity {
                self.configurator.max_addon_quantity = max_addon_quantity;
            }
            if let Some(max_order_quantity) = configurator.max_order_quantity {
                self.configurator.max_order_quantity = max_order_quantity;
            }
            if let Some(highlight_secs) = configurator.highlight_secs {
                self.configurator.highlight_secs = highlight_secs;
            }
            if let Some(recommendation_highlight_secs) = configurator.recommendation_highlight_secs
            {
                self.configurator.recommendation_highlight_secs = recommendation_highlight_secs;
            }
        }

        if let Some(cart) = patch.cart {
            if let Some(snapshot_path) = cart.snapshot_path {
                self.cart.snapshot_path = snapshot_path;
            }
        }

        if let Some(checkout) = patch.checkout {
            if let Some(currency) = checkout.currency {
                self.checkout.currency = currency;
            }
            if let Some(tax_rate_pct) = checkout.tax_rate_pct {
                self.checkout.tax_rate_pct = tax_rate_pct;
            }
            if let Some(delivery_fee) = checkout.delivery_fee {
                self.checkout.delivery_fee = delivery_fee;
            }
        }

        if let Some(catalog) = patch.catalog {
            if let Some(path) = catalog.path {
                self.catalog.path = Some(path);
            }
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        let log_level =
            read_env("HOMESERV_LOGGING_LEVEL").or_else(|| read_env("HOMESERV_LOG_LEVEL"));
        if let Some(value) = log_level {
            self.logging.level = value;
        }
        let log_format =
            read_env("HOMESERV_LOGGING_FORMAT").or_else(|| read_env("HOMESERV_LOG_FORMAT"));
        if let Some(value) = log_format {
            self.logging.format = value.parse()?;
        }

        if let Some(value) = read_env("HOMESERV_CONFIGURATOR_MAX_ADDON_QUANTITY") {
            self.configurator.max_addon_quantity =
                parse_u32("HOMESERV_CONFIGURATOR_MAX_ADDON_QUANTITY", &value)?;
        }
        if let Some(value) = read_env("HOMESERV_CONFIGURATOR_MAX_ORDER_QUANTITY") {
            self.configurator.max_order_quantity =
                parse_u32("HOMESERV_CONFIGURATOR_MAX_ORDER_QUANTITY", &value)?;
        }
        if let Some(value) = read_env("HOMESERV_CONFIGURATOR_HIGHLIGHT_SECS") {
            self.configurator.highlight_secs =
                parse_u64("HOMESERV_CONFIGURATOR_HIGHLIGHT_SECS", &value)?;
        }
        if let Some(value) = read_env("HOMESERV_CONFIGURATOR_RECOMMENDATION_HIGHLIGHT_SECS") {
            self.configurator.recommendation_highlight_secs =
                parse_u64("HOMESERV_CONFIGURATOR_RECOMMENDATION_HIGHLIGHT_SECS", &value)?;
        }

        if let Some(value) = read_env("HOMESERV_CART_SNAPSHOT_PATH") {
            self.cart.snapshot_path = PathBuf::from(value);
        }

        if let Some(value) = read_env("HOMESERV_CHECKOUT_CURRENCY") {
            self.checkout.currency = value;
        }
        if let Some(value) = read_env("HOMESERV_CHECKOUT_TAX_RATE_PCT") {
            self.checkout.tax_rate_pct = parse_decimal("HOMESERV_CHECKOUT_TAX_RATE_PCT", &value)?;
        }
        if let Some(value) = read_env("HOMESERV_CHECKOUT_DELIVERY_FEE") {
            self.checkout.delivery_fee = parse_decimal("HOMESERV_CHECKOUT_DELIVERY_FEE", &value)?;
        }

        if let Some(value) = read_env("HOMESERV_CATALOG_PATH") {
            self.catalog.path = Some(PathBuf::from(value));
        }

        Ok(())
    }

    fn apply_overrides(&mut self, overrides: ConfigOverrides) {
        if let Some(log_level) = overrides.log_level {
            self.logging.level = log_level;
        }
        if let Some(snapshot_path) = overrides.cart_snapshot_path {
            self.cart.snapshot_path = snapshot_path;
        }
        if let Some(catalog_path) = overrides.catalog_path {
            self.catalog.path = Some(catalog_path);
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_logging(&self.logging)?;
        validate_configurator(&self.configurator)?;
        validate_cart(&self.cart)?;
        validate_checkout(&self.checkout)?;
        Ok(())
    }
}

/// Config file that [`AppConfig::load`] would read for `explicit_path`, if any exists.
pub fn resolve_config_path(explicit_path: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit_path {
        return path.exists().then_some(path.to_path_buf());
    }

    CONFIG_FILE_CANDIDATES.into_iter().map(PathBuf::from).find(|path| path.exists())
}

fn read_patch(path: &Path) -> Result<ConfigPatch, ConfigError> {
    let raw = fs::read_to_string(path)
        .map_err(|source| ConfigError::ReadFile { path: path.to_path_buf(), source })?;

    let interpolated = interpolate_env_vars(&raw)?;
    toml::from_str::<ConfigPatch>(&interpolated)
        .map_err(|source| ConfigError::ParseFile { path: path.to_path_buf(), source })
}

fn interpolate_env_vars(input: &str) -> Result<String, ConfigError> {
    let mut output = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '$' && matches!(chars.peek(), Some('{')) {
            chars.next();
            let mut key = String::new();

            loop {
                match chars.next() {
                    Some('}') => break,
                    Some(next) => key.push(next),
                    None => return Err(ConfigError::UnterminatedInterpolation),
                }
            }

            let value = env::var(&key)
                .map_err(|_| ConfigError::MissingEnvInterpolation { var: key.clone() })?;
            output.push_str(&value);
            continue;
        }

        output.push(ch);
    }

    Ok(output)
}

fn validate_logging(logging: &LoggingConfig) -> Result<(), ConfigError> {
    let level = logging.level.trim().to_ascii_lowercase();
    match level.as_str() {
        "trace" | "debug" | "info" | "warn" | "error" => Ok(()),
        _ => Err(ConfigError::Validation(
            "logging.level must be one of trace|debug|info|warn|error".to_string(),
        )),
    }
}

fn validate_configurator(configurator: &ConfiguratorConfig) -> Result<(), ConfigError> {
    // Caps may be lowered, never raised past the storefront bounds.
    if !(1..=DEFAULT_MAX_ADDON_QUANTITY).contains(&configurator.max_addon_quantity) {
        return Err(ConfigError::Validation(format!(
            "configurator.max_addon_quantity must be in range 1..={DEFAULT_MAX_ADDON_QUANTITY}"
        )));
    }

    if !(1..=DEFAULT_MAX_ORDER_QUANTITY).contains(&configurator.max_order_quantity) {
        return Err(ConfigError::Validation(format!(
            "configurator.max_order_quantity must be in range 1..={DEFAULT_MAX_ORDER_QUANTITY}"
        )));
    }

    if configurator.highlight_secs > 60 || configurator.recommendation_highlight_secs > 60 {
        return Err(ConfigError::Validation(
            "configurator highlight durations must be at most 60 seconds".to_string(),
        ));
    }

    Ok(())
}

fn validate_cart(cart: &CartConfig) -> Result<(), ConfigError> {
    if cart.snapshot_path.as_os_str().is_empty() {
        return Err(ConfigError::Validation("cart.snapshot_path must not be empty".to_string()));
    }

    Ok(())
}

fn validate_checkout(checkout: &CheckoutConfig) -> Result<(), ConfigError> {
    let currency = checkout.currency.trim();
    if currency.len() != 3 || !currency.chars().all(|ch| ch.is_ascii_uppercase()) {
        return Err(ConfigError::Validation(
            "checkout.currency must be a three-letter uppercase code such as `INR`".to_string(),
        ));
    }

    if checkout.tax_rate_pct < Decimal::ZERO || checkout.tax_rate_pct > Decimal::ONE_HUNDRED {
        return Err(ConfigError::Validation(
            "checkout.tax_rate_pct must be in range 0..=100".to_string(),
        ));
    }

    if checkout.delivery_fee < Decimal::ZERO {
        return Err(ConfigError::Validation(
            "checkout.delivery_fee must not be negative".to_string(),
        ));
    }

    Ok(())
}

fn read_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn parse_u32(key: &str, value: &str) -> Result<u32, ConfigError> {
    value.parse::<u32>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_u64(key: &str, value: &str) -> Result<u64, ConfigError> {
    value.parse::<u64>().map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

fn parse_decimal(key: &str, value: &str) -> Result<Decimal, ConfigError> {
    Decimal::from_str(value.trim()).map_err(|_| ConfigError::InvalidEnvOverride {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[derive(Debug, Default, Deserialize)]
struct ConfigPatch {
    logging: Option<LoggingPatch>,
    configurator: Option<ConfiguratorPatch>,
    cart: Option<CartPatch>,
    checkout: Option<CheckoutPatch>,
    catalog: Option<CatalogPatch>,
}

#[derive(Debug, Default, Deserialize)]
struct LoggingPatch {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[derive(Debug, Default, Deserialize)]
struct ConfiguratorPatch {
    max_addon_quantity: Option<u32>,
    max_order_quantity: Option<u32>,
    highlight_secs: Option<u64>,
    recommendation_highlight_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct CartPatch {
    snapshot_path: Option<PathBuf>,
}

#[derive(Debug, Default, Deserialize)]
struct CheckoutPatch {
    currency: Option<String>,
    tax_rate_pct: Option<Decimal>,
    delivery_fee: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize)]
struct CatalogPatch {
    path: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::io;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    use rust_decimal::Decimal;
    use tempfile::TempDir;

    use super::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};

    static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

    fn env_lock() -> &'static Mutex<()> {
        ENV_LOCK.get_or_init(|| Mutex::new(()))
    }

    fn clear_vars(vars: &[&str]) {
        for var in vars {
            env::remove_var(var);
        }
    }

    fn ensure(condition: bool, message: &'static str) -> Result<(), String> {
        if condition {
            Ok(())
        } else {
            Err(message.to_string())
        }
    }

    #[test]
    fn defaults_match_the_storefront() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let config = AppConfig::load(LoadOptions::default())
            .map_err(|err| format!("config load failed: {err}"))?;

        ensure(config.checkout.tax_rate_pct == Decimal::from(18), "default tax should be 18%")?;
        ensure(config.checkout.delivery_fee == Decimal::from(49), "default delivery fee is 49")?;
        ensure(config.checkout.currency == "INR", "default currency should be INR")?;
        ensure(config.configurator.max_addon_quantity == 5, "add-on cap should default to 5")?;
        ensure(config.configurator.max_order_quantity == 10, "order cap should default to 10")?;
        ensure(config.catalog.path.is_none(), "built-in catalog is the default")?;
        ensure(
            matches!(config.logging.format, LogFormat::Compact),
            "default logging format should be compact",
        )
    }

    #[test]
    fn file_load_supports_env_interpolation() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("TEST_HOMESERV_CATALOG", "/srv/catalogs/plumbing.toml");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("homeserv.toml");
            fs::write(
                &path,
                r#"
[catalog]
path = "${TEST_HOMESERV_CATALOG}"

[checkout]
tax_rate_pct = 12.5
"#,
            )
            .map_err(|err| err.to_string())?;

            let config =
                AppConfig::load(LoadOptions { config_path: Some(path), ..LoadOptions::default() })
                    .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.catalog.path == Some(PathBuf::from("/srv/catalogs/plumbing.toml")),
                "catalog path should be interpolated from environment",
            )?;
            ensure(
                config.checkout.tax_rate_pct == Decimal::new(125, 1),
                "fractional tax rate should be read from file",
            )?;
            Ok(())
        })();

        clear_vars(&["TEST_HOMESERV_CATALOG"]);
        result
    }

    #[test]
    fn logging_env_aliases_are_supported() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("HOMESERV_LOG_LEVEL", "warn");
        env::set_var("HOMESERV_LOG_FORMAT", "pretty");

        let result = (|| -> Result<(), String> {
            let config = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("config load failed: {err}"))?;

            ensure(config.logging.level == "warn", "warning log level should be set from env var")?;
            ensure(
                matches!(config.logging.format, LogFormat::Pretty),
                "pretty logging format should be set from env var",
            )?;
            Ok(())
        })();

        clear_vars(&["HOMESERV_LOG_LEVEL", "HOMESERV_LOG_FORMAT"]);
        result
    }

    #[test]
    fn precedence_defaults_file_env_overrides() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("HOMESERV_CART_SNAPSHOT_PATH", "from-env.json");
        env::set_var("HOMESERV_CHECKOUT_DELIVERY_FEE", "59");

        let result = (|| -> Result<(), String> {
            let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
            let path = dir.path().join("homeserv.toml");
            fs::write(
                &path,
                r#"
[cart]
snapshot_path = "from-file.json"

[checkout]
delivery_fee = 29

[configurator]
max_order_quantity = 4

[logging]
level = "warn"
"#,
            )
            .map_err(|err| err.to_string())?;

            let config = AppConfig::load(LoadOptions {
                config_path: Some(path),
                overrides: ConfigOverrides {
                    cart_snapshot_path: Some(PathBuf::from("from-override.json")),
                    log_level: Some("debug".to_string()),
                    ..ConfigOverrides::default()
                },
                ..LoadOptions::default()
            })
            .map_err(|err| format!("config load failed: {err}"))?;

            ensure(
                config.cart.snapshot_path == PathBuf::from("from-override.json"),
                "override snapshot path should win",
            )?;
            ensure(config.logging.level == "debug", "overridden log level should be debug")?;
            ensure(
                config.checkout.delivery_fee == Decimal::from(59),
                "env delivery fee should win over file and defaults",
            )?;
            ensure(
                config.configurator.max_order_quantity == 4,
                "file order cap should win over defaults",
            )?;
            Ok(())
        })();

        clear_vars(&["HOMESERV_CART_SNAPSHOT_PATH", "HOMESERV_CHECKOUT_DELIVERY_FEE"]);
        result
    }

    #[test]
    fn invalid_env_number_is_reported_with_its_key() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("HOMESERV_CONFIGURATOR_MAX_ADDON_QUANTITY", "five");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => return Err("expected invalid override but config loaded".to_string()),
                Err(error) => error,
            };
            ensure(
                matches!(
                    error,
                    ConfigError::InvalidEnvOverride { ref key, .. }
                        if key == "HOMESERV_CONFIGURATOR_MAX_ADDON_QUANTITY"
                ),
                "error should name the offending variable",
            )
        })();

        clear_vars(&["HOMESERV_CONFIGURATOR_MAX_ADDON_QUANTITY"]);
        result
    }

    #[test]
    fn validation_fails_fast_with_actionable_error() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        env::set_var("HOMESERV_CHECKOUT_TAX_RATE_PCT", "140");

        let result = (|| -> Result<(), String> {
            let error = match AppConfig::load(LoadOptions::default()) {
                Ok(_) => {
                    return Err("expected validation failure but config load succeeded".to_string())
                }
                Err(error) => error,
            };
            let has_message = matches!(
                error,
                ConfigError::Validation(ref message) if message.contains("checkout.tax_rate_pct")
            );
            ensure(has_message, "validation failure should mention checkout.tax_rate_pct")
        })();

        clear_vars(&["HOMESERV_CHECKOUT_TAX_RATE_PCT"]);
        result
    }

    #[test]
    fn quantity_caps_cannot_exceed_storefront_bounds() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;
        let vars = [
            "HOMESERV_CONFIGURATOR_MAX_ADDON_QUANTITY",
            "HOMESERV_CONFIGURATOR_MAX_ORDER_QUANTITY",
        ];

        let result = (|| -> Result<(), String> {
            env::set_var(vars[0], "6");
            let addon = AppConfig::load(LoadOptions::default());
            ensure(
                matches!(
                    addon,
                    Err(ConfigError::Validation(ref message))
                        if message.contains("configurator.max_addon_quantity")
                ),
                "add-on cap of 6 should be rejected",
            )?;

            env::remove_var(vars[0]);
            env::set_var(vars[1], "11");
            let order = AppConfig::load(LoadOptions::default());
            ensure(
                matches!(
                    order,
                    Err(ConfigError::Validation(ref message))
                        if message.contains("configurator.max_order_quantity")
                ),
                "order cap of 11 should be rejected",
            )?;

            env::set_var(vars[0], "3");
            env::set_var(vars[1], "4");
            let lowered = AppConfig::load(LoadOptions::default())
                .map_err(|err| format!("lowered caps should load: {err}"))?;
            ensure(
                lowered.configurator.max_addon_quantity == 3
                    && lowered.configurator.max_order_quantity == 4,
                "lowered caps should be kept",
            )
        })();

        clear_vars(&vars);
        result
    }

    #[test]
    fn required_file_must_exist() -> Result<(), String> {
        let _guard = env_lock().lock().map_err(|_| "env lock is poisoned".to_string())?;

        let dir = TempDir::new().map_err(|err: io::Error| err.to_string())?;
        let missing = dir.path().join("absent.toml");
        let result = AppConfig::load(LoadOptions {
            config_path: Some(missing.clone()),
            require_file: true,
            ..LoadOptions::default()
        });

        ensure(
            matches!(result, Err(ConfigError::MissingConfigFile(ref path)) if path == &missing),
            "missing required file should be reported",
        )
    }
}
