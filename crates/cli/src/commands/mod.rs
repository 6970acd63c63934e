pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod quote;

use homeserv_core::{ApplicationError, InterfaceError};
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
struct CommandOutcome {
    command: String,
    status: String,
    error_class: Option<String>,
    message: String,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "ok".to_string(),
            error_class: None,
            message: message.into(),
        };
        Self { exit_code: 0, output: serialize_payload(payload) }
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let payload = CommandOutcome {
            command: command.to_string(),
            status: "error".to_string(),
            error_class: Some(error_class.to_string()),
            message: message.into(),
        };
        Self { exit_code, output: serialize_payload(payload) }
    }

    /// Maps a library failure onto an error class and exit code.
    pub fn from_error(command: &str, error: ApplicationError) -> Self {
        let (error_class, exit_code) = match &error {
            ApplicationError::Domain(_) => ("invalid_request", 1),
            ApplicationError::Configuration(_) => ("config_validation", 2),
            ApplicationError::Catalog(_) => ("catalog", 3),
            ApplicationError::Persistence(_) => ("persistence", 4),
        };

        let message = match error.into_interface(command) {
            InterfaceError::BadRequest { message, .. } => message,
            InterfaceError::Internal { message, .. } if exit_code == 2 => {
                format!("configuration issue: {message}")
            }
            other => format!("{} ({other})", other.user_message()),
        };
        Self::failure(command, error_class, message, exit_code)
    }
}

/// Renders an amount without trailing zeros, at most two decimals.
pub(crate) fn money(amount: Decimal) -> String {
    amount.round_dp(2).normalize().to_string()
}

fn serialize_payload(payload: CommandOutcome) -> String {
    serde_json::to_string(&payload).unwrap_or_else(|error| {
        format!(
            "{{\"command\":\"unknown\",\"status\":\"error\",\"error_class\":\"serialization\",\"message\":\"{}\"}}",
            error.to_string().replace('\\', "\\\\").replace('"', "\\\"")
        )
    })
}
