use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown service `{0}`")]
    UnknownService(String),
    #[error("unknown package `{package}` for service `{service}`")]
    UnknownPackage { service: String, package: String },
    #[error("choice `{choice}` does not belong to option group `{group}`")]
    UnknownChoice { group: String, choice: String },
    #[error("add-on `{0}` is not offered by the active package")]
    UnknownAddon(String),
    #[error("{field} must be in range {min}..={max}, got {value}")]
    OutOfRange { field: String, value: i64, min: i64, max: i64 },
    #[error("cart is empty")]
    EmptyCart,
    #[error("please select a date and time for your service")]
    MissingBookingSlot,
    #[error("invalid booking slot: {0}")]
    InvalidBookingSlot(String),
    #[error("missing contact field `{0}`")]
    MissingContactField(String),
    #[error("invalid email address `{0}`")]
    InvalidEmail(String),
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApplicationError {
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error("persistence failure: {0}")]
    Persistence(String),
    #[error("catalog failure: {0}")]
    Catalog(String),
    #[error("configuration failure: {0}")]
    Configuration(String),
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("service unavailable: {message}")]
    ServiceUnavailable { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::BadRequest { .. } => {
                "The request could not be processed. Check your selections and try again."
            }
            Self::ServiceUnavailable { .. } => {
                "Your cart could not be saved right now. Please retry shortly."
            }
            Self::Internal { .. } => "An unexpected internal error occurred.",
        }
    }
}

impl ApplicationError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        let correlation_id = correlation_id.into();
        let mut mapped = InterfaceError::from(self);
        match &mut mapped {
            InterfaceError::BadRequest { correlation_id: id, .. }
            | InterfaceError::ServiceUnavailable { correlation_id: id, .. }
            | InterfaceError::Internal { correlation_id: id, .. } => *id = correlation_id,
        }
        mapped
    }
}

impl From<ApplicationError> for InterfaceError {
    fn from(value: ApplicationError) -> Self {
        match value {
            ApplicationError::Domain(error) => Self::BadRequest {
                message: error.to_string(),
                correlation_id: "unassigned".to_owned(),
            },
            ApplicationError::Persistence(message) => {
                Self::ServiceUnavailable { message, correlation_id: "unassigned".to_owned() }
            }
            ApplicationError::Catalog(message) | ApplicationError::Configuration(message) => {
                Self::Internal { message, correlation_id: "unassigned".to_owned() }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{ApplicationError, DomainError, InterfaceError};

    #[test]
    fn domain_error_maps_to_bad_request_interface_error() {
        let interface =
            ApplicationError::from(DomainError::MissingBookingSlot).into_interface("req-1");

        assert!(matches!(
            interface,
            InterfaceError::BadRequest {
                ref correlation_id,
                ref message,
            } if correlation_id == "req-1" && message.contains("date and time")
        ));
    }

    #[test]
    fn bad_request_has_user_safe_message() {
        let interface = ApplicationError::from(DomainError::OutOfRange {
            field: "quantity".to_owned(),
            value: 11,
            min: 1,
            max: 10,
        })
        .into_interface("req-2");

        assert_eq!(
            interface.user_message(),
            "The request could not be processed. Check your selections and try again."
        );
    }

    #[test]
    fn persistence_error_maps_to_service_unavailable() {
        let interface = ApplicationError::Persistence("cart snapshot is read-only".to_owned())
            .into_interface("req-3");

        assert!(matches!(interface, InterfaceError::ServiceUnavailable { .. }));
        assert_eq!(
            interface.user_message(),
            "Your cart could not be saved right now. Please retry shortly."
        );
    }

    #[test]
    fn catalog_and_configuration_errors_map_to_internal() {
        let catalog = ApplicationError::Catalog("bad toml".to_owned()).into_interface("req-4");
        let config =
            ApplicationError::Configuration("bad tax rate".to_owned()).into_interface("req-5");

        assert!(matches!(catalog, InterfaceError::Internal { .. }));
        assert!(matches!(config, InterfaceError::Internal { .. }));
        assert_eq!(config.user_message(), "An unexpected internal error occurred.");
    }

    #[test]
    fn out_of_range_message_names_bounds() {
        let error = DomainError::OutOfRange {
            field: "addon quantity".to_owned(),
            value: 6,
            min: 1,
            max: 5,
        };

        assert_eq!(error.to_string(), "addon quantity must be in range 1..=5, got 6");
    }
}
