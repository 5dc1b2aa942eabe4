use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("Service is required")]
    ServiceRequired,
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InterfaceError {
    #[error("bad request: {message}")]
    BadRequest { message: String, correlation_id: String },
    #[error("internal error: {message}")]
    Internal { message: String, correlation_id: String },
}

impl InterfaceError {
    pub fn internal(message: impl Into<String>, correlation_id: impl Into<String>) -> Self {
        Self::Internal { message: message.into(), correlation_id: correlation_id.into() }
    }

    /// Caller-safe text. Validation messages are surfaced verbatim; internal
    /// detail stays in the logs.
    pub fn user_message(&self) -> &str {
        match self {
            Self::BadRequest { message, .. } => message,
            Self::Internal { .. } => {
                "Unable to calculate quote. Please try again or contact us directly."
            }
        }
    }
}

impl DomainError {
    pub fn into_interface(self, correlation_id: impl Into<String>) -> InterfaceError {
        InterfaceError::BadRequest {
            message: self.to_string(),
            correlation_id: correlation_id.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::errors::{DomainError, InterfaceError};

    #[test]
    fn validation_error_maps_to_bad_request_with_exact_message() {
        let interface = DomainError::ServiceRequired.into_interface("req-1");

        assert!(matches!(
            interface,
            InterfaceError::BadRequest { ref correlation_id, .. } if correlation_id == "req-1"
        ));
        assert_eq!(interface.user_message(), "Service is required");
    }

    #[test]
    fn internal_error_hides_detail_from_the_caller() {
        let interface = InterfaceError::internal("decimal overflow in estimate", "req-2");

        assert_eq!(
            interface.user_message(),
            "Unable to calculate quote. Please try again or contact us directly."
        );
        assert!(!interface.user_message().contains("overflow"));
    }
}
