//! Error types and handling for the ClimaCare backend

use thiserror::Error;

/// Main error type for the ClimaCare backend
#[derive(Error, Debug)]
pub enum ClimaCareError {
    /// Credential lookup failed
    #[error("Invalid credentials")]
    Unauthorized,

    /// Configuration-related errors (missing API keys, bad settings)
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// A required field was absent from caller-supplied data
    #[error("Missing field: {field}")]
    MissingField { field: &'static str },

    /// An upstream provider answered with a shape we cannot use
    #[error("Malformed upstream response: {message}")]
    MalformedResponse { message: String },

    /// An upstream provider failed outright (non-success status, network)
    #[error("Upstream error: {message}")]
    Upstream { message: String },
}

impl ClimaCareError {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(message: S) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a new missing-field error
    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    /// Create a new malformed-response error
    pub fn malformed<S: Into<String>>(message: S) -> Self {
        Self::MalformedResponse {
            message: message.into(),
        }
    }

    /// Create a new upstream error
    pub fn upstream<S: Into<String>>(message: S) -> Self {
        Self::Upstream {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let config_err = ClimaCareError::config("missing API key");
        assert!(matches!(config_err, ClimaCareError::Config { .. }));

        let upstream_err = ClimaCareError::upstream("connection failed");
        assert!(matches!(upstream_err, ClimaCareError::Upstream { .. }));

        let field_err = ClimaCareError::missing_field("temperature");
        assert!(matches!(field_err, ClimaCareError::MissingField { .. }));
    }

    #[test]
    fn test_error_display() {
        assert_eq!(
            ClimaCareError::Unauthorized.to_string(),
            "Invalid credentials"
        );
        assert_eq!(
            ClimaCareError::missing_field("humidity").to_string(),
            "Missing field: humidity"
        );
        assert!(
            ClimaCareError::config("no key")
                .to_string()
                .contains("Configuration error")
        );
    }
}
