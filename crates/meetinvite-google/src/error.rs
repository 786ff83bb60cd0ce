//! Error types for the scheduling workflow.
//!
//! Every failure in the resolve → authorize → create chain is terminal for
//! the current invocation; nothing here is retried.

use std::fmt;
use thiserror::Error;

/// The category of a calendar workflow error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CalendarErrorCode {
    /// Missing or malformed credentials.
    Configuration,
    /// Token exchange or service-account assertion failure.
    Authorization,
    /// Network error - connection failed, timeout, DNS resolution, etc.
    Network,
    /// The calendar API rejected the request; its message is forwarded verbatim.
    Provider,
    /// The API response could not be parsed or lacked required fields.
    InvalidResponse,
    /// Unexpected internal state.
    Internal,
}

impl CalendarErrorCode {
    /// Returns a stable, machine-readable name for this error code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Configuration => "configuration_error",
            Self::Authorization => "authorization_error",
            Self::Network => "network_error",
            Self::Provider => "provider_error",
            Self::InvalidResponse => "invalid_response",
            Self::Internal => "internal_error",
        }
    }
}

impl fmt::Display for CalendarErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An error from the credential, authorization, or event-creation layers.
#[derive(Debug, Error)]
pub struct CalendarError {
    /// The error code categorizing this error.
    code: CalendarErrorCode,
    /// A human-readable message describing the error.
    message: String,
    /// The underlying cause of this error, if any.
    #[source]
    source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl CalendarError {
    /// Creates a new error with the given code and message.
    pub fn new(code: CalendarErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Creates a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(CalendarErrorCode::Configuration, message)
    }

    /// Creates an authorization error.
    pub fn authorization(message: impl Into<String>) -> Self {
        Self::new(CalendarErrorCode::Authorization, message)
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(CalendarErrorCode::Network, message)
    }

    /// Creates a provider error.
    pub fn provider(message: impl Into<String>) -> Self {
        Self::new(CalendarErrorCode::Provider, message)
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::new(CalendarErrorCode::InvalidResponse, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(CalendarErrorCode::Internal, message)
    }

    /// Sets the source error for this error.
    pub fn with_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        self.source = Some(Box::new(source));
        self
    }

    /// Returns the error code.
    pub fn code(&self) -> CalendarErrorCode {
        self.code
    }

    /// Returns the error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CalendarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.message)
    }
}

/// A specialized Result type for scheduling workflow operations.
pub type CalendarResult<T> = Result<T, CalendarError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_code_names() {
        assert_eq!(
            CalendarErrorCode::Configuration.as_str(),
            "configuration_error"
        );
        assert_eq!(CalendarErrorCode::Provider.as_str(), "provider_error");
    }

    #[test]
    fn error_creation() {
        let err = CalendarError::authorization("token exchange failed");
        assert_eq!(err.code(), CalendarErrorCode::Authorization);
        assert_eq!(err.message(), "token exchange failed");
    }

    #[test]
    fn error_display() {
        let err = CalendarError::configuration("missing GOOGLE_CLIENT_ID");
        let display = format!("{}", err);
        assert!(display.contains("configuration_error"));
        assert!(display.contains("missing GOOGLE_CLIENT_ID"));
    }

    #[test]
    fn error_with_source() {
        use std::error::Error;
        let io_err = std::io::Error::other("permission denied");
        let err = CalendarError::configuration("failed to read token file").with_source(io_err);
        assert!(err.source().is_some());
    }
}
