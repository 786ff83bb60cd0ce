//! CLI error types.

use thiserror::Error;

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// Errors surfaced to the operator.
#[derive(Debug, Error)]
pub enum CliError {
    /// Scheduling workflow failure (credentials, authorization, provider).
    #[error(transparent)]
    Calendar(#[from] meetinvite_google::CalendarError),

    /// User-supplied date/time could not be parsed.
    #[error(transparent)]
    Time(#[from] meetinvite_core::MeetingTimeError),

    /// Server failure (bind, serve).
    #[error(transparent)]
    Server(#[from] meetinvite_server::ServerError),

    /// Tracing initialization failure.
    #[error(transparent)]
    Tracing(#[from] meetinvite_core::TracingError),
}
