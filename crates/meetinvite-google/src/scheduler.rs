//! The scheduling chain: resolve credentials, authorize, create the event.

use std::path::PathBuf;
use std::time::Duration;

use meetinvite_core::{MeetingRequest, MeetingResult};
use tracing::debug;

use crate::auth::{Authorizer, CodePrompt};
use crate::client::CalendarClient;
use crate::credentials::CredentialSource;
use crate::error::CalendarResult;

/// Configuration for the scheduling chain.
#[derive(Debug, Clone)]
pub struct GoogleConfig {
    /// Where credentials are resolved from.
    pub source: CredentialSource,

    /// Path to the stored OAuth token.
    ///
    /// Defaults to `~/.local/share/meetinvite/google-token.json`.
    pub token_path: PathBuf,

    /// The calendar events are created on.
    pub calendar_id: String,

    /// Request timeout for token and calendar API calls.
    pub timeout: Duration,
}

impl GoogleConfig {
    /// Default timeout in seconds.
    pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

    /// Creates a configuration for the given credential source.
    pub fn new(source: CredentialSource) -> Self {
        Self {
            source,
            token_path: Self::default_token_path(),
            calendar_id: "primary".to_string(),
            timeout: Duration::from_secs(Self::DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Returns the default token storage path.
    pub fn default_token_path() -> PathBuf {
        let data_dir = dirs::home_dir()
            .map(|h| h.join(".local").join("share"))
            .unwrap_or_else(|| PathBuf::from("."))
            .join("meetinvite");
        data_dir.join("google-token.json")
    }

    /// Sets the token storage path.
    pub fn with_token_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.token_path = path.into();
        self
    }

    /// Sets the calendar events are created on.
    pub fn with_calendar_id(mut self, id: impl Into<String>) -> Self {
        self.calendar_id = id.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

/// Runs the full Resolver → Authorizer → Scheduler chain per invocation.
#[derive(Debug)]
pub struct MeetScheduler {
    config: GoogleConfig,
}

impl MeetScheduler {
    /// Creates a scheduler with the given configuration.
    pub fn new(config: GoogleConfig) -> Self {
        Self { config }
    }

    /// Schedules one meeting and returns its links.
    ///
    /// `prompt` enables the interactive OAuth flow; surfaces without a
    /// terminal pass `None`. The request is submitted at most once; any
    /// failure in the chain is terminal for this invocation.
    pub async fn schedule(
        &self,
        request: &MeetingRequest,
        prompt: Option<&dyn CodePrompt>,
    ) -> CalendarResult<MeetingResult> {
        debug!(source = ?self.config.source, "resolving credentials");
        let bundle = self.config.source.resolve()?;

        let authorizer = Authorizer::new(&self.config.token_path, self.config.timeout);
        let handle = authorizer.authorize(&bundle, prompt).await?;

        let client = CalendarClient::new(handle.access_token(), self.config.timeout);
        client.insert_event(&self.config.calendar_id, request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_defaults() {
        let config = GoogleConfig::new(CredentialSource::Environment);
        assert_eq!(config.calendar_id, "primary");
        assert_eq!(
            config.timeout,
            Duration::from_secs(GoogleConfig::DEFAULT_TIMEOUT_SECS)
        );
        assert!(config.token_path.ends_with("meetinvite/google-token.json"));
    }

    #[test]
    fn config_builder_methods() {
        let config = GoogleConfig::new(CredentialSource::Environment)
            .with_token_path("/tmp/token.json")
            .with_calendar_id("work@example.com")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(config.token_path, PathBuf::from("/tmp/token.json"));
        assert_eq!(config.calendar_id, "work@example.com");
        assert_eq!(config.timeout, Duration::from_secs(5));
    }

    #[test]
    fn schedule_future_is_send() {
        fn assert_send<T: Send>(_: &T) {}

        let scheduler = MeetScheduler::new(GoogleConfig::new(CredentialSource::Environment));
        let request = meetinvite_core::MeetingRequest::new("a@b.com", chrono::Utc::now());
        // Trigger surfaces box this future as `dyn Future + Send`.
        let future = scheduler.schedule(&request, None);
        assert_send(&future);
    }

    #[tokio::test]
    async fn chain_stops_at_credential_resolution() {
        let config = GoogleConfig::new(CredentialSource::File(PathBuf::from(
            "/nonexistent/credentials.json",
        )));
        let scheduler = MeetScheduler::new(config);

        let request = meetinvite_core::MeetingRequest::new("a@b.com", chrono::Utc::now());
        let err = scheduler.schedule(&request, None).await.unwrap_err();
        assert_eq!(err.code(), crate::error::CalendarErrorCode::Configuration);
    }
}
