//! Authorization: turning a credential bundle into an authenticated handle.
//!
//! Two paths, selected by the bundle variant:
//!
//! - **Service account**: sign an RS256 JWT assertion and exchange it for an
//!   access token at the key's token endpoint. Never blocks on user
//!   interaction and never touches the stored token file.
//! - **OAuth client**: reuse the stored token when one exists; otherwise, in
//!   interactive mode, present the authorization URL through a [`CodePrompt`],
//!   block for the one-time code, exchange it, and persist the resulting
//!   token. Without a prompt the flow fails instead of hanging, so the
//!   non-interactive HTTP surface gets a clear authorization error rather
//!   than an unreachable consent step.
//!
//! Any exchange failure is terminal for the invocation; nothing is retried.

use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header, encode};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::credentials::{CredentialBundle, OAuthClientConfig, ServiceAccountKey};
use crate::error::{CalendarError, CalendarResult};
use crate::tokens::{TokenInfo, TokenStorage};

/// The calendar-write scope requested on every authorization path.
pub const CALENDAR_SCOPE: &str = "https://www.googleapis.com/auth/calendar.events";

/// Lifetime of a service-account JWT assertion, in seconds.
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Seam for the interactive one-time code exchange.
///
/// Implementations present the authorization URL to the operator and block
/// until the code is entered. The production implementation is
/// [`StdinPrompt`]; tests supply their own.
pub trait CodePrompt: Send + Sync {
    /// Presents `auth_url` and returns the one-time authorization code.
    fn request_code(&self, auth_url: &str) -> CalendarResult<String>;
}

/// Synchronous stdin/stdout code prompt.
pub struct StdinPrompt;

impl CodePrompt for StdinPrompt {
    fn request_code(&self, auth_url: &str) -> CalendarResult<String> {
        println!("Authorize this app by visiting this url:\n\n{}\n", auth_url);
        print!("Enter the code from that page here: ");
        std::io::stdout()
            .flush()
            .map_err(|e| CalendarError::internal(format!("failed to flush stdout: {}", e)))?;

        let mut code = String::new();
        std::io::stdin()
            .lock()
            .read_line(&mut code)
            .map_err(|e| CalendarError::internal(format!("failed to read code: {}", e)))?;
        Ok(code.trim().to_string())
    }
}

/// An authenticated handle usable by the event scheduler.
#[derive(Debug, Clone)]
pub struct AuthHandle {
    access_token: String,
}

impl AuthHandle {
    /// Returns the bearer token for API requests.
    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

/// Produces authenticated handles from resolved credential bundles.
#[derive(Debug)]
pub struct Authorizer {
    token_storage: TokenStorage,
    http_client: reqwest::Client,
}

impl Authorizer {
    /// Creates an authorizer with token storage at the given path.
    pub fn new(token_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            token_storage: TokenStorage::new(token_path),
            http_client,
        }
    }

    /// Produces an authenticated handle for the given bundle.
    ///
    /// `prompt` enables the interactive OAuth exchange. Pass `None` on
    /// surfaces without an interactive terminal; an OAuth bundle with no
    /// stored token then fails with an authorization error.
    pub async fn authorize(
        &self,
        bundle: &CredentialBundle,
        prompt: Option<&dyn CodePrompt>,
    ) -> CalendarResult<AuthHandle> {
        match bundle {
            CredentialBundle::ServiceAccount(key) => self.service_account_token(key).await,
            CredentialBundle::OAuth(config) => self.oauth_token(config, prompt).await,
        }
    }

    /// Exchanges a signed service-account assertion for an access token.
    async fn service_account_token(&self, key: &ServiceAccountKey) -> CalendarResult<AuthHandle> {
        let now = Utc::now().timestamp();
        let claims = AssertionClaims {
            iss: key.client_email.clone(),
            scope: CALENDAR_SCOPE.to_string(),
            aud: key.token_uri.clone(),
            iat: now,
            exp: now + ASSERTION_LIFETIME_SECS,
        };

        let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
            CalendarError::authorization(format!(
                "failed to parse service-account private key: {}",
                e
            ))
        })?;

        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &encoding_key)
            .map_err(|e| {
                CalendarError::authorization(format!("failed to sign assertion: {}", e))
            })?;

        debug!(issuer = %key.client_email, "requesting service-account access token");

        let params = [
            ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
            ("assertion", assertion.as_str()),
        ];

        let response = self.token_request(&key.token_uri, &params).await?;
        Ok(AuthHandle {
            access_token: response.access_token,
        })
    }

    /// Returns a handle from the stored token, or runs the interactive flow.
    async fn oauth_token(
        &self,
        config: &OAuthClientConfig,
        prompt: Option<&dyn CodePrompt>,
    ) -> CalendarResult<AuthHandle> {
        if let Some(token) = self.token_storage.load()? {
            debug!("using stored token");
            return Ok(AuthHandle {
                access_token: token.access_token,
            });
        }

        let prompt = prompt.ok_or_else(|| {
            CalendarError::authorization(
                "no stored token and interactive authorization is unavailable; \
                 run 'meetinvite auth' to authorize first",
            )
        })?;

        let auth_url = build_auth_url(config);
        let code = prompt.request_code(&auth_url)?;

        info!("exchanging authorization code for token");

        let params = [
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("code", code.as_str()),
            ("grant_type", "authorization_code"),
            ("redirect_uri", config.redirect_uri.as_str()),
        ];

        let response = self.token_request(&config.token_uri, &params).await?;
        let token = TokenInfo::new(response.access_token, response.refresh_token);
        self.token_storage.save(&token)?;

        Ok(AuthHandle {
            access_token: token.access_token,
        })
    }

    /// Posts a form to a token endpoint and parses the response.
    async fn token_request(
        &self,
        token_uri: &str,
        params: &[(&str, &str)],
    ) -> CalendarResult<TokenResponse> {
        let response = self
            .http_client
            .post(token_uri)
            .form(params)
            .send()
            .await
            .map_err(|e| CalendarError::network(format!("token request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CalendarError::network(format!("failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(CalendarError::authorization(format!(
                "token exchange failed ({}): {}",
                status, body
            )));
        }

        serde_json::from_str(&body).map_err(|e| {
            CalendarError::invalid_response(format!("invalid token response: {}", e))
        })
    }
}

/// Builds the offline-access authorization URL for the one-time code flow.
pub fn build_auth_url(config: &OAuthClientConfig) -> String {
    format!(
        "{}?response_type=code&client_id={}&redirect_uri={}&scope={}&access_type=offline",
        config.auth_uri,
        urlencoding::encode(&config.client_id),
        urlencoding::encode(&config.redirect_uri),
        urlencoding::encode(CALENDAR_SCOPE),
    )
}

/// JWT claims for the service-account assertion.
#[derive(Debug, Serialize)]
struct AssertionClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

/// Response from a token endpoint.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    expires_in: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A prompt that fails the test if the interactive flow is entered.
    struct ForbiddenPrompt;

    impl CodePrompt for ForbiddenPrompt {
        fn request_code(&self, _auth_url: &str) -> CalendarResult<String> {
            panic!("interactive flow must not be entered");
        }
    }

    fn oauth_config() -> OAuthClientConfig {
        OAuthClientConfig::new("test-id.apps.googleusercontent.com", "test-secret")
    }

    #[test]
    fn auth_url_format() {
        let url = build_auth_url(&oauth_config());
        assert!(url.starts_with("https://accounts.google.com/o/oauth2/auth?"));
        assert!(url.contains("response_type=code"));
        assert!(url.contains("client_id=test-id.apps.googleusercontent.com"));
        assert!(url.contains("access_type=offline"));
        assert!(url.contains(&urlencoding::encode(CALENDAR_SCOPE).into_owned()));
    }

    #[tokio::test]
    async fn stored_token_short_circuits_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join("token.json");
        TokenStorage::new(&token_path)
            .save(&TokenInfo::new("stored-access-token", None))
            .unwrap();

        let authorizer = Authorizer::new(&token_path, Duration::from_secs(5));
        let bundle = CredentialBundle::OAuth(oauth_config());

        let handle = authorizer
            .authorize(&bundle, Some(&ForbiddenPrompt))
            .await
            .unwrap();
        assert_eq!(handle.access_token(), "stored-access-token");
    }

    #[tokio::test]
    async fn non_interactive_oauth_without_token_fails() {
        let dir = tempfile::tempdir().unwrap();
        let authorizer = Authorizer::new(dir.path().join("token.json"), Duration::from_secs(5));
        let bundle = CredentialBundle::OAuth(oauth_config());

        let err = authorizer.authorize(&bundle, None).await.unwrap_err();
        assert_eq!(err.code(), crate::error::CalendarErrorCode::Authorization);
        assert!(err.message().contains("meetinvite auth"));
    }

    #[tokio::test]
    async fn service_account_never_reads_token_file() {
        let dir = tempfile::tempdir().unwrap();
        let token_path = dir.path().join("token.json");
        // A malformed token file would fail any load attempt; the
        // service-account path must not notice it.
        std::fs::write(&token_path, "not json").unwrap();

        let authorizer = Authorizer::new(&token_path, Duration::from_secs(5));
        let key = ServiceAccountKey {
            client_email: "robot@project.iam.gserviceaccount.com".to_string(),
            private_key: "not a pem key".to_string(),
            token_uri: "https://oauth2.googleapis.com/token".to_string(),
        };

        let err = authorizer
            .authorize(&CredentialBundle::ServiceAccount(key), None)
            .await
            .unwrap_err();

        // Fails on the bad private key, not on the token file.
        assert_eq!(err.code(), crate::error::CalendarErrorCode::Authorization);
        assert!(err.message().contains("private key"));
    }

    #[tokio::test]
    async fn prompt_errors_propagate() {
        struct FailingPrompt;
        impl CodePrompt for FailingPrompt {
            fn request_code(&self, _auth_url: &str) -> CalendarResult<String> {
                Err(CalendarError::internal("prompt closed"))
            }
        }

        let dir = tempfile::tempdir().unwrap();
        let authorizer = Authorizer::new(dir.path().join("token.json"), Duration::from_secs(5));
        let bundle = CredentialBundle::OAuth(oauth_config());

        let err = authorizer
            .authorize(&bundle, Some(&FailingPrompt))
            .await
            .unwrap_err();
        assert!(err.message().contains("prompt closed"));
    }
}
