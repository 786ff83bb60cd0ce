//! Credential resolution, authorization, and Calendar event creation.
//!
//! This crate implements the scheduling workflow:
//!
//! - [`CredentialSource`] - one resolver with pluggable sources (environment
//!   variables or a credentials file), producing a [`CredentialBundle`]
//! - [`Authorizer`] - turns a bundle into an authenticated handle, running
//!   the interactive OAuth exchange when a [`CodePrompt`] is supplied
//! - [`CalendarClient`] - the events.insert call with a conference-creation
//!   request attached
//! - [`MeetScheduler`] - runs the whole chain per trigger firing
//!
//! # Example
//!
//! ```ignore
//! use meetinvite_core::MeetingRequest;
//! use meetinvite_google::{CredentialSource, GoogleConfig, MeetScheduler, StdinPrompt};
//!
//! let scheduler = MeetScheduler::new(GoogleConfig::new(CredentialSource::Environment));
//! let request = MeetingRequest::new("a@b.com", start);
//! let result = scheduler.schedule(&request, Some(&StdinPrompt)).await?;
//! println!("Event: {}", result.event_link);
//! ```

pub mod auth;
pub mod client;
pub mod credentials;
pub mod error;
pub mod scheduler;
pub mod tokens;

// Re-export main types at crate root
pub use auth::{AuthHandle, Authorizer, CALENDAR_SCOPE, CodePrompt, StdinPrompt, build_auth_url};
pub use client::{CalendarClient, EVENT_DESCRIPTION, EVENT_SUMMARY};
pub use credentials::{
    CredentialBundle, CredentialSource, OAuthClientConfig, ServiceAccountKey,
    parse_credentials_json,
};
pub use error::{CalendarError, CalendarErrorCode, CalendarResult};
pub use scheduler::{GoogleConfig, MeetScheduler};
pub use tokens::{TokenInfo, TokenStorage};
