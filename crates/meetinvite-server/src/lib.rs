//! Trigger surfaces: the HTTP endpoint and the daily trigger loop.
//!
//! Both surfaces drive the same [`ScheduleService`] seam:
//!
//! - [`http::serve`] - `POST /api/schedule` with permissive CORS
//! - [`DailyTrigger`] - fires once per day at 22:30 UTC
//!
//! Neither surface is interactive; authorization must succeed with a
//! service-account key or an already-stored OAuth token.

pub mod config;
pub mod daily;
pub mod error;
pub mod http;
pub mod service;

pub use config::ServerConfig;
pub use daily::DailyTrigger;
pub use error::{ServerError, ServerResult};
pub use service::{BoxFuture, GoogleScheduleService, ScheduleService, SharedScheduleService};
