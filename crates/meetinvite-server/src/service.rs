//! The seam between trigger surfaces and the scheduling chain.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use meetinvite_core::{MeetingRequest, MeetingResult};
use meetinvite_google::{CalendarResult, GoogleConfig, MeetScheduler};

/// A boxed future, used to keep [`ScheduleService`] object-safe.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Schedules meetings on behalf of a trigger surface.
///
/// Both surfaces are non-interactive: implementations must never block on
/// operator input.
pub trait ScheduleService: Send + Sync {
    /// Schedules one meeting and returns its links.
    fn schedule(&self, request: MeetingRequest) -> BoxFuture<'_, CalendarResult<MeetingResult>>;
}

/// Shared handle to a schedule service.
pub type SharedScheduleService = Arc<dyn ScheduleService>;

/// Production service delegating to the Google scheduling chain.
///
/// Authorization runs in non-interactive mode: a service-account key or an
/// already-stored OAuth token works; an OAuth config with no stored token
/// fails with an authorization error telling the operator to run
/// `meetinvite auth`.
pub struct GoogleScheduleService {
    scheduler: MeetScheduler,
}

impl GoogleScheduleService {
    /// Creates a service for the given configuration.
    pub fn new(config: GoogleConfig) -> Self {
        Self {
            scheduler: MeetScheduler::new(config),
        }
    }
}

impl ScheduleService for GoogleScheduleService {
    fn schedule(&self, request: MeetingRequest) -> BoxFuture<'_, CalendarResult<MeetingResult>> {
        Box::pin(async move { self.scheduler.schedule(&request, None).await })
    }
}
