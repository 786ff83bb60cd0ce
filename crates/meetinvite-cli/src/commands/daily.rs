//! Daily trigger entry point.

use std::sync::Arc;

use meetinvite_google::GoogleConfig;
use meetinvite_server::{DailyTrigger, GoogleScheduleService};

use crate::error::CliResult;

/// Runs the daily trigger loop until the process is stopped.
pub async fn run(config: GoogleConfig, recipient: String) -> CliResult<()> {
    let service = Arc::new(GoogleScheduleService::new(config));
    DailyTrigger::new(recipient, service).run().await;
    Ok(())
}
