//! HTTP surface entry point.

use std::sync::Arc;

use meetinvite_google::GoogleConfig;
use meetinvite_server::{GoogleScheduleService, ServerConfig, http};

use crate::error::CliResult;

/// Runs the HTTP trigger surface until the process is stopped.
pub async fn run(config: GoogleConfig, bind: String) -> CliResult<()> {
    let service = Arc::new(GoogleScheduleService::new(config));
    let server_config = ServerConfig::new().with_bind_addr(bind);
    http::serve(&server_config, service).await?;
    Ok(())
}
