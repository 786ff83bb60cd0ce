//! meetinvite CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use meetinvite_cli::cli::{Cli, Command};
use meetinvite_cli::commands;
use meetinvite_cli::error::CliResult;
use meetinvite_core::{TracingConfig, init_tracing};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> CliResult<()> {
    // Long-running surfaces log structured JSON; one-shot commands stay quiet
    // unless --debug is set.
    let tracing_config = match cli.command {
        Command::Serve { .. } | Command::Daily { .. } => TracingConfig::server(),
        _ => TracingConfig::cli(cli.debug),
    };
    init_tracing(tracing_config)?;

    match cli.command {
        Command::Serve { bind, google } => commands::serve::run(google.to_config(), bind).await,
        Command::Daily { recipient, google } => {
            commands::daily::run(google.to_config(), recipient).await
        }
        Command::Auth { force, google } => commands::auth::run(google.to_config(), force).await,
        Command::Schedule {
            email,
            date,
            time,
            google,
        } => commands::schedule::run(google.to_config(), email, &date, &time).await,
    }
}
