//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use meetinvite_google::{CredentialSource, GoogleConfig};

/// meetinvite - schedule Google Calendar events with Meet links
#[derive(Debug, Parser)]
#[command(name = "meetinvite")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug output
    #[arg(long, short = 'v')]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP trigger surface
    Serve {
        /// Address to bind the HTTP listener to
        #[arg(long, default_value = meetinvite_server::ServerConfig::DEFAULT_BIND_ADDR)]
        bind: String,

        #[command(flatten)]
        google: GoogleArgs,
    },

    /// Run the daily trigger loop (fires at 22:30 UTC)
    Daily {
        /// Recipient invited every day
        #[arg(long, env = "MEETINVITE_RECIPIENT")]
        recipient: String,

        #[command(flatten)]
        google: GoogleArgs,
    },

    /// Run the interactive OAuth authorization and store the token
    Auth {
        /// Re-authorize even if a token is already stored
        #[arg(long)]
        force: bool,

        #[command(flatten)]
        google: GoogleArgs,
    },

    /// Schedule one meeting immediately
    Schedule {
        /// Attendee email address
        #[arg(long)]
        email: String,

        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        date: String,

        /// Start time (HH:MM)
        #[arg(long)]
        time: String,

        #[command(flatten)]
        google: GoogleArgs,
    },
}

/// Credential and token location flags shared by all subcommands.
#[derive(Debug, Args)]
pub struct GoogleArgs {
    /// Path to a credentials JSON file; without it, credentials are resolved
    /// from GOOGLE_* environment variables
    #[arg(long, env = "MEETINVITE_CREDENTIALS")]
    pub credentials_file: Option<PathBuf>,

    /// Path to the stored OAuth token
    #[arg(long, env = "MEETINVITE_TOKEN")]
    pub token_path: Option<PathBuf>,
}

impl GoogleArgs {
    /// Builds the scheduling-chain configuration from these flags.
    pub fn to_config(&self) -> GoogleConfig {
        let source = match &self.credentials_file {
            Some(path) => CredentialSource::File(path.clone()),
            None => CredentialSource::Environment,
        };

        let mut config = GoogleConfig::new(source);
        if let Some(ref path) = self.token_path {
            config = config.with_token_path(path);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_schedule_command() {
        let cli = Cli::parse_from([
            "meetinvite",
            "schedule",
            "--email",
            "a@b.com",
            "--date",
            "2024-06-01",
            "--time",
            "14:00",
        ]);

        match cli.command {
            Command::Schedule {
                email, date, time, ..
            } => {
                assert_eq!(email, "a@b.com");
                assert_eq!(date, "2024-06-01");
                assert_eq!(time, "14:00");
            }
            _ => panic!("expected schedule command"),
        }
    }

    #[test]
    fn serve_has_default_bind() {
        let cli = Cli::parse_from(["meetinvite", "serve"]);
        match cli.command {
            Command::Serve { bind, .. } => assert_eq!(bind, "127.0.0.1:5000"),
            _ => panic!("expected serve command"),
        }
    }

    #[test]
    fn google_args_select_file_source() {
        let cli = Cli::parse_from([
            "meetinvite",
            "serve",
            "--credentials-file",
            "/etc/meetinvite/credentials.json",
        ]);
        let Command::Serve { google, .. } = cli.command else {
            panic!("expected serve command");
        };

        let config = google.to_config();
        match config.source {
            CredentialSource::File(path) => {
                assert_eq!(path, PathBuf::from("/etc/meetinvite/credentials.json"));
            }
            CredentialSource::Environment => panic!("expected file source"),
        }
    }

    #[test]
    fn google_args_default_to_environment_source() {
        let cli = Cli::parse_from(["meetinvite", "serve"]);
        let Command::Serve { google, .. } = cli.command else {
            panic!("expected serve command");
        };

        assert!(matches!(
            google.to_config().source,
            CredentialSource::Environment
        ));
    }
}
