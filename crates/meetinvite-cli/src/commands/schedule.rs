//! One-shot scheduling from the command line.

use meetinvite_core::{MeetingRequest, parse_start};
use meetinvite_google::{GoogleConfig, MeetScheduler, StdinPrompt};

use crate::error::CliResult;

/// Schedules one meeting immediately and prints the resulting links.
///
/// This surface has a terminal, so the interactive OAuth flow is available
/// if no token is stored yet.
pub async fn run(config: GoogleConfig, email: String, date: &str, time: &str) -> CliResult<()> {
    let start = parse_start(date, time)?;
    let request = MeetingRequest::new(email, start);

    let scheduler = MeetScheduler::new(config);
    let result = scheduler.schedule(&request, Some(&StdinPrompt)).await?;

    println!("Event created: {}", result.event_link);
    match result.meet_link {
        Some(link) => println!("Google Meet link: {}", link),
        None => println!("No Google Meet link was returned for this event."),
    }
    Ok(())
}
