//! Time-based trigger: one meeting scheduled per day.
//!
//! Fires at 22:30 UTC and schedules a meeting starting tomorrow at 22:30 for
//! a fixed recipient. There is no "already sent today" state beyond the
//! single fire per day, and no retry on failure; the outcome is logged and
//! the loop waits for the next firing.

use chrono::{DateTime, Duration, NaiveTime, Utc};
use meetinvite_core::MeetingRequest;
use tracing::{error, info};

use crate::service::SharedScheduleService;

/// Wall-clock firing time, UTC. Equivalent to the cron expression `30 22 * * *`.
pub const FIRE_HOUR: u32 = 22;

/// Minute component of the firing time.
pub const FIRE_MINUTE: u32 = 30;

/// Returns the next firing instant strictly after `now`.
pub fn next_fire_after(now: DateTime<Utc>) -> DateTime<Utc> {
    let fire_time = NaiveTime::from_hms_opt(FIRE_HOUR, FIRE_MINUTE, 0).unwrap_or(NaiveTime::MIN);

    let today = now.date_naive().and_time(fire_time).and_utc();
    if today > now {
        today
    } else {
        today + Duration::days(1)
    }
}

/// The start instant for a meeting scheduled at `fire`: tomorrow, same time.
pub fn event_start_for(fire: DateTime<Utc>) -> DateTime<Utc> {
    fire + Duration::days(1)
}

/// The daily trigger loop.
pub struct DailyTrigger {
    recipient: String,
    service: SharedScheduleService,
}

impl DailyTrigger {
    /// Creates a trigger inviting `recipient` every day.
    pub fn new(recipient: impl Into<String>, service: SharedScheduleService) -> Self {
        Self {
            recipient: recipient.into(),
            service,
        }
    }

    /// Runs the trigger loop forever.
    pub async fn run(self) {
        info!(
            recipient = %self.recipient,
            "daily trigger started, firing at {:02}:{:02} UTC",
            FIRE_HOUR,
            FIRE_MINUTE
        );

        loop {
            let now = Utc::now();
            let fire = next_fire_after(now);
            let wait = (fire - now).to_std().unwrap_or_default();
            info!(fire = %fire, "sleeping until next firing");
            tokio::time::sleep(wait).await;

            self.fire_once(fire).await;
        }
    }

    /// Runs one firing: schedules tomorrow's meeting and logs the outcome.
    async fn fire_once(&self, fire: DateTime<Utc>) {
        let request = MeetingRequest::new(&self.recipient, event_start_for(fire));
        info!(start = %request.start, "running daily scheduling");

        match self.service.schedule(request).await {
            Ok(result) => {
                info!(
                    event_link = %result.event_link,
                    meet_link = result.meet_link.as_deref().unwrap_or("<none>"),
                    "daily meeting scheduled"
                );
            }
            Err(e) => {
                error!(error = %e, "daily scheduling failed");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn fires_today_before_half_past_ten() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        assert_eq!(
            next_fire_after(now),
            Utc.with_ymd_and_hms(2024, 6, 1, 22, 30, 0).unwrap()
        );
    }

    #[test]
    fn fires_tomorrow_after_half_past_ten() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 23, 0, 0).unwrap();
        assert_eq!(
            next_fire_after(now),
            Utc.with_ymd_and_hms(2024, 6, 2, 22, 30, 0).unwrap()
        );
    }

    #[test]
    fn exact_firing_instant_rolls_to_next_day() {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 22, 30, 0).unwrap();
        assert_eq!(
            next_fire_after(now),
            Utc.with_ymd_and_hms(2024, 6, 2, 22, 30, 0).unwrap()
        );
    }

    #[test]
    fn event_starts_tomorrow_at_firing_time() {
        let fire = Utc.with_ymd_and_hms(2024, 6, 1, 22, 30, 0).unwrap();
        assert_eq!(
            event_start_for(fire),
            Utc.with_ymd_and_hms(2024, 6, 2, 22, 30, 0).unwrap()
        );
    }

    #[test]
    fn month_rollover() {
        let now = Utc.with_ymd_and_hms(2024, 6, 30, 23, 0, 0).unwrap();
        assert_eq!(
            next_fire_after(now),
            Utc.with_ymd_and_hms(2024, 7, 1, 22, 30, 0).unwrap()
        );
    }
}
