//! Meeting request and result types.
//!
//! A [`MeetingRequest`] describes one calendar event to be created: a single
//! attendee, a start instant, and a fixed 30-minute duration. The request also
//! carries the uniqueness token attached to the conference-creation payload;
//! without it the provider treats rapid successive requests as idempotent
//! retries and returns the same conference.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Every scheduled meeting lasts exactly this long.
pub const MEETING_DURATION_MINUTES: i64 = 30;

/// Errors from parsing user-supplied date/time fields.
#[derive(Debug, Error)]
pub enum MeetingTimeError {
    /// The date field is not a valid `YYYY-MM-DD` date.
    #[error("invalid date {0:?}, expected YYYY-MM-DD")]
    InvalidDate(String),

    /// The time field is not a valid `HH:MM` time.
    #[error("invalid time {0:?}, expected HH:MM")]
    InvalidTime(String),
}

/// A request to schedule one meeting.
#[derive(Debug, Clone)]
pub struct MeetingRequest {
    /// The single attendee to invite.
    pub attendee: String,

    /// When the meeting starts.
    pub start: DateTime<Utc>,

    /// Uniqueness token for the conference-creation request.
    pub request_id: String,
}

impl MeetingRequest {
    /// Creates a request with a fresh timestamp-derived uniqueness token.
    pub fn new(attendee: impl Into<String>, start: DateTime<Utc>) -> Self {
        Self {
            attendee: attendee.into(),
            start,
            request_id: format!("meet-{}", Utc::now().timestamp_millis()),
        }
    }

    /// When the meeting ends: start plus exactly 30 minutes.
    pub fn end(&self) -> DateTime<Utc> {
        self.start + Duration::minutes(MEETING_DURATION_MINUTES)
    }
}

/// The links returned for a successfully scheduled meeting.
///
/// `meet_link` is absent when the provider response carries no video entry
/// point; callers must treat that as a signaled absence, not a failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeetingResult {
    /// Permalink to the calendar event.
    pub event_link: String,

    /// Join link for the generated video conference, if one was returned.
    pub meet_link: Option<String>,
}

/// Parses a `"YYYY-MM-DD"` date and `"HH:MM"` time into a UTC start instant.
pub fn parse_start(date: &str, time: &str) -> Result<DateTime<Utc>, MeetingTimeError> {
    let date_part = NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .map_err(|_| MeetingTimeError::InvalidDate(date.to_string()))?;
    let time_part = NaiveTime::parse_from_str(time, "%H:%M")
        .map_err(|_| MeetingTimeError::InvalidTime(time.to_string()))?;
    Ok(date_part.and_time(time_part).and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn end_is_start_plus_thirty_minutes() {
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 14, 0, 0).unwrap();
        let request = MeetingRequest::new("a@b.com", start);
        assert_eq!(request.end() - request.start, Duration::minutes(30));
        assert_eq!(
            request.end(),
            Utc.with_ymd_and_hms(2024, 6, 1, 14, 30, 0).unwrap()
        );
    }

    #[test]
    fn request_id_has_meet_prefix() {
        let request = MeetingRequest::new("a@b.com", Utc::now());
        assert!(request.request_id.starts_with("meet-"));
        assert!(request.request_id["meet-".len()..].parse::<i64>().is_ok());
    }

    #[test]
    fn parse_valid_start() {
        let start = parse_start("2024-06-01", "14:00").unwrap();
        assert_eq!(start, Utc.with_ymd_and_hms(2024, 6, 1, 14, 0, 0).unwrap());
    }

    #[test]
    fn parse_rejects_bad_date() {
        let err = parse_start("06/01/2024", "14:00").unwrap_err();
        assert!(matches!(err, MeetingTimeError::InvalidDate(_)));
    }

    #[test]
    fn parse_rejects_bad_time() {
        let err = parse_start("2024-06-01", "2pm").unwrap_err();
        assert!(matches!(err, MeetingTimeError::InvalidTime(_)));
    }

    #[test]
    fn result_serializes_with_camel_case_links() {
        let result = MeetingResult {
            event_link: "https://calendar.google.com/event?eid=abc".to_string(),
            meet_link: Some("https://meet.google.com/abc-defg-hij".to_string()),
        };

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(
            json["eventLink"],
            "https://calendar.google.com/event?eid=abc"
        );
        assert_eq!(json["meetLink"], "https://meet.google.com/abc-defg-hij");
    }

    #[test]
    fn absent_meet_link_serializes_as_null() {
        let result = MeetingResult {
            event_link: "https://calendar.google.com/event?eid=abc".to_string(),
            meet_link: None,
        };

        let json = serde_json::to_value(&result).unwrap();
        assert!(json["meetLink"].is_null());
    }
}
