//! Google Calendar API client.
//!
//! A low-level HTTP client for the one Calendar API call this system makes:
//! inserting an event with a conference-creation request attached.

use std::time::Duration;

use meetinvite_core::{MeetingRequest, MeetingResult};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{CalendarError, CalendarResult};

/// Base URL for Google Calendar API v3.
const CALENDAR_API_BASE: &str = "https://www.googleapis.com/calendar/v3";

/// Summary placed on every scheduled event.
pub const EVENT_SUMMARY: &str = "Scheduled Google Meet";

/// Description placed on every scheduled event.
pub const EVENT_DESCRIPTION: &str = "Scheduled via meetinvite";

/// Google Calendar API client.
#[derive(Debug)]
pub struct CalendarClient {
    http_client: reqwest::Client,
    access_token: String,
}

impl CalendarClient {
    /// Creates a new client with the given access token.
    pub fn new(access_token: impl Into<String>, timeout: Duration) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .expect("failed to create HTTP client");

        Self {
            http_client,
            access_token: access_token.into(),
        }
    }

    /// Creates a calendar event with a generated conference link.
    ///
    /// Submits with `conferenceDataVersion=1` so conference data appears in
    /// the response, and `sendUpdates=all` so the attendee receives the email
    /// invite. The provider's rejection message is surfaced verbatim; there
    /// is no retry.
    pub async fn insert_event(
        &self,
        calendar_id: &str,
        request: &MeetingRequest,
    ) -> CalendarResult<MeetingResult> {
        let url = format!(
            "{}/calendars/{}/events",
            CALENDAR_API_BASE,
            urlencoding::encode(calendar_id)
        );

        let payload = EventPayload::from_request(request);
        debug!(
            attendee = %request.attendee,
            start = %request.start,
            request_id = %request.request_id,
            "inserting calendar event"
        );

        let response = self
            .http_client
            .post(&url)
            .bearer_auth(&self.access_token)
            .query(&[("conferenceDataVersion", "1"), ("sendUpdates", "all")])
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CalendarError::network("request timeout")
                } else if e.is_connect() {
                    CalendarError::network(format!("connection failed: {}", e))
                } else {
                    CalendarError::network(format!("request failed: {}", e))
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| CalendarError::network(format!("failed to read response: {}", e)))?;

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(CalendarError::authorization(
                "access token expired or invalid",
            ));
        }

        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(CalendarError::authorization("access denied to calendar"));
        }

        if !status.is_success() {
            return Err(CalendarError::provider(format!(
                "calendar API error ({}): {}",
                status, body
            )));
        }

        let event: InsertedEvent = serde_json::from_str(&body).map_err(|e| {
            CalendarError::invalid_response(format!("failed to parse event response: {}", e))
        })?;

        let result = event.into_result()?;
        info!(event_link = %result.event_link, "calendar event created");
        Ok(result)
    }
}

/// Request body for the events.insert endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventPayload {
    summary: &'static str,
    description: &'static str,
    start: EventDateTime,
    end: EventDateTime,
    attendees: Vec<EventAttendee>,
    conference_data: ConferencePayload,
}

impl EventPayload {
    fn from_request(request: &MeetingRequest) -> Self {
        Self {
            summary: EVENT_SUMMARY,
            description: EVENT_DESCRIPTION,
            start: EventDateTime::utc(request.start),
            end: EventDateTime::utc(request.end()),
            attendees: vec![EventAttendee {
                email: request.attendee.clone(),
            }],
            conference_data: ConferencePayload {
                create_request: ConferenceCreateRequest {
                    request_id: request.request_id.clone(),
                },
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventDateTime {
    date_time: String,
    time_zone: &'static str,
}

impl EventDateTime {
    fn utc(instant: chrono::DateTime<chrono::Utc>) -> Self {
        Self {
            date_time: instant.to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            time_zone: "UTC",
        }
    }
}

#[derive(Debug, Serialize)]
struct EventAttendee {
    email: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConferencePayload {
    create_request: ConferenceCreateRequest,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ConferenceCreateRequest {
    request_id: String,
}

/// Response from the events.insert endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InsertedEvent {
    html_link: Option<String>,
    conference_data: Option<ApiConferenceData>,
}

impl InsertedEvent {
    /// Extracts the event permalink and the video join link, if any.
    ///
    /// A response without a video entry point is a signaled absence of the
    /// meet link, not an error.
    fn into_result(self) -> CalendarResult<MeetingResult> {
        let event_link = self.html_link.ok_or_else(|| {
            CalendarError::invalid_response("event response is missing htmlLink")
        })?;

        let meet_link = self.conference_data.and_then(|cd| {
            cd.entry_points
                .unwrap_or_default()
                .into_iter()
                .find(|ep| ep.entry_point_type == "video")
                .and_then(|ep| ep.uri)
        });

        Ok(MeetingResult {
            event_link,
            meet_link,
        })
    }
}

/// Conference data from the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiConferenceData {
    entry_points: Option<Vec<ApiEntryPoint>>,
}

/// Entry point from the API.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiEntryPoint {
    entry_point_type: String,
    uri: Option<String>,
}
