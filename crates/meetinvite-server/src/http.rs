//! HTTP trigger surface.
//!
//! One endpoint: `POST /api/schedule` with a JSON body of
//! `{email, date, time}`. Validation failures are answered before the
//! scheduling chain is invoked; authorization and provider failures are
//! returned as 500 with the failure message. Cross-origin preflight is
//! answered permissively.

use axum::{
    Json, Router,
    body::Bytes,
    extract::State,
    http::{Method, StatusCode, header},
    response::{IntoResponse, Response},
    routing::post,
};
use meetinvite_core::{MeetingRequest, parse_start};
use serde::Deserialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

use crate::config::ServerConfig;
use crate::error::ServerResult;
use crate::service::SharedScheduleService;

/// Error message for a body that is not valid JSON.
const INVALID_JSON: &str = "Invalid JSON";

/// Error message when any of the required fields is absent.
const MISSING_FIELDS: &str = "Missing required fields: email, date, time";

/// Builds the router for the HTTP surface.
pub fn router(service: SharedScheduleService) -> Router {
    Router::new()
        .route("/api/schedule", post(schedule))
        .layer(cors_layer())
        .with_state(service)
}

/// Binds the listener and serves requests until the task is cancelled.
pub async fn serve(config: &ServerConfig, service: SharedScheduleService) -> ServerResult<()> {
    let listener = TcpListener::bind(&config.bind_addr).await?;
    info!(addr = %config.bind_addr, "HTTP surface listening");
    axum::serve(listener, router(service)).await?;
    Ok(())
}

/// Permissive cross-origin policy: any origin, POST and preflight only.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
}

/// Request body for the schedule endpoint.
///
/// All fields optional so that presence can be checked after JSON parsing;
/// the two failures produce distinct client errors.
#[derive(Debug, Deserialize)]
struct ScheduleBody {
    email: Option<String>,
    date: Option<String>,
    time: Option<String>,
}

/// `POST /api/schedule`
async fn schedule(State(service): State<SharedScheduleService>, body: Bytes) -> Response {
    let body: ScheduleBody = match serde_json::from_slice(&body) {
        Ok(body) => body,
        Err(_) => return ApiError::bad_request(INVALID_JSON).into_response(),
    };

    // Empty strings count as missing, same as absent fields.
    let present = |field: Option<String>| field.filter(|value| !value.is_empty());
    let (Some(email), Some(date), Some(time)) =
        (present(body.email), present(body.date), present(body.time))
    else {
        return ApiError::bad_request(MISSING_FIELDS).into_response();
    };

    let start = match parse_start(&date, &time) {
        Ok(start) => start,
        Err(e) => return ApiError::bad_request(e.to_string()).into_response(),
    };

    let request = MeetingRequest::new(email, start);
    match service.schedule(request).await {
        Ok(result) => {
            info!(event_link = %result.event_link, "meeting scheduled");
            (StatusCode::OK, Json(result)).into_response()
        }
        Err(e) => {
            error!(error = %e, "scheduling failed");
            ApiError::internal(e.message()).into_response()
        }
    }
}

/// A JSON error response: `{"error": message}` with a status code.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }

    fn internal(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({ "error": self.message }));
        (self.status, body).into_response()
    }
}
