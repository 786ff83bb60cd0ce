//! Core types: meeting requests and results, tracing setup

pub mod meeting;
pub mod tracing;

pub use meeting::{
    MEETING_DURATION_MINUTES, MeetingRequest, MeetingResult, MeetingTimeError, parse_start,
};
pub use tracing::{TracingConfig, TracingError, TracingOutputFormat, init_tracing};
