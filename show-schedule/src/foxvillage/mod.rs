//! Fox Village show API access.
//!
//! This module provides an HTTP client for the public Fox Village show
//! pages, which expose the rider roster, class list and per-rider ride
//! times of a horse show as JSON.
//!
//! Key characteristics of the API:
//! - Responses are not guaranteed to be JSON; error pages come back as
//!   HTML with a 200 status, so every fetch yields a tagged [`Payload`]
//! - Rider names and class numbers are wrapped in HTML fragments
//!   (`<a ...>Jane Doe</a>`)
//! - Each collection lives under a single top-level key

mod client;
mod error;
mod mock;
mod payload;
mod types;

pub use client::{ShowClient, ShowClientConfig};
pub use error::FetchError;
pub use mock::MockShowSource;
pub use payload::{MalformedPayload, Payload};
pub use types::{
    CLASS_DATA_KEY, ClassRecord, RIDER_DATA_KEY, RIDER_PAGE_DATA_KEY, RawScheduleEntry,
    RosterEntry,
};

/// Source of raw show payloads.
///
/// This abstraction allows the schedule assembler to be tested with
/// canned responses instead of live HTTP requests.
pub trait ShowSource {
    /// Fetch the rider roster of a show (`{ riderData: [...] }`).
    fn roster(&self, show_id: u64) -> impl Future<Output = Result<Payload, FetchError>> + Send;

    /// Fetch the class list of a show (`{ classData: [...] }`).
    fn classes(&self, show_id: u64) -> impl Future<Output = Result<Payload, FetchError>> + Send;

    /// Fetch one rider's ride times (`{ riderPageData: [...] }`).
    fn rider_schedule(
        &self,
        show_id: u64,
        rider_id: i64,
    ) -> impl Future<Output = Result<Payload, FetchError>> + Send;
}
