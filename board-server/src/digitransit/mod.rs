//! Digitransit routing API client.
//!
//! This module queries the Digitransit GraphQL API for upcoming departures
//! at a fixed set of stops.
//!
//! Key characteristics of the API:
//! - Departure times are seconds since the start of the service day, so
//!   after-midnight trips of the current service day are >= 86400
//! - `realtimeDeparture` falls back to the scheduled time when `realtime`
//!   is false
//! - The request is a POST whose body wraps the GraphQL query text

mod client;
mod error;
mod fixture;
mod query;
mod source;
mod types;

pub use client::{DEFAULT_BASE_URL, DigitransitClient, DigitransitConfig};
pub use error::DigitransitError;
pub use fixture::FixtureClient;
pub use query::{InvalidQueryTemplate, QueryTemplate, START_TIME_PLACEHOLDER};
pub use source::DepartureSource;
pub use types::{Route, Stop, StopTime, StopsData, StopsResponse, Trip};
