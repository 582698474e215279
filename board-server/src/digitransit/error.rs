//! Digitransit client error types.

/// Errors from fetching departures.
#[derive(Debug, thiserror::Error)]
pub enum DigitransitError {
    /// Request could not be sent or timed out.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a non-200 status.
    #[error("API error {status}: {message}")]
    Status { status: u16, message: String },

    /// Response did not have the expected shape.
    #[error("JSON parse error: {message}")]
    Json {
        message: String,
        body: Option<String>,
    },

    /// Fixture file could not be read.
    #[error("fixture error: {message}")]
    Fixture { message: String },
}

impl DigitransitError {
    /// Whether the API was simply not reachable or refused the request.
    ///
    /// These are shown as an empty board. Anything else means the data we
    /// got back cannot be trusted and is reported as an error.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            DigitransitError::Http(_) | DigitransitError::Status { .. }
        )
    }
}
