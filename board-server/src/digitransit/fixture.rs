//! File-backed departure source for working without the live API.
//!
//! Loads a saved stop-times response and serves it as if it had just been
//! fetched. Departure times are taken as-is, so boards built from a fixture
//! shift as the wall clock moves past them.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::DigitransitError;
use super::types::StopsResponse;

/// Serves a saved Digitransit response from disk.
#[derive(Debug, Clone)]
pub struct FixtureClient {
    path: PathBuf,
}

impl FixtureClient {
    /// Create a fixture client, checking that the file parses.
    pub fn new(path: impl AsRef<Path>) -> Result<Self, DigitransitError> {
        let client = Self {
            path: path.as_ref().to_path_buf(),
        };
        client.read()?;
        Ok(client)
    }

    /// Path of the fixture file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the fixture.
    ///
    /// Mirrors `DigitransitClient::fetch_departures`; the file is read on
    /// every call so edits show up on the next refresh.
    pub async fn fetch_departures(&self) -> Result<StopsResponse, DigitransitError> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| DigitransitError::Fixture {
                message: format!("failed to read {}: {e}", self.path.display()),
            })?;
        debug!(path = %self.path.display(), "serving fixture departures");
        parse(&json)
    }

    fn read(&self) -> Result<StopsResponse, DigitransitError> {
        let json = std::fs::read_to_string(&self.path).map_err(|e| DigitransitError::Fixture {
            message: format!("failed to read {}: {e}", self.path.display()),
        })?;
        parse(&json)
    }
}

fn parse(json: &str) -> Result<StopsResponse, DigitransitError> {
    serde_json::from_str(json).map_err(|e| DigitransitError::Json {
        message: e.to_string(),
        body: None,
    })
}
