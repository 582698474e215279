//! Where board departures come from.

use super::client::DigitransitClient;
use super::error::DigitransitError;
use super::fixture::FixtureClient;
use super::query::QueryTemplate;
use super::types::StopsResponse;

/// Live API or a saved response.
#[derive(Debug, Clone)]
pub enum DepartureSource {
    Live(DigitransitClient),
    Fixture(FixtureClient),
}

impl DepartureSource {
    /// Fetch departures starting `offset_secs` after `now_epoch_secs`.
    ///
    /// Fixture sources ignore the query and start time.
    pub async fn fetch(
        &self,
        template: &QueryTemplate,
        now_epoch_secs: i64,
        offset_secs: i64,
    ) -> Result<StopsResponse, DigitransitError> {
        match self {
            DepartureSource::Live(client) => {
                client
                    .fetch_departures(template, now_epoch_secs, offset_secs)
                    .await
            }
            DepartureSource::Fixture(fixture) => fixture.fetch_departures().await,
        }
    }

    /// Short description for startup logs.
    pub fn describe(&self) -> String {
        match self {
            DepartureSource::Live(_) => "digitransit".to_string(),
            DepartureSource::Fixture(f) => format!("fixture {}", f.path().display()),
        }
    }
}

impl From<DigitransitClient> for DepartureSource {
    fn from(client: DigitransitClient) -> Self {
        DepartureSource::Live(client)
    }
}

impl From<FixtureClient> for DepartureSource {
    fn from(fixture: FixtureClient) -> Self {
        DepartureSource::Fixture(fixture)
    }
}
