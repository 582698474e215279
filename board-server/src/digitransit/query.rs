//! GraphQL query templates for the stop-times request.

use std::fmt;

/// Token replaced with the query start time (epoch seconds).
pub const START_TIME_PLACEHOLDER: &str = "START_TIME_PLACEHOLDER";

/// Error returned when a query template is unusable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid query template: {reason}")]
pub struct InvalidQueryTemplate {
    reason: &'static str,
}

/// A stop-times query with a single start time placeholder.
///
/// # Examples
///
/// ```
/// use board_server::digitransit::QueryTemplate;
///
/// let template = QueryTemplate::for_stops(&["HSL:1130438".to_string()], 13);
/// let query = template.render(1_700_000_000);
/// assert!(query.contains("startTime: 1700000000"));
/// assert!(query.contains("numberOfDepartures: 13"));
/// ```
#[derive(Clone, PartialEq, Eq)]
pub struct QueryTemplate(String);

impl QueryTemplate {
    /// Parse a hand-written template.
    ///
    /// The placeholder must appear exactly once.
    pub fn parse(template: impl Into<String>) -> Result<Self, InvalidQueryTemplate> {
        let template = template.into();
        match template.matches(START_TIME_PLACEHOLDER).count() {
            0 => Err(InvalidQueryTemplate {
                reason: "missing START_TIME_PLACEHOLDER",
            }),
            1 => Ok(Self(template)),
            _ => Err(InvalidQueryTemplate {
                reason: "START_TIME_PLACEHOLDER appears more than once",
            }),
        }
    }

    /// The standard query for a set of stops.
    ///
    /// `departures_per_stop` is passed as `numberOfDepartures`.
    pub fn for_stops(stop_ids: &[String], departures_per_stop: usize) -> Self {
        let ids = stop_ids
            .iter()
            .map(|id| format!("\"{}\"", id.replace('\\', "\\\\").replace('"', "\\\"")))
            .collect::<Vec<_>>()
            .join(", ");

        Self(format!(
            r#"{{
  stops(ids: [{ids}]) {{
    code
    stoptimesWithoutPatterns(startTime: {START_TIME_PLACEHOLDER}, numberOfDepartures: {departures_per_stop}) {{
      realtimeDeparture
      realtime
      trip {{
        route {{
          shortName
          mode
        }}
      }}
      headsign
    }}
  }}
}}"#
        ))
    }

    /// Substitute the start time.
    pub fn render(&self, start_time_epoch_secs: i64) -> String {
        self.0
            .replace(START_TIME_PLACEHOLDER, &start_time_epoch_secs.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for QueryTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "QueryTemplate({} bytes)", self.0.len())
    }
}
