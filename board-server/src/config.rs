//! Board configuration.
//!
//! All settings are fixed at startup and passed explicitly to the fetch,
//! normalize and order steps. `BoardConfig::from_env` reads them from
//! environment variables; anything unset keeps its default.

use std::net::SocketAddr;
use std::path::PathBuf;

use crate::board::Thresholds;
use crate::digitransit::{DigitransitConfig, InvalidQueryTemplate, QueryTemplate};

/// Stops shown by default (Kauppatori bus and tram stops, Helsinki).
const DEFAULT_STOP_IDS: [&str; 2] = ["HSL:1130438", "HSL:1130110"];

/// Thresholds longer than a day would mark every row near.
const MAX_LIMIT_MINS: i64 = 24 * 60;

/// The query start may be pushed at most a day ahead.
const MAX_START_OFFSET_SECS: i64 = 86_400;

/// Errors reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A variable was set to something unusable.
    #[error("invalid value for {key}: {message}")]
    Invalid { key: &'static str, message: String },

    /// The custom query file could not be read.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The custom query file is not a usable template.
    #[error("{}: {source}", path.display())]
    Query {
        path: PathBuf,
        #[source]
        source: InvalidQueryTemplate,
    },
}

/// Configuration for the departure board.
#[derive(Debug, Clone)]
pub struct BoardConfig {
    /// Address the HTTP server listens on.
    pub bind_addr: SocketAddr,

    /// Directory served under `/static`.
    pub static_dir: PathBuf,

    /// Only departures at least this many seconds from now are requested.
    pub start_offset_secs: i64,

    /// Maximum rows per board section. Also requested per stop.
    pub max_departures: usize,

    /// Near / about-to-depart thresholds.
    pub thresholds: Thresholds,

    /// GTFS stop ids to query.
    pub stop_ids: Vec<String>,

    /// Hand-written query replacing the generated one.
    pub custom_query: Option<QueryTemplate>,

    /// Digitransit endpoint settings.
    pub digitransit: DigitransitConfig,

    /// Serve this saved response instead of calling the API.
    pub fixture: Option<PathBuf>,
}

impl BoardConfig {
    /// Read configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read configuration through `lookup`, which maps variable names to
    /// values.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(v) = get("BOARD_BIND_ADDR") {
            config.bind_addr = parse("BOARD_BIND_ADDR", &v)?;
        }
        if let Some(v) = get("BOARD_STATIC_DIR") {
            config.static_dir = PathBuf::from(v);
        }
        if let Some(v) = get("BOARD_START_OFFSET_SECS") {
            config.start_offset_secs =
                parse_in_range("BOARD_START_OFFSET_SECS", &v, 0, MAX_START_OFFSET_SECS)?;
        }
        if let Some(v) = get("BOARD_MAX_DEPARTURES") {
            config.max_departures = parse("BOARD_MAX_DEPARTURES", &v)?;
            if config.max_departures == 0 {
                return Err(ConfigError::Invalid {
                    key: "BOARD_MAX_DEPARTURES",
                    message: "must be at least 1".to_string(),
                });
            }
        }
        if let Some(v) = get("BOARD_NEAR_LIMIT_MINS") {
            config.thresholds.near_mins =
                parse_in_range("BOARD_NEAR_LIMIT_MINS", &v, 0, MAX_LIMIT_MINS)?;
        }
        if let Some(v) = get("BOARD_ABOUT_LIMIT_MINS") {
            config.thresholds.about_mins =
                parse_in_range("BOARD_ABOUT_LIMIT_MINS", &v, 0, MAX_LIMIT_MINS)?;
        }
        if let Some(v) = get("BOARD_STOP_IDS") {
            config.stop_ids = v
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(String::from)
                .collect();
            if config.stop_ids.is_empty() {
                return Err(ConfigError::Invalid {
                    key: "BOARD_STOP_IDS",
                    message: "no stop ids given".to_string(),
                });
            }
        }
        if let Some(v) = get("BOARD_QUERY_FILE") {
            config.custom_query = Some(load_query(PathBuf::from(v))?);
        }
        if let Some(v) = get("DIGITRANSIT_URL") {
            config.digitransit.base_url = v;
        }
        if let Some(v) = get("DIGITRANSIT_TIMEOUT_SECS") {
            config.digitransit.timeout_secs = parse("DIGITRANSIT_TIMEOUT_SECS", &v)?;
        }
        if let Some(v) = get("BOARD_FIXTURE") {
            config.fixture = Some(PathBuf::from(v));
        }

        Ok(config)
    }

    /// Set the stops to query.
    pub fn with_stop_ids<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.stop_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Set the per-section row limit.
    pub fn with_max_departures(mut self, n: usize) -> Self {
        self.max_departures = n;
        self
    }

    /// Set the start time offset.
    pub fn with_start_offset(mut self, secs: i64) -> Self {
        self.start_offset_secs = secs;
        self
    }

    /// Set the near / about-to-depart thresholds.
    pub fn with_thresholds(mut self, near_mins: i64, about_mins: i64) -> Self {
        self.thresholds = Thresholds {
            near_mins,
            about_mins,
        };
        self
    }

    /// Set the Digitransit endpoint (for testing).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.digitransit.base_url = url.into();
        self
    }

    /// The query to send: the custom one if configured, else one generated
    /// from the stop ids.
    pub fn query(&self) -> QueryTemplate {
        self.custom_query
            .clone()
            .unwrap_or_else(|| QueryTemplate::for_stops(&self.stop_ids, self.max_departures))
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            static_dir: PathBuf::from("static"),
            start_offset_secs: 180,
            max_departures: 13,
            thresholds: Thresholds::default(),
            stop_ids: DEFAULT_STOP_IDS.iter().map(|s| s.to_string()).collect(),
            custom_query: None,
            digitransit: DigitransitConfig::default(),
            fixture: None,
        }
    }
}

fn parse<T>(key: &'static str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        key,
        message: format!("{value:?}: {e}"),
    })
}

fn parse_in_range(key: &'static str, value: &str, min: i64, max: i64) -> Result<i64, ConfigError> {
    let n: i64 = parse(key, value)?;
    if !(min..=max).contains(&n) {
        return Err(ConfigError::Invalid {
            key,
            message: format!("{n} is outside {min}..={max}"),
        });
    }
    Ok(n)
}

fn load_query(path: PathBuf) -> Result<QueryTemplate, ConfigError> {
    let text = std::fs::read_to_string(&path).map_err(|source| ConfigError::Io {
        path: path.clone(),
        source,
    })?;
    QueryTemplate::parse(text).map_err(|source| ConfigError::Query { path, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn default_config() {
        let config = BoardConfig::default();

        assert_eq!(config.bind_addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(config.start_offset_secs, 180);
        assert_eq!(config.max_departures, 13);
        assert_eq!(config.thresholds.near_mins, 10);
        assert_eq!(config.thresholds.about_mins, 5);
        assert_eq!(config.stop_ids, vec!["HSL:1130438", "HSL:1130110"]);
        assert!(config.custom_query.is_none());
        assert!(config.fixture.is_none());
    }

    #[test]
    fn empty_environment_gives_defaults() {
        let config = BoardConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.max_departures, 13);
        assert_eq!(config.start_offset_secs, 180);
    }

    #[test]
    fn reads_overrides() {
        let config = BoardConfig::from_lookup(lookup(&[
            ("BOARD_BIND_ADDR", "0.0.0.0:8080"),
            ("BOARD_START_OFFSET_SECS", "60"),
            ("BOARD_MAX_DEPARTURES", "8"),
            ("BOARD_NEAR_LIMIT_MINS", "15"),
            ("BOARD_ABOUT_LIMIT_MINS", "3"),
            ("BOARD_STOP_IDS", "HSL:1, HSL:2 ,,"),
            ("DIGITRANSIT_URL", "http://localhost:9999/graphql"),
            ("DIGITRANSIT_TIMEOUT_SECS", "2"),
            ("BOARD_FIXTURE", "data/sample_departures.json"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(config.start_offset_secs, 60);
        assert_eq!(config.max_departures, 8);
        assert_eq!(config.thresholds.near_mins, 15);
        assert_eq!(config.thresholds.about_mins, 3);
        assert_eq!(config.stop_ids, vec!["HSL:1", "HSL:2"]);
        assert_eq!(config.digitransit.base_url, "http://localhost:9999/graphql");
        assert_eq!(config.digitransit.timeout_secs, 2);
        assert_eq!(
            config.fixture,
            Some(PathBuf::from("data/sample_departures.json"))
        );
    }

    #[test]
    fn rejects_bad_numbers() {
        let err = BoardConfig::from_lookup(lookup(&[("BOARD_MAX_DEPARTURES", "lots")])).unwrap_err();
        assert!(err.to_string().contains("BOARD_MAX_DEPARTURES"));

        let err = BoardConfig::from_lookup(lookup(&[("BOARD_MAX_DEPARTURES", "0")])).unwrap_err();
        assert!(err.to_string().contains("at least 1"));
    }

    #[test]
    fn rejects_out_of_range_thresholds() {
        let huge = i64::MAX.to_string();
        for key in ["BOARD_NEAR_LIMIT_MINS", "BOARD_ABOUT_LIMIT_MINS"] {
            let err = BoardConfig::from_lookup(lookup(&[(key, huge.as_str())])).unwrap_err();
            assert!(matches!(err, ConfigError::Invalid { key: k, .. } if k == key));

            let err = BoardConfig::from_lookup(lookup(&[(key, "-1")])).unwrap_err();
            assert!(err.to_string().contains("outside 0..=1440"));
        }

        let config = BoardConfig::from_lookup(lookup(&[
            ("BOARD_NEAR_LIMIT_MINS", "1440"),
            ("BOARD_ABOUT_LIMIT_MINS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.thresholds.near_mins, 1440);
        assert_eq!(config.thresholds.about_mins, 0);
    }

    #[test]
    fn rejects_out_of_range_start_offset() {
        let err = BoardConfig::from_lookup(lookup(&[(
            "BOARD_START_OFFSET_SECS",
            "9223372036854775807",
        )]))
        .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "BOARD_START_OFFSET_SECS",
                ..
            }
        ));

        let err =
            BoardConfig::from_lookup(lookup(&[("BOARD_START_OFFSET_SECS", "-5")])).unwrap_err();
        assert!(err.to_string().contains("outside 0..=86400"));
    }

    #[test]
    fn rejects_empty_stop_list() {
        let err = BoardConfig::from_lookup(lookup(&[("BOARD_STOP_IDS", " , ")])).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "BOARD_STOP_IDS",
                ..
            }
        ));
    }

    #[test]
    fn generated_query_uses_stops_and_limit() {
        let config = BoardConfig::default()
            .with_stop_ids(["HSL:1"])
            .with_max_departures(4);
        let query = config.query().render(0);

        assert!(query.contains(r#"stops(ids: ["HSL:1"])"#));
        assert!(query.contains("numberOfDepartures: 4"));
    }

    #[test]
    fn custom_query_file_replaces_generated_query() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ stops(startTime: START_TIME_PLACEHOLDER) }}").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let config = BoardConfig::from_lookup(lookup(&[("BOARD_QUERY_FILE", path.as_str())])).unwrap();

        assert_eq!(config.query().render(5), "{ stops(startTime: 5) }");
    }

    #[test]
    fn custom_query_without_placeholder_is_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{ stops {{ code }} }}").unwrap();
        let path = file.path().to_string_lossy().to_string();

        let err = BoardConfig::from_lookup(lookup(&[("BOARD_QUERY_FILE", path.as_str())])).unwrap_err();
        assert!(matches!(err, ConfigError::Query { .. }));
    }

    #[test]
    fn missing_query_file_is_rejected() {
        let err = BoardConfig::from_lookup(lookup(&[(
            "BOARD_QUERY_FILE",
            "/nonexistent/query.graphql",
        )]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
