//! Digitransit GraphQL response DTOs.
//!
//! These types map directly to the JSON returned for the stop-times query.
//! Digitransit sends `null` for some identifiers (stop codes on unsignposted
//! stops, short names on some replacement buses), so those fields default to
//! an empty string rather than failing the whole board.

use serde::{Deserialize, Deserializer, Serialize};

/// Top-level GraphQL response envelope.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StopsResponse {
    pub data: StopsData,
}

impl StopsResponse {
    /// Number of stop times across all stops.
    pub fn stop_time_count(&self) -> usize {
        self.data
            .stops
            .iter()
            .map(|s| s.stoptimes_without_patterns.len())
            .sum()
    }
}

/// The `data` object of the response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct StopsData {
    /// One entry per requested stop id. Unknown ids come back as `null`.
    #[serde(deserialize_with = "skip_null_stops")]
    pub stops: Vec<Stop>,
}

/// A stop and its upcoming departures.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stop {
    /// Passenger-facing stop code, e.g. "H0301".
    #[serde(default, deserialize_with = "null_as_empty")]
    pub code: String,

    /// Departures from this stop, ordered by the API.
    pub stoptimes_without_patterns: Vec<StopTime>,
}

/// A single departure from a stop.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StopTime {
    /// Realtime (or scheduled, when no realtime data exists) departure in
    /// seconds since the start of the service day.
    pub realtime_departure: i64,

    /// Whether `realtime_departure` comes from live vehicle data.
    pub realtime: bool,

    pub trip: Trip,

    /// Destination shown on the vehicle.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub headsign: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Trip {
    pub route: Route,
}

/// Route the trip runs on.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Route {
    /// Line number, e.g. "2" or "550".
    #[serde(default, deserialize_with = "null_as_empty")]
    pub short_name: String,

    /// Vehicle mode as an upper-case enum value: "TRAM", "BUS", "RAIL", ...
    pub mode: String,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn skip_null_stops<'de, D>(deserializer: D) -> Result<Vec<Stop>, D::Error>
where
    D: Deserializer<'de>,
{
    let stops = Vec::<Option<Stop>>::deserialize(deserializer)?;
    Ok(stops.into_iter().flatten().collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "data": {
            "stops": [
                {
                    "code": "H0301",
                    "lat": 60.1687,
                    "lon": 24.9310,
                    "stoptimesWithoutPatterns": [
                        {
                            "realtimeDeparture": 36300,
                            "realtime": true,
                            "trip": { "route": { "shortName": "2", "mode": "TRAM" } },
                            "headsign": "Olympiaterminaali"
                        }
                    ]
                }
            ]
        }
    }"#;

    #[test]
    fn parses_stop_times() {
        let response: StopsResponse = serde_json::from_str(SAMPLE).unwrap();
        assert_eq!(response.data.stops.len(), 1);

        let stop = &response.data.stops[0];
        assert_eq!(stop.code, "H0301");

        let st = &stop.stoptimes_without_patterns[0];
        assert_eq!(st.realtime_departure, 36300);
        assert!(st.realtime);
        assert_eq!(st.trip.route.short_name, "2");
        assert_eq!(st.trip.route.mode, "TRAM");
        assert_eq!(st.headsign, "Olympiaterminaali");
        assert_eq!(response.stop_time_count(), 1);
    }

    #[test]
    fn null_identifiers_become_empty() {
        let json = r#"{
            "data": {
                "stops": [
                    null,
                    {
                        "code": null,
                        "stoptimesWithoutPatterns": [
                            {
                                "realtimeDeparture": 100,
                                "realtime": false,
                                "trip": { "route": { "shortName": null, "mode": "BUS" } },
                                "headsign": null
                            }
                        ]
                    }
                ]
            }
        }"#;

        let response: StopsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.data.stops.len(), 1);

        let stop = &response.data.stops[0];
        assert_eq!(stop.code, "");
        assert_eq!(stop.stoptimes_without_patterns[0].trip.route.short_name, "");
        assert_eq!(stop.stoptimes_without_patterns[0].headsign, "");
    }

    #[test]
    fn missing_data_is_an_error() {
        let json = r#"{ "errors": [ { "message": "Syntax Error" } ] }"#;
        assert!(serde_json::from_str::<StopsResponse>(json).is_err());
    }

    #[test]
    fn missing_departure_time_is_an_error() {
        let json = r#"{
            "data": { "stops": [ { "code": "H1", "stoptimesWithoutPatterns": [
                { "realtime": true, "trip": { "route": { "shortName": "2", "mode": "TRAM" } }, "headsign": "X" }
            ] } ] }
        }"#;
        assert!(serde_json::from_str::<StopsResponse>(json).is_err());
    }
}
