//! JSON response types.

use serde::Serialize;

use crate::board::{BoardSnapshot, Category, DepartureRow};

/// Response for `/api/departures`.
#[derive(Debug, Serialize)]
pub struct DeparturesResponse {
    /// False when the transit API could not be reached
    pub available: bool,

    /// Local time the board was built, HH:MM:SS
    pub generated_at: String,

    /// One entry per category, in display order
    pub sections: Vec<SectionResult>,
}

impl DeparturesResponse {
    pub fn from_snapshot(snapshot: &BoardSnapshot, generated_at: impl Into<String>) -> Self {
        Self {
            available: snapshot.available,
            generated_at: generated_at.into(),
            sections: Category::ALL
                .iter()
                .map(|&category| SectionResult {
                    category,
                    departures: snapshot
                        .board
                        .section(category)
                        .iter()
                        .map(DepartureResult::from_row)
                        .collect(),
                })
                .collect(),
        }
    }
}

/// A board section.
#[derive(Debug, Serialize)]
pub struct SectionResult {
    pub category: Category,
    pub departures: Vec<DepartureResult>,
}

/// A departure on the board.
#[derive(Debug, Serialize)]
pub struct DepartureResult {
    /// Line number
    pub route_short_name: String,

    /// Lower-case vehicle mode
    pub mode: String,

    /// Destination shown on the vehicle
    pub trip_headsign: String,

    /// Stop the departure leaves from
    pub stop_code: String,

    /// Whether the time comes from live vehicle data
    pub realtime: bool,

    /// "N min" or "HH:MM"
    pub label: String,

    pub near: bool,
    pub about_to_depart: bool,

    /// Seconds since midnight, past 86400 for next-day departures
    pub departure_seconds: i64,
}

impl DepartureResult {
    pub fn from_row(row: &DepartureRow) -> Self {
        Self {
            route_short_name: row.route_short_name.clone(),
            mode: row.mode.clone(),
            trip_headsign: row.trip_headsign.clone(),
            stop_code: row.stop_code.clone(),
            realtime: row.realtime_glyph.is_empty(),
            label: row.label.clone(),
            near: row.near,
            about_to_depart: row.about_to_depart,
            departure_seconds: row.departure_seconds,
        }
    }
}

/// Error body for JSON endpoints.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::order;

    #[test]
    fn serializes_sections_in_display_order() {
        let row = DepartureRow {
            route_short_name: "55".into(),
            mode: "bus".into(),
            trip_headsign: "Koskela".into(),
            stop_code: "H0301".into(),
            realtime_glyph: "~",
            label: "3 min".into(),
            near: true,
            about_to_depart: true,
            departure_seconds: 36_180,
            category: Some(Category::Bus),
        };
        let snapshot = BoardSnapshot {
            board: order(vec![row], 13),
            available: true,
        };

        let json = serde_json::to_value(DeparturesResponse::from_snapshot(&snapshot, "10:00:00"))
            .unwrap();

        assert_eq!(json["available"], true);
        assert_eq!(json["sections"][0]["category"], "tram");
        assert_eq!(json["sections"][0]["departures"].as_array().unwrap().len(), 0);
        assert_eq!(json["sections"][1]["category"], "bus");
        let dep = &json["sections"][1]["departures"][0];
        assert_eq!(dep["route_short_name"], "55");
        assert_eq!(dep["realtime"], false);
        assert_eq!(dep["label"], "3 min");
    }
}
