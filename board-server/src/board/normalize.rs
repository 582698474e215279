//! Conversion from Digitransit stop times to board rows.

use serde::Serialize;

use crate::digitransit::{Stop, StopTime};

use super::time::{SECONDS_PER_DAY, format_label, is_near};

/// Glyph shown next to departures that have no realtime data.
pub const NOT_REALTIME_GLYPH: &str = "~";

/// Vehicle categories that get a section on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Tram,
    Bus,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 2] = [Category::Tram, Category::Bus];

    /// Map a Digitransit mode to a category.
    ///
    /// Matching is exact on the upper-case enum value; anything else
    /// (`"RAIL"`, `"SUBWAY"`, `"tram"`) has no category.
    pub fn from_mode(mode: &str) -> Option<Self> {
        match mode {
            "TRAM" => Some(Category::Tram),
            "BUS" => Some(Category::Bus),
            _ => None,
        }
    }

    /// Lower-case key used for CSS classes and JSON.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Tram => "tram",
            Category::Bus => "bus",
        }
    }

    /// Section heading.
    pub fn title(&self) -> &'static str {
        match self {
            Category::Tram => "Trams",
            Category::Bus => "Buses",
        }
    }
}

/// Thresholds used while normalizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thresholds {
    /// Departures within this many minutes show "N min".
    pub near_mins: i64,
    /// Departures within this many minutes are tagged as about to depart.
    pub about_mins: i64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            near_mins: 10,
            about_mins: 5,
        }
    }
}

/// A departure ready for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DepartureRow {
    pub route_short_name: String,
    /// Lower-cased Digitransit mode ("tram", "bus", "rail", ...).
    pub mode: String,
    pub trip_headsign: String,
    pub stop_code: String,
    /// `~` when the time is scheduled only, empty when realtime.
    pub realtime_glyph: &'static str,
    /// "N min" or "HH:MM".
    pub label: String,
    pub near: bool,
    pub about_to_depart: bool,
    /// Departure in seconds since midnight, shifted forward a day when it
    /// had already passed.
    pub departure_seconds: i64,
    /// Board section, if the mode has one.
    #[serde(skip)]
    pub category: Option<Category>,
}

/// Shift a departure that is earlier than now onto the next day.
///
/// # Examples
///
/// ```
/// use board_server::board::roll_over;
///
/// let now = 23 * 3600 + 50 * 60;
/// assert_eq!(roll_over(300, now), 86_700);
/// assert_eq!(roll_over(now + 60, now), now + 60);
/// ```
pub fn roll_over(departure_seconds: i64, now_seconds: i64) -> i64 {
    if departure_seconds < now_seconds {
        departure_seconds + SECONDS_PER_DAY
    } else {
        departure_seconds
    }
}

/// Normalize one stop time at `stop`.
pub fn normalize(
    stop: &Stop,
    stop_time: &StopTime,
    now_seconds: i64,
    thresholds: Thresholds,
) -> DepartureRow {
    let departure_seconds = roll_over(stop_time.realtime_departure, now_seconds);
    let near = is_near(departure_seconds, now_seconds, thresholds.near_mins);
    let about_to_depart = is_near(departure_seconds, now_seconds, thresholds.about_mins);
    let route = &stop_time.trip.route;

    DepartureRow {
        route_short_name: route.short_name.clone(),
        mode: route.mode.to_lowercase(),
        trip_headsign: stop_time.headsign.clone(),
        stop_code: stop.code.clone(),
        realtime_glyph: if stop_time.realtime {
            ""
        } else {
            NOT_REALTIME_GLYPH
        },
        label: format_label(departure_seconds, now_seconds, near),
        near,
        about_to_depart,
        departure_seconds,
        category: Category::from_mode(&route.mode),
    }
}

/// Normalize every stop time of every stop.
pub fn normalize_stops(
    stops: &[Stop],
    now_seconds: i64,
    thresholds: Thresholds,
) -> Vec<DepartureRow> {
    stops
        .iter()
        .flat_map(|stop| {
            stop.stoptimes_without_patterns
                .iter()
                .map(move |st| normalize(stop, st, now_seconds, thresholds))
        })
        .collect()
}
