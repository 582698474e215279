//! Fetch, normalize and order in one step.

use chrono::{DateTime, Local, TimeZone};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::BoardConfig;
use crate::digitransit::{DepartureSource, DigitransitError};

use super::normalize::normalize_stops;
use super::order::{DepartureBoard, order};
use super::time::seconds_since_midnight;

/// The moment a board is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Now {
    /// Unix time in seconds, used for the query start time.
    pub epoch_secs: i64,
    /// Local seconds since midnight, used for labels.
    pub day_secs: i64,
}

impl Now {
    /// The current local time.
    pub fn local() -> Self {
        Self::from_datetime(&Local::now())
    }

    pub fn from_datetime<Tz: TimeZone>(dt: &DateTime<Tz>) -> Self {
        Self {
            epoch_secs: dt.timestamp(),
            day_secs: seconds_since_midnight(dt.time()),
        }
    }

    /// `HH:MM:SS` of the local time.
    pub fn clock(&self) -> String {
        let s = self.day_secs;
        format!("{:02}:{:02}:{:02}", s / 3600, (s % 3600) / 60, s % 60)
    }
}

/// A board plus whether the API could be reached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardSnapshot {
    pub board: DepartureBoard,
    /// False when the fetch failed and the board is empty for that reason.
    pub available: bool,
}

/// Build the board for `now`.
///
/// An unreachable API, a non-200 answer or a timeout gives an empty board
/// marked unavailable. A response with an unexpected shape is returned as an
/// error.
pub async fn load_board(
    source: &DepartureSource,
    config: &BoardConfig,
    now: Now,
) -> Result<BoardSnapshot, DigitransitError> {
    let response = match source
        .fetch(&config.query(), now.epoch_secs, config.start_offset_secs)
        .await
    {
        Ok(response) => response,
        Err(e) if e.is_unavailable() => {
            warn!(error = %e, "departures unavailable, showing empty board");
            return Ok(BoardSnapshot {
                board: DepartureBoard::empty(),
                available: false,
            });
        }
        Err(e) => return Err(e),
    };

    let rows = normalize_stops(&response.data.stops, now.day_secs, config.thresholds);
    let fetched = rows.len();
    let board = order(rows, config.max_departures);

    debug!(fetched, shown = board.len(), "built departure board");

    Ok(BoardSnapshot {
        board,
        available: true,
    })
}
