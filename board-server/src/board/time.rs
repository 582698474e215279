//! Departure time labels.
//!
//! Digitransit reports departures as integer seconds since the start of the
//! service day. Following GTFS, times past midnight that still belong to the
//! query day's service are encoded as values >= 86400. This module turns
//! those integers into the labels shown on the board.

use chrono::Timelike;

/// Number of seconds in a service day.
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Seconds since local midnight for a wall-clock time.
///
/// # Examples
///
/// ```
/// use board_server::board::seconds_since_midnight;
/// use chrono::NaiveTime;
///
/// let t = NaiveTime::from_hms_opt(1, 2, 3).unwrap();
/// assert_eq!(seconds_since_midnight(t), 3723);
/// ```
pub fn seconds_since_midnight(time: impl Timelike) -> i64 {
    i64::from(time.num_seconds_from_midnight())
}

/// Whether a departure is within `limit_minutes` of now.
///
/// The comparison is inclusive: a departure exactly `limit_minutes` away is
/// near. Departures already in the past are always near.
///
/// # Examples
///
/// ```
/// use board_server::board::is_near;
///
/// let now = 36_000; // 10:00:00
/// assert!(is_near(now + 600, now, 10));
/// assert!(!is_near(now + 601, now, 10));
/// ```
pub fn is_near(time_seconds: i64, now_seconds: i64, limit_minutes: i64) -> bool {
    // (t - now) / 60 <= limit, kept in integers to avoid rounding.
    time_seconds.saturating_sub(now_seconds) <= limit_minutes.saturating_mul(60)
}

/// Format a departure as either minutes remaining or a clock time.
///
/// Near departures render as `"<N> min"`, with N truncated toward zero
/// (4 min 59 s shows as `"4 min"`). Other departures render as zero-padded
/// `"HH:MM"` after folding next-day values back onto the 24 hour clock.
///
/// # Examples
///
/// ```
/// use board_server::board::format_label;
///
/// assert_eq!(format_label(90_000, 0, false), "01:00");
/// assert_eq!(format_label(36_300, 36_000, true), "5 min");
/// ```
pub fn format_label(time_seconds: i64, now_seconds: i64, near: bool) -> String {
    if near {
        // Minutes are taken from the unfolded value so a departure just past
        // midnight still counts forward from a late-evening `now`.
        let minutes = (time_seconds - now_seconds) / 60;
        return format!("{minutes} min");
    }

    let clock = if time_seconds >= SECONDS_PER_DAY {
        time_seconds - SECONDS_PER_DAY
    } else {
        time_seconds
    };

    let hours = clock / 3600;
    let minutes = (clock % 3600) / 60;
    format!("{hours:02}:{minutes:02}")
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Raising the limit never turns a near departure into a far one.
        #[test]
        fn is_near_is_monotonic_in_limit(
            time in 0i64..2 * SECONDS_PER_DAY,
            now in 0i64..SECONDS_PER_DAY,
            limit in 0i64..240,
            extra in 0i64..240,
        ) {
            if is_near(time, now, limit) {
                prop_assert!(is_near(time, now, limit + extra));
            }
        }

        /// Clock labels are always a valid HH:MM on the 24 hour clock.
        #[test]
        fn clock_label_is_well_formed(time in 0i64..2 * SECONDS_PER_DAY) {
            let label = format_label(time, 0, false);
            prop_assert_eq!(label.len(), 5);
            let (hours, minutes) = label.split_once(':').unwrap();
            prop_assert!(hours.parse::<u32>().unwrap() < 24);
            prop_assert!(minutes.parse::<u32>().unwrap() < 60);
        }

        /// Near labels agree with the threshold they were classified by.
        #[test]
        fn near_label_never_exceeds_limit(
            offset in 0i64..3600,
            now in 0i64..SECONDS_PER_DAY,
            limit in 0i64..60,
        ) {
            let time = now + offset;
            if is_near(time, now, limit) {
                let label = format_label(time, now, true);
                let minutes: i64 = label.trim_end_matches(" min").parse().unwrap();
                prop_assert!(minutes <= limit);
            }
        }
    }
}
