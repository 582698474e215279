//! Departure board assembly.
//!
//! Turns a Digitransit stop-times response into the rows shown on screen:
//! - `time` formats departure seconds as "N min" or "HH:MM"
//! - `normalize` flattens stops into rows, rolling passed times onto the
//!   next day and marking departures without realtime data
//! - `order` groups rows into tram and bus sections, sorted and capped
//! - `load` runs the whole pipeline for one request

mod load;
mod normalize;
mod order;
mod time;

pub use load::{BoardSnapshot, Now, load_board};
pub use normalize::{
    Category, DepartureRow, NOT_REALTIME_GLYPH, Thresholds, normalize, normalize_stops, roll_over,
};
pub use order::{DepartureBoard, order};
pub use time::{SECONDS_PER_DAY, format_label, is_near, seconds_since_midnight};
