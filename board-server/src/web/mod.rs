//! Web layer for the departure board.
//!
//! Serves the board page, the departures fragment it refreshes every
//! minute, and a JSON view of the same board.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::{ApiError, AppError, create_router};
pub use state::AppState;
pub use templates::*;
