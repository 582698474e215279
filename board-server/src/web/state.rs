//! Application state for the web layer.

use std::sync::Arc;

use crate::board::Now;
use crate::config::BoardConfig;
use crate::digitransit::DepartureSource;

/// Shared application state.
///
/// Immutable after startup; every request builds its own board from it.
#[derive(Clone)]
pub struct AppState {
    /// Where departures are fetched from
    pub source: Arc<DepartureSource>,

    /// Board configuration
    pub config: Arc<BoardConfig>,

    /// Current time, replaceable in tests
    pub clock: fn() -> Now,
}

impl AppState {
    /// Create a new app state reading the local clock.
    pub fn new(source: DepartureSource, config: BoardConfig) -> Self {
        Self {
            source: Arc::new(source),
            config: Arc::new(config),
            clock: Now::local,
        }
    }

    /// Use a different clock.
    pub fn with_clock(mut self, clock: fn() -> Now) -> Self {
        self.clock = clock;
        self
    }
}
