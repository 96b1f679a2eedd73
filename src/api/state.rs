use std::sync::Arc;
use tokio::sync::RwLock;

use crate::config::AppConfig;
use crate::engine::Table;

/// Shared application state passed to all handlers via Axum's State extractor.
///
/// The table lock serializes every bid/tricks submission, so each list is
/// always applied against the seating of the game that is current when the
/// write lock is taken.
pub struct AppState {
    pub table: RwLock<Table>,
    pub config: AppConfig,
    pub start_time: std::time::Instant,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: AppConfig) -> SharedState {
        Arc::new(AppState {
            table: RwLock::new(Table::new()),
            config,
            start_time: std::time::Instant::now(),
        })
    }
}
