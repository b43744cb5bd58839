use std::sync::Arc;

use crate::config::Config;
use crate::scoring::engine::FitScoreEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Stateless between requests; shared without locks.
    pub engine: Arc<FitScoreEngine>,
    pub config: Config,
}
