use std::sync::Arc;

use crate::config::Config;
use crate::nlp::TextPipeline;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Language pipeline loaded once at startup, shared read-only across requests.
    /// Tests substitute a lightweight stub.
    pub pipeline: Arc<dyn TextPipeline>,
}
