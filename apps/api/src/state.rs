use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::LlmBackend;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Read-only after startup: every request is a pure function of its body.
#[derive(Clone)]
pub struct AppState {
    /// `None` when no API key is configured; model-backed routes answer 503.
    pub llm: Option<Arc<dyn LlmBackend>>,
    pub config: Config,
}
