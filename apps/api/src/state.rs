use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    /// Pluggable completion client. Default: OpenAiClient. Tests swap in a stub.
    pub llm: Arc<dyn CompletionClient>,
    pub config: Config,
}
