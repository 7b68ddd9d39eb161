use std::sync::Arc;

use crate::analysis::ResumeAnalyzer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pipeline instance; its catalog and provider decision were fixed at startup.
    pub analyzer: Arc<ResumeAnalyzer>,
}
