use std::sync::Arc;

use crate::config::Config;
use crate::screening::skills::SkillVocabulary;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Skill vocabulary loaded once at startup. Requests may override it per call.
    pub vocabulary: Arc<SkillVocabulary>,
    /// Fallback job description for requests that omit `jd_text`.
    pub sample_jd: Option<Arc<str>>,
}
