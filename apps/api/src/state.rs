use std::sync::Arc;

use crate::capability::Capability;
use crate::classifier::RoleClassifier;
use crate::config::Config;
use crate::skills::extractor::SkillExtractor;
use crate::skills::fit_scoring::FitScorer;

/// Shared application state injected into all route handlers via Axum extractors.
/// Everything here is built once in `main` and read-only afterwards.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Rule-based matcher plus the optional NER backend.
    pub extractor: Arc<SkillExtractor>,
    /// Pluggable fit scorer. Default: SkillSetScorer.
    pub fit_scorer: Arc<dyn FitScorer>,
    pub role_classifier: Capability<dyn RoleClassifier>,
}
