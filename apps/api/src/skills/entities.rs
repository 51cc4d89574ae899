//! Entity Extraction Adapter: normalizes an optional NER backend into candidates.
//!
//! The backend is consumed only through `NerBackend`. `EntityExtractor` never fails:
//! an absent backend or a failed call both produce no candidates.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::capability::Capability;

#[derive(Debug, Error)]
pub enum NerError {
    #[error("NER backend failed: {0}")]
    Backend(String),
}

/// A labelled span exactly as the backend reports it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawEntity {
    pub text: String,
    pub label: String,
}

/// Pluggable named-entity recognizer. Must be shareable across request tasks.
pub trait NerBackend: Send + Sync {
    /// Short identifier for logs and status payloads.
    fn name(&self) -> &str;

    fn process(&self, text: &str) -> Result<Vec<RawEntity>, NerError>;
}

/// A trimmed, non-empty span with its opaque category label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityCandidate {
    pub text: String,
    pub category: String,
}

#[derive(Debug, Clone)]
pub struct EntityExtractor {
    backend: Capability<dyn NerBackend>,
}

impl EntityExtractor {
    pub fn new(backend: Capability<dyn NerBackend>) -> Self {
        Self { backend }
    }

    #[cfg(test)]
    pub fn unavailable() -> Self {
        Self::new(Capability::unavailable("no NER backend"))
    }

    #[cfg(test)]
    pub fn with_backend(backend: std::sync::Arc<dyn NerBackend>) -> Self {
        Self::new(Capability::Available(backend))
    }

    pub fn is_available(&self) -> bool {
        self.backend.is_available()
    }

    pub fn status(&self) -> &'static str {
        self.backend.status()
    }

    pub fn extract_entities(&self, text: &str) -> Vec<EntityCandidate> {
        let Some(backend) = self.backend.get() else {
            return Vec::new();
        };

        match backend.process(text) {
            Ok(entities) => entities
                .into_iter()
                .filter_map(|e| {
                    let span = e.text.trim();
                    (!span.is_empty()).then(|| EntityCandidate {
                        text: span.to_string(),
                        category: e.label,
                    })
                })
                .collect(),
            Err(e) => {
                warn!("{} returned an error, skipping NER candidates: {e}", backend.name());
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::sync::Arc;

    /// Returns a fixed entity list regardless of input.
    pub(crate) struct FixedNer(pub Vec<(&'static str, &'static str)>);

    impl NerBackend for FixedNer {
        fn name(&self) -> &str {
            "fixed"
        }

        fn process(&self, _text: &str) -> Result<Vec<RawEntity>, NerError> {
            Ok(self
                .0
                .iter()
                .map(|(text, label)| RawEntity {
                    text: text.to_string(),
                    label: label.to_string(),
                })
                .collect())
        }
    }

    struct FailingNer;

    impl NerBackend for FailingNer {
        fn name(&self) -> &str {
            "failing"
        }

        fn process(&self, _text: &str) -> Result<Vec<RawEntity>, NerError> {
            Err(NerError::Backend("model crashed".to_string()))
        }
    }

    #[test]
    fn test_unavailable_backend_yields_nothing() {
        let extractor = EntityExtractor::unavailable();
        assert!(!extractor.is_available());
        assert!(extractor.extract_entities("Snowflake at Acme").is_empty());
    }

    #[test]
    fn test_failing_backend_degrades_to_empty() {
        let extractor = EntityExtractor::with_backend(Arc::new(FailingNer));
        assert!(extractor.is_available());
        assert!(extractor.extract_entities("anything").is_empty());
    }

    #[test]
    fn test_spans_are_trimmed_and_blanks_dropped() {
        let extractor = EntityExtractor::with_backend(Arc::new(FixedNer(vec![
            ("  Snowflake ", "PRODUCT"),
            ("   ", "ORG"),
        ])));
        assert_eq!(
            extractor.extract_entities("ignored"),
            vec![EntityCandidate {
                text: "Snowflake".to_string(),
                category: "PRODUCT".to_string(),
            }]
        );
    }
}
