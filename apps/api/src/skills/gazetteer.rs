//! Gazetteer NER backend: labels phrases from a pattern file.
//!
//! An entity-ruler style recognizer: each pattern is a phrase with a label, matched
//! ASCII case-insensitively on whole words only. Among whole-word hits the leftmost
//! wins, then the longest; a longer phrase that fails the word check never hides a
//! shorter one at the same position.

use std::path::Path;

use aho_corasick::{AhoCorasick, MatchKind};
use serde::Deserialize;

use crate::capability::{read_json, LoadError};
use crate::skills::entities::{NerBackend, NerError, RawEntity};
use crate::skills::matcher::is_whole_word;

#[derive(Debug, Clone, Deserialize)]
pub struct EntityPattern {
    pub label: String,
    pub pattern: String,
}

pub struct GazetteerNer {
    automaton: AhoCorasick,
    labels: Vec<String>,
}

impl GazetteerNer {
    pub fn new(patterns: Vec<EntityPattern>) -> Result<Self, LoadError> {
        let (phrases, labels): (Vec<String>, Vec<String>) = patterns
            .into_iter()
            .filter_map(|p| {
                let phrase = p.pattern.trim().to_string();
                let label = p.label.trim().to_uppercase();
                (!phrase.is_empty() && !label.is_empty()).then_some((phrase, label))
            })
            .unzip();

        if phrases.is_empty() {
            return Err(LoadError::Invalid(
                "gazetteer has no usable patterns".to_string(),
            ));
        }

        let automaton = AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&phrases)
            .map_err(|e| LoadError::Invalid(format!("gazetteer patterns: {e}")))?;

        Ok(Self { automaton, labels })
    }

    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        Self::new(read_json(path)?)
    }

    pub fn pattern_count(&self) -> usize {
        self.labels.len()
    }
}

impl NerBackend for GazetteerNer {
    fn name(&self) -> &str {
        "gazetteer"
    }

    fn process(&self, text: &str) -> Result<Vec<RawEntity>, NerError> {
        let mut hits: Vec<(usize, usize, usize)> = self
            .automaton
            .find_overlapping_iter(text)
            .filter(|m| is_whole_word(text, m.start(), m.end()))
            .map(|m| (m.start(), m.end(), m.pattern().as_usize()))
            .collect();
        // leftmost first, longest first at the same start
        hits.sort_by(|a, b| a.0.cmp(&b.0).then(b.1.cmp(&a.1)));

        let mut entities = Vec::new();
        let mut covered_to = 0;
        for (start, end, pattern) in hits {
            if start < covered_to {
                continue;
            }
            let label = self.labels.get(pattern).ok_or_else(|| {
                NerError::Backend(format!("gazetteer pattern {pattern} has no label"))
            })?;
            entities.push(RawEntity {
                text: text[start..end].to_string(),
                label: label.clone(),
            });
            covered_to = end;
        }
        Ok(entities)
    }
}
