//! Skill Extraction Pipeline: the single entry point from raw text to skills.
//!
//! Flow:
//! 1. lowercase the input once
//! 2. rule-based matcher → trusted canonical skills
//! 3. NER candidates (if a backend is available) → exclusion rules → alias lookup,
//!    falling back to the category policy for provisional skills
//! 4. union, re-canonicalize, dedupe case-insensitively
//! 5. sort
//!
//! With no NER backend, step 3 contributes nothing and the result is the
//! rule-based set alone.

use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::skills::aliases::AliasTable;
use crate::skills::entities::EntityExtractor;
use crate::skills::exclusion::{collapse_whitespace, ExclusionRules};
use crate::skills::jd_details::{JdDetailRules, ParsedJdDetails};
use crate::skills::matcher::RuleMatcher;
use crate::skills::policy::CategoryPolicy;

/// Unique canonical skills, lexicographically sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExtractedSkillSet(Vec<String>);

impl ExtractedSkillSet {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    #[cfg(test)]
    pub fn into_vec(self) -> Vec<String> {
        self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    #[cfg(test)]
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }

    /// Space-joined skills, the input format of the role classifier.
    pub fn classifier_input(&self) -> String {
        self.0.join(" ")
    }
}

pub struct SkillExtractor {
    aliases: Arc<AliasTable>,
    matcher: RuleMatcher,
    exclusions: ExclusionRules,
    entities: EntityExtractor,
    policy: CategoryPolicy,
    jd_rules: JdDetailRules,
}

impl SkillExtractor {
    pub fn new(
        aliases: Arc<AliasTable>,
        entities: EntityExtractor,
        policy: CategoryPolicy,
    ) -> Result<Self, aho_corasick::BuildError> {
        Ok(Self {
            matcher: RuleMatcher::new(Arc::clone(&aliases))?,
            aliases,
            exclusions: ExclusionRules::default(),
            entities,
            policy,
            jd_rules: JdDetailRules::default(),
        })
    }

    pub fn with_exclusions(mut self, exclusions: ExclusionRules) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// "available" / "unavailable" status of the NER backend.
    pub fn ner_status(&self) -> &'static str {
        self.entities.status()
    }

    /// NER-derived job description details; `None` without a NER backend.
    pub fn parse_jd_details(&self, text: &str) -> Option<ParsedJdDetails> {
        if !self.entities.is_available() {
            return None;
        }
        let candidates = self.entities.extract_entities(text);
        Some(self.jd_rules.parse(&candidates, &self.exclusions))
    }

    pub fn extract_skills(&self, text: &str) -> ExtractedSkillSet {
        let text_lower = text.to_lowercase();
        if text_lower.trim().is_empty() {
            return ExtractedSkillSet::default();
        }

        // lowercase canonical keys; provisional spans are stored lowercased as-is
        let mut keys: BTreeSet<String> = self
            .matcher
            .find_skills(&text_lower)
            .into_iter()
            .map(|s| s.to_lowercase())
            .collect();
        let rule_based = keys.len();

        let mut rejected = 0usize;
        let mut provisional = 0usize;
        for candidate in self.entities.extract_entities(&text_lower) {
            let span = collapse_whitespace(&candidate.text).to_lowercase();
            if let Some(reason) = self.exclusions.noise_reason(&span) {
                debug!("Dropped NER span '{span}' ({reason:?})");
                rejected += 1;
                continue;
            }

            if let Some(canonical) = self.aliases.lookup(&span) {
                keys.insert(canonical.to_lowercase());
            } else if self.policy.accepts_provisional(&span, &candidate.category) {
                provisional += 1;
                keys.insert(span);
            }
        }

        let mut seen = HashSet::new();
        let mut skills: Vec<String> = keys
            .iter()
            .map(|key| self.aliases.display_name(key))
            .filter(|display| seen.insert(display.to_lowercase()))
            .collect();
        skills.sort();

        debug!(
            "Extracted {} skills ({} rule-based, {} provisional, {} NER spans rejected)",
            skills.len(),
            rule_based,
            provisional,
            rejected
        );

        ExtractedSkillSet(skills)
    }
}
