//! Rule-Based Matcher: dictionary and domain-pattern skill detection.
//!
//! Works without any NER backend. Input is expected to be lowercased already.
//!
//! 1. Every alias of the Alias Table is searched as a whole word (one Aho–Corasick
//!    automaton, overlapping search, so every alias is tried at every position).
//! 2. A fixed library of domain patterns catches acronym groups, cloud providers,
//!    protocols and tool names; each hit is canonicalized through the table.

use std::collections::BTreeSet;
use std::sync::Arc;

use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::skills::aliases::AliasTable;

/// Domain patterns. Within a group, longer alternatives sharing a prefix come first
/// so a rejected short hit never hides the longer word ("mlops" before "ml").
static DOMAIN_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"c\+\+|c#|node\.js|vue\.js|react\.js|\.net|nosql|sql|restful|graphql",
        r"api|rest|graphql|oauth|jwt",
        r"cloud|azure|aws|gcp|vmware",
        r"mlops|ml|ai|dl|nlp",
        r"ci/cd|devops|etl",
        r"xgboost|streamlit|jupyter",
        r"data analysis|data science|machine learning|deep learning|computer vision",
        r"algorithms|data structures|object-oriented programming|functional programming",
        r"pytorch|tensorflow|scikit-learn|pandas|numpy|matplotlib|seaborn",
        r"big data|time series analysis|container orchestration|data warehousing",
        r"project management|risk management|statistical modeling|web development|api development|mobile development|business analysis|requirements gathering|technical documentation",
        r"linux|unix|bash|shell scripting",
        r"jira|jenkins|travis ci|circleci|git",
        r"express\.js|django|flask|spring boot",
        r"html|css|redux",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("domain pattern is a valid regex"))
    .collect()
});

/// True when the bytes `start..end` of `text` are not glued to a word character on
/// either side. Symbol-terminated terms ("c++", "ci/cd") therefore still match.
pub(crate) fn is_whole_word(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(is_word_char) && !after.is_some_and(is_word_char)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

pub struct RuleMatcher {
    aliases: Arc<AliasTable>,
    automaton: AhoCorasick,
    /// Canonical name for each automaton pattern, by pattern index.
    pattern_canonicals: Vec<String>,
}

impl RuleMatcher {
    pub fn new(aliases: Arc<AliasTable>) -> Result<Self, aho_corasick::BuildError> {
        let mut patterns = Vec::new();
        let mut pattern_canonicals = Vec::new();
        for (canonical, alias_list) in aliases.entries() {
            for alias in alias_list {
                patterns.push(alias.clone());
                pattern_canonicals.push(canonical.to_string());
            }
        }

        let automaton = AhoCorasick::builder()
            .match_kind(MatchKind::Standard)
            .build(&patterns)?;

        Ok(Self {
            aliases,
            automaton,
            pattern_canonicals,
        })
    }

    /// Canonical names found in `text_lower`.
    pub fn find_skills(&self, text_lower: &str) -> BTreeSet<String> {
        let mut found = BTreeSet::new();

        for m in self.automaton.find_overlapping_iter(text_lower) {
            if is_whole_word(text_lower, m.start(), m.end()) {
                found.insert(self.pattern_canonicals[m.pattern().as_usize()].clone());
            }
        }

        for pattern in DOMAIN_PATTERNS.iter() {
            for m in pattern.find_iter(text_lower) {
                if is_whole_word(text_lower, m.start(), m.end()) {
                    found.insert(self.aliases.canonicalize(m.as_str()));
                }
            }
        }

        found
    }
}
