//! Category Policy: which NER labels may contribute provisional skills.
//!
//! Kept as data so the precision/recall tradeoff can be tuned from a JSON file
//! without touching the pipeline.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::capability::{read_json, LoadError};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryAction {
    SkillCandidate,
    #[default]
    Ignore,
}

/// Label → action mapping plus spans that are never accepted as provisional skills.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryPolicy {
    #[serde(default)]
    pub categories: HashMap<String, CategoryAction>,
    #[serde(default)]
    pub default_action: CategoryAction,
    #[serde(default)]
    pub provisional_denylist: HashSet<String>,
}

const SKILL_LABELS: &[&str] = &["ORG", "PRODUCT", "LANGUAGE", "WORK_OF_ART", "EVENT"];

const IGNORED_LABELS: &[&str] = &[
    "PERSON", "GPE", "LOC", "NORP", "FAC", "DATE", "TIME", "PERCENT", "MONEY", "QUANTITY",
    "ORDINAL", "CARDINAL", "LAW",
];

/// Vendor names too broad to stand in for a specific technology.
const PROVISIONAL_DENYLIST: &[&str] = &[
    "microsoft", "google", "amazon", "apple", "ibm", "oracle", "apache",
];

impl Default for CategoryPolicy {
    fn default() -> Self {
        let categories = SKILL_LABELS
            .iter()
            .map(|l| (l.to_string(), CategoryAction::SkillCandidate))
            .chain(
                IGNORED_LABELS
                    .iter()
                    .map(|l| (l.to_string(), CategoryAction::Ignore)),
            )
            .collect();

        Self {
            categories,
            default_action: CategoryAction::Ignore,
            provisional_denylist: PROVISIONAL_DENYLIST.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl CategoryPolicy {
    /// Loads a policy file. Labels are matched upper-case, deny-list entries lower-case.
    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let policy: CategoryPolicy = read_json(path)?;
        Ok(policy.normalized())
    }

    fn normalized(self) -> Self {
        Self {
            categories: self
                .categories
                .into_iter()
                .map(|(label, action)| (label.trim().to_uppercase(), action))
                .collect(),
            default_action: self.default_action,
            provisional_denylist: self
                .provisional_denylist
                .into_iter()
                .map(|s| s.trim().to_lowercase())
                .collect(),
        }
    }

    pub fn action(&self, category: &str) -> CategoryAction {
        self.categories
            .get(&category.trim().to_uppercase())
            .copied()
            .unwrap_or(self.default_action)
    }

    /// Whether an unknown span of this category may enter the result as-is.
    pub fn accepts_provisional(&self, span: &str, category: &str) -> bool {
        self.action(category) == CategoryAction::SkillCandidate
            && !self
                .provisional_denylist
                .contains(&span.trim().to_lowercase())
    }
}
