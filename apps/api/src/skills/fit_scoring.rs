//! Fit Scoring: pluggable scorer that measures a source skill set against a target.
//!
//! Default: `SkillSetScorer` (set overlap on canonical skills, pure and deterministic).
//!
//! `AppState` holds an `Arc<dyn FitScorer>`, chosen at startup.

use std::collections::BTreeSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::skills::aliases::AliasTable;

// ────────────────────────────────────────────────────────────────────────────
// Output data model
// ────────────────────────────────────────────────────────────────────────────

/// Comparison of a source (résumé) skill set against a target (job description).
///
/// `matched_skills` and `missing_skills` partition the target set;
/// `extra_skills` is the source set minus the target set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FitScoreResult {
    pub fit_score: f64, // 0 – 100, two decimals
    pub matched_skills: Vec<String>,
    pub missing_skills: Vec<String>,
    pub extra_skills: Vec<String>,
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The fit scorer trait. Implement this to swap scoring strategies without touching
/// the handlers.
///
/// Carried in `AppState` as `Arc<dyn FitScorer>`.
pub trait FitScorer: Send + Sync {
    fn score(&self, source_skills: &[String], target_skills: &[String]) -> FitScoreResult;

    /// Short label for logs.
    fn backend(&self) -> &'static str;
}

// ────────────────────────────────────────────────────────────────────────────
// SkillSetScorer (default implementation)
// ────────────────────────────────────────────────────────────────────────────

/// Canonical set-overlap scorer.
///
/// Algorithm:
/// 1. Canonicalize and lowercase both lists into sets S (source) and T (target)
/// 2. matched = S ∩ T, missing = T − S, extra = S − T
/// 3. fit_score = 100 × |matched| / |T|, rounded to 2 decimals (0 when T is empty)
pub struct SkillSetScorer {
    aliases: Arc<AliasTable>,
}

impl SkillSetScorer {
    pub fn new(aliases: Arc<AliasTable>) -> Self {
        Self { aliases }
    }
}

impl FitScorer for SkillSetScorer {
    fn score(&self, source_skills: &[String], target_skills: &[String]) -> FitScoreResult {
        compute_skill_fit(&self.aliases, source_skills, target_skills)
    }

    fn backend(&self) -> &'static str {
        "skill_set"
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Core set-overlap algorithm
// ────────────────────────────────────────────────────────────────────────────

pub fn compute_skill_fit(
    aliases: &AliasTable,
    source_skills: &[String],
    target_skills: &[String],
) -> FitScoreResult {
    let source = canonical_keys(aliases, source_skills);
    let target = canonical_keys(aliases, target_skills);

    let matched = display_sorted(aliases, source.intersection(&target));
    let missing = display_sorted(aliases, target.difference(&source));
    let extra = display_sorted(aliases, source.difference(&target));

    let fit_score = if target.is_empty() {
        0.0
    } else {
        let overlap = source.intersection(&target).count() as f64;
        round_2dp(100.0 * overlap / target.len() as f64).min(100.0)
    };

    debug!(
        "Fit score {fit_score}: {} matched, {} missing, {} extra",
        matched.len(),
        missing.len(),
        extra.len()
    );

    FitScoreResult {
        fit_score,
        matched_skills: matched,
        missing_skills: missing,
        extra_skills: extra,
    }
}

/// Lowercase canonical keys; blank entries are ignored.
fn canonical_keys(aliases: &AliasTable, skills: &[String]) -> BTreeSet<String> {
    skills
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| aliases.canonicalize(s).to_lowercase())
        .collect()
}

fn display_sorted<'a>(
    aliases: &AliasTable,
    keys: impl Iterator<Item = &'a String>,
) -> Vec<String> {
    keys.map(|k| aliases.display_name(k))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

fn round_2dp(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Builds a human-readable recommendation string from a fit result.
pub fn build_recommendation(result: &FitScoreResult) -> String {
    let top_missing: Vec<&str> = result
        .missing_skills
        .iter()
        .take(3)
        .map(String::as_str)
        .collect();
    let score = result.fit_score;

    if result.matched_skills.is_empty() && result.missing_skills.is_empty() {
        "No skills found in the job description; cannot score fit.".to_string()
    } else if score >= 80.0 {
        "Strong fit. The résumé covers the key skills of the job description.".to_string()
    } else if score >= 60.0 {
        format!(
            "Moderate fit ({score}/100). Consider highlighting: {}.",
            top_missing.join(", ")
        )
    } else {
        format!(
            "Low fit ({score}/100). Significant gaps: {}.",
            top_missing.join(", ")
        )
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn score(source: &[&str], target: &[&str]) -> FitScoreResult {
        SkillSetScorer::new(Arc::new(AliasTable::builtin())).score(&strings(source), &strings(target))
    }

    #[test]
    fn test_resume_vs_jd_scenario() {
        let result = score(&["python", "AWS", "Django"], &["Python", "SQL", "AWS"]);
        assert_eq!(result.matched_skills, vec!["AWS", "Python"]);
        assert_eq!(result.missing_skills, vec!["SQL"]);
        assert_eq!(result.extra_skills, vec!["Django"]);
        assert_eq!(result.fit_score, 66.67);
    }

    #[test]
    fn test_perfect_match_scores_100() {
        let result = score(&["reactjs", "MySQL", "k8s"], &["React", "sql", "K8S"]);
        assert_eq!(result.fit_score, 100.0);
        assert!(result.missing_skills.is_empty());
        assert!(result.extra_skills.is_empty());
        assert_eq!(result.matched_skills, vec!["K8S", "React", "SQL"]);
    }

    #[test]
    fn test_empty_target_returns_zero_score() {
        let result = score(&["python", "Python", "reactjs", "Docker"], &[]);
        assert_eq!(result.fit_score, 0.0);
        assert!(result.matched_skills.is_empty());
        assert!(result.missing_skills.is_empty());
        assert_eq!(result.extra_skills, vec!["Docker", "Python", "React"]);
    }

    #[test]
    fn test_empty_source_misses_everything() {
        let result = score(&[], &["Go", "Rust"]);
        assert_eq!(result.fit_score, 0.0);
        assert_eq!(result.missing_skills, vec!["Go", "Rust"]);
        assert!(result.extra_skills.is_empty());
    }

    #[test]
    fn test_both_empty() {
        let result = score(&[], &[]);
        assert_eq!(result.fit_score, 0.0);
        assert!(result.matched_skills.is_empty());
        assert!(result.missing_skills.is_empty());
        assert!(result.extra_skills.is_empty());
    }

    #[test]
    fn test_partition_law() {
        let target = ["Python", "nodejs", "Node.js", "Kafka", "terraform", "AWS"];
        let result = score(&["aws", "Terraform", "Go"], &target);

        let matched: BTreeSet<_> = result.matched_skills.iter().collect();
        let missing: BTreeSet<_> = result.missing_skills.iter().collect();
        assert!(matched.is_disjoint(&missing));

        let union: BTreeSet<String> = matched.union(&missing).map(|s| s.to_string()).collect();
        let expected: BTreeSet<String> =
            strings(&["AWS", "Kafka", "Node.js", "Python", "Terraform"]).into_iter().collect();
        assert_eq!(union, expected);
        assert_eq!(result.extra_skills, vec!["Go"]);
        assert_eq!(result.fit_score, 40.0);
    }

    #[test]
    fn test_score_bounded_0_to_100() {
        let cases: Vec<(Vec<&str>, Vec<&str>)> = vec![
            (vec!["a", "b", "c", "d"], vec!["a"]),
            (vec!["x"], vec!["a", "b", "c"]),
            (vec![], vec!["a"]),
            (vec!["a", "A", "a "], vec!["a", "A"]),
        ];
        for (source, target) in &cases {
            let result = score(source, target);
            assert!((0.0..=100.0).contains(&result.fit_score), "{result:?}");
        }
    }

    #[test]
    fn test_blank_entries_ignored() {
        let result = score(&["", "  ", "Python"], &["python", " "]);
        assert_eq!(result.fit_score, 100.0);
        assert_eq!(result.matched_skills, vec!["Python"]);
    }

    #[test]
    fn test_one_third_rounds_to_two_decimals() {
        let result = score(&["Java"], &["Java", "Scala", "Kotlin"]);
        assert_eq!(result.fit_score, 33.33);
    }

    #[test]
    fn test_scorer_backend_label() {
        let scorer = SkillSetScorer::new(Arc::new(AliasTable::builtin()));
        assert_eq!(scorer.backend(), "skill_set");
    }

    #[test]
    fn test_recommendation_high_score() {
        let rec = build_recommendation(&score(&["python"], &["python"]));
        assert!(rec.contains("Strong fit"));
    }

    #[test]
    fn test_recommendation_moderate_score_lists_gaps() {
        let rec = build_recommendation(&score(
            &["python", "aws"],
            &["python", "aws", "kafka"],
        ));
        assert!(rec.contains("Kafka"));
        assert!(rec.contains("66.67"));
    }

    #[test]
    fn test_recommendation_low_score() {
        let rec = build_recommendation(&score(&["python"], &["rust", "go", "python", "c++"]));
        assert!(rec.contains("25"));
        assert!(rec.contains("Rust"));
    }

    #[test]
    fn test_recommendation_empty_target() {
        let rec = build_recommendation(&score(&["python"], &[]));
        assert!(rec.contains("cannot score"));
    }
}
