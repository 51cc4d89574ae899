//! JD details: experience level, education and NER-reported skills in a job description.
//!
//! Built only from NER candidates, so it exists only when a backend is loaded. Which
//! labels and cue words feed each field is plain data in `JdDetailRules`.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::skills::entities::EntityCandidate;
use crate::skills::exclusion::{collapse_whitespace, ExclusionRules};

/// "5+", "10 +" style experience markers.
static PLUS_YEARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+\s*\+").expect("valid regex"));

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParsedJdDetails {
    pub required_skills_ner: Vec<String>,
    pub experience_level_ner: Option<String>,
    pub educational_requirements_ner: Option<String>,
}

/// Label sets and cue words for each field. First matching span wins for the
/// single-valued fields.
#[derive(Debug, Clone)]
pub struct JdDetailRules {
    pub skill_labels: HashSet<String>,
    pub experience_labels: HashSet<String>,
    pub experience_cues: Vec<String>,
    pub education_labels: HashSet<String>,
    pub education_cues: Vec<String>,
}

fn labels(items: &[&str]) -> HashSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn cues(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

impl Default for JdDetailRules {
    fn default() -> Self {
        Self {
            skill_labels: labels(&["SKILL", "LANGUAGE", "PRODUCT", "ORG"]),
            experience_labels: labels(&["DATE", "CARDINAL", "QUANTITY"]),
            experience_cues: cues(&["year", "experience"]),
            education_labels: labels(&["ORG", "GPE", "EDU"]),
            education_cues: cues(&[
                "university", "college", "degree", "bachelor", "master", "ph.d",
            ]),
        }
    }
}

impl JdDetailRules {
    fn is_experience(&self, span: &str, label: &str) -> bool {
        self.experience_labels.contains(label)
            && (self.experience_cues.iter().any(|c| span.contains(c.as_str()))
                || PLUS_YEARS.is_match(span))
    }

    fn is_education(&self, span: &str, label: &str) -> bool {
        self.education_labels.contains(label)
            && self.education_cues.iter().any(|c| span.contains(c.as_str()))
    }

    /// Sorts candidates into the three fields. Education is checked before skills so an
    /// ORG span like "Stanford University" is not reported as a skill. Skill spans still
    /// go through the exclusion rules.
    pub fn parse(&self, candidates: &[EntityCandidate], exclusions: &ExclusionRules) -> ParsedJdDetails {
        let mut details = ParsedJdDetails::default();
        let mut seen = HashSet::new();

        for candidate in candidates {
            let span = collapse_whitespace(&candidate.text);
            let lower = span.to_lowercase();
            let label = candidate.category.trim().to_uppercase();

            if self.is_education(&lower, &label) {
                details.educational_requirements_ner.get_or_insert(span);
            } else if self.is_experience(&lower, &label) {
                details.experience_level_ner.get_or_insert(span);
            } else if self.skill_labels.contains(&label)
                && !exclusions.is_noise(&lower)
                && seen.insert(lower)
            {
                details.required_skills_ner.push(span);
            }
        }

        details.required_skills_ner.sort();
        details
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidates(items: &[(&str, &str)]) -> Vec<EntityCandidate> {
        items
            .iter()
            .map(|(text, category)| EntityCandidate {
                text: text.to_string(),
                category: category.to_string(),
            })
            .collect()
    }

    fn parse(items: &[(&str, &str)]) -> ParsedJdDetails {
        JdDetailRules::default().parse(&candidates(items), &ExclusionRules::default())
    }

    #[test]
    fn test_first_experience_span_wins() {
        let details = parse(&[
            ("2024", "DATE"),
            ("5+ years", "DATE"),
            ("3 years of experience", "DATE"),
        ]);
        assert_eq!(details.experience_level_ner.as_deref(), Some("5+ years"));
    }

    #[test]
    fn test_plus_marker_counts_as_experience() {
        let details = parse(&[("10+", "CARDINAL")]);
        assert_eq!(details.experience_level_ner.as_deref(), Some("10+"));
    }

    #[test]
    fn test_education_from_org_span() {
        let details = parse(&[
            ("Snowflake", "PRODUCT"),
            ("Bachelor's   degree", "ORG"),
            ("Master of Science", "ORG"),
        ]);
        assert_eq!(
            details.educational_requirements_ner.as_deref(),
            Some("Bachelor's degree")
        );
        assert_eq!(details.required_skills_ner, vec!["Snowflake"]);
    }

    #[test]
    fn test_skills_are_deduped_and_filtered() {
        let details = parse(&[
            ("Tableau", "PRODUCT"),
            ("tableau", "ORG"),
            ("Team Lead", "ORG"),
            ("Airflow", "SKILL"),
            ("Jane", "PERSON"),
        ]);
        assert_eq!(details.required_skills_ner, vec!["Airflow", "Tableau"]);
        assert_eq!(details.experience_level_ner, None);
        assert_eq!(details.educational_requirements_ner, None);
    }

    #[test]
    fn test_unrelated_labels_are_ignored() {
        assert_eq!(
            parse(&[("three years", "PERSON"), ("University of Texas", "PERSON")]),
            ParsedJdDetails::default()
        );
    }
}
