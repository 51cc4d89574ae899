//! Exclusion Rules: rejects NER spans that are not skills.
//!
//! Three stages: word-count bound, stoplist membership, noise patterns.
//! Only free NER spans go through here; dictionary matches are trusted.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::RegexSet;
use serde::Serialize;

/// Inclusive bounds on the number of whitespace-separated words in a candidate.
pub const MIN_CANDIDATE_WORDS: usize = 1;
pub const MAX_CANDIDATE_WORDS: usize = 5;

/// Generic role, section, location, company, calendar and verb terms.
const STOPLIST: &[&str] = &[
    // general terms
    "company", "project", "team", "solution", "system", "role", "position", "highlights",
    "experience", "responsibilities", "qualifications", "education", "benefits", "overview",
    "job overview", "intern", "engineer", "analyst", "developer", "manager", "specialist",
    "scientist", "firm", "client", "customer", "stakeholder", "user", "model", "product",
    "services", "building", "implementing", "research", "development", "design", "testing",
    "management", "quality", "quality assurance", "business", "strategy", "metrics",
    "performance", "optimization", "growth", "impact", "problem", "flow", "workflow",
    "process", "report", "communication", "leadership", "teamwork", "problem solving",
    "agile", "scrum", "kanban", "methodology", "methodologies", "principles", "concepts",
    "frameworks", "platform", "library", "tool", "software", "hardware", "service", "api",
    "database", "server", "architecture", "security", "data", "science", "learning",
    "network", "cloud", "computing", "analytics", "prediction", "forecasting", "technical",
    "documentation", "requirements", "gathering", "mobile", "web", "full stack",
    "distributed", "frontend", "backend", "quantitative", "foundation", "foundations",
    "exposure", "theory", "theoretical", "related", "team lead", "lead",
    // locations, metrics
    "rmse", "linear", "alpha", "delta", "gpa", "india", "jaipur", "delhi", "mumbai",
    "location",
    // bare years
    "2020", "2021", "2022", "2023", "2024", "2025", "2026", "2027", "2028", "2029", "2030",
    // months
    "jan", "january", "feb", "february", "mar", "march", "apr", "april", "may", "jun",
    "june", "jul", "july", "aug", "august", "sep", "sept", "september", "oct", "october",
    "nov", "november", "dec", "december",
    // large companies, unless named as a specific product
    "microsoft", "google", "amazon", "apple", "ibm", "oracle", "accenture", "tata",
    // generic platforms
    "gmail", "linkedin", "github", "powerpoint", "excel", "word", "outlook", "vs code",
    "pythonsoftwarefoundation", "explosion",
    // units and quantities
    "records", "rows", "features", "datasets", "day", "days", "months", "years", "percent",
    "rate",
    // action verbs
    "cut", "achieved", "engineered", "spearheaded", "optimized", "collaborated",
    "championed", "managed", "solved", "built", "implemented", "utilized", "contributing",
    "designing", "maintaining", "integrate", "conduct", "participate", "translate",
    "ensure", "monitor",
    // generic nouns
    "pipeline", "pipelines", "models", "systems", "products", "environment",
    "environments", "lifecycle", "workflow orchestration tools", "data visualization tools",
    // section headers
    "job", "title", "about", "required", "preferred", "experience highlights",
    "selected projects", "technical skills", "certifications", "profile",
    // skills handled by the dictionary, never accepted as free spans
    "api development", "web development", "mobile development",
    // education
    "high school", "diploma", "honours", "hons", "bachelor", "master", "phd", "university",
    "college", "school", "institute",
];

/// Noise patterns, matched against the trimmed lowercase candidate.
static NOISE_PATTERNS: Lazy<RegexSet> = Lazy::new(|| {
    RegexSet::new([
        // numbers and percentages: "87", "87%", "3.5"
        r"^\d+(\.\d+)?%?$",
        // single letter followed by a number: "c 2025", "q3"
        r"^\w\s*\d+(\.\d+)?$",
        // metric values: "rmse 0.12", "rmse~ 4"
        r"rmse~?\s*\d+(\.\d+)?",
        // metric abbreviations
        r"\b(rmse|mae|mse|auc|gpa|kpi|roi)\b",
        // "5 years", "3+ yrs", "6 months"
        r"\d+\+?\s*(years?|yrs?|months?|mos?)\b",
        // unit words
        r"\b(hours|minutes|seconds|days|weeks|months|years|records|features|rows)\b",
        // degree and institution phrases
        r"\b(bachelor|bachelors|bachelor's|master|masters|master's|ph\.?d|doctorate|degree|diploma|university|college|institute|school|b\.?tech|m\.?tech|b\.?sc|m\.?sc|mba)\b",
        // bullet markers
        r"^\s*[-*•]\s*",
    ])
    .expect("noise patterns are valid regexes")
});

/// Why a candidate was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoiseReason {
    WordCount,
    Stoplisted,
    Pattern,
    MixedAlphanumeric,
}

/// Stoplist plus compiled noise patterns. Immutable after construction.
#[derive(Debug, Clone)]
pub struct ExclusionRules {
    stoplist: HashSet<String>,
    patterns: RegexSet,
}

impl Default for ExclusionRules {
    fn default() -> Self {
        Self {
            stoplist: STOPLIST.iter().map(|s| s.to_string()).collect(),
            patterns: NOISE_PATTERNS.clone(),
        }
    }
}

impl ExclusionRules {
    /// Adds terms to the stoplist (lowercased).
    pub fn with_stopwords<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.stoplist
            .extend(words.into_iter().map(|w| w.as_ref().trim().to_lowercase()));
        self
    }

    pub fn is_noise(&self, candidate: &str) -> bool {
        self.noise_reason(candidate).is_some()
    }

    /// First rule that rejects `candidate`, or `None` if it survives.
    /// Runs of whitespace (newlines from PDF text included) count as one space.
    pub fn noise_reason(&self, candidate: &str) -> Option<NoiseReason> {
        let text = collapse_whitespace(candidate).to_lowercase();

        let words = text.split(' ').filter(|w| !w.is_empty()).count();
        if !(MIN_CANDIDATE_WORDS..=MAX_CANDIDATE_WORDS).contains(&words) {
            return Some(NoiseReason::WordCount);
        }
        if self.stoplist.contains(&text) {
            return Some(NoiseReason::Stoplisted);
        }
        if self.patterns.is_match(&text) {
            return Some(NoiseReason::Pattern);
        }
        // codes and ids such as "id123" or "v2"
        if text.chars().any(|c| c.is_ascii_digit()) && text.chars().any(char::is_alphabetic) {
            return Some(NoiseReason::MixedAlphanumeric);
        }
        None
    }
}

/// Joins the words of `text` with single spaces.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_count_bounds() {
        let rules = ExclusionRules::default();
        assert_eq!(rules.noise_reason(""), Some(NoiseReason::WordCount));
        assert_eq!(rules.noise_reason("   "), Some(NoiseReason::WordCount));
        assert_eq!(
            rules.noise_reason("one two three four five six"),
            Some(NoiseReason::WordCount)
        );
        assert_eq!(rules.noise_reason("apache beam stream processing"), None);
    }

    #[test]
    fn test_stoplist_is_case_insensitive() {
        let rules = ExclusionRules::default();
        assert_eq!(rules.noise_reason("India"), Some(NoiseReason::Stoplisted));
        assert_eq!(rules.noise_reason(" TEAM "), Some(NoiseReason::Stoplisted));
        assert_eq!(rules.noise_reason("September"), Some(NoiseReason::Stoplisted));
        assert_eq!(rules.noise_reason("Responsibilities"), Some(NoiseReason::Stoplisted));
    }

    #[test]
    fn test_stoplist_ignores_inner_whitespace_runs() {
        let rules = ExclusionRules::default();
        assert_eq!(rules.noise_reason("team\nlead"), Some(NoiseReason::Stoplisted));
        assert_eq!(rules.noise_reason("job   overview"), Some(NoiseReason::Stoplisted));
        assert_eq!(rules.noise_reason("Technical \t Skills"), Some(NoiseReason::Stoplisted));
    }

    #[test]
    fn test_numbers_and_percentages_rejected() {
        let rules = ExclusionRules::default();
        for text in ["87", "87%", "3.5", "1999", "c 2025"] {
            assert_eq!(rules.noise_reason(text), Some(NoiseReason::Pattern), "{text}");
        }
    }

    #[test]
    fn test_duration_and_unit_phrases_rejected() {
        let rules = ExclusionRules::default();
        assert!(rules.is_noise("5 years"));
        assert!(rules.is_noise("3+ yrs"));
        assert!(rules.is_noise("six months"));
        assert!(rules.is_noise("10k records"));
    }

    #[test]
    fn test_degree_phrases_rejected() {
        let rules = ExclusionRules::default();
        assert!(rules.is_noise("Bachelor's degree"));
        assert!(rules.is_noise("Stanford University"));
        assert!(rules.is_noise("B.Tech"));
        assert!(rules.is_noise("PhD"));
    }

    #[test]
    fn test_metrics_and_bullets_rejected() {
        let rules = ExclusionRules::default();
        assert!(rules.is_noise("rmse~ 0.42"));
        assert!(rules.is_noise("AUC"));
        assert!(rules.is_noise("- kubernetes"));
        assert!(rules.is_noise("• terraform"));
    }

    #[test]
    fn test_mixed_alphanumeric_codes_rejected() {
        let rules = ExclusionRules::default();
        assert_eq!(rules.noise_reason("ID123"), Some(NoiseReason::MixedAlphanumeric));
    }

    #[test]
    fn test_plain_technology_names_survive() {
        let rules = ExclusionRules::default();
        for text in ["Snowflake", "Terraform", "dbt", "Apache Beam", "c++"] {
            assert!(!rules.is_noise(text), "{text} should survive");
        }
    }

    #[test]
    fn test_extra_stopwords() {
        let rules = ExclusionRules::default().with_stopwords(["Acme Corp"]);
        assert_eq!(rules.noise_reason("acme corp"), Some(NoiseReason::Stoplisted));
    }
}
