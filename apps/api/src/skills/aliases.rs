//! Alias Table: canonical skill names and the inverse alias index.
//!
//! Built once at startup and shared read-only (`Arc<AliasTable>`). Lookups are
//! case-insensitive; unknown tokens pass through unchanged.

use std::collections::HashMap;

use serde::Serialize;
use tracing::warn;

// ────────────────────────────────────────────────────────────────────────────
// Built-in lexicon
// ────────────────────────────────────────────────────────────────────────────

/// Canonical display name → lowercase aliases, in registration order.
/// Order matters: on an alias collision the earlier canonical keeps the alias.
pub const BUILTIN_SKILLS: &[(&str, &[&str])] = &[
    ("Python", &["python"]),
    ("Java", &["java"]),
    ("C++", &["c++"]),
    ("C#", &["c#"]),
    ("JavaScript", &["javascript", "js"]),
    ("TypeScript", &["typescript"]),
    ("React", &["react", "reactjs", "react.js"]),
    ("Node.js", &["node.js", "nodejs"]),
    ("Angular", &["angular", "angularjs"]),
    ("Vue.js", &["vue.js", "vuejs"]),
    ("SQL", &["sql", "mysql", "postgresql", "sqlite"]),
    ("NoSQL", &["nosql", "mongodb", "cassandra", "redis", "couchbase"]),
    ("ML", &["machine learning", "ml", "machinelearning"]),
    ("Deep Learning", &["deep learning", "dl", "deeplearning"]),
    ("NLP", &["nlp", "natural language processing"]),
    ("Data Analysis", &["data analysis", "data analytics"]),
    ("Data Science", &["data science"]),
    ("Computer Vision", &["computer vision"]),
    ("AI", &["artificial intelligence", "ai"]),
    ("HTML", &["html"]),
    ("CSS", &["css"]),
    ("Redux", &["redux"]),
    ("Express.js", &["express.js", "expressjs"]),
    ("Django", &["django"]),
    ("Flask", &["flask"]),
    ("FastAPI", &["fastapi"]),
    ("Spring Boot", &["spring boot"]),
    ("AWS", &["aws", "amazon web services"]),
    ("Azure", &["azure", "microsoft azure"]),
    ("GCP", &["gcp", "google cloud platform"]),
    ("Docker", &["docker", "containerization"]),
    ("Kubernetes", &["kubernetes"]),
    ("Git", &["git"]),
    ("Jira", &["jira"]),
    ("Jenkins", &["jenkins"]),
    ("Travis CI", &["travis ci"]),
    ("CircleCI", &["circleci"]),
    ("TensorFlow", &["tensorflow"]),
    ("PyTorch", &["pytorch"]),
    ("Scikit-learn", &["scikit-learn"]),
    ("Pandas", &["pandas"]),
    ("NumPy", &["numpy"]),
    ("Matplotlib", &["matplotlib"]),
    ("Seaborn", &["seaborn"]),
    ("Agile", &["agile"]),
    ("Scrum", &["scrum"]),
    ("DevOps", &["devops"]),
    ("CI/CD", &["ci/cd"]),
    ("REST API", &["rest api", "restful", "restful api", "restful services", "rest"]),
    ("Microservices", &["microservices", "microservice"]),
    ("Unit Testing", &["unit testing"]),
    ("Integration Testing", &["integration testing"]),
    ("Linux", &["linux"]),
    ("Unix", &["unix"]),
    ("Bash", &["bash"]),
    ("Shell Scripting", &["shell scripting"]),
    ("API Development", &["api development"]),
    ("Web Development", &["web development", "full stack web development"]),
    ("Mobile Development", &["mobile development"]),
    ("Cloud Computing", &["cloud computing", "cloud platforms", "cloud"]),
    ("Big Data", &["big data"]),
    ("Spark", &["spark", "apache spark"]),
    ("Hadoop", &["hadoop"]),
    ("Kafka", &["kafka"]),
    ("ETL", &["etl", "extract transform load", "apache airflow"]),
    ("Data Warehousing", &["data warehousing"]),
    ("Object-Oriented Programming", &["object-oriented programming", "oop"]),
    ("Functional Programming", &["functional programming"]),
    ("Algorithms", &["algorithms", "data structures and algorithms"]),
    ("Data Structures", &["data structures"]),
    ("Cybersecurity", &["cybersecurity"]),
    ("Network Security", &["network security"]),
    ("Cloud Security", &["cloud security"]),
    ("Blockchain", &["blockchain"]),
    ("Solidity", &["solidity"]),
    ("UI/UX Design", &["ui/ux design"]),
    ("Figma", &["figma"]),
    ("Sketch", &["sketch"]),
    ("Adobe XD", &["adobe xd"]),
    ("Photoshop", &["photoshop"]),
    ("Illustrator", &["illustrator"]),
    ("Project Management", &["project management"]),
    ("Risk Management", &["risk management"]),
    ("Business Analysis", &["business analysis"]),
    ("Requirements Gathering", &["requirements gathering"]),
    ("Technical Documentation", &["technical documentation"]),
    ("Communication", &["communication"]),
    ("Teamwork", &["teamwork"]),
    ("Problem Solving", &["problem solving"]),
    ("Leadership", &["leadership"]),
    ("Microsoft Office", &["microsoft office", "ms office"]),
    ("Excel", &["excel"]),
    ("PowerPoint", &["powerpoint"]),
    ("Word", &["word"]),
    ("Google Workspace", &["google workspace", "gsuite"]),
    ("R", &["r"]),
    ("Go", &["go"]),
    ("Rust", &["rust"]),
    ("Swift", &["swift"]),
    ("Kotlin", &["kotlin"]),
    ("PHP", &["php"]),
    ("Laravel", &["laravel"]),
    ("Ruby", &["ruby"]),
    ("Ruby on Rails", &["ruby on rails"]),
    ("XGBoost", &["xgboost"]),
    ("Streamlit", &["streamlit"]),
    ("Statistical Modeling", &["statistical modeling", "statistics", "probability"]),
    ("Container Orchestration", &["container orchestration"]),
    ("MLOps", &["mlops", "machine learning operations", "kubeflow"]),
    // Terms the domain patterns emit that have no entry above.
    (".NET", &[".net"]),
    ("GraphQL", &["graphql"]),
    ("OAuth", &["oauth"]),
    ("JWT", &["jwt"]),
    ("API", &["api"]),
    ("VMware", &["vmware"]),
    ("Jupyter", &["jupyter"]),
    ("Time Series Analysis", &["time series analysis"]),
];

// ────────────────────────────────────────────────────────────────────────────
// Alias table
// ────────────────────────────────────────────────────────────────────────────

/// An alias claimed by more than one canonical. The first claim is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AliasCollision {
    pub alias: String,
    pub kept: String,
    pub rejected: String,
}

/// Immutable canonical → aliases dictionary with its inverse index.
#[derive(Debug, Clone)]
pub struct AliasTable {
    /// (canonical, aliases) in registration order; aliases exclude rejected claims.
    entries: Vec<(String, Vec<String>)>,
    alias_to_canonical: HashMap<String, usize>,
    collisions: Vec<AliasCollision>,
}

impl Default for AliasTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl AliasTable {
    /// The built-in technology and soft-skill lexicon.
    pub fn builtin() -> Self {
        Self::from_entries(
            BUILTIN_SKILLS
                .iter()
                .map(|(canonical, aliases)| (*canonical, aliases.iter().copied())),
        )
    }

    /// Inverts a canonical → aliases dictionary.
    ///
    /// Every canonical also registers its own lowercase spelling, so canonicalizing a
    /// canonical name is a no-op. Collisions resolve first-registered-wins and are
    /// logged once here.
    pub fn from_entries<'a, I, A>(entries: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, A)>,
        A: IntoIterator<Item = &'a str>,
    {
        let mut table = AliasTable {
            entries: Vec::new(),
            alias_to_canonical: HashMap::new(),
            collisions: Vec::new(),
        };

        for (canonical, aliases) in entries {
            let canonical = canonical.trim();
            if canonical.is_empty() {
                continue;
            }

            let self_alias = canonical.to_lowercase();
            if let Some(&existing) = table.alias_to_canonical.get(&self_alias) {
                if table.entries[existing].0 != canonical {
                    table.record_collision(&self_alias, existing, canonical);
                }
                continue;
            }

            let index = table.entries.len();
            table.entries.push((canonical.to_string(), Vec::new()));

            let claims = std::iter::once(self_alias).chain(
                aliases
                    .into_iter()
                    .map(|a| a.trim().to_lowercase())
                    .filter(|a| !a.is_empty()),
            );
            for alias in claims {
                match table.alias_to_canonical.get(&alias) {
                    Some(&owner) if owner == index => {}
                    Some(&owner) => table.record_collision(&alias, owner, canonical),
                    None => {
                        table.alias_to_canonical.insert(alias.clone(), index);
                        table.entries[index].1.push(alias);
                    }
                }
            }
        }

        table
    }

    fn record_collision(&mut self, alias: &str, kept_index: usize, rejected: &str) {
        let kept = self.entries[kept_index].0.clone();
        warn!("Alias '{alias}' claimed by both '{kept}' and '{rejected}'; keeping '{kept}'");
        self.collisions.push(AliasCollision {
            alias: alias.to_string(),
            kept,
            rejected: rejected.to_string(),
        });
    }

    /// Canonical spelling for a known alias (case-insensitive), if any.
    pub fn lookup(&self, token: &str) -> Option<&str> {
        self.alias_to_canonical
            .get(&token.trim().to_lowercase())
            .map(|&i| self.entries[i].0.as_str())
    }

    /// Canonical spelling of `token`, or `token` unchanged when it is not a known alias.
    pub fn canonicalize(&self, token: &str) -> String {
        self.lookup(token)
            .map(str::to_string)
            .unwrap_or_else(|| token.to_string())
    }

    /// Display form: canonical casing for known skills, title case otherwise.
    pub fn display_name(&self, token: &str) -> String {
        match self.lookup(token) {
            Some(canonical) => canonical.to_string(),
            None => title_case(token.trim()),
        }
    }

    /// (canonical, aliases) pairs in registration order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(canonical, aliases)| (canonical.as_str(), aliases.as_slice()))
    }

    pub fn collisions(&self) -> &[AliasCollision] {
        &self.collisions
    }

    /// Number of canonical skills.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut previous_is_alpha = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if previous_is_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            previous_is_alpha = true;
        } else {
            out.push(c);
            previous_is_alpha = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_has_no_collisions() {
        let table = AliasTable::builtin();
        assert!(
            table.collisions().is_empty(),
            "unexpected collisions: {:?}",
            table.collisions()
        );
        assert_eq!(table.len(), BUILTIN_SKILLS.len());
    }

    #[test]
    fn test_canonicalize_known_alias_any_case() {
        let table = AliasTable::builtin();
        assert_eq!(table.canonicalize("reactjs"), "React");
        assert_eq!(table.canonicalize("React.JS"), "React");
        assert_eq!(table.canonicalize("  MySQL "), "SQL");
        assert_eq!(table.canonicalize("Amazon Web Services"), "AWS");
    }

    #[test]
    fn test_canonicalize_unknown_returns_original() {
        let table = AliasTable::builtin();
        assert_eq!(table.canonicalize("Snowflake"), "Snowflake");
        assert_eq!(table.canonicalize(""), "");
    }

    #[test]
    fn test_canonicalize_is_idempotent_for_every_canonical() {
        let table = AliasTable::builtin();
        for (canonical, _) in BUILTIN_SKILLS {
            assert_eq!(table.canonicalize(canonical), *canonical);
            let twice = table.canonicalize(&table.canonicalize(canonical));
            assert_eq!(twice, *canonical);
        }
    }

    #[test]
    fn test_first_registered_wins_on_collision() {
        let table = AliasTable::from_entries(vec![
            ("PostgreSQL", vec!["postgres", "pg"]),
            ("Pgvector", vec!["pg", "pgvector"]),
        ]);
        assert_eq!(table.canonicalize("pg"), "PostgreSQL");
        assert_eq!(table.canonicalize("pgvector"), "Pgvector");
        assert_eq!(
            table.collisions(),
            &[AliasCollision {
                alias: "pg".to_string(),
                kept: "PostgreSQL".to_string(),
                rejected: "Pgvector".to_string(),
            }]
        );
    }

    #[test]
    fn test_case_duplicate_canonical_is_rejected() {
        let table = AliasTable::from_entries(vec![("GraphQL", vec!["gql"]), ("Graphql", vec![])]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.canonicalize("graphql"), "GraphQL");
        assert_eq!(table.collisions().len(), 1);
    }

    #[test]
    fn test_display_name_title_cases_unknown() {
        let table = AliasTable::builtin();
        assert_eq!(table.display_name("snowflake"), "Snowflake");
        assert_eq!(table.display_name("apache beam"), "Apache Beam");
        assert_eq!(table.display_name("node.js"), "Node.js");
        assert_eq!(table.display_name("c++"), "C++");
    }
}
