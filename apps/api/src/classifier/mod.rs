//! Role classifier: predicts a job role from extracted skills.
//!
//! The extraction pipeline only hands over the space-joined skill string
//! (`ExtractedSkillSet::classifier_input`). Any model can sit behind
//! `RoleClassifier`; the bundled `ProfileClassifier` compares the input against
//! per-role skill profiles.

pub mod handlers;

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::capability::{read_json, LoadError};

#[derive(Debug, Error)]
pub enum ClassifierError {
    #[error("no skills to classify")]
    EmptyInput,

    #[error("classifier failed: {0}")]
    Model(String),
}

pub trait RoleClassifier: Send + Sync {
    fn predict(&self, skills_text: &str) -> Result<String, ClassifierError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Profile classifier
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize)]
pub struct RoleProfile {
    pub role: String,
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct ProfilesFile {
    roles: Vec<RoleProfile>,
}

/// Nearest-profile classifier over lowercase word sets (cosine overlap).
/// Ties go to the role listed first.
pub struct ProfileClassifier {
    roles: Vec<(String, HashSet<String>)>,
}

impl ProfileClassifier {
    pub fn new(profiles: Vec<RoleProfile>) -> Result<Self, LoadError> {
        let roles: Vec<_> = profiles
            .into_iter()
            .map(|p| {
                let words = p.skills.iter().flat_map(|s| tokenize(s)).collect();
                (p.role.trim().to_string(), words)
            })
            .filter(|(role, words): &(String, HashSet<String>)| !role.is_empty() && !words.is_empty())
            .collect();

        if roles.is_empty() {
            return Err(LoadError::Invalid(
                "role profiles contain no usable roles".to_string(),
            ));
        }
        Ok(Self { roles })
    }

    pub fn from_file(path: &Path) -> Result<Self, LoadError> {
        let file: ProfilesFile = read_json(path)?;
        Self::new(file.roles)
    }

    pub fn roles(&self) -> impl Iterator<Item = &str> {
        self.roles.iter().map(|(role, _)| role.as_str())
    }
}

impl RoleClassifier for ProfileClassifier {
    fn predict(&self, skills_text: &str) -> Result<String, ClassifierError> {
        let input: HashSet<String> = tokenize(skills_text).collect();
        if input.is_empty() {
            return Err(ClassifierError::EmptyInput);
        }

        let mut best: Option<(&str, f64)> = None;
        for (role, profile) in &self.roles {
            let overlap = input.intersection(profile).count() as f64;
            let similarity = overlap / ((input.len() * profile.len()) as f64).sqrt();
            if best.map_or(true, |(_, s)| similarity > s) {
                best = Some((role, similarity));
            }
        }

        best.map(|(role, _)| role.to_string())
            .ok_or_else(|| ClassifierError::Model("no roles loaded".to_string()))
    }
}

fn tokenize(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split_whitespace().map(str::to_lowercase)
}
