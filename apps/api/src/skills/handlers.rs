//! Axum route handlers for the Skills API.

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::documents::handlers::ResumeInfo;
use crate::skills::extractor::ExtractedSkillSet;
use crate::skills::fit_scoring::{build_recommendation, FitScoreResult};
use crate::skills::jd_details::ParsedJdDetails;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub skills: ExtractedSkillSet,
    pub ner_backend: &'static str,
}

#[derive(Debug, Deserialize)]
pub struct FitScoreRequest {
    pub source_skills: Vec<String>,
    pub target_skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompareRequest {
    pub resume_text: String,
    pub jd_text: String,
}

/// Shared by the JSON and the upload comparison endpoints.
#[derive(Debug, Serialize)]
pub struct ComparisonResponse {
    pub analysis_id: Uuid,
    pub analyzed_at: DateTime<Utc>,
    pub resume_skills: ExtractedSkillSet,
    pub jd_skills: ExtractedSkillSet,
    pub comparison_results: FitScoreResult,
    pub recommendation: String,
    pub ner_backend: &'static str,
    /// Present only when a NER backend is loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed_jd_details: Option<ParsedJdDetails>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resume_info: Option<ResumeInfo>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/skills/extract
///
/// Canonical skill list for a block of free text. Empty text yields an empty list.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Json<ExtractResponse> {
    let skills = state.extractor.extract_skills(&request.text);
    Json(ExtractResponse {
        skills,
        ner_backend: state.extractor.ner_status(),
    })
}

/// POST /api/v1/skills/fit-score
///
/// Scores two already-extracted skill lists. Entries are canonicalized before comparison,
/// so raw aliases ("k8s", "py") are accepted.
pub async fn handle_fit_score(
    State(state): State<AppState>,
    Json(request): Json<FitScoreRequest>,
) -> Json<FitScoreResult> {
    Json(
        state
            .fit_scorer
            .score(&request.source_skills, &request.target_skills),
    )
}

/// POST /api/v1/skills/compare
///
/// Extracts skills from both texts and scores the résumé against the job description.
/// A job description without skills scores 0 with every résumé skill reported as extra.
pub async fn handle_compare(
    State(state): State<AppState>,
    Json(request): Json<CompareRequest>,
) -> Json<ComparisonResponse> {
    Json(compare_texts(&state, &request.resume_text, &request.jd_text))
}

// ────────────────────────────────────────────────────────────────────────────
// Shared comparison pipeline
// ────────────────────────────────────────────────────────────────────────────

/// Extract → score → recommend. Used by both comparison endpoints.
pub fn compare_texts(state: &AppState, resume_text: &str, jd_text: &str) -> ComparisonResponse {
    let resume_skills = state.extractor.extract_skills(resume_text);
    let jd_skills = state.extractor.extract_skills(jd_text);

    let comparison_results = state
        .fit_scorer
        .score(resume_skills.as_slice(), jd_skills.as_slice());
    let recommendation = build_recommendation(&comparison_results);

    let analysis_id = Uuid::new_v4();
    info!(
        "Comparison {analysis_id}: {} résumé skills, {} JD skills, fit {} ({})",
        resume_skills.len(),
        jd_skills.len(),
        comparison_results.fit_score,
        state.fit_scorer.backend()
    );

    ComparisonResponse {
        analysis_id,
        analyzed_at: Utc::now(),
        resume_skills,
        jd_skills,
        comparison_results,
        recommendation,
        ner_backend: state.extractor.ner_status(),
        parsed_jd_details: state.extractor.parse_jd_details(jd_text),
        resume_info: None,
    }
}
