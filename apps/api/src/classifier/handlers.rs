//! Axum route handler for role prediction.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::skills::extractor::ExtractedSkillSet;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PredictRoleRequest {
    pub resume_full_text: String,
}

#[derive(Debug, Serialize)]
pub struct PredictRoleResponse {
    pub predicted_job_role: String,
    pub skills: ExtractedSkillSet,
}

/// POST /api/v1/roles/predict
///
/// Extracts skills from the résumé text and hands the joined skill string to the
/// role classifier. 503 when no classifier is loaded.
pub async fn handle_predict_role(
    State(state): State<AppState>,
    Json(request): Json<PredictRoleRequest>,
) -> Result<Json<PredictRoleResponse>, AppError> {
    if request.resume_full_text.trim().is_empty() {
        return Err(AppError::Validation(
            "resume_full_text cannot be empty".to_string(),
        ));
    }

    let classifier = state
        .role_classifier
        .get()
        .ok_or_else(|| AppError::BackendUnavailable("role classifier is not loaded".to_string()))?;

    let skills = state.extractor.extract_skills(&request.resume_full_text);
    if skills.is_empty() {
        return Err(AppError::Validation(
            "no skills found in resume_full_text".to_string(),
        ));
    }
    let predicted_job_role = classifier.predict(&skills.classifier_input())?;
    info!(
        "Predicted role '{predicted_job_role}' from {} skills",
        skills.len()
    );

    Ok(Json(PredictRoleResponse {
        predicted_job_role,
        skills,
    }))
}
