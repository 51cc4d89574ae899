//! Axum route handlers for the Resumes API (file uploads).

use axum::extract::{Multipart, State};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;
use tracing::{debug, info};

use crate::documents::contact::extract_contact_info;
use crate::documents::{extract_text_blocking, DocumentKind};
use crate::errors::AppError;
use crate::skills::extractor::ExtractedSkillSet;
use crate::skills::handlers::{compare_texts, ComparisonResponse};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
pub struct ResumeInfo {
    pub filename: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub extracted_skills: ExtractedSkillSet,
    pub full_resume_text: String,
}

#[derive(Debug, Serialize)]
pub struct ResumeExtractResponse {
    pub resume_info: ResumeInfo,
}

/// One uploaded file field, buffered.
struct Upload {
    filename: String,
    content_type: Option<String>,
    content: Bytes,
}

impl Upload {
    async fn into_text(self) -> Result<(String, String), AppError> {
        let kind = DocumentKind::detect(self.content_type.as_deref(), Some(self.filename.as_str()))?;
        let text = extract_text_blocking(kind, self.content).await?;
        debug!("Extracted {} chars from {} ({kind:?})", text.len(), self.filename);
        Ok((self.filename, text))
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/resumes/extract
///
/// Multipart field `resume_file` (PDF, DOCX or plain text). Returns contact details,
/// extracted skills and the full text.
pub async fn handle_resume_extract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ResumeExtractResponse>, AppError> {
    let mut resume = None;
    while let Some((name, upload)) = next_upload(&mut multipart).await? {
        if name == "resume_file" {
            resume = Some(upload);
        }
    }
    let resume = resume.ok_or_else(|| missing_field("resume_file"))?;

    let (filename, text) = resume.into_text().await?;
    let skills = state.extractor.extract_skills(&text);
    let resume_info = build_resume_info(filename, text, skills);
    info!(
        "Extracted {} skills from uploaded résumé {}",
        resume_info.extracted_skills.len(),
        resume_info.filename
    );

    Ok(Json(ResumeExtractResponse { resume_info }))
}

/// POST /api/v1/resumes/compare
///
/// Multipart fields `resume_file` and `jd_file`. Same response as
/// `/api/v1/skills/compare`, plus `resume_info`.
pub async fn handle_resume_compare(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ComparisonResponse>, AppError> {
    let mut resume = None;
    let mut jd = None;
    while let Some((name, upload)) = next_upload(&mut multipart).await? {
        match name.as_str() {
            "resume_file" => resume = Some(upload),
            "jd_file" => jd = Some(upload),
            _ => {}
        }
    }
    let resume = resume.ok_or_else(|| missing_field("resume_file"))?;
    let jd = jd.ok_or_else(|| missing_field("jd_file"))?;

    let (filename, resume_text) = resume.into_text().await?;
    let (_, jd_text) = jd.into_text().await?;
    if jd_text.trim().is_empty() {
        return Err(AppError::Validation("jd_file contains no text".to_string()));
    }

    let mut response = compare_texts(&state, &resume_text, &jd_text);
    let skills = response.resume_skills.clone();
    response.resume_info = Some(build_resume_info(filename, resume_text, skills));

    Ok(Json(response))
}

// ────────────────────────────────────────────────────────────────────────────
// Helpers
// ────────────────────────────────────────────────────────────────────────────

/// Reads the next multipart field. Empty file fields are rejected.
async fn next_upload(multipart: &mut Multipart) -> Result<Option<(String, Upload)>, AppError> {
    let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    else {
        return Ok(None);
    };

    let name = field.name().unwrap_or_default().to_string();
    let filename = field.file_name().unwrap_or("unnamed upload").to_string();
    let content_type = field.content_type().map(str::to_string);
    let content = field
        .bytes()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?;

    if content.is_empty() {
        return Err(AppError::Validation(format!("{name} is empty")));
    }

    Ok(Some((
        name,
        Upload {
            filename,
            content_type,
            content,
        },
    )))
}

fn missing_field(name: &str) -> AppError {
    AppError::Validation(format!("multipart field '{name}' is required"))
}

fn build_resume_info(filename: String, text: String, skills: ExtractedSkillSet) -> ResumeInfo {
    let contact = extract_contact_info(&text);
    ResumeInfo {
        filename,
        email: contact.email,
        phone: contact.phone,
        extracted_skills: skills,
        full_resume_text: text,
    }
}
