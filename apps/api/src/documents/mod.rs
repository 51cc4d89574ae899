//! Document text extraction for uploaded résumés and job descriptions.
//!
//! PDF parsing is CPU-bound and runs on the blocking pool via
//! `extract_text_blocking`, so a slow parse never stalls other requests.

pub mod contact;
pub mod docx;
pub mod handlers;

use bytes::Bytes;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("unsupported file type: {0}")]
    Unsupported(String),

    #[error("failed to read PDF: {0}")]
    Pdf(String),

    #[error("failed to read DOCX: {0}")]
    Docx(String),

    #[error("text file is not valid UTF-8")]
    Encoding,

    #[error("document parsing task failed: {0}")]
    Task(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Docx,
    PlainText,
}

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

impl DocumentKind {
    /// Resolves the kind from the declared content type, falling back to the file
    /// extension when the type is missing or generic.
    pub fn detect(content_type: Option<&str>, filename: Option<&str>) -> Result<Self, DocumentError> {
        let mime = content_type
            .map(|ct| ct.split(';').next().unwrap_or("").trim().to_lowercase())
            .unwrap_or_default();

        match mime.as_str() {
            "application/pdf" => return Ok(DocumentKind::Pdf),
            DOCX_MIME => return Ok(DocumentKind::Docx),
            "text/plain" => return Ok(DocumentKind::PlainText),
            "" | "application/octet-stream" => {}
            other => return Err(DocumentError::Unsupported(other.to_string())),
        }

        let extension = filename
            .and_then(|f| f.rsplit_once('.'))
            .map(|(_, ext)| ext.to_lowercase());
        match extension.as_deref() {
            Some("pdf") => Ok(DocumentKind::Pdf),
            Some("docx") => Ok(DocumentKind::Docx),
            Some("txt") => Ok(DocumentKind::PlainText),
            _ => Err(DocumentError::Unsupported(
                filename.unwrap_or("unnamed upload").to_string(),
            )),
        }
    }
}

pub fn extract_text(kind: DocumentKind, content: &[u8]) -> Result<String, DocumentError> {
    match kind {
        DocumentKind::Pdf => pdf_extract::extract_text_from_mem(content)
            .map_err(|e| DocumentError::Pdf(e.to_string())),
        DocumentKind::Docx => docx::extract_docx_text(content),
        DocumentKind::PlainText => String::from_utf8(content.to_vec())
            .map_err(|_| DocumentError::Encoding),
    }
}

pub async fn extract_text_blocking(kind: DocumentKind, content: Bytes) -> Result<String, DocumentError> {
    tokio::task::spawn_blocking(move || extract_text(kind, &content))
        .await
        .map_err(|e| DocumentError::Task(e.to_string()))?
}
