//! Resume text extraction, the one asynchronous step in front of matching.
//!
//! `AppState` holds an `Arc<dyn ResumeTextExtractor>`; the default
//! `DocumentTextExtractor` handles PDF (via `pdf-extract`, on the blocking
//! pool) and plain-text uploads.

pub mod handlers;

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;
use tokio::task::JoinError;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("the uploaded document is empty")]
    Empty,

    #[error("unsupported document type: {0}")]
    UnsupportedFormat(String),

    #[error("cannot read PDF: {0}")]
    Pdf(String),

    #[error("text document is not valid UTF-8")]
    Encoding,

    #[error("the document contains no extractable text")]
    NoText,

    #[error("extraction task failed: {0}")]
    Join(#[from] JoinError),
}

/// An uploaded resume as received from the multipart form.
#[derive(Debug, Clone)]
pub struct ResumeDocument {
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    PlainText,
}

impl ResumeDocument {
    /// Sniffs the PDF magic bytes first, then falls back to the declared
    /// content type and the file extension.
    pub fn kind(&self) -> Result<DocumentKind, ExtractionError> {
        if self.bytes.starts_with(b"%PDF") {
            return Ok(DocumentKind::Pdf);
        }
        let content_type = self
            .content_type
            .as_deref()
            .map(|ct| ct.split(';').next().unwrap_or(ct).trim().to_ascii_lowercase());
        let extension = self
            .file_name
            .as_deref()
            .and_then(|name| name.rsplit_once('.'))
            .map(|(_, ext)| ext.to_ascii_lowercase());

        match (content_type.as_deref(), extension.as_deref()) {
            (Some("application/pdf"), _) | (_, Some("pdf")) => Ok(DocumentKind::Pdf),
            (Some("text/plain"), _) | (_, Some("txt")) => Ok(DocumentKind::PlainText),
            (Some(ct), _) if ct != "application/octet-stream" => {
                Err(ExtractionError::UnsupportedFormat(ct.to_string()))
            }
            (_, Some(ext)) => Err(ExtractionError::UnsupportedFormat(format!(".{ext}"))),
            _ => Err(ExtractionError::UnsupportedFormat("unknown".to_string())),
        }
    }
}

/// Turns an uploaded document into plain text. Implement this to swap the
/// document parser without touching handlers.
#[async_trait]
pub trait ResumeTextExtractor: Send + Sync {
    async fn extract_text(&self, document: ResumeDocument) -> Result<String, ExtractionError>;
}

pub struct DocumentTextExtractor;

#[async_trait]
impl ResumeTextExtractor for DocumentTextExtractor {
    async fn extract_text(&self, document: ResumeDocument) -> Result<String, ExtractionError> {
        if document.bytes.is_empty() {
            return Err(ExtractionError::Empty);
        }

        let text = match document.kind()? {
            DocumentKind::PlainText => String::from_utf8(document.bytes.to_vec())
                .map_err(|_| ExtractionError::Encoding)?,
            DocumentKind::Pdf => extract_pdf_text(document.bytes).await?,
        };

        if text.trim().is_empty() {
            return Err(ExtractionError::NoText);
        }
        debug!(
            file = document.file_name.as_deref().unwrap_or("<unnamed>"),
            chars = text.len(),
            "Extracted resume text"
        );
        Ok(text)
    }
}

/// PDF parsing is CPU-bound and may panic on malformed input, so it runs on
/// the blocking pool and a panic is reported as an unreadable document.
async fn extract_pdf_text(bytes: Bytes) -> Result<String, ExtractionError> {
    match tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes)).await {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractionError::Pdf(format!("{e:?}"))),
        Err(e) if e.is_panic() => Err(ExtractionError::Pdf(
            "the document structure could not be parsed".to_string(),
        )),
        Err(e) => Err(ExtractionError::Join(e)),
    }
}
