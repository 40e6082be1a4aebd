use std::collections::HashMap;

use axum::extract::{multipart::MultipartError, Multipart, State};
use axum::Json;
use serde::Serialize;
use tracing::info;

use crate::errors::AppError;
use crate::matching::handlers::rank_options;
use crate::matching::{extract, rank_records, Ranked, SkillSet};
use crate::mentors::repo::list_mentors;
use crate::models::mentor::MentorRow;
use crate::resume::ResumeDocument;
use crate::state::AppState;

/// Name of the multipart part carrying the file.
pub const RESUME_FIELD: &str = "resume";

/// A parsed multipart upload: the resume file plus any plain text fields
/// sent alongside it.
#[derive(Debug, Default)]
pub struct ResumeUpload {
    pub document: Option<ResumeDocument>,
    pub fields: HashMap<String, String>,
}

impl ResumeUpload {
    pub fn require_document(&mut self) -> Result<ResumeDocument, AppError> {
        self.document
            .take()
            .ok_or_else(|| AppError::Validation(format!("multipart part '{RESUME_FIELD}' is required")))
    }

    pub fn field(&self, name: &str) -> &str {
        self.fields.get(name).map(String::as_str).unwrap_or_default()
    }
}

pub fn bad_multipart(e: MultipartError) -> AppError {
    AppError::Validation(format!("malformed multipart body: {}", e.body_text()))
}

pub async fn read_resume_upload(mut multipart: Multipart) -> Result<ResumeUpload, AppError> {
    let mut upload = ResumeUpload::default();
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == RESUME_FIELD {
            let file_name = field.file_name().map(String::from);
            let content_type = field.content_type().map(String::from);
            let bytes = field.bytes().await.map_err(bad_multipart)?;
            upload.document = Some(ResumeDocument {
                file_name,
                content_type,
                bytes,
            });
        } else if !name.is_empty() {
            let value = field.text().await.map_err(bad_multipart)?;
            upload.fields.insert(name, value);
        }
    }
    Ok(upload)
}

/// Resume text to skills, the shared first half of both upload routes.
pub async fn extract_resume_skills(state: &AppState, document: ResumeDocument) -> Result<SkillSet, AppError> {
    let file = document.file_name.clone();
    let text = state.resume_extractor.extract_text(document).await?;
    let skills = extract(&text, &state.vocabulary);
    info!(
        file = file.as_deref().unwrap_or("<unnamed>"),
        skills = skills.len(),
        "Skills extracted from resume"
    );
    Ok(skills)
}

#[derive(Debug, Serialize)]
pub struct ResumeMatchResponse {
    pub skills: SkillSet,
    pub mentors: Vec<Ranked<MentorRow>>,
}

/// POST /api/v1/resumes/match
///
/// Extracts skills from the uploaded resume and ranks every mentor against
/// them. Nothing is stored.
pub async fn handle_match_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<ResumeMatchResponse>, AppError> {
    let mut upload = read_resume_upload(multipart).await?;
    let document = upload.require_document()?;
    let skills = extract_resume_skills(&state, document).await?;

    let mentors = list_mentors(&state.db).await?;
    let options = rank_options(&state, None, None)?;
    let mentors = rank_records(&skills, mentors, MentorRow::skill_set, options);
    Ok(Json(ResumeMatchResponse { skills, mentors }))
}
