use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interns::lifecycle::{
    self, load_intern, AcceptParams, CompleteParams, RejectParams,
};
use crate::interns::repo::{insert_intern, insert_interns, list_interns, NewIntern};
use crate::interns::status::InternStatus;
use crate::matching::handlers::rank_options;
use crate::matching::{rank_records, Ranked, SkillSet};
use crate::mentors::repo::{get_mentor, list_mentors};
use crate::models::intern::InternRow;
use crate::models::mentor::MentorRow;
use crate::models::project::ProjectRow;
use crate::resume::handlers::{bad_multipart, extract_resume_skills, read_resume_upload};
use crate::state::AppState;
use crate::validation::{require_email, require_text};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

/// An intern as typed into the onboarding form. Skills come either as a list
/// or as free text (`"Python, SQL; React"`); both are merged.
#[derive(Debug, Deserialize)]
pub struct InternDraft {
    pub name: String,
    pub email: String,
    pub department: String,
    #[serde(default)]
    pub skills: Vec<String>,
    pub skills_text: Option<String>,
}

impl InternDraft {
    pub fn validate(&self) -> Result<NewIntern, AppError> {
        let mut skills: SkillSet = self.skills.iter().collect();
        if let Some(text) = &self.skills_text {
            for skill in SkillSet::parse_list(text).iter() {
                skills.insert(skill);
            }
        }
        Ok(NewIntern {
            name: require_text("name", &self.name)?,
            email: require_email(&self.email)?,
            department: require_text("department", &self.department)?,
            skills: skills.into_vec(),
        })
    }
}

/// Multipart part carrying the CSV roster.
pub const ROSTER_FIELD: &str = "file";

/// One line of a roster file: `name,email,department,skills`, where `skills`
/// is free text in the same form as `skills_text`.
#[derive(Debug, Deserialize)]
struct RosterRow {
    name: String,
    email: String,
    department: String,
    skills: Option<String>,
}

impl From<RosterRow> for InternDraft {
    fn from(row: RosterRow) -> Self {
        InternDraft {
            name: row.name,
            email: row.email,
            department: row.department,
            skills: Vec::new(),
            skills_text: row.skills,
        }
    }
}

/// Reads a roster with a header line. Row numbers in errors count data rows
/// from 1, matching the JSON bulk route.
pub fn parse_roster(bytes: &[u8]) -> Result<Vec<InternDraft>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(bytes);
    reader
        .deserialize::<RosterRow>()
        .enumerate()
        .map(|(i, row)| {
            row.map(InternDraft::from)
                .map_err(|e| AppError::Validation(format!("row {}: {e}", i + 1)))
        })
        .collect()
}

/// Validates a whole batch before anything is written.
pub fn validate_batch(drafts: &[InternDraft]) -> Result<Vec<NewIntern>, AppError> {
    if drafts.is_empty() {
        return Err(AppError::Validation("at least one intern is required".to_string()));
    }
    drafts
        .iter()
        .enumerate()
        .map(|(i, draft)| {
            draft.validate().map_err(|e| match e {
                AppError::Validation(msg) => AppError::Validation(format!("row {}: {msg}", i + 1)),
                other => other,
            })
        })
        .collect()
}

#[derive(Debug, Deserialize)]
pub struct StatusFilter {
    pub status: Option<InternStatus>,
}

#[derive(Debug, Deserialize)]
pub struct MentorSuggestionQuery {
    /// A mentor to leave out, typically the one handing the intern over.
    pub exclude: Option<Uuid>,
    pub drop_zero_scores: Option<bool>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct InternDetail {
    #[serde(flatten)]
    pub intern: InternRow,
    pub mentor: Option<MentorRow>,
}

#[derive(Debug, Serialize)]
pub struct MentorSuggestionsResponse {
    pub intern_id: Uuid,
    pub skills: SkillSet,
    pub suggestions: Vec<Ranked<MentorRow>>,
}

#[derive(Debug, Deserialize)]
pub struct AssignRequest {
    pub mentor_id: Uuid,
}

#[derive(Debug, Deserialize)]
pub struct AcceptRequest {
    pub mentor_id: Uuid,
    pub project_title: String,
    #[serde(default)]
    pub project_description: String,
}

#[derive(Debug, Deserialize)]
pub struct RejectRequest {
    pub mentor_id: Uuid,
    pub remarks: String,
    pub alternate_mentor_id: Option<Uuid>,
}

#[derive(Debug, Deserialize)]
pub struct CompleteRequest {
    pub mentor_id: Uuid,
    pub attendance: f64,
    pub remarks: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectTransitionResponse {
    pub intern: InternRow,
    pub project: Option<ProjectRow>,
}

/// Filters `mentors` down to the pool offered for `intern`.
pub fn suggestion_pool(mentors: Vec<MentorRow>, exclude: Option<Uuid>) -> Vec<MentorRow> {
    mentors
        .into_iter()
        .filter(|m| Some(m.id) != exclude)
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/interns
pub async fn handle_create_intern(
    State(state): State<AppState>,
    Json(draft): Json<InternDraft>,
) -> Result<(StatusCode, Json<InternRow>), AppError> {
    let new = draft.validate()?;
    let intern = insert_intern(&state.db, &new).await?;
    info!(intern_id = %intern.id, skills = intern.skills.len(), "Intern onboarded");
    Ok((StatusCode::CREATED, Json(intern)))
}

/// POST /api/v1/interns/bulk
///
/// All or nothing: one invalid draft rejects the batch before anything is
/// written, and the inserts share a transaction.
pub async fn handle_bulk_create(
    State(state): State<AppState>,
    Json(drafts): Json<Vec<InternDraft>>,
) -> Result<(StatusCode, Json<Vec<InternRow>>), AppError> {
    let interns = validate_batch(&drafts)?;
    let rows = insert_interns(&state.db, &interns).await?;
    info!(count = rows.len(), "Interns onboarded in bulk");
    Ok((StatusCode::CREATED, Json(rows)))
}

/// POST /api/v1/interns/bulk/csv
///
/// Same as the JSON bulk route, fed from a roster file in the `file` part.
pub async fn handle_bulk_create_csv(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Vec<InternRow>>), AppError> {
    let mut roster = None;
    while let Some(field) = multipart.next_field().await.map_err(bad_multipart)? {
        if field.name() == Some(ROSTER_FIELD) {
            roster = Some(field.bytes().await.map_err(bad_multipart)?);
        }
    }
    let roster = roster
        .ok_or_else(|| AppError::Validation(format!("multipart part '{ROSTER_FIELD}' is required")))?;

    let interns = validate_batch(&parse_roster(&roster)?)?;
    let rows = insert_interns(&state.db, &interns).await?;
    info!(count = rows.len(), "Interns onboarded from roster");
    Ok((StatusCode::CREATED, Json(rows)))
}

/// POST /api/v1/interns/resume
///
/// Multipart form with `name`, `email`, `department` and a `resume` file;
/// skills are extracted from the resume.
pub async fn handle_create_from_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<InternRow>), AppError> {
    let mut upload = read_resume_upload(multipart).await?;
    let document = upload.require_document()?;
    let skills = extract_resume_skills(&state, document).await?;

    let draft = InternDraft {
        name: upload.field("name").to_string(),
        email: upload.field("email").to_string(),
        department: upload.field("department").to_string(),
        skills: skills.into_vec(),
        skills_text: None,
    };
    let new = draft.validate()?;
    let intern = insert_intern(&state.db, &new).await?;
    info!(intern_id = %intern.id, skills = intern.skills.len(), "Intern onboarded from resume");
    Ok((StatusCode::CREATED, Json(intern)))
}

/// GET /api/v1/interns
pub async fn handle_list_interns(
    State(state): State<AppState>,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Vec<InternRow>>, AppError> {
    Ok(Json(list_interns(&state.db, filter.status, None).await?))
}

/// GET /api/v1/interns/:id
pub async fn handle_get_intern(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<InternDetail>, AppError> {
    let intern = load_intern(&state.db, id).await?;
    let mentor = match intern.mentor_id {
        Some(mentor_id) => get_mentor(&state.db, mentor_id).await?,
        None => None,
    };
    Ok(Json(InternDetail { intern, mentor }))
}

/// GET /api/v1/interns/:id/mentor-suggestions
pub async fn handle_mentor_suggestions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<MentorSuggestionQuery>,
) -> Result<Json<MentorSuggestionsResponse>, AppError> {
    let options = rank_options(&state, query.drop_zero_scores, query.limit)?;
    let intern = load_intern(&state.db, id).await?;
    let skills = intern.skill_set();
    let pool = suggestion_pool(list_mentors(&state.db).await?, query.exclude);
    let suggestions = rank_records(&skills, pool, MentorRow::skill_set, options);
    Ok(Json(MentorSuggestionsResponse {
        intern_id: intern.id,
        skills,
        suggestions,
    }))
}

/// POST /api/v1/interns/:id/assign
pub async fn handle_assign(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AssignRequest>,
) -> Result<Json<InternRow>, AppError> {
    Ok(Json(lifecycle::assign(&state.db, id, req.mentor_id).await?))
}

/// POST /api/v1/interns/:id/accept
pub async fn handle_accept(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<AcceptRequest>,
) -> Result<Json<ProjectTransitionResponse>, AppError> {
    let params = AcceptParams {
        mentor_id: req.mentor_id,
        project_title: &req.project_title,
        project_description: &req.project_description,
    };
    let (intern, project) = lifecycle::accept(&state.db, id, params).await?;
    Ok(Json(ProjectTransitionResponse {
        intern,
        project: Some(project),
    }))
}

/// POST /api/v1/interns/:id/reject
pub async fn handle_reject(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<RejectRequest>,
) -> Result<Json<InternRow>, AppError> {
    let params = RejectParams {
        mentor_id: req.mentor_id,
        remarks: &req.remarks,
        alternate_mentor_id: req.alternate_mentor_id,
    };
    Ok(Json(lifecycle::reject(&state.db, id, params).await?))
}

/// POST /api/v1/interns/:id/complete
pub async fn handle_complete(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(req): Json<CompleteRequest>,
) -> Result<Json<ProjectTransitionResponse>, AppError> {
    let params = CompleteParams {
        mentor_id: req.mentor_id,
        attendance: req.attendance,
        remarks: req.remarks.as_deref(),
    };
    let (intern, project) = lifecycle::complete(&state.db, id, params).await?;
    Ok(Json(ProjectTransitionResponse { intern, project }))
}
