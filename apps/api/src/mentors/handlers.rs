use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::{conflict_on_unique, AppError};
use crate::interns::handlers::StatusFilter;
use crate::interns::repo::list_interns;
use crate::interns::status::InternStatus;
use crate::matching::handlers::rank_options;
use crate::matching::{rank_records, Ranked, SkillSet, SkillVocabulary};
use crate::mentors::repo::{insert_mentor, list_mentors, load_mentor, NewMentor};
use crate::models::intern::InternRow;
use crate::models::mentor::MentorRow;
use crate::state::AppState;
use crate::validation::{require_email, require_text};

#[derive(Debug, Deserialize)]
pub struct CreateMentorRequest {
    pub username: String,
    pub email: String,
    pub department: String,
    #[serde(default)]
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct SuggestionQuery {
    pub drop_zero_scores: Option<bool>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct InternSuggestionsResponse {
    pub mentor_id: Uuid,
    pub suggestions: Vec<Ranked<InternRow>>,
}

/// Mentors pick their skills from the vocabulary; anything else is rejected
/// so that mentor skill sets stay comparable with extracted intern skills.
pub fn known_skills(vocabulary: &SkillVocabulary, skills: &[String]) -> Result<SkillSet, AppError> {
    let set: SkillSet = skills.iter().collect();
    let unknown = vocabulary.unknown_skills(&set);
    if !unknown.is_empty() {
        return Err(AppError::Validation(format!(
            "unknown skills: {}",
            unknown.join(", ")
        )));
    }
    Ok(set)
}

/// POST /api/v1/mentors
pub async fn handle_create_mentor(
    State(state): State<AppState>,
    Json(req): Json<CreateMentorRequest>,
) -> Result<(StatusCode, Json<MentorRow>), AppError> {
    let username = require_text("username", &req.username)?;
    let email = require_email(&req.email)?;
    let department = require_text("department", &req.department)?;
    let skills = known_skills(&state.vocabulary, &req.skills)?.into_vec();

    let mentor = insert_mentor(
        &state.db,
        NewMentor {
            username: &username,
            email: &email,
            department: &department,
            skills: &skills,
        },
    )
    .await
    .map_err(|e| conflict_on_unique(e, format!("username '{username}' is already taken")))?;

    info!(mentor_id = %mentor.id, username = %mentor.username, "Mentor created");
    Ok((StatusCode::CREATED, Json(mentor)))
}

/// GET /api/v1/mentors
pub async fn handle_list_mentors(State(state): State<AppState>) -> Result<Json<Vec<MentorRow>>, AppError> {
    Ok(Json(list_mentors(&state.db).await?))
}

/// GET /api/v1/mentors/:id
pub async fn handle_get_mentor(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<MentorRow>, AppError> {
    Ok(Json(load_mentor(&state.db, id).await?))
}

/// GET /api/v1/mentors/:id/interns
pub async fn handle_mentor_interns(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(filter): Query<StatusFilter>,
) -> Result<Json<Vec<InternRow>>, AppError> {
    load_mentor(&state.db, id).await?;
    Ok(Json(list_interns(&state.db, filter.status, Some(id)).await?))
}

/// GET /api/v1/mentors/:id/intern-suggestions
///
/// Pending interns ranked by how much of each intern's skill set the mentor
/// covers.
pub async fn handle_intern_suggestions(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(query): Query<SuggestionQuery>,
) -> Result<Json<InternSuggestionsResponse>, AppError> {
    let options = rank_options(&state, query.drop_zero_scores, query.limit)?;
    let mentor = load_mentor(&state.db, id).await?;
    let pending = list_interns(&state.db, Some(InternStatus::Pending), None).await?;
    let suggestions = rank_records(&mentor.skill_set(), pending, InternRow::skill_set, options);
    Ok(Json(InternSuggestionsResponse {
        mentor_id: mentor.id,
        suggestions,
    }))
}
