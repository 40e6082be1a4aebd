use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::models::project::{ProjectRow, ProjectStatus};
use crate::projects::repo::list_projects;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ProjectFilter {
    pub status: Option<ProjectStatus>,
}

/// GET /api/v1/projects
pub async fn handle_list_projects(
    State(state): State<AppState>,
    Query(filter): Query<ProjectFilter>,
) -> Result<Json<Vec<ProjectRow>>, AppError> {
    Ok(Json(list_projects(&state.db, filter.status).await?))
}
