use axum::{extract::State, Json};
use chrono::Utc;

use crate::analytics::{build_report, AnalyticsReport};
use crate::certificates::repo::count_certificates;
use crate::errors::AppError;
use crate::interns::repo::list_interns;
use crate::mentors::repo::count_mentors;
use crate::projects::repo::list_projects;
use crate::state::AppState;

/// GET /api/v1/analytics
pub async fn handle_analytics(State(state): State<AppState>) -> Result<Json<AnalyticsReport>, AppError> {
    let interns = list_interns(&state.db, None, None).await?;
    let projects = list_projects(&state.db, None).await?;
    let certificates = count_certificates(&state.db).await?;
    let mentors = count_mentors(&state.db).await?;
    Ok(Json(build_report(
        &interns,
        &projects,
        certificates,
        mentors,
        Utc::now().date_naive(),
    )))
}
