use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::certificates::{ensure_certifiable, render_certificate_html};
use crate::certificates::repo::{get_certificate, insert_certificate, list_certificates};
use crate::errors::{conflict_on_unique, AppError};
use crate::interns::lifecycle::load_intern;
use crate::models::certificate::CertificateRow;
use crate::projects::repo::{get_project, latest_completed_project};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct IssueCertificateRequest {
    pub intern_id: Uuid,
}

/// POST /api/v1/certificates
///
/// Only completed interns with a completed project qualify; a second
/// certificate for the same project is a conflict.
pub async fn handle_issue_certificate(
    State(state): State<AppState>,
    Json(req): Json<IssueCertificateRequest>,
) -> Result<(StatusCode, Json<CertificateRow>), AppError> {
    let intern = load_intern(&state.db, req.intern_id).await?;
    let project = ensure_certifiable(&intern, latest_completed_project(&state.db, intern.id).await?)?;

    let certificate = insert_certificate(&state.db, intern.id, project.id)
        .await
        .map_err(|e| conflict_on_unique(e, format!("a certificate was already issued for project {}", project.id)))?;

    info!(
        certificate_id = %certificate.id,
        intern_id = %intern.id,
        code = %certificate.certificate_code,
        "Certificate issued"
    );
    Ok((StatusCode::CREATED, Json(certificate)))
}

/// GET /api/v1/certificates
pub async fn handle_list_certificates(
    State(state): State<AppState>,
) -> Result<Json<Vec<CertificateRow>>, AppError> {
    Ok(Json(list_certificates(&state.db).await?))
}

/// GET /api/v1/certificates/:id/html
pub async fn handle_certificate_html(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let certificate = get_certificate(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Certificate {id} not found")))?;
    let intern = load_intern(&state.db, certificate.intern_id).await?;
    let project = get_project(&state.db, certificate.project_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Project {} not found", certificate.project_id)))?;
    Ok(Html(render_certificate_html(&certificate, &intern, &project)))
}
