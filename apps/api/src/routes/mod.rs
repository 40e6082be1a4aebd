pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analytics::handlers as analytics;
use crate::certificates::handlers as certificates;
use crate::interns::handlers as interns;
use crate::matching::handlers as matching;
use crate::mentors::handlers as mentors;
use crate::projects::handlers as projects;
use crate::resume::handlers as resume;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/health", get(health::health_handler))
        // Matching (stateless)
        .route("/api/v1/skills", get(matching::handle_list_skills))
        .route("/api/v1/match/extract", post(matching::handle_extract))
        .route("/api/v1/match/score", post(matching::handle_score))
        .route("/api/v1/match/rank", post(matching::handle_rank))
        .route("/api/v1/resumes/match", post(resume::handle_match_resume))
        // Mentors
        .route(
            "/api/v1/mentors",
            get(mentors::handle_list_mentors).post(mentors::handle_create_mentor),
        )
        .route("/api/v1/mentors/:id", get(mentors::handle_get_mentor))
        .route(
            "/api/v1/mentors/:id/interns",
            get(mentors::handle_mentor_interns),
        )
        .route(
            "/api/v1/mentors/:id/intern-suggestions",
            get(mentors::handle_intern_suggestions),
        )
        // Interns
        .route(
            "/api/v1/interns",
            get(interns::handle_list_interns).post(interns::handle_create_intern),
        )
        .route("/api/v1/interns/bulk", post(interns::handle_bulk_create))
        .route(
            "/api/v1/interns/bulk/csv",
            post(interns::handle_bulk_create_csv),
        )
        .route(
            "/api/v1/interns/resume",
            post(interns::handle_create_from_resume),
        )
        .route("/api/v1/interns/:id", get(interns::handle_get_intern))
        .route(
            "/api/v1/interns/:id/mentor-suggestions",
            get(interns::handle_mentor_suggestions),
        )
        .route("/api/v1/interns/:id/assign", post(interns::handle_assign))
        .route("/api/v1/interns/:id/accept", post(interns::handle_accept))
        .route("/api/v1/interns/:id/reject", post(interns::handle_reject))
        .route(
            "/api/v1/interns/:id/complete",
            post(interns::handle_complete),
        )
        // Projects, certificates, analytics
        .route("/api/v1/projects", get(projects::handle_list_projects))
        .route(
            "/api/v1/certificates",
            get(certificates::handle_list_certificates).post(certificates::handle_issue_certificate),
        )
        .route(
            "/api/v1/certificates/:id/html",
            get(certificates::handle_certificate_html),
        )
        .route("/api/v1/analytics", get(analytics::handle_analytics))
        .layer(DefaultBodyLimit::max(upload_limit))
        .with_state(state)
}
