use sqlx::PgPool;
use uuid::Uuid;

use crate::models::project::{ProjectRow, ProjectStatus};

pub async fn list_projects(
    pool: &PgPool,
    status: Option<ProjectStatus>,
) -> Result<Vec<ProjectRow>, sqlx::Error> {
    sqlx::query_as::<_, ProjectRow>(
        r#"
        SELECT * FROM projects
        WHERE ($1::text IS NULL OR status = $1)
        ORDER BY start_date, id
        "#,
    )
    .bind(status.map(ProjectStatus::as_str))
    .fetch_all(pool)
    .await
}

/// The intern's most recently finished project, if any.
pub async fn latest_completed_project(
    pool: &PgPool,
    intern_id: Uuid,
) -> Result<Option<ProjectRow>, sqlx::Error> {
    sqlx::query_as::<_, ProjectRow>(
        r#"
        SELECT * FROM projects
        WHERE intern_id = $1 AND status = $2
        ORDER BY end_date DESC NULLS LAST
        LIMIT 1
        "#,
    )
    .bind(intern_id)
    .bind(ProjectStatus::Completed.as_str())
    .fetch_optional(pool)
    .await
}

pub async fn get_project(pool: &PgPool, id: Uuid) -> Result<Option<ProjectRow>, sqlx::Error> {
    sqlx::query_as::<_, ProjectRow>("SELECT * FROM projects WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}
