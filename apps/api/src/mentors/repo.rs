use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::mentor::MentorRow;

pub struct NewMentor<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub department: &'a str,
    pub skills: &'a [String],
}

pub async fn insert_mentor(pool: &PgPool, mentor: NewMentor<'_>) -> Result<MentorRow, sqlx::Error> {
    sqlx::query_as::<_, MentorRow>(
        r#"
        INSERT INTO mentors (id, username, email, department, skills)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(mentor.username)
    .bind(mentor.email)
    .bind(mentor.department)
    .bind(mentor.skills)
    .fetch_one(pool)
    .await
}

pub async fn list_mentors(pool: &PgPool) -> Result<Vec<MentorRow>, sqlx::Error> {
    sqlx::query_as::<_, MentorRow>("SELECT * FROM mentors ORDER BY created_at, id")
        .fetch_all(pool)
        .await
}

pub async fn get_mentor(pool: &PgPool, id: Uuid) -> Result<Option<MentorRow>, sqlx::Error> {
    sqlx::query_as::<_, MentorRow>("SELECT * FROM mentors WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Like `get_mentor`, but a missing mentor is a 404.
pub async fn load_mentor(pool: &PgPool, id: Uuid) -> Result<MentorRow, AppError> {
    get_mentor(pool, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Mentor {id} not found")))
}

pub async fn count_mentors(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM mentors")
        .fetch_one(pool)
        .await
}
