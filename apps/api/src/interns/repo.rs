//! Intern persistence. Every status change is a single-row UPDATE guarded by
//! the expected current status, so a concurrent change makes the update match
//! nothing (`Ok(None)`) instead of overwriting it.

use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::interns::status::InternStatus;
use crate::models::intern::InternRow;
use crate::models::project::{ProjectRow, ProjectStatus};

#[derive(Debug)]
pub struct NewIntern {
    pub name: String,
    pub email: String,
    pub department: String,
    pub skills: Vec<String>,
}

pub async fn insert_intern<'e, E: PgExecutor<'e>>(
    executor: E,
    intern: &NewIntern,
) -> Result<InternRow, sqlx::Error> {
    sqlx::query_as::<_, InternRow>(
        r#"
        INSERT INTO interns (id, name, email, department, skills, status)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&intern.name)
    .bind(&intern.email)
    .bind(&intern.department)
    .bind(&intern.skills)
    .bind(InternStatus::Pending.as_str())
    .fetch_one(executor)
    .await
}

/// Inserts all interns in one transaction; any failure rolls back the batch.
pub async fn insert_interns(pool: &PgPool, interns: &[NewIntern]) -> Result<Vec<InternRow>, sqlx::Error> {
    let mut tx = pool.begin().await?;
    let mut rows = Vec::with_capacity(interns.len());
    for intern in interns {
        rows.push(insert_intern(&mut *tx, intern).await?);
    }
    tx.commit().await?;
    Ok(rows)
}

/// Interns in onboarding order, optionally filtered by status and/or mentor.
pub async fn list_interns(
    pool: &PgPool,
    status: Option<InternStatus>,
    mentor_id: Option<Uuid>,
) -> Result<Vec<InternRow>, sqlx::Error> {
    sqlx::query_as::<_, InternRow>(
        r#"
        SELECT * FROM interns
        WHERE ($1::text IS NULL OR status = $1)
          AND ($2::uuid IS NULL OR mentor_id = $2)
        ORDER BY created_at, id
        "#,
    )
    .bind(status.map(InternStatus::as_str))
    .bind(mentor_id)
    .fetch_all(pool)
    .await
}

pub async fn get_intern(pool: &PgPool, id: Uuid) -> Result<Option<InternRow>, sqlx::Error> {
    sqlx::query_as::<_, InternRow>("SELECT * FROM interns WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// The state an update expects to find; the row is only written when both
/// still hold.
#[derive(Debug, Clone, Copy)]
pub struct Expected {
    pub status: InternStatus,
    pub mentor_id: Option<Uuid>,
}

/// Writes the mentor and the `assigned` status together.
pub async fn assign_mentor(
    pool: &PgPool,
    id: Uuid,
    mentor_id: Uuid,
    expected: Expected,
    remarks: Option<&str>,
) -> Result<Option<InternRow>, sqlx::Error> {
    sqlx::query_as::<_, InternRow>(
        r#"
        UPDATE interns
        SET mentor_id = $1, status = $2, remarks = COALESCE($3, remarks)
        WHERE id = $4 AND status = $5 AND mentor_id IS NOT DISTINCT FROM $6
        RETURNING *
        "#,
    )
    .bind(mentor_id)
    .bind(InternStatus::Assigned.as_str())
    .bind(remarks)
    .bind(id)
    .bind(expected.status.as_str())
    .bind(expected.mentor_id)
    .fetch_optional(pool)
    .await
}

/// Marks an assigned intern rejected and releases the mentor.
pub async fn reject(
    pool: &PgPool,
    id: Uuid,
    mentor_id: Uuid,
    remarks: &str,
) -> Result<Option<InternRow>, sqlx::Error> {
    sqlx::query_as::<_, InternRow>(
        r#"
        UPDATE interns
        SET status = $1, mentor_id = NULL, remarks = $2
        WHERE id = $3 AND status = $4 AND mentor_id = $5
        RETURNING *
        "#,
    )
    .bind(InternStatus::Rejected.as_str())
    .bind(remarks)
    .bind(id)
    .bind(InternStatus::Assigned.as_str())
    .bind(mentor_id)
    .fetch_optional(pool)
    .await
}

pub struct StartProject<'a> {
    pub intern_id: Uuid,
    pub mentor_id: Uuid,
    pub title: &'a str,
    pub description: &'a str,
}

/// Moves the intern to `ongoing` and opens the project in one transaction.
pub async fn start_project(
    pool: &PgPool,
    params: StartProject<'_>,
) -> Result<Option<(InternRow, ProjectRow)>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let intern = sqlx::query_as::<_, InternRow>(
        r#"
        UPDATE interns
        SET status = $1, project_title = $2, project_description = $3, start_date = now()
        WHERE id = $4 AND status = $5 AND mentor_id = $6
        RETURNING *
        "#,
    )
    .bind(InternStatus::Ongoing.as_str())
    .bind(params.title)
    .bind(params.description)
    .bind(params.intern_id)
    .bind(InternStatus::Assigned.as_str())
    .bind(params.mentor_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(intern) = intern else {
        return Ok(None);
    };

    let project = sqlx::query_as::<_, ProjectRow>(
        r#"
        INSERT INTO projects (id, intern_id, mentor_id, title, description, status, start_date)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(intern.id)
    .bind(params.mentor_id)
    .bind(params.title)
    .bind(params.description)
    .bind(ProjectStatus::Ongoing.as_str())
    .bind(intern.start_date)
    .fetch_one(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Some((intern, project)))
}

/// Completes the intern and closes their ongoing project in one transaction.
pub async fn complete(
    pool: &PgPool,
    id: Uuid,
    mentor_id: Uuid,
    attendance: f64,
    remarks: Option<&str>,
) -> Result<Option<(InternRow, Option<ProjectRow>)>, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let intern = sqlx::query_as::<_, InternRow>(
        r#"
        UPDATE interns
        SET status = $1, end_date = now(), attendance = $2, remarks = $3
        WHERE id = $4 AND status = $5 AND mentor_id = $6
        RETURNING *
        "#,
    )
    .bind(InternStatus::Completed.as_str())
    .bind(attendance)
    .bind(remarks)
    .bind(id)
    .bind(InternStatus::Ongoing.as_str())
    .bind(mentor_id)
    .fetch_optional(&mut *tx)
    .await?;

    let Some(intern) = intern else {
        return Ok(None);
    };

    let project = sqlx::query_as::<_, ProjectRow>(
        r#"
        UPDATE projects
        SET status = $1, end_date = $2, attendance = $3, remarks = $4
        WHERE intern_id = $5 AND status = $6
        RETURNING *
        "#,
    )
    .bind(ProjectStatus::Completed.as_str())
    .bind(intern.end_date)
    .bind(attendance)
    .bind(remarks)
    .bind(id)
    .bind(ProjectStatus::Ongoing.as_str())
    .fetch_optional(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(Some((intern, project)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mentors::repo::{insert_mentor, NewMentor};
    use crate::models::mentor::MentorRow;

    fn new_intern(name: &str) -> NewIntern {
        NewIntern {
            name: name.to_string(),
            email: "intern@lab.example.org".to_string(),
            department: "Signals".to_string(),
            skills: vec!["python".to_string(), "sql".to_string()],
        }
    }

    async fn mentor(pool: &PgPool, username: &str) -> MentorRow {
        insert_mentor(
            pool,
            NewMentor {
                username,
                email: "mentor@lab.example.org",
                department: "Signals",
                skills: &["python".to_string()],
            },
        )
        .await
        .unwrap()
    }

    async fn assigned_intern(pool: &PgPool, mentor_id: Uuid) -> InternRow {
        let intern = insert_intern(pool, &new_intern("Asha")).await.unwrap();
        let expected = Expected {
            status: InternStatus::Pending,
            mentor_id: None,
        };
        assign_mentor(pool, intern.id, mentor_id, expected, None)
            .await
            .unwrap()
            .unwrap()
    }

    async fn project_count(pool: &PgPool, intern_id: Uuid) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM projects WHERE intern_id = $1")
            .bind(intern_id)
            .fetch_one(pool)
            .await
            .unwrap()
    }

    fn start(intern_id: Uuid, mentor_id: Uuid) -> StartProject<'static> {
        StartProject {
            intern_id,
            mentor_id,
            title: "Radar signal cleanup",
            description: "Denoise captured traces",
        }
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_assign_with_stale_expectation_writes_nothing(pool: PgPool) {
        let first = mentor(&pool, "asha").await;
        let second = mentor(&pool, "ravi").await;
        let intern = assigned_intern(&pool, first.id).await;
        assert_eq!(intern.status, "assigned");
        assert_eq!(intern.mentor_id, Some(first.id));

        // Still expects a pending intern.
        let stale = Expected {
            status: InternStatus::Pending,
            mentor_id: None,
        };
        let result = assign_mentor(&pool, intern.id, second.id, stale, None).await.unwrap();
        assert!(result.is_none());

        // Right status, wrong current mentor.
        let wrong_mentor = Expected {
            status: InternStatus::Assigned,
            mentor_id: Some(second.id),
        };
        let result = assign_mentor(&pool, intern.id, second.id, wrong_mentor, None).await.unwrap();
        assert!(result.is_none());

        let stored = get_intern(&pool, intern.id).await.unwrap().unwrap();
        assert_eq!(stored.mentor_id, Some(first.id));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_start_project_opens_project_with_intern(pool: PgPool) {
        let m = mentor(&pool, "asha").await;
        let intern = assigned_intern(&pool, m.id).await;

        let (intern, project) = start_project(&pool, start(intern.id, m.id)).await.unwrap().unwrap();
        assert_eq!(intern.status, "ongoing");
        assert_eq!(intern.project_title.as_deref(), Some("Radar signal cleanup"));
        assert_eq!(project.intern_id, intern.id);
        assert_eq!(project.mentor_id, m.id);
        assert!(project.is(ProjectStatus::Ongoing));
        assert_eq!(project_count(&pool, intern.id).await, 1);

        // A second accept finds the intern already ongoing and adds no project.
        assert!(start_project(&pool, start(intern.id, m.id)).await.unwrap().is_none());
        assert_eq!(project_count(&pool, intern.id).await, 1);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_start_project_by_other_mentor_changes_nothing(pool: PgPool) {
        let owner = mentor(&pool, "asha").await;
        let other = mentor(&pool, "ravi").await;
        let intern = assigned_intern(&pool, owner.id).await;

        assert!(start_project(&pool, start(intern.id, other.id)).await.unwrap().is_none());
        assert_eq!(project_count(&pool, intern.id).await, 0);
        let stored = get_intern(&pool, intern.id).await.unwrap().unwrap();
        assert_eq!(stored.status, "assigned");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_complete_closes_ongoing_project(pool: PgPool) {
        let m = mentor(&pool, "asha").await;
        let intern = assigned_intern(&pool, m.id).await;
        start_project(&pool, start(intern.id, m.id)).await.unwrap().unwrap();

        let (intern, project) = complete(&pool, intern.id, m.id, 92.5, Some("solid work"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(intern.status, "completed");
        assert_eq!(intern.attendance, Some(92.5));
        assert!(intern.end_date.is_some());

        let project = project.unwrap();
        assert!(project.is(ProjectStatus::Completed));
        assert_eq!(project.end_date, intern.end_date);
        assert_eq!(project.attendance, Some(92.5));
        assert_eq!(project.remarks.as_deref(), Some("solid work"));

        // Completing twice matches nothing.
        assert!(complete(&pool, intern.id, m.id, 50.0, None).await.unwrap().is_none());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_bulk_insert_rolls_back_on_failing_row(pool: PgPool) {
        // PostgreSQL rejects NUL bytes in text columns.
        let batch = vec![new_intern("Asha"), new_intern("Ra\0vi"), new_intern("Mina")];
        assert!(insert_interns(&pool, &batch).await.is_err());
        assert!(list_interns(&pool, None, None).await.unwrap().is_empty());

        let batch = vec![new_intern("Asha"), new_intern("Mina")];
        assert_eq!(insert_interns(&pool, &batch).await.unwrap().len(), 2);
        assert_eq!(list_interns(&pool, Some(InternStatus::Pending), None).await.unwrap().len(), 2);
    }
}
