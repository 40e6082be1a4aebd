use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::certificates::certificate_code;
use crate::models::certificate::CertificateRow;

pub async fn insert_certificate(
    pool: &PgPool,
    intern_id: Uuid,
    project_id: Uuid,
) -> Result<CertificateRow, sqlx::Error> {
    let id = Uuid::new_v4();
    let issued = Utc::now();
    sqlx::query_as::<_, CertificateRow>(
        r#"
        INSERT INTO certificates (id, intern_id, project_id, certificate_code, issue_date)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(intern_id)
    .bind(project_id)
    .bind(certificate_code(id, issued))
    .bind(issued)
    .fetch_one(pool)
    .await
}

pub async fn list_certificates(pool: &PgPool) -> Result<Vec<CertificateRow>, sqlx::Error> {
    sqlx::query_as::<_, CertificateRow>("SELECT * FROM certificates ORDER BY issue_date, id")
        .fetch_all(pool)
        .await
}

pub async fn get_certificate(pool: &PgPool, id: Uuid) -> Result<Option<CertificateRow>, sqlx::Error> {
    sqlx::query_as::<_, CertificateRow>("SELECT * FROM certificates WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await
}

pub async fn count_certificates(pool: &PgPool) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar("SELECT COUNT(*) FROM certificates")
        .fetch_one(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{conflict_on_unique, AppError};
    use crate::interns::repo::{
        assign_mentor, complete, insert_intern, start_project, Expected, NewIntern, StartProject,
    };
    use crate::interns::status::InternStatus;
    use crate::mentors::repo::{insert_mentor, NewMentor};
    use crate::models::project::ProjectRow;

    async fn completed_project(pool: &PgPool) -> ProjectRow {
        let mentor = insert_mentor(
            pool,
            NewMentor {
                username: "asha",
                email: "asha@lab.example.org",
                department: "Signals",
                skills: &["python".to_string()],
            },
        )
        .await
        .unwrap();
        let intern = insert_intern(
            pool,
            &NewIntern {
                name: "Ravi".to_string(),
                email: "ravi@lab.example.org".to_string(),
                department: "Signals".to_string(),
                skills: vec!["python".to_string()],
            },
        )
        .await
        .unwrap();
        let expected = Expected {
            status: InternStatus::Pending,
            mentor_id: None,
        };
        assign_mentor(pool, intern.id, mentor.id, expected, None).await.unwrap().unwrap();
        let start = StartProject {
            intern_id: intern.id,
            mentor_id: mentor.id,
            title: "Radar signal cleanup",
            description: "",
        };
        start_project(pool, start).await.unwrap().unwrap();
        let (_, project) = complete(pool, intern.id, mentor.id, 88.0, None).await.unwrap().unwrap();
        project.unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL server"]
    async fn test_second_certificate_for_project_is_conflict(pool: PgPool) {
        let project = completed_project(&pool).await;

        let first = insert_certificate(&pool, project.intern_id, project.id).await.unwrap();
        assert!(first.certificate_code.starts_with("CERT-"));

        let err = insert_certificate(&pool, project.intern_id, project.id)
            .await
            .map_err(|e| conflict_on_unique(e, "already issued"))
            .unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        assert_eq!(count_certificates(&pool).await.unwrap(), 1);
    }
}
