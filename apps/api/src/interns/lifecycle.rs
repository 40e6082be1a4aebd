//! Applies lifecycle actions to stored interns.
//!
//! Each operation loads the intern, checks the move against `transition`,
//! checks mentor ownership, then issues one guarded write. A write that
//! matches no row means someone else changed the intern in between and is
//! reported as a conflict.

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::interns::repo::{self, Expected, StartProject};
use crate::interns::status::{transition, Action, InternStatus};
use crate::mentors::repo::load_mentor;
use crate::models::intern::InternRow;
use crate::models::project::ProjectRow;
use crate::validation::{optional_text, require_attendance, require_text};

pub struct AcceptParams<'a> {
    pub mentor_id: Uuid,
    pub project_title: &'a str,
    pub project_description: &'a str,
}

pub struct RejectParams<'a> {
    pub mentor_id: Uuid,
    pub remarks: &'a str,
    pub alternate_mentor_id: Option<Uuid>,
}

pub struct CompleteParams<'a> {
    pub mentor_id: Uuid,
    pub attendance: f64,
    pub remarks: Option<&'a str>,
}

pub async fn load_intern(db: &PgPool, id: Uuid) -> Result<InternRow, AppError> {
    repo::get_intern(db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Intern {id} not found")))
}

/// Current status of a stored intern. A value outside the lifecycle can only
/// come from a bad manual edit, so it is an internal error.
fn current_status(intern: &InternRow) -> Result<InternStatus, AppError> {
    intern
        .status()
        .map_err(|e| AppError::Internal(anyhow::anyhow!("intern {}: {e}", intern.id)))
}

/// Checks that `action` is legal for the intern and returns the target status.
pub fn plan(intern: &InternRow, action: Action) -> Result<(InternStatus, InternStatus), AppError> {
    let from = current_status(intern)?;
    let to = transition(from, action)?;
    Ok((from, to))
}

/// Mentor-side actions are only open to the intern's current mentor.
pub fn ensure_mentor(intern: &InternRow, mentor_id: Uuid) -> Result<(), AppError> {
    if intern.mentor_id != Some(mentor_id) {
        return Err(AppError::Forbidden(format!(
            "mentor {mentor_id} is not assigned to intern {}",
            intern.id
        )));
    }
    Ok(())
}

/// A handover must go to a different mentor.
pub fn validate_handover(mentor_id: Uuid, alternate: Uuid) -> Result<(), AppError> {
    if alternate == mentor_id {
        return Err(AppError::Validation(
            "alternate mentor must differ from the rejecting mentor".to_string(),
        ));
    }
    Ok(())
}

pub fn handover_remarks(remarks: &str) -> String {
    format!("Rejected by previous mentor: {remarks}")
}

/// A guarded write that matched no row lost a race with another request.
pub fn written<T>(row: Option<T>, id: Uuid) -> Result<T, AppError> {
    row.ok_or_else(|| {
        AppError::Conflict(format!("intern {id} was modified by another request, reload and retry"))
    })
}

/// Admin assigns (or re-assigns after a rejection) a mentor.
pub async fn assign(db: &PgPool, intern_id: Uuid, mentor_id: Uuid) -> Result<InternRow, AppError> {
    let intern = load_intern(db, intern_id).await?;
    let (from, _) = plan(&intern, Action::AssignMentor)?;
    load_mentor(db, mentor_id).await?;

    let expected = Expected {
        status: from,
        mentor_id: intern.mentor_id,
    };
    let updated = written(
        repo::assign_mentor(db, intern_id, mentor_id, expected, None).await?,
        intern_id,
    )?;

    info!(intern_id = %intern_id, mentor_id = %mentor_id, from = %from, "Mentor assigned");
    Ok(updated)
}

pub async fn accept(
    db: &PgPool,
    intern_id: Uuid,
    params: AcceptParams<'_>,
) -> Result<(InternRow, ProjectRow), AppError> {
    let title = require_text("project_title", params.project_title)?;
    let description = params.project_description.trim();

    let intern = load_intern(db, intern_id).await?;
    plan(&intern, Action::Accept)?;
    ensure_mentor(&intern, params.mentor_id)?;

    let start = StartProject {
        intern_id,
        mentor_id: params.mentor_id,
        title: &title,
        description,
    };
    let (intern, project) = written(
        repo::start_project(db, start).await?,
        intern_id,
    )?;

    info!(
        intern_id = %intern_id,
        mentor_id = %params.mentor_id,
        project_id = %project.id,
        "Intern accepted, project started"
    );
    Ok((intern, project))
}

/// Rejection either hands the intern to `alternate_mentor_id` (status stays
/// `assigned`) or releases them as `rejected` for an admin to re-assign.
pub async fn reject(db: &PgPool, intern_id: Uuid, params: RejectParams<'_>) -> Result<InternRow, AppError> {
    let remarks = require_text("remarks", params.remarks)?;
    let intern = load_intern(db, intern_id).await?;
    let handover = params.alternate_mentor_id.is_some();
    let (from, _) = plan(&intern, Action::Reject { handover })?;
    ensure_mentor(&intern, params.mentor_id)?;

    let updated = match params.alternate_mentor_id {
        Some(alternate) => {
            validate_handover(params.mentor_id, alternate)?;
            load_mentor(db, alternate).await?;
            let expected = Expected {
                status: from,
                mentor_id: Some(params.mentor_id),
            };
            let notes = handover_remarks(&remarks);
            let updated = written(
                repo::assign_mentor(db, intern_id, alternate, expected, Some(&notes)).await?,
                intern_id,
            )?;
            info!(
                intern_id = %intern_id,
                from_mentor = %params.mentor_id,
                to_mentor = %alternate,
                "Intern handed over"
            );
            updated
        }
        None => {
            let updated = written(
                repo::reject(db, intern_id, params.mentor_id, &remarks).await?,
                intern_id,
            )?;
            info!(intern_id = %intern_id, mentor_id = %params.mentor_id, "Intern rejected");
            updated
        }
    };
    Ok(updated)
}

pub async fn complete(
    db: &PgPool,
    intern_id: Uuid,
    params: CompleteParams<'_>,
) -> Result<(InternRow, Option<ProjectRow>), AppError> {
    let attendance = require_attendance(params.attendance)?;
    let remarks = optional_text(params.remarks);

    let intern = load_intern(db, intern_id).await?;
    plan(&intern, Action::Complete)?;
    ensure_mentor(&intern, params.mentor_id)?;

    let (intern, project) = written(
        repo::complete(db, intern_id, params.mentor_id, attendance, remarks.as_deref()).await?,
        intern_id,
    )?;

    info!(
        intern_id = %intern_id,
        mentor_id = %params.mentor_id,
        attendance,
        "Internship completed"
    );
    Ok((intern, project))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn intern(status: &str, mentor_id: Option<Uuid>) -> InternRow {
        InternRow {
            id: Uuid::new_v4(),
            name: "Asha".to_string(),
            email: "asha@lab.example.org".to_string(),
            department: "Signals".to_string(),
            skills: vec!["python".to_string()],
            status: status.to_string(),
            mentor_id,
            project_title: None,
            project_description: None,
            start_date: None,
            end_date: None,
            attendance: None,
            remarks: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_plan_follows_state_machine() {
        let mentor = Uuid::new_v4();
        let (from, to) = plan(&intern("assigned", Some(mentor)), Action::Accept).unwrap();
        assert_eq!((from, to), (InternStatus::Assigned, InternStatus::Ongoing));

        let (_, to) = plan(&intern("rejected", None), Action::AssignMentor).unwrap();
        assert_eq!(to, InternStatus::Assigned);
    }

    #[test]
    fn test_illegal_move_is_conflict() {
        let err = plan(&intern("completed", None), Action::Accept).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
        let err = plan(&intern("pending", None), Action::Complete).unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }

    #[test]
    fn test_corrupt_status_is_internal() {
        let err = plan(&intern("archived", None), Action::Accept).unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[test]
    fn test_only_current_mentor_may_act() {
        let mentor = Uuid::new_v4();
        let row = intern("assigned", Some(mentor));
        assert!(ensure_mentor(&row, mentor).is_ok());
        assert!(matches!(
            ensure_mentor(&row, Uuid::new_v4()),
            Err(AppError::Forbidden(_))
        ));
        assert!(matches!(
            ensure_mentor(&intern("pending", None), mentor),
            Err(AppError::Forbidden(_))
        ));
    }

    #[test]
    fn test_handover_to_same_mentor_is_rejected() {
        let mentor = Uuid::new_v4();
        assert!(matches!(
            validate_handover(mentor, mentor),
            Err(AppError::Validation(_))
        ));
        assert!(validate_handover(mentor, Uuid::new_v4()).is_ok());
    }

    #[test]
    fn test_unmatched_guarded_write_is_conflict() {
        let id = Uuid::new_v4();
        assert!(matches!(written::<InternRow>(None, id), Err(AppError::Conflict(_))));
        assert_eq!(written(Some(7), id).unwrap(), 7);
    }

    #[test]
    fn test_handover_remarks() {
        assert_eq!(
            handover_remarks("needs a hardware mentor"),
            "Rejected by previous mentor: needs a hardware mentor"
        );
    }
}
