//! Intern lifecycle as an explicit state machine over `InternStatus`.
//!
//! ```text
//! pending  --assign-->           assigned --accept--> ongoing --complete--> completed
//! assigned --reject+handover-->  assigned
//! assigned --reject-->           rejected --assign--> assigned
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InternStatus {
    Pending,
    Assigned,
    Ongoing,
    Completed,
    Rejected,
}

impl InternStatus {
    pub const ALL: [InternStatus; 5] = [
        InternStatus::Pending,
        InternStatus::Assigned,
        InternStatus::Ongoing,
        InternStatus::Completed,
        InternStatus::Rejected,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            InternStatus::Pending => "pending",
            InternStatus::Assigned => "assigned",
            InternStatus::Ongoing => "ongoing",
            InternStatus::Completed => "completed",
            InternStatus::Rejected => "rejected",
        }
    }
}

impl fmt::Display for InternStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown status '{0}'")]
pub struct UnknownStatus(pub String);

impl FromStr for InternStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InternStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| UnknownStatus(s.to_string()))
    }
}

/// Something an admin or mentor does to an intern record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Admin picks a mentor (usually from the ranked suggestions).
    AssignMentor,
    /// Mentor takes the intern on and opens a project.
    Accept,
    /// Mentor declines; `handover` passes the intern to an alternate mentor.
    Reject { handover: bool },
    /// Mentor closes the project.
    Complete,
}

impl Action {
    pub fn name(self) -> &'static str {
        match self {
            Action::AssignMentor => "assign mentor",
            Action::Accept => "accept",
            Action::Reject { handover: true } => "reject with handover",
            Action::Reject { handover: false } => "reject",
            Action::Complete => "complete",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransitionError {
    #[error("cannot {action} an intern whose status is '{from}'")]
    Illegal {
        from: InternStatus,
        action: &'static str,
    },
}

/// Returns the status an intern moves to when `action` is applied, or an
/// error when the move is not part of the lifecycle.
pub fn transition(from: InternStatus, action: Action) -> Result<InternStatus, TransitionError> {
    use InternStatus::*;

    match (from, action) {
        (Pending | Rejected, Action::AssignMentor) => Ok(Assigned),
        (Assigned, Action::Accept) => Ok(Ongoing),
        (Assigned, Action::Reject { handover: true }) => Ok(Assigned),
        (Assigned, Action::Reject { handover: false }) => Ok(Rejected),
        (Ongoing, Action::Complete) => Ok(Completed),
        (from, action) => Err(TransitionError::Illegal {
            from,
            action: action.name(),
        }),
    }
}
