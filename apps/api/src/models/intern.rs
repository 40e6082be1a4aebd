use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::interns::status::{InternStatus, UnknownStatus};
use crate::matching::SkillSet;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InternRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub department: String,
    pub skills: Vec<String>,
    pub status: String,
    pub mentor_id: Option<Uuid>,
    pub project_title: Option<String>,
    pub project_description: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub attendance: Option<f64>,
    pub remarks: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl InternRow {
    pub fn status(&self) -> Result<InternStatus, UnknownStatus> {
        self.status.parse()
    }

    pub fn skill_set(&self) -> SkillSet {
        self.skills.iter().collect()
    }
}
