use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::matching::SkillSet;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct MentorRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub department: String,
    pub skills: Vec<String>,
    pub created_at: DateTime<Utc>,
}

impl MentorRow {
    pub fn skill_set(&self) -> SkillSet {
        self.skills.iter().collect()
    }
}
