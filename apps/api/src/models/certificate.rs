use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CertificateRow {
    pub id: Uuid,
    pub intern_id: Uuid,
    pub project_id: Uuid,
    pub certificate_code: String,
    pub issue_date: DateTime<Utc>,
}
