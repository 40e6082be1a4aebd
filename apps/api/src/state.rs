use std::sync::Arc;

use sqlx::PgPool;

use crate::config::Config;
use crate::matching::SkillVocabulary;
use crate::resume::ResumeTextExtractor;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Config,
    /// Loaded once at startup, read-only afterwards.
    pub vocabulary: Arc<SkillVocabulary>,
    /// Pluggable document parser. Default: DocumentTextExtractor.
    pub resume_extractor: Arc<dyn ResumeTextExtractor>,
}

#[cfg(test)]
impl AppState {
    /// State over a pool that never connects; only for routes that do not
    /// touch the database.
    pub fn for_tests(vocabulary: &[&str]) -> Self {
        use sqlx::postgres::PgPoolOptions;

        let db = PgPoolOptions::new()
            .connect_lazy("postgres://interndesk@localhost/interndesk_test")
            .expect("lazy pool");
        AppState {
            db,
            config: Config {
                database_url: "postgres://interndesk@localhost/interndesk_test".to_string(),
                database_max_connections: 1,
                port: 0,
                rust_log: "debug".to_string(),
                skill_vocabulary_path: String::new(),
                drop_zero_scores: false,
                max_upload_bytes: 1024 * 1024,
            },
            vocabulary: Arc::new(SkillVocabulary::new(vocabulary).expect("test vocabulary")),
            resume_extractor: Arc::new(crate::resume::DocumentTextExtractor),
        }
    }
}
