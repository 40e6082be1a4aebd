//! Axum route handlers for the stateless matching API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::matching::{
    extract, rank, score, MatchResult, PoolEntry, RankOptions, Score, SkillSet, ZeroScorePolicy,
};
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SkillsResponse {
    pub skills: SkillSet,
}

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub skills: SkillSet,
}

#[derive(Debug, Deserialize)]
pub struct ScoreRequest {
    pub a: SkillSet,
    pub b: SkillSet,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    #[serde(flatten)]
    pub score: Score,
    pub overlap: usize,
    pub explanation: String,
}

#[derive(Debug, Deserialize)]
pub struct RankRequest {
    pub candidate: SkillSet,
    pub pool: Vec<PoolEntry<String>>,
    /// Overrides the configured zero-score policy for this request.
    pub drop_zero_scores: Option<bool>,
    pub limit: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct RankResponse {
    pub results: Vec<MatchResult<String>>,
}

/// Rank options from the configured default plus per-request overrides.
/// Every ranking route goes through here, so a zero `limit` is rejected the
/// same way everywhere.
pub fn rank_options(
    state: &AppState,
    drop_zero_scores: Option<bool>,
    limit: Option<usize>,
) -> Result<RankOptions, AppError> {
    if limit == Some(0) {
        return Err(AppError::Validation("limit must be positive".to_string()));
    }
    Ok(RankOptions {
        zero_scores: ZeroScorePolicy::from_drop_flag(
            drop_zero_scores.unwrap_or(state.config.drop_zero_scores),
        ),
        limit,
    })
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// GET /api/v1/skills
pub async fn handle_list_skills(State(state): State<AppState>) -> Json<SkillsResponse> {
    Json(SkillsResponse {
        skills: state.vocabulary.as_skill_set(),
    })
}

/// POST /api/v1/match/extract
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Json<ExtractResponse> {
    Json(ExtractResponse {
        skills: extract(&request.text, &state.vocabulary),
    })
}

/// POST /api/v1/match/score
///
/// Coverage of `b` by `a`; `b` is the denominator.
pub async fn handle_score(Json(request): Json<ScoreRequest>) -> Json<ScoreResponse> {
    let score = score(&request.a, &request.b);
    Json(ScoreResponse {
        overlap: score.overlap(),
        explanation: score.explanation(),
        score,
    })
}

/// POST /api/v1/match/rank
pub async fn handle_rank(
    State(state): State<AppState>,
    Json(request): Json<RankRequest>,
) -> Result<Json<RankResponse>, AppError> {
    let options = rank_options(&state, request.drop_zero_scores, request.limit)?;
    Ok(Json(RankResponse {
        results: rank(&request.candidate, &request.pool, options),
    }))
}
