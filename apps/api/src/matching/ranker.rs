use serde::{Deserialize, Serialize};

use crate::matching::scorer::score;
use crate::matching::skill_set::SkillSet;

/// One rankable party: a mentor when ranking for an intern, an intern when
/// ranking for a mentor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolEntry<Id> {
    pub id: Id,
    pub skills: SkillSet,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult<Id> {
    pub id: Id,
    pub score: u32,
    pub matched: SkillSet,
    pub explanation: String,
}

/// What to do with pool entries that share no skill with the candidate.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZeroScorePolicy {
    /// Keep them; they sort to the bottom.
    #[default]
    Keep,
    Drop,
}

impl ZeroScorePolicy {
    pub fn from_drop_flag(drop: bool) -> Self {
        if drop {
            ZeroScorePolicy::Drop
        } else {
            ZeroScorePolicy::Keep
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct RankOptions {
    pub zero_scores: ZeroScorePolicy,
    pub limit: Option<usize>,
}

/// Scores every pool entry against `candidate` (entry skills as denominator)
/// and sorts by descending score. Ties keep pool order.
pub fn rank<Id: Clone>(
    candidate: &SkillSet,
    pool: &[PoolEntry<Id>],
    options: RankOptions,
) -> Vec<MatchResult<Id>> {
    let mut results: Vec<MatchResult<Id>> = pool
        .iter()
        .map(|entry| {
            let s = score(candidate, &entry.skills);
            MatchResult {
                id: entry.id.clone(),
                score: s.value,
                explanation: s.explanation(),
                matched: s.matched,
            }
        })
        .filter(|r| options.zero_scores == ZeroScorePolicy::Keep || r.score > 0)
        .collect();

    // `sort_by` is stable
    results.sort_by(|a, b| b.score.cmp(&a.score));

    if let Some(limit) = options.limit {
        results.truncate(limit);
    }
    results
}

/// A stored record together with how well it matched.
#[derive(Debug, Clone, Serialize)]
pub struct Ranked<T> {
    #[serde(flatten)]
    pub record: T,
    pub score: u32,
    pub matched: SkillSet,
    pub explanation: String,
}

/// `rank` over whole records instead of bare pool entries. `skills` pulls the
/// denominator set out of each record.
pub fn rank_records<T, F>(
    candidate: &SkillSet,
    records: Vec<T>,
    skills: F,
    options: RankOptions,
) -> Vec<Ranked<T>>
where
    F: Fn(&T) -> SkillSet,
{
    let pool: Vec<PoolEntry<usize>> = records
        .iter()
        .enumerate()
        .map(|(id, record)| PoolEntry {
            id,
            skills: skills(record),
        })
        .collect();
    let results = rank(candidate, &pool, options);

    let mut slots: Vec<Option<T>> = records.into_iter().map(Some).collect();
    results
        .into_iter()
        .filter_map(|r| {
            slots[r.id].take().map(|record| Ranked {
                record,
                score: r.score,
                matched: r.matched,
                explanation: r.explanation,
            })
        })
        .collect()
}
