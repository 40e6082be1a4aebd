// Skill matching: vocabulary, extraction, coverage scoring and ranking.
// Every matching call site in the service goes through this module; there is
// exactly one scoring convention (see `scorer::score`).

pub mod extractor;
pub mod handlers;
pub mod ranker;
pub mod scorer;
pub mod skill_set;
pub mod vocabulary;

pub use extractor::extract;
pub use ranker::{rank, rank_records, MatchResult, PoolEntry, RankOptions, Ranked, ZeroScorePolicy};
pub use scorer::{score, Score};
pub use skill_set::SkillSet;
pub use vocabulary::SkillVocabulary;
