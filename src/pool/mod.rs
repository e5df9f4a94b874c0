pub mod candidate;
pub mod normalize;

pub use candidate::{CandidateProblem, CompanyStats, Difficulty, DifficultyDistribution};
pub use normalize::{normalize, RawPoolItem, RecommendationItem, RecommendationResponse, SnapshotItem};
