pub mod config;
pub mod error;
pub mod logging;
pub mod plan;
pub mod pool;
pub mod quality;
pub mod state;

pub use error::PlanError;
pub use plan::{StudyPlan, StudyProblem, StudyProgress, StudySession};
pub use pool::{CandidateProblem, Difficulty};
pub use quality::QualityTier;
