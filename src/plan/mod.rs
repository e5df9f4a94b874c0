pub mod export;
pub mod generator;
pub mod model;
pub mod progress;
pub mod store;

pub use export::{export_plan, export_plans, import_study_plans, to_ics, BulkExport, PlanExport};
pub use generator::{generate, GeneratorOptions, LearningMode, PlanForm, QualityPreference, SkillLevel};
pub use model::{CategoryProgress, ProblemStatus, StudyPlan, StudyProblem, StudyProgress, StudySession};
pub use progress::{recompute_progress, recompute_progress_now, set_problem_status};
pub use store::{ImportOutcome, PlanStore};
