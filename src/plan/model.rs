use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::pool::candidate::{CandidateProblem, Difficulty};
use crate::quality::QualityTier;

/// Per-plan state of one scheduled problem. Completed and skipped are
/// terminal for progress-counting purposes; re-opening is an explicit user
/// action that triggers a progress recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProblemStatus {
    NotStarted,
    InProgress,
    Completed,
    Skipped,
}

impl ProblemStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, ProblemStatus::Completed | ProblemStatus::Skipped)
    }
}

/// A candidate problem annotated with per-plan state and optional
/// generation-time quality annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyProblem {
    #[serde(flatten)]
    pub problem: CandidateProblem,
    pub status: ProblemStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quality_tier: Option<QualityTier>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recommendation_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_hidden_gem: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_interview_classic: Option<bool>,
}

impl StudyProblem {
    pub fn new(problem: CandidateProblem) -> Self {
        StudyProblem {
            problem,
            status: ProblemStatus::NotStarted,
            completed_at: None,
            notes: None,
            quality_score: None,
            quality_tier: None,
            recommendation_reason: None,
            is_hidden_gem: None,
            is_interview_classic: None,
        }
    }
}

/// One calendar day's assignment. `completed` and `completedAt` are derived
/// by the progress tracker, never hand-edited.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudySession {
    pub id: String,
    pub date: NaiveDate,
    /// Suggested solve order within the day.
    pub problems: Vec<StudyProblem>,
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

/// Per-category completion counts for one breakdown dimension.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryProgress {
    pub completed: u32,
    pub total: u32,
}

/// Aggregate progress derived from a plan's schedule. Never authoritative
/// on its own; always recomputed from the session/problem completion state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyProgress {
    pub total_problems: u32,
    pub completed_problems: u32,
    pub skipped_problems: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub average_problems_per_day: f64,
    /// Percentage of total problems that are completed; 0 when the plan is empty.
    pub completion_rate: f64,
    pub difficulty_breakdown: BTreeMap<Difficulty, CategoryProgress>,
    /// A problem with N topics contributes to N topic buckets, so these
    /// totals need not sum to totalProblems.
    pub topic_progress: BTreeMap<String, CategoryProgress>,
    pub company_progress: BTreeMap<String, CategoryProgress>,
}

/// The top-level persisted entity. Created once by the generator, mutated
/// only through progress-tracker operations and plan-level edits, and
/// destroyed by explicit deletion from the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyPlan {
    /// Stable, generated once at creation, never reused.
    pub id: String,
    pub name: String,
    pub target_companies: Vec<String>,
    /// Weeks, at least 1.
    pub duration: u32,
    pub daily_goal: u32,
    pub focus_areas: Vec<String>,
    pub schedule: Vec<StudySession>,
    pub progress: StudyProgress,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
