use parking_lot::RwLock;
use std::sync::Arc;

use crate::error::PlanError;
use crate::plan::model::{ProblemStatus, StudyPlan};
use crate::plan::progress;

/// Application-wide state container for the plan the user is currently
/// working through. Mutable state is centralized here and passed explicitly
/// to callers instead of living in globals.
#[derive(Clone, Default)]
pub struct AppState {
    active_plan: Arc<RwLock<Option<StudyPlan>>>,
}

impl AppState {
    pub fn new() -> Self {
        AppState {
            active_plan: Arc::new(RwLock::new(None)),
        }
    }

    pub fn set_active_plan(&self, plan: StudyPlan) {
        *self.active_plan.write() = Some(plan);
    }

    pub fn active_plan(&self) -> Option<StudyPlan> {
        self.active_plan.read().clone()
    }

    pub fn clear_active_plan(&self) {
        *self.active_plan.write() = None;
    }

    /// Apply a status change against the active plan and swap the returned
    /// value in under the write lock. Rapid consecutive updates are thereby
    /// serialized: each change is applied to the plan produced by the
    /// previous one, never to a stale base.
    pub fn apply_status(
        &self,
        session_id: &str,
        problem_index: usize,
        status: ProblemStatus,
    ) -> Result<StudyPlan, PlanError> {
        let mut guard = self.active_plan.write();
        let plan = guard
            .as_ref()
            .ok_or_else(|| PlanError::NotFound("no active plan".to_string()))?;
        let next = progress::set_problem_status(plan, session_id, problem_index, status)?;
        *guard = Some(next.clone());
        Ok(next)
    }
}
