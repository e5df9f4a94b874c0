use chrono::{DateTime, NaiveDate, Utc};

use crate::error::PlanError;
use crate::plan::model::{
    CategoryProgress, ProblemStatus, StudyPlan, StudyProgress, StudySession,
};

/// Derive aggregate progress from a schedule. Pure and deterministic:
/// "today" is injected so streaks and elapsed-day math are reproducible.
pub fn recompute_progress(
    schedule: &[StudySession],
    created_at: DateTime<Utc>,
    today: NaiveDate,
) -> StudyProgress {
    let mut progress = StudyProgress::default();

    for session in schedule {
        for problem in &session.problems {
            progress.total_problems += 1;
            let completed = problem.status == ProblemStatus::Completed;
            if completed {
                progress.completed_problems += 1;
            }
            if problem.status == ProblemStatus::Skipped {
                progress.skipped_problems += 1;
            }

            bump(
                progress
                    .difficulty_breakdown
                    .entry(problem.problem.difficulty)
                    .or_default(),
                completed,
            );
            for topic in &problem.problem.topics {
                bump(
                    progress.topic_progress.entry(topic.clone()).or_default(),
                    completed,
                );
            }
            bump(
                progress
                    .company_progress
                    .entry(problem.problem.company.clone())
                    .or_default(),
                completed,
            );
        }
    }

    let (current, longest) = compute_streaks(schedule, today);
    progress.current_streak = current;
    progress.longest_streak = longest;

    progress.completion_rate = if progress.total_problems == 0 {
        0.0
    } else {
        progress.completed_problems as f64 / progress.total_problems as f64 * 100.0
    };

    let days_elapsed = (today - created_at.date_naive()).num_days().max(1);
    progress.average_problems_per_day =
        progress.completed_problems as f64 / days_elapsed as f64;

    progress
}

/// Convenience wrapper using the current calendar day.
pub fn recompute_progress_now(schedule: &[StudySession], created_at: DateTime<Utc>) -> StudyProgress {
    recompute_progress(schedule, created_at, Utc::now().date_naive())
}

fn bump(entry: &mut CategoryProgress, completed: bool) {
    entry.total += 1;
    if completed {
        entry.completed += 1;
    }
}

/// Walk sessions in chronological order counting runs of fully completed
/// sessions on consecutive calendar days. Only sessions dated today or
/// earlier qualify; a non-completed past session or a missing day breaks
/// the run. Returns (current, longest).
fn compute_streaks(schedule: &[StudySession], today: NaiveDate) -> (u32, u32) {
    let mut past: Vec<&StudySession> = schedule.iter().filter(|s| s.date <= today).collect();
    past.sort_by_key(|s| s.date);

    let mut current = 0u32;
    let mut longest = 0u32;
    let mut prev_date: Option<NaiveDate> = None;

    for session in past {
        if session.completed {
            current = match prev_date {
                Some(prev) if (session.date - prev).num_days() == 1 => current + 1,
                _ => 1,
            };
            prev_date = Some(session.date);
            longest = longest.max(current);
        } else {
            current = 0;
            prev_date = None;
        }
    }

    (current, longest)
}

/// Apply a status change and return a structurally new plan value with the
/// session's derived completion state and the plan progress recomputed.
/// Never mutates the input, so callers relying on value identity for change
/// detection stay correct; rapid consecutive updates must thread each
/// returned plan forward. Setting an already-held status is an idempotent
/// no-op beyond the copy.
pub fn set_problem_status(
    plan: &StudyPlan,
    session_id: &str,
    problem_index: usize,
    new_status: ProblemStatus,
) -> Result<StudyPlan, PlanError> {
    let mut next = plan.clone();
    let now = Utc::now();

    let session = next
        .schedule
        .iter_mut()
        .find(|s| s.id == session_id)
        .ok_or_else(|| PlanError::NotFound(format!("session {}", session_id)))?;

    let session_len = session.problems.len();
    let problem = session
        .problems
        .get_mut(problem_index)
        .ok_or_else(|| {
            PlanError::NotFound(format!(
                "problem index {} in session {} (len {})",
                problem_index, session_id, session_len
            ))
        })?;

    if problem.status != new_status {
        problem.status = new_status;
        problem.completed_at = if new_status.is_terminal() { Some(now) } else { None };
    }

    let all_terminal =
        !session.problems.is_empty() && session.problems.iter().all(|p| p.status.is_terminal());
    if all_terminal && !session.completed {
        session.completed_at = Some(now);
    } else if !all_terminal {
        session.completed_at = None;
    }
    session.completed = all_terminal;

    next.progress = recompute_progress_now(&next.schedule, next.created_at);
    next.updated_at = now;

    tracing::debug!(
        plan_id = %next.id,
        session_id = %session_id,
        problem_index,
        status = ?new_status,
        completion_rate = next.progress.completion_rate,
        "problem status updated"
    );

    Ok(next)
}
