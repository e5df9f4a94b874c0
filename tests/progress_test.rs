use chrono::{Duration, NaiveDate, Utc};

use studyforge::error::PlanError;
use studyforge::plan::{
    generate, recompute_progress, set_problem_status, GeneratorOptions, PlanForm, ProblemStatus,
    SkillLevel, StudyProblem, StudySession,
};
use studyforge::pool::{CandidateProblem, Difficulty};
use studyforge::state::AppState;

fn candidate(title: &str, company: &str, topics: &[&str]) -> CandidateProblem {
    CandidateProblem {
        title: title.to_string(),
        difficulty: Difficulty::Medium,
        topics: topics.iter().map(|t| t.to_string()).collect(),
        company: company.to_string(),
        link: None,
        likes: None,
        dislikes: None,
        total_votes: None,
        originality_score: None,
        acceptance_rate: None,
        frequency: Some(1.0),
        company_count: None,
    }
}

fn sample_plan() -> studyforge::StudyPlan {
    let pool: Vec<CandidateProblem> = (0..14)
        .map(|i| candidate(&format!("P{:02}", i), "Google", &["Array", "Hash Table"]))
        .collect();
    let form = PlanForm {
        name: "progress test".to_string(),
        target_companies: vec!["Google".to_string()],
        duration: 1,
        daily_goal: 2,
        skill_level: SkillLevel::Intermediate,
        focus_areas: Vec::new(),
        start_date: Utc::now().date_naive(),
    };
    generate(&form, &pool, &[], &GeneratorOptions::default()).unwrap()
}

fn day_session(date: NaiveDate, statuses: &[ProblemStatus]) -> StudySession {
    let problems = statuses
        .iter()
        .enumerate()
        .map(|(i, status)| {
            let mut p = StudyProblem::new(candidate(&format!("P{}", i), "Google", &["Array"]));
            p.status = *status;
            p
        })
        .collect::<Vec<_>>();
    let completed = !problems.is_empty() && problems.iter().all(|p| p.status.is_terminal());
    StudySession {
        id: format!("session-{}", date),
        date,
        problems,
        completed,
        completed_at: None,
    }
}

#[test]
fn test_progress_invariants_hold_under_mixed_statuses() {
    let plan = sample_plan();
    let sid = plan.schedule[0].id.clone();

    let plan = set_problem_status(&plan, &sid, 0, ProblemStatus::Completed).unwrap();
    let plan = set_problem_status(&plan, &sid, 1, ProblemStatus::Skipped).unwrap();
    let sid2 = plan.schedule[1].id.clone();
    let plan = set_problem_status(&plan, &sid2, 0, ProblemStatus::InProgress).unwrap();

    let p = &plan.progress;
    assert_eq!(p.total_problems, 14);
    assert_eq!(p.completed_problems, 1);
    assert_eq!(p.skipped_problems, 1);
    assert!(p.completed_problems + p.skipped_problems <= p.total_problems);
    let expected_rate = 1.0 / 14.0 * 100.0;
    assert!((p.completion_rate - expected_rate).abs() < 1e-9);
}

#[test]
fn test_breakdowns_partition_totals() {
    let plan = sample_plan();
    let sid = plan.schedule[0].id.clone();
    let plan = set_problem_status(&plan, &sid, 0, ProblemStatus::Completed).unwrap();

    let p = &plan.progress;
    let difficulty_total: u32 = p.difficulty_breakdown.values().map(|c| c.total).sum();
    let company_total: u32 = p.company_progress.values().map(|c| c.total).sum();
    assert_eq!(difficulty_total, p.total_problems);
    assert_eq!(company_total, p.total_problems);

    // Each problem carries two topics, so topic buckets double-count.
    let topic_total: u32 = p.topic_progress.values().map(|c| c.total).sum();
    assert_eq!(topic_total, p.total_problems * 2);
    assert_eq!(p.company_progress["Google"].completed, 1);
}

#[test]
fn test_status_set_is_idempotent() {
    let plan = sample_plan();
    let sid = plan.schedule[0].id.clone();

    let once = set_problem_status(&plan, &sid, 0, ProblemStatus::Completed).unwrap();
    let twice = set_problem_status(&once, &sid, 0, ProblemStatus::Completed).unwrap();

    assert_eq!(once.progress, twice.progress);
    assert_eq!(
        once.schedule[0].problems[0].completed_at,
        twice.schedule[0].problems[0].completed_at
    );
}

#[test]
fn test_copy_on_write_leaves_input_untouched() {
    let plan = sample_plan();
    let sid = plan.schedule[0].id.clone();

    let next = set_problem_status(&plan, &sid, 0, ProblemStatus::Completed).unwrap();

    assert_eq!(plan.schedule[0].problems[0].status, ProblemStatus::NotStarted);
    assert_eq!(plan.progress.completed_problems, 0);
    assert_eq!(next.progress.completed_problems, 1);
}

#[test]
fn test_unknown_session_and_index_are_not_found() {
    let plan = sample_plan();
    assert!(matches!(
        set_problem_status(&plan, "nope", 0, ProblemStatus::Completed),
        Err(PlanError::NotFound(_))
    ));

    let sid = plan.schedule[0].id.clone();
    assert!(matches!(
        set_problem_status(&plan, &sid, 99, ProblemStatus::Completed),
        Err(PlanError::NotFound(_))
    ));
}

#[test]
fn test_session_completion_derived_and_reopen_recomputes() {
    let plan = sample_plan();
    let sid = plan.schedule[0].id.clone();

    let plan = set_problem_status(&plan, &sid, 0, ProblemStatus::Completed).unwrap();
    assert!(!plan.schedule[0].completed);

    let plan = set_problem_status(&plan, &sid, 1, ProblemStatus::Skipped).unwrap();
    assert!(plan.schedule[0].completed);
    assert!(plan.schedule[0].completed_at.is_some());

    // Re-opening is allowed and must drop the derived state back down.
    let plan = set_problem_status(&plan, &sid, 0, ProblemStatus::NotStarted).unwrap();
    assert!(!plan.schedule[0].completed);
    assert!(plan.schedule[0].completed_at.is_none());
    assert_eq!(plan.progress.completed_problems, 0);
}

#[test]
fn test_streak_counts_consecutive_completed_days() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
    let done = [ProblemStatus::Completed];
    let open = [ProblemStatus::NotStarted];

    let schedule = vec![
        day_session(today - Duration::days(3), &done),
        day_session(today - Duration::days(2), &done),
        day_session(today - Duration::days(1), &done),
        day_session(today, &done),
    ];
    let progress = recompute_progress(&schedule, Utc::now(), today);
    assert_eq!(progress.current_streak, 4);
    assert_eq!(progress.longest_streak, 4);

    // An incomplete day in the middle breaks the run.
    let schedule = vec![
        day_session(today - Duration::days(3), &done),
        day_session(today - Duration::days(2), &open),
        day_session(today - Duration::days(1), &done),
        day_session(today, &done),
    ];
    let progress = recompute_progress(&schedule, Utc::now(), today);
    assert_eq!(progress.current_streak, 2);
    assert_eq!(progress.longest_streak, 2);
}

#[test]
fn test_streak_broken_by_missing_day_and_future_sessions_ignored() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
    let done = [ProblemStatus::Completed];

    // Completed sessions two days apart with no session in between.
    let schedule = vec![
        day_session(today - Duration::days(4), &done),
        day_session(today - Duration::days(2), &done),
        day_session(today - Duration::days(1), &done),
        // Tomorrow's session never counts, completed or not.
        day_session(today + Duration::days(1), &done),
    ];
    let progress = recompute_progress(&schedule, Utc::now(), today);
    assert_eq!(progress.current_streak, 2);
    assert_eq!(progress.longest_streak, 2);
}

#[test]
fn test_current_streak_zero_when_latest_day_incomplete() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
    let done = [ProblemStatus::Completed];
    let open = [ProblemStatus::NotStarted];

    let schedule = vec![
        day_session(today - Duration::days(2), &done),
        day_session(today - Duration::days(1), &done),
        day_session(today, &open),
    ];
    let progress = recompute_progress(&schedule, Utc::now(), today);
    assert_eq!(progress.current_streak, 0);
    assert_eq!(progress.longest_streak, 2);
}

#[test]
fn test_average_problems_per_day() {
    let today = NaiveDate::from_ymd_opt(2026, 3, 10).unwrap();
    let done = [ProblemStatus::Completed, ProblemStatus::Completed];

    let schedule = vec![
        day_session(today - Duration::days(2), &done),
        day_session(today - Duration::days(1), &done),
        day_session(today, &done),
    ];
    let created_at = (today - Duration::days(3))
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc();
    let progress = recompute_progress(&schedule, created_at, today);
    assert_eq!(progress.completed_problems, 6);
    assert!((progress.average_problems_per_day - 2.0).abs() < 1e-9);
}

#[test]
fn test_empty_schedule_rates_are_zero() {
    let progress = recompute_progress(&[], Utc::now(), Utc::now().date_naive());
    assert_eq!(progress.total_problems, 0);
    assert_eq!(progress.completion_rate, 0.0);
    assert_eq!(progress.current_streak, 0);
}

#[test]
fn test_app_state_serializes_consecutive_updates() {
    let plan = sample_plan();
    let sid = plan.schedule[0].id.clone();

    let state = AppState::new();
    state.set_active_plan(plan);

    // Two rapid updates both land because each applies to the plan produced
    // by the previous one.
    state
        .apply_status(&sid, 0, ProblemStatus::Completed)
        .unwrap();
    let latest = state
        .apply_status(&sid, 1, ProblemStatus::Completed)
        .unwrap();

    assert_eq!(latest.progress.completed_problems, 2);
    assert_eq!(
        state.active_plan().unwrap().progress.completed_problems,
        2
    );
}
