use chrono::{Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use uuid::Uuid;

use crate::error::PlanError;
use crate::plan::model::{StudyPlan, StudyProblem, StudySession};
use crate::plan::progress;
use crate::pool::candidate::{CandidateProblem, CompanyStats, Difficulty};
use crate::quality::{classify, quality_score, QualityTier};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Policy knob biasing problem selection toward classics, gems, or a
/// balanced/adaptive mix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LearningMode {
    Balanced,
    InterviewClassics,
    HiddenGems,
    Adaptive,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityPreference {
    QualityFirst,
    PopularityFirst,
    Balanced,
    Discovery,
}

/// Form submission driving plan generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanForm {
    pub name: String,
    pub target_companies: Vec<String>,
    /// Weeks, at least 1.
    pub duration: u32,
    /// Problems per day, at least 1.
    pub daily_goal: u32,
    pub skill_level: SkillLevel,
    pub focus_areas: Vec<String>,
    pub start_date: NaiveDate,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratorOptions {
    pub balance_across_companies: bool,
    pub max_problems_per_company: usize,
    pub learning_mode: LearningMode,
    pub quality_preference: QualityPreference,
    pub adaptive_difficulty: bool,
    pub include_quality_metrics: bool,
    /// Candidates carrying metrics must score at least this much on the
    /// composite; metric-less candidates always pass.
    pub min_quality_score: f64,
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        GeneratorOptions {
            balance_across_companies: false,
            max_problems_per_company: crate::config::config().default_max_problems_per_company,
            learning_mode: LearningMode::Balanced,
            quality_preference: QualityPreference::Balanced,
            adaptive_difficulty: false,
            include_quality_metrics: true,
            min_quality_score: 0.0,
        }
    }
}

/// Build a study plan from a form submission and a normalized candidate pool.
///
/// Runs the fixed pipeline: filter, order by the composite selection key,
/// optionally balance across companies, truncate to the requested total,
/// partition into consecutive calendar-day sessions, annotate quality, and
/// derive the initial progress. If the pool falls short of the request the
/// schedule simply covers fewer days (`ceil(selected / daily_goal)` sessions);
/// the caller recomputes any displayed duration from the schedule length.
pub fn generate(
    form: &PlanForm,
    pool: &[CandidateProblem],
    company_stats: &[CompanyStats],
    options: &GeneratorOptions,
) -> Result<StudyPlan, PlanError> {
    if form.duration < 1 {
        return Err(PlanError::Validation("duration must be at least one week".into()));
    }
    if form.daily_goal < 1 {
        return Err(PlanError::Validation("daily goal must be at least one problem".into()));
    }

    // Tolerated degenerate case: no target companies means an empty plan,
    // not a generation failure.
    if form.target_companies.is_empty() {
        tracing::warn!(plan_name = %form.name, "no target companies; producing empty plan");
        return Ok(assemble_plan(form, Vec::new(), options));
    }

    let requested_total = (form.duration as usize) * 7 * (form.daily_goal as usize);

    let eligible = filter_pool(form, pool, options);
    if eligible.is_empty() {
        return Err(PlanError::NoCandidates(format!(
            "0 of {} pool candidates match the current company/topic/skill filters; try relaxing them",
            pool.len()
        )));
    }

    let ordered = order_candidates(eligible, options);

    let mut selected: Vec<CandidateProblem> = if options.balance_across_companies {
        balance_selection(
            ordered,
            company_stats,
            options.max_problems_per_company.max(1),
            requested_total,
        )
    } else {
        ordered.into_iter().take(requested_total).collect()
    };

    if selected.len() < requested_total {
        tracing::debug!(
            requested = requested_total,
            selected = selected.len(),
            "candidate shortfall; schedule will cover fewer days"
        );
    }

    // Ramp the schedule from easier to harder when adaptive difficulty is on.
    if options.adaptive_difficulty {
        selected.sort_by_key(|c| c.difficulty);
    }

    Ok(assemble_plan(form, selected, options))
}

fn filter_pool(
    form: &PlanForm,
    pool: &[CandidateProblem],
    options: &GeneratorOptions,
) -> Vec<CandidateProblem> {
    let focus_lower: Vec<String> = form
        .focus_areas
        .iter()
        .map(|f| f.to_lowercase())
        .collect();

    pool.iter()
        .filter(|p| form.target_companies.contains(&p.company))
        .filter(|p| {
            if focus_lower.is_empty() {
                return true;
            }
            p.topics.iter().any(|topic| {
                let topic_lower = topic.to_lowercase();
                focus_lower.iter().any(|f| topic_lower.contains(f.as_str()))
            })
        })
        .filter(|p| {
            !(form.skill_level == SkillLevel::Beginner && p.difficulty == Difficulty::Hard)
        })
        .filter(|p| {
            if options.min_quality_score <= 0.0 || p.originality_score.is_none() {
                return true;
            }
            quality_score(p) >= options.min_quality_score
        })
        .cloned()
        .collect()
}

/// Order candidates by a single composite selection key.
///
/// The key blends a frequency component (relative to the eligible set's
/// maximum) with either the quality composite or a log-scaled popularity
/// transform, weighted by the quality preference. The gem/classic learning
/// modes then pull their matching tier to the front and backfill with the
/// rest, preserving key order within each group. Ties break on raw frequency,
/// then title, so generation is deterministic.
fn order_candidates(
    eligible: Vec<CandidateProblem>,
    options: &GeneratorOptions,
) -> Vec<CandidateProblem> {
    let max_freq = eligible
        .iter()
        .filter_map(|p| p.frequency)
        .fold(0.0_f64, f64::max);

    let freq_norm = |p: &CandidateProblem| -> f64 {
        match (p.frequency, max_freq > 0.0) {
            (Some(f), true) => f / max_freq,
            _ => 0.0,
        }
    };

    let popularity = |p: &CandidateProblem| -> f64 {
        let engagement = (p.likes.unwrap_or(0) + p.total_votes.unwrap_or(0)) as f64;
        ((1.0 + engagement).ln() / (1.0_f64 + 1_000_000.0).ln()).min(1.0)
    };

    let key = |p: &CandidateProblem| -> f64 {
        match options.quality_preference {
            QualityPreference::QualityFirst | QualityPreference::Discovery => {
                0.7 * quality_score(p) + 0.3 * freq_norm(p)
            }
            QualityPreference::PopularityFirst => 0.7 * popularity(p) + 0.3 * freq_norm(p),
            QualityPreference::Balanced => 0.6 * freq_norm(p) + 0.4 * quality_score(p),
        }
    };

    let mut scored: Vec<(f64, CandidateProblem)> =
        eligible.into_iter().map(|p| (key(&p), p)).collect();

    scored.sort_by(|(ka, a), (kb, b)| {
        kb.partial_cmp(ka)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| {
                b.frequency
                    .unwrap_or(0.0)
                    .partial_cmp(&a.frequency.unwrap_or(0.0))
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.title.cmp(&b.title))
    });

    let ordered: Vec<CandidateProblem> = scored.into_iter().map(|(_, p)| p).collect();

    let front_tier = match options.learning_mode {
        LearningMode::HiddenGems => Some(QualityTier::HiddenGem),
        LearningMode::InterviewClassics => Some(QualityTier::InterviewClassic),
        LearningMode::Balanced | LearningMode::Adaptive => None,
    };

    match front_tier {
        Some(tier) => {
            let (mut front, back): (Vec<_>, Vec<_>) =
                ordered.into_iter().partition(|p| classify(p) == tier);
            front.extend(back);
            front
        }
        None => ordered,
    }
}

/// Round-robin across companies with a per-company cap, so one heavily
/// represented company cannot crowd out the rest. Companies take turns in
/// stats-weight order (rank, then total problem volume, then first
/// appearance in the ordered list); within a company the selection order is
/// preserved.
fn balance_selection(
    ordered: Vec<CandidateProblem>,
    company_stats: &[CompanyStats],
    cap: usize,
    requested_total: usize,
) -> Vec<CandidateProblem> {
    let mut appearance: Vec<String> = Vec::new();
    let mut queues: HashMap<String, VecDeque<CandidateProblem>> = HashMap::new();
    for candidate in ordered {
        if !queues.contains_key(&candidate.company) {
            appearance.push(candidate.company.clone());
        }
        queues
            .entry(candidate.company.clone())
            .or_default()
            .push_back(candidate);
    }

    let mut companies = appearance.clone();
    companies.sort_by_key(|name| {
        let first_seen = appearance
            .iter()
            .position(|c| c == name)
            .unwrap_or(usize::MAX);
        match company_stats.iter().find(|s| &s.company == name) {
            Some(s) => (
                s.rank.unwrap_or(u32::MAX),
                -(s.total_problems as i64),
                first_seen,
            ),
            None => (u32::MAX, 0, first_seen),
        }
    });

    let available: usize = queues.values().map(|q| q.len()).sum();
    let mut out = Vec::with_capacity(requested_total.min(available));
    let mut taken: HashMap<String, usize> = HashMap::new();

    while out.len() < requested_total {
        let mut progressed = false;
        for name in &companies {
            if out.len() >= requested_total {
                break;
            }
            if taken.get(name).copied().unwrap_or(0) >= cap {
                continue;
            }
            if let Some(candidate) = queues.get_mut(name).and_then(|q| q.pop_front()) {
                *taken.entry(name.clone()).or_insert(0) += 1;
                out.push(candidate);
                progressed = true;
            }
        }
        if !progressed {
            break;
        }
    }

    out
}

fn assemble_plan(
    form: &PlanForm,
    selected: Vec<CandidateProblem>,
    options: &GeneratorOptions,
) -> StudyPlan {
    let now = Utc::now();
    let daily = form.daily_goal.max(1) as usize;

    let mut schedule = Vec::with_capacity(selected.len().div_ceil(daily));
    for (day, chunk) in selected.chunks(daily).enumerate() {
        // One session per calendar day, weekends included.
        let date = form.start_date + Duration::days(day as i64);
        let problems = chunk.iter().map(|c| annotate(c.clone(), options)).collect();
        schedule.push(StudySession {
            id: Uuid::new_v4().to_string(),
            date,
            problems,
            completed: false,
            completed_at: None,
        });
    }

    let progress = progress::recompute_progress(&schedule, now, Utc::now().date_naive());

    let plan = StudyPlan {
        id: Uuid::new_v4().to_string(),
        name: form.name.clone(),
        target_companies: form.target_companies.clone(),
        duration: form.duration,
        daily_goal: form.daily_goal,
        focus_areas: form.focus_areas.clone(),
        schedule,
        progress,
        created_at: now,
        updated_at: now,
    };

    tracing::info!(
        plan_id = %plan.id,
        sessions = plan.schedule.len(),
        problems = plan.progress.total_problems,
        "generated study plan"
    );

    plan
}

fn annotate(candidate: CandidateProblem, options: &GeneratorOptions) -> StudyProblem {
    let mut problem = StudyProblem::new(candidate);
    if options.include_quality_metrics {
        let tier = classify(&problem.problem);
        problem.quality_score = Some(quality_score(&problem.problem));
        problem.quality_tier = Some(tier);
        problem.is_hidden_gem = Some(tier == QualityTier::HiddenGem);
        problem.is_interview_classic = Some(tier == QualityTier::InterviewClassic);
        problem.recommendation_reason = Some(recommendation_reason(tier, options.learning_mode));
    }
    problem
}

/// Short human-readable rationale keyed off the tier and the learning mode.
pub fn recommendation_reason(tier: QualityTier, mode: LearningMode) -> String {
    match (tier, mode) {
        (QualityTier::HiddenGem, LearningMode::HiddenGems) => {
            "Hidden gem picked for your discovery-focused plan".to_string()
        }
        (QualityTier::HiddenGem, _) => {
            "Highly original and rarely seen; a strong differentiator".to_string()
        }
        (QualityTier::InterviewClassic, LearningMode::InterviewClassics) => {
            "Core classic for your classics-focused plan".to_string()
        }
        (QualityTier::InterviewClassic, _) => {
            "Asked constantly in real interviews; worth knowing cold".to_string()
        }
        (QualityTier::RisingStar, _) => {
            "Gaining traction with strong community reception".to_string()
        }
        (QualityTier::Controversial, _) => {
            "Mixed community reception; skim the discussion before investing time".to_string()
        }
        (QualityTier::Standard, _) => {
            "Solid practice for your target companies".to_string()
        }
    }
}
