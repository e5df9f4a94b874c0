use anyhow::{bail, Context, Result};
use chrono::Utc;

use studyforge::plan::{generate, GeneratorOptions, PlanForm, PlanStore, SkillLevel};
use studyforge::pool::{normalize, RawPoolItem, SnapshotItem};

/// Minimal driver standing in for the dashboard UI: load a snapshot pool,
/// generate a plan for the given companies, and persist it.
///
/// Usage: studyforge <snapshot.json> <company[,company...]> [weeks] [daily-goal]
#[tokio::main]
async fn main() -> Result<()> {
    studyforge::logging::init_logging();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 2 {
        bail!("usage: studyforge <snapshot.json> <company[,company...]> [weeks] [daily-goal]");
    }

    let snapshot_path = &args[0];
    let target_companies: Vec<String> = args[1]
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();
    let duration: u32 = match args.get(2) {
        Some(raw) => raw.parse().context("weeks must be a positive integer")?,
        None => studyforge::config::config().default_duration_weeks,
    };
    let daily_goal: u32 = match args.get(3) {
        Some(raw) => raw.parse().context("daily goal must be a positive integer")?,
        None => studyforge::config::config().default_daily_goal,
    };

    let text = tokio::fs::read_to_string(snapshot_path)
        .await
        .with_context(|| format!("failed to read snapshot {}", snapshot_path))?;
    let snapshot: Vec<SnapshotItem> = serde_json::from_str(&text)
        .with_context(|| format!("snapshot {} is not a problem snapshot array", snapshot_path))?;
    let raw: Vec<RawPoolItem> = snapshot.into_iter().map(RawPoolItem::Snapshot).collect();

    let pool = normalize(&raw, &target_companies)?;
    tracing::info!(candidates = pool.len(), "snapshot pool normalized");

    let form = PlanForm {
        name: format!("{} study plan", args[1]),
        target_companies,
        duration,
        daily_goal,
        skill_level: SkillLevel::Intermediate,
        focus_areas: Vec::new(),
        start_date: Utc::now().date_naive(),
    };

    let plan = generate(&form, &pool, &[], &GeneratorOptions::default())?;

    let store = PlanStore::open_default();
    store.save(&plan).await?;

    println!(
        "plan {} saved to {:?}: {} problems over {} sessions",
        plan.id,
        store.dir(),
        plan.progress.total_problems,
        plan.schedule.len()
    );

    Ok(())
}
