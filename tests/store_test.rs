use chrono::Utc;
use uuid::Uuid;

use studyforge::error::PlanError;
use studyforge::plan::{PlanStore, StudyPlan, StudyProgress};

fn temp_store() -> PlanStore {
    let dir = std::env::temp_dir().join(format!("studyforge-test-{}", Uuid::new_v4()));
    PlanStore::new(dir)
}

fn sample_plan(name: &str) -> StudyPlan {
    let now = Utc::now();
    StudyPlan {
        id: Uuid::new_v4().to_string(),
        name: name.to_string(),
        target_companies: vec!["Google".to_string()],
        duration: 1,
        daily_goal: 2,
        focus_areas: Vec::new(),
        schedule: Vec::new(),
        progress: StudyProgress::default(),
        created_at: now,
        updated_at: now,
    }
}

#[tokio::test]
async fn test_save_get_roundtrip() {
    let store = temp_store();
    let plan = sample_plan("roundtrip");

    store.save(&plan).await.unwrap();
    let loaded = store.get(&plan.id).await.unwrap().unwrap();
    assert_eq!(loaded, plan);
}

#[tokio::test]
async fn test_get_unknown_is_none() {
    let store = temp_store();
    assert!(store.get("missing").await.unwrap().is_none());
}

#[tokio::test]
async fn test_list_is_empty_before_any_save() {
    let store = temp_store();
    assert!(store.list().await.is_empty());
}

#[tokio::test]
async fn test_upsert_preserves_insertion_order() {
    let store = temp_store();
    let p1 = sample_plan("first");
    let mut p2 = sample_plan("second");
    let p3 = sample_plan("third");

    store.save(&p1).await.unwrap();
    store.save(&p2).await.unwrap();
    store.save(&p3).await.unwrap();

    // Overwrite the middle plan; it must keep its slot, not move to the end.
    p2.name = "second, renamed".to_string();
    store.save(&p2).await.unwrap();

    let names: Vec<String> = store.list().await.into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["first", "second, renamed", "third"]);
}

#[tokio::test]
async fn test_delete_removes_and_unknown_is_not_found() {
    let store = temp_store();
    let plan = sample_plan("doomed");
    store.save(&plan).await.unwrap();

    store.delete(&plan.id).await.unwrap();
    assert!(store.get(&plan.id).await.unwrap().is_none());
    assert!(store.list().await.is_empty());

    assert!(matches!(
        store.delete(&plan.id).await,
        Err(PlanError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_corrupt_plan_file_degrades_to_skip() {
    let store = temp_store();
    let p1 = sample_plan("healthy");
    let p2 = sample_plan("corrupted");
    store.save(&p1).await.unwrap();
    store.save(&p2).await.unwrap();

    std::fs::write(store.dir().join(format!("{}.json", p2.id)), "not json at all").unwrap();

    let names: Vec<String> = store.list().await.into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["healthy"]);
}

#[tokio::test]
async fn test_import_skips_existing_ids_and_reports_counts() {
    let store = temp_store();
    let existing = sample_plan("keep me");
    store.save(&existing).await.unwrap();

    let mut collides = existing.clone();
    collides.name = "impostor".to_string();
    let fresh = sample_plan("brand new");

    let outcome = store.import(vec![collides, fresh.clone()]).await.unwrap();
    assert_eq!(outcome.imported, 1);
    assert_eq!(outcome.skipped, 1);

    // Existing plan wins the collision.
    let kept = store.get(&existing.id).await.unwrap().unwrap();
    assert_eq!(kept.name, "keep me");
    assert!(store.get(&fresh.id).await.unwrap().is_some());
}
