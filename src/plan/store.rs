use std::path::{Path, PathBuf};

use crate::config;
use crate::error::PlanError;
use crate::plan::model::StudyPlan;

/// File-backed plan persistence. One JSON file per plan plus an index file
/// recording first-save order, so `list` is stable across overwrites.
/// There is no partial-field update: callers read-modify-write whole plans,
/// which matches the progress tracker returning whole new plan values.
#[derive(Debug, Clone)]
pub struct PlanStore {
    dir: PathBuf,
}

/// Result of a bulk import: existing plans win id collisions, and both
/// counts are reported to the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    pub imported: usize,
    pub skipped: usize,
}

impl PlanStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        PlanStore { dir: dir.into() }
    }

    /// Store rooted at the configured data directory (or the platform
    /// app-data default).
    pub fn open_default() -> Self {
        let dir = config::config()
            .data_dir
            .clone()
            .unwrap_or_else(|| config::app_data_dir().join("plans"));
        PlanStore::new(dir)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn plan_path(&self, id: &str) -> PathBuf {
        self.dir.join(format!("{}.json", id))
    }

    fn index_path(&self) -> PathBuf {
        self.dir.join("index.json")
    }

    /// Upsert by id: an existing plan is overwritten entirely (last write
    /// wins) and keeps its position in the index; a new plan is appended.
    pub async fn save(&self, plan: &StudyPlan) -> Result<(), PlanError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            PlanError::Storage(format!(
                "failed to create plan directory {:?}: {}",
                self.dir, e
            ))
        })?;

        let json = serde_json::to_string_pretty(plan)
            .map_err(|e| PlanError::Storage(format!("failed to serialize plan: {}", e)))?;

        let path = self.plan_path(&plan.id);
        tokio::fs::write(&path, json).await.map_err(|e| {
            PlanError::Storage(format!("failed to write plan file {:?}: {}", path, e))
        })?;

        let mut index = self.read_index().await;
        if !index.iter().any(|id| id == &plan.id) {
            index.push(plan.id.clone());
            self.write_index(&index).await?;
        }

        tracing::info!(plan_id = %plan.id, path = ?path, "plan saved");
        Ok(())
    }

    /// All stored plans in first-save order. Read failures degrade: a
    /// missing directory or corrupt entry is logged and skipped rather than
    /// crashing the caller.
    pub async fn list(&self) -> Vec<StudyPlan> {
        let index = self.read_index().await;
        let mut plans = Vec::with_capacity(index.len());

        for id in index {
            match self.get(&id).await {
                Ok(Some(plan)) => plans.push(plan),
                Ok(None) => {
                    tracing::warn!(plan_id = %id, "indexed plan missing or unreadable; skipping");
                }
                Err(e) => {
                    tracing::warn!(plan_id = %id, error = %e, "failed to load plan; skipping");
                }
            }
        }

        plans
    }

    /// Fetch one plan by id; None when absent. A corrupt plan file is
    /// reported as None with a warning, consistent with degraded reads.
    pub async fn get(&self, id: &str) -> Result<Option<StudyPlan>, PlanError> {
        let path = self.plan_path(id);
        let text = match tokio::fs::read_to_string(&path).await {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(PlanError::Storage(format!(
                    "failed to read plan file {:?}: {}",
                    path, e
                )));
            }
        };

        match serde_json::from_str::<StudyPlan>(&text) {
            Ok(plan) => Ok(Some(plan)),
            Err(e) => {
                tracing::warn!(plan_id = %id, path = ?path, error = %e, "corrupt plan file");
                Ok(None)
            }
        }
    }

    /// Delete a stored plan. Unknown ids are an explicit NotFound.
    pub async fn delete(&self, id: &str) -> Result<(), PlanError> {
        let path = self.plan_path(id);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PlanError::NotFound(format!("plan {}", id)));
            }
            Err(e) => {
                return Err(PlanError::Storage(format!(
                    "failed to delete plan file {:?}: {}",
                    path, e
                )));
            }
        }

        let mut index = self.read_index().await;
        index.retain(|entry| entry != id);
        self.write_index(&index).await?;

        tracing::info!(plan_id = %id, "plan deleted");
        Ok(())
    }

    /// Import plans, skipping any whose id already exists (existing plan
    /// wins). Both counts are reported.
    pub async fn import(&self, plans: Vec<StudyPlan>) -> Result<ImportOutcome, PlanError> {
        let mut outcome = ImportOutcome::default();

        for plan in plans {
            if self.get(&plan.id).await?.is_some() {
                tracing::info!(plan_id = %plan.id, "import skipped: id already stored");
                outcome.skipped += 1;
                continue;
            }
            self.save(&plan).await?;
            outcome.imported += 1;
        }

        Ok(outcome)
    }

    async fn read_index(&self) -> Vec<String> {
        match tokio::fs::read_to_string(self.index_path()).await {
            Ok(text) => match serde_json::from_str::<Vec<String>>(&text) {
                Ok(index) => index,
                Err(e) => {
                    tracing::warn!(error = %e, "corrupt plan index; treating store as empty");
                    Vec::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "failed to read plan index; treating store as empty");
                Vec::new()
            }
        }
    }

    async fn write_index(&self, index: &[String]) -> Result<(), PlanError> {
        let json = serde_json::to_string_pretty(index)
            .map_err(|e| PlanError::Storage(format!("failed to serialize plan index: {}", e)))?;
        let path = self.index_path();
        tokio::fs::write(&path, json).await.map_err(|e| {
            PlanError::Storage(format!("failed to write plan index {:?}: {}", path, e))
        })
    }
}
