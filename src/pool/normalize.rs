use serde::{Deserialize, Serialize};

use crate::error::PlanError;
use crate::pool::candidate::{CandidateProblem, Difficulty};

/// One entry from the recommendation API response (snake_case wire format).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub acceptance_rate: Option<f64>,
    #[serde(default)]
    pub frequency: Option<f64>,
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default)]
    pub recommended_company: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(default)]
    pub dislikes: Option<u64>,
    #[serde(default)]
    pub total_votes: Option<u64>,
    #[serde(default)]
    pub originality_score: Option<f64>,
}

/// Envelope for the recommendation API response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    #[serde(default)]
    pub recommendations: Vec<RecommendationItem>,
    #[serde(default)]
    pub requested_count: usize,
    #[serde(default)]
    pub selected_count: usize,
    #[serde(default)]
    pub available_pool: usize,
}

/// One record from a static problem snapshot (camelCase wire format).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotItem {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub title_slug: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub frequency: Option<f64>,
    #[serde(default)]
    pub acceptance_rate: Option<f64>,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub companies: Vec<String>,
    #[serde(default)]
    pub company_count: Option<u32>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub likes: Option<u64>,
    #[serde(default)]
    pub dislikes: Option<u64>,
    #[serde(default)]
    pub total_votes: Option<u64>,
    #[serde(default)]
    pub originality_score: Option<f64>,
}

/// The two raw shapes a candidate pool can arrive in. Made explicit as a
/// tagged union so each variant has its own normalization path instead of
/// duck-typed field probing.
#[derive(Debug, Clone, PartialEq)]
pub enum RawPoolItem {
    Recommendation(RecommendationItem),
    Snapshot(SnapshotItem),
}

/// Convert heterogeneous raw records into the canonical candidate shape.
///
/// Company pick rule: `recommended_company` if present, else the first entry
/// of `companies` that is also a target company, else the first entry of
/// `companies`, else empty string. Difficulty defaults to Unknown rather than
/// failing (display-only metadata); a missing title is a hard validation
/// error.
pub fn normalize(
    items: &[RawPoolItem],
    target_companies: &[String],
) -> Result<Vec<CandidateProblem>, PlanError> {
    let mut out = Vec::with_capacity(items.len());

    for (idx, item) in items.iter().enumerate() {
        let candidate = match item {
            RawPoolItem::Recommendation(rec) => {
                require_title(&rec.title, idx)?;
                CandidateProblem {
                    title: rec.title.clone(),
                    difficulty: Difficulty::parse(rec.difficulty.as_deref()),
                    topics: rec.topics.clone(),
                    company: pick_company(
                        rec.recommended_company.as_deref(),
                        &rec.companies,
                        target_companies,
                    ),
                    link: rec.link.clone(),
                    likes: rec.likes,
                    dislikes: rec.dislikes,
                    total_votes: rec.total_votes,
                    originality_score: rec.originality_score,
                    acceptance_rate: rec.acceptance_rate,
                    frequency: rec.frequency,
                    company_count: None,
                }
            }
            RawPoolItem::Snapshot(snap) => {
                require_title(&snap.title, idx)?;
                CandidateProblem {
                    title: snap.title.clone(),
                    difficulty: Difficulty::parse(snap.difficulty.as_deref()),
                    topics: snap.topics.clone(),
                    company: pick_company(None, &snap.companies, target_companies),
                    link: snap.link.clone(),
                    likes: snap.likes,
                    dislikes: snap.dislikes,
                    total_votes: snap.total_votes,
                    originality_score: snap.originality_score,
                    acceptance_rate: snap.acceptance_rate,
                    frequency: snap.frequency,
                    company_count: snap.company_count,
                }
            }
        };
        out.push(candidate);
    }

    Ok(out)
}

fn require_title(title: &str, idx: usize) -> Result<(), PlanError> {
    if title.trim().is_empty() {
        return Err(PlanError::Validation(format!(
            "pool item at index {} has no title",
            idx
        )));
    }
    Ok(())
}

fn pick_company(
    recommended: Option<&str>,
    companies: &[String],
    target_companies: &[String],
) -> String {
    if let Some(rec) = recommended {
        if !rec.is_empty() {
            return rec.to_string();
        }
    }
    if let Some(hit) = companies.iter().find(|c| target_companies.contains(*c)) {
        return hit.clone();
    }
    companies.first().cloned().unwrap_or_default()
}
