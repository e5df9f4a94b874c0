use serde::{Deserialize, Serialize};

/// Display-only difficulty metadata. Anything we cannot recognize maps to
/// Unknown rather than failing normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Unknown,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Unknown
    }
}

impl Difficulty {
    /// Case-insensitive parse; unrecognized or missing values are Unknown.
    pub fn parse(raw: Option<&str>) -> Difficulty {
        match raw.map(|s| s.trim().to_ascii_uppercase()) {
            Some(ref s) if s == "EASY" => Difficulty::Easy,
            Some(ref s) if s == "MEDIUM" => Difficulty::Medium,
            Some(ref s) if s == "HARD" => Difficulty::Hard,
            _ => Difficulty::Unknown,
        }
    }
}

/// A problem eligible for inclusion in a study plan, in canonical shape.
/// Community metrics are optional; their absence is policy-driven (e.g. a
/// problem without metrics always classifies as the standard quality tier),
/// never an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateProblem {
    pub title: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default)]
    pub topics: Vec<String>,
    #[serde(default)]
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub likes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dislikes: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_votes: Option<u64>,
    /// In [0, 1] when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub originality_score: Option<f64>,
    /// In [0, 1] when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acceptance_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_count: Option<u32>,
}

/// Pre-aggregated per-company statistics, consumed read-only for balancing
/// order during plan generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyStats {
    pub company: String,
    #[serde(default)]
    pub total_problems: u32,
    #[serde(default)]
    pub unique_problems: u32,
    #[serde(default)]
    pub avg_frequency: f64,
    #[serde(default)]
    pub avg_acceptance_rate: f64,
    #[serde(default)]
    pub difficulty_distribution: DifficultyDistribution,
    #[serde(default)]
    pub top_topics: Vec<String>,
    #[serde(default)]
    pub timeframe_coverage: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DifficultyDistribution {
    #[serde(rename = "EASY", default)]
    pub easy: u32,
    #[serde(rename = "MEDIUM", default)]
    pub medium: u32,
    #[serde(rename = "HARD", default)]
    pub hard: u32,
    #[serde(rename = "UNKNOWN", default)]
    pub unknown: u32,
}
