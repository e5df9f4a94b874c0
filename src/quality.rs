use serde::{Deserialize, Serialize};

use crate::pool::candidate::CandidateProblem;

/// Community-derived quality classification. Always recomputed from a
/// candidate's metrics, never stored as ground truth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QualityTier {
    HiddenGem,
    RisingStar,
    InterviewClassic,
    Controversial,
    Standard,
}

/// Map a candidate's community metrics to exactly one quality tier.
///
/// Total over the full input domain: a problem missing any of
/// originality score, total votes, or likes is always Standard. The
/// remaining rules are checked in order because their ranges overlap;
/// the first match wins.
pub fn classify(problem: &CandidateProblem) -> QualityTier {
    let (originality, votes, likes) = match (
        problem.originality_score,
        problem.total_votes,
        problem.likes,
    ) {
        (Some(o), Some(v), Some(l)) => (o, v, l),
        _ => return QualityTier::Standard,
    };

    if originality > 0.85 && votes < 1000 && likes > 50 {
        QualityTier::HiddenGem
    } else if originality > 0.8 && (1000..=5000).contains(&votes) && likes > 100 {
        QualityTier::RisingStar
    } else if likes > 1000 && votes > 5000 {
        QualityTier::InterviewClassic
    } else if originality < 0.7 {
        QualityTier::Controversial
    } else {
        QualityTier::Standard
    }
}

/// Composite 0..1 quality score attached to problems at generation time.
///
/// Weighted blend of originality and a log-scaled popularity transform:
/// `0.6 * originality + 0.4 * min(1, ln(1 + likes) / ln(1 + 100_000))`.
/// Missing fields contribute 0, so the score is total and strictly
/// monotonic in originality for a fixed like count.
pub fn quality_score(problem: &CandidateProblem) -> f64 {
    let originality = problem.originality_score.unwrap_or(0.0).clamp(0.0, 1.0);
    let likes = problem.likes.unwrap_or(0) as f64;
    let popularity = ((1.0 + likes).ln() / (1.0_f64 + 100_000.0).ln()).min(1.0);
    0.6 * originality + 0.4 * popularity
}
