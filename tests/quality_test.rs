use studyforge::pool::{CandidateProblem, Difficulty};
use studyforge::quality::{classify, quality_score, QualityTier};

fn candidate(
    originality: Option<f64>,
    votes: Option<u64>,
    likes: Option<u64>,
) -> CandidateProblem {
    CandidateProblem {
        title: "Two Sum".to_string(),
        difficulty: Difficulty::Easy,
        topics: vec!["Array".to_string()],
        company: "Google".to_string(),
        link: None,
        likes,
        dislikes: None,
        total_votes: votes,
        originality_score: originality,
        acceptance_rate: None,
        frequency: None,
        company_count: None,
    }
}

#[test]
fn test_missing_metrics_always_standard() {
    assert_eq!(classify(&candidate(None, None, None)), QualityTier::Standard);
    assert_eq!(
        classify(&candidate(Some(0.99), None, Some(5000))),
        QualityTier::Standard
    );
    assert_eq!(
        classify(&candidate(Some(0.99), Some(10), None)),
        QualityTier::Standard
    );
    assert_eq!(
        classify(&candidate(None, Some(10), Some(5000))),
        QualityTier::Standard
    );
}

#[test]
fn test_totality_over_adversarial_inputs() {
    let extremes = [
        candidate(Some(f64::NAN), Some(0), Some(0)),
        candidate(Some(-1.0), Some(u64::MAX), Some(u64::MAX)),
        candidate(Some(2.0), Some(0), Some(0)),
        candidate(Some(0.0), Some(0), Some(0)),
        candidate(Some(1.0), Some(999), Some(51)),
    ];
    for problem in &extremes {
        // Must return exactly one tier and never panic.
        let tier = classify(problem);
        assert!(matches!(
            tier,
            QualityTier::HiddenGem
                | QualityTier::RisingStar
                | QualityTier::InterviewClassic
                | QualityTier::Controversial
                | QualityTier::Standard
        ));
    }
}

#[test]
fn test_hidden_gem_boundary_is_exclusive() {
    // 0.85 is not > 0.85, and no other rule matches.
    assert_eq!(
        classify(&candidate(Some(0.85), Some(500), Some(100))),
        QualityTier::Standard
    );
    assert_eq!(
        classify(&candidate(Some(0.86), Some(500), Some(100))),
        QualityTier::HiddenGem
    );
}

#[test]
fn test_rising_star_includes_vote_lower_bound() {
    // totalVotes == 1000 is eligible for rising-star.
    assert_eq!(
        classify(&candidate(Some(0.81), Some(1000), Some(150))),
        QualityTier::RisingStar
    );
    // Just under the vote floor drops out of rising-star entirely.
    assert_eq!(
        classify(&candidate(Some(0.81), Some(999), Some(150))),
        QualityTier::Standard
    );
}

#[test]
fn test_interview_classic() {
    assert_eq!(
        classify(&candidate(Some(0.75), Some(6000), Some(2000))),
        QualityTier::InterviewClassic
    );
    // Rule order matters: an original low-vote problem is a gem even with
    // classic-level likes.
    assert_eq!(
        classify(&candidate(Some(0.9), Some(900), Some(1500))),
        QualityTier::HiddenGem
    );
}

#[test]
fn test_controversial() {
    assert_eq!(
        classify(&candidate(Some(0.5), Some(100), Some(10))),
        QualityTier::Controversial
    );
}

#[test]
fn test_quality_score_monotonic_in_originality() {
    let low = quality_score(&candidate(Some(0.2), Some(100), Some(50)));
    let high = quality_score(&candidate(Some(0.9), Some(100), Some(50)));
    assert!(high > low);
}

#[test]
fn test_quality_score_bounded() {
    let problems = [
        candidate(None, None, None),
        candidate(Some(1.0), Some(u64::MAX), Some(u64::MAX)),
        candidate(Some(0.0), Some(0), Some(0)),
    ];
    for problem in &problems {
        let score = quality_score(problem);
        assert!((0.0..=1.0).contains(&score), "score {} out of range", score);
    }
}
