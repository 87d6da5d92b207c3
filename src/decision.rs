use chrono::Utc;

use crate::models::{Confidence, Decision, QualificationScore, QualificationStatus};

pub const DEFAULT_REVIEW_THRESHOLD: u32 = 65;
pub const DECIDED_BY: &str = "lead-qualification-engine";
pub const REVIEW_QUEUE_STEP: &str = "Queue for human review within 4 hours";

pub fn qualification_status(score: &QualificationScore) -> QualificationStatus {
    if score.total_score >= 70 && score.confidence == Confidence::High {
        QualificationStatus::Qualified
    } else if score.total_score < 40 {
        QualificationStatus::NotQualified
    } else {
        QualificationStatus::NeedsReview
    }
}

/// Maps a score to a status, a review flag, and next steps.
///
/// `review_threshold` is accepted for API compatibility; the review window
/// is fixed at 60..=70.
pub fn make_qualification_decision(score: &QualificationScore, review_threshold: u32) -> Decision {
    let status = qualification_status(score);
    let low_confidence = score.confidence == Confidence::Low;
    let many_concerns = score.concerns.len() > 2;

    let requires_human_review = status == QualificationStatus::NeedsReview
        || low_confidence
        || (60..=70).contains(&score.total_score)
        || many_concerns;

    let human_review_reason = if !requires_human_review {
        None
    } else if low_confidence {
        Some("Low confidence due to insufficient data".to_string())
    } else if status == QualificationStatus::NeedsReview {
        Some("Borderline qualification score".to_string())
    } else if many_concerns {
        Some("Multiple concerns identified".to_string())
    } else {
        None
    };

    let mut next_steps = Vec::with_capacity(score.recommendations.len() + 1);
    if requires_human_review {
        next_steps.push(REVIEW_QUEUE_STEP.to_string());
    }
    next_steps.extend(score.recommendations.iter().cloned());

    tracing::info!(
        status = %status,
        total_score = score.total_score,
        requires_human_review,
        review_threshold,
        "Qualification decision made"
    );

    Decision {
        status,
        requires_human_review,
        human_review_reason,
        next_steps,
        qualified_at: Utc::now(),
        qualified_by: DECIDED_BY.to_string(),
    }
}
