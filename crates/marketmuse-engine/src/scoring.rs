//! Per-candidate sub-score heuristics and fraud classification.
//!
//! Every sub-score lands in `[0.0, 1.0]`; the composite is a weighted sum
//! scaled to `[0.0, 100.0]`.

use marketmuse_core::{CandidateProfile, FraudIndicators, SafetyTier, Vertical, WeightVector};
use serde::{Deserialize, Serialize};

use crate::planner::{AudienceSegment, EvaluateParams};

/// Topic match points per vertical. Points are scaled by [`TOPIC_POINT_SCALE`].
const SKINCARE_TOPIC_POINTS: &[(&str, f64)] = &[("skincare", 2.0), ("dermatology", 1.5)];
const BEAUTY_TOPIC_POINTS: &[(&str, f64)] = &[("beauty", 2.0), ("skincare", 1.0)];
const TOPIC_POINT_SCALE: f64 = 0.3;

/// Topics that earn a relevance bonus when the brief is sustainability-focused.
pub const SUSTAINABILITY_TOPICS: &[&str] = &[
    "sustainable",
    "eco",
    "eco-friendly",
    "cruelty-free",
    "clean-beauty",
    "zero-waste",
];
const SUSTAINABILITY_BONUS: f64 = 0.3;

/// Topics counted toward the informational brand-alignment score.
pub const ALIGNMENT_TOPICS: &[&str] = &[
    "sustainable",
    "cruelty-free",
    "dermatologist-tested",
    "eco-friendly",
    "clean-beauty",
];
const ALIGNMENT_POINTS: f64 = 0.25;

/// Engagement rate treated as excellent.
pub const EXCELLENT_ENGAGEMENT_RATE: f64 = 0.06;
/// Reel engagement rate treated as fully consistent.
pub const CONSISTENT_REEL_RATE: f64 = 0.15;

const HIGH_FRAUD_THRESHOLD: f64 = 0.1;
const MEDIUM_FRAUD_THRESHOLD: f64 = 0.05;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FraudRisk {
    Low,
    Medium,
    High,
}

impl FraudRisk {
    /// Classify a combined fraud score. Thresholds are exclusive lower bounds.
    #[must_use]
    pub fn classify(score: f64) -> Self {
        if score > HIGH_FRAUD_THRESHOLD {
            FraudRisk::High
        } else if score > MEDIUM_FRAUD_THRESHOLD {
            FraudRisk::Medium
        } else {
            FraudRisk::Low
        }
    }

    /// Factor applied to the brand-safety sub-score.
    #[must_use]
    pub fn safety_multiplier(self) -> f64 {
        match self {
            FraudRisk::Low => 1.0,
            FraudRisk::Medium => 0.8,
            FraudRisk::High => 0.5,
        }
    }
}

impl std::fmt::Display for FraudRisk {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FraudRisk::Low => write!(f, "low"),
            FraudRisk::Medium => write!(f, "medium"),
            FraudRisk::High => write!(f, "high"),
        }
    }
}

/// The five weighted dimensions of the composite score.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubScores {
    pub relevance: f64,
    pub audience_fit: f64,
    pub engagement_quality: f64,
    /// Brand safety after the fraud-risk multiplier.
    pub brand_safety: f64,
    pub consistency: f64,
}

impl SubScores {
    /// Weighted composite on a 0–100 scale.
    #[must_use]
    pub fn composite(&self, weights: &WeightVector) -> f64 {
        100.0
            * (weights.relevance * self.relevance
                + weights.audience * self.audience_fit
                + weights.engagement * self.engagement_quality
                + weights.safety * self.brand_safety
                + weights.consistency * self.consistency)
    }
}

#[must_use]
pub fn relevance_score(profile: &CandidateProfile, params: &EvaluateParams) -> f64 {
    let table = match params.vertical {
        Vertical::Skincare => SKINCARE_TOPIC_POINTS,
        Vertical::Beauty => BEAUTY_TOPIC_POINTS,
    };
    let points: f64 = table
        .iter()
        .filter(|(topic, _)| profile.has_topic(topic))
        .map(|&(_, pts)| pts)
        .sum();

    let bonus = if params.sustainability_focus {
        topic_hits(profile, SUSTAINABILITY_TOPICS) * SUSTAINABILITY_BONUS
    } else {
        0.0
    };

    (points * TOPIC_POINT_SCALE + bonus).min(1.0)
}

#[must_use]
pub fn audience_fit(profile: &CandidateProfile, segment: AudienceSegment) -> f64 {
    let aud = &profile.audience;
    let fit = match segment {
        AudienceSegment::Genz => aud.young_adults + 0.7 * aud.teens - 0.5 * aud.mature,
        AudienceSegment::General => aud.young_adults + 0.8 * aud.adults,
    };
    fit.clamp(0.0, 1.0)
}

#[must_use]
pub fn engagement_quality(engagement_rate: f64) -> f64 {
    (engagement_rate / EXCELLENT_ENGAGEMENT_RATE).min(1.0)
}

#[must_use]
pub fn safety_base(tier: SafetyTier) -> f64 {
    match tier {
        SafetyTier::Clean => 1.0,
        SafetyTier::MinorFlags => 0.7,
        SafetyTier::MajorFlags => 0.3,
    }
}

#[must_use]
pub fn consistency_score(reel_rate: f64) -> f64 {
    (reel_rate / CONSISTENT_REEL_RATE).min(1.0)
}

/// Combined fraud score: `0.4·spike + 0.4·bot + 0.2·repetitive`.
#[must_use]
pub fn fraud_score(indicators: &FraudIndicators) -> f64 {
    0.4 * indicators.spike_frequency
        + 0.4 * indicators.bot_ratio
        + 0.2 * indicators.repetitive_comments
}

/// Informational alignment score; not part of the composite.
#[must_use]
pub fn alignment_score(profile: &CandidateProfile) -> f64 {
    topic_hits(profile, ALIGNMENT_TOPICS) * ALIGNMENT_POINTS
}

/// Score every dimension for one candidate and classify its fraud risk.
#[must_use]
pub fn score_candidate(
    profile: &CandidateProfile,
    params: &EvaluateParams,
) -> (SubScores, f64, FraudRisk) {
    let fraud = fraud_score(&profile.fraud_indicators);
    let risk = FraudRisk::classify(fraud);
    let scores = SubScores {
        relevance: relevance_score(profile, params),
        audience_fit: audience_fit(profile, params.audience),
        engagement_quality: engagement_quality(profile.engagement_rate),
        brand_safety: safety_base(profile.safety) * risk.safety_multiplier(),
        consistency: consistency_score(profile.history.reel),
    };
    (scores, fraud, risk)
}

#[allow(clippy::cast_precision_loss)]
fn topic_hits(profile: &CandidateProfile, topics: &[&str]) -> f64 {
    topics.iter().filter(|t| profile.has_topic(t)).count() as f64
}

#[cfg(test)]
mod tests {
    use marketmuse_core::ReferenceCatalog;

    use super::*;
    use crate::planner::CreatorTier;

    fn params(vertical: Vertical, audience: AudienceSegment, sustainable: bool) -> EvaluateParams {
        EvaluateParams {
            vertical,
            audience,
            tier: CreatorTier::Mixed,
            sustainability_focus: sustainable,
        }
    }

    fn creator(name: &str) -> CandidateProfile {
        let catalog = ReferenceCatalog::builtin().unwrap();
        catalog
            .creators()
            .iter()
            .find(|c| c.name == name)
            .cloned()
            .unwrap()
    }

    #[test]
    fn fraud_thresholds_are_exclusive() {
        assert_eq!(FraudRisk::classify(0.0), FraudRisk::Low);
        assert_eq!(FraudRisk::classify(0.05), FraudRisk::Low);
        assert_eq!(FraudRisk::classify(0.050_001), FraudRisk::Medium);
        assert_eq!(FraudRisk::classify(0.1), FraudRisk::Medium);
        assert_eq!(FraudRisk::classify(0.100_001), FraudRisk::High);
    }

    #[test]
    fn fraud_score_weights_indicators() {
        let ind = FraudIndicators {
            spike_frequency: 0.08,
            bot_ratio: 0.12,
            repetitive_comments: 0.15,
        };
        // 0.032 + 0.048 + 0.03
        assert!((fraud_score(&ind) - 0.11).abs() < 1e-12);
    }

    #[test]
    fn high_fraud_halves_safety() {
        let glow = creator("GlowNGo");
        let (scores, _, risk) =
            score_candidate(&glow, &params(Vertical::Beauty, AudienceSegment::General, false));
        assert_eq!(risk, FraudRisk::High);
        assert!((scores.brand_safety - 0.35).abs() < 1e-12);
    }

    #[test]
    fn relevance_skincare_with_sustainability_caps_at_one() {
        let bae = creator("SustainableSkinBae");
        let score = relevance_score(&bae, &params(Vertical::Skincare, AudienceSegment::Genz, true));
        assert!((score - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn relevance_beauty_counts_secondary_term() {
        let derm = creator("DermGenZ");
        let score = relevance_score(&derm, &params(Vertical::Beauty, AudienceSegment::General, false));
        assert!((score - 0.3).abs() < 1e-12);
    }

    #[test]
    fn relevance_without_matches_is_zero() {
        let sci = creator("SkinScientist");
        let score = relevance_score(&sci, &params(Vertical::Skincare, AudienceSegment::General, false));
        assert_eq!(score, 0.0);
    }

    #[test]
    fn audience_fit_genz_formula() {
        let eco = creator("EcoGlow");
        // 0.56 + 0.7*0.18 - 0.5*0.08
        let fit = audience_fit(&eco, AudienceSegment::Genz);
        assert!((fit - 0.646).abs() < 1e-9);
    }

    #[test]
    fn audience_fit_is_clamped() {
        let mut eco = creator("EcoGlow");
        eco.audience.young_adults = 0.9;
        eco.audience.adults = 0.9;
        assert_eq!(audience_fit(&eco, AudienceSegment::General), 1.0);
        eco.audience.young_adults = 0.0;
        eco.audience.teens = 0.0;
        eco.audience.mature = 1.0;
        assert_eq!(audience_fit(&eco, AudienceSegment::Genz), 0.0);
    }

    #[test]
    fn engagement_and_consistency_cap_at_one() {
        assert_eq!(engagement_quality(0.09), 1.0);
        assert!((engagement_quality(0.03) - 0.5).abs() < 1e-12);
        assert_eq!(consistency_score(0.2), 1.0);
        assert!((consistency_score(0.075) - 0.5).abs() < 1e-12);
    }

    #[test]
    fn safety_base_by_tier() {
        assert_eq!(safety_base(SafetyTier::Clean), 1.0);
        assert_eq!(safety_base(SafetyTier::MinorFlags), 0.7);
        assert_eq!(safety_base(SafetyTier::MajorFlags), 0.3);
    }

    #[test]
    fn alignment_counts_quarter_points() {
        let bae = creator("SustainableSkinBae");
        assert!((alignment_score(&bae) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn composite_of_perfect_scores_is_one_hundred() {
        let perfect = SubScores {
            relevance: 1.0,
            audience_fit: 1.0,
            engagement_quality: 1.0,
            brand_safety: 1.0,
            consistency: 1.0,
        };
        assert!((perfect.composite(&WeightVector::default()) - 100.0).abs() < 1e-9);
    }
}
