//! Candidate scoring, ranking, and cohort overlap.

use std::cmp::Ordering;

use marketmuse_core::{CandidateProfile, ReferenceCatalog, SafetyTier, WeightVector};
use serde::Serialize;

use crate::format::{round2, round4};
use crate::overlap::OverlapMatrix;
use crate::planner::EvaluateParams;
use crate::scoring::{alignment_score, score_candidate, FraudRisk, SubScores};

/// Number of top-ranked candidates carried into forecasting.
pub const COHORT_SIZE: usize = 6;

/// Average expected audience overlap across a cohort. A fixed estimate, not
/// derived from the overlap matrix.
pub const OVERLAP_FACTOR: f64 = 0.18;

/// Sub-scores as reported, rounded to two places.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReportedScores {
    #[serde(serialize_with = "round2")]
    pub relevance: f64,
    #[serde(serialize_with = "round2")]
    pub audience_fit: f64,
    #[serde(serialize_with = "round2")]
    pub engagement_quality: f64,
    #[serde(serialize_with = "round2")]
    pub brand_safety: f64,
    #[serde(serialize_with = "round2")]
    pub consistency: f64,
}

impl From<SubScores> for ReportedScores {
    fn from(s: SubScores) -> Self {
        Self {
            relevance: s.relevance,
            audience_fit: s.audience_fit,
            engagement_quality: s.engagement_quality,
            brand_safety: s.brand_safety,
            consistency: s.consistency,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    pub candidate_id: u32,
    pub name: String,
    pub handle: String,
    /// Weighted composite on a 0–100 scale, full precision.
    #[serde(serialize_with = "round2")]
    pub composite_score: f64,
    pub scores: ReportedScores,
    pub engagement_rate: f64,
    pub safety_tier: SafetyTier,
    #[serde(serialize_with = "round4")]
    pub fraud_score: f64,
    pub fraud_risk: FraudRisk,
    #[serde(serialize_with = "round2")]
    pub alignment_score: f64,
    pub followers: u64,
    pub notes: String,
    /// `true` for members of the top cohort.
    pub overlap_eligible: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    /// Every catalog candidate, best first.
    pub ranked: Vec<ScoredCandidate>,
    pub overlap_matrix: OverlapMatrix,
    pub overlap_factor: f64,
    pub total_evaluated: usize,
}

impl EvaluationResult {
    /// The top cohort, in rank order.
    #[must_use]
    pub fn cohort(&self) -> &[ScoredCandidate] {
        &self.ranked[..self.ranked.len().min(COHORT_SIZE)]
    }

    #[must_use]
    pub fn top(&self) -> Option<&ScoredCandidate> {
        self.ranked.first()
    }
}

/// Orders candidates by composite score, highest first.
///
/// Paired with the stable `slice::sort_by`, so candidates with equal
/// composites keep their catalog order.
#[must_use]
pub fn by_composite_desc(a: &ScoredCandidate, b: &ScoredCandidate) -> Ordering {
    b.composite_score.total_cmp(&a.composite_score)
}

/// Score every catalog candidate, rank them, and build the cohort overlap matrix.
#[must_use]
pub fn evaluate(catalog: &ReferenceCatalog, params: &EvaluateParams) -> EvaluationResult {
    let weights = catalog.weights();

    let mut ranked: Vec<ScoredCandidate> = catalog
        .creators()
        .iter()
        .map(|profile| score_profile(profile, params, &weights))
        .collect();

    ranked.sort_by(by_composite_desc);

    for candidate in ranked.iter_mut().take(COHORT_SIZE) {
        candidate.overlap_eligible = true;
    }

    // Creator ids are unique in a validated catalog.
    let cohort_profiles: Vec<&CandidateProfile> = ranked
        .iter()
        .take(COHORT_SIZE)
        .filter_map(|c| catalog.creator(c.candidate_id))
        .collect();
    let overlap_matrix = OverlapMatrix::build(&cohort_profiles);

    if let Some(top) = ranked.first() {
        tracing::info!(
            candidates = ranked.len(),
            cohort = overlap_matrix.len(),
            top = %top.name,
            top_score = top.composite_score,
            "evaluation complete"
        );
    }

    EvaluationResult {
        total_evaluated: ranked.len(),
        ranked,
        overlap_matrix,
        overlap_factor: OVERLAP_FACTOR,
    }
}

fn score_profile(
    profile: &CandidateProfile,
    params: &EvaluateParams,
    weights: &WeightVector,
) -> ScoredCandidate {
    let (scores, fraud_score, fraud_risk) = score_candidate(profile, params);
    let composite_score = scores.composite(weights);

    tracing::debug!(
        candidate = %profile.name,
        composite = composite_score,
        relevance = scores.relevance,
        audience_fit = scores.audience_fit,
        fraud = %fraud_risk,
        "scored candidate"
    );

    ScoredCandidate {
        candidate_id: profile.id,
        name: profile.name.clone(),
        handle: profile.handle.clone(),
        composite_score,
        scores: scores.into(),
        engagement_rate: profile.engagement_rate,
        safety_tier: profile.safety,
        fraud_score,
        fraud_risk,
        alignment_score: alignment_score(profile),
        followers: profile.followers,
        notes: topic_note(profile),
        overlap_eligible: false,
    }
}

fn topic_note(profile: &CandidateProfile) -> String {
    if profile.topics.is_empty() {
        "General content".to_string()
    } else {
        let lead: Vec<&str> = profile.topics.iter().take(2).map(String::as_str).collect();
        format!("Strong in {}", lead.join(", "))
    }
}
