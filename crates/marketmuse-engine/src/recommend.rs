//! Recommendation synthesis: turns a ranked cohort and its forecast into a
//! prioritized action plan with guardrails attached.

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::evaluation::{EvaluationResult, ScoredCandidate};
use crate::forecast::ForecastResult;
use crate::format::{group_thousands, whole_count};
use crate::guardrails::{
    contingency_plans, BrandSafetyChecklist, ContingencyPlan, PerformanceManagement, TestPlan,
};
use crate::planner::OptimizeParams;

/// Composite scores strictly above this are high performers.
pub const HIGH_PERFORMER_THRESHOLD: f64 = 75.0;
/// Lower bound (inclusive) of the medium bucket; the upper bound is the high threshold, inclusive.
pub const MEDIUM_PERFORMER_FLOOR: f64 = 60.0;

const PRIORITY_CREATORS: usize = 3;
const INCREMENTAL_REACH_SHARE: f64 = 0.12;
const CREATIVE_CONVERSION_SHARE: f64 = 0.15;
const LANDING_CVR_SHARE: f64 = 0.20;
const TIMING_ENGAGEMENT_DELTA_PCT: f64 = 12.0;
const BUDGET_CPA_DELTA_PCT: f64 = -15.0;

fn budget_reserve_share() -> Decimal {
    Decimal::new(15, 2)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Lever {
    #[serde(rename = "Creator Mix")]
    CreatorMix,
    Creative,
    Landing,
    Timing,
    Budget,
}

impl Lever {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CreatorMix => "Creator Mix",
            Self::Creative => "Creative",
            Self::Landing => "Landing",
            Self::Timing => "Timing",
            Self::Budget => "Budget",
        }
    }
}

impl fmt::Display for Lever {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Implementation effort tier: small, medium, large.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Effort {
    S,
    M,
    L,
}

impl Effort {
    /// Fixed ordering key, S < M < L.
    #[must_use]
    pub fn ordinal(self) -> u8 {
        match self {
            Self::S => 0,
            Self::M => 1,
            Self::L => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Confidence {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub lever: Lever,
    pub action: String,
    pub rationale: String,
    /// Directional effect, e.g. `↑CTR`.
    pub impact: String,
    pub kpi_impact: String,
    /// Numeric form of `kpi_impact`: a count, a fraction, or a percentage delta
    /// depending on the lever.
    pub kpi_delta: f64,
    pub effort: Effort,
    pub confidence: Confidence,
    pub owner: String,
}

/// Cohort members bucketed by composite score. Names in rank order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PerformanceTiers {
    pub high: Vec<String>,
    pub medium: Vec<String>,
}

impl PerformanceTiers {
    #[must_use]
    pub fn from_cohort(cohort: &[ScoredCandidate]) -> Self {
        let names = |pred: fn(f64) -> bool| -> Vec<String> {
            cohort
                .iter()
                .filter(|c| pred(c.composite_score))
                .map(|c| c.name.clone())
                .collect()
        };
        Self {
            high: names(is_high_performer),
            medium: names(is_medium_performer),
        }
    }
}

#[must_use]
pub fn is_high_performer(composite: f64) -> bool {
    composite > HIGH_PERFORMER_THRESHOLD
}

#[must_use]
pub fn is_medium_performer(composite: f64) -> bool {
    (MEDIUM_PERFORMER_FLOOR..=HIGH_PERFORMER_THRESHOLD).contains(&composite)
}

#[derive(Debug, Clone, Serialize)]
pub struct RecommendationPlan {
    /// Exactly five entries, lowest effort first.
    pub prioritized: Vec<Recommendation>,
    pub performance_tiers: PerformanceTiers,
    pub budget_reserve_inr: Decimal,
    pub test_plan: TestPlan,
    pub brand_safety: BrandSafetyChecklist,
    pub performance_management: PerformanceManagement,
    pub contingency_plans: Vec<ContingencyPlan>,
}

impl RecommendationPlan {
    #[must_use]
    pub fn top(&self) -> Option<&Recommendation> {
        self.prioritized.first()
    }
}

/// Orders recommendations by effort, lowest first.
///
/// Paired with the stable `slice::sort_by`, so equal-effort entries keep
/// their generation order.
#[must_use]
pub fn by_effort_asc(a: &Recommendation, b: &Recommendation) -> Ordering {
    a.effort.ordinal().cmp(&b.effort.ordinal())
}

/// Build the prioritized action plan for a cohort and its forecast.
#[must_use]
pub fn recommend(
    params: &OptimizeParams,
    evaluation: &EvaluationResult,
    forecast: &ForecastResult,
) -> RecommendationPlan {
    let cohort = evaluation.cohort();
    let performance_tiers = PerformanceTiers::from_cohort(cohort);
    let budget_reserve_inr = (params.budget_inr * budget_reserve_share()).round_dp(2);

    let mut prioritized = vec![
        creator_mix(params, cohort, forecast),
        creative(forecast),
        landing(forecast),
        timing(),
        budget(budget_reserve_inr),
    ];
    prioritized.sort_by(by_effort_asc);

    tracing::info!(
        recommendations = prioritized.len(),
        high_performers = performance_tiers.high.len(),
        medium_performers = performance_tiers.medium.len(),
        reserve_inr = %budget_reserve_inr,
        "recommendations ready"
    );

    RecommendationPlan {
        prioritized,
        performance_tiers,
        budget_reserve_inr,
        test_plan: TestPlan::standard(),
        brand_safety: BrandSafetyChecklist::standard(),
        performance_management: PerformanceManagement::standard(),
        contingency_plans: contingency_plans(),
    }
}

/// Names the top high performers. With fewer than three, falls back to the
/// cohort leaders and lowers confidence.
#[allow(clippy::cast_precision_loss)]
fn creator_mix(
    params: &OptimizeParams,
    cohort: &[ScoredCandidate],
    forecast: &ForecastResult,
) -> Recommendation {
    let high: Vec<&ScoredCandidate> = cohort
        .iter()
        .filter(|c| is_high_performer(c.composite_score))
        .collect();
    let high_count = high.len();
    let enough_high = high_count >= PRIORITY_CREATORS;
    let picks: Vec<&ScoredCandidate> = if enough_high {
        high.into_iter().take(PRIORITY_CREATORS).collect()
    } else {
        cohort.iter().take(PRIORITY_CREATORS).collect()
    };
    let names: Vec<&str> = picks.iter().map(|c| c.name.as_str()).collect();
    let lead_score = picks.first().map_or(0.0, |c| c.composite_score);

    let incremental = whole_count(forecast.forecast.reach.p50 as f64 * INCREMENTAL_REACH_SHARE);

    let rationale = if enough_high {
        format!("Top performers show {lead_score:.1}+ composite scores with strong audience alignment")
    } else {
        format!(
            "Only {high_count} of {} cohort members score above {HIGH_PERFORMER_THRESHOLD:.0}; lead creator scores {lead_score:.1}",
            cohort.len()
        )
    };

    Recommendation {
        lever: Lever::CreatorMix,
        action: format!(
            "Prioritize top {} performers: {}. Target {:.0}%+ unique reach.",
            names.len(),
            names.join(", "),
            params.target_unique_reach * 100.0
        ),
        rationale,
        impact: "↑unique reach".to_string(),
        kpi_impact: format!("+{} incremental reach", group_thousands(incremental)),
        kpi_delta: incremental as f64,
        effort: Effort::S,
        confidence: if enough_high {
            Confidence::High
        } else {
            Confidence::Medium
        },
        owner: "Campaign Manager".to_string(),
    }
}

#[allow(clippy::cast_precision_loss)]
fn creative(forecast: &ForecastResult) -> Recommendation {
    let extra = whole_count(forecast.forecast.conversions_p50 as f64 * CREATIVE_CONVERSION_SHARE);
    Recommendation {
        lever: Lever::Creative,
        action: "Lead with refillable packaging demo in first 2s; A/B test 'Try eco-mini' vs 'Get assessment' CTAs".to_string(),
        rationale: "Gen Z responds 40% better to sustainability messaging and interactive CTAs"
            .to_string(),
        impact: "↑CTR".to_string(),
        kpi_impact: format!("+{extra} conversions"),
        kpi_delta: extra as f64,
        effort: Effort::S,
        confidence: Confidence::Medium,
        owner: "Creative Team".to_string(),
    }
}

fn landing(forecast: &ForecastResult) -> Recommendation {
    let cvr_gain = forecast.forecast.cvr_p50 * LANDING_CVR_SHARE;
    Recommendation {
        lever: Lever::Landing,
        action: "Add UPI express checkout + customer reviews section + ingredient transparency"
            .to_string(),
        rationale: "Gen Z values transparency and seamless mobile experience".to_string(),
        impact: "↑CVR".to_string(),
        kpi_impact: format!("+{:.1}% CVR improvement", cvr_gain * 100.0),
        kpi_delta: cvr_gain,
        effort: Effort::M,
        confidence: Confidence::High,
        owner: "Product Team".to_string(),
    }
}

fn timing() -> Recommendation {
    Recommendation {
        lever: Lever::Timing,
        action: "Post Reels 6-8PM IST, Stories 10-11AM. Front-load week 1 with 60% of content"
            .to_string(),
        rationale: "Peak Gen Z engagement windows and early momentum building".to_string(),
        impact: "↑engagement".to_string(),
        kpi_impact: format!("+{TIMING_ENGAGEMENT_DELTA_PCT:.0}% engagement rate"),
        kpi_delta: TIMING_ENGAGEMENT_DELTA_PCT,
        effort: Effort::S,
        confidence: Confidence::Medium,
        owner: "Social Media Manager".to_string(),
    }
}

fn budget(reserve_inr: Decimal) -> Recommendation {
    let reserve_whole = reserve_inr.trunc().to_u64().unwrap_or_default();
    Recommendation {
        lever: Lever::Budget,
        action: format!(
            "Allocate 70% to top 3 creators, 30% to testing. Reserve ₹{} for performance scaling",
            group_thousands(reserve_whole)
        ),
        rationale: "Focus spend on proven performers while maintaining test budget".to_string(),
        impact: "↓CPA".to_string(),
        kpi_impact: format!("{BUDGET_CPA_DELTA_PCT:.0}% CPA vs equal distribution"),
        kpi_delta: BUDGET_CPA_DELTA_PCT,
        effort: Effort::S,
        confidence: Confidence::High,
        owner: "Performance Marketing".to_string(),
    }
}
