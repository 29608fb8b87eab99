//! Reach, click, conversion, and cost projections for the selected cohort.
//!
//! All bands and scenario deltas are fixed heuristics layered on the p50
//! point estimate; nothing here samples a distribution.

use marketmuse_core::{ReferenceCatalog, Season};
use serde::Serialize;

use crate::evaluation::{EvaluationResult, ScoredCandidate};
use crate::format::{round2, round4, whole_count};
use crate::planner::PredictParams;

pub const MIN_REACH_RATE: f64 = 0.2;
pub const MAX_REACH_RATE: f64 = 0.8;
const BASE_REACH_RATE: f64 = 0.45;
const REACH_RATE_PIVOT_ER: f64 = 0.03;
const REACH_RATE_ER_SLOPE: f64 = 2.0;

pub const REEL_MULTIPLIER: f64 = 1.4;
pub const STORY_MULTIPLIER: f64 = 0.6;

/// Share of the overlap factor removed from total reach.
const DEDUP_SHARE: f64 = 0.5;

pub const SUSTAINABILITY_CTR_UPLIFT: f64 = 0.003;
pub const CREATIVE_CTR_UPLIFT: f64 = 0.002;

/// Half-width of the p10/p90 reach band, as a fraction of p50.
pub const UNCERTAINTY_WIDTH: f64 = 0.25;

const CREATIVE_SCENARIO_CTR_DELTA_PCT: f64 = 15.0;
const CREATIVE_SCENARIO_QUALITY_PCT: f64 = 20.0;
const BUDGET_SCENARIO_BUDGET_DELTA_PCT: f64 = -15.0;
const BUDGET_SCENARIO_REACH_DELTA_PCT: f64 = -12.0;
const BUDGET_SCENARIO_CPA_DELTA_PCT: f64 = 8.0;

/// Reach multiplier for the 2-mid-tier + 4-micro alternative mix.
pub const MID_TIER_MIX_REACH_MULTIPLIER: f64 = 1.3;

/// Organic reach rate from engagement, clamped to `[0.2, 0.8]`.
#[must_use]
pub fn reach_rate(engagement_rate: f64) -> f64 {
    (BASE_REACH_RATE + (engagement_rate - REACH_RATE_PIVOT_ER) * REACH_RATE_ER_SLOPE)
        .clamp(MIN_REACH_RATE, MAX_REACH_RATE)
}

/// Total reach after the linear overlap correction.
#[must_use]
pub fn dedup_reach(total_reach: f64, overlap_factor: f64) -> f64 {
    total_reach * (1.0 - DEDUP_SHARE * overlap_factor)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReachBand {
    pub p10: u64,
    pub p50: u64,
    pub p90: u64,
}

impl ReachBand {
    #[must_use]
    pub fn around(p50: f64) -> Self {
        Self {
            p10: whole_count(p50 * (1.0 - UNCERTAINTY_WIDTH)),
            p50: whole_count(p50),
            p90: whole_count(p50 * (1.0 + UNCERTAINTY_WIDTH)),
        }
    }
}

/// Point estimates for the base scenario.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaseForecast {
    pub reach: ReachBand,
    pub total_reach_p50: u64,
    pub clicks_p50: u64,
    #[serde(serialize_with = "round4")]
    pub ctr_p50: f64,
    #[serde(serialize_with = "round4")]
    pub cvr_p50: f64,
    pub conversions_p50: u64,
    #[serde(serialize_with = "round2")]
    pub cpm_p50: f64,
    #[serde(serialize_with = "round2")]
    pub cpc_p50: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreatorReach {
    pub candidate_id: u32,
    pub creator: String,
    #[serde(serialize_with = "round4")]
    pub reach_rate: f64,
    pub reach: u64,
    pub posts_reach: u64,
    pub stories_reach: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreativeUpliftScenario {
    pub description: String,
    pub ctr_delta_pct: f64,
    pub conversions_delta: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetReductionScenario {
    pub description: String,
    pub budget_delta_pct: f64,
    pub reach_delta_pct: f64,
    pub cpa_delta_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityAnalysis {
    pub creative_uplift: CreativeUpliftScenario,
    pub budget_reduction: BudgetReductionScenario,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixScenario {
    pub description: String,
    pub reach: u64,
    pub cost_efficiency: String,
    pub authenticity: String,
    pub risk: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MixComparison {
    pub current: MixScenario,
    pub mid_tier_blend: MixScenario,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReachRateRange {
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastAssumptions {
    pub duplication_factor: f64,
    pub hook_uplift_ctr: f64,
    pub creative_uplift_ctr: f64,
    pub reach_rate_range: ReachRateRange,
    pub season: Season,
    pub uncertainty_width: f64,
    pub benchmark_id: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastResult {
    pub forecast: BaseForecast,
    pub reach_breakdown: Vec<CreatorReach>,
    pub sensitivity_analysis: SensitivityAnalysis,
    pub mix_comparison: MixComparison,
    pub assumptions: ForecastAssumptions,
}

/// Project campaign KPIs for the evaluation cohort.
#[must_use]
pub fn forecast(
    catalog: &ReferenceCatalog,
    params: &PredictParams,
    evaluation: &EvaluationResult,
) -> ForecastResult {
    let cohort = evaluation.cohort();

    let mut total_reach = 0.0;
    let reach_breakdown: Vec<CreatorReach> = cohort
        .iter()
        .map(|creator| {
            let (row, creator_total) = creator_reach(creator, params);
            total_reach += creator_total;
            row
        })
        .collect();

    let overlap_factor = evaluation.overlap_factor;
    let unique_reach = dedup_reach(total_reach, overlap_factor);

    let benchmark = catalog.benchmark_for(params.vertical, params.season);
    let hook_uplift = if params.sustainability_focus {
        SUSTAINABILITY_CTR_UPLIFT
    } else {
        0.0
    };
    let ctr = benchmark.avg_ctr + hook_uplift + CREATIVE_CTR_UPLIFT;
    let cvr = params.baseline_cvr;
    let clicks = unique_reach * ctr;
    let conversions = clicks * cvr;
    let cpm = benchmark.avg_cpm;
    let cpc = cpm / (ctr * 1000.0);

    tracing::info!(
        cohort = cohort.len(),
        total_reach,
        unique_reach,
        conversions,
        benchmark = benchmark.id,
        "forecast complete"
    );

    ForecastResult {
        forecast: BaseForecast {
            reach: ReachBand::around(unique_reach),
            total_reach_p50: whole_count(total_reach),
            clicks_p50: whole_count(clicks),
            ctr_p50: ctr,
            cvr_p50: cvr,
            conversions_p50: whole_count(conversions),
            cpm_p50: cpm,
            cpc_p50: cpc,
        },
        reach_breakdown,
        sensitivity_analysis: sensitivity(conversions),
        mix_comparison: mix_comparison(cohort.len(), unique_reach),
        assumptions: ForecastAssumptions {
            duplication_factor: overlap_factor,
            hook_uplift_ctr: hook_uplift,
            creative_uplift_ctr: CREATIVE_CTR_UPLIFT,
            reach_rate_range: ReachRateRange {
                min: MIN_REACH_RATE,
                max: MAX_REACH_RATE,
            },
            season: params.season,
            uncertainty_width: UNCERTAINTY_WIDTH,
            benchmark_id: benchmark.id,
        },
    }
}

#[allow(clippy::cast_precision_loss)]
fn creator_reach(creator: &ScoredCandidate, params: &PredictParams) -> (CreatorReach, f64) {
    let rate = reach_rate(creator.engagement_rate);
    let followers = creator.followers as f64;
    let posts = followers * rate * REEL_MULTIPLIER * f64::from(params.posts_per_creator);
    let stories = followers * rate * STORY_MULTIPLIER * f64::from(params.stories_per_creator);
    let total = posts + stories;

    let row = CreatorReach {
        candidate_id: creator.candidate_id,
        creator: creator.name.clone(),
        reach_rate: rate,
        reach: whole_count(total),
        posts_reach: whole_count(posts),
        stories_reach: whole_count(stories),
    };
    (row, total)
}

fn sensitivity(conversions: f64) -> SensitivityAnalysis {
    SensitivityAnalysis {
        creative_uplift: CreativeUpliftScenario {
            description: format!(
                "+{CREATIVE_SCENARIO_QUALITY_PCT:.0}% creative quality improvement"
            ),
            ctr_delta_pct: CREATIVE_SCENARIO_CTR_DELTA_PCT,
            conversions_delta: whole_count(conversions * CREATIVE_SCENARIO_CTR_DELTA_PCT / 100.0),
        },
        budget_reduction: BudgetReductionScenario {
            description: format!("{BUDGET_SCENARIO_BUDGET_DELTA_PCT:.0}% budget scenario"),
            budget_delta_pct: BUDGET_SCENARIO_BUDGET_DELTA_PCT,
            reach_delta_pct: BUDGET_SCENARIO_REACH_DELTA_PCT,
            cpa_delta_pct: BUDGET_SCENARIO_CPA_DELTA_PCT,
        },
    }
}

fn mix_comparison(cohort_size: usize, unique_reach: f64) -> MixComparison {
    MixComparison {
        current: MixScenario {
            description: format!("{cohort_size} micro-creators (current)"),
            reach: whole_count(unique_reach),
            cost_efficiency: "High".to_string(),
            authenticity: "High".to_string(),
            risk: "Low - diverse portfolio".to_string(),
        },
        mid_tier_blend: MixScenario {
            description: "2 mid-tier + 4 micro creators".to_string(),
            reach: whole_count(unique_reach * MID_TIER_MIX_REACH_MULTIPLIER),
            cost_efficiency: "Medium".to_string(),
            authenticity: "Medium".to_string(),
            risk: "Medium - concentration risk".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use marketmuse_core::Vertical;

    use super::*;
    use crate::evaluation::evaluate;
    use crate::planner::{decompose, decompose_with, CampaignDefaults};

    const REFERENCE_BRIEF: &str =
        "Identify optimal influencers for a sustainable skincare brand targeting Gen Z";

    fn run(brief: &str) -> ForecastResult {
        let catalog = ReferenceCatalog::builtin().unwrap();
        let plan = decompose(brief);
        let evaluation = evaluate(&catalog, &plan.evaluate);
        forecast(&catalog, &plan.predict, &evaluation)
    }

    #[test]
    fn reach_rate_formula_and_clamp() {
        assert!((reach_rate(0.03) - 0.45).abs() < 1e-12);
        assert!((reach_rate(0.048) - 0.486).abs() < 1e-12);
        assert_eq!(reach_rate(0.5), MAX_REACH_RATE);
        assert!((reach_rate(0.0) - 0.39).abs() < 1e-12);
        for er in [0.0, 0.01, 0.05, 0.1, 0.2, 1.0] {
            let r = reach_rate(er);
            assert!((MIN_REACH_RATE..=MAX_REACH_RATE).contains(&r));
        }
    }

    #[test]
    fn dedup_never_exceeds_total_for_positive_overlap() {
        for factor in [0.01, 0.18, 0.5, 1.0] {
            assert!(dedup_reach(1_000_000.0, factor) <= 1_000_000.0);
        }
        assert!((dedup_reach(1000.0, 0.18) - 910.0).abs() < 1e-9);
    }

    #[test]
    fn band_is_symmetric_around_p50() {
        let band = ReachBand::around(1000.0);
        assert_eq!(band, ReachBand { p10: 750, p50: 1000, p90: 1250 });
    }

    #[test]
    fn reference_forecast_point_estimates() {
        let result = run(REFERENCE_BRIEF);
        let f = &result.forecast;
        // skincare/winter benchmark ctr 0.014 + 0.003 hook + 0.002 creative
        assert!((f.ctr_p50 - 0.019).abs() < 1e-12);
        assert!((f.cvr_p50 - 0.025).abs() < 1e-12);
        assert!((f.cpm_p50 - 8.5).abs() < 1e-12);
        assert!((f.cpc_p50 - 8.5 / 19.0).abs() < 1e-12);
        assert!(f.reach.p50 <= f.total_reach_p50);
        assert!(f.reach.p10 < f.reach.p50 && f.reach.p50 < f.reach.p90);
        assert_eq!(result.reach_breakdown.len(), 6);
    }

    #[test]
    fn breakdown_sums_to_total_reach() {
        let result = run(REFERENCE_BRIEF);
        let sum: u64 = result.reach_breakdown.iter().map(|r| r.reach).sum();
        // per-row truncation can lose at most one unit per creator
        let total = result.forecast.total_reach_p50;
        assert!(total >= sum && total - sum <= 6, "total {total}, sum {sum}");
    }

    #[test]
    fn sustainability_uplift_only_when_flagged() {
        let flagged = run("sustainable skincare");
        let plain = run("skincare");
        assert!((flagged.assumptions.hook_uplift_ctr - 0.003).abs() < 1e-12);
        assert_eq!(plain.assumptions.hook_uplift_ctr, 0.0);
        assert!((plain.forecast.ctr_p50 - 0.016).abs() < 1e-12);
    }

    #[test]
    fn missing_benchmark_falls_back_to_first_record() {
        let catalog = ReferenceCatalog::builtin().unwrap();
        let defaults = CampaignDefaults {
            season: Season::Summer,
            ..CampaignDefaults::default()
        };
        let plan = decompose_with("beauty launch", &defaults);
        assert_eq!(plan.predict.vertical, Vertical::Beauty);
        let evaluation = evaluate(&catalog, &plan.evaluate);
        let result = forecast(&catalog, &plan.predict, &evaluation);
        assert_eq!(result.assumptions.benchmark_id, catalog.benchmarks()[0].id);
        assert!((result.forecast.cpm_p50 - 8.5).abs() < 1e-12);
    }

    #[test]
    fn beauty_winter_uses_beauty_benchmark() {
        let result = run("beauty launch");
        assert_eq!(result.assumptions.benchmark_id, 3);
        assert!((result.forecast.cpm_p50 - 6.8).abs() < 1e-12);
    }

    #[test]
    #[allow(clippy::cast_precision_loss)]
    fn scenarios_use_named_constants() {
        let result = run(REFERENCE_BRIEF);
        let s = &result.sensitivity_analysis;
        assert_eq!(s.creative_uplift.ctr_delta_pct, 15.0);
        // conversions_p50 is truncated, so the exact value lies in [p50, p50 + 1)
        let p50 = result.forecast.conversions_p50 as f64;
        let delta = s.creative_uplift.conversions_delta;
        assert!(delta >= whole_count(p50 * 0.15) && delta <= whole_count((p50 + 1.0) * 0.15));
        assert_eq!(s.budget_reduction.reach_delta_pct, -12.0);
        assert_eq!(s.budget_reduction.cpa_delta_pct, 8.0);
        assert_eq!(s.budget_reduction.description, "-15% budget scenario");
    }

    #[test]
    fn mid_tier_mix_applies_static_multiplier() {
        let result = run(REFERENCE_BRIEF);
        let mix = &result.mix_comparison;
        assert_eq!(mix.current.reach, result.forecast.reach.p50);
        assert!(mix.mid_tier_blend.reach > mix.current.reach);
        assert_eq!(mix.current.description, "6 micro-creators (current)");
    }
}
