//! Pipeline orchestration.

use chrono::{DateTime, Utc};
use marketmuse_core::ReferenceCatalog;
use serde::Serialize;
use uuid::Uuid;

use crate::evaluation::{evaluate, EvaluationResult};
use crate::forecast::{forecast, ForecastResult};
use crate::planner::{decompose_with, CampaignDefaults, PlanDescriptor};
use crate::recommend::{recommend, RecommendationPlan};

const SUMMARY_CREATORS: usize = 3;
const SUMMARY_CONFIDENCE: &str = "Medium-High";
const KEY_RISKS: &[&str] = &["Audience overlap", "Creative fatigue", "Seasonal competition"];

#[derive(Debug, Clone, Serialize)]
pub struct Summary {
    pub selected_creators: Vec<String>,
    pub estimated_reach: u64,
    pub estimated_conversions: u64,
    pub top_recommendation: String,
    pub confidence_level: String,
    pub key_risks: Vec<String>,
}

/// Everything one pipeline run produces.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub run_id: Uuid,
    pub query: String,
    pub timestamp: DateTime<Utc>,
    pub plan: PlanDescriptor,
    pub evaluation: EvaluationResult,
    pub prediction: ForecastResult,
    pub optimization: RecommendationPlan,
    pub summary: Summary,
}

/// Run the full pipeline for one brief with default campaign parameters.
///
/// 1. Decompose the brief into per-stage parameters.
/// 2. Score and rank every catalog candidate.
/// 3. Forecast the top cohort.
/// 4. Synthesize recommendations and guardrails.
///
/// Stages are pure; only `run_id` and `timestamp` differ between runs with
/// the same catalog and brief.
#[must_use]
pub fn run_pipeline(catalog: &ReferenceCatalog, query: &str) -> PipelineReport {
    run_pipeline_with(
        catalog,
        query,
        &CampaignDefaults::default(),
        Uuid::new_v4(),
        Utc::now(),
    )
}

/// Run the pipeline with explicit defaults, run id, and clock reading.
#[must_use]
pub fn run_pipeline_with(
    catalog: &ReferenceCatalog,
    query: &str,
    defaults: &CampaignDefaults,
    run_id: Uuid,
    now: DateTime<Utc>,
) -> PipelineReport {
    let span = tracing::info_span!("pipeline", %run_id);
    let _guard = span.enter();

    let plan = decompose_with(query, defaults);
    tracing::info!(
        vertical = %plan.evaluate.vertical,
        audience = %plan.evaluate.audience,
        tier = %plan.evaluate.tier,
        sustainability = plan.evaluate.sustainability_focus,
        budget_inr = %plan.optimize.budget_inr,
        "brief decomposed"
    );

    let evaluation = evaluate(catalog, &plan.evaluate);
    let prediction = forecast(catalog, &plan.predict, &evaluation);
    let optimization = recommend(&plan.optimize, &evaluation, &prediction);

    let summary = Summary {
        selected_creators: evaluation
            .ranked
            .iter()
            .take(SUMMARY_CREATORS)
            .map(|c| c.name.clone())
            .collect(),
        estimated_reach: prediction.forecast.reach.p50,
        estimated_conversions: prediction.forecast.conversions_p50,
        top_recommendation: optimization
            .top()
            .map(|r| r.action.clone())
            .unwrap_or_default(),
        confidence_level: SUMMARY_CONFIDENCE.to_string(),
        key_risks: KEY_RISKS.iter().map(|s| (*s).to_string()).collect(),
    };

    tracing::info!(
        selected = ?summary.selected_creators,
        reach = summary.estimated_reach,
        conversions = summary.estimated_conversions,
        "pipeline complete"
    );

    PipelineReport {
        run_id,
        query: query.to_string(),
        timestamp: now,
        plan,
        evaluation,
        prediction,
        optimization,
        summary,
    }
}
