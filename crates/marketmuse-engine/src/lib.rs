//! Campaign planning pipeline for MarketMuse.
//!
//! Decomposes a free-text brief into stage parameters, scores and ranks
//! catalog creators with an audience-overlap model, forecasts reach and
//! conversions for the top cohort, and synthesizes a prioritized action
//! plan. Every stage is a pure function over the read-only
//! [`marketmuse_core::ReferenceCatalog`].

pub mod evaluation;
pub mod forecast;
pub mod format;
pub mod guardrails;
pub mod overlap;
pub mod pipeline;
pub mod planner;
pub mod recommend;
pub mod scoring;

pub use evaluation::{evaluate, EvaluationResult, ScoredCandidate, COHORT_SIZE, OVERLAP_FACTOR};
pub use forecast::{forecast, ForecastResult};
pub use guardrails::{PerformanceThresholds, Week1Decision, Week1Observation};
pub use overlap::OverlapMatrix;
pub use pipeline::{run_pipeline, run_pipeline_with, PipelineReport, Summary};
pub use planner::{decompose, decompose_with, CampaignDefaults, PlanDescriptor};
pub use recommend::{recommend, Confidence, Effort, Lever, Recommendation, RecommendationPlan};
pub use scoring::FraudRisk;
