//! Command handlers: human-readable progress on stdout, then the requested output.

use marketmuse_core::{AppConfig, ReferenceCatalog};
use marketmuse_engine::format::group_thousands;
use marketmuse_engine::planner::{decompose_with, CampaignDefaults};
use marketmuse_engine::guardrails::TestPlan;
use marketmuse_engine::{
    evaluate, run_pipeline_with, PerformanceThresholds, PipelineReport, PlanDescriptor,
    Week1Observation,
};

use crate::OutputFormat;

/// Run the full pipeline and print progress followed by the serialized report.
///
/// # Errors
///
/// Returns an error if the report cannot be serialized.
pub(crate) fn run_report(
    catalog: &ReferenceCatalog,
    config: &AppConfig,
    query: &str,
    format: OutputFormat,
) -> anyhow::Result<()> {
    let defaults = CampaignDefaults::from_config(config);
    let report = run_pipeline_with(
        catalog,
        query,
        &defaults,
        uuid::Uuid::new_v4(),
        chrono::Utc::now(),
    );

    print_progress(&report);

    println!();
    println!("{}", "=".repeat(80));
    println!("MARKETMUSE ANALYSIS RESULTS");
    println!("{}", "=".repeat(80));
    print!("{}", render_report(&report, format)?);

    Ok(())
}

/// Serialize a report in the requested format. Always ends with a newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub(crate) fn render_report(report: &PipelineReport, format: OutputFormat) -> anyhow::Result<String> {
    let rendered = match format {
        OutputFormat::Json => format!("{}\n", serde_json::to_string_pretty(report)?),
        OutputFormat::Yaml => serde_yaml::to_string(report)?,
    };
    Ok(rendered)
}

fn print_progress(report: &PipelineReport) {
    let plan = &report.plan;
    println!(
        "MarketMuse analysis started: {}",
        report.timestamp.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("Query: {}", report.query);
    println!();
    println!("Task decomposition:");
    println!("  vertical:             {}", plan.evaluate.vertical);
    println!("  audience:             {}", plan.evaluate.audience);
    println!("  tier:                 {}", plan.evaluate.tier);
    println!(
        "  sustainability focus: {}",
        plan.evaluate.sustainability_focus
    );
    println!(
        "  duration:             {} weeks",
        plan.predict.duration_weeks
    );
    println!("  budget:               ₹{}", plan.optimize.budget_inr);
    println!();

    let evaluation = &report.evaluation;
    println!("Evaluation:");
    println!("  evaluated {} creators", evaluation.total_evaluated);
    if let Some(top) = evaluation.top() {
        println!(
            "  top performer: {} (score {:.2})",
            top.name, top.composite_score
        );
    }

    let forecast = &report.prediction.forecast;
    println!("Forecast:");
    println!("  unique reach p50: {}", group_thousands(forecast.reach.p50));
    println!("  conversions p50:  {}", forecast.conversions_p50);

    let optimization = &report.optimization;
    println!("Recommendations:");
    println!("  generated {}", optimization.prioritized.len());
    if let Some(top) = optimization.top() {
        println!("  top priority: {}", top.lever);
    }
    println!();
    println!(
        "Analysis complete. Top creators: {}",
        report.summary.selected_creators.join(", ")
    );
}

/// Print the decomposed plan for a brief as JSON.
///
/// # Errors
///
/// Returns an error if the plan cannot be serialized.
pub(crate) fn run_plan(config: &AppConfig, query: &str) -> anyhow::Result<()> {
    println!("{}", render_plan(config, query)?);
    Ok(())
}

/// Decompose a brief with configured defaults and render the plan as JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub(crate) fn render_plan(config: &AppConfig, query: &str) -> anyhow::Result<String> {
    let plan: PlanDescriptor = decompose_with(query, &CampaignDefaults::from_config(config));
    Ok(serde_json::to_string_pretty(&plan)?)
}

/// Print the creator ranking for a brief as a table.
pub(crate) fn run_rank(
    catalog: &ReferenceCatalog,
    config: &AppConfig,
    query: &str,
    limit: Option<usize>,
) {
    let plan = decompose_with(query, &CampaignDefaults::from_config(config));
    let evaluation = evaluate(catalog, &plan.evaluate);
    let shown = limit.unwrap_or(evaluation.ranked.len());

    println!(
        "{:<5}{:<22}{:<22}{:<9}{:<9}{:<8}COHORT",
        "RANK", "CREATOR", "HANDLE", "SCORE", "FOLLOW", "FRAUD"
    );
    for (rank, c) in evaluation.ranked.iter().take(shown).enumerate() {
        println!(
            "{:<5}{:<22}{:<22}{:<9.2}{:<9}{:<8}{}",
            rank + 1,
            c.name,
            c.handle,
            c.composite_score,
            group_thousands(c.followers),
            c.fraud_risk.to_string(),
            if c.overlap_eligible { "yes" } else { "" }
        );
    }
}

/// Validate the catalog (already done at load) and print its contents summary.
pub(crate) fn run_catalog(catalog: &ReferenceCatalog, config: &AppConfig) {
    let source = config.catalog_path.as_ref().map_or_else(
        || "built-in".to_string(),
        |p| p.display().to_string(),
    );
    let weights = catalog.weights();

    println!("catalog:    {source} (valid)");
    println!("creators:   {}", catalog.creators().len());
    println!("benchmarks: {}", catalog.benchmarks().len());
    println!(
        "weights:    relevance {} / audience {} / engagement {} / safety {} / consistency {}",
        weights.relevance,
        weights.audience,
        weights.engagement,
        weights.safety,
        weights.consistency
    );
}

/// Print the week-1 decision for observed metrics.
pub(crate) fn run_week1(observed: &Week1Observation) {
    let thresholds = PerformanceThresholds::standard();
    let decision = thresholds.decide(observed);
    println!("decision: {decision:?}");
    println!("  continue if: {}", thresholds.go_no_go_criteria.continue_if);
    println!("  pause if:    {}", thresholds.go_no_go_criteria.pause_if);
    println!("  scale if:    {}", thresholds.go_no_go_criteria.scale_if);
}

/// Print every creative test variant and the success thresholds.
pub(crate) fn run_test_plan() {
    let plan = TestPlan::standard();
    println!("{}", plan.description);
    println!("{}", plan.structure);
    println!();
    println!("{:<4}{:<30}{:<28}CTA", "#", "CREATIVE", "HOOK");
    for (idx, v) in plan.variants().iter().enumerate() {
        println!("{:<4}{:<30}{:<28}{}", idx + 1, v.creative, v.hook, v.cta);
    }
    println!();
    let metrics = &plan.success_metrics;
    for m in [&metrics.primary, &metrics.secondary, &metrics.engagement] {
        println!("success: {}", m.label);
    }
}
