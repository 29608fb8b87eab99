use chrono::{TimeZone, Utc};
use marketmuse_core::ReferenceCatalog;
use marketmuse_engine::{run_pipeline_with, CampaignDefaults, Effort, PipelineReport};
use uuid::Uuid;

const LAUNCH_BRIEF: &str = "Identify the optimal influencers and predict campaign outcomes for launching a new sustainable skincare brand targeting Gen Z audiences";

fn run(brief: &str) -> PipelineReport {
    let catalog = ReferenceCatalog::builtin().expect("builtin catalog");
    let now = Utc.with_ymd_and_hms(2025, 1, 15, 9, 30, 0).unwrap();
    run_pipeline_with(
        &catalog,
        brief,
        &CampaignDefaults::default(),
        Uuid::nil(),
        now,
    )
}

#[test]
fn identical_inputs_give_identical_reports() {
    let a = serde_json::to_value(run(LAUNCH_BRIEF)).unwrap();
    let b = serde_json::to_value(run(LAUNCH_BRIEF)).unwrap();
    assert_eq!(a, b);
}

#[test]
fn launch_brief_selects_sustainable_skincare_creators() {
    let report = run(LAUNCH_BRIEF);
    assert!(report.plan.evaluate.sustainability_focus);
    let top = report.evaluation.top().unwrap();
    assert_eq!(top.name, "SustainableSkinBae");
    assert!((top.composite_score - 90.85).abs() < 1e-9);
    assert_eq!(
        report.summary.selected_creators,
        vec!["SustainableSkinBae", "CleanBeautyBae", "PlanetSkin"]
    );
}

#[test]
fn recommendations_are_five_and_effort_ordered() {
    for brief in [LAUNCH_BRIEF, "beauty", ""] {
        let report = run(brief);
        let efforts: Vec<u8> = report
            .optimization
            .prioritized
            .iter()
            .map(|r| r.effort.ordinal())
            .collect();
        assert_eq!(efforts.len(), 5);
        assert!(efforts.windows(2).all(|w| w[0] <= w[1]), "got: {efforts:?}");
        assert_eq!(report.optimization.prioritized[4].effort, Effort::M);
    }
}

#[test]
fn unique_reach_never_exceeds_total() {
    for brief in [LAUNCH_BRIEF, "beauty", "micro 10k skincare"] {
        let forecast = run(brief).prediction.forecast;
        assert!(forecast.reach.p50 <= forecast.total_reach_p50);
        assert!(forecast.reach.p10 <= forecast.reach.p50);
        assert!(forecast.reach.p50 <= forecast.reach.p90);
    }
}

#[test]
fn overlap_matrix_is_symmetric() {
    let matrix = run(LAUNCH_BRIEF).evaluation.overlap_matrix;
    for i in 0..matrix.len() {
        assert_eq!(matrix.value(i, i), 1.0);
        for j in 0..matrix.len() {
            assert_eq!(matrix.value(i, j).to_bits(), matrix.value(j, i).to_bits());
        }
    }
}

#[test]
fn catalog_weights_sum_to_one() {
    let catalog = ReferenceCatalog::builtin().unwrap();
    assert!((catalog.weights().sum() - 1.0).abs() < 1e-9);
}

#[test]
fn report_serializes_with_expected_sections() {
    let json = serde_json::to_value(run(LAUNCH_BRIEF)).unwrap();
    for key in [
        "run_id",
        "query",
        "timestamp",
        "plan",
        "evaluation",
        "prediction",
        "optimization",
        "summary",
    ] {
        assert!(json.get(key).is_some(), "missing section {key}");
    }
    assert_eq!(json["summary"]["confidence_level"], "Medium-High");
    assert_eq!(json["evaluation"]["total_evaluated"], 10);
    assert_eq!(json["evaluation"]["overlap_factor"], 0.18);
    assert_eq!(json["optimization"]["prioritized"][0]["lever"], "Creator Mix");
    assert_eq!(
        json["optimization"]["test_plan"]["structure"],
        "3 creatives × 2 hooks × 2 CTAs = 12 variants"
    );
    assert_eq!(json["run_id"], "00000000-0000-0000-0000-000000000000");
}
