//! Fixed campaign guardrails: creative test matrix, compliance checklist,
//! week-1 performance rules, and contingency plans.
//!
//! Everything here is constant. The only computation is
//! [`PerformanceThresholds::decide`], which applies the go/no-go rules to
//! observed week-1 metrics.

use serde::Serialize;

const TEST_CREATIVES: &[&str] = &[
    "Refillable demo",
    "Ingredient spotlight",
    "Before/after transformation",
];
const TEST_HOOKS: &[&str] = &["First 2s product reveal", "Problem/solution narrative"];
const TEST_CTAS: &[&str] = &["Try eco-mini kit", "Get personalized routine"];

const SUCCESS_CTR: f64 = 0.018;
const SUCCESS_CVR: f64 = 0.028;
const SUCCESS_ER: f64 = 0.055;

const WEEK1_CPM_THRESHOLD: f64 = 12.0;
const WEEK1_CTR_MINIMUM: f64 = 0.012;
const WEEK1_CVR_MINIMUM: f64 = 0.022;

const PAUSE_CPM: f64 = 15.0;
const PAUSE_CTR: f64 = 0.010;
const PAUSE_NEGATIVE_SENTIMENT: f64 = 0.20;
const SCALE_POSITIVE_SENTIMENT: f64 = 0.70;

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

fn pct(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// A "metric must exceed value" success criterion.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricThreshold {
    pub metric: String,
    pub minimum: f64,
    pub label: String,
}

impl MetricThreshold {
    fn above(metric: &str, minimum: f64) -> Self {
        Self {
            metric: metric.to_string(),
            minimum,
            label: format!("{metric} > {}", pct(minimum)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessMetrics {
    pub primary: MetricThreshold,
    pub secondary: MetricThreshold,
    pub engagement: MetricThreshold,
}

/// One cell of the factorial creative test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CreativeVariant {
    pub creative: String,
    pub hook: String,
    pub cta: String,
}

/// Creatives × hooks × calls-to-action factorial test.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TestPlan {
    pub description: String,
    pub structure: String,
    pub creatives: Vec<String>,
    pub hooks: Vec<String>,
    pub ctas: Vec<String>,
    pub success_metrics: SuccessMetrics,
    pub learning_goals: Vec<String>,
}

impl TestPlan {
    #[must_use]
    pub fn standard() -> Self {
        let mut plan = Self {
            description: "Gen Z Sustainable Skincare Creative Test Matrix".to_string(),
            structure: String::new(),
            creatives: owned(TEST_CREATIVES),
            hooks: owned(TEST_HOOKS),
            ctas: owned(TEST_CTAS),
            success_metrics: SuccessMetrics {
                primary: MetricThreshold::above("CTR", SUCCESS_CTR),
                secondary: MetricThreshold::above("CVR", SUCCESS_CVR),
                engagement: MetricThreshold::above("ER", SUCCESS_ER),
            },
            learning_goals: owned(&[
                "Which sustainability angle resonates most",
                "Effectiveness of product demos vs transformations",
                "CTA preference for Gen Z audience",
            ]),
        };
        plan.structure = format!(
            "{} creatives × {} hooks × {} CTAs = {} variants",
            plan.creatives.len(),
            plan.hooks.len(),
            plan.ctas.len(),
            plan.variant_count()
        );
        plan
    }

    #[must_use]
    pub fn variant_count(&self) -> usize {
        self.creatives.len() * self.hooks.len() * self.ctas.len()
    }

    /// Every creative/hook/CTA combination, creative-major order.
    #[must_use]
    pub fn variants(&self) -> Vec<CreativeVariant> {
        let mut out = Vec::with_capacity(self.variant_count());
        for creative in &self.creatives {
            for hook in &self.hooks {
                for cta in &self.ctas {
                    out.push(CreativeVariant {
                        creative: creative.clone(),
                        hook: hook.clone(),
                        cta: cta.clone(),
                    });
                }
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandSafetyChecklist {
    pub disclosure_requirements: Vec<String>,
    pub content_moderation: Vec<String>,
    pub authenticity_maintenance: Vec<String>,
}

impl BrandSafetyChecklist {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            disclosure_requirements: owned(&[
                "Use #ad or #sponsored in first line",
                "Clear product mention within first 15 seconds",
                "Honest opinion disclaimer for reviews",
            ]),
            content_moderation: owned(&[
                "Pre-approve all captions and key talking points",
                "Monitor comments for negative sentiment (respond within 2 hours)",
                "Escalation protocol for brand safety issues",
            ]),
            authenticity_maintenance: owned(&[
                "Allow creator's natural voice and style",
                "Encourage genuine product trial before posting",
                "Avoid overly scripted content",
            ]),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Week1Benchmarks {
    /// INR.
    pub cpm_threshold: f64,
    pub ctr_minimum: f64,
    pub cvr_minimum: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GoNoGoCriteria {
    pub continue_if: String,
    pub pause_if: String,
    pub scale_if: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimizationTriggers {
    pub creative_refresh: String,
    pub audience_adjustment: String,
    pub budget_reallocation: String,
}

/// Metrics observed after the first campaign week. Sentiments are fractions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Week1Observation {
    pub cpm: f64,
    pub ctr: f64,
    pub cvr: f64,
    pub positive_sentiment: f64,
    pub negative_sentiment: f64,
    pub brand_safety_issue: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Week1Decision {
    Pause,
    Scale,
    Continue,
    /// No rule fired; needs a human call.
    Review,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceThresholds {
    pub week_1_benchmarks: Week1Benchmarks,
    pub go_no_go_criteria: GoNoGoCriteria,
    pub optimization_triggers: OptimizationTriggers,
}

impl PerformanceThresholds {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            week_1_benchmarks: Week1Benchmarks {
                cpm_threshold: WEEK1_CPM_THRESHOLD,
                ctr_minimum: WEEK1_CTR_MINIMUM,
                cvr_minimum: WEEK1_CVR_MINIMUM,
            },
            go_no_go_criteria: GoNoGoCriteria {
                continue_if: format!(
                    "CTR > {} AND CVR > {} AND no brand safety issues",
                    pct(WEEK1_CTR_MINIMUM),
                    pct(WEEK1_CVR_MINIMUM)
                ),
                pause_if: format!(
                    "CPM > ₹{PAUSE_CPM:.0} OR CTR < {} OR negative sentiment > {:.0}%",
                    pct(PAUSE_CTR),
                    PAUSE_NEGATIVE_SENTIMENT * 100.0
                ),
                scale_if: format!(
                    "CTR > {} AND CVR > {} AND positive sentiment > {:.0}%",
                    pct(SUCCESS_CTR),
                    pct(SUCCESS_CVR),
                    SCALE_POSITIVE_SENTIMENT * 100.0
                ),
            },
            optimization_triggers: OptimizationTriggers {
                creative_refresh: "If CTR drops 25% week-over-week".to_string(),
                audience_adjustment: "If CPM increases 30% above benchmark".to_string(),
                budget_reallocation: "If top performer shows 2x better CPA".to_string(),
            },
        }
    }

    /// Apply the go/no-go rules. Pause wins over scale, scale over continue.
    #[must_use]
    pub fn decide(&self, observed: &Week1Observation) -> Week1Decision {
        let week1 = &self.week_1_benchmarks;
        if observed.brand_safety_issue
            || observed.cpm > PAUSE_CPM
            || observed.ctr < PAUSE_CTR
            || observed.negative_sentiment > PAUSE_NEGATIVE_SENTIMENT
        {
            Week1Decision::Pause
        } else if observed.ctr > SUCCESS_CTR
            && observed.cvr > SUCCESS_CVR
            && observed.positive_sentiment > SCALE_POSITIVE_SENTIMENT
        {
            Week1Decision::Scale
        } else if observed.ctr > week1.ctr_minimum && observed.cvr > week1.cvr_minimum {
            Week1Decision::Continue
        } else {
            Week1Decision::Review
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceManagement {
    pub thresholds: PerformanceThresholds,
    pub monitoring_frequency: String,
    pub optimization_cycle: String,
}

impl PerformanceManagement {
    #[must_use]
    pub fn standard() -> Self {
        Self {
            thresholds: PerformanceThresholds::standard(),
            monitoring_frequency: "Daily for first week, then weekly".to_string(),
            optimization_cycle: "72-hour response window for underperformance".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContingencyPlan {
    pub scenario: String,
    pub action: String,
    pub timeline: String,
}

#[must_use]
pub fn contingency_plans() -> Vec<ContingencyPlan> {
    vec![
        ContingencyPlan {
            scenario: "Low performance week 1".to_string(),
            action: "Shift budget to top 2 performers, refresh creative with stronger hook"
                .to_string(),
            timeline: "24-48 hours".to_string(),
        },
        ContingencyPlan {
            scenario: "High CPM inflation".to_string(),
            action: "Pause underperformers, negotiate better rates with top creators".to_string(),
            timeline: "Immediate".to_string(),
        },
    ]
}
