//! Brief decomposition: free text in, structured campaign parameters out.

use marketmuse_core::{AppConfig, Season, Vertical};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

const SKINCARE_MARKERS: &[&str] = &["skincare"];
const GENZ_MARKERS: &[&str] = &["gen z", "genz"];
const MICRO_MARKERS: &[&str] = &["micro"];
const FOLLOWER_COUNT_MARKERS: &[&str] = &["10k", "100k"];
const SUSTAINABILITY_MARKERS: &[&str] = &["sustainable", "eco"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AudienceSegment {
    Genz,
    General,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreatorTier {
    Micro,
    Mixed,
}

impl std::fmt::Display for AudienceSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AudienceSegment::Genz => write!(f, "genz"),
            AudienceSegment::General => write!(f, "general"),
        }
    }
}

impl std::fmt::Display for CreatorTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreatorTier::Micro => write!(f, "micro"),
            CreatorTier::Mixed => write!(f, "mixed"),
        }
    }
}

/// Keyword flags detected in a brief. Matching is case-insensitive substring presence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct QueryFlags {
    pub skincare: bool,
    pub genz: bool,
    pub micro: bool,
    pub sustainable: bool,
}

impl QueryFlags {
    #[must_use]
    pub fn classify(query: &str) -> Self {
        let lower = query.to_lowercase();
        let any = |markers: &[&str]| markers.iter().any(|m| lower.contains(m));
        Self {
            skincare: any(SKINCARE_MARKERS),
            genz: any(GENZ_MARKERS),
            micro: any(MICRO_MARKERS) || any(FOLLOWER_COUNT_MARKERS),
            sustainable: any(SUSTAINABILITY_MARKERS),
        }
    }
}

/// Fixed campaign parameters attached to every plan. Not derived from the brief.
#[derive(Debug, Clone, PartialEq)]
pub struct CampaignDefaults {
    pub duration_weeks: u32,
    pub posts_per_creator: u32,
    pub stories_per_creator: u32,
    pub baseline_cvr: f64,
    pub season: Season,
    pub budget_inr: Decimal,
    pub target_unique_reach: f64,
}

impl Default for CampaignDefaults {
    fn default() -> Self {
        Self {
            duration_weeks: 3,
            posts_per_creator: 2,
            stories_per_creator: 2,
            baseline_cvr: 0.025,
            season: Season::Winter,
            budget_inr: Decimal::from(500_000),
            target_unique_reach: 0.80,
        }
    }
}

impl CampaignDefaults {
    /// Defaults with the budget and season taken from application config.
    #[must_use]
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            budget_inr: config.budget_inr,
            season: config.season,
            ..Self::default()
        }
    }
}

/// Inputs to the evaluation stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EvaluateParams {
    pub vertical: Vertical,
    pub audience: AudienceSegment,
    pub tier: CreatorTier,
    pub sustainability_focus: bool,
}

/// Inputs to the forecast stage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PredictParams {
    pub duration_weeks: u32,
    pub posts_per_creator: u32,
    pub stories_per_creator: u32,
    pub baseline_cvr: f64,
    pub season: Season,
    pub vertical: Vertical,
    /// Adds the sustainability hook CTR uplift (+0.3pp) to the forecast.
    /// Sustainability briefs therefore forecast a higher CTR than the plain
    /// benchmark-plus-creative rate.
    pub sustainability_focus: bool,
}

/// Inputs to the recommendation stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizeParams {
    pub budget_inr: Decimal,
    pub target_unique_reach: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDescriptor {
    pub evaluate: EvaluateParams,
    pub predict: PredictParams,
    pub optimize: OptimizeParams,
}

/// Decompose a brief using [`CampaignDefaults::default`].
#[must_use]
pub fn decompose(query: &str) -> PlanDescriptor {
    decompose_with(query, &CampaignDefaults::default())
}

/// Decompose a brief into per-stage parameters. Never fails.
#[must_use]
pub fn decompose_with(query: &str, defaults: &CampaignDefaults) -> PlanDescriptor {
    let flags = QueryFlags::classify(query);

    let vertical = if flags.skincare {
        Vertical::Skincare
    } else {
        Vertical::Beauty
    };
    let audience = if flags.genz {
        AudienceSegment::Genz
    } else {
        AudienceSegment::General
    };
    let tier = if flags.micro {
        CreatorTier::Micro
    } else {
        CreatorTier::Mixed
    };

    PlanDescriptor {
        evaluate: EvaluateParams {
            vertical,
            audience,
            tier,
            sustainability_focus: flags.sustainable,
        },
        predict: PredictParams {
            duration_weeks: defaults.duration_weeks,
            posts_per_creator: defaults.posts_per_creator,
            stories_per_creator: defaults.stories_per_creator,
            baseline_cvr: defaults.baseline_cvr,
            season: defaults.season,
            vertical,
            sustainability_focus: flags.sustainable,
        },
        optimize: OptimizeParams {
            budget_inr: defaults.budget_inr,
            target_unique_reach: defaults.target_unique_reach,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_reference_brief() {
        let flags = QueryFlags::classify(
            "Identify optimal influencers for a sustainable skincare brand targeting Gen Z",
        );
        assert_eq!(
            flags,
            QueryFlags {
                skincare: true,
                genz: true,
                micro: false,
                sustainable: true,
            }
        );
    }

    #[test]
    fn classify_is_case_insensitive() {
        let flags = QueryFlags::classify("SKINCARE for GENZ, Eco first");
        assert!(flags.skincare && flags.genz && flags.sustainable);
    }

    #[test]
    fn follower_count_marker_implies_micro() {
        assert!(QueryFlags::classify("creators under 100k followers").micro);
        assert!(QueryFlags::classify("10k creators").micro);
        assert!(QueryFlags::classify("Micro-influencers please").micro);
        assert!(!QueryFlags::classify("big names only").micro);
    }

    #[test]
    fn empty_brief_falls_back_to_defaults() {
        let plan = decompose("");
        assert_eq!(plan.evaluate.vertical, Vertical::Beauty);
        assert_eq!(plan.evaluate.audience, AudienceSegment::General);
        assert_eq!(plan.evaluate.tier, CreatorTier::Mixed);
        assert!(!plan.evaluate.sustainability_focus);
    }

    #[test]
    fn plan_carries_fixed_campaign_defaults() {
        let plan = decompose("sustainable skincare for gen z");
        assert_eq!(plan.predict.duration_weeks, 3);
        assert_eq!(plan.predict.posts_per_creator, 2);
        assert_eq!(plan.predict.stories_per_creator, 2);
        assert!((plan.predict.baseline_cvr - 0.025).abs() < f64::EPSILON);
        assert_eq!(plan.predict.season, Season::Winter);
        assert_eq!(plan.optimize.budget_inr, Decimal::from(500_000));
        assert!((plan.optimize.target_unique_reach - 0.80).abs() < f64::EPSILON);
    }

    #[test]
    fn predict_params_mirror_evaluation_flags() {
        let plan = decompose("sustainable skincare");
        assert_eq!(plan.predict.vertical, plan.evaluate.vertical);
        assert_eq!(
            plan.predict.sustainability_focus,
            plan.evaluate.sustainability_focus
        );
    }

    #[test]
    fn display_matches_serialized_names() {
        for audience in [AudienceSegment::Genz, AudienceSegment::General] {
            let json = serde_json::to_value(audience).unwrap();
            assert_eq!(json.as_str(), Some(audience.to_string().as_str()));
        }
        for tier in [CreatorTier::Micro, CreatorTier::Mixed] {
            let json = serde_json::to_value(tier).unwrap();
            assert_eq!(json.as_str(), Some(tier.to_string().as_str()));
        }
    }

    #[test]
    fn decompose_with_custom_defaults() {
        let defaults = CampaignDefaults {
            budget_inr: Decimal::from(120_000),
            season: Season::Summer,
            ..CampaignDefaults::default()
        };
        let plan = decompose_with("skincare", &defaults);
        assert_eq!(plan.optimize.budget_inr, Decimal::from(120_000));
        assert_eq!(plan.predict.season, Season::Summer);
    }
}
