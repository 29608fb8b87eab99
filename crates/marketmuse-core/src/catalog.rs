use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::profiles::{BenchmarkRecord, CandidateProfile, Season, Vertical, WeightVector};
use crate::ConfigError;

/// Catalog shipped with the binary, used when no catalog path is configured.
const BUILTIN_CATALOG: &str = include_str!("../../../config/catalog.yaml");

/// Allowed drift when checking that a distribution sums to 1.
pub const DISTRIBUTION_TOLERANCE: f64 = 0.011;
/// Allowed drift when checking that the weight vector sums to 1.
pub const WEIGHT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Deserialize)]
struct CatalogFile {
    weights: WeightVector,
    benchmarks: Vec<BenchmarkRecord>,
    creators: Vec<CandidateProfile>,
}

/// Immutable reference data: creator profiles, campaign benchmarks, and the
/// composite weight vector.
///
/// Only constructible through validation, so every instance satisfies the
/// catalog invariants (non-empty tables, fractions in `[0, 1]`, distributions
/// summing to 1, weights summing to 1).
#[derive(Debug, Clone)]
pub struct ReferenceCatalog {
    creators: Vec<CandidateProfile>,
    benchmarks: Vec<BenchmarkRecord>,
    weights: WeightVector,
}

impl ReferenceCatalog {
    /// Build a catalog from parts, validating every invariant.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Validation`] describing the first violation found.
    pub fn new(
        creators: Vec<CandidateProfile>,
        benchmarks: Vec<BenchmarkRecord>,
        weights: WeightVector,
    ) -> Result<Self, ConfigError> {
        validate_catalog(&creators, &benchmarks, &weights)?;
        Ok(Self {
            creators,
            benchmarks,
            weights,
        })
    }

    /// Parse the catalog embedded from `config/catalog.yaml`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the embedded file fails to parse or validate.
    pub fn builtin() -> Result<Self, ConfigError> {
        parse_catalog(BUILTIN_CATALOG)
    }

    /// Creators in catalog order.
    #[must_use]
    pub fn creators(&self) -> &[CandidateProfile] {
        &self.creators
    }

    #[must_use]
    pub fn benchmarks(&self) -> &[BenchmarkRecord] {
        &self.benchmarks
    }

    #[must_use]
    pub fn weights(&self) -> WeightVector {
        self.weights
    }

    #[must_use]
    pub fn creator(&self, id: u32) -> Option<&CandidateProfile> {
        self.creators.iter().find(|c| c.id == id)
    }

    /// Benchmark for a vertical/season pair.
    ///
    /// Falls back to the first record in the table when no record matches.
    #[must_use]
    pub fn benchmark_for(&self, vertical: Vertical, season: Season) -> &BenchmarkRecord {
        self.benchmarks
            .iter()
            .find(|b| b.vertical == vertical && b.season == season)
            // non-empty: enforced by validate_catalog
            .unwrap_or(&self.benchmarks[0])
    }
}

/// Load and validate a catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<ReferenceCatalog, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_catalog(&content)
}

/// Parse and validate a catalog from YAML text.
///
/// # Errors
///
/// Returns `ConfigError` if the text cannot be parsed or fails validation.
pub fn parse_catalog(content: &str) -> Result<ReferenceCatalog, ConfigError> {
    let file: CatalogFile = serde_yaml::from_str(content)?;
    ReferenceCatalog::new(file.creators, file.benchmarks, file.weights)
}

fn validate_catalog(
    creators: &[CandidateProfile],
    benchmarks: &[BenchmarkRecord],
    weights: &WeightVector,
) -> Result<(), ConfigError> {
    if creators.is_empty() {
        return Err(ConfigError::Validation(
            "catalog must contain at least one creator".to_string(),
        ));
    }
    if benchmarks.is_empty() {
        return Err(ConfigError::Validation(
            "catalog must contain at least one benchmark".to_string(),
        ));
    }

    validate_weights(weights)?;

    let mut seen_ids = HashSet::new();
    let mut seen_names = HashSet::new();
    let mut seen_handles = HashSet::new();

    for creator in creators {
        if creator.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "creator {} has an empty name",
                creator.id
            )));
        }
        if !seen_ids.insert(creator.id) {
            return Err(ConfigError::Validation(format!(
                "duplicate creator id: {}",
                creator.id
            )));
        }
        if !seen_names.insert(creator.name.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate creator name: '{}'",
                creator.name
            )));
        }
        if !seen_handles.insert(creator.handle.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "duplicate creator handle: '{}'",
                creator.handle
            )));
        }
        validate_creator(creator)?;
    }

    let mut seen_benchmarks = HashSet::new();
    for bench in benchmarks {
        if !seen_benchmarks.insert(bench.id) {
            return Err(ConfigError::Validation(format!(
                "duplicate benchmark id: {}",
                bench.id
            )));
        }
        let label = format!("benchmark {}", bench.id);
        if !(bench.avg_cpm.is_finite() && bench.avg_cpm > 0.0) {
            return Err(ConfigError::Validation(format!(
                "{label} has non-positive avg_cpm {}",
                bench.avg_cpm
            )));
        }
        check_fraction(&label, "avg_ctr", bench.avg_ctr)?;
        check_fraction(&label, "avg_cvr", bench.avg_cvr)?;
    }

    Ok(())
}

fn validate_weights(weights: &WeightVector) -> Result<(), ConfigError> {
    let parts = [
        ("relevance", weights.relevance),
        ("audience", weights.audience),
        ("engagement", weights.engagement),
        ("safety", weights.safety),
        ("consistency", weights.consistency),
    ];
    for (name, value) in parts {
        check_fraction("weights", name, value)?;
    }
    let sum = weights.sum();
    if (sum - 1.0).abs() > WEIGHT_TOLERANCE {
        return Err(ConfigError::Validation(format!(
            "weights must sum to 1, got {sum}"
        )));
    }
    Ok(())
}

fn validate_creator(creator: &CandidateProfile) -> Result<(), ConfigError> {
    let label = format!("creator '{}'", creator.name);

    if creator.followers == 0 {
        return Err(ConfigError::Validation(format!(
            "{label} must have a positive follower count"
        )));
    }

    check_fraction(&label, "engagement_rate", creator.engagement_rate)?;

    let mut seen_topics = HashSet::new();
    for topic in &creator.topics {
        if !seen_topics.insert(topic.as_str()) {
            return Err(ConfigError::Validation(format!(
                "{label} lists topic '{topic}' more than once"
            )));
        }
    }

    let audience = &creator.audience;
    for (name, value) in [
        ("audience 13-17", audience.teens),
        ("audience 18-24", audience.young_adults),
        ("audience 25-34", audience.adults),
        ("audience 35+", audience.mature),
    ] {
        check_fraction(&label, name, value)?;
    }
    check_distribution(&label, "audience", audience.total())?;

    let geo = &creator.geo;
    for (name, value) in [
        ("geo US", geo.us),
        ("geo CA", geo.ca),
        ("geo UK", geo.uk),
        ("geo AU", geo.au),
        ("geo other", geo.other),
    ] {
        check_fraction(&label, name, value)?;
    }
    check_distribution(&label, "geo", geo.total())?;

    let history = &creator.history;
    check_fraction(&label, "history.reel", history.reel)?;
    check_fraction(&label, "history.static", history.static_post)?;
    check_fraction(&label, "history.story", history.story)?;

    let fraud = &creator.fraud_indicators;
    check_fraction(&label, "spike_frequency", fraud.spike_frequency)?;
    check_fraction(&label, "bot_ratio", fraud.bot_ratio)?;
    check_fraction(&label, "repetitive_comments", fraud.repetitive_comments)?;

    Ok(())
}

fn check_fraction(label: &str, field: &str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{label}: {field} must be a fraction in [0, 1], got {value}"
        )))
    }
}

fn check_distribution(label: &str, field: &str, total: f64) -> Result<(), ConfigError> {
    if (total - 1.0).abs() <= DISTRIBUTION_TOLERANCE {
        Ok(())
    } else {
        Err(ConfigError::Validation(format!(
            "{label}: {field} distribution must sum to 1, got {total:.4}"
        )))
    }
}
