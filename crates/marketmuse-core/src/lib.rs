//! Shared reference data and configuration for MarketMuse.
//!
//! Holds the creator catalog, campaign benchmarks, and composite weights,
//! plus environment-driven application config.

pub mod app_config;
pub mod catalog;
pub mod config;
pub mod error;
pub mod profiles;

pub use app_config::AppConfig;
pub use catalog::{load_catalog, parse_catalog, ReferenceCatalog};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::ConfigError;
pub use profiles::{
    AgeBracket, AgeDistribution, BenchmarkRecord, CandidateProfile, ContentHistory,
    FraudIndicators, GeoDistribution, PostType, Region, SafetyTier, Season, Vertical,
    WeightVector,
};
