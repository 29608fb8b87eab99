use std::path::PathBuf;

use rust_decimal::Decimal;

use crate::profiles::Season;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// YAML catalog to load instead of the built-in one.
    pub catalog_path: Option<PathBuf>,
    /// Total campaign budget in INR.
    pub budget_inr: Decimal,
    pub season: Season,
}
