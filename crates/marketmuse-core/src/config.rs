use rust_decimal::Decimal;

use crate::app_config::AppConfig;
use crate::profiles::Season;
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable is optional; defaults match the fixed campaign parameters.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::path::PathBuf;

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let log_level = or_default("MARKETMUSE_LOG_LEVEL", "info");
    let catalog_path = lookup("MARKETMUSE_CATALOG_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);
    let budget_inr = parse_budget(&or_default("MARKETMUSE_BUDGET_INR", "500000"))?;
    let season = or_default("MARKETMUSE_SEASON", "winter")
        .parse::<Season>()
        .map_err(|reason| ConfigError::InvalidEnvVar {
            var: "MARKETMUSE_SEASON".to_string(),
            reason,
        })?;

    Ok(AppConfig {
        log_level,
        catalog_path,
        budget_inr,
        season,
    })
}

fn parse_budget(raw: &str) -> Result<Decimal, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "MARKETMUSE_BUDGET_INR".to_string(),
        reason,
    };
    let budget = raw
        .trim()
        .parse::<Decimal>()
        .map_err(|e| invalid(e.to_string()))?;
    if budget <= Decimal::ZERO {
        return Err(invalid(format!("budget must be positive, got {budget}")));
    }
    Ok(budget)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::env::VarError;

    use super::*;

    fn lookup_from_map<'a>(
        map: &'a HashMap<&'a str, &'a str>,
    ) -> impl Fn(&str) -> Result<String, VarError> + 'a {
        move |key| {
            map.get(key)
                .map(|v| (*v).to_string())
                .ok_or(VarError::NotPresent)
        }
    }

    #[test]
    fn build_app_config_defaults() {
        let map: HashMap<&str, &str> = HashMap::new();
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
        let cfg = result.unwrap();
        assert_eq!(cfg.log_level, "info");
        assert!(cfg.catalog_path.is_none());
        assert_eq!(cfg.budget_inr, Decimal::from(500_000));
        assert_eq!(cfg.season, Season::Winter);
    }

    #[test]
    fn build_app_config_overrides() {
        let mut map = HashMap::new();
        map.insert("MARKETMUSE_LOG_LEVEL", "debug");
        map.insert("MARKETMUSE_CATALOG_PATH", "/etc/marketmuse/catalog.yaml");
        map.insert("MARKETMUSE_BUDGET_INR", "750000.50");
        map.insert("MARKETMUSE_SEASON", "summer");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(
            cfg.catalog_path.as_deref(),
            Some(std::path::Path::new("/etc/marketmuse/catalog.yaml"))
        );
        assert_eq!(cfg.budget_inr, "750000.50".parse::<Decimal>().unwrap());
        assert_eq!(cfg.season, Season::Summer);
    }

    #[test]
    fn build_app_config_ignores_unknown_vars() {
        let mut map = HashMap::new();
        map.insert("MARKETMUSE_ENV", "staging");
        let result = build_app_config(lookup_from_map(&map));
        assert!(result.is_ok(), "expected Ok, got: {result:?}");
    }

    #[test]
    fn build_app_config_blank_catalog_path_is_none() {
        let mut map = HashMap::new();
        map.insert("MARKETMUSE_CATALOG_PATH", "  ");
        let cfg = build_app_config(lookup_from_map(&map)).unwrap();
        assert!(cfg.catalog_path.is_none());
    }

    #[test]
    fn build_app_config_invalid_budget() {
        let mut map = HashMap::new();
        map.insert("MARKETMUSE_BUDGET_INR", "lots");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MARKETMUSE_BUDGET_INR"),
            "expected InvalidEnvVar(MARKETMUSE_BUDGET_INR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_negative_budget() {
        let mut map = HashMap::new();
        map.insert("MARKETMUSE_BUDGET_INR", "-100");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MARKETMUSE_BUDGET_INR"),
            "expected InvalidEnvVar(MARKETMUSE_BUDGET_INR), got: {result:?}"
        );
    }

    #[test]
    fn build_app_config_invalid_season() {
        let mut map = HashMap::new();
        map.insert("MARKETMUSE_SEASON", "monsoon");
        let result = build_app_config(lookup_from_map(&map));
        assert!(
            matches!(result, Err(ConfigError::InvalidEnvVar { ref var, .. }) if var == "MARKETMUSE_SEASON"),
            "expected InvalidEnvVar(MARKETMUSE_SEASON), got: {result:?}"
        );
    }
}
