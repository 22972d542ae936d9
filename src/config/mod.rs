use crate::benchmarks::{Benchmarks, DEFAULT_JPY_PER_USD};
use crate::presets::PresetCatalogue;
use crate::roster::TeamRoster;
use polars::prelude::PolarsError;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::io;
use std::net::{AddrParseError, SocketAddr};
use std::path::PathBuf;
use thiserror::Error;

pub const CONFIG_PATH_ENV: &str = "SHOOT_MARGIN_CONFIG";
pub const HTTP_ADDR_ENV: &str = "SHOOT_MARGIN_HTTP_ADDR";
pub const DEFAULT_HTTP_ADDR: &str = "0.0.0.0:3000";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("dataframe error: {0}")]
    DataFrame(#[from] PolarsError),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Fixed configuration for one calculator session: who is on the team, what
/// the business benchmarks are, and which presets can be loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CalculatorConfig {
    #[serde(default)]
    pub roster: TeamRoster,
    #[serde(default)]
    pub benchmarks: Benchmarks,
    #[serde(default = "default_jpy_per_usd")]
    pub jpy_per_usd: f64,
    #[serde(default)]
    pub presets: PresetCatalogue,
}

fn default_jpy_per_usd() -> f64 {
    DEFAULT_JPY_PER_USD
}

impl Default for CalculatorConfig {
    fn default() -> Self {
        Self {
            roster: TeamRoster::default(),
            benchmarks: Benchmarks::default(),
            jpy_per_usd: DEFAULT_JPY_PER_USD,
            presets: PresetCatalogue::default(),
        }
    }
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

pub fn validate_config(config: &CalculatorConfig) -> ConfigResult<()> {
    let invalid = |msg: String| Err(ConfigError::InvalidData(msg));

    if config.roster.is_empty() {
        return invalid("roster must contain at least one team member".into());
    }
    let mut seen = HashSet::new();
    for member in config.roster.members() {
        if member.id.trim().is_empty() {
            return invalid("team member id must not be empty".into());
        }
        if !seen.insert(member.id.as_str()) {
            return invalid(format!("duplicate team member id '{}'", member.id));
        }
        if !non_negative(member.daily_rate) || !non_negative(member.monthly_salary) {
            return invalid(format!(
                "team member '{}' has an invalid rate (salary {}, daily {})",
                member.id, member.monthly_salary, member.daily_rate
            ));
        }
    }

    let b = &config.benchmarks;
    if !(b.working_days_per_month.is_finite() && b.working_days_per_month > 0.0) {
        return invalid(format!(
            "working_days_per_month must be positive (got {})",
            b.working_days_per_month
        ));
    }
    if !non_negative(b.monthly_overhead) {
        return invalid(format!(
            "monthly_overhead must be non-negative (got {})",
            b.monthly_overhead
        ));
    }
    if !(b.low_margin <= b.good_margin && b.good_margin <= b.great_margin) {
        return invalid(format!(
            "margin thresholds must satisfy low <= good <= great (got {} / {} / {})",
            b.low_margin, b.good_margin, b.great_margin
        ));
    }
    if !(config.jpy_per_usd.is_finite() && config.jpy_per_usd > 0.0) {
        return invalid(format!(
            "jpy_per_usd must be positive (got {})",
            config.jpy_per_usd
        ));
    }

    let mut keys = HashSet::new();
    for preset in config.presets.presets() {
        if !keys.insert(preset.key.as_str()) {
            return invalid(format!("duplicate preset key '{}'", preset.key));
        }
    }
    Ok(())
}

/// Process settings read from the environment (after an optional `.env`).
#[derive(Debug, Clone)]
pub struct Settings {
    pub config_path: Option<PathBuf>,
    /// Raw listen address. Parsed only by the HTTP server.
    pub http_addr: String,
}

impl Settings {
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        Self {
            config_path: std::env::var_os(CONFIG_PATH_ENV).map(PathBuf::from),
            http_addr: std::env::var(HTTP_ADDR_ENV)
                .unwrap_or_else(|_| DEFAULT_HTTP_ADDR.to_string()),
        }
    }

    pub fn socket_addr(&self) -> Result<SocketAddr, AddrParseError> {
        self.http_addr.trim().parse()
    }

    /// Loads the configured file, or the built-in defaults when no path is set.
    pub fn load_config(&self) -> ConfigResult<CalculatorConfig> {
        match &self.config_path {
            Some(path) => load_config_from_json(path),
            None => {
                log::info!("{CONFIG_PATH_ENV} not set, using built-in configuration");
                Ok(CalculatorConfig::default())
            }
        }
    }
}

pub mod file;

pub use file::{
    load_config_from_json, load_reference_from_csv, save_config_to_json, save_reference_to_csv,
};
