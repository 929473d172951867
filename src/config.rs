use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_ENDPOINT: &str =
    "https://cis.tsu.ru/kondakov_patterns_failures/hs/BankSystem/GetLogs";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    pub source: SourceConfig,
    pub dashboard: DashboardConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SourceConfig {
    pub endpoint: String,
    /// Extra attempts after the first failed one
    pub retry: u32,
    pub retry_delay_ms: u64,
    pub max_retry_delay_ms: u64,
    pub timeout_seconds: u64,
    /// Substitute the built-in sample dataset once retries are exhausted
    pub fallback_on_error: bool,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            retry: 3,
            retry_delay_ms: 1000,
            max_retry_delay_ms: 30_000,
            timeout_seconds: 30,
            fallback_on_error: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// chrono format applied to each record's timestamp (time of day is dropped)
    pub date_format: String,
    /// Rows per chart panel, borders included
    pub panel_height: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            date_format: "%-m/%-d/%Y".to_string(),
            panel_height: 16,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    /// "text" or "json"
    pub format: String,
    /// Log file used while the dashboard owns the terminal
    pub file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "text".to_string(),
            file: None,
        }
    }
}

/// Load configuration: defaults, then the optional TOML file, then
/// `REQLOG_DASH__*` environment variables.
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("REQLOG_DASH").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

pub fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    let endpoint = cfg.source.endpoint.trim();
    if endpoint.is_empty() {
        anyhow::bail!("Log endpoint cannot be empty");
    }
    if !endpoint.starts_with("http://") && !endpoint.starts_with("https://") {
        anyhow::bail!("Log endpoint must be an http(s) URL, got '{}'", endpoint);
    }

    if cfg.source.retry > 10 {
        anyhow::bail!("Invalid retry count: {}. Must be at most 10", cfg.source.retry);
    }

    if cfg.source.timeout_seconds == 0 {
        anyhow::bail!("Request timeout must be greater than zero");
    }

    if cfg.dashboard.panel_height < 8 {
        anyhow::bail!(
            "Invalid panel height: {}. Must be at least 8 rows",
            cfg.dashboard.panel_height
        );
    }

    match cfg.logging.format.as_str() {
        "text" | "json" => {}
        other => anyhow::bail!("Invalid log format: '{}'. Must be one of: text, json", other),
    }

    Ok(())
}
