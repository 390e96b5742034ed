use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::ScoringWeights;
use crate::services::IdStrategy;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub storage: StorageSettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

/// Where the request collection is persisted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    File,
    Memory,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    #[serde(default)]
    pub backend: StorageBackend,
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: String,
    #[serde(default)]
    pub id_strategy: IdStrategy,
    #[serde(default = "default_true")]
    pub seed_requests: bool,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            snapshot_path: default_snapshot_path(),
            id_strategy: IdStrategy::default(),
            seed_requests: true,
        }
    }
}

fn default_snapshot_path() -> String { "data/requests.json".to_string() }
fn default_true() -> bool { true }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogSettings {
    /// JSON or TOML catalog; the built-in sample is used when unset
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_limit")]
    pub default_limit: u16,
    #[serde(default = "default_max_limit")]
    pub max_limit: u16,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> u16 { 20 }
fn default_max_limit() -> u16 { 100 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_role_weight")]
    pub role: i32,
    #[serde(default = "default_subject_weight")]
    pub subject: i32,
    #[serde(default = "default_grade_weight")]
    pub grade_fit: i32,
    #[serde(default = "default_grade_weight")]
    pub grade_misfit: i32,
    #[serde(default = "default_overlap_cap")]
    pub overlap_cap: usize,
    #[serde(default = "default_verified_weight")]
    pub verified: i32,
    #[serde(default = "default_query_weight")]
    pub query: i32,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            role: default_role_weight(),
            subject: default_subject_weight(),
            grade_fit: default_grade_weight(),
            grade_misfit: default_grade_weight(),
            overlap_cap: default_overlap_cap(),
            verified: default_verified_weight(),
            query: default_query_weight(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            role: config.role,
            subject: config.subject,
            grade_fit: config.grade_fit,
            grade_misfit: config.grade_misfit,
            overlap_cap: config.overlap_cap,
            verified: config.verified,
            query: config.query,
        }
    }
}

fn default_role_weight() -> i32 { 3 }
fn default_subject_weight() -> i32 { 4 }
fn default_grade_weight() -> i32 { 2 }
fn default_overlap_cap() -> usize { 3 }
fn default_verified_weight() -> i32 { 1 }
fn default_query_weight() -> i32 { 2 }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "full".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the structs
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SKILLPORT__)
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SKILLPORT__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SKILLPORT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = apply_env_overrides(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SKILLPORT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn scoring_weights(&self) -> ScoringWeights {
        ScoringWeights::from(&self.scoring.weights)
    }
}

/// Shortcut variables that do not follow the nested naming scheme
fn apply_env_overrides(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let mut builder = Config::builder().add_source(settings);

    if let Ok(path) = env::var("SKILLPORT_STATE_FILE") {
        builder = builder.set_override("storage.snapshot_path", path)?;
    }
    if let Ok(path) = env::var("SKILLPORT_CATALOG") {
        builder = builder.set_override("catalog.path", path)?;
    }

    builder.build()
}
