use crate::similarity::SimilarityMetric;
use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::{Deserialize, Serialize};

pub const DEFAULT_SIMILARITY_THRESHOLD: u8 = 90;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub cache_path: String,
    pub similarity_threshold: u8,
    pub similarity_metric: SimilarityMetric,
    /// Lowercase extensions (no dot) skipped during listing.
    pub ignore_extensions: Vec<String>,
    /// Glob patterns for paths skipped during listing.
    pub ignore_patterns: Vec<String>,
    pub bind_address: String,
    /// Worker pool size; 0 means one thread per core.
    pub worker_threads: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cache_path: "scan_cache.bin".to_string(),
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            similarity_metric: SimilarityMetric::default(),
            ignore_extensions: ["lrc", "txt", "jpeg", "jpg"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            ignore_patterns: Vec::new(),
            bind_address: "0.0.0.0:5000".to_string(),
            worker_threads: 0,
        }
    }
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.similarity_threshold > 100 {
            return Err(ConfigError::Message(format!(
                "similarity_threshold must be within 0..=100, got {}",
                self.similarity_threshold
            )));
        }
        Ok(())
    }
}

/// Load `Config.toml` (optional) and `TUNE_DUPER_*` environment overrides
/// on top of the defaults.
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(Environment::with_prefix("TUNE_DUPER").try_parsing(true))
        .build()?;
    let config = builder.try_deserialize::<AppConfig>()?;
    config.validate()?;
    Ok(config)
}
