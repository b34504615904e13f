use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const DEFAULT_ENDPOINT: &str = "https://maps.google.com/maps/api/geocode/json";

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}
fn default_language() -> String {
    "zh-CN".to_string()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_verbose() -> bool {
    false
}

/// Settings read from `geocode-batch.toml`.
///
/// ```toml
/// verbose = true
///
/// [geocoder]
/// endpoint = "https://maps.googleapis.com/maps/api/geocode/json"
/// language = "en"
/// api_key = "..."
/// timeout_secs = 10
/// ```
#[derive(Debug, Deserialize, Default)]
pub struct FileConfig {
    #[serde(default = "default_verbose")]
    pub verbose: bool,
    #[serde(default)]
    pub geocoder: GeocoderConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct GeocoderConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            language: default_language(),
            api_key: None,
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl FileConfig {
    /// Load an explicitly requested config file. Missing or invalid is an error.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!("Config file not found: {}", path.display());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Search the usual locations and return the first file that parses.
    pub fn load() -> Option<Self> {
        for path in get_config_paths() {
            if path.exists()
                && let Ok(contents) = std::fs::read_to_string(&path)
            {
                match toml::from_str(&contents) {
                    Ok(config) => {
                        log::info!("Using config file {}", path.display());
                        return Some(config);
                    }
                    Err(e) => {
                        log::warn!("Failed to parse config file {}: {}", path.display(), e);
                    }
                }
            }
        }
        None
    }
}

fn get_config_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    paths.push(PathBuf::from("geocode-batch.toml"));
    paths.push(PathBuf::from(".geocode-batch.toml"));

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("geocode-batch").join("config.toml"));
        paths.push(config_dir.join("geocode-batch.toml"));
    }

    if let Some(home) = dirs::home_dir() {
        paths.push(home.join(".geocode-batch.toml"));
    }

    paths
}

/// Command-line values that take precedence over the config file.
#[derive(Debug, Default, Clone)]
pub struct Overrides {
    pub verbose: bool,
    pub endpoint: Option<String>,
    pub language: Option<String>,
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Everything one run needs, resolved once and passed down explicitly.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
    pub verbose: bool,
    pub geocoder: GeocoderConfig,
}

impl Config {
    pub fn resolve(
        input: PathBuf,
        output: PathBuf,
        overrides: Overrides,
        file_config: Option<FileConfig>,
    ) -> Result<Self> {
        let file_config = file_config.unwrap_or_default();
        let mut geocoder = file_config.geocoder;

        if let Some(endpoint) = overrides.endpoint {
            geocoder.endpoint = endpoint;
        }
        if let Some(language) = overrides.language {
            geocoder.language = language;
        }
        if overrides.api_key.is_some() {
            geocoder.api_key = overrides.api_key;
        }
        if let Some(timeout_secs) = overrides.timeout_secs {
            geocoder.timeout_secs = timeout_secs;
        }

        if geocoder.timeout_secs == 0 {
            bail!("Request timeout must be at least 1 second");
        }

        Ok(Self {
            input,
            output,
            verbose: overrides.verbose || file_config.verbose,
            geocoder,
        })
    }

    /// Log level when `RUST_LOG` does not say otherwise.
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Info
        } else {
            log::LevelFilter::Warn
        }
    }
}
