use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const ENV_CONFIG_PATH: &str = "STROKE_CONFIG_PATH";
const ENV_MODEL_PATH: &str = "STROKE_MODEL_PATH";
const ENV_INDEX_PATH: &str = "STROKE_INDEX_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";
const DEFAULT_MODEL_PATH: &str = "models/log_reg_model.json";
const DEFAULT_INDEX_PATH: &str = "static/index.html";

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Path to the serialized classifier artifact
    #[serde(default)]
    pub model_path: Option<PathBuf>,
    /// Path to the HTML page served on `GET /`
    #[serde(default)]
    pub index_path: Option<PathBuf>,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub host: String,
    pub model_path: PathBuf,
    pub index_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            host: "127.0.0.1".to_string(),
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            index_path: PathBuf::from(DEFAULT_INDEX_PATH),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    ///
    /// Environment variables take precedence over the config file, which
    /// takes precedence over the defaults.
    pub fn from_env() -> Self {
        let config_path = std::env::var(ENV_CONFIG_PATH)
            .unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        let file = Self::load_config_file(&config_path).unwrap_or_default();

        Self::resolve(file, |key| std::env::var(key).ok())
    }

    /// Merge a config file with variables supplied by `lookup`
    fn resolve(file: ConfigFile, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|p| p.parse().ok())
            .unwrap_or(defaults.port);

        let host = lookup("HOST").unwrap_or(defaults.host);

        let model_path = lookup(ENV_MODEL_PATH)
            .map(PathBuf::from)
            .or(file.model_path)
            .unwrap_or(defaults.model_path);

        let index_path = lookup(ENV_INDEX_PATH)
            .map(PathBuf::from)
            .or(file.index_path)
            .unwrap_or(defaults.index_path);

        Self {
            port,
            host,
            model_path,
            index_path,
        }
    }

    /// Load configuration from YAML file
    fn load_config_file(path: &str) -> Option<ConfigFile> {
        let path = Path::new(path);

        if !path.exists() {
            tracing::debug!(path = %path.display(), "Config file not found, using defaults");
            return None;
        }

        match fs::read_to_string(path) {
            Ok(contents) => parse_config(path, &contents),
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "Failed to read config file, using defaults");
                None
            }
        }
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_config(path: &Path, contents: &str) -> Option<ConfigFile> {
    // Handle empty file
    let contents = contents.trim();
    if contents.is_empty() {
        tracing::debug!(path = %path.display(), "Config file is empty, using defaults");
        return Some(ConfigFile::default());
    }

    match serde_yaml::from_str(contents) {
        Ok(config) => {
            tracing::info!(path = %path.display(), "Loaded configuration from file");
            Some(config)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "Failed to parse config file, using defaults");
            None
        }
    }
}
