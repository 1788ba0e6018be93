use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const ENV_CONFIG_PATH: &str = "TRIAGE_CONFIG_PATH";
const DEFAULT_CONFIG_PATH: &str = "config.yaml";

const ENV_DATA_DIR: &str = "TRIAGE_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "data";

/// CORS configuration for the browser frontend
#[derive(Debug, Clone, Deserialize)]
pub struct CorsConfig {
    /// Allowed origins. An entry of "*" allows any origin.
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: default_allowed_origins(),
        }
    }
}

impl CorsConfig {
    /// Whether any origin is acceptable.
    pub fn allows_any_origin(&self) -> bool {
        self.allowed_origins.iter().any(|origin| origin == "*")
    }
}

fn default_allowed_origins() -> Vec<String> {
    // The local frontend plus a wildcard, matching the development setup.
    vec![
        "http://127.0.0.1:8001".to_string(),
        "http://localhost:8001".to_string(),
        "*".to_string(),
    ]
}

/// YAML configuration file structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    #[serde(default)]
    pub cors: CorsConfig,
}

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Directory holding the query/feedback logs and the SQLite database.
    pub data_dir: PathBuf,
    pub cors: CorsConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            cors: CorsConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment and config file
    pub fn from_env() -> Self {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);

        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());

        // Load config file
        let config_path =
            std::env::var(ENV_CONFIG_PATH).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

        let file = Self::load_config_file(&config_path).unwrap_or_default();

        // Environment beats the file for the data directory.
        let data_dir = std::env::var(ENV_DATA_DIR)
            .map(PathBuf::from)
            .ok()
            .or(file.data_dir)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));

        Self {
            host,
            port,
            data_dir,
            cors: file.cors,
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
            Ok(contents) => {
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
