use cipherstudio_client::DEFAULT_API_URL;
use cipherstudio_compiler_preview::RuntimeUrls;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "cipherstudio.config.json";

/// CipherStudio configuration file format
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Base URL of the project backend
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// How long a preview may stay silent before it is reported as stuck
    #[serde(default = "default_preview_timeout_ms")]
    pub preview_timeout_ms: u64,

    /// Where the preview document loads React, ReactDOM and Babel from
    #[serde(default)]
    pub runtime: RuntimeUrls,

    /// Project file used when a command is not given one
    #[serde(default = "default_storage_path")]
    pub storage_path: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_preview_timeout_ms() -> u64 {
    8000
}

fn default_storage_path() -> String {
    ".cipherstudio/project.json".to_string()
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &str) -> anyhow::Result<Self> {
        let config_path = PathBuf::from(cwd).join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Resolve the project file: explicit argument first, then `storagePath`
    pub fn project_path(&self, cwd: &str, explicit: Option<&str>) -> PathBuf {
        PathBuf::from(cwd).join(explicit.unwrap_or(&self.storage_path))
    }

    pub fn preview_timeout(&self) -> Duration {
        Duration::from_millis(self.preview_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            preview_timeout_ms: default_preview_timeout_ms(),
            runtime: RuntimeUrls::default(),
            storage_path: default_storage_path(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "apiUrl": "https://studio.example.com/api",
            "previewTimeoutMs": 15000,
            "runtime": { "babel": "/vendor/babel.min.js" },
            "storagePath": "projects/main.json"
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.api_url, "https://studio.example.com/api");
        assert_eq!(config.preview_timeout(), Duration::from_secs(15));
        assert_eq!(config.runtime.babel, "/vendor/babel.min.js");
        assert_eq!(config.runtime.react, RuntimeUrls::default().react);
        assert_eq!(config.storage_path, "projects/main.json");
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.api_url, "http://localhost:5000/api");
        assert_eq!(config.preview_timeout_ms, 8000);
        assert_eq!(config.storage_path, ".cipherstudio/project.json");
    }

    #[test]
    fn test_missing_config_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().to_str().unwrap()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_project_path_resolution() {
        let config = Config::default();
        assert_eq!(
            config.project_path("/work", None),
            PathBuf::from("/work/.cipherstudio/project.json")
        );
        assert_eq!(
            config.project_path("/work", Some("demo.json")),
            PathBuf::from("/work/demo.json")
        );
    }
}
