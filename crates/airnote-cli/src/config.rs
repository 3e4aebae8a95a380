//! Configuration file management.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the backend project.
    #[serde(default)]
    pub base_url: Option<String>,

    /// API key for the backend.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Photo bucket name, when different from the default.
    #[serde(default)]
    pub bucket: Option<String>,
}

impl Config {
    /// Path of the config file (`<config dir>/airnote/config.toml`).
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("airnote").join("config.toml"))
    }

    /// Load the configuration, falling back to defaults when no file exists.
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Base URL, with the `AIRNOTE_BASE_URL` environment override.
    pub fn resolved_base_url(&self) -> Result<String> {
        std::env::var("AIRNOTE_BASE_URL")
            .ok()
            .or_else(|| self.base_url.clone())
            .context(
                "No backend configured. Set base_url in the config file \
                 or the AIRNOTE_BASE_URL environment variable.",
            )
    }

    /// API key, with the `AIRNOTE_API_KEY` environment override.
    pub fn resolved_api_key(&self) -> Result<String> {
        std::env::var("AIRNOTE_API_KEY")
            .ok()
            .or_else(|| self.api_key.clone())
            .context(
                "No API key configured. Set api_key in the config file \
                 or the AIRNOTE_API_KEY environment variable.",
            )
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = Config::load_from(Path::new("/no/such/config.toml")).unwrap();
        assert!(config.base_url.is_none());
        assert!(config.api_key.is_none());
        assert!(config.bucket.is_none());
    }

    #[test]
    fn test_load_from_parses_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = \"https://project.example.co\"").unwrap();
        writeln!(file, "api_key = \"anon-key\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.base_url.as_deref(), Some("https://project.example.co"));
        assert_eq!(config.api_key.as_deref(), Some("anon-key"));
        assert!(config.bucket.is_none());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "base_url = [not toml").unwrap();

        assert!(Config::load_from(file.path()).is_err());
    }
}
