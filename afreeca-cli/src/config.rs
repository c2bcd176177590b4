use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{cli::OutputFormat, error::Result};

const CONFIG_DIR: &str = "afreeca";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AppConfig {
    /// Request timeout in seconds
    pub timeout: u64,
    pub output_format: OutputFormat,
    pub colored: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxy: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            output_format: OutputFormat::Pretty,
            colored: true,
            proxy: None,
            user_agent: None,
            api_url: None,
        }
    }
}

impl AppConfig {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Loads the config from `path`, or the default location.
    ///
    /// A missing file yields the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path.map(Path::to_path_buf).or_else(Self::default_path) else {
            return Ok(Self::default());
        };
        if !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        let config = toml::from_str(&content)?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Extractor extras derived from this config.
    pub fn extras(&self) -> Option<serde_json::Value> {
        let mut extras = serde_json::Map::new();
        if let Some(api_url) = &self.api_url {
            extras.insert("api_url".into(), api_url.clone().into());
        }
        if let Some(user_agent) = &self.user_agent {
            extras.insert("user_agent".into(), user_agent.clone().into());
        }
        (!extras.is_empty()).then_some(serde_json::Value::Object(extras))
    }

    pub fn show(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("missing.toml"))).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.extras(), None);
    }

    #[test]
    fn loads_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "timeout = 5\noutput_format = \"json-compact\"\napi_url = \"http://127.0.0.1:1/api\""
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.timeout, 5);
        assert_eq!(config.output_format, OutputFormat::JsonCompact);
        assert!(config.colored);
        assert_eq!(
            config.extras(),
            Some(serde_json::json!({"api_url": "http://127.0.0.1:1/api"}))
        );
    }

    #[test]
    fn invalid_file_is_config_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "timeout = \"soon\"").unwrap();
        assert!(matches!(
            AppConfig::load(Some(file.path())),
            Err(crate::error::CliError::Config(_))
        ));
    }

    #[test]
    fn show_round_trips() {
        let config = AppConfig {
            proxy: Some("http://127.0.0.1:8080".into()),
            ..AppConfig::default()
        };
        let shown = config.show().unwrap();
        assert_eq!(toml::from_str::<AppConfig>(&shown).unwrap(), config);
    }
}
