use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "ENQUETE_DATA_DIR";
pub const PUBLIC_BASE_URL_ENV: &str = "ENQUETE_PUBLIC_BASE_URL";

/// Runtime settings shared by the service and the tools.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    /// Directory holding `surveys.json` and `responses.json`.
    pub data_dir: PathBuf,
    /// Base of the public form locator, without a trailing slash.
    pub public_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            public_base_url: "http://localhost".to_string(),
        }
    }
}

impl Config {
    /// Loads a JSON config file. Missing keys fall back to defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `ENQUETE_DATA_DIR` and `ENQUETE_PUBLIC_BASE_URL` when set.
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides(|key| std::env::var(key).ok())
    }

    /// Applies overrides from an arbitrary lookup. Empty values are ignored.
    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(dir) = lookup(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(url) = lookup(PUBLIC_BASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.public_base_url = url;
        }
        self
    }

    /// The public form locator for a survey.
    pub fn public_url(&self, survey_id: &str) -> String {
        format!(
            "{}/survey.html?id={}",
            self.public_base_url.trim_end_matches('/'),
            survey_id
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_defaults() {
        let config = Config::default().with_overrides(|key| match key {
            DATA_DIR_ENV => Some("/srv/enquete".to_string()),
            PUBLIC_BASE_URL_ENV => Some(String::new()),
            _ => None,
        });
        assert_eq!(config.data_dir, PathBuf::from("/srv/enquete"));
        assert_eq!(config.public_base_url, "http://localhost");
    }

    #[test]
    fn public_url_trims_trailing_slash() {
        let config = Config {
            public_base_url: "https://forms.example.com/".to_string(),
            ..Config::default()
        };
        assert_eq!(
            config.public_url("42"),
            "https://forms.example.com/survey.html?id=42"
        );
    }
}
