use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use snafu::ResultExt;

use crate::annotate::filter::TriggerMetric;
use crate::error::config_error::{NoHomeDirectorySnafu, ParseConfigSnafu, ReadFileSnafu};
use crate::error::ConfigError;

const FILE_NAME: &str = ".goban-commentary.toml";

/// User-level config stored at ~/.goban-commentary.toml.
///
/// Every field is optional; anything left out keeps its default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct UserConfig {
    pub commentary: CommentarySection,
    pub provider: ProviderSection,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CommentarySection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score_threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger: Option<TriggerMetric>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debug: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_concurrency: Option<usize>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ProviderSection {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Name of the environment variable holding the API key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
}

impl UserConfig {
    /// Path to the user config file (~/.goban-commentary.toml).
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let home = std::env::var("HOME")
            .ok()
            .map(PathBuf::from)
            .filter(|p| p.is_absolute())
            .ok_or_else(|| NoHomeDirectorySnafu.build())?;
        Ok(home.join(FILE_NAME))
    }

    /// Load user config from `path`. Returns Ok(None) if the file does not exist.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(path).context(ReadFileSnafu { path })?;
        Self::parse(&contents).map(Some)
    }

    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        toml::from_str(contents).context(ParseConfigSnafu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_file() {
        let config = UserConfig::parse(
            r#"
            [commentary]
            enabled = true
            language = "ru"
            score_threshold = 2.5
            trigger = "winrate"
            max_concurrency = 8

            [provider]
            model = "gpt-4o"
            api_key_env = "MY_KEY"
            timeout_secs = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.commentary.enabled, Some(true));
        assert_eq!(config.commentary.language.as_deref(), Some("ru"));
        assert_eq!(config.commentary.score_threshold, Some(2.5));
        assert_eq!(config.commentary.trigger, Some(TriggerMetric::Winrate));
        assert_eq!(config.commentary.max_concurrency, Some(8));
        assert_eq!(config.provider.model.as_deref(), Some("gpt-4o"));
        assert_eq!(config.provider.api_key_env.as_deref(), Some("MY_KEY"));
        assert_eq!(config.provider.timeout_secs, Some(5));
        assert_eq!(config.provider.endpoint, None);
    }

    #[test]
    fn test_parse_empty_file() {
        assert_eq!(UserConfig::parse("").unwrap(), UserConfig::default());
    }

    #[test]
    fn test_parse_rejects_bad_trigger() {
        let err = UserConfig::parse("[commentary]\ntrigger = \"vibes\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::ParseConfig { .. }));
    }

    #[test]
    fn test_roundtrip() {
        let mut config = UserConfig::default();
        config.commentary.trigger = Some(TriggerMetric::ScoreMean);
        config.provider.temperature = Some(0.5);
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("\"score-mean\""));
        assert_eq!(UserConfig::parse(&toml_str).unwrap(), config);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = UserConfig::load_from(&dir.path().join("absent.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn test_load_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[commentary]\nlanguage = \"ja\"\n").unwrap();
        let loaded = UserConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(loaded.commentary.language.as_deref(), Some("ja"));
    }
}
