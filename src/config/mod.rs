pub mod user_config;

use std::path::Path;

use crate::annotate::filter::TriggerMetric;
use crate::error::config_error::InvalidSnafu;
use crate::error::ConfigError;
use crate::prompt::DEFAULT_LANGUAGE;
use crate::provider::openai::{DEFAULT_ENDPOINT, DEFAULT_MODEL};

pub use user_config::UserConfig;

pub const DEFAULT_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const LANGUAGE_ENV: &str = "GOBAN_COMMENTARY_LANGUAGE";
pub const ENABLED_ENV: &str = "GOBAN_COMMENTARY_ENABLED";

/// Settings fixed for the lifetime of a provider instance.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderSettings {
    pub endpoint: String,
    pub model: String,
    pub api_key_env: String,
    pub timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            timeout_secs: 20,
            max_tokens: 120,
            temperature: 0.3,
        }
    }
}

/// Commentary configuration, assembled from defaults + user file + environment.
#[derive(Clone)]
pub struct CommentaryConfig {
    pub enabled: bool,
    pub api_key: Option<String>,
    pub language: String,
    pub score_threshold: f64,
    pub trigger: TriggerMetric,
    pub debug: bool,
    pub max_concurrency: usize,
    pub provider: ProviderSettings,
}

impl Default for CommentaryConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: None,
            language: DEFAULT_LANGUAGE.to_string(),
            score_threshold: 1.0,
            trigger: TriggerMetric::default(),
            debug: false,
            max_concurrency: 4,
            provider: ProviderSettings::default(),
        }
    }
}

impl std::fmt::Debug for CommentaryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommentaryConfig")
            .field("enabled", &self.enabled)
            .field("api_key", &self.api_key.as_ref().map(|_| "[redacted]"))
            .field("language", &self.language)
            .field("score_threshold", &self.score_threshold)
            .field("trigger", &self.trigger)
            .field("debug", &self.debug)
            .field("max_concurrency", &self.max_concurrency)
            .field("provider", &self.provider)
            .finish()
    }
}

impl CommentaryConfig {
    /// Commentary runs only when switched on and a key is present.
    pub fn is_enabled(&self) -> bool {
        self.enabled
            && self
                .api_key
                .as_deref()
                .is_some_and(|key| !key.trim().is_empty())
    }

    /// Load config from `path` (or ~/.goban-commentary.toml) and the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let user = match path {
            Some(path) => UserConfig::load_from(path)?,
            None => UserConfig::load_from(&UserConfig::default_path()?)?,
        };
        Self::resolve(user.unwrap_or_default(), |name| std::env::var(name).ok())
    }

    /// Merge a user config over the defaults, then apply environment lookups.
    pub fn resolve(
        user: UserConfig,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::default();
        let c = user.commentary;
        let p = user.provider;

        if let Some(val) = c.enabled {
            config.enabled = val;
        }
        if let Some(val) = c.language {
            config.language = val;
        }
        if let Some(val) = c.score_threshold {
            config.score_threshold = val;
        }
        if let Some(val) = c.trigger {
            config.trigger = val;
        }
        if let Some(val) = c.debug {
            config.debug = val;
        }
        if let Some(val) = c.max_concurrency {
            config.max_concurrency = val;
        }

        if let Some(val) = p.model {
            config.provider.model = val;
        }
        if let Some(val) = p.endpoint {
            config.provider.endpoint = val;
        }
        if let Some(val) = p.api_key_env {
            config.provider.api_key_env = val;
        }
        if let Some(val) = p.timeout_secs {
            config.provider.timeout_secs = val;
        }
        if let Some(val) = p.max_tokens {
            config.provider.max_tokens = val;
        }
        if let Some(val) = p.temperature {
            config.provider.temperature = val;
        }

        if let Some(val) = env(ENABLED_ENV) {
            config.enabled = val == "true" || val == "1";
        }
        if let Some(val) = env(LANGUAGE_ENV).filter(|s| !s.trim().is_empty()) {
            config.language = val;
        }
        config.api_key =
            env(config.provider.api_key_env.as_str()).filter(|s| !s.trim().is_empty());

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        snafu::ensure!(
            self.score_threshold.is_finite() && self.score_threshold >= 0.0,
            InvalidSnafu {
                message: format!(
                    "score_threshold must be a non-negative number, got {}",
                    self.score_threshold
                ),
            }
        );
        snafu::ensure!(
            self.max_concurrency >= 1,
            InvalidSnafu {
                message: "max_concurrency must be at least 1",
            }
        );
        snafu::ensure!(
            self.provider.timeout_secs >= 1,
            InvalidSnafu {
                message: "provider.timeout_secs must be at least 1",
            }
        );
        snafu::ensure!(
            self.provider.max_tokens >= 1,
            InvalidSnafu {
                message: "provider.max_tokens must be at least 1",
            }
        );
        snafu::ensure!(
            (0.0..=2.0).contains(&self.provider.temperature),
            InvalidSnafu {
                message: format!(
                    "provider.temperature must be within 0.0..=2.0, got {}",
                    self.provider.temperature
                ),
            }
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = CommentaryConfig::resolve(UserConfig::default(), env_from(&[])).unwrap();
        assert!(!config.enabled);
        assert_eq!(config.api_key, None);
        assert_eq!(config.language, "en");
        assert_eq!(config.score_threshold, 1.0);
        assert_eq!(config.trigger, TriggerMetric::ScoreMean);
        assert_eq!(config.provider.model, "gpt-4o-mini");
        assert_eq!(config.provider.api_key_env, "OPENAI_API_KEY");
        assert!(!config.is_enabled());
    }

    #[test]
    fn test_enabled_requires_key() {
        let mut user = UserConfig::default();
        user.commentary.enabled = Some(true);

        let without_key = CommentaryConfig::resolve(user.clone(), env_from(&[])).unwrap();
        assert!(!without_key.is_enabled());

        let blank_key =
            CommentaryConfig::resolve(user.clone(), env_from(&[("OPENAI_API_KEY", "  ")]))
                .unwrap();
        assert!(!blank_key.is_enabled());

        let with_key =
            CommentaryConfig::resolve(user, env_from(&[("OPENAI_API_KEY", "sk-test")])).unwrap();
        assert!(with_key.is_enabled());
    }

    #[test]
    fn test_custom_key_env_and_overrides() {
        let mut user = UserConfig::default();
        user.commentary.language = Some("ru".to_string());
        user.provider.api_key_env = Some("GO_LLM_KEY".to_string());

        let config = CommentaryConfig::resolve(
            user,
            env_from(&[
                ("GO_LLM_KEY", "sk-custom"),
                ("OPENAI_API_KEY", "sk-ignored"),
                (LANGUAGE_ENV, "zh"),
                (ENABLED_ENV, "1"),
            ]),
        )
        .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("sk-custom"));
        assert_eq!(config.language, "zh");
        assert!(config.is_enabled());
    }

    #[test]
    fn test_invalid_values_rejected() {
        let mut user = UserConfig::default();
        user.commentary.score_threshold = Some(-1.0);
        assert!(CommentaryConfig::resolve(user, env_from(&[])).is_err());

        let mut user = UserConfig::default();
        user.commentary.max_concurrency = Some(0);
        assert!(CommentaryConfig::resolve(user, env_from(&[])).is_err());

        let mut user = UserConfig::default();
        user.provider.temperature = Some(3.5);
        assert!(CommentaryConfig::resolve(user, env_from(&[])).is_err());
    }

    #[test]
    fn test_debug_redacts_key() {
        let config = CommentaryConfig {
            api_key: Some("sk-very-secret".to_string()),
            ..CommentaryConfig::default()
        };
        let printed = format!("{config:?}");
        assert!(!printed.contains("sk-very-secret"));
        assert!(printed.contains("[redacted]"));
    }

    #[test]
    fn test_load_from_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("commentary.toml");
        std::fs::write(&path, "[commentary]\nscore_threshold = 3.0\n").unwrap();
        let config = CommentaryConfig::load(Some(&path)).unwrap();
        assert_eq!(config.score_threshold, 3.0);
    }
}
