// Runtime configuration read from the environment
//
// Every setting has a default. Unset values are logged; values that are set
// but unparseable fail startup.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_TEMPLATES_PATH: &str = "data/templates.json";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_OPENAI_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_OPENAI_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value:?} ({reason})")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Settings for the OpenAI-compatible suggestion provider
#[derive(Debug, Clone, PartialEq)]
pub struct AiConfig {
    /// `None` leaves the external provider out of the chain
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub timeout: Duration,
}

impl AiConfig {
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            model: DEFAULT_OPENAI_MODEL.to_string(),
            temperature: DEFAULT_OPENAI_TEMPERATURE,
            timeout: Duration::from_secs(DEFAULT_OPENAI_TIMEOUT_SECS),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub port: u16,
    pub templates_path: PathBuf,
    pub ai: AiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            templates_path: PathBuf::from(DEFAULT_TEMPLATES_PATH),
            ai: AiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Reads the process environment
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Reads settings through `lookup`, which returns `None` for unset names
    ///
    /// Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = AppConfig::default();

        let port = match get("PORT") {
            Some(raw) => parse("PORT", &raw)?,
            None => {
                tracing::warn!("PORT not set, using default {}", DEFAULT_PORT);
                defaults.port
            }
        };

        let templates_path = match get("TEMPLATES_PATH") {
            Some(raw) => PathBuf::from(raw),
            None => {
                tracing::warn!(
                    "TEMPLATES_PATH not set, using default {}",
                    DEFAULT_TEMPLATES_PATH
                );
                defaults.templates_path
            }
        };

        let api_key = get("OPENAI_API_KEY");
        if api_key.is_none() {
            tracing::info!("OPENAI_API_KEY not set, AI suggestions use the heuristic provider only");
        }

        let temperature: f32 = match get("OPENAI_TEMPERATURE") {
            Some(raw) => parse("OPENAI_TEMPERATURE", &raw)?,
            None => defaults.ai.temperature,
        };
        if !(0.0..=2.0).contains(&temperature) {
            return Err(ConfigError::Invalid {
                name: "OPENAI_TEMPERATURE",
                value: temperature.to_string(),
                reason: "must be between 0 and 2".to_string(),
            });
        }

        let timeout = match get("OPENAI_TIMEOUT_SECS") {
            Some(raw) => Duration::from_secs(parse("OPENAI_TIMEOUT_SECS", &raw)?),
            None => defaults.ai.timeout,
        };

        Ok(Self {
            port,
            templates_path,
            ai: AiConfig {
                api_key,
                base_url: get("OPENAI_BASE_URL")
                    .map(|url| url.trim_end_matches('/').to_string())
                    .unwrap_or(defaults.ai.base_url),
                model: get("OPENAI_MODEL").unwrap_or(defaults.ai.model),
                temperature,
                timeout,
            },
        })
    }
}

fn parse<T>(name: &'static str, raw: &str) -> ConfigResult<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
        name,
        value: raw.to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> ConfigResult<AppConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config(&[]).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.port, 3001);
        assert!(!config.ai.is_configured());
    }

    #[test]
    fn reads_all_settings() {
        let config = config(&[
            ("PORT", "8080"),
            ("TEMPLATES_PATH", "/srv/catalog.json"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_BASE_URL", "http://localhost:9000/v1/"),
            ("OPENAI_MODEL", "local-model"),
            ("OPENAI_TEMPERATURE", "0.2"),
            ("OPENAI_TIMEOUT_SECS", "5"),
        ])
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.templates_path, PathBuf::from("/srv/catalog.json"));
        assert!(config.ai.is_configured());
        assert_eq!(config.ai.base_url, "http://localhost:9000/v1");
        assert_eq!(config.ai.model, "local-model");
        assert_eq!(config.ai.temperature, 0.2);
        assert_eq!(config.ai.timeout, Duration::from_secs(5));
    }

    #[test]
    fn empty_api_key_counts_as_unset() {
        let config = config(&[("OPENAI_API_KEY", "  ")]).unwrap();
        assert!(!config.ai.is_configured());
    }

    #[test]
    fn rejects_bad_port() {
        let err = config(&[("PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "PORT", .. }));
    }

    #[test]
    fn rejects_bad_timeout() {
        let err = config(&[("OPENAI_TIMEOUT_SECS", "-1")]).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                name: "OPENAI_TIMEOUT_SECS",
                ..
            }
        ));
    }

    #[test]
    fn rejects_out_of_range_temperature() {
        let err = config(&[("OPENAI_TEMPERATURE", "3.5")]).unwrap_err();
        assert!(err.to_string().contains("OPENAI_TEMPERATURE"));
    }
}
