use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// Environment variable naming the config file to load.
pub const CONFIG_ENV: &str = "REQUESTER_CONFIG";
/// Config file looked up in the working directory when [`CONFIG_ENV`] is unset.
pub const DEFAULT_CONFIG_FILE: &str = "requester.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Per-attempt transport timeout. Zero disables it.
    #[serde(deserialize_with = "deserialize_duration")]
    pub request_timeout: Duration,
    pub max_redirects: usize,

    #[serde(deserialize_with = "deserialize_duration")]
    pub notification_duration: Duration,

    /// Initial value of the builder's reveal delay, in seconds.
    pub default_delay_seconds: u32,

    /// How this client is named in cross-origin diagnostics.
    pub client_origin: Option<String>,

    /// Fallback filter when `RUST_LOG` is not set.
    pub log_level: String,

    pub window_width: f32,
    pub window_height: f32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(30),
            max_redirects: 10,

            notification_duration: Duration::from_secs(3),

            default_delay_seconds: 0,

            client_origin: None,

            log_level: "info".to_string(),

            window_width: 1220.0,
            window_height: 840.0,
        }
    }
}

impl AppConfig {
    /// Load from `REQUESTER_CONFIG`, or `requester.toml` when it exists.
    /// With neither, the defaults apply.
    pub fn load() -> Self {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path.trim()),
            _ if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::from_file(DEFAULT_CONFIG_FILE),
            _ => Self::default(),
        }
    }

    pub fn from_file(path: &str) -> Self {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!(path, %err, "failed to read config, falling back to defaults");
                return AppConfig::default();
            }
        };

        match Self::parse(&content) {
            Ok(config) => {
                tracing::info!(path, "config loaded");
                config
            }
            Err(err) => {
                tracing::warn!(path, %err, "failed to parse config, falling back to defaults");
                AppConfig::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        toml::from_str::<AppConfig>(content).map_err(|err| format!("Invalid config: {err}"))
    }
}

fn deserialize_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let secs = f64::deserialize(deserializer)?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(serde::de::Error::custom(format!(
            "duration must be a non-negative number of seconds, got {secs}"
        )));
    }
    Ok(Duration::from_secs_f64(secs))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(AppConfig::parse("").unwrap(), AppConfig::default());
    }

    #[test]
    fn partial_file_overrides_only_given_keys() {
        let config = AppConfig::parse(
            r#"
            request_timeout = 2.5
            default_delay_seconds = 4
            client_origin = "http://localhost:3000"
            "#,
        )
        .unwrap();

        assert_eq!(config.request_timeout, Duration::from_millis(2500));
        assert_eq!(config.default_delay_seconds, 4);
        assert_eq!(config.client_origin.as_deref(), Some("http://localhost:3000"));
        assert_eq!(config.max_redirects, 10);
        assert_eq!(config.notification_duration, Duration::from_secs(3));
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn integer_seconds_are_accepted() {
        let config = AppConfig::parse("notification_duration = 5").unwrap();
        assert_eq!(config.notification_duration, Duration::from_secs(5));
    }

    #[test]
    fn negative_duration_is_rejected() {
        let err = AppConfig::parse("request_timeout = -1").unwrap_err();
        assert!(err.starts_with("Invalid config"));
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = AppConfig::from_file("/nonexistent/requester.toml");
        assert_eq!(config, AppConfig::default());
    }
}
