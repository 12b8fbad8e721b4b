//! Process configuration loaded from environment variables.
//!
//! | Variable                    | Default                             |
//! |-----------------------------|-------------------------------------|
//! | `APP_HOST`                  | `0.0.0.0`                           |
//! | `APP_PORT`                  | `3001`                              |
//! | `TEMPLATE_API_URL`          | `https://api.imgflip.com/get_memes` |
//! | `PHASE_TICK_MS`             | `250`                               |
//! | `TEMPLATE_FETCH_TIMEOUT_MS` | `5000`                              |
//! | `LOG_FORMAT`                | `json` (`json` or `pretty`)         |

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;

pub const DEFAULT_TEMPLATE_API_URL: &str = "https://api.imgflip.com/get_memes";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Json,
    Pretty,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" => Ok(LogFormat::Pretty),
            other => Err(AppError::config(format!(
                "LOG_FORMAT must be json or pretty, got {other:?}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub template_api_url: String,
    pub phase_tick: Duration,
    pub template_fetch_timeout: Duration,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3001,
            template_api_url: DEFAULT_TEMPLATE_API_URL.to_string(),
            phase_tick: Duration::from_millis(250),
            template_fetch_timeout: Duration::from_millis(5000),
            log_format: LogFormat::Json,
        }
    }
}

fn parse_var<T: FromStr>(name: &str, raw: Option<String>, default: T) -> Result<T, AppError> {
    match raw {
        None => Ok(default),
        Some(value) => value
            .trim()
            .parse::<T>()
            .map_err(|_| AppError::config(format!("{name} has invalid value {value:?}"))),
    }
}

fn positive_millis(name: &str, raw: Option<String>, default: Duration) -> Result<Duration, AppError> {
    let ms = parse_var::<u64>(name, raw, default.as_millis() as u64)?;
    if ms == 0 {
        return Err(AppError::config(format!("{name} must be greater than zero")));
    }
    Ok(Duration::from_millis(ms))
}

impl AppConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build from an arbitrary variable lookup. Unset and empty values fall
    /// back to defaults; malformed values are a config error.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let log_format = match get("LOG_FORMAT") {
            Some(raw) => raw.parse()?,
            None => defaults.log_format,
        };

        Ok(Self {
            host: get("APP_HOST").unwrap_or(defaults.host),
            port: parse_var("APP_PORT", get("APP_PORT"), defaults.port)?,
            template_api_url: get("TEMPLATE_API_URL").unwrap_or(defaults.template_api_url),
            phase_tick: positive_millis("PHASE_TICK_MS", get("PHASE_TICK_MS"), defaults.phase_tick)?,
            template_fetch_timeout: positive_millis(
                "TEMPLATE_FETCH_TIMEOUT_MS",
                get("TEMPLATE_FETCH_TIMEOUT_MS"),
                defaults.template_fetch_timeout,
            )?,
            log_format,
        })
    }
}
