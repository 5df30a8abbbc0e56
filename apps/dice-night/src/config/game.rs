use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::AppError;
use crate::services::table_runner::DEFAULT_ROLL_DELAY;

const ROLL_DELAY_VAR: &str = "DICE_ROLL_DELAY_MS";
const SEED_VAR: &str = "DICE_SEED";
const LOG_FORMAT_VAR: &str = "DICE_LOG_FORMAT";

/// Output format for the tracing subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable, compact lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

impl FromStr for LogFormat {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(LogFormat::Pretty),
            "json" => Ok(LogFormat::Json),
            other => Err(AppError::config(format!(
                "log format must be 'pretty' or 'json', got '{other}'"
            ))),
        }
    }
}

/// Runtime settings for a table process
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub roll_delay: Duration,
    /// Fixed seed for the dice; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub log_format: LogFormat,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            roll_delay: DEFAULT_ROLL_DELAY,
            seed: None,
            log_format: LogFormat::default(),
        }
    }
}

impl GameConfig {
    /// Build from `DICE_ROLL_DELAY_MS`, `DICE_SEED` and `DICE_LOG_FORMAT`.
    /// Unset variables fall back to defaults; malformed ones are errors.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Same as [`GameConfig::from_env`] over an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, AppError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ROLL_DELAY_VAR) {
            let ms: u64 = parse_var(ROLL_DELAY_VAR, &raw)?;
            config.roll_delay = Duration::from_millis(ms);
        }
        if let Some(raw) = lookup(SEED_VAR) {
            config.seed = Some(parse_var(SEED_VAR, &raw)?);
        }
        if let Some(raw) = lookup(LOG_FORMAT_VAR) {
            config.log_format = raw.parse()?;
        }

        Ok(config)
    }
}

fn parse_var<T: FromStr>(name: &str, raw: &str) -> Result<T, AppError> {
    raw.trim().parse().map_err(|_| {
        AppError::config(format!(
            "Environment variable '{name}' has an invalid value: '{raw}'"
        ))
    })
}
