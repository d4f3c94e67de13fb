use std::env;
use std::str::FromStr;

use tracing::info;

/// Runtime configuration loaded from environment variables.
/// Every field has a default — nothing here is a secret.
#[derive(Debug, Clone)]
pub struct Config {
    /// Root data directory for run logs and summaries.
    pub data_dir: String,

    /// Bounded worker pool size for concurrent sessions.
    pub workers: usize,

    /// Default per-session step budget.
    pub max_steps: u32,

    /// Default per-session simulated-time budget in seconds.
    pub max_seconds: f64,
}

impl Config {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        Self {
            data_dir: env::var("DATA_DIR").unwrap_or_else(|_| "data".to_string()),
            workers: parsed_env("WAYFARER_WORKERS", 8),
            max_steps: parsed_env("WAYFARER_MAX_STEPS", 40),
            max_seconds: parsed_env("WAYFARER_MAX_SECONDS", 180.0),
        }
    }

    pub fn log(&self) {
        info!(
            data_dir = self.data_dir.as_str(),
            workers = self.workers,
            max_steps = self.max_steps,
            max_seconds = self.max_seconds,
            "Config loaded"
        );
    }
}

fn parsed_env<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_env_is_unset() {
        let config = Config::from_env();
        assert!(config.workers >= 1);
        assert!(config.max_steps >= 1);
        assert!(config.max_seconds > 0.0);
    }
}
