//! Server configuration from environment.

use std::env;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_path: String,
    pub database_max_connections: u32,
    /// Base URL of the drone-dispatch service.
    pub dispatch_url: String,
    pub dispatch_timeout: Duration,
    /// Insert the reference mission at startup when the store is empty.
    pub seed_sample: bool,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("SKYSWEEP_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5000),
            database_path: env::var("SKYSWEEP_DATABASE_PATH")
                .unwrap_or_else(|_| "data/skysweep.db".to_string()),
            database_max_connections: env::var("SKYSWEEP_DATABASE_MAX_CONNECTIONS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(5),
            dispatch_url: env::var("SKYSWEEP_DISPATCH_URL")
                .unwrap_or_else(|_| "http://localhost:3001".to_string()),
            dispatch_timeout: Duration::from_secs(
                env::var("SKYSWEEP_DISPATCH_TIMEOUT_SECS")
                    .ok()
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(10),
            ),
            seed_sample: env::var("SKYSWEEP_SEED_SAMPLE")
                .map(|s| parse_flag(&s))
                .unwrap_or(false),
            log_format: match env::var("SKYSWEEP_LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Text,
            },
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::parse_flag;

    #[test]
    fn flags() {
        assert!(parse_flag("true"));
        assert!(parse_flag(" YES "));
        assert!(parse_flag("1"));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(""));
    }
}
