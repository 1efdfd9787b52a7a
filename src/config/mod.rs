use std::net::SocketAddr;
use std::str::FromStr;

use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub log_level: String,
    /// Prometheus exporter address; exporter disabled when unset.
    pub metrics_addr: Option<SocketAddr>,
    pub initial_alpha: f64,
    pub initial_beta: f64,
    pub initial_p1: f64,
    pub initial_p2: f64,
    pub initial_m: f64,
    pub grid_lower: f64,
    pub grid_upper: f64,
    pub grid_points: usize,
    pub require_unit_sum: bool,
    pub channel_buffer: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        // dotenvy loads .env, but doesn't override already-set env vars
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup; `from_env` passes the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let metrics_addr = match lookup("METRICS_ADDR") {
            Some(raw) if !raw.trim().is_empty() => Some(
                raw.trim()
                    .parse::<SocketAddr>()
                    .with_context(|| format!("METRICS_ADDR must be a socket address, got {raw:?}"))?,
            ),
            _ => None,
        };

        Ok(Self {
            log_level: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            metrics_addr,
            initial_alpha: parse_or(&lookup, "INITIAL_ALPHA", 0.5)?,
            initial_beta: parse_or(&lookup, "INITIAL_BETA", 0.5)?,
            initial_p1: parse_or(&lookup, "INITIAL_P1", 1.0)?,
            initial_p2: parse_or(&lookup, "INITIAL_P2", 1.0)?,
            initial_m: parse_or(&lookup, "INITIAL_M", 10.0)?,
            grid_lower: parse_or(&lookup, "GRID_LOWER", 0.1)?,
            grid_upper: parse_or(&lookup, "GRID_UPPER", 10.0)?,
            grid_points: parse_or(&lookup, "GRID_POINTS", 100)?,
            require_unit_sum: parse_or(&lookup, "REQUIRE_UNIT_SUM", false)?,
            channel_buffer: parse_or(&lookup, "CHANNEL_BUFFER", 64)?,
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has invalid value {raw:?}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.log_level, "info");
        assert!(config.metrics_addr.is_none());
        assert_eq!(config.initial_m, 10.0);
        assert_eq!(config.grid_points, 100);
        assert!(!config.require_unit_sum);
        assert_eq!(config.channel_buffer, 64);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("INITIAL_ALPHA", "0.3"),
            ("GRID_POINTS", " 50 "),
            ("REQUIRE_UNIT_SUM", "true"),
            ("METRICS_ADDR", "127.0.0.1:9000"),
        ])
        .unwrap();
        assert_eq!(config.initial_alpha, 0.3);
        assert_eq!(config.grid_points, 50);
        assert!(config.require_unit_sum);
        assert_eq!(config.metrics_addr.unwrap().port(), 9000);
    }

    #[test]
    fn test_invalid_value_names_the_variable() {
        let err = config_from(&[("INITIAL_P2", "cheap")]).unwrap_err();
        assert!(err.to_string().contains("INITIAL_P2"));
    }

    #[test]
    fn test_blank_metrics_addr_disables_exporter() {
        assert!(config_from(&[("METRICS_ADDR", "  ")]).unwrap().metrics_addr.is_none());
    }
}
