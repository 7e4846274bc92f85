use std::env;
use std::str::FromStr;

use crate::error::{AppError, AppResult};

const DEFAULT_CHECKIN_ENDPOINT: &str = "http://127.0.0.1:3000/checkin";

#[derive(Debug, Clone)]
pub struct Config {
    /// Where accepted check-ins are posted
    pub checkin_endpoint: String,
    pub server_host: String,
    pub server_port: u16,
    /// Seconds for one rate-limit token to replenish, per client IP
    pub rate_limit_period_secs: u64,
    pub rate_limit_burst: u32,
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> AppResult<Self> {
        Ok(Self {
            checkin_endpoint: lookup("CHECKIN_ENDPOINT")
                .unwrap_or_else(|| DEFAULT_CHECKIN_ENDPOINT.to_string()),
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            server_port: parse_number(&lookup, "SERVER_PORT", 3000)?,
            rate_limit_period_secs: parse_number(&lookup, "RATE_LIMIT_PERIOD_SECS", 1)?,
            rate_limit_burst: parse_number(&lookup, "RATE_LIMIT_BURST", 30)?,
        })
    }

    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}

fn parse_number<T: FromStr>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> AppResult<T> {
    match lookup(key) {
        Some(value) => value
            .parse()
            .map_err(|_| AppError::Config(format!("{} must be a number, got {:?}", key, value))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppResult<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.checkin_endpoint, DEFAULT_CHECKIN_ENDPOINT);
        assert_eq!(config.server_addr(), "0.0.0.0:3000");
        assert_eq!(config.rate_limit_period_secs, 1);
        assert_eq!(config.rate_limit_burst, 30);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("CHECKIN_ENDPOINT", "https://attendance.example.com/checkin"),
            ("SERVER_HOST", "127.0.0.1"),
            ("SERVER_PORT", "8080"),
            ("RATE_LIMIT_PERIOD_SECS", "60"),
            ("RATE_LIMIT_BURST", "5"),
        ])
        .unwrap();
        assert_eq!(config.rate_limit_period_secs, 60);
        assert_eq!(config.rate_limit_burst, 5);
        assert_eq!(config.checkin_endpoint, "https://attendance.example.com/checkin");
        assert_eq!(config.server_addr(), "127.0.0.1:8080");
    }

    #[test]
    fn test_invalid_port() {
        let err = config_from(&[("SERVER_PORT", "eighty")]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));

        let err = config_from(&[("RATE_LIMIT_BURST", "-1")]).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
