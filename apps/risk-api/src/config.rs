//! Application configuration loaded from environment variables.
//!
//! Required values fail fast at startup; everything else falls back to a
//! development-friendly default. Scoring knobs are read from `RISK_*`
//! variables on top of the built-in policy defaults.

use intelliid_api_risk::RiskPolicy;
use std::env;
use thiserror::Error;

/// Application environment mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Production,
}

impl AppEnvironment {
    /// Parse from an `APP_ENV` string value.
    #[must_use]
    pub fn from_env_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "development" | "dev" => Self::Development,
            other => {
                tracing::warn!(
                    value = other,
                    "Unrecognized APP_ENV value, defaulting to Development"
                );
                Self::Development
            }
        }
    }

    /// Returns true if this is production mode.
    #[must_use]
    pub fn is_production(&self) -> bool {
        *self == Self::Production
    }
}

impl std::fmt::Display for AppEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
        }
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    #[error("Failed to parse port: {0}")]
    InvalidPort(#[from] std::num::ParseIntError),
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Application environment (from `APP_ENV`).
    pub app_env: AppEnvironment,

    /// Postgres connection string (required).
    pub database_url: String,

    /// Log filter directive (from `RUST_LOG`, default "info").
    pub rust_log: String,

    /// Allowed CORS origins (from `CORS_ORIGINS`, comma-separated,
    /// default wildcard).
    pub cors_origins: Vec<String>,

    /// Bind host (default "0.0.0.0").
    pub host: String,

    /// Bind port (default 8080).
    pub port: u16,

    /// Maximum accepted request body size in bytes (default 64 KiB).
    pub max_body_size: usize,

    /// Scoring policy with `RISK_*` overrides applied.
    pub policy: RiskPolicy,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `DATABASE_URL` is unset, the port is
    /// invalid, or any `RISK_*` override fails to parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (development only)
        let _ = dotenvy::dotenv();

        let app_env = AppEnvironment::from_env_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let database_url = env::var("DATABASE_URL")
            .map_err(|_| ConfigError::MissingVar("DATABASE_URL".to_string()))?;

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let cors_origins = env::var("CORS_ORIGINS")
            .map(|s| s.split(',').map(|o| o.trim().to_string()).collect())
            .unwrap_or_else(|_| vec!["*".to_string()]);

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port: u16 = env::var("PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()?;
        if port == 0 {
            return Err(ConfigError::InvalidValue {
                var: "PORT".to_string(),
                message: "Port must be between 1 and 65535".to_string(),
            });
        }

        let max_body_size = parse_var("MAX_BODY_SIZE")?.unwrap_or(64 * 1024);

        let policy = policy_from_env()?;

        Ok(Self {
            app_env,
            database_url,
            rust_log,
            cors_origins,
            host,
            port,
            max_body_size,
            policy,
        })
    }

    /// Bind address string, `host:port`.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Check security-sensitive settings and collect warnings.
    ///
    /// Wildcard CORS is tolerated in development and flagged in production.
    #[must_use]
    pub fn validate_security_config(&self) -> Vec<String> {
        let mut warnings = Vec::new();

        if self.cors_origins.iter().any(|o| o == "*") && self.app_env.is_production() {
            warnings.push(
                "CORS_ORIGINS is a wildcard in production; set an explicit origin list"
                    .to_string(),
            );
        }

        if self.policy.fraud_threshold > self.policy.max_score() {
            warnings.push(format!(
                "RISK_FRAUD_THRESHOLD ({}) exceeds the maximum reachable score ({}); \
                 no attempt can classify as FRAUD",
                self.policy.fraud_threshold,
                self.policy.max_score()
            ));
        }

        warnings
    }
}

/// Build the scoring policy from defaults plus `RISK_*` overrides.
fn policy_from_env() -> Result<RiskPolicy, ConfigError> {
    let defaults = RiskPolicy::default();

    Ok(RiskPolicy {
        new_device_penalty: parse_var("RISK_NEW_DEVICE_PENALTY")?
            .unwrap_or(defaults.new_device_penalty),
        unusual_hour_penalty: parse_var("RISK_UNUSUAL_HOUR_PENALTY")?
            .unwrap_or(defaults.unusual_hour_penalty),
        failure_streak_penalty: parse_var("RISK_FAILURE_STREAK_PENALTY")?
            .unwrap_or(defaults.failure_streak_penalty),
        fraud_threshold: parse_var("RISK_FRAUD_THRESHOLD")?.unwrap_or(defaults.fraud_threshold),
        suspicious_threshold: parse_var("RISK_SUSPICIOUS_THRESHOLD")?
            .unwrap_or(defaults.suspicious_threshold),
        usual_hour_window: parse_var("RISK_USUAL_HOUR_WINDOW")?
            .unwrap_or(defaults.usual_hour_window),
        failure_streak_length: parse_var("RISK_FAILURE_STREAK_LENGTH")?
            .unwrap_or(defaults.failure_streak_length),
    })
}

/// Parse an optional environment variable into any `FromStr` type.
fn parse_var<T: std::str::FromStr>(var: &str) -> Result<Option<T>, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(raw) => raw
            .parse()
            .map(Some)
            .map_err(|e: T::Err| ConfigError::InvalidValue {
                var: var.to_string(),
                message: e.to_string(),
            }),
        Err(_) => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_environment_parsing() {
        assert_eq!(
            AppEnvironment::from_env_str("production"),
            AppEnvironment::Production
        );
        assert_eq!(
            AppEnvironment::from_env_str("prod"),
            AppEnvironment::Production
        );
        assert_eq!(
            AppEnvironment::from_env_str("dev"),
            AppEnvironment::Development
        );
        assert_eq!(
            AppEnvironment::from_env_str("staging"),
            AppEnvironment::Development
        );
    }

    #[test]
    fn test_wildcard_cors_warns_in_production_only() {
        let config = Config {
            app_env: AppEnvironment::Production,
            database_url: "postgres://localhost/intelliid".to_string(),
            rust_log: "info".to_string(),
            cors_origins: vec!["*".to_string()],
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_body_size: 64 * 1024,
            policy: RiskPolicy::default(),
        };
        assert_eq!(config.validate_security_config().len(), 1);

        let dev = Config {
            app_env: AppEnvironment::Development,
            ..config
        };
        assert!(dev.validate_security_config().is_empty());
    }

    #[test]
    fn test_unreachable_fraud_threshold_warns() {
        let config = Config {
            app_env: AppEnvironment::Development,
            database_url: "postgres://localhost/intelliid".to_string(),
            rust_log: "info".to_string(),
            cors_origins: vec!["http://localhost:3000".to_string()],
            host: "0.0.0.0".to_string(),
            port: 8080,
            max_body_size: 64 * 1024,
            policy: RiskPolicy {
                fraud_threshold: 500,
                ..RiskPolicy::default()
            },
        };
        let warnings = config.validate_security_config();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].contains("RISK_FRAUD_THRESHOLD"));
    }
}
