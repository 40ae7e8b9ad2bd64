use crate::workflows::recruiting::DEFAULT_CAPACITY;
use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

const DEFAULT_FORECAST_HORIZON_DAYS: u32 = 14;

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub data: DataConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let snapshot_dir =
            PathBuf::from(env::var("APP_DATA_DIR").unwrap_or_else(|_| "./data".to_string()));

        let default_capacity = match env::var("APP_DEFAULT_CAPACITY") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidCapacity(raw))?,
            Err(_) => DEFAULT_CAPACITY,
        };

        let forecast_horizon_days = match env::var("APP_FORECAST_HORIZON_DAYS") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .map_err(|_| ConfigError::InvalidHorizon(raw))?,
            Err(_) => DEFAULT_FORECAST_HORIZON_DAYS,
        };

        let scope_activity_to_period = match env::var("APP_SCOPE_ACTIVITY_TO_PERIOD") {
            Ok(raw) => parse_flag(&raw).ok_or(ConfigError::InvalidFlag {
                name: "APP_SCOPE_ACTIVITY_TO_PERIOD",
                value: raw,
            })?,
            Err(_) => false,
        };

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            data: DataConfig { snapshot_dir },
            scoring: ScoringConfig {
                default_capacity,
                forecast_horizon_days,
                scope_activity_to_period,
            },
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the CSV snapshot exports live.
#[derive(Debug, Clone)]
pub struct DataConfig {
    pub snapshot_dir: PathBuf,
}

/// Scoring and capacity defaults applied by the dashboard service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoringConfig {
    pub default_capacity: u32,
    pub forecast_horizon_days: u32,
    /// Restrict meeting, referral and training bonuses to the reporting period.
    pub scope_activity_to_period: bool,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            default_capacity: DEFAULT_CAPACITY,
            forecast_horizon_days: DEFAULT_FORECAST_HORIZON_DAYS,
            scope_activity_to_period: false,
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidCapacity(String),
    InvalidHorizon(String),
    InvalidFlag { name: &'static str, value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidCapacity(value) => write!(
                f,
                "APP_DEFAULT_CAPACITY must be a non-negative integer (got '{}')",
                value
            ),
            ConfigError::InvalidHorizon(value) => write!(
                f,
                "APP_FORECAST_HORIZON_DAYS must be a non-negative number of days (got '{}')",
                value
            ),
            ConfigError::InvalidFlag { name, value } => {
                write!(f, "{} must be true or false (got '{}')", name, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::InvalidPort
            | ConfigError::InvalidCapacity(_)
            | ConfigError::InvalidHorizon(_)
            | ConfigError::InvalidFlag { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        for key in [
            "APP_ENV",
            "APP_HOST",
            "APP_PORT",
            "APP_LOG_LEVEL",
            "APP_DATA_DIR",
            "APP_DEFAULT_CAPACITY",
            "APP_FORECAST_HORIZON_DAYS",
            "APP_SCOPE_ACTIVITY_TO_PERIOD",
        ] {
            env::remove_var(key);
        }
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.telemetry.log_level, "info");
        assert_eq!(config.data.snapshot_dir, PathBuf::from("./data"));
        assert_eq!(config.scoring, ScoringConfig::default());
        assert_eq!(config.scoring.default_capacity, 5);
        assert_eq!(config.scoring.forecast_horizon_days, 14);
        assert!(!config.scoring.scope_activity_to_period);
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
        reset_env();
    }

    #[test]
    fn reads_scoring_overrides() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_DEFAULT_CAPACITY", "8");
        env::set_var("APP_FORECAST_HORIZON_DAYS", "30");
        env::set_var("APP_SCOPE_ACTIVITY_TO_PERIOD", "yes");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(config.scoring.default_capacity, 8);
        assert_eq!(config.scoring.forecast_horizon_days, 30);
        assert!(config.scoring.scope_activity_to_period);
        reset_env();
    }

    #[test]
    fn rejects_invalid_scoring_values() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_DEFAULT_CAPACITY", "-1");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidCapacity(_))
        ));

        reset_env();
        env::set_var("APP_SCOPE_ACTIVITY_TO_PERIOD", "sometimes");
        assert!(matches!(
            AppConfig::load(),
            Err(ConfigError::InvalidFlag { .. })
        ));
        reset_env();
    }
}
