use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use chrono::FixedOffset;

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

/// Top-level configuration for the registry service.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub validation: ValidationConfig,
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

        let offset_hours = env::var("APP_PERMIT_TZ_OFFSET_HOURS")
            .unwrap_or_else(|_| ValidationConfig::DEFAULT_OFFSET_HOURS.to_string())
            .trim()
            .parse::<i32>()
            .map_err(|_| ConfigError::InvalidTimezoneOffset)?;
        let validation = ValidationConfig::with_offset_hours(offset_hours)?;

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            validation,
        })
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

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Knobs for the permit validation pipeline.
///
/// Permit expiry dates are rendered in the legislation's time zone; the
/// corpus stores expiries in UTC, so rendering applies a fixed UTC offset
/// (Pacific standard by default).
#[derive(Debug, Clone, Copy)]
pub struct ValidationConfig {
    pub display_offset: FixedOffset,
}

impl ValidationConfig {
    pub const DEFAULT_OFFSET_HOURS: i32 = -8;

    pub fn with_offset_hours(hours: i32) -> Result<Self, ConfigError> {
        let seconds = hours
            .checked_mul(3600)
            .ok_or(ConfigError::InvalidTimezoneOffset)?;
        let display_offset =
            FixedOffset::east_opt(seconds).ok_or(ConfigError::InvalidTimezoneOffset)?;
        Ok(Self { display_offset })
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            display_offset: FixedOffset::east_opt(Self::DEFAULT_OFFSET_HOURS * 3600)
                .expect("default offset is in range"),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidTimezoneOffset,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidTimezoneOffset => {
                write!(
                    f,
                    "APP_PERMIT_TZ_OFFSET_HOURS must be a whole-hour UTC offset within +/-23"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidTimezoneOffset => None,
            ConfigError::InvalidHost { source } => Some(source),
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
        env::remove_var("APP_ENV");
        env::remove_var("APP_HOST");
        env::remove_var("APP_PORT");
        env::remove_var("APP_LOG_LEVEL");
        env::remove_var("APP_PERMIT_TZ_OFFSET_HOURS");
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
        assert_eq!(
            config.validation.display_offset,
            FixedOffset::east_opt(-8 * 3600).expect("valid offset")
        );
    }

    #[test]
    fn accepts_localhost_host() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_HOST", "localhost");
        let config = AppConfig::load().expect("config loads");
        let addr = config.server.socket_addr().expect("localhost resolves");
        assert_eq!(addr, SocketAddr::new(IpAddr::from([127, 0, 0, 1]), 3000));
    }

    #[test]
    fn rejects_out_of_range_offset() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PERMIT_TZ_OFFSET_HOURS", "30");
        let error = AppConfig::load().expect_err("offset out of range");
        assert!(matches!(error, ConfigError::InvalidTimezoneOffset));
    }

    #[test]
    fn rejects_overflowing_offset() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PERMIT_TZ_OFFSET_HOURS", "1000000");
        let error = AppConfig::load().expect_err("offset overflows");
        assert!(matches!(error, ConfigError::InvalidTimezoneOffset));
    }

    #[test]
    fn accepts_custom_offset() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("APP_PERMIT_TZ_OFFSET_HOURS", "-7");
        let config = AppConfig::load().expect("config loads");
        assert_eq!(
            config.validation.display_offset,
            FixedOffset::east_opt(-7 * 3600).expect("valid offset")
        );
    }
}
