use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::locale::Locale;
use crate::scheduling::{RulesError, SchedulingRules};

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
    pub booking: BookingConfig,
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

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            booking: BookingConfig::from_env()?,
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

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Scheduling rules, display language, and where the signed-in session is persisted.
#[derive(Debug, Clone, Default)]
pub struct BookingConfig {
    pub rules: SchedulingRules,
    pub locale: Locale,
    pub session_file: Option<PathBuf>,
}

impl BookingConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = SchedulingRules::default();
        let rules = SchedulingRules {
            min_advance_hours: env_u32("BOOKING_MIN_ADVANCE_HOURS", defaults.min_advance_hours)?,
            max_advance_months: env_u32(
                "BOOKING_MAX_ADVANCE_MONTHS",
                defaults.max_advance_months,
            )?,
            work_hour_start: env_u32("BOOKING_WORK_HOUR_START", defaults.work_hour_start)?,
            work_hour_end: env_u32("BOOKING_WORK_HOUR_END", defaults.work_hour_end)?,
            work_day_min: env_u32("BOOKING_WORK_DAY_MIN", defaults.work_day_min)?,
            work_day_max: env_u32("BOOKING_WORK_DAY_MAX", defaults.work_day_max)?,
        };
        rules.check().map_err(ConfigError::Rules)?;

        let locale = match env::var("BOOKING_LOCALE") {
            Ok(tag) => Locale::from_tag(&tag).ok_or(ConfigError::InvalidLocale { value: tag })?,
            Err(_) => Locale::default(),
        };

        let session_file = env::var("BOOKING_SESSION_FILE")
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .map(PathBuf::from);

        Ok(Self {
            rules,
            locale,
            session_file,
        })
    }
}

fn env_u32(var: &'static str, default: u32) -> Result<u32, ConfigError> {
    match env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidNumber { var }),
        Err(_) => Ok(default),
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    InvalidNumber { var: &'static str },
    InvalidLocale { value: String },
    Rules(RulesError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { var } => {
                write!(f, "{var} must be a non-negative integer")
            }
            ConfigError::InvalidLocale { value } => {
                write!(f, "BOOKING_LOCALE '{value}' is not one of: en, es")
            }
            ConfigError::Rules(err) => write!(f, "inconsistent scheduling rules: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::Rules(err) => Some(err),
            ConfigError::InvalidPort
            | ConfigError::InvalidNumber { .. }
            | ConfigError::InvalidLocale { .. } => None,
        }
    }
}
