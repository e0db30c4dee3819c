use std::env;
use std::fmt;
use std::net::{IpAddr, SocketAddr};

use crate::identity::password::{MAX_BCRYPT_COST, MIN_BCRYPT_COST};

const DEVELOPMENT_JWT_SECRET: &str = "jobboard-development-secret";
const DEFAULT_SESSION_TTL_DAYS: i64 = 30;
const DEFAULT_BCRYPT_COST: u32 = 10;

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
    pub auth: AuthConfig,
    pub storage: StorageConfig,
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

        let jwt_secret = match env::var("APP_JWT_SECRET") {
            Ok(secret) if !secret.trim().is_empty() => secret,
            _ if environment == AppEnvironment::Production => {
                return Err(ConfigError::MissingSecret)
            }
            _ => DEVELOPMENT_JWT_SECRET.to_string(),
        };

        let session_ttl_days = match env::var("APP_SESSION_TTL_DAYS") {
            Ok(raw) => raw
                .trim()
                .parse::<i64>()
                .ok()
                .filter(|days| *days > 0)
                .ok_or(ConfigError::InvalidSessionTtl)?,
            Err(_) => DEFAULT_SESSION_TTL_DAYS,
        };

        let bcrypt_cost = match env::var("APP_BCRYPT_COST") {
            Ok(raw) => raw
                .trim()
                .parse::<u32>()
                .ok()
                .filter(|cost| (MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(cost))
                .ok_or(ConfigError::InvalidBcryptCost)?,
            Err(_) => DEFAULT_BCRYPT_COST,
        };

        let base_url = env::var("APP_STORAGE_BASE_URL")
            .ok()
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        Ok(Self {
            environment,
            auth: AuthConfig {
                jwt_secret,
                session_ttl_days,
                bcrypt_cost,
                secure_cookies: environment == AppEnvironment::Production,
            },
            storage: StorageConfig { base_url },
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
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

/// Session signing and password hashing settings.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub session_ttl_days: i64,
    pub bcrypt_cost: u32,
    pub secure_cookies: bool,
}

impl AuthConfig {
    /// Settings suitable for tests: minimum bcrypt cost and insecure cookies.
    pub fn for_tests() -> Self {
        Self {
            jwt_secret: "test-secret".to_string(),
            session_ttl_days: 1,
            bcrypt_cost: MIN_BCRYPT_COST,
            secure_cookies: false,
        }
    }
}

/// Where uploaded objects are published.
#[derive(Debug, Clone, Default)]
pub struct StorageConfig {
    /// Explicit public base. Without one, objects are served under `/uploads` on the server.
    pub base_url: Option<String>,
}

impl StorageConfig {
    pub fn public_base_url(&self, server: &ServerConfig) -> String {
        match &self.base_url {
            Some(url) => url.clone(),
            None => format!("http://{}:{}/uploads", server.host, server.port),
        }
    }
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost { source: std::net::AddrParseError },
    MissingSecret,
    InvalidSessionTtl,
    InvalidBcryptCost,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::MissingSecret => {
                write!(f, "APP_JWT_SECRET must be set when APP_ENV=production")
            }
            ConfigError::InvalidSessionTtl => {
                write!(f, "APP_SESSION_TTL_DAYS must be a positive number of days")
            }
            ConfigError::InvalidBcryptCost => {
                write!(
                    f,
                    "APP_BCRYPT_COST must be between {MIN_BCRYPT_COST} and {MAX_BCRYPT_COST}"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidHost { source } => Some(source),
            _ => None,
        }
    }
}
