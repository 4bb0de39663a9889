//! Application configuration.
//!
//! Loaded from a TOML file where every section is optional, then patched by
//! a handful of environment variables. Missing files fall back to defaults so
//! a fresh checkout starts with `hotel-service` and nothing else.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::infrastructure::database::DatabaseConfig;
use crate::interfaces::http::ApiSettings;

const APP_DIR: &str = "hotel-service";
const CONFIG_FILE: &str = "config.toml";
const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Seconds to wait for in-flight requests on shutdown
    pub shutdown_timeout: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            shutdown_timeout: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseSection {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: u64,
}

impl Default for DatabaseSection {
    fn default() -> Self {
        let url = dirs_next::data_dir()
            .map(|dir| dir.join(APP_DIR).join("hotel.db"))
            .map(|path| format!("sqlite://{}?mode=rwc", path.display()))
            .unwrap_or_else(|| "sqlite://hotel.db?mode=rwc".to_string());
        Self {
            url,
            max_connections: 10,
            min_connections: 1,
            connect_timeout: 10,
        }
    }
}

impl DatabaseSection {
    /// Create the parent directory of a file-backed SQLite database.
    pub fn ensure_sqlite_dir(&self) -> std::io::Result<()> {
        let Some(rest) = self.url.strip_prefix("sqlite://") else {
            return Ok(());
        };
        let file = rest.split('?').next().unwrap_or_default();
        if file.is_empty() || file.starts_with(':') {
            return Ok(());
        }
        match Path::new(file).parent() {
            Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent),
            _ => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    pub jwt_secret: String,
    pub jwt_expiration_hours: i64,
    pub jwt_issuer: String,
    pub otp_ttl_minutes: i64,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_expiration_hours: 24,
            jwt_issuer: "hotel-service".to_string(),
            otp_ttl_minutes: 15,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directive, e.g. "info" or "hotel_service=debug,info"
    pub level: String,
    /// "pretty" or "json"
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AdminConfig {
    pub username: String,
    pub email: String,
    pub password: String,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            username: "admin".to_string(),
            email: "admin@hotel.local".to_string(),
            password: "admin12345".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSection {
    /// Include internal error text in error responses
    pub debug: bool,
    /// ISO 4217 code reported next to every amount
    pub currency: String,
    pub seed_demo_data: bool,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            debug: false,
            currency: "USD".to_string(),
            seed_demo_data: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseSection,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
    pub admin: AdminConfig,
    pub app: AppSection,
    pub cors: CorsConfig,
}

impl AppConfig {
    /// Load configuration from `path`. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(raw) => Self::from_toml_str(&raw),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Io {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(raw)?)
    }

    /// Apply `DATABASE_URL`, `JWT_SECRET` and `APP_DEBUG` from the process environment.
    pub fn with_env_overrides(mut self) -> Self {
        self.apply_env_overrides(|key| std::env::var(key).ok());
        self
    }

    pub fn apply_env_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup("DATABASE_URL").filter(|v| !v.trim().is_empty()) {
            self.database.url = url;
        }
        if let Some(secret) = lookup("JWT_SECRET").filter(|v| !v.trim().is_empty()) {
            self.security.jwt_secret = secret;
        }
        if let Some(debug) = lookup("APP_DEBUG") {
            self.app.debug = matches!(
                debug.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::Invalid("server.port must not be 0".into()));
        }
        if self.database.url.trim().is_empty() {
            return Err(ConfigError::Invalid("database.url must be set".into()));
        }
        if self.database.min_connections > self.database.max_connections {
            return Err(ConfigError::Invalid(
                "database.min_connections exceeds max_connections".into(),
            ));
        }
        if self.security.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Invalid("security.jwt_secret must be set".into()));
        }
        if self.security.jwt_expiration_hours <= 0 {
            return Err(ConfigError::Invalid(
                "security.jwt_expiration_hours must be positive".into(),
            ));
        }
        if self.security.otp_ttl_minutes <= 0 {
            return Err(ConfigError::Invalid(
                "security.otp_ttl_minutes must be positive".into(),
            ));
        }
        if !matches!(self.logging.format.to_lowercase().as_str(), "pretty" | "json") {
            return Err(ConfigError::Invalid(format!(
                "logging.format must be 'pretty' or 'json', got '{}'",
                self.logging.format
            )));
        }
        let currency = &self.app.currency;
        if currency.len() != 3 || !currency.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(ConfigError::Invalid(format!(
                "app.currency must be a 3-letter ISO code, got '{}'",
                currency
            )));
        }
        Ok(())
    }

    /// True while the shipped JWT secret is still in use.
    pub fn uses_default_secret(&self) -> bool {
        self.security.jwt_secret == DEFAULT_JWT_SECRET
    }

    pub fn database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.database.url.clone(),
            max_connections: self.database.max_connections,
            min_connections: self.database.min_connections,
            connect_timeout_secs: self.database.connect_timeout,
        }
    }

    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.security.jwt_secret.clone(),
            expiration_hours: self.security.jwt_expiration_hours,
            issuer: self.security.jwt_issuer.clone(),
        }
    }

    pub fn api_settings(&self) -> ApiSettings {
        ApiSettings {
            jwt: self.jwt_config(),
            otp_ttl_minutes: self.security.otp_ttl_minutes,
            currency: self.app.currency.clone(),
            debug: self.app.debug,
        }
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

/// `$HOTEL_CONFIG`, or `<config dir>/hotel-service/config.toml`.
pub fn default_config_path() -> PathBuf {
    if let Some(path) = std::env::var_os("HOTEL_CONFIG").filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    dirs_next::config_dir()
        .map(|dir| dir.join(APP_DIR).join(CONFIG_FILE))
        .unwrap_or_else(|| PathBuf::from(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = AppConfig::from_toml_str(
            r#"
            [server]
            port = 9090

            [app]
            currency = "EUR"
            "#,
        )
        .unwrap();

        assert_eq!(cfg.server.port, 9090);
        assert_eq!(cfg.server.host, "0.0.0.0");
        assert_eq!(cfg.app.currency, "EUR");
        assert_eq!(cfg.security.otp_ttl_minutes, 15);
        assert_eq!(cfg.cors.allowed_origins, vec!["*".to_string()]);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn missing_file_yields_defaults() {
        let cfg = AppConfig::load(Path::new("/definitely/not/here/config.toml")).unwrap();
        assert_eq!(cfg.server.port, 8080);
        assert!(cfg.uses_default_secret());
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let err = AppConfig::from_toml_str("[server\nport = 1").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn env_overrides_apply() {
        let env: HashMap<&str, &str> = [
            ("DATABASE_URL", "sqlite::memory:"),
            ("JWT_SECRET", "s3cret"),
            ("APP_DEBUG", "true"),
        ]
        .into_iter()
        .collect();

        let mut cfg = AppConfig::default();
        cfg.apply_env_overrides(|k| env.get(k).map(|v| v.to_string()));

        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.security.jwt_secret, "s3cret");
        assert!(cfg.app.debug);
        assert!(!cfg.uses_default_secret());

        cfg.apply_env_overrides(|k| (k == "APP_DEBUG").then(|| "0".to_string()));
        assert!(!cfg.app.debug);
        assert_eq!(cfg.security.jwt_secret, "s3cret");
    }

    #[test]
    fn validation_catches_bad_values() {
        let mut cfg = AppConfig::default();
        cfg.logging.format = "xml".into();
        assert!(cfg.validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.security.jwt_secret = "  ".into();
        assert!(cfg.validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.app.currency = "usd".into();
        assert!(cfg.validate().is_err());

        let mut cfg = AppConfig::default();
        cfg.server.port = 0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn sub_configs_follow_sections() {
        let mut cfg = AppConfig::default();
        cfg.database.url = "sqlite::memory:".into();
        cfg.security.jwt_expiration_hours = 8;
        cfg.app.debug = true;

        assert_eq!(cfg.database_config().url, "sqlite::memory:");
        assert_eq!(cfg.jwt_config().expiration_hours, 8);
        assert_eq!(cfg.jwt_config().issuer, "hotel-service");
        let api = cfg.api_settings();
        assert!(api.debug);
        assert_eq!(api.currency, "USD");
    }
}
