//! configuration types for classhub.

use serde::{Deserialize, Serialize};

/// main configuration for classhub.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// http server options.
    pub server: ServerConfig,

    /// database configuration.
    pub database: DatabaseConfig,

    /// token signing configuration.
    pub jwt: JwtConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            database: DatabaseConfig::default(),
            jwt: JwtConfig::default(),
        }
    }
}

impl Config {
    /// parse a config from toml.
    pub fn from_toml_str(s: &str) -> crate::Result<Self> {
        Ok(toml::from_str(s)?)
    }
}

/// http server options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// address to bind the http server to.
    pub listen_addr: String,

    /// deployment environment label ("development", "production").
    ///
    /// internal error details are echoed to clients only outside production.
    pub environment: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:5000".to_string(),
            environment: "development".to_string(),
        }
    }
}

impl ServerConfig {
    /// whether this is a production deployment.
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}

/// database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// database type: "sqlite" or "postgres".
    pub db_type: String,

    /// database connection string or file path.
    pub connection_string: String,

    /// sqlite-specific options.
    pub sqlite: SqliteConfig,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            db_type: "sqlite".to_string(),
            connection_string: "/var/lib/classhub/db.sqlite".to_string(),
            sqlite: SqliteConfig::default(),
        }
    }
}

/// sqlite-specific options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SqliteConfig {
    /// enable write-ahead logging.
    pub write_ahead_log: bool,
}

impl Default for SqliteConfig {
    fn default() -> Self {
        Self {
            write_ahead_log: true,
        }
    }
}

/// token signing configuration.
///
/// access and refresh tokens are signed with separate secrets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct JwtConfig {
    /// hmac secret for access tokens.
    pub access_secret: String,

    /// hmac secret for refresh tokens.
    pub refresh_secret: String,

    /// access token lifetime in minutes.
    pub access_ttl_minutes: i64,

    /// refresh token lifetime in days.
    pub refresh_ttl_days: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            access_secret: "change-me".to_string(),
            refresh_secret: "change-me-too".to_string(),
            access_ttl_minutes: 15,
            refresh_ttl_days: 7,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.server.listen_addr, "0.0.0.0:5000");
        assert_eq!(config.jwt.access_ttl_minutes, 15);
        assert_eq!(config.jwt.refresh_ttl_days, 7);
        assert!(!config.server.is_production());
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config = Config::from_toml_str(
            r#"
            [server]
            listen_addr = "127.0.0.1:9000"

            [database]
            db_type = "postgres"
            connection_string = "postgres://localhost/classhub"
            "#,
        )
        .unwrap();

        assert_eq!(config.server.listen_addr, "127.0.0.1:9000");
        assert_eq!(config.database.db_type, "postgres");
        // unspecified sections keep their defaults
        assert_eq!(config.jwt.access_ttl_minutes, 15);
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        assert!(Config::from_toml_str("server = \"not a table\"").is_err());
    }
}
