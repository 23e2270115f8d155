//! Binary configuration loaded from environment variables.

use std::env;
use std::time::Duration;

use crate::config::db::DbKind;
use crate::error::AppError;
use crate::middleware::cors::parse_origins;
use crate::state::security_config::{SecurityConfig, DEFAULT_TOKEN_TTL};

/// HS256 keys shorter than this are refused at startup.
const MIN_SECRET_LEN: usize = 32;
const MAX_TOKEN_TTL_SECS: u64 = 30 * 24 * 60 * 60;

#[derive(Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub db_kind: DbKind,
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub allowed_origins: Vec<String>,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("db_kind", &self.db_kind)
            .field("jwt_secret", &"[REDACTED]")
            .field("token_ttl", &self.token_ttl)
            .field("allowed_origins", &self.allowed_origins)
            .finish()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());

        let port_str = env::var("BACKEND_PORT").unwrap_or_else(|_| "4000".to_string());
        let port = port_str.parse::<u16>().map_err(|_| {
            AppError::config(format!(
                "BACKEND_PORT must be a valid port number, got '{port_str}'"
            ))
        })?;

        let jwt_secret = match env::var("BACKEND_JWT_SECRET") {
            Ok(secret) if secret.len() >= MIN_SECRET_LEN => secret,
            Ok(_) => {
                return Err(AppError::config(format!(
                    "BACKEND_JWT_SECRET is too short; use at least {MIN_SECRET_LEN} characters"
                )))
            }
            Err(_) => return Err(AppError::config("BACKEND_JWT_SECRET must be set")),
        };

        let token_ttl = match env::var("BACKEND_TOKEN_TTL_SECS") {
            Ok(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > MAX_TOKEN_TTL_SECS => {
                    return Err(AppError::config(format!(
                        "BACKEND_TOKEN_TTL_SECS must be at most {MAX_TOKEN_TTL_SECS}, got '{raw}'"
                    )))
                }
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(AppError::config(format!(
                        "BACKEND_TOKEN_TTL_SECS must be a positive integer, got '{raw}'"
                    )))
                }
            },
            Err(_) => DEFAULT_TOKEN_TTL,
        };

        let db_kind = match env::var("BACKEND_DB_KIND") {
            Ok(raw) => raw.parse::<DbKind>()?,
            Err(_) => DbKind::Postgres,
        };

        let allowed_origins =
            parse_origins(&env::var("CORS_ALLOWED_ORIGINS").unwrap_or_default());

        Ok(Config {
            host,
            port,
            db_kind,
            jwt_secret,
            token_ttl,
            allowed_origins,
        })
    }

    pub fn security(&self) -> SecurityConfig {
        SecurityConfig::new(self.jwt_secret.as_bytes()).with_token_ttl(self.token_ttl)
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::time::Duration;

    use serial_test::serial;

    use super::{Config, MAX_TOKEN_TTL_SECS};
    use crate::config::db::DbKind;
    use crate::state::security_config::DEFAULT_TOKEN_TTL;

    const VARS: [&str; 6] = [
        "BACKEND_HOST",
        "BACKEND_PORT",
        "BACKEND_JWT_SECRET",
        "BACKEND_TOKEN_TTL_SECS",
        "BACKEND_DB_KIND",
        "CORS_ALLOWED_ORIGINS",
    ];

    fn clear() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    const SECRET: &str = "0123456789abcdef0123456789abcdef";

    #[test]
    #[serial]
    fn test_defaults() {
        clear();
        env::set_var("BACKEND_JWT_SECRET", SECRET);
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.host, "0.0.0.0");
        assert_eq!(cfg.port, 4000);
        assert_eq!(cfg.db_kind, DbKind::Postgres);
        assert_eq!(cfg.token_ttl, DEFAULT_TOKEN_TTL);
        assert!(cfg.allowed_origins.is_empty());
        clear();
    }

    #[test]
    #[serial]
    fn test_overrides() {
        clear();
        env::set_var("BACKEND_JWT_SECRET", SECRET);
        env::set_var("BACKEND_PORT", "8080");
        env::set_var("BACKEND_TOKEN_TTL_SECS", "600");
        env::set_var("BACKEND_DB_KIND", "sqlite-memory");
        env::set_var("CORS_ALLOWED_ORIGINS", "https://cook.example");
        let cfg = Config::from_env().unwrap();
        assert_eq!(cfg.port, 8080);
        assert_eq!(cfg.token_ttl, Duration::from_secs(600));
        assert_eq!(cfg.db_kind, DbKind::SqliteMemory);
        assert_eq!(cfg.allowed_origins, vec!["https://cook.example".to_string()]);
        assert_eq!(cfg.security().token_ttl, Duration::from_secs(600));
        clear();
    }

    #[test]
    #[serial]
    fn test_secret_required_and_long_enough() {
        clear();
        assert!(Config::from_env().is_err());
        env::set_var("BACKEND_JWT_SECRET", "short");
        assert!(Config::from_env().is_err());
        clear();
    }

    #[test]
    #[serial]
    fn test_bad_port_and_ttl() {
        clear();
        env::set_var("BACKEND_JWT_SECRET", SECRET);
        env::set_var("BACKEND_PORT", "nope");
        assert!(Config::from_env().is_err());
        env::remove_var("BACKEND_PORT");
        env::set_var("BACKEND_TOKEN_TTL_SECS", "0");
        assert!(Config::from_env().is_err());
        env::set_var("BACKEND_TOKEN_TTL_SECS", u64::MAX.to_string());
        assert!(Config::from_env().is_err());
        env::set_var("BACKEND_TOKEN_TTL_SECS", (MAX_TOKEN_TTL_SECS + 1).to_string());
        assert!(Config::from_env().is_err());
        env::set_var("BACKEND_TOKEN_TTL_SECS", MAX_TOKEN_TTL_SECS.to_string());
        assert_eq!(
            Config::from_env().unwrap().token_ttl,
            Duration::from_secs(MAX_TOKEN_TTL_SECS)
        );
        clear();
    }

    #[test]
    #[serial]
    fn test_debug_redacts_secret() {
        clear();
        env::set_var("BACKEND_JWT_SECRET", SECRET);
        let cfg = Config::from_env().unwrap();
        assert!(!format!("{cfg:?}").contains(SECRET));
        clear();
    }
}
