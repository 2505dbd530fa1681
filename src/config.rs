use std::env;
use std::str::FromStr;

/// Tokens are valid for 12 hours unless overridden.
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 12 * 60 * 60;
pub const DEFAULT_BCRYPT_COST: u32 = 10;
/// Upper bound on `JWT_EXPIRY_SECONDS`: one year.
pub const MAX_TOKEN_TTL_SECONDS: u64 = 365 * 24 * 60 * 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required env var: {0}")]
    Missing(&'static str),

    #[error("Token signing secret is not set (SECRET_KEY or JWT_SECRET must be non-empty)")]
    MissingSecret,

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub jwt_secret: String,
    pub jwt_expiry_seconds: u64,
    pub bcrypt_cost: u32,
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup. `from_env` is the
    /// production entry point; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database_url = get("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;
        let jwt_secret = get("SECRET_KEY")
            .or_else(|| get("JWT_SECRET"))
            .ok_or(ConfigError::MissingSecret)?;

        let jwt_expiry_seconds =
            parse_or(&get, "JWT_EXPIRY_SECONDS", DEFAULT_TOKEN_TTL_SECONDS)?;
        if jwt_expiry_seconds == 0 || jwt_expiry_seconds > MAX_TOKEN_TTL_SECONDS {
            return Err(ConfigError::Invalid {
                key: "JWT_EXPIRY_SECONDS",
                value: jwt_expiry_seconds.to_string(),
            });
        }

        Ok(Self {
            database_url,
            database_max_connections: parse_or(&get, "DATABASE_MAX_CONNECTIONS", 10)?,
            jwt_secret,
            jwt_expiry_seconds,
            bcrypt_cost: parse_or(&get, "BCRYPT_COST", DEFAULT_BCRYPT_COST)?,
            host: get("HOST").unwrap_or_else(|| "0.0.0.0".into()),
            port: parse_or(&get, "PORT", 3000)?,
        })
    }
}

fn parse_or<T, G>(get: &G, key: &'static str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value: raw }),
        None => Ok(default),
    }
}
