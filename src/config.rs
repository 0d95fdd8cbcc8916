use std::env;

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing configuration: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Runtime settings read from the environment (after `.env` is loaded).
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl_minutes: i64,
    pub admin_email: String,
    pub admin_password: String,
    /// Base URL of this API, used in verification links.
    pub public_base_url: String,
    /// Where the browser lands after verifying an email.
    pub frontend_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &'static str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(key))
        };
        let or_default = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let port_raw = or_default("PORT", "5000");
        let port = port_raw.parse::<u16>().map_err(|_| ConfigError::Invalid {
            key: "PORT",
            value: port_raw.clone(),
        })?;

        let ttl_raw = or_default("TOKEN_TTL_MINUTES", "60");
        let token_ttl_minutes = match ttl_raw.parse::<i64>() {
            Ok(v) if v > 0 => v,
            _ => {
                return Err(ConfigError::Invalid {
                    key: "TOKEN_TTL_MINUTES",
                    value: ttl_raw,
                })
            }
        };

        Ok(Config {
            database_url: or_default("DATABASE_URL", "sqlite://coach.db"),
            host: or_default("HOST", "127.0.0.1"),
            port,
            jwt_secret: required("JWT_SECRET")?,
            token_ttl_minutes,
            admin_email: required("ADMIN_EMAIL")?,
            admin_password: required("ADMIN_PASSWORD")?,
            public_base_url: or_default("PUBLIC_BASE_URL", "http://localhost:5000")
                .trim_end_matches('/')
                .to_string(),
            frontend_url: or_default("FRONTEND_URL", "http://localhost:3000")
                .trim_end_matches('/')
                .to_string(),
        })
    }
}
