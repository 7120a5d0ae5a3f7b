use std::env;

use actix_web::http::uri::InvalidUri;
use actix_web::http::Uri;

const DEFAULT_SERVER_HOST: &str = "127.0.0.1";
const DEFAULT_SERVER_PORT: u16 = 8080;
const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value: {reason}")]
    Invalid { name: &'static str, reason: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub jwt_secret: String,
    pub server_port: u16,
    pub server_host: String,
    /// Origin of the browser client allowed by the CORS policy.
    pub cors_allowed_origin: String,
    pub bcrypt_cost: u32,
    pub database_max_connections: u32,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL").ok_or(ConfigError::Missing("DATABASE_URL"))?;

        let jwt_secret = lookup("JWT_SECRET").ok_or(ConfigError::Missing("JWT_SECRET"))?;
        if jwt_secret.is_empty() {
            return Err(ConfigError::Invalid {
                name: "JWT_SECRET",
                reason: "must not be empty".into(),
            });
        }

        let bcrypt_cost = parse_or(&lookup, "BCRYPT_COST", bcrypt::DEFAULT_COST)?;
        if !(4..=31).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                name: "BCRYPT_COST",
                reason: format!("{} is outside 4..=31", bcrypt_cost),
            });
        }

        let cors_allowed_origin =
            lookup("CORS_ALLOWED_ORIGIN").unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string());
        check_origin(&cors_allowed_origin).map_err(|reason| ConfigError::Invalid {
            name: "CORS_ALLOWED_ORIGIN",
            reason,
        })?;

        Ok(Self {
            database_url,
            jwt_secret,
            server_port: parse_or(&lookup, "SERVER_PORT", DEFAULT_SERVER_PORT)?,
            server_host: lookup("SERVER_HOST").unwrap_or_else(|| DEFAULT_SERVER_HOST.to_string()),
            cors_allowed_origin,
            bcrypt_cost,
            database_max_connections: parse_or(
                &lookup,
                "DATABASE_MAX_CONNECTIONS",
                DEFAULT_MAX_CONNECTIONS,
            )?,
        })
    }

    pub fn server_url(&self) -> String {
        format!("http://{}:{}", self.server_host, self.server_port)
    }

    pub fn bind_addr(&self) -> (String, u16) {
        (self.server_host.clone(), self.server_port)
    }
}

/// A CORS origin must be a single `http(s)://host[:port]` value; wildcards are not allowed.
fn check_origin(origin: &str) -> Result<(), String> {
    let uri: Uri = origin
        .parse()
        .map_err(|e: InvalidUri| format!("{:?} is not a valid origin: {}", origin, e))?;

    match uri.scheme_str() {
        Some("http") | Some("https") => {}
        _ => return Err(format!("{:?} must use the http or https scheme", origin)),
    }
    if uri.host().map_or(true, str::is_empty) {
        return Err(format!("{:?} has no host", origin));
    }
    if origin.ends_with('/') || uri.path() != "/" || uri.query().is_some() {
        return Err(format!("{:?} must not carry a path or query", origin));
    }
    Ok(())
}

fn parse_or<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(name) {
        Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: e.to_string(),
        }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.database_url, "postgres://test");
        assert_eq!(config.server_port, 8080);
        assert_eq!(config.server_host, "127.0.0.1");
        assert_eq!(config.cors_allowed_origin, "http://localhost:3000");
        assert_eq!(config.bcrypt_cost, bcrypt::DEFAULT_COST);
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.server_url(), "http://127.0.0.1:8080");
    }

    #[test]
    fn test_config_custom_values() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "secret"),
            ("SERVER_PORT", "3000"),
            ("SERVER_HOST", "0.0.0.0"),
            ("CORS_ALLOWED_ORIGIN", "https://tasks.example.com"),
            ("BCRYPT_COST", "10"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr(), ("0.0.0.0".to_string(), 3000));
        assert_eq!(config.cors_allowed_origin, "https://tasks.example.com");
        assert_eq!(config.bcrypt_cost, 10);
    }

    #[test]
    fn test_config_errors() {
        assert_eq!(
            Config::from_lookup(lookup_from(&[("JWT_SECRET", "secret")])).unwrap_err(),
            ConfigError::Missing("DATABASE_URL")
        );
        assert_eq!(
            Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://test")])).unwrap_err(),
            ConfigError::Missing("JWT_SECRET")
        );

        let empty_secret = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", ""),
        ]));
        assert!(matches!(
            empty_secret,
            Err(ConfigError::Invalid { name: "JWT_SECRET", .. })
        ));

        let bad_port = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "secret"),
            ("SERVER_PORT", "eighty"),
        ]));
        assert!(matches!(
            bad_port,
            Err(ConfigError::Invalid { name: "SERVER_PORT", .. })
        ));

        let bad_cost = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "secret"),
            ("BCRYPT_COST", "2"),
        ]));
        assert!(matches!(
            bad_cost,
            Err(ConfigError::Invalid { name: "BCRYPT_COST", .. })
        ));

        for origin in [
            "*",
            "",
            "localhost:3000",
            "ftp://files.example.com",
            "https://",
            "https://tasks.example.com/",
            "https://tasks.example.com/app",
            "https://tasks.example.com?x=1",
        ] {
            let result = Config::from_lookup(lookup_from(&[
                ("DATABASE_URL", "postgres://test"),
                ("JWT_SECRET", "secret"),
                ("CORS_ALLOWED_ORIGIN", origin),
            ]));
            assert!(
                matches!(
                    result,
                    Err(ConfigError::Invalid { name: "CORS_ALLOWED_ORIGIN", .. })
                ),
                "origin {:?} should be rejected",
                origin
            );
        }
    }

    #[test]
    fn test_config_accepts_origin_with_port() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://test"),
            ("JWT_SECRET", "secret"),
            ("CORS_ALLOWED_ORIGIN", "http://127.0.0.1:5173"),
        ]))
        .unwrap();

        assert_eq!(config.cors_allowed_origin, "http://127.0.0.1:5173");
    }
}
