use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use shared::models::user::UserRecord;
use shared::repositories::user_repository::DEFAULT_USERS_TABLE;
use thiserror::Error;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} environment variable must be set")]
    Missing(&'static str),
    #[error("{name} has an invalid value {value:?}")]
    Invalid { name: &'static str, value: String },
    #[error("couldn't load seed users from {path:?}: {reason}")]
    Seed { path: PathBuf, reason: String },
}

/// Settings read once at process start.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Store endpoint the connection manager connects to. `memory://` selects
    /// the process-local store.
    pub store_uri: String,
    pub users_table: String,
    pub bind_addr: SocketAddr,
    pub request_timeout: Duration,
    pub validate_timezone: bool,
    /// Serve fetched records as a JSON string holding the JSON record.
    pub legacy_double_encoding: bool,
    /// JSON array of user records the `memory://` store starts with.
    pub store_seed_file: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let store_uri = lookup("STORE_URI")
            .filter(|uri| !uri.trim().is_empty())
            .ok_or(ConfigError::Missing("STORE_URI"))?;

        let users_table = lookup("USERS_TABLE").unwrap_or_else(|| DEFAULT_USERS_TABLE.to_string());

        let bind_addr = parse_or("BIND_ADDR", lookup("BIND_ADDR"), || {
            SocketAddr::from(([0, 0, 0, 0], DEFAULT_PORT))
        })?;

        let timeout_secs = parse_or("REQUEST_TIMEOUT_SECS", lookup("REQUEST_TIMEOUT_SECS"), || {
            DEFAULT_REQUEST_TIMEOUT_SECS
        })?;

        let validate_timezone =
            parse_or("VALIDATE_TIMEZONE", lookup("VALIDATE_TIMEZONE"), || true)?;
        let legacy_double_encoding =
            parse_or("LEGACY_DOUBLE_ENCODING", lookup("LEGACY_DOUBLE_ENCODING"), || false)?;
        let store_seed_file = lookup("STORE_SEED_FILE")
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from);

        Ok(Config {
            store_uri,
            users_table,
            bind_addr,
            request_timeout: Duration::from_secs(timeout_secs),
            validate_timezone,
            legacy_double_encoding,
            store_seed_file,
        })
    }

    /// Reads the seed file, if one is configured.
    pub fn load_seed_users(&self) -> Result<Vec<UserRecord>, ConfigError> {
        let Some(path) = &self.store_seed_file else {
            return Ok(Vec::new());
        };
        let seed_error = |reason: String| ConfigError::Seed {
            path: path.clone(),
            reason,
        };

        let contents = std::fs::read_to_string(path).map_err(|e| seed_error(e.to_string()))?;
        serde_json::from_str(&contents).map_err(|e| seed_error(e.to_string()))
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: impl FnOnce() -> T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default()),
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults_with_only_store_uri() {
        let config = Config::from_lookup(lookup_from(&[("STORE_URI", "http://localhost:8000")]))
            .unwrap();

        assert_eq!(config.store_uri, "http://localhost:8000");
        assert_eq!(config.users_table, "users");
        assert_eq!(config.bind_addr, "0.0.0.0:3000".parse().unwrap());
        assert_eq!(config.request_timeout, Duration::from_secs(10));
        assert!(config.validate_timezone);
        assert!(!config.legacy_double_encoding);
        assert_eq!(config.store_seed_file, None);
        assert!(config.load_seed_users().unwrap().is_empty());
    }

    #[test]
    fn test_store_uri_is_required() {
        assert_eq!(
            Config::from_lookup(lookup_from(&[])),
            Err(ConfigError::Missing("STORE_URI"))
        );
        assert_eq!(
            Config::from_lookup(lookup_from(&[("STORE_URI", "  ")])),
            Err(ConfigError::Missing("STORE_URI"))
        );
    }

    #[test]
    fn test_overrides() {
        let config = Config::from_lookup(lookup_from(&[
            ("STORE_URI", "memory://"),
            ("USERS_TABLE", "tz-users"),
            ("BIND_ADDR", "127.0.0.1:8080"),
            ("REQUEST_TIMEOUT_SECS", "3"),
            ("VALIDATE_TIMEZONE", "false"),
            ("LEGACY_DOUBLE_ENCODING", "true"),
            ("STORE_SEED_FILE", "/srv/tz/users.json"),
        ]))
        .unwrap();

        assert_eq!(config.users_table, "tz-users");
        assert_eq!(config.bind_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert!(!config.validate_timezone);
        assert!(config.legacy_double_encoding);
        assert_eq!(config.store_seed_file, Some(PathBuf::from("/srv/tz/users.json")));
    }

    #[test]
    fn test_invalid_value_is_reported() {
        let result = Config::from_lookup(lookup_from(&[
            ("STORE_URI", "memory://"),
            ("REQUEST_TIMEOUT_SECS", "soon"),
        ]));

        assert_eq!(
            result,
            Err(ConfigError::Invalid {
                name: "REQUEST_TIMEOUT_SECS",
                value: "soon".to_string(),
            })
        );
    }

    #[test]
    fn test_load_seed_users_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"id":"u1","username":"alice","createdAt":"2024-01-01T00:00:00Z","timezone":null}}]"#
        )
        .unwrap();

        let config = Config::from_lookup(lookup_from(&[
            ("STORE_URI", "memory://"),
            ("STORE_SEED_FILE", file.path().to_str().unwrap()),
        ]))
        .unwrap();

        let users = config.load_seed_users().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].id, "u1");
        assert_eq!(users[0].username, "alice");
    }

    #[test]
    fn test_load_seed_users_reports_bad_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        let config = Config::from_lookup(lookup_from(&[
            ("STORE_URI", "memory://"),
            ("STORE_SEED_FILE", file.path().to_str().unwrap()),
        ]))
        .unwrap();

        assert!(matches!(
            config.load_seed_users(),
            Err(ConfigError::Seed { path, .. }) if path == file.path()
        ));
    }
}
