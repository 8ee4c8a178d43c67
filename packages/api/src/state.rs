use std::sync::Arc;
use std::time::Duration;

use shared::repositories::connection::{connector_for_uri, ConnectionManager, StoreConnector};

use crate::config::{Config, ConfigError, DEFAULT_REQUEST_TIMEOUT_SECS};

#[derive(Clone)]
pub struct AppState {
    pub connection: Arc<ConnectionManager>,
    pub validate_timezone: bool,
    pub legacy_double_encoding: bool,
    pub request_timeout: Duration,
}

impl AppState {
    pub fn new(connector: Arc<dyn StoreConnector>) -> Self {
        AppState {
            connection: Arc::new(ConnectionManager::new(connector)),
            validate_timezone: true,
            legacy_double_encoding: false,
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        let connector = connector_for_uri(
            &config.store_uri,
            &config.users_table,
            config.load_seed_users()?,
        );
        Ok(AppState {
            validate_timezone: config.validate_timezone,
            legacy_double_encoding: config.legacy_double_encoding,
            request_timeout: config.request_timeout,
            ..AppState::new(connector)
        })
    }
}
