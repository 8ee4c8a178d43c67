use std::sync::Arc;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client;
use tokio::sync::OnceCell;
use tracing::{info, warn};

use crate::models::user::UserRecord;
use crate::repositories::errors::user_repository_errors::UserRepositoryError;
use crate::repositories::in_memory_user_repository::InMemoryUserRepository;
use crate::repositories::user_repository::{DynamoDbUserRepository, UserRepository};

pub const MEMORY_STORE_SCHEME: &str = "memory://";

/// Establishes a connection to the users collection.
#[async_trait]
pub trait StoreConnector: Send + Sync {
    async fn connect(&self) -> Result<Arc<dyn UserRepository>, UserRepositoryError>;
}

pub struct DynamoDbConnector {
    pub endpoint_url: String,
    pub table_name: String,
}

impl DynamoDbConnector {
    pub fn new(endpoint_url: impl Into<String>, table_name: impl Into<String>) -> Self {
        Self {
            endpoint_url: endpoint_url.into(),
            table_name: table_name.into(),
        }
    }
}

#[async_trait]
impl StoreConnector for DynamoDbConnector {
    async fn connect(&self) -> Result<Arc<dyn UserRepository>, UserRepositoryError> {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .endpoint_url(&self.endpoint_url)
            .load()
            .await;
        let client = Client::new(&config);

        // Fails fast when the endpoint is unreachable or the table is missing.
        client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
            .map_err(|e| UserRepositoryError::Unavailable(e.to_string()))?;

        Ok(Arc::new(DynamoDbUserRepository::new(
            client,
            self.table_name.clone(),
        )))
    }
}

#[derive(Clone, Default)]
pub struct InMemoryConnector {
    repository: InMemoryUserRepository,
}

impl InMemoryConnector {
    pub fn new(repository: InMemoryUserRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl StoreConnector for InMemoryConnector {
    async fn connect(&self) -> Result<Arc<dyn UserRepository>, UserRepositoryError> {
        Ok(Arc::new(self.repository.clone()))
    }
}

/// Picks the connector matching the scheme of `store_uri`.
///
/// `seed_users` fill the in-memory store; a DynamoDB table is never seeded.
pub fn connector_for_uri(
    store_uri: &str,
    table_name: &str,
    seed_users: Vec<UserRecord>,
) -> Arc<dyn StoreConnector> {
    if store_uri.starts_with(MEMORY_STORE_SCHEME) {
        warn!(
            seeded = seed_users.len(),
            "using the in-memory users store, records will not survive a restart"
        );
        Arc::new(InMemoryConnector::new(InMemoryUserRepository::with_users(
            seed_users,
        )))
    } else {
        if !seed_users.is_empty() {
            warn!("ignoring seed users, only the in-memory store is seeded");
        }
        Arc::new(DynamoDbConnector::new(store_uri, table_name))
    }
}

/// Lazily connects to the store on first use and hands out the shared
/// repository afterwards.
///
/// Concurrent first callers wait on the same connect attempt. A failed attempt
/// leaves the manager disconnected so the next caller retries.
pub struct ConnectionManager {
    connector: Arc<dyn StoreConnector>,
    repository: OnceCell<Arc<dyn UserRepository>>,
}

impl ConnectionManager {
    pub fn new(connector: Arc<dyn StoreConnector>) -> Self {
        Self {
            connector,
            repository: OnceCell::new(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.repository.initialized()
    }

    pub async fn repository(&self) -> Result<Arc<dyn UserRepository>, UserRepositoryError> {
        self.repository
            .get_or_try_init(|| async {
                info!("connecting to users store");
                let repository = self.connector.connect().await?;
                info!("connected to users store");
                Ok::<_, UserRepositoryError>(repository)
            })
            .await
            .map(Arc::clone)
    }
}
