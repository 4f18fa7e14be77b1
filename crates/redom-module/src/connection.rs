//! The store connection seam and its in-memory implementation.

use crate::{ModuleError, options::ConnectionInfo};
use async_trait::async_trait;
use redom_schema::om::Schema;
use std::{
    collections::BTreeMap,
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
};
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

///
/// Connector
///
/// Opens connections to the store.
///

#[async_trait]
pub trait Connector: Send + Sync {
    async fn connect(&self, info: &ConnectionInfo) -> Result<Arc<dyn Connection>, ModuleError>;
}

///
/// Connection
///
/// A live store connection shared by every repository of a module.
///

#[async_trait]
pub trait Connection: Send + Sync {
    /// Create the search index backing `schema`.
    async fn create_index(&self, schema: &Schema) -> Result<(), ModuleError>;

    async fn close(&self) -> Result<(), ModuleError>;
}

///
/// MemoryConnector
///
/// Hands out [`MemoryConnection`]s and remembers each one it opened.
///

#[derive(Default)]
pub struct MemoryConnector {
    opened: Mutex<Vec<Arc<MemoryConnection>>>,
}

impl MemoryConnector {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Connections opened so far, oldest first.
    pub async fn connections(&self) -> Vec<Arc<MemoryConnection>> {
        self.opened.lock().await.clone()
    }
}

#[async_trait]
impl Connector for MemoryConnector {
    async fn connect(&self, info: &ConnectionInfo) -> Result<Arc<dyn Connection>, ModuleError> {
        let connection = Arc::new(MemoryConnection::new(info.clone()));
        self.opened.lock().await.push(Arc::clone(&connection));

        Ok(connection)
    }
}

///
/// MemoryConnection
///
/// Keeps created indexes as their `FT.CREATE` arguments, keyed by index name.
///

pub struct MemoryConnection {
    info: ConnectionInfo,
    indexes: RwLock<BTreeMap<String, Vec<String>>>,
    open: AtomicBool,
}

impl MemoryConnection {
    #[must_use]
    pub fn new(info: ConnectionInfo) -> Self {
        Self {
            info,
            indexes: RwLock::new(BTreeMap::new()),
            open: AtomicBool::new(true),
        }
    }

    #[must_use]
    pub const fn info(&self) -> &ConnectionInfo {
        &self.info
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::Acquire)
    }

    pub async fn index_names(&self) -> Vec<String> {
        self.indexes.read().await.keys().cloned().collect()
    }

    pub async fn index_arguments(&self, index_name: &str) -> Option<Vec<String>> {
        self.indexes.read().await.get(index_name).cloned()
    }
}

#[async_trait]
impl Connection for MemoryConnection {
    async fn create_index(&self, schema: &Schema) -> Result<(), ModuleError> {
        if !self.is_open() {
            return Err(ModuleError::Connection(
                "connection is closed".to_string(),
            ));
        }

        let args = schema.index_arguments();
        debug!(index = schema.index_name(), fields = schema.fields().len(), "create index");

        self.indexes
            .write()
            .await
            .insert(schema.index_name().to_string(), args);

        Ok(())
    }

    async fn close(&self) -> Result<(), ModuleError> {
        self.open.store(false, Ordering::Release);

        Ok(())
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use redom_schema::node::{SchemaDefinition, SchemaOptions};

    #[tokio::test]
    async fn create_index_records_arguments() {
        let connection = MemoryConnection::new(ConnectionInfo::Url("redis://x".to_string()));
        let schema = Schema::new("Cat", SchemaDefinition::new(), SchemaOptions::new()).unwrap();

        connection.create_index(&schema).await.unwrap();

        assert_eq!(connection.index_names().await, ["Cat:index"]);
        assert_eq!(
            connection.index_arguments("Cat:index").await.unwrap()[..3],
            ["Cat:index", "ON", "JSON"]
        );
    }

    #[tokio::test]
    async fn closed_connection_refuses_work() {
        let connector = MemoryConnector::new();
        let connection = connector
            .connect(&ConnectionInfo::Url("redis://x".to_string()))
            .await
            .unwrap();
        let schema = Schema::new("Cat", SchemaDefinition::new(), SchemaOptions::new()).unwrap();

        connection.close().await.unwrap();

        assert!(!connector.connections().await[0].is_open());
        assert!(matches!(
            connection.create_index(&schema).await,
            Err(ModuleError::Connection(_))
        ));
    }
}
