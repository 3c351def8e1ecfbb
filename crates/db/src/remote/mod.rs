//! Table-oriented access to the hosted database service.

use async_trait::async_trait;
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use thiserror::Error;

pub mod memory;
pub mod postgrest;

pub use memory::MemoryStore;
pub use postgrest::PostgrestClient;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum RemoteError {
    #[error("network error: {0}")]
    Transport(String),
    #[error("request timed out")]
    Timeout,
    #[error("not authorized: check the service api key")]
    Unauthorized,
    /// Error reported by the service itself; the message is already human readable.
    #[error("{message}")]
    Api {
        status: u16,
        code: Option<String>,
        message: String,
    },
    #[error("http {status}: {body}")]
    Http { status: u16, body: String },
    #[error("could not decode response: {0}")]
    Decode(String),
}

/// One ordering term of a select request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Order {
    pub column: String,
    pub ascending: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectQuery {
    pub columns: String,
    pub order: Vec<Order>,
}

impl SelectQuery {
    /// Select every column, unordered.
    pub fn all() -> Self {
        Self {
            columns: "*".to_string(),
            order: Vec::new(),
        }
    }

    pub fn order_by(mut self, column: impl Into<String>, ascending: bool) -> Self {
        self.order.push(Order {
            column: column.into(),
            ascending,
        });
        self
    }
}

impl Default for SelectQuery {
    fn default() -> Self {
        Self::all()
    }
}

/// The request surface the application needs from the database service.
#[async_trait]
pub trait RemoteStore: Send + Sync {
    /// Fetch the rows of `table` matching `query`.
    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Value>, RemoteError>;

    /// Insert a single row and return it as stored by the service.
    async fn insert(&self, table: &str, row: Value) -> Result<Value, RemoteError>;
}

pub async fn select_rows<T: DeserializeOwned>(
    remote: &dyn RemoteStore,
    table: &str,
    query: &SelectQuery,
) -> Result<Vec<T>, RemoteError> {
    remote
        .select(table, query)
        .await?
        .into_iter()
        .map(|row| serde_json::from_value(row).map_err(|e| RemoteError::Decode(e.to_string())))
        .collect()
}

pub async fn insert_row<I: Serialize, T: DeserializeOwned>(
    remote: &dyn RemoteStore,
    table: &str,
    row: &I,
) -> Result<T, RemoteError> {
    let payload = serde_json::to_value(row).map_err(|e| RemoteError::Decode(e.to_string()))?;
    let stored = remote.insert(table, payload).await?;
    serde_json::from_value(stored).map_err(|e| RemoteError::Decode(e.to_string()))
}
