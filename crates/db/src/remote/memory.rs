//! In-process stand-in for the hosted database, used by tests and offline runs.

use std::{
    cmp::Ordering,
    collections::HashMap,
    sync::{
        Mutex,
        atomic::{AtomicUsize, Ordering as AtomicOrdering},
    },
};

use async_trait::async_trait;
use chrono::DateTime;
use serde_json::Value;
use uuid::Uuid;

use super::{RemoteError, RemoteStore, SelectQuery};

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: Mutex<HashMap<String, Vec<Value>>>,
    next_failure: Mutex<Option<RemoteError>>,
    requests: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append rows to `table` without counting as a request.
    pub fn seed(&self, table: &str, rows: Vec<Value>) {
        self.lock_tables()
            .entry(table.to_string())
            .or_default()
            .extend(rows);
    }

    /// Make the next request fail with `err`.
    pub fn fail_next(&self, err: RemoteError) {
        *self
            .next_failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(err);
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(AtomicOrdering::SeqCst)
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.lock_tables().get(table).cloned().unwrap_or_default()
    }

    fn lock_tables(&self) -> std::sync::MutexGuard<'_, HashMap<String, Vec<Value>>> {
        self.tables
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn begin_request(&self) -> Result<(), RemoteError> {
        self.requests.fetch_add(1, AtomicOrdering::SeqCst);
        match self
            .next_failure
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
        {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl RemoteStore for MemoryStore {
    async fn select(&self, table: &str, query: &SelectQuery) -> Result<Vec<Value>, RemoteError> {
        self.begin_request()?;

        let mut rows = self.rows(table);
        rows.sort_by(|a, b| {
            query
                .order
                .iter()
                .map(|o| {
                    let ord = compare_values(
                        a.get(&o.column).unwrap_or(&Value::Null),
                        b.get(&o.column).unwrap_or(&Value::Null),
                    );
                    match (o.ascending, a.get(&o.column), b.get(&o.column)) {
                        // nulls stay last in both directions
                        (false, Some(x), Some(y)) if !x.is_null() && !y.is_null() => ord.reverse(),
                        _ => ord,
                    }
                })
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
        Ok(rows)
    }

    async fn insert(&self, table: &str, row: Value) -> Result<Value, RemoteError> {
        self.begin_request()?;

        let Value::Object(mut fields) = row else {
            return Err(RemoteError::Api {
                status: 400,
                code: Some("PGRST102".to_string()),
                message: "row must be a JSON object".to_string(),
            });
        };
        if fields.get("id").is_none_or(Value::is_null) {
            fields.insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        }

        let stored = Value::Object(fields);
        self.lock_tables()
            .entry(table.to_string())
            .or_default()
            .push(stored.clone());
        Ok(stored)
    }
}

fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Greater,
        (_, Value::Null) => Ordering::Less,
        // timestamps compare as instants, like timestamptz columns
        (Value::String(x), Value::String(y)) => {
            match (DateTime::parse_from_rfc3339(x), DateTime::parse_from_rfc3339(y)) {
                (Ok(x), Ok(y)) => x.cmp(&y),
                _ => x.cmp(y),
            }
        }
        (Value::Number(x), Value::Number(y)) => {
            let (x, y) = (x.as_f64().unwrap_or(0.0), y.as_f64().unwrap_or(0.0));
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => a.to_string().cmp(&b.to_string()),
    }
}
