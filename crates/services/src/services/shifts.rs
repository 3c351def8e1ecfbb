use db::{DBService, models::shift::Shift};
use tokio::sync::watch;
use tracing::{error, info};

use super::store::{ListState, ListStore};

const FETCH_FAILED: &str = "Failed to fetch shifts";

#[derive(Debug)]
pub struct ShiftStore {
    db: DBService,
    list: ListStore<Shift>,
}

impl ShiftStore {
    pub fn new(db: DBService) -> Self {
        Self {
            db,
            list: ListStore::new(),
        }
    }

    pub fn state(&self) -> ListState<Shift> {
        self.list.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState<Shift>> {
        self.list.subscribe()
    }

    pub async fn fetch(&self) {
        let _guard = self.list.serialize().await;

        self.list.begin_load();
        let result = Shift::find_all(&self.db).await;
        match &result {
            Ok(shifts) => info!(count = shifts.len(), "fetched shifts"),
            Err(e) => error!("failed to fetch shifts: {}", e),
        }
        self.list.finish_load(result, FETCH_FAILED);
    }

    pub fn clear_error(&self) {
        self.list.clear_error();
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use db::remote::{MemoryStore, RemoteError};
    use serde_json::json;

    use super::*;

    #[tokio::test]
    async fn test_fetch_then_clear_error() {
        let remote = Arc::new(MemoryStore::new());
        remote.seed(
            Shift::TABLE,
            vec![json!({"id": "s1", "officer_id": "o1",
                        "start_time": "2026-10-20T06:00:00Z", "end_time": "2026-10-20T14:00:00Z"})],
        );
        let store = ShiftStore::new(DBService::new(remote.clone()));

        remote.fail_next(RemoteError::Unauthorized);
        store.fetch().await;
        let state = store.state();
        assert!(state.items.is_empty());
        assert!(!state.is_loading);
        assert!(state.error.is_some());

        store.clear_error();
        assert_eq!(store.state().error, None);

        store.fetch().await;
        let state = store.state();
        assert_eq!(state.items.len(), 1);
        assert_eq!(state.error, None);
    }
}
