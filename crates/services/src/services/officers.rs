//! Officer list state and the operations that mutate it.
//!
//! Writes do not merge into the cached list: after a successful insert the
//! whole list is fetched again so it always mirrors the service.

use db::{
    DBService,
    models::officer::{CreateOfficer, Officer},
    remote::RemoteError,
};
use tokio::sync::watch;
use tracing::{error, info};

use super::store::{ListState, ListStore};

const FETCH_FAILED: &str = "Failed to fetch officers";

#[derive(Debug)]
pub struct OfficerStore {
    db: DBService,
    list: ListStore<Officer>,
}

impl OfficerStore {
    pub fn new(db: DBService) -> Self {
        Self {
            db,
            list: ListStore::new(),
        }
    }

    pub fn state(&self) -> ListState<Officer> {
        self.list.snapshot()
    }

    pub fn subscribe(&self) -> watch::Receiver<ListState<Officer>> {
        self.list.subscribe()
    }

    pub async fn fetch(&self) {
        let _guard = self.list.serialize().await;
        self.fetch_locked().await;
    }

    /// Insert an officer and refresh the list. The insert error is returned
    /// as-is; list state is only touched by the follow-up fetch.
    pub async fn create(&self, input: &CreateOfficer) -> Result<Officer, RemoteError> {
        let _guard = self.list.serialize().await;

        let officer = Officer::create(&self.db, input).await.inspect_err(|e| {
            error!(badge = %input.badge, "failed to create officer: {}", e);
        })?;
        info!(officer_id = %officer.id, badge = %officer.badge, "officer created");

        self.fetch_locked().await;
        Ok(officer)
    }

    async fn fetch_locked(&self) {
        self.list.begin_load();
        let result = Officer::find_all(&self.db).await;
        match &result {
            Ok(officers) => info!(count = officers.len(), "fetched officers"),
            Err(e) => error!("failed to fetch officers: {}", e),
        }
        self.list.finish_load(result, FETCH_FAILED);
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use db::{
        models::officer::{Department, Rank},
        remote::MemoryStore,
    };
    use serde_json::json;

    use super::*;

    fn setup() -> (Arc<MemoryStore>, OfficerStore) {
        let remote = Arc::new(MemoryStore::new());
        remote.seed(
            Officer::TABLE,
            vec![
                json!({"id": "o2", "name": "Reyes", "badge": "B-2", "rank": "Captain",
                       "department": "Traffic", "email": "reyes@police.gov",
                       "is_supervisor": true, "vacation_balance": 10, "holiday_balance": null,
                       "sick_balance": 4}),
                json!({"id": "o1", "name": "Adams", "badge": "B-1", "rank": "Officer",
                       "department": "Patrol", "email": "adams@police.gov"}),
            ],
        );
        let store = OfficerStore::new(DBService::new(remote.clone()));
        (remote, store)
    }

    fn new_officer(name: &str) -> CreateOfficer {
        CreateOfficer {
            name: name.to_string(),
            badge: "B-9".to_string(),
            rank: Rank::Corporal,
            department: Department::Swat,
            email: "new@police.gov".to_string(),
            phone: Some("555-123-4567".to_string()),
            avatar: None,
            is_supervisor: false,
            vacation_balance: 120.0,
            holiday_balance: 40.0,
            sick_balance: 80.0,
        }
    }

    #[tokio::test]
    async fn test_starts_loading() {
        let (_, store) = setup();
        let state = store.state();
        assert!(state.is_loading);
        assert!(state.items.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_orders_by_name_and_defaults_balances() {
        let (_, store) = setup();
        store.fetch().await;

        let state = store.state();
        assert!(!state.is_loading);
        assert_eq!(state.error, None);
        let names: Vec<_> = state.items.iter().map(|o| o.name.as_str()).collect();
        assert_eq!(names, vec!["Adams", "Reyes"]);
        assert_eq!(state.items[1].pto_balances.holiday, 0.0);
        assert_eq!(state.items[1].pto_balances.vacation, 10.0);
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_previous_list() {
        let (remote, store) = setup();
        store.fetch().await;

        remote.fail_next(RemoteError::Transport("connection reset".to_string()));
        store.fetch().await;

        let state = store.state();
        assert!(!state.is_loading);
        assert_eq!(state.items.len(), 2);
        assert_eq!(
            state.error.as_deref(),
            Some("network error: connection reset")
        );
    }

    #[tokio::test]
    async fn test_create_refreshes_list() {
        let (remote, store) = setup();
        store.fetch().await;
        let before = store.state().items.len();
        let mut rx = store.subscribe();

        let created = store.create(&new_officer("Baker")).await.unwrap();
        assert_eq!(created.department, Department::Swat);
        assert_eq!(created.phone.as_deref(), Some("555-123-4567"));

        let state = store.state();
        assert_eq!(state.items.len(), before + 1);
        assert_eq!(state.items[1].name, "Baker");
        assert!(rx.has_changed().unwrap());
        // seed does not count; fetch + insert + refetch
        assert_eq!(remote.request_count(), 3);
    }

    #[tokio::test]
    async fn test_create_failure_is_returned_to_caller() {
        let (remote, store) = setup();
        store.fetch().await;
        remote.fail_next(RemoteError::Api {
            status: 409,
            code: Some("23505".to_string()),
            message: "duplicate key value violates unique constraint".to_string(),
        });

        let err = store.create(&new_officer("Baker")).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "duplicate key value violates unique constraint"
        );

        let state = store.state();
        assert_eq!(state.items.len(), 2);
        assert_eq!(state.error, None);
        assert_eq!(remote.rows(Officer::TABLE).len(), 2);
    }
}
