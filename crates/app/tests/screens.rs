use std::sync::Arc;

use app::{
    navigation::{Navigator, Route},
    screens::{
        Alert,
        create_officer::CreateOfficerScreen,
        shifts::{ShiftsScreen, ShiftsView},
    },
};
use chrono::{Duration, TimeZone, Utc};
use db::{
    DBService,
    models::{
        officer::{Department, Officer, Rank},
        shift::Shift,
    },
    remote::MemoryStore,
};
use serde_json::json;
use services::services::{
    officer_form::BalanceKind, officers::OfficerStore, shift_filter::ShiftFilter,
    shifts::ShiftStore,
};

fn seeded_remote() -> Arc<MemoryStore> {
    let remote = Arc::new(MemoryStore::new());
    remote.seed(
        Officer::TABLE,
        vec![json!({
            "id": "o1", "name": "Adams", "badge": "B-1", "rank": "Officer",
            "department": "Patrol", "email": "adams@police.gov", "is_supervisor": false,
            "vacation_balance": 100, "holiday_balance": 40, "sick_balance": null
        })],
    );
    remote.seed(
        Shift::TABLE,
        vec![
            json!({"id": "s-past", "officer_id": "o1",
                   "start_time": "2026-10-18T06:00:00Z", "end_time": "2026-10-18T14:00:00Z",
                   "recurrence": {"pattern": "daily"}}),
            json!({"id": "s-next", "officer_id": "o1",
                   "start_time": "2026-10-20T06:00:00Z", "end_time": "2026-10-20T14:00:00Z"}),
        ],
    );
    remote
}

#[tokio::test]
async fn create_officer_flow_updates_list_and_returns() {
    let remote = seeded_remote();
    let store = Arc::new(OfficerStore::new(DBService::new(remote.clone())));
    store.fetch().await;
    let before = store.state().items.len();

    let mut navigator = Navigator::default();
    let mut screen = CreateOfficerScreen::new(store.clone());
    navigator.push(screen.route());

    screen.form.name = "  Zoe Park ".to_string();
    screen.form.badge = "B-77".to_string();
    screen.form.email = "zpark@police.gov".to_string();
    screen.form.rank = Rank::Sergeant;
    screen.form.department = Department::CommunityRelations;
    screen.form.set_balance_text(BalanceKind::Holiday, "16");

    let outcome = screen.submit().await;
    assert_eq!(outcome.alert, Alert::success("Officer created successfully"));
    navigator.apply(outcome.navigation.expect("success navigates"));
    assert_eq!(navigator.current(), &Route::Shifts);

    let state = store.state();
    assert_eq!(state.items.len(), before + 1);
    let zoe = state.items.iter().find(|o| o.badge == "B-77").unwrap();
    assert_eq!(zoe.name, "Zoe Park");
    assert_eq!(zoe.pto_balances.holiday, 16.0);
    assert_eq!(zoe.pto_balances.vacation, 120.0);
    assert_eq!(state.items[0].pto_balances.sick, 0.0);
}

#[tokio::test]
async fn invalid_email_is_rejected_without_request() {
    let remote = seeded_remote();
    let store = Arc::new(OfficerStore::new(DBService::new(remote.clone())));
    let mut screen = CreateOfficerScreen::new(store);
    screen.form.name = "Zoe".to_string();
    screen.form.badge = "B-77".to_string();
    screen.form.email = "not-an-email".to_string();

    let outcome = screen.submit().await;
    assert_eq!(
        outcome.alert,
        Alert::error("Please enter a valid email address")
    );
    assert_eq!(remote.request_count(), 0);
}

#[tokio::test]
async fn shift_screen_filters() {
    let remote = seeded_remote();
    let store = Arc::new(ShiftStore::new(DBService::new(remote)));
    let mut screen = ShiftsScreen::new(store);
    screen.mount().await;
    let now = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();

    let ids = |view: ShiftsView| match view {
        ShiftsView::List { shifts, .. } => shifts.into_iter().map(|s| s.id).collect::<Vec<_>>(),
        other => panic!("expected list, got {:?}", other),
    };

    assert_eq!(ids(screen.render(now)), vec!["s-past", "s-next"]);

    screen.set_filter(ShiftFilter::Recurring);
    assert_eq!(ids(screen.render(now)), vec!["s-past"]);

    screen.set_filter(ShiftFilter::Upcoming);
    assert_eq!(ids(screen.render(now)), vec!["s-next"]);

    let later = now + Duration::days(2);
    assert!(matches!(screen.render(later), ShiftsView::Empty { .. }));
}
