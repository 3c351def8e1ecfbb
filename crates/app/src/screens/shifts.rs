//! Shift list with client-side filters.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use db::models::shift::Shift;
use serde::Serialize;
use services::services::{shift_filter::ShiftFilter, shifts::ShiftStore};

use crate::navigation::{Navigation, Route};

pub const LOADING_MESSAGE: &str = "Loading shifts...";
pub const ERROR_TITLE: &str = "Error Loading Shifts";
pub const EMPTY_TITLE: &str = "No shifts found";
pub const EMPTY_DESCRIPTION: &str = "There are no shifts matching your current filter. Try changing the filter or create a new shift.";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum ShiftsView {
    Loading {
        message: &'static str,
    },
    Error {
        title: &'static str,
        message: String,
        action: &'static str,
    },
    Empty {
        filter: ShiftFilter,
        title: &'static str,
        description: &'static str,
    },
    List {
        title: &'static str,
        filter: ShiftFilter,
        shifts: Vec<Shift>,
        refreshing: bool,
    },
}

pub struct ShiftsScreen {
    store: Arc<ShiftStore>,
    filter: ShiftFilter,
}

impl ShiftsScreen {
    pub fn new(store: Arc<ShiftStore>) -> Self {
        Self {
            store,
            filter: ShiftFilter::default(),
        }
    }

    pub async fn mount(&self) {
        self.store.fetch().await;
    }

    pub fn filter(&self) -> ShiftFilter {
        self.filter
    }

    pub fn set_filter(&mut self, filter: ShiftFilter) {
        self.filter = filter;
    }

    /// Pull-to-refresh.
    pub async fn refresh(&self) {
        self.store.fetch().await;
    }

    pub async fn retry(&self) {
        self.store.clear_error();
        self.store.fetch().await;
    }

    pub fn create_shift(&self) -> Navigation {
        Navigation::Push(Route::CreateShift)
    }

    pub fn render(&self, now: DateTime<Utc>) -> ShiftsView {
        let state = self.store.state();

        if state.is_loading && state.items.is_empty() {
            return ShiftsView::Loading {
                message: LOADING_MESSAGE,
            };
        }

        if let Some(message) = state.error {
            return ShiftsView::Error {
                title: ERROR_TITLE,
                message,
                action: "Retry",
            };
        }

        let shifts: Vec<Shift> = self
            .filter
            .apply(&state.items, now)
            .into_iter()
            .cloned()
            .collect();

        if shifts.is_empty() {
            return ShiftsView::Empty {
                filter: self.filter,
                title: EMPTY_TITLE,
                description: EMPTY_DESCRIPTION,
            };
        }

        ShiftsView::List {
            title: Route::Shifts.title(),
            filter: self.filter,
            shifts,
            refreshing: state.is_loading,
        }
    }
}
