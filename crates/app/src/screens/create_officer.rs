use std::sync::{
    Arc,
    atomic::{AtomicBool, Ordering},
};

use db::models::officer::Officer;
use services::services::{
    officer_form::OfficerForm,
    officers::OfficerStore,
    store::error_message,
};
use tracing::{info, warn};

use super::Alert;
use crate::navigation::{Navigation, Route};

const CREATE_FAILED: &str = "Failed to create officer";

/// What the view should do after a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitOutcome {
    pub alert: Alert,
    pub navigation: Option<Navigation>,
    pub created: Option<Officer>,
}

pub struct CreateOfficerScreen {
    store: Arc<OfficerStore>,
    pub form: OfficerForm,
    submitting: AtomicBool,
}

/// Clears the submitting flag when the submit finishes or is dropped.
struct Submitting<'a>(&'a AtomicBool);

impl<'a> Submitting<'a> {
    fn begin(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self(flag)
    }
}

impl Drop for Submitting<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl CreateOfficerScreen {
    pub fn new(store: Arc<OfficerStore>) -> Self {
        Self::with_form(store, OfficerForm::default())
    }

    pub fn with_form(store: Arc<OfficerStore>, form: OfficerForm) -> Self {
        Self {
            store,
            form,
            submitting: AtomicBool::new(false),
        }
    }

    pub fn route(&self) -> Route {
        Route::CreateOfficer
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::SeqCst)
    }

    pub fn submit_label(&self) -> &'static str {
        if self.is_submitting() {
            "Creating..."
        } else {
            "Create Officer"
        }
    }

    pub fn cancel(&self) -> Navigation {
        Navigation::Back
    }

    /// Validate locally, then insert through the officer store.
    ///
    /// Takes `&self` so the label can be read while the request is in flight.
    pub async fn submit(&self) -> SubmitOutcome {
        let insert = match self.form.submission() {
            Ok(insert) => insert,
            Err(e) => {
                return SubmitOutcome {
                    alert: Alert::error(e.to_string()),
                    navigation: None,
                    created: None,
                };
            }
        };

        let result = {
            let _submitting = Submitting::begin(&self.submitting);
            self.store.create(&insert).await
        };

        match result {
            Ok(officer) => {
                info!(officer_id = %officer.id, "officer form submitted");
                SubmitOutcome {
                    alert: Alert::success("Officer created successfully"),
                    navigation: Some(Navigation::Back),
                    created: Some(officer),
                }
            }
            Err(e) => {
                warn!("officer form rejected by service: {}", e);
                SubmitOutcome {
                    alert: Alert::error(error_message(&e, CREATE_FAILED)),
                    navigation: None,
                    created: None,
                }
            }
        }
    }
}
