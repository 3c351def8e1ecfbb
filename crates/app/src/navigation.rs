//! Named routes and the screen stack.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Presentation {
    Card,
    Modal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "route", content = "id", rename_all = "snake_case")]
pub enum Route {
    Shifts,
    CreateShift,
    CreateOfficer,
    OfficerDetails(String),
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Self::Shifts => "/shifts",
            Self::CreateShift => "/shifts/create",
            Self::CreateOfficer => "/officers/create",
            Self::OfficerDetails(_) => "/officers/[id]",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::Shifts => "All Shifts",
            Self::CreateShift => "Create Shift",
            Self::CreateOfficer => "Create Officer",
            Self::OfficerDetails(_) => "Officer Details",
        }
    }

    pub fn presentation(&self) -> Presentation {
        match self {
            Self::CreateShift | Self::CreateOfficer => Presentation::Modal,
            Self::Shifts | Self::OfficerDetails(_) => Presentation::Card,
        }
    }
}

/// Navigation requested by a screen action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
    Push(Route),
    Back,
}

/// Route stack; the root screen is never popped.
#[derive(Debug, Clone)]
pub struct Navigator {
    stack: Vec<Route>,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new(Route::Shifts)
    }
}

impl Navigator {
    pub fn new(root: Route) -> Self {
        Self { stack: vec![root] }
    }

    pub fn current(&self) -> &Route {
        // stack always holds the root
        &self.stack[self.stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn push(&mut self, route: Route) {
        tracing::debug!(path = route.path(), "push");
        self.stack.push(route);
    }

    /// Returns false when already at the root.
    pub fn back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }

    pub fn apply(&mut self, navigation: Navigation) {
        match navigation {
            Navigation::Push(route) => self.push(route),
            Navigation::Back => {
                self.back();
            }
        }
    }
}
