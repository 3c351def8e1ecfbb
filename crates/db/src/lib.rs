use std::sync::Arc;

pub mod models;
pub mod remote;

use remote::RemoteStore;

/// Handle to the hosted database service, shared by models and stores.
#[derive(Clone)]
pub struct DBService {
    pub remote: Arc<dyn RemoteStore>,
}

impl DBService {
    pub fn new(remote: Arc<dyn RemoteStore>) -> Self {
        Self { remote }
    }
}

impl std::fmt::Debug for DBService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DBService").finish_non_exhaustive()
    }
}
