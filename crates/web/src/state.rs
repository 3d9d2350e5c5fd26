use std::sync::Arc;

use storage::repository::WorkoutStore;

/// Shared handler state: the workout store chosen at startup.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn WorkoutStore>,
}

impl AppState {
    pub fn new(store: impl WorkoutStore + 'static) -> Self {
        Self {
            store: Arc::new(store),
        }
    }

    pub fn store(&self) -> &dyn WorkoutStore {
        self.store.as_ref()
    }
}
