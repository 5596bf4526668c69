//! Application state shared across handlers

use std::sync::Arc;

use crate::db::UserStore;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    store: Box<dyn UserStore>,
}

impl AppState {
    pub fn new<S>(store: S) -> Self
    where
        S: UserStore + 'static,
    {
        Self {
            inner: Arc::new(AppStateInner {
                store: Box::new(store),
            }),
        }
    }

    pub fn store(&self) -> &dyn UserStore {
        self.inner.store.as_ref()
    }
}
