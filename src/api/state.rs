use std::sync::Arc;

use crate::{
    db::Storage,
    services::{MovieDatabase, TextGenerator},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn Storage>,
    pub generator: Arc<dyn TextGenerator>,
    pub movies: Arc<dyn MovieDatabase>,
    /// Default page size for the recent recommendations listing
    pub recent_limit: usize,
}

impl AppState {
    pub fn new(
        storage: Arc<dyn Storage>,
        generator: Arc<dyn TextGenerator>,
        movies: Arc<dyn MovieDatabase>,
    ) -> Self {
        Self {
            storage,
            generator,
            movies,
            recent_limit: 5,
        }
    }

    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }
}
