use std::sync::Arc;

use crate::config::Config;
use crate::engine::SkillEngine;
use crate::store::ProfileStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub engine: SkillEngine,
    /// Pluggable profile store. Default: InMemoryProfileStore.
    pub store: Arc<dyn ProfileStore>,
    pub config: Config,
}

#[cfg(test)]
impl AppState {
    /// Bundled taxonomy, empty in-memory store, default config.
    pub fn for_tests() -> Self {
        use crate::store::InMemoryProfileStore;
        use crate::taxonomy::catalog::Taxonomy;

        AppState {
            engine: SkillEngine::new(Taxonomy::bundled().expect("bundled taxonomy is valid")),
            store: Arc::new(InMemoryProfileStore::new()),
            config: Config::default(),
        }
    }
}
