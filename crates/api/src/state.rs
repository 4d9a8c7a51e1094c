use std::sync::Arc;

use folio_db::PgPageStore;

use crate::config::ServerConfig;
use crate::services::PageService;

/// Shared application state, cloned into every handler via `State<AppState>`.
#[derive(Clone)]
pub struct AppState {
    pub pool: folio_db::DbPool,
    pub config: Arc<ServerConfig>,
    pub pages: PageService,
}

impl AppState {
    /// State whose page service is backed by the same pool.
    pub fn new(pool: folio_db::DbPool, config: ServerConfig) -> Self {
        let pages = PageService::new(Arc::new(PgPageStore::new(pool.clone())));
        Self {
            pool,
            config: Arc::new(config),
            pages,
        }
    }
}
