use crate::models::Catalog;
use crate::progress::ProgressStore;
use crate::storage::FileStorage;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Shared application state. The catalog is immutable after startup; the
/// store sits behind a lock so each read-modify-write runs alone.
#[derive(Clone)]
pub struct AppState {
    pub catalog: Arc<Catalog>,
    pub catalog_notice: Option<Arc<str>>,
    pub progress: Arc<Mutex<ProgressStore<FileStorage>>>,
}

impl AppState {
    pub fn new(catalog: Catalog, catalog_notice: Option<String>, storage: FileStorage) -> Self {
        Self {
            catalog: Arc::new(catalog),
            catalog_notice: catalog_notice.map(Arc::from),
            progress: Arc::new(Mutex::new(ProgressStore::new(storage))),
        }
    }
}
