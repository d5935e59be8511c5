use crate::models::Catalog;
use std::collections::BTreeMap;
use std::future::Future;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tokio::fs;
use tracing::{error, warn};

/// A string key-value area in the shape of a browser storage object.
pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> impl Future<Output = Option<String>> + Send;
    fn set_item(&self, key: &str, value: &str) -> impl Future<Output = io::Result<()>> + Send;
    fn remove_item(&self, key: &str) -> impl Future<Output = io::Result<()>> + Send;
}

/// Storage area backed by one JSON object file. Every call goes back to disk.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> BTreeMap<String, String> {
        match fs::read(&self.path).await {
            Ok(bytes) => match serde_json::from_slice(&bytes) {
                Ok(entries) => entries,
                Err(err) => {
                    warn!(path = %self.path.display(), "failed to parse storage file: {err}");
                    BTreeMap::new()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => BTreeMap::new(),
            Err(err) => {
                error!(path = %self.path.display(), "failed to read storage file: {err}");
                BTreeMap::new()
            }
        }
    }

    /// Writes a sibling temp file and renames it over the target, so a torn
    /// write never replaces the previous contents.
    async fn write_entries(&self, entries: &BTreeMap<String, String>) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }
        let payload = serde_json::to_vec_pretty(entries)?;
        let tmp = self.temp_path();
        fs::write(&tmp, payload).await?;
        if let Err(err) = fs::rename(&tmp, &self.path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(err);
        }
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|name| name.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl KeyValueStorage for FileStorage {
    async fn get_item(&self, key: &str) -> Option<String> {
        self.read_entries().await.remove(key)
    }

    async fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        let mut entries = self.read_entries().await;
        entries.insert(key.to_string(), value.to_string());
        self.write_entries(&entries).await
    }

    async fn remove_item(&self, key: &str) -> io::Result<()> {
        let mut entries = self.read_entries().await;
        if entries.remove(key).is_none() {
            return Ok(());
        }
        self.write_entries(&entries).await
    }
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, String>> {
        self.entries
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl KeyValueStorage for MemoryStorage {
    async fn get_item(&self, key: &str) -> Option<String> {
        self.entries().get(key).cloned()
    }

    async fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        self.entries().insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> io::Result<()> {
        self.entries().remove(key);
        Ok(())
    }
}

impl<S: KeyValueStorage> KeyValueStorage for std::sync::Arc<S> {
    async fn get_item(&self, key: &str) -> Option<String> {
        (**self).get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> io::Result<()> {
        (**self).set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> io::Result<()> {
        (**self).remove_item(key).await
    }
}

/// Reads the catalog document. On failure the error message is returned next
/// to an empty catalog so the page can show a notice and keep running.
pub async fn load_catalog(path: &Path) -> (Catalog, Option<String>) {
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) => {
            error!(path = %path.display(), "failed to read catalog: {err}");
            return (
                Catalog::default(),
                Some(format!("Error loading data: could not read {}.", path.display())),
            );
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(catalog) => (catalog, None),
        Err(err) => {
            error!(path = %path.display(), "failed to parse catalog: {err}");
            (
                Catalog::default(),
                Some(format!("Error loading data: {} is not a valid catalog.", path.display())),
            )
        }
    }
}
