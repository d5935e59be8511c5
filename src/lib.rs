pub mod app;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod progress;
pub mod search;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod state;

pub use app::router;
pub use config::AppConfig;
pub use progress::{PROGRESS_KEY, ProgressStore};
pub use state::AppState;
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage, load_catalog};
