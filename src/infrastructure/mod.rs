// src/infrastructure/mod.rs
pub mod config;
pub mod file_store;
pub mod renderer;
pub mod sqlite_store;

pub use config::{Config, StorageBackend};
pub use file_store::FileStore;
pub use renderer::PreviewRenderer;
pub use sqlite_store::SqliteStore;
