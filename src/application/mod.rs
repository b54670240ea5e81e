// src/application/mod.rs
pub mod clock;
pub mod folder_tree;
pub mod notebook;
pub mod query;
pub mod shortcuts;
pub mod snapshot;

pub use clock::{Clock, SystemClock};
pub use folder_tree::{build_folder_tree, walk_forest, FolderNode};
pub use notebook::{Notebook, Selection};
pub use query::{filter_notes, NoteFilter};
pub use shortcuts::Shortcut;
pub use snapshot::{KeyValueStore, Snapshot};
