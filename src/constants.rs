// src/constants.rs
//
// Application-wide constants shared by the store, the storage backends and the CLI.

/// Title given to a note created without a template.
pub const DEFAULT_NOTE_TITLE: &str = "New Note";

/// Snapshot key holding the JSON array of notes.
pub const NOTES_KEY: &str = "notes";

/// Snapshot key holding the JSON array of folders.
pub const FOLDERS_KEY: &str = "folders";

/// Snapshot key holding the JSON array of templates.
pub const TEMPLATES_KEY: &str = "templates";

/// Snapshot key holding the JSON array of registered tags.
pub const TAGS_KEY: &str = "tags";

/// File name of the SQLite database inside the data directory.
///
/// Used in: `infrastructure/sqlite_store.rs`
pub const SQLITE_FILE_NAME: &str = "notekeep.db";

/// Application directory name below the platform config/data dirs.
pub const APP_DIR_NAME: &str = "notekeep";

/// Number of characters shown as content excerpt in note listings.
pub const DEFAULT_EXCERPT_LENGTH: usize = 60;

/// Delay in milliseconds after writing the preview file before the temp dir may go away.
///
/// The browser is spawned asynchronously; it needs a moment to read the file before
/// the process exits and the temp directory is cleaned up.
///
/// Used in: `infrastructure/renderer.rs`
pub const BROWSER_LAUNCH_DELAY_MS: u64 = 500;
