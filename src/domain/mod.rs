// src/domain/mod.rs
pub mod error;
pub mod folder;
pub mod note;
pub mod template;

pub use error::DomainError;
pub use folder::Folder;
pub use note::{Note, Timestamp};
pub use template::Template;
