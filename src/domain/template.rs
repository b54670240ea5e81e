// src/domain/template.rs
use serde::{Deserialize, Serialize};

/// Seed content for new notes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: String,
    pub name: String,
    pub content: String,
}
