// src/domain/note.rs
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_NOTE_TITLE;
use crate::domain::Template;

/// Milliseconds since the Unix epoch.
pub type Timestamp = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub folder_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Note {
    /// Build a fresh note, seeded from `template` when given.
    pub fn new(
        id: String,
        template: Option<&Template>,
        folder_id: Option<String>,
        now: Timestamp,
    ) -> Self {
        let (title, content) = match template {
            Some(t) => (t.name.clone(), t.content.clone()),
            None => (DEFAULT_NOTE_TITLE.to_string(), String::new()),
        };
        Self {
            id,
            title,
            content,
            tags: Vec::new(),
            folder_id,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Append `tag` unless already present. Returns true when the list changed.
    pub fn add_tag(&mut self, tag: &str) -> bool {
        if self.has_tag(tag) {
            return false;
        }
        self.tags.push(tag.to_string());
        true
    }

    /// Returns true when the tag was present.
    pub fn remove_tag(&mut self, tag: &str) -> bool {
        let before = self.tags.len();
        self.tags.retain(|t| t != tag);
        self.tags.len() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_no_template_when_creating_note_then_uses_defaults() {
        let note = Note::new("n1".to_string(), None, Some("f1".to_string()), 42);

        assert_eq!(note.title, "New Note");
        assert_eq!(note.content, "");
        assert!(note.tags.is_empty());
        assert_eq!(note.folder_id.as_deref(), Some("f1"));
        assert_eq!(note.created_at, note.updated_at);
    }

    #[test]
    fn given_template_when_creating_note_then_copies_name_and_content() {
        let template = Template {
            id: "t1".to_string(),
            name: "Meeting".to_string(),
            content: "## Agenda".to_string(),
        };

        let note = Note::new("n1".to_string(), Some(&template), None, 7);

        assert_eq!(note.title, "Meeting");
        assert_eq!(note.content, "## Agenda");
        assert_eq!(note.folder_id, None);
    }

    #[test]
    fn given_existing_tag_when_adding_again_then_list_unchanged() {
        let mut note = Note::new("n1".to_string(), None, None, 0);

        assert!(note.add_tag("work"));
        assert!(!note.add_tag("work"));

        assert_eq!(note.tags, vec!["work".to_string()]);
    }

    #[test]
    fn given_missing_tag_when_removing_then_reports_no_change() {
        let mut note = Note::new("n1".to_string(), None, None, 0);
        note.add_tag("work");

        assert!(!note.remove_tag("home"));
        assert!(note.remove_tag("work"));
        assert!(note.tags.is_empty());
    }
}
