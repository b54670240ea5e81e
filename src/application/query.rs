// src/application/query.rs
use crate::domain::Note;

/// Criteria deciding which notes are visible.
///
/// All set criteria must hold. An empty search term and unset tag/folder
/// match every note.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub search_term: String,
    pub tag: Option<String>,
    pub folder_id: Option<String>,
}

impl NoteFilter {
    pub fn matches(&self, note: &Note) -> bool {
        matches_lowered(
            note,
            &self.search_term.to_lowercase(),
            self.active_tag(),
            self.active_folder(),
        )
    }

    fn active_tag(&self) -> Option<&str> {
        self.tag.as_deref().filter(|t| !t.is_empty())
    }

    fn active_folder(&self) -> Option<&str> {
        self.folder_id.as_deref().filter(|f| !f.is_empty())
    }
}

/// Stable filter over `notes`; result keeps collection order.
pub fn filter_notes<'a>(notes: &'a [Note], filter: &NoteFilter) -> Vec<&'a Note> {
    let needle = filter.search_term.to_lowercase();
    notes
        .iter()
        .filter(|note| {
            matches_lowered(note, &needle, filter.active_tag(), filter.active_folder())
        })
        .collect()
}

fn matches_lowered(note: &Note, needle: &str, tag: Option<&str>, folder_id: Option<&str>) -> bool {
    let text_match = needle.is_empty()
        || note.title.to_lowercase().contains(needle)
        || note.content.to_lowercase().contains(needle);
    let tag_match = tag.map_or(true, |t| note.has_tag(t));
    let folder_match = folder_id.map_or(true, |f| note.folder_id.as_deref() == Some(f));

    text_match && tag_match && folder_match
}
