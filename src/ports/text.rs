// src/ports/text.rs
use crate::application::{walk_forest, FolderNode};
use crate::domain::{Note, Template};
use crate::ports::html::format_timestamp;
use crate::util::text::excerpt;

/// Plain-text rendering for terminal output.
#[derive(Debug)]
pub struct TextPresenter {
    excerpt_length: usize,
}

impl TextPresenter {
    pub fn new(excerpt_length: usize) -> Self {
        Self { excerpt_length }
    }

    /// One line per note: id, title, tags, content excerpt.
    pub fn render_note_list(&self, notes: &[&Note]) -> String {
        let mut out = String::new();
        for note in notes {
            out.push_str(&format!("{}\t{}", note.id, note.title));
            if !note.tags.is_empty() {
                out.push_str(&format!("\t[{}]", note.tags.join(", ")));
            }
            let preview = excerpt(&note.content, self.excerpt_length);
            if !preview.is_empty() {
                out.push_str(&format!("\t{}", preview));
            }
            out.push('\n');
        }
        out
    }

    pub fn render_note(&self, note: &Note, folder_name: Option<&str>) -> String {
        let mut out = String::new();
        out.push_str(&format!("# {}\n", note.title));
        out.push_str(&format!("id:      {}\n", note.id));
        if let Some(folder_id) = &note.folder_id {
            out.push_str(&format!("folder:  {}\n", folder_name.unwrap_or(folder_id)));
        }
        if !note.tags.is_empty() {
            out.push_str(&format!("tags:    {}\n", note.tags.join(", ")));
        }
        out.push_str(&format!("created: {}\n", format_timestamp(note.created_at)));
        out.push_str(&format!("updated: {}\n", format_timestamp(note.updated_at)));
        out.push('\n');
        out.push_str(&note.content);
        if !note.content.ends_with('\n') {
            out.push('\n');
        }
        out
    }

    /// Indented folder forest, two spaces per level.
    pub fn render_folder_tree(&self, roots: &[FolderNode]) -> String {
        let mut out = String::new();
        for (depth, folder) in walk_forest(roots) {
            out.push_str(&format!("{}{}\t{}\n", "  ".repeat(depth), folder.name, folder.id));
        }
        out
    }

    pub fn render_tags(&self, tags: &[String]) -> String {
        tags.iter().map(|t| format!("{t}\n")).collect()
    }

    pub fn render_templates(&self, templates: &[Template]) -> String {
        templates
            .iter()
            .map(|t| format!("{}\t{}\n", t.id, t.name))
            .collect()
    }
}
