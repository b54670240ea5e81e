// src/application/shortcuts.rs

/// Keyboard shortcuts understood by the notebook.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shortcut {
    /// Ctrl/Cmd+N: create a note in the selected folder.
    NewNote,
    /// Ctrl/Cmd+F: focus the search input. Presentation only.
    FocusSearch,
    /// Ctrl/Cmd+S: nothing to do, every mutation is already persisted.
    Save,
}

impl Shortcut {
    /// `modifier` is true when Ctrl (or Cmd on macOS) is held.
    pub fn from_key(modifier: bool, key: char) -> Option<Self> {
        if !modifier {
            return None;
        }
        match key.to_ascii_lowercase() {
            'n' => Some(Shortcut::NewNote),
            'f' => Some(Shortcut::FocusSearch),
            's' => Some(Shortcut::Save),
            _ => None,
        }
    }
}
