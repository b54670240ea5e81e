// src/application/notebook.rs
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::application::clock::{Clock, SystemClock};
use crate::application::folder_tree::{build_folder_tree, FolderNode};
use crate::application::query::{filter_notes, NoteFilter};
use crate::application::shortcuts::Shortcut;
use crate::application::snapshot::{KeyValueStore, Snapshot};
use crate::domain::{DomainError, Folder, Note, Template};

/// Session selection: which note is open and which view criteria are active.
///
/// Not persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    pub note_id: Option<String>,
    pub folder_id: Option<String>,
    pub tag: Option<String>,
    pub search_term: String,
}

/// Owner of all notes, folders, templates and tags of one session.
///
/// Every mutation that changes state is followed by a full checkpoint of all
/// four collections into the backing store. Mutations targeting missing ids
/// are silent no-ops and write nothing.
pub struct Notebook<S: KeyValueStore, C: Clock = SystemClock> {
    store: S,
    clock: C,
    state: Snapshot,
    selection: Selection,
}

impl<S: KeyValueStore> Notebook<S, SystemClock> {
    pub fn open(store: S) -> Result<Self, DomainError> {
        Self::open_with_clock(store, SystemClock)
    }
}

impl<S: KeyValueStore, C: Clock> Notebook<S, C> {
    pub fn open_with_clock(store: S, clock: C) -> Result<Self, DomainError> {
        let state = Snapshot::load(&store)?;
        info!(
            notes = state.notes.len(),
            folders = state.folders.len(),
            templates = state.templates.len(),
            tags = state.tags.len(),
            "Opened notebook"
        );
        Ok(Self {
            store,
            clock,
            state,
            selection: Selection::default(),
        })
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.state
    }

    pub fn notes(&self) -> &[Note] {
        &self.state.notes
    }

    pub fn folders(&self) -> &[Folder] {
        &self.state.folders
    }

    pub fn templates(&self) -> &[Template] {
        &self.state.templates
    }

    pub fn tags(&self) -> &[String] {
        &self.state.tags
    }

    pub fn note(&self, id: &str) -> Option<&Note> {
        self.state.notes.iter().find(|n| n.id == id)
    }

    pub fn folder(&self, id: &str) -> Option<&Folder> {
        self.state.folders.iter().find(|f| f.id == id)
    }

    pub fn template(&self, id: &str) -> Option<&Template> {
        self.state.templates.iter().find(|t| t.id == id)
    }

    // --- notes ---

    /// Create a note in the selected folder, seeded from `template` if given.
    ///
    /// The new note becomes the selected note.
    #[instrument(level = "debug", skip(self, template))]
    pub fn create_note(&mut self, template: Option<&Template>) -> Result<Note, DomainError> {
        let note = Note::new(
            new_id(),
            template,
            self.selection.folder_id.clone(),
            self.clock.now(),
        );
        self.state.notes.push(note.clone());
        self.selection.note_id = Some(note.id.clone());
        self.checkpoint()?;

        info!(note_id = %note.id, "Created note");
        Ok(note)
    }

    /// Replace the stored note with the same id.
    ///
    /// `updated_at` is always set by the notebook. Empty and repeated tags are
    /// dropped, keeping first-seen order; the remaining tags are registered.
    #[instrument(level = "debug", skip(self, note), fields(note_id = %note.id))]
    pub fn update_note(&mut self, mut note: Note) -> Result<(), DomainError> {
        let Some(idx) = self.note_index(&note.id) else {
            debug!("Note not found, nothing to update");
            return Ok(());
        };

        for tag in std::mem::take(&mut note.tags) {
            if !tag.is_empty() {
                note.add_tag(&tag);
            }
        }
        note.updated_at = self.touch(self.state.notes[idx].updated_at);
        for tag in &note.tags {
            register_tag(&mut self.state.tags, tag);
        }
        self.state.notes[idx] = note;
        self.checkpoint()
    }

    #[instrument(level = "debug", skip(self))]
    pub fn delete_note(&mut self, id: &str) -> Result<(), DomainError> {
        let before = self.state.notes.len();
        self.state.notes.retain(|n| n.id != id);
        if self.state.notes.len() == before {
            debug!("Note not found, nothing to delete");
            return Ok(());
        }

        if self.selection.note_id.as_deref() == Some(id) {
            self.selection.note_id = None;
        }
        self.checkpoint()?;

        info!(note_id = id, "Deleted note");
        Ok(())
    }

    // --- folders ---

    /// Create a folder below `parent_id`. Neither the name nor the parent is validated.
    #[instrument(level = "debug", skip(self))]
    pub fn create_folder(
        &mut self,
        name: &str,
        parent_id: Option<&str>,
    ) -> Result<Folder, DomainError> {
        let folder = Folder {
            id: new_id(),
            name: name.to_string(),
            parent_id: parent_id.map(str::to_string),
        };
        self.state.folders.push(folder.clone());
        self.checkpoint()?;

        info!(folder_id = %folder.id, "Created folder");
        Ok(folder)
    }

    /// Remove a folder record only.
    ///
    /// Notes and child folders keep their now dangling references.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_folder(&mut self, id: &str) -> Result<(), DomainError> {
        let before = self.state.folders.len();
        self.state.folders.retain(|f| f.id != id);
        if self.state.folders.len() == before {
            debug!("Folder not found, nothing to delete");
            return Ok(());
        }

        if self.selection.folder_id.as_deref() == Some(id) {
            self.selection.folder_id = None;
        }
        self.checkpoint()
    }

    pub fn folder_tree(&self) -> Vec<FolderNode> {
        build_folder_tree(&self.state.folders)
    }

    // --- tags ---

    #[instrument(level = "debug", skip(self))]
    pub fn add_tag_to_registry(&mut self, tag: &str) -> Result<(), DomainError> {
        if tag.is_empty() || !register_tag(&mut self.state.tags, tag) {
            return Ok(());
        }
        self.checkpoint()
    }

    /// Remove `tag` from the registry and from every note in one step.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_tag_from_registry(&mut self, tag: &str) -> Result<(), DomainError> {
        let before = self.state.tags.len();
        self.state.tags.retain(|t| t != tag);
        let mut changed = self.state.tags.len() != before;

        let mut stripped = 0usize;
        for note in &mut self.state.notes {
            if note.remove_tag(tag) {
                stripped += 1;
            }
        }
        changed |= stripped > 0;

        if !changed {
            return Ok(());
        }
        if self.selection.tag.as_deref() == Some(tag) {
            self.selection.tag = None;
        }
        self.checkpoint()?;

        info!(tag, notes_affected = stripped, "Removed tag");
        Ok(())
    }

    /// Attach `tag` to a note and make sure it is registered.
    ///
    /// Returns the note as stored afterwards, or `None` if no such note exists.
    #[instrument(level = "debug", skip(self))]
    pub fn add_tag_to_note(
        &mut self,
        note_id: &str,
        tag: &str,
    ) -> Result<Option<Note>, DomainError> {
        let Some(idx) = self.note_index(note_id) else {
            debug!("Note not found, tag not added");
            return Ok(None);
        };
        if tag.is_empty() {
            return Ok(Some(self.state.notes[idx].clone()));
        }

        let registered = register_tag(&mut self.state.tags, tag);
        let attached = self.state.notes[idx].add_tag(tag);
        if attached {
            let now = self.touch(self.state.notes[idx].updated_at);
            self.state.notes[idx].updated_at = now;
        }
        if registered || attached {
            self.checkpoint()?;
        }
        Ok(Some(self.state.notes[idx].clone()))
    }

    /// Detach `tag` from one note. The registry is left alone.
    #[instrument(level = "debug", skip(self))]
    pub fn remove_tag_from_note(
        &mut self,
        note_id: &str,
        tag: &str,
    ) -> Result<Option<Note>, DomainError> {
        let Some(idx) = self.note_index(note_id) else {
            debug!("Note not found, tag not removed");
            return Ok(None);
        };

        if self.state.notes[idx].remove_tag(tag) {
            let now = self.touch(self.state.notes[idx].updated_at);
            self.state.notes[idx].updated_at = now;
            self.checkpoint()?;
        }
        Ok(Some(self.state.notes[idx].clone()))
    }

    // --- templates ---

    #[instrument(level = "debug", skip(self, content))]
    pub fn create_template(&mut self, name: &str, content: &str) -> Result<Template, DomainError> {
        let template = Template {
            id: new_id(),
            name: name.to_string(),
            content: content.to_string(),
        };
        self.state.templates.push(template.clone());
        self.checkpoint()?;
        Ok(template)
    }

    // --- selection and views ---

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn select_note(&mut self, id: Option<&str>) {
        self.selection.note_id = id.map(str::to_string);
    }

    pub fn select_folder(&mut self, id: Option<&str>) {
        self.selection.folder_id = id.map(str::to_string);
    }

    pub fn select_tag(&mut self, tag: Option<&str>) {
        self.selection.tag = tag.map(str::to_string);
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.selection.search_term = term.to_string();
    }

    /// The selected note, if the selection still resolves.
    pub fn selected_note(&self) -> Option<&Note> {
        self.selection.note_id.as_deref().and_then(|id| self.note(id))
    }

    pub fn filter(&self) -> NoteFilter {
        NoteFilter {
            search_term: self.selection.search_term.clone(),
            tag: self.selection.tag.clone(),
            folder_id: self.selection.folder_id.clone(),
        }
    }

    /// Notes matching the current search term, tag and folder selection.
    pub fn visible_notes(&self) -> Vec<&Note> {
        filter_notes(&self.state.notes, &self.filter())
    }

    /// Returns the created note for [`Shortcut::NewNote`], `None` otherwise.
    pub fn apply_shortcut(&mut self, shortcut: Shortcut) -> Result<Option<Note>, DomainError> {
        match shortcut {
            Shortcut::NewNote => self.create_note(None).map(Some),
            Shortcut::FocusSearch | Shortcut::Save => Ok(None),
        }
    }

    // --- internals ---

    fn note_index(&self, id: &str) -> Option<usize> {
        self.state.notes.iter().position(|n| n.id == id)
    }

    // Never moves a timestamp backwards, even if the wall clock does.
    fn touch(&self, previous: i64) -> i64 {
        self.clock.now().max(previous)
    }

    fn checkpoint(&mut self) -> Result<(), DomainError> {
        self.state.save(&mut self.store)?;
        debug!(notes = self.state.notes.len(), "Checkpoint written");
        Ok(())
    }
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

/// Set-insert into the registry. Returns true when the tag was new.
fn register_tag(registry: &mut Vec<String>, tag: &str) -> bool {
    if registry.iter().any(|t| t == tag) {
        return false;
    }
    registry.push(tag.to_string());
    true
}
