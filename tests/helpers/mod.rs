use anyhow::{Context, Result};
use notekeep::application::Notebook;
use notekeep::infrastructure::{FileStore, SqliteStore};
use std::path::PathBuf;
use tempfile::TempDir;

/// Test fixture owning a temporary data directory
#[allow(dead_code)]
pub struct TestDataDir {
    _temp_dir: TempDir,
    pub path: PathBuf,
}

#[allow(dead_code)]
impl TestDataDir {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let path = temp_dir.path().join("data");
        Ok(Self {
            _temp_dir: temp_dir,
            path,
        })
    }

    pub fn file_store(&self) -> Result<FileStore> {
        Ok(FileStore::new(&self.path)?)
    }

    pub fn sqlite_store(&self) -> Result<SqliteStore> {
        Ok(SqliteStore::open(self.path.join("notekeep.db"))?)
    }

    pub fn open_file_notebook(&self) -> Result<Notebook<FileStore>> {
        Ok(Notebook::open(self.file_store()?)?)
    }

    pub fn snapshot_file(&self, key: &str) -> PathBuf {
        self.path.join(format!("{key}.json"))
    }

    pub fn write_snapshot(&self, key: &str, raw: &str) -> Result<()> {
        std::fs::create_dir_all(&self.path)?;
        std::fs::write(self.snapshot_file(key), raw)?;
        Ok(())
    }
}

/// Populate a notebook with two folders, a template, three notes and tags.
#[allow(dead_code)]
pub fn seed<S: notekeep::application::KeyValueStore>(notebook: &mut Notebook<S>) -> Result<()> {
    let work = notebook.create_folder("Work", None)?;
    notebook.create_folder("Meetings", Some(&work.id))?;
    let template = notebook.create_template("Standup", "## Yesterday\n## Today")?;

    notebook.select_folder(Some(&work.id));
    let mut meeting = notebook.create_note(None)?;
    meeting.title = "Meeting notes".to_string();
    meeting.content = "discuss budget".to_string();
    notebook.update_note(meeting.clone())?;
    notebook.add_tag_to_note(&meeting.id, "work")?;

    notebook.select_folder(None);
    notebook.create_note(Some(&template))?;
    let loose = notebook.create_note(None)?;
    notebook.add_tag_to_note(&loose.id, "home")?;
    notebook.add_tag_to_registry("unused")?;
    Ok(())
}
