// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use std::io::{Read, Write};

use anyhow::{Context, Result};
use application::{Clock, KeyValueStore, Notebook};
use cli::args::{Args, Command, FolderCommand, TagCommand, TemplateCommand};
use constants::SQLITE_FILE_NAME;
use domain::DomainError;
use infrastructure::{Config, FileStore, PreviewRenderer, SqliteStore, StorageBackend};
use ports::{HtmlPresenter, TextPresenter};
use tracing::{debug, info};

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting notekeep with arguments");

    let mut config = Config::load_or_default(args.config.as_deref())?;
    if let Some(dir) = &args.data_dir {
        config.storage.data_dir = dir.to_string_lossy().into_owned();
    }
    if let Some(backend) = args.backend {
        config.storage.backend = backend;
    }

    let store = open_store(&config)?;
    let mut notebook = Notebook::open(store).context("Failed to load notebook")?;
    let presenter = TextPresenter::new(config.display.excerpt_length);

    let stdout = std::io::stdout();
    execute(&mut notebook, &presenter, args.command, &mut stdout.lock())
}

/// Open the backend selected in `config`.
pub fn open_store(config: &Config) -> Result<Box<dyn KeyValueStore>> {
    let data_dir = config.data_dir()?;
    info!(?data_dir, backend = ?config.storage.backend, "Opening store");

    let store: Box<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::File => Box::new(FileStore::new(&data_dir)?),
        StorageBackend::Sqlite => Box::new(SqliteStore::open(data_dir.join(SQLITE_FILE_NAME))?),
    };
    Ok(store)
}

/// Apply one CLI command to `notebook`, writing user-facing output to `out`.
pub fn execute<S, C, W>(
    notebook: &mut Notebook<S, C>,
    presenter: &TextPresenter,
    command: Command,
    out: &mut W,
) -> Result<()>
where
    S: KeyValueStore,
    C: Clock,
    W: Write,
{
    match command {
        Command::New { folder, template } => {
            let template = match template {
                Some(id) => Some(
                    notebook
                        .template(&id)
                        .cloned()
                        .ok_or(DomainError::TemplateNotFound(id))?,
                ),
                None => None,
            };
            notebook.select_folder(folder.as_deref());
            let note = notebook.create_note(template.as_ref())?;
            writeln!(out, "{}", note.id)?;
        }
        Command::List {
            search,
            tag,
            folder,
            json,
        } => {
            notebook.set_search_term(search.as_deref().unwrap_or_default());
            notebook.select_tag(tag.as_deref());
            notebook.select_folder(folder.as_deref());
            let notes = notebook.visible_notes();
            debug!(count = notes.len(), "Listing notes");
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&notes)?)?;
            } else {
                write!(out, "{}", presenter.render_note_list(&notes))?;
            }
        }
        Command::Show { note_id, json } => {
            let note = find_note(notebook, &note_id)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(note)?)?;
            } else {
                let folder_name = note
                    .folder_id
                    .as_deref()
                    .and_then(|id| notebook.folder(id))
                    .map(|f| f.name.as_str());
                write!(out, "{}", presenter.render_note(note, folder_name))?;
            }
        }
        Command::Edit {
            note_id,
            title,
            content,
        } => {
            let mut note = find_note(notebook, &note_id)?.clone();
            if let Some(title) = title {
                note.title = title;
            }
            if let Some(content) = content {
                note.content = read_argument(content)?;
            }
            notebook.update_note(note)?;
        }
        Command::Delete { note_id } => {
            notebook.delete_note(&note_id)?;
        }
        Command::Preview { note_id } => {
            let note = find_note(notebook, &note_id)?;
            let html = HtmlPresenter::new().render(note);
            let mut renderer = PreviewRenderer::new();
            let path = renderer.create_temp_file(&html)?;
            info!(note_id = %note_id, ?path, "Opening preview");
            renderer.open_in_browser(&path)?;
        }
        Command::Tag(cmd) => execute_tag(notebook, presenter, cmd, out)?,
        Command::Folder(cmd) => execute_folder(notebook, presenter, cmd, out)?,
        Command::Template(cmd) => execute_template(notebook, presenter, cmd, out)?,
    }
    Ok(())
}

fn execute_tag<S: KeyValueStore, C: Clock, W: Write>(
    notebook: &mut Notebook<S, C>,
    presenter: &TextPresenter,
    command: TagCommand,
    out: &mut W,
) -> Result<()> {
    match command {
        TagCommand::List => write!(out, "{}", presenter.render_tags(notebook.tags()))?,
        TagCommand::Add { tag } => notebook.add_tag_to_registry(&tag)?,
        TagCommand::Remove { tag } => notebook.remove_tag_from_registry(&tag)?,
        TagCommand::Attach { note_id, tag } => {
            notebook
                .add_tag_to_note(&note_id, &tag)?
                .ok_or(DomainError::NoteNotFound(note_id))?;
        }
        TagCommand::Detach { note_id, tag } => {
            notebook
                .remove_tag_from_note(&note_id, &tag)?
                .ok_or(DomainError::NoteNotFound(note_id))?;
        }
    }
    Ok(())
}

fn execute_folder<S: KeyValueStore, C: Clock, W: Write>(
    notebook: &mut Notebook<S, C>,
    presenter: &TextPresenter,
    command: FolderCommand,
    out: &mut W,
) -> Result<()> {
    match command {
        FolderCommand::New { name, parent } => {
            let folder = notebook.create_folder(&name, parent.as_deref())?;
            writeln!(out, "{}", folder.id)?;
        }
        FolderCommand::Tree => {
            write!(out, "{}", presenter.render_folder_tree(&notebook.folder_tree()))?
        }
        FolderCommand::Delete { folder_id } => notebook.delete_folder(&folder_id)?,
    }
    Ok(())
}

fn execute_template<S: KeyValueStore, C: Clock, W: Write>(
    notebook: &mut Notebook<S, C>,
    presenter: &TextPresenter,
    command: TemplateCommand,
    out: &mut W,
) -> Result<()> {
    match command {
        TemplateCommand::New { name, content } => {
            let template = notebook.create_template(&name, &read_argument(content)?)?;
            writeln!(out, "{}", template.id)?;
        }
        TemplateCommand::List => {
            write!(out, "{}", presenter.render_templates(notebook.templates()))?
        }
    }
    Ok(())
}

fn find_note<'a, S: KeyValueStore, C: Clock>(
    notebook: &'a Notebook<S, C>,
    id: &str,
) -> Result<&'a domain::Note, DomainError> {
    notebook
        .note(id)
        .ok_or_else(|| DomainError::NoteNotFound(id.to_string()))
}

/// `-` means: read the value from stdin.
fn read_argument(value: String) -> Result<String> {
    if value != "-" {
        return Ok(value);
    }
    let mut buf = String::new();
    std::io::stdin()
        .read_to_string(&mut buf)
        .context("Failed to read content from stdin")?;
    Ok(buf)
}
