// src/cli/args.rs
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::infrastructure::StorageBackend;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)] // Read from `Cargo.toml`
#[command(arg_required_else_help = true, disable_help_subcommand = true)]
pub struct Args {
    /// Directory holding the notebook snapshots (overrides config)
    #[arg(short, long, value_name = "DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Storage backend (overrides config)
    #[arg(short, long, value_enum, global = true)]
    pub backend: Option<StorageBackend>,

    /// Path to config file (optional)
    #[arg(short, long, value_name = "CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Verbosity level (-v = debug, -vv = trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create a note, blank or from a template
    New {
        /// Folder to create the note in
        #[arg(short, long, value_name = "FOLDER_ID")]
        folder: Option<String>,

        /// Template to seed title and content from
        #[arg(short, long, value_name = "TEMPLATE_ID")]
        template: Option<String>,
    },

    /// List notes matching search term, tag and folder
    List {
        /// Case-insensitive search in title and content
        #[arg(value_name = "SEARCH")]
        search: Option<String>,

        /// Only notes carrying this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Only notes directly in this folder
        #[arg(short, long, value_name = "FOLDER_ID")]
        folder: Option<String>,

        /// Output notes as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show a single note
    Show {
        #[arg(value_name = "NOTE_ID")]
        note_id: String,

        /// Output note as JSON
        #[arg(long)]
        json: bool,
    },

    /// Change title and/or content of a note
    Edit {
        #[arg(value_name = "NOTE_ID")]
        note_id: String,

        #[arg(long)]
        title: Option<String>,

        /// New content; `-` reads from stdin
        #[arg(long)]
        content: Option<String>,
    },

    /// Delete a note
    Delete {
        #[arg(value_name = "NOTE_ID")]
        note_id: String,
    },

    /// Open the rendered markdown of a note in the browser
    Preview {
        #[arg(value_name = "NOTE_ID")]
        note_id: String,
    },

    /// Manage the tag registry and note tags
    #[command(subcommand)]
    Tag(TagCommand),

    /// Manage folders
    #[command(subcommand)]
    Folder(FolderCommand),

    /// Manage note templates
    #[command(subcommand)]
    Template(TemplateCommand),
}

#[derive(Subcommand, Debug, Clone)]
pub enum TagCommand {
    /// List registered tags
    List,
    /// Register a tag
    Add { tag: String },
    /// Unregister a tag and strip it from every note
    Remove { tag: String },
    /// Attach a tag to a note (registers it if needed)
    Attach {
        #[arg(value_name = "NOTE_ID")]
        note_id: String,
        tag: String,
    },
    /// Detach a tag from a note
    Detach {
        #[arg(value_name = "NOTE_ID")]
        note_id: String,
        tag: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum FolderCommand {
    /// Create a folder
    New {
        name: String,

        /// Parent folder
        #[arg(short, long, value_name = "FOLDER_ID")]
        parent: Option<String>,
    },
    /// Print the folder hierarchy
    Tree,
    /// Delete a folder; notes and subfolders are kept
    Delete {
        #[arg(value_name = "FOLDER_ID")]
        folder_id: String,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum TemplateCommand {
    /// Create a template
    New {
        name: String,

        /// Template body; `-` reads from stdin
        #[arg(long, default_value = "")]
        content: String,
    },
    /// List templates
    List,
}
