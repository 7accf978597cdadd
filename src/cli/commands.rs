//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "babyjournal")]
#[command(about = "Photo journal for a child's milestones", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new journal
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Storage backend (local, sheet)
        #[arg(short, long, default_value = "local")]
        backend: String,
    },

    /// Show or set the baby profile
    Profile {
        /// Child's name
        #[arg(long)]
        name: Option<String>,

        /// Birth date (YYYY-MM-DD)
        #[arg(long)]
        birth_date: Option<String>,
    },

    /// Add a journal entry
    Add {
        /// Date the moment happened (today, yesterday, YYYY-MM-DD)
        #[arg(short, long, default_value = "today")]
        date: String,

        /// Free text notes
        #[arg(short, long)]
        notes: Option<String>,

        /// Tag to attach (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Photo file to attach (repeatable)
        #[arg(short, long = "photo")]
        photos: Vec<PathBuf>,
    },

    /// Edit an existing entry
    Edit {
        /// Entry id
        id: String,

        /// New date
        #[arg(short, long)]
        date: Option<String>,

        /// Replacement notes
        #[arg(short, long)]
        notes: Option<String>,

        /// Replacement tags (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Remove all tags
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,

        /// Photo file to add (repeatable)
        #[arg(short, long = "photo")]
        photos: Vec<PathBuf>,

        /// Id of a stored photo to remove (repeatable)
        #[arg(long = "drop-photo")]
        drop_photos: Vec<String>,
    },

    /// Delete an entry
    Delete {
        /// Entry id
        id: String,
    },

    /// Show one entry in full
    Show {
        /// Entry id
        id: String,
    },

    /// List entries, optionally filtered
    List {
        /// Text to look for in notes (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Only entries with this tag
        #[arg(short, long)]
        tag: Option<String>,

        /// Only entries captured at this age in years
        #[arg(short, long)]
        age_year: Option<u32>,
    },

    /// Show the tags and ages available for filtering
    Facets,

    /// List known tags or add one
    Tags {
        /// Tag to add
        #[arg(long)]
        add: Option<String>,
    },

    /// Show the child's age today or on a given date
    Age {
        /// Date to compute the age for (default: today)
        date: Option<String>,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },
}
