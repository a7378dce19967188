use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "snipz", version)]
#[command(about = "Keep short text snippets, credentials and templates at hand", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $SNIPZ_DATA_DIR, then the platform data dir)
    #[arg(long, global = true, value_name = "DIR")]
    pub data_dir: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List snippets
    #[command(alias = "ls")]
    List {
        /// Only snippets whose label or text contains this (case-insensitive)
        #[arg(short, long)]
        search: Option<String>,

        /// Only snippets in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Only snippets with this tag
        #[arg(short, long)]
        tag: Option<String>,
    },

    /// Show one or more snippets in full
    #[command(alias = "v")]
    Show {
        /// Snippets to show (e.g. 1 3-5 or a UUID)
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,

        /// Do not mask credential values
        #[arg(long)]
        reveal: bool,
    },

    /// Add a snippet
    #[command(alias = "n")]
    Add {
        /// Snippet text
        text: String,

        /// Category label
        #[arg(short, long, default_value = "")]
        label: String,

        /// Tag (repeatable)
        #[arg(short, long = "tag")]
        tags: Vec<String>,

        /// Mark as markdown
        #[arg(long)]
        markdown: bool,

        /// Mark as template
        #[arg(long)]
        template: bool,
    },

    /// Create a new snippet from a template
    Use {
        /// The template snippet
        selector: String,
    },

    /// Update fields of one or more snippets
    Update {
        /// Snippets to update (e.g. 1 3-5 or a UUID)
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,

        /// New text
        #[arg(long)]
        text: Option<String>,

        /// New category label
        #[arg(short, long)]
        label: Option<String>,

        /// Replace all tags (comma separated)
        #[arg(long, value_delimiter = ',')]
        tags: Option<Vec<String>>,

        /// Set the markdown flag
        #[arg(long)]
        markdown: Option<bool>,

        /// Set the template flag
        #[arg(long)]
        template: Option<bool>,
    },

    /// Delete one or more snippets
    #[command(alias = "rm")]
    Delete {
        /// Snippets to delete (e.g. 1 3-5 or a UUID)
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// Add or remove a tag
    Tag {
        #[command(subcommand)]
        action: TagAction,
    },

    /// Toggle the markdown or template flag
    Toggle {
        flag: ToggleFlag,

        /// Snippets to toggle (e.g. 1 3-5 or a UUID)
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },

    /// List every tag in use
    Tags,

    /// List template snippets
    Templates,

    /// Import snippets from a .json file or a text file (one per line)
    Import {
        path: PathBuf,

        /// Only show what would be imported
        #[arg(long)]
        dry_run: bool,
    },

    /// Export snippets to a .txt, .html or .md file
    Export {
        path: PathBuf,

        /// Output format (txt, html, md); defaults to the file extension
        #[arg(short, long)]
        format: Option<String>,

        /// Snippets to export (all when omitted)
        selectors: Vec<String>,
    },

    /// Mask credential values in text (reads stdin when no text is given)
    Mask { text: Option<String> },

    /// Generate a random password
    Genpass {
        /// Password length (8-64)
        #[arg(short, long)]
        length: Option<usize>,

        /// No uppercase letters
        #[arg(long)]
        no_uppercase: bool,

        /// No digits
        #[arg(long)]
        no_digits: bool,

        /// No special characters
        #[arg(long)]
        no_special: bool,

        /// Include at least one character of every enabled kind
        #[arg(long)]
        strict: bool,
    },

    /// Manage categories
    Category {
        #[command(subcommand)]
        action: Option<CategoryAction>,
    },

    /// Get or set configuration
    Config {
        /// Configuration key (e.g. password_length)
        key: Option<String>,

        /// Value to set (if omitted, prints current value)
        value: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TagAction {
    /// Add a tag to snippets
    Add {
        tag: String,
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },
    /// Remove a tag from snippets
    Remove {
        tag: String,
        #[arg(required = true, num_args = 1..)]
        selectors: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum CategoryAction {
    /// List categories and their colors
    List,
    /// Add a category or change its color
    Set { name: String, color: String },
    /// Rename a category and relabel its snippets
    Rename { old: String, new: String },
    /// Delete a category; its snippets move to "default"
    Delete { name: String },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ToggleFlag {
    Markdown,
    Template,
}
