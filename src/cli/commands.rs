//! CLI command definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "notepub")]
#[command(about = "Export and publish tagged note collections", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize a new collection
    Init {
        /// Directory to initialize (default: current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// View or modify configuration
    Config {
        /// Config key to get or set (e.g. favorites.columns)
        key: Option<String>,

        /// Value to set (if provided, sets the key)
        value: Option<String>,

        /// List all configuration
        #[arg(short, long)]
        list: bool,
    },

    /// Show the tag tree of the collection
    Tags,

    /// Export notes in one format
    Export {
        /// notenik, tab, tab-links, xml, opml, outline, url-union, bookmarks, favorites
        #[arg(value_name = "FORMAT")]
        format: String,

        /// Output file (a folder for notenik and favorites)
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Only export notes carrying one of these tags (overrides export.select)
        #[arg(long, value_name = "TAGS")]
        select: Option<String>,

        /// Remove these tags from exported notes (overrides export.suppress)
        #[arg(long, value_name = "TAGS")]
        suppress: Option<String>,
    },

    /// Publish favorites, outlines, bookmarks and data files with an index page
    Publish {
        /// Destination folder (default: public/ inside the collection)
        #[arg(value_name = "DEST")]
        dest: Option<PathBuf>,
    },
}
