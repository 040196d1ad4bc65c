//! Error types for notepub

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for notepub
#[derive(Debug, Error)]
pub enum NotepubError {
    #[error("Not a notepub collection: {0}")]
    NotCollectionDirectory(PathBuf),

    #[error("Unknown export format: {0}")]
    InvalidFormat(String),

    #[error("Cannot read note {path}: {source}")]
    NoteRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Markup error: {0}")]
    Markup(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl NotepubError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            NotepubError::NotCollectionDirectory(_) => 2,
            NotepubError::InvalidFormat(_) => 3,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            NotepubError::NotCollectionDirectory(path) => {
                format!(
                    "Not a notepub collection: {}\n\n\
                    Suggestions:\n\
                    • Run 'notepub init' in your notes folder\n\
                    • Navigate to an existing collection\n\
                    • Set NOTEPUB_ROOT environment variable to your collection path",
                    path.display()
                )
            }
            NotepubError::InvalidFormat(name) => {
                format!(
                    "Unknown export format: '{}'\n\n\
                    Valid formats:\n\
                    • notenik, tab, tab-links, xml\n\
                    • opml, outline, bookmarks, url-union, favorites\n\n\
                    Example:\n\
                    notepub export opml notes.opml",
                    name
                )
            }
            NotepubError::Config(msg) => {
                if msg.contains("Unknown config key") {
                    format!(
                        "{}\n\n\
                        Valid keys: collection.tag_separator, export.select, export.suppress,\n\
                        favorites.tags, favorites.columns, favorites.max_rows,\n\
                        publish.title, publish.index_file, publish.stylesheet",
                        msg
                    )
                } else if msg.contains("columns") {
                    format!(
                        "{}\n\n\
                        Favorites columns must be between 1 and 6\n\
                        Example: notepub config favorites.columns 4",
                        msg
                    )
                } else {
                    msg.clone()
                }
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using NotepubError
pub type Result<T> = std::result::Result<T, NotepubError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_collection_directory_suggestion() {
        let err = NotepubError::NotCollectionDirectory(PathBuf::from("/tmp/test"));
        let msg = err.display_with_suggestions();
        assert!(msg.contains("notepub init"));
        assert!(msg.contains("NOTEPUB_ROOT"));
        assert!(msg.contains("Suggestions"));
    }

    #[test]
    fn test_invalid_format_lists_formats() {
        let err = NotepubError::InvalidFormat("docx".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("'docx'"));
        assert!(msg.contains("opml"));
        assert!(msg.contains("notepub export"));
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn test_config_unknown_key_suggestions() {
        let err = NotepubError::Config("Unknown config key: colour".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("favorites.columns"));
        assert!(msg.contains("export.suppress"));
    }

    #[test]
    fn test_config_columns_suggestions() {
        let err = NotepubError::Config("Invalid columns value: 9".to_string());
        let msg = err.display_with_suggestions();
        assert!(msg.contains("between 1 and 6"));
    }

    #[test]
    fn test_other_errors_fallback() {
        let err = NotepubError::Markup("document already closed".to_string());
        let msg = err.display_with_suggestions();
        assert_eq!(msg, "Markup error: document already closed");
        assert_eq!(err.exit_code(), 1);
    }
}
