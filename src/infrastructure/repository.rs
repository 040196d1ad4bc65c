//! File system repository

use super::config::CONFIG_DIR;
use super::note_file::{format_note, note_file_name, parse_note};
use crate::domain::Note;
use crate::error::{NotepubError, Result};
use crate::infrastructure::Config;
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// File extensions read as notes
const NOTE_EXTENSIONS: [&str; 4] = ["txt", "md", "markdown", "text"];

/// Abstract repository for collection operations
pub trait NoteRepository {
    /// Get the root directory of this repository
    fn root(&self) -> &Path;

    /// Load configuration from .notepub/config.toml
    fn load_config(&self) -> Result<Config>;

    /// Save configuration to .notepub/config.toml
    fn save_config(&self, config: &Config) -> Result<()>;

    /// Check if .notepub directory exists
    fn is_initialized(&self) -> bool;

    /// Create .notepub directory structure
    fn initialize(&self) -> Result<()>;
}

/// File system implementation of NoteRepository
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    /// Create a new repository with the given root directory
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Discover collection root by walking up from current directory
    /// First checks NOTEPUB_ROOT environment variable, then falls back to discovery
    pub fn discover() -> Result<Self> {
        if let Ok(root_path) = std::env::var("NOTEPUB_ROOT") {
            let path = PathBuf::from(root_path);
            if Self::has_config_dir(&path) {
                return Ok(FileSystemRepository::new(path));
            } else {
                return Err(NotepubError::Config(format!(
                    "NOTEPUB_ROOT is set to '{}' but no .notepub directory found. \
                    Run 'notepub init' in that directory or unset NOTEPUB_ROOT.",
                    path.display()
                )));
            }
        }

        let current_dir = std::env::current_dir()?;
        Self::discover_from(&current_dir)
    }

    /// Discover collection root by walking up from a specific starting directory
    pub fn discover_from(start: &Path) -> Result<Self> {
        let mut current = start.to_path_buf();

        loop {
            if Self::has_config_dir(&current) {
                return Ok(FileSystemRepository::new(current));
            }

            match current.parent() {
                Some(parent) => current = parent.to_path_buf(),
                None => return Err(NotepubError::NotCollectionDirectory(start.to_path_buf())),
            }
        }
    }

    fn has_config_dir(path: &Path) -> bool {
        path.join(CONFIG_DIR).is_dir()
    }
}

impl NoteRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        Self::has_config_dir(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        let config_dir = self.root.join(CONFIG_DIR);

        if config_dir.exists() {
            return Err(NotepubError::Config(format!(
                "Directory already initialized: {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(&config_dir)?;
        Ok(())
    }
}

// Note operations (not part of trait - filesystem-specific)
impl FileSystemRepository {
    /// Paths of all note files below the root, sorted by file name.
    /// Hidden directories (including .notepub) are skipped.
    pub fn note_paths(&self) -> Vec<PathBuf> {
        let walker = WalkDir::new(&self.root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                if entry.depth() == 0 || !entry.file_type().is_dir() {
                    return true;
                }
                entry
                    .file_name()
                    .to_str()
                    .is_none_or(|name| !name.starts_with('.'))
            });

        walker
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_type().is_file())
            .map(|entry| entry.into_path())
            .filter(|path| is_note_file(path))
            .collect()
    }

    /// Load every readable note. Unreadable files are logged and skipped.
    pub fn load_notes(&self) -> Vec<Note> {
        let mut notes = Vec::new();
        for path in self.note_paths() {
            match read_note_file(&path) {
                Ok(note) => notes.push(note),
                Err(e) => log::warn!("Skipping note: {}", e),
            }
        }
        log::debug!("Loaded {} notes from {}", notes.len(), self.root.display());
        notes
    }
}

fn is_note_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| NOTE_EXTENSIONS.contains(&ext.to_lowercase().as_str()))
}

/// Read and parse one note file
pub fn read_note_file(path: &Path) -> Result<Note> {
    let read_error = |source| NotepubError::NoteRead {
        path: path.to_path_buf(),
        source,
    };

    let text = fs::read_to_string(path).map_err(read_error)?;
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("untitled");

    let mut note = parse_note(&text, stem).with_source(path.to_path_buf());
    if let Ok(modified) = fs::metadata(path).and_then(|m| m.modified()) {
        note = note.with_modified(DateTime::<Utc>::from(modified));
    }
    Ok(note)
}

/// Writes note files into one folder, keeping file names unique
pub struct NoteFileWriter {
    dir: PathBuf,
    used: HashSet<String>,
}

impl NoteFileWriter {
    /// Create the destination folder if needed
    pub fn create(dir: &Path) -> Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(NoteFileWriter {
            dir: dir.to_path_buf(),
            used: HashSet::new(),
        })
    }

    /// Write one note, returning the path written
    pub fn write(&mut self, note: &Note) -> Result<PathBuf> {
        let base = note_file_name(note.title());
        let mut name = base.clone();
        let mut counter = 2;
        while !self.used.insert(name.to_lowercase()) {
            let stem = base.trim_end_matches(".txt");
            name = format!("{} {}.txt", stem, counter);
            counter += 1;
        }

        let path = self.dir.join(&name);
        fs::write(&path, format_note(note))?;
        Ok(path)
    }
}
