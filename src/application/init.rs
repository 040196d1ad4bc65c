//! Initialize collection use case

use crate::error::Result;
use crate::infrastructure::{Config, FileSystemRepository, NoteRepository};
use std::fs;
use std::path::Path;

/// Turn `path` into a note collection with a default configuration.
pub fn init(path: &Path) -> Result<()> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;
    repo.save_config(&Config::default())?;

    log::info!("Initialized collection at {}", path.display());
    println!("Initialized notepub collection at {}", path.display());
    Ok(())
}
