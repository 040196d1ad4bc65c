//! Config management use case

use crate::error::Result;
use crate::infrastructure::{FileSystemRepository, NoteRepository};

/// Service for reading and updating collection configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value by dotted key
    pub fn get(&self, key: &str) -> Result<String> {
        self.repository.load_config()?.get(key)
    }

    /// Set a config value; the file is only rewritten if the result is valid
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;
        config.set(key, value)?;
        self.repository.save_config(&config)?;
        log::debug!("Set {} = {}", key, value);
        Ok(())
    }

    /// All keys with their current values
    pub fn list(&self) -> Result<Vec<(&'static str, String)>> {
        Ok(self.repository.load_config()?.entries())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::init::init;
    use tempfile::TempDir;

    fn service(temp: &TempDir) -> ConfigService {
        init(temp.path()).unwrap();
        ConfigService::new(FileSystemRepository::new(temp.path().to_path_buf()))
    }

    #[test]
    fn test_set_then_get() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        service.set("favorites.columns", "2").unwrap();
        assert_eq!(service.get("favorites.columns").unwrap(), "2");

        let reloaded = ConfigService::new(FileSystemRepository::new(temp.path().to_path_buf()));
        assert_eq!(reloaded.get("favorites.columns").unwrap(), "2");
    }

    #[test]
    fn test_invalid_value_is_not_saved() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);

        assert!(service.set("favorites.columns", "9").is_err());
        assert_eq!(service.get("favorites.columns").unwrap(), "4");
    }

    #[test]
    fn test_unknown_key() {
        let temp = TempDir::new().unwrap();
        let service = service(&temp);
        assert!(service.get("nope").is_err());
        assert!(service.set("nope", "x").is_err());
    }

    #[test]
    fn test_list_has_every_key() {
        let temp = TempDir::new().unwrap();
        let entries = service(&temp).list().unwrap();
        assert_eq!(entries.len(), 10);
        assert_eq!(entries[0], ("collection.tag_separator", ",".to_string()));
    }
}
