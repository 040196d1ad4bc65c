//! Configuration management

use crate::error::{NotepubError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the per-collection settings directory
pub const CONFIG_DIR: &str = ".notepub";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub collection: CollectionConfig,
    pub export: ExportConfig,
    pub favorites: FavoritesConfig,
    pub publish: PublishConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollectionConfig {
    /// Separator between tags in a tag string
    pub tag_separator: String,
}

impl Default for CollectionConfig {
    fn default() -> Self {
        CollectionConfig {
            tag_separator: ",".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ExportConfig {
    /// Tag specification selecting notes to export (blank = all)
    pub select: String,
    /// Tag specification removed from exported tags
    pub suppress: String,
    /// Fields left out of exported notes
    pub omit_fields: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FavoritesConfig {
    /// Top-level tags whose notes are published as favorites
    pub tags: Vec<String>,
    pub columns: usize,
    pub max_rows: usize,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        FavoritesConfig {
            tags: vec!["Favorites".to_string()],
            columns: 4,
            max_rows: 30,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PublishConfig {
    pub title: String,
    pub index_file: String,
    /// Stylesheet linked from generated HTML pages (blank = none)
    pub stylesheet: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        PublishConfig {
            title: "Notes".to_string(),
            index_file: "index.html".to_string(),
            stylesheet: String::new(),
        }
    }
}

impl Config {
    /// Load config from .notepub/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(CONFIG_DIR).join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                NotepubError::NotCollectionDirectory(path.to_path_buf())
            } else {
                NotepubError::Io(e)
            }
        })?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| NotepubError::Config(format!("Failed to parse config.toml: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to .notepub/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let config_dir = path.join(CONFIG_DIR);
        let config_path = config_dir.join("config.toml");

        if !config_dir.exists() {
            fs::create_dir(&config_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(&config_path, contents)?;

        Ok(())
    }

    /// The configured tag separator as a single character
    pub fn tag_separator(&self) -> char {
        self.collection.tag_separator.chars().next().unwrap_or(',')
    }

    pub fn validate(&self) -> Result<()> {
        let separator = &self.collection.tag_separator;
        if separator.chars().count() != 1 || separator == "." {
            return Err(NotepubError::Config(format!(
                "Invalid tag separator: '{}' (use a single character other than '.')",
                separator
            )));
        }
        if !(1..=6).contains(&self.favorites.columns) {
            return Err(NotepubError::Config(format!(
                "Invalid columns value: {}",
                self.favorites.columns
            )));
        }
        if self.favorites.max_rows == 0 {
            return Err(NotepubError::Config(
                "Invalid max_rows value: 0 (must be at least 1)".to_string(),
            ));
        }
        Ok(())
    }

    /// Read a value by dotted key
    pub fn get(&self, key: &str) -> Result<String> {
        let value = match key {
            "collection.tag_separator" => self.collection.tag_separator.clone(),
            "export.select" => self.export.select.clone(),
            "export.suppress" => self.export.suppress.clone(),
            "export.omit_fields" => self.export.omit_fields.join(", "),
            "favorites.tags" => self.favorites.tags.join(", "),
            "favorites.columns" => self.favorites.columns.to_string(),
            "favorites.max_rows" => self.favorites.max_rows.to_string(),
            "publish.title" => self.publish.title.clone(),
            "publish.index_file" => self.publish.index_file.clone(),
            "publish.stylesheet" => self.publish.stylesheet.clone(),
            _ => return Err(NotepubError::Config(format!("Unknown config key: {}", key))),
        };
        Ok(value)
    }

    /// Set a value by dotted key; list values are comma separated
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut updated = self.clone();
        match key {
            "collection.tag_separator" => updated.collection.tag_separator = value.to_string(),
            "export.select" => updated.export.select = value.to_string(),
            "export.suppress" => updated.export.suppress = value.to_string(),
            "export.omit_fields" => updated.export.omit_fields = split_list(value),
            "favorites.tags" => updated.favorites.tags = split_list(value),
            "favorites.columns" => updated.favorites.columns = parse_number(key, value)?,
            "favorites.max_rows" => updated.favorites.max_rows = parse_number(key, value)?,
            "publish.title" => updated.publish.title = value.to_string(),
            "publish.index_file" => updated.publish.index_file = value.to_string(),
            "publish.stylesheet" => updated.publish.stylesheet = value.to_string(),
            _ => return Err(NotepubError::Config(format!("Unknown config key: {}", key))),
        }
        updated.validate()?;
        *self = updated;
        Ok(())
    }

    /// All keys with their current values, in display order
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        const KEYS: [&str; 10] = [
            "collection.tag_separator",
            "export.select",
            "export.suppress",
            "export.omit_fields",
            "favorites.tags",
            "favorites.columns",
            "favorites.max_rows",
            "publish.title",
            "publish.index_file",
            "publish.stylesheet",
        ];
        KEYS.iter()
            .filter_map(|key| self.get(key).ok().map(|value| (*key, value)))
            .collect()
    }
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_number(key: &str, value: &str) -> Result<usize> {
    value.trim().parse().map_err(|_| {
        let field = key.rsplit('.').next().unwrap_or(key);
        NotepubError::Config(format!("Invalid {} value: {}", field, value))
    })
}
