//! Notes as ordered field collections

use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

/// Well-known field names
pub mod fields {
    pub const TITLE: &str = "Title";
    pub const LINK: &str = "Link";
    pub const TAGS: &str = "Tags";
    pub const BODY: &str = "Body";
    pub const DATE_ADDED: &str = "Date Added";
    pub const AUTHOR: &str = "Author";
    pub const WORK_TITLE: &str = "Work Title";
}

/// Maximum length of the one-line teaser taken from a note body
const TEASER_LEN: usize = 200;

/// Normalize a field name for lookup: case-insensitive, ignoring spaces,
/// underscores and hyphens ("Date Added" == "date_added" == "DateAdded").
pub fn normalize_field_name(name: &str) -> String {
    name.chars()
        .filter(|c| !matches!(c, ' ' | '_' | '-'))
        .flat_map(|c| c.to_lowercase())
        .collect()
}

/// A single named field value
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub name: String,
    pub value: String,
}

/// A note: an ordered mapping of field names to string values
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Note {
    fields: Vec<Field>,
    modified: Option<DateTime<Utc>>,
    source: Option<PathBuf>,
}

impl Note {
    /// Create an empty note
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field assignment
    pub fn with_field(mut self, name: &str, value: &str) -> Self {
        self.set(name, value);
        self
    }

    /// Builder-style modification timestamp
    pub fn with_modified(mut self, modified: DateTime<Utc>) -> Self {
        self.modified = Some(modified);
        self
    }

    /// Record the file this note was read from
    pub fn with_source(mut self, source: PathBuf) -> Self {
        self.source = Some(source);
        self
    }

    /// Set a field, replacing an existing value with the same (normalized) name
    /// or appending a new field at the end.
    pub fn set(&mut self, name: &str, value: &str) {
        let key = normalize_field_name(name);
        match self
            .fields
            .iter_mut()
            .find(|f| normalize_field_name(&f.name) == key)
        {
            Some(field) => field.value = value.to_string(),
            None => self.fields.push(Field {
                name: name.to_string(),
                value: value.to_string(),
            }),
        }
    }

    /// Look up a field value by name
    pub fn get(&self, name: &str) -> Option<&str> {
        let key = normalize_field_name(name);
        self.fields
            .iter()
            .find(|f| normalize_field_name(&f.name) == key)
            .map(|f| f.value.as_str())
    }

    /// Fields in their original order
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn title(&self) -> &str {
        self.get(fields::TITLE).unwrap_or_default()
    }

    pub fn link(&self) -> &str {
        self.get(fields::LINK).unwrap_or_default()
    }

    pub fn tags(&self) -> &str {
        self.get(fields::TAGS).unwrap_or_default()
    }

    pub fn body(&self) -> &str {
        self.get(fields::BODY).unwrap_or_default()
    }

    pub fn date_added(&self) -> Option<&str> {
        self.get(fields::DATE_ADDED).filter(|v| !v.trim().is_empty())
    }

    pub fn modified(&self) -> Option<DateTime<Utc>> {
        self.modified
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    /// First non-empty line of the body, shortened for one-line display
    pub fn teaser(&self) -> String {
        let line = self
            .body()
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .unwrap_or_default();

        if line.chars().count() <= TEASER_LEN {
            return line.to_string();
        }

        let mut short: String = line.chars().take(TEASER_LEN).collect();
        short.push_str("...");
        short
    }

    /// A copy of this note with the tags field replaced
    pub fn with_tags(&self, tags: &str) -> Note {
        let mut copy = self.clone();
        copy.set(fields::TAGS, tags);
        copy
    }

    /// A copy of this note without the named fields
    pub fn without_fields(&self, omit: &[String]) -> Note {
        let omit: Vec<String> = omit.iter().map(|n| normalize_field_name(n)).collect();
        let mut copy = self.clone();
        copy.fields
            .retain(|f| !omit.contains(&normalize_field_name(&f.name)));
        copy
    }
}
