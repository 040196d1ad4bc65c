//! Field-mapped export records
//!
//! An export schema is the union of the source fields of the exported notes,
//! in order of first appearance, followed by computed display fields. Each
//! exported note is projected onto the schema as an [`ExportRecord`].

use super::html::{escape_text, markdown_to_html};
use super::note::{fields, normalize_field_name, Note};

/// Computed field: the body rendered from markdown to HTML
pub const BODY_HTML: &str = "Body as HTML";
/// Computed field: the author written "Last, First"
pub const AUTHOR_LAST_FIRST: &str = "Author Last Name First";
/// Computed field: the work title wrapped in a citation element
pub const WORK_HTML: &str = "Work HTML";

/// An ordered list of field names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordSchema {
    names: Vec<String>,
}

impl RecordSchema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field name unless an equivalent one is already present
    pub fn push(&mut self, name: &str) {
        if !self.contains(name) {
            self.names.push(name.to_string());
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        let key = normalize_field_name(name);
        self.names
            .iter()
            .position(|n| normalize_field_name(n) == key)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Union of the fields of the given notes, in order of first appearance
    pub fn from_notes<'a>(notes: impl IntoIterator<Item = &'a Note>) -> Self {
        let mut schema = Self::new();
        for note in notes {
            for field in note.fields() {
                schema.push(&field.name);
            }
        }
        schema
    }

    /// Source schema plus the computed display fields
    pub fn for_export<'a>(notes: impl IntoIterator<Item = &'a Note>) -> Self {
        let mut schema = Self::from_notes(notes);
        let has_author = schema.contains(fields::AUTHOR);
        let has_work = schema.contains(fields::WORK_TITLE);

        schema.push(BODY_HTML);
        if has_author {
            schema.push(AUTHOR_LAST_FIRST);
        }
        if has_work {
            schema.push(WORK_HTML);
        }
        schema
    }
}

/// A note projected onto an export schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord<'s> {
    schema: &'s RecordSchema,
    values: Vec<String>,
}

impl<'s> ExportRecord<'s> {
    /// Project a note onto the schema, computing derived fields
    pub fn project(note: &Note, schema: &'s RecordSchema) -> Self {
        let values = schema
            .names()
            .iter()
            .map(|name| match name.as_str() {
                BODY_HTML => markdown_to_html(note.body()),
                AUTHOR_LAST_FIRST => {
                    author_last_name_first(note.get(fields::AUTHOR).unwrap_or_default())
                }
                WORK_HTML => match note.get(fields::WORK_TITLE) {
                    Some(work) if !work.trim().is_empty() => {
                        format!("<cite>{}</cite>", escape_text(work.trim()))
                    }
                    _ => String::new(),
                },
                _ => note.get(name).unwrap_or_default().to_string(),
            })
            .collect();

        ExportRecord { schema, values }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.schema
            .position(name)
            .map(|index| self.values[index].as_str())
    }

    /// (name, value) pairs in schema order
    pub fn iter<'a>(&'a self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        let names: &'a [String] = self.schema.names();
        names
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().map(String::as_str))
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }
}

/// "Herb Bowie" -> "Bowie, Herb"; names already containing a comma are kept.
pub fn author_last_name_first(author: &str) -> String {
    let author = author.trim();
    if author.contains(',') {
        return author.to_string();
    }

    match author.rsplit_once(' ') {
        Some((first, last)) => format!("{}, {}", last.trim(), first.trim()),
        None => author.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_union_first_appearance() {
        let notes = vec![
            Note::new().with_field("Title", "A").with_field("Tags", "x"),
            Note::new()
                .with_field("Title", "B")
                .with_field("Link", "https://b")
                .with_field("tags", "y"),
        ];
        let schema = RecordSchema::from_notes(&notes);
        assert_eq!(schema.names(), &["Title", "Tags", "Link"]);
    }

    #[test]
    fn test_export_schema_adds_computed_fields() {
        let plain = vec![Note::new().with_field("Title", "A")];
        assert_eq!(
            RecordSchema::for_export(&plain).names(),
            &["Title", BODY_HTML]
        );

        let literary = vec![Note::new()
            .with_field("Title", "A")
            .with_field("Author", "Mark Twain")
            .with_field("Work Title", "Roughing It")];
        assert_eq!(
            RecordSchema::for_export(&literary).names(),
            &["Title", "Author", "Work Title", BODY_HTML, AUTHOR_LAST_FIRST, WORK_HTML]
        );
    }

    #[test]
    fn test_projection_fills_missing_and_computed_values() {
        let notes = vec![
            Note::new()
                .with_field("Title", "A")
                .with_field("Author", "Mark Twain")
                .with_field("Body", "Hello *world*"),
            Note::new().with_field("Title", "B"),
        ];
        let schema = RecordSchema::for_export(&notes);

        let first = ExportRecord::project(&notes[0], &schema);
        assert_eq!(first.get(AUTHOR_LAST_FIRST), Some("Twain, Mark"));
        assert_eq!(first.get(BODY_HTML), Some("<p>Hello <em>world</em></p>\n"));

        let second = ExportRecord::project(&notes[1], &schema);
        assert_eq!(second.get("author"), Some(""));
        assert_eq!(second.values().len(), schema.len());
        assert_eq!(second.get("Missing"), None);
    }

    #[test]
    fn test_author_last_name_first() {
        assert_eq!(author_last_name_first("Herb Bowie"), "Bowie, Herb");
        assert_eq!(author_last_name_first("Bowie, Herb"), "Bowie, Herb");
        assert_eq!(author_last_name_first("Plato"), "Plato");
    }
}
