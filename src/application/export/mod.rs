//! Export use case
//!
//! One driver per [`ExportFormat`]. Drivers borrow the note collection (and the
//! tag tree, for tree-shaped formats) and return the number of items written.

pub mod bookmarks;
pub mod delimited;
pub mod favorites;
pub mod index;
pub mod notenik;
pub mod outline;
pub mod url_union;
pub mod xml;

use crate::domain::{Note, TagSpec, TagTree};
use crate::error::{NotepubError, Result};
use crate::infrastructure::markup::{Dialect, DocumentHead, MarkupWriter};
use crate::infrastructure::Config;
use std::fmt;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use std::str::FromStr;

pub use favorites::{FavoritesOptions, FavoritesReport};
pub use outline::OutlineOptions;

/// Every supported output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Native note files, one per note
    Notenik,
    TabDelimited,
    /// Tab-delimited `title#link`, tags, body
    TabDelimitedMsLinks,
    Xml,
    Opml,
    /// Nested HTML list of tags and notes
    HtmlOutline,
    /// Flat HTML definition list of notes
    UrlUnion,
    /// Netscape bookmark file
    Bookmarks,
    /// Column-paginated favorites pages
    Favorites,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 9] = [
        ExportFormat::Notenik,
        ExportFormat::TabDelimited,
        ExportFormat::TabDelimitedMsLinks,
        ExportFormat::Xml,
        ExportFormat::Opml,
        ExportFormat::HtmlOutline,
        ExportFormat::UrlUnion,
        ExportFormat::Bookmarks,
        ExportFormat::Favorites,
    ];

    /// Command-line name
    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::Notenik => "notenik",
            ExportFormat::TabDelimited => "tab",
            ExportFormat::TabDelimitedMsLinks => "tab-links",
            ExportFormat::Xml => "xml",
            ExportFormat::Opml => "opml",
            ExportFormat::HtmlOutline => "outline",
            ExportFormat::UrlUnion => "url-union",
            ExportFormat::Bookmarks => "bookmarks",
            ExportFormat::Favorites => "favorites",
        }
    }

    /// Human-readable name
    pub fn label(self) -> &'static str {
        match self {
            ExportFormat::Notenik => "Notenik",
            ExportFormat::TabDelimited => "Tab-Delimited",
            ExportFormat::TabDelimitedMsLinks => "Tab-Delimited (MS Links)",
            ExportFormat::Xml => "XML",
            ExportFormat::Opml => "OPML",
            ExportFormat::HtmlOutline => "Tags Outline",
            ExportFormat::UrlUnion => "URL Union",
            ExportFormat::Bookmarks => "Netscape Bookmarks",
            ExportFormat::Favorites => "Favorites",
        }
    }

    /// File (or folder) name used when publishing
    pub fn default_file_name(self) -> &'static str {
        match self {
            ExportFormat::Notenik => "notenik",
            ExportFormat::TabDelimited => "notes.tab",
            ExportFormat::TabDelimitedMsLinks => "links.tab",
            ExportFormat::Xml => "notes.xml",
            ExportFormat::Opml => "notes.opml",
            ExportFormat::HtmlOutline => "outline.html",
            ExportFormat::UrlUnion => "urls.html",
            ExportFormat::Bookmarks => "bookmarks.html",
            ExportFormat::Favorites => "favorites",
        }
    }

    /// Fixed caption shown on the index page
    pub fn caption(self) -> &'static str {
        match self {
            ExportFormat::Notenik => "Notes as individual Notenik text files",
            ExportFormat::TabDelimited => "All fields, one note per row, for spreadsheets",
            ExportFormat::TabDelimitedMsLinks => "Linked titles, tags and bodies for MS Office",
            ExportFormat::Xml => "All fields as XML",
            ExportFormat::Opml => "Tags and notes as an outline for outliners",
            ExportFormat::HtmlOutline => "Tags and notes as an expandable web outline",
            ExportFormat::UrlUnion => "Every note with its link, tags and text",
            ExportFormat::Bookmarks => "Links to import into a web browser",
            ExportFormat::Favorites => "Favorite links arranged in columns",
        }
    }

    /// Formats that write into a folder rather than a single file
    pub fn writes_folder(self) -> bool {
        matches!(self, ExportFormat::Notenik | ExportFormat::Favorites)
    }
}

impl FromStr for ExportFormat {
    type Err = NotepubError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        let format = match wanted.as_str() {
            "notenik" | "native" => ExportFormat::Notenik,
            "tab" | "tab-delimited" | "tsv" => ExportFormat::TabDelimited,
            "tab-links" | "ms-links" => ExportFormat::TabDelimitedMsLinks,
            "xml" => ExportFormat::Xml,
            "opml" => ExportFormat::Opml,
            "outline" | "html-outline" => ExportFormat::HtmlOutline,
            "url-union" | "urls" => ExportFormat::UrlUnion,
            "bookmarks" | "netscape" => ExportFormat::Bookmarks,
            "favorites" => ExportFormat::Favorites,
            _ => return Err(NotepubError::InvalidFormat(s.to_string())),
        };
        Ok(format)
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Options shared by all drivers
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Notes to export (None = all)
    pub select: Option<TagSpec>,
    /// Tags removed from exported notes
    pub suppress: Option<TagSpec>,
    /// Fields left out of exported notes
    pub omit_fields: Vec<String>,
    pub separator: char,
    /// Document title for markup formats
    pub title: String,
    pub stylesheet: Option<String>,
    pub outline: OutlineOptions,
    pub favorites: FavoritesOptions,
}

impl Default for ExportOptions {
    fn default() -> Self {
        ExportOptions {
            select: None,
            suppress: None,
            omit_fields: Vec::new(),
            separator: crate::domain::tags::DEFAULT_SEPARATOR,
            title: "Notes".to_string(),
            stylesheet: None,
            outline: OutlineOptions::default(),
            favorites: FavoritesOptions::default(),
        }
    }
}

impl ExportOptions {
    pub fn from_config(config: &Config) -> Self {
        let separator = config.tag_separator();
        ExportOptions {
            select: TagSpec::parse_optional(&config.export.select, separator),
            suppress: TagSpec::parse_optional(&config.export.suppress, separator),
            omit_fields: config.export.omit_fields.clone(),
            separator,
            title: config.publish.title.clone(),
            stylesheet: Some(config.publish.stylesheet.clone()).filter(|s| !s.trim().is_empty()),
            outline: OutlineOptions::default(),
            favorites: FavoritesOptions::from(&config.favorites),
        }
    }

    /// Replace the selection; blank input selects everything
    pub fn with_select(mut self, spec: &str) -> Self {
        self.select = TagSpec::parse_optional(spec, self.separator);
        self
    }

    /// Replace the suppression; blank input suppresses nothing
    pub fn with_suppress(mut self, spec: &str) -> Self {
        self.suppress = TagSpec::parse_optional(spec, self.separator);
        self
    }

    pub fn selects(&self, note: &Note) -> bool {
        self.select
            .as_ref()
            .is_none_or(|spec| spec.matches(note.tags()))
    }

    /// Indices of the notes passing the tag selection, in collection order
    pub fn select_notes(&self, notes: &[Note]) -> Vec<usize> {
        notes
            .iter()
            .enumerate()
            .filter(|(_, note)| self.selects(note))
            .map(|(index, _)| index)
            .collect()
    }

    /// A copy of the note with tag suppression and field omission applied
    pub fn prepare(&self, note: &Note) -> Note {
        let mut prepared = match &self.suppress {
            Some(spec) => note.with_tags(&spec.suppress(note.tags())),
            None => note.clone(),
        };
        if !self.omit_fields.is_empty() {
            prepared = prepared.without_fields(&self.omit_fields);
        }
        prepared
    }

    /// Tag tree of the selected notes
    pub fn tree(&self, notes: &[Note]) -> TagTree {
        TagTree::from_selected(notes, &self.select_notes(notes), self.separator)
    }

    pub fn head(&self, title: &str) -> DocumentHead {
        DocumentHead::new(title)
            .with_stylesheet(self.stylesheet.as_deref())
            .with_meta("generator", "notepub")
    }
}

/// What an export run produced
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExportOutcome {
    /// `count` notes were written
    Written { count: usize },
    /// No favorites tag matched; nothing was written
    NoFavorites { looked_for: Vec<String> },
}

impl ExportOutcome {
    pub fn count(&self) -> usize {
        match self {
            ExportOutcome::Written { count } => *count,
            ExportOutcome::NoFavorites { .. } => 0,
        }
    }
}

/// Runs a driver against a file or folder destination
pub struct ExportService<'a> {
    notes: &'a [Note],
    options: ExportOptions,
}

impl<'a> ExportService<'a> {
    pub fn new(notes: &'a [Note], options: ExportOptions) -> Self {
        ExportService { notes, options }
    }

    pub fn options(&self) -> &ExportOptions {
        &self.options
    }

    /// Export to `output` (a folder for Notenik and Favorites).
    ///
    /// Returns what was written and logs the outcome.
    pub fn export(&self, format: ExportFormat, output: &Path) -> Result<ExportOutcome> {
        match self.run(format, output) {
            Ok(outcome) => {
                if let ExportOutcome::Written { count } = outcome {
                    log::info!(
                        "Exported {} notes as {} to {}",
                        count,
                        format.label(),
                        output.display()
                    );
                }
                Ok(outcome)
            }
            Err(e) => {
                log::error!(
                    "{} export to {} failed: {}",
                    format.label(),
                    output.display(),
                    e
                );
                Err(e)
            }
        }
    }

    fn run(&self, format: ExportFormat, output: &Path) -> Result<ExportOutcome> {
        let notes = self.notes;
        let options = &self.options;

        let count = match format {
            ExportFormat::Notenik => notenik::write(notes, options, output)?,
            ExportFormat::TabDelimited => {
                let mut out = create_file(output)?;
                let count = delimited::write_tab_delimited(notes, options, &mut out)?;
                out.flush()?;
                count
            }
            ExportFormat::TabDelimitedMsLinks => {
                let mut out = create_file(output)?;
                let count = delimited::write_ms_links(notes, options, &mut out)?;
                out.flush()?;
                count
            }
            ExportFormat::Xml => {
                let mut out = MarkupWriter::create(output, Dialect::Xml)?;
                xml::write(notes, options, &mut out)?
            }
            ExportFormat::Opml => {
                let mut out = MarkupWriter::create(output, Dialect::Opml)?;
                outline::write_opml(&options.tree(notes), notes, options, &mut out)?
            }
            ExportFormat::HtmlOutline => {
                let mut out = MarkupWriter::create(output, Dialect::Html)?;
                outline::write_html(&options.tree(notes), notes, options, &mut out)?
            }
            ExportFormat::UrlUnion => {
                let mut out = MarkupWriter::create(output, Dialect::Html)?;
                url_union::write(notes, options, &mut out)?
            }
            ExportFormat::Bookmarks => {
                let mut out = MarkupWriter::create(output, Dialect::Bookmarks)?;
                bookmarks::write(&options.tree(notes), notes, options, &mut out)?
            }
            ExportFormat::Favorites => {
                let report = favorites::publish(&options.tree(notes), notes, options, output)?;
                if report.is_empty() {
                    return Ok(ExportOutcome::NoFavorites {
                        looked_for: options.favorites.tags.clone(),
                    });
                }
                report.notes
            }
        };
        Ok(ExportOutcome::Written { count })
    }
}

fn create_file(path: &Path) -> Result<BufWriter<File>> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(BufWriter::new(File::create(path)?))
}


#[cfg(test)]
mod tests {
    use super::test_support::note;
    use super::*;

    #[test]
    fn test_format_names_round_trip() {
        for format in ExportFormat::ALL {
            assert_eq!(format.name().parse::<ExportFormat>().unwrap(), format);
        }
        assert_eq!("OPML".parse::<ExportFormat>().unwrap(), ExportFormat::Opml);
        assert!(matches!(
            "docx".parse::<ExportFormat>(),
            Err(NotepubError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_no_selection_selects_all() {
        let notes = vec![note("A", "x"), note("B", ""), note("C", "y")];
        let options = ExportOptions::default().with_select("  ");
        assert_eq!(options.select_notes(&notes), vec![0, 1, 2]);
    }

    #[test]
    fn test_selection_matches_top_level_tags() {
        let notes = vec![
            note("A", "Work.Meetings"),
            note("B", "home"),
            note("C", "other, WORK"),
        ];
        let options = ExportOptions::default().with_select("work.projects");
        assert_eq!(options.select_notes(&notes), vec![0, 2]);
    }

    #[test]
    fn test_prepare_does_not_touch_source() {
        let notes = vec![note("A", "a.b").with_field("Secret", "s")];
        let mut options = ExportOptions::default().with_suppress("b");
        options.omit_fields = vec!["secret".to_string()];

        let prepared = options.prepare(&notes[0]);
        assert_eq!(prepared.tags(), "a");
        assert_eq!(prepared.get("Secret"), None);
        assert_eq!(notes[0].tags(), "a.b");
        assert_eq!(notes[0].get("Secret"), Some("s"));
    }

    #[test]
    fn test_tree_contains_only_selected_notes() {
        let notes = vec![note("A", "x"), note("B", "y")];
        let options = ExportOptions::default().with_select("y");
        let tree = options.tree(&notes);
        assert_eq!(tree.walk().count(), 2);
    }

    #[test]
    fn test_export_reports_missing_favorites() {
        let temp = tempfile::TempDir::new().unwrap();
        let notes = vec![note("A", "Work"), note("B", "Home")];
        let service = ExportService::new(&notes, ExportOptions::default());

        let outcome = service
            .export(ExportFormat::Favorites, &temp.path().join("favorites"))
            .unwrap();
        assert_eq!(
            outcome,
            ExportOutcome::NoFavorites {
                looked_for: vec!["Favorites".to_string()]
            }
        );
        assert_eq!(outcome.count(), 0);
        assert!(!temp.path().join("favorites").exists());

        let outcome = service
            .export(ExportFormat::TabDelimited, &temp.path().join("notes.tab"))
            .unwrap();
        assert_eq!(outcome, ExportOutcome::Written { count: 2 });
    }

    #[test]
    fn test_from_config() {
        let mut config = Config::default();
        config.export.select = "work".to_string();
        config.publish.stylesheet = "site.css".to_string();
        config.favorites.columns = 2;

        let options = ExportOptions::from_config(&config);
        assert!(options.select.is_some());
        assert!(options.suppress.is_none());
        assert_eq!(options.stylesheet.as_deref(), Some("site.css"));
        assert_eq!(options.favorites.columns, 2);
    }
}
