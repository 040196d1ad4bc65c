//! Favorites pages
//!
//! Every top-level tag named in the favorites options becomes one HTML page.
//! Tags nested beneath it become sections, and the sections are dealt into
//! fixed-width columns of at most `max_rows` lines each (a heading counts as
//! two lines, a note as one). Sections are never split: one that is taller
//! than a column simply overflows it.

use super::outline::write_title;
use super::ExportOptions;
use crate::domain::tags::{NodeId, NodeKind, TagTree};
use crate::domain::Note;
use crate::error::{NotepubError, Result};
use crate::infrastructure::config::FavoritesConfig;
use crate::infrastructure::markup::{Dialect, MarkupWriter};
use crate::infrastructure::note_file::safe_file_stem;
use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};

pub const MAX_COLUMNS: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesOptions {
    /// Top-level tag names, matched case-insensitively
    pub tags: Vec<String>,
    pub columns: usize,
    pub max_rows: usize,
}

impl Default for FavoritesOptions {
    fn default() -> Self {
        FavoritesOptions {
            tags: vec!["Favorites".to_string()],
            columns: 4,
            max_rows: 30,
        }
    }
}

impl From<&FavoritesConfig> for FavoritesOptions {
    fn from(config: &FavoritesConfig) -> Self {
        FavoritesOptions {
            tags: config.tags.clone(),
            columns: config.columns.clamp(1, MAX_COLUMNS),
            max_rows: config.max_rows.max(1),
        }
    }
}

impl FavoritesOptions {
    pub fn new(tags: Vec<String>, columns: usize, max_rows: usize) -> Result<Self> {
        if !(1..=MAX_COLUMNS).contains(&columns) {
            return Err(NotepubError::Config(format!(
                "Favorites columns must be between 1 and {}, got {}",
                MAX_COLUMNS, columns
            )));
        }
        if max_rows == 0 {
            return Err(NotepubError::Config(
                "Favorites max rows must be at least 1".to_string(),
            ));
        }
        Ok(FavoritesOptions {
            tags,
            columns,
            max_rows,
        })
    }

    pub fn is_favorite(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.trim().eq_ignore_ascii_case(tag))
    }

    /// Width class for one column
    pub fn column_class(&self) -> &'static str {
        match self.columns {
            1 => "col-12",
            2 => "col-6",
            3 => "col-4",
            4 => "col-3",
            _ => "col-2",
        }
    }

    /// Five columns of `col-2` leave room for one more on a 12-unit grid
    pub fn has_filler(&self) -> bool {
        self.columns == 5
    }
}

/// Notes grouped under one nested tag of a favorites page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteSection {
    /// Empty for notes tagged directly with the favorites tag
    pub heading: String,
    /// Depth below the favorites tag
    pub level: usize,
    pub notes: Vec<usize>,
}

impl FavoriteSection {
    pub fn line_count(&self) -> usize {
        let heading = if self.heading.is_empty() { 0 } else { 2 };
        heading + self.notes.len()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoritesPage {
    /// Favorites tag as spelled in the tree
    pub tag: String,
    pub sections: Vec<FavoriteSection>,
}

impl FavoritesPage {
    /// Lowercased tag with path separators and other unsafe characters
    /// replaced, so the page always lands directly in the output folder
    pub fn file_name(&self) -> String {
        let stem = safe_file_stem(&self.tag.to_lowercase());
        if stem.is_empty() {
            "favorites.html".to_string()
        } else {
            format!("{}.html", stem)
        }
    }

    pub fn note_count(&self) -> usize {
        self.sections.iter().map(|s| s.notes.len()).sum()
    }
}

/// One page file written by [`publish`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenPage {
    pub tag: String,
    pub path: PathBuf,
    pub notes: usize,
}

/// Pages written by [`publish`]; no pages means no favorites tag was found
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoritesReport {
    pub pages: Vec<WrittenPage>,
    pub notes: usize,
}

impl FavoritesReport {
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

struct PageBuilder {
    page: FavoritesPage,
    level: usize,
    sections: HashMap<NodeId, usize>,
}

impl PageBuilder {
    fn section_for(&mut self, tag: NodeId) -> usize {
        if let Some(&index) = self.sections.get(&tag) {
            return index;
        }
        let index = self.page.sections.len();
        self.page.sections.push(FavoriteSection {
            heading: String::new(),
            level: 0,
            notes: Vec::new(),
        });
        self.sections.insert(tag, index);
        index
    }
}

/// Sections of every favorites page, in tree order
pub fn collect_pages(tree: &TagTree, options: &FavoritesOptions) -> Vec<FavoritesPage> {
    let mut pages = Vec::new();
    let mut current: Option<PageBuilder> = None;

    for id in tree.walk() {
        let node = tree.node(id);

        if current.as_ref().is_some_and(|b| node.level <= b.level) {
            if let Some(builder) = current.take() {
                pages.push(builder.page);
            }
        }

        match &node.kind {
            NodeKind::Root => {}
            NodeKind::Tag { name } => match current.as_mut() {
                Some(builder) => {
                    let index = builder.page.sections.len();
                    builder.page.sections.push(FavoriteSection {
                        heading: name.clone(),
                        level: node.level - builder.level,
                        notes: Vec::new(),
                    });
                    builder.sections.insert(id, index);
                }
                None if node.level == 1 && options.is_favorite(name) => {
                    current = Some(PageBuilder {
                        page: FavoritesPage {
                            tag: name.clone(),
                            sections: Vec::new(),
                        },
                        level: node.level,
                        sections: HashMap::new(),
                    });
                }
                None => {}
            },
            NodeKind::Item { note } => {
                if let (Some(builder), Some(parent)) = (current.as_mut(), node.parent) {
                    let index = builder.section_for(parent);
                    builder.page.sections[index].notes.push(*note);
                }
            }
        }
    }

    if let Some(builder) = current {
        pages.push(builder.page);
    }
    pages
}

/// Deal sections into rows of columns; each column lists section indices.
///
/// The final row is padded with empty columns up to the configured count.
pub fn paginate(sections: &[FavoriteSection], options: &FavoritesOptions) -> Vec<Vec<Vec<usize>>> {
    let columns = options.columns.max(1);
    let mut rows = Vec::new();
    let mut row: Vec<Vec<usize>> = Vec::new();
    let mut column = Vec::new();
    let mut used = 0;

    for (index, section) in sections.iter().enumerate() {
        let lines = section.line_count();
        if used > 0 && used + lines > options.max_rows {
            row.push(std::mem::take(&mut column));
            used = 0;
            if row.len() == columns {
                rows.push(std::mem::take(&mut row));
            }
        }
        column.push(index);
        used += lines;
    }

    if !column.is_empty() {
        row.push(column);
    }
    if !row.is_empty() {
        row.resize_with(columns, Vec::new);
        rows.push(row);
    }
    rows
}

/// Render one favorites page; returns the number of notes written
pub fn render_page<W: Write>(
    page: &FavoritesPage,
    notes: &[Note],
    options: &ExportOptions,
    out: &mut MarkupWriter<W>,
) -> Result<usize> {
    let favorites = &options.favorites;
    out.open(&options.head(&page.tag))?;
    out.element("h1", &page.tag)?;

    let mut count = 0;
    for row in paginate(&page.sections, favorites) {
        open_div(out, "row")?;
        for column in row {
            open_div(out, favorites.column_class())?;
            for &index in &column {
                let section = &page.sections[index];
                if !section.heading.is_empty() {
                    let heading = format!("h{}", (section.level + 1).min(6));
                    out.element(&heading, &section.heading)?;
                }
                for note in section.notes.iter().filter_map(|&n| notes.get(n)) {
                    out.start("p")?;
                    out.attr("class", "favorite")?;
                    out.finish_start()?;
                    write_title(note, out)?;
                    out.end("p")?;
                    out.newline()?;
                    count += 1;
                }
            }
            close_div(out)?;
        }
        if favorites.has_filler() {
            open_div(out, favorites.column_class())?;
            close_div(out)?;
        }
        close_div(out)?;
    }

    out.close()?;
    Ok(count)
}

fn open_div<W: Write>(out: &mut MarkupWriter<W>, class: &str) -> Result<()> {
    out.start("div")?;
    out.attr("class", class)?;
    out.finish_start()?;
    out.newline()
}

fn close_div<W: Write>(out: &mut MarkupWriter<W>) -> Result<()> {
    out.end("div")?;
    out.newline()
}

/// Write one page per favorites tag into `dir`
pub fn publish(
    tree: &TagTree,
    notes: &[Note],
    options: &ExportOptions,
    dir: &Path,
) -> Result<FavoritesReport> {
    let pages = collect_pages(tree, &options.favorites);
    let mut report = FavoritesReport::default();

    if pages.is_empty() {
        log::info!(
            "No favorites found (looked for {})",
            options.favorites.tags.join(", ")
        );
        return Ok(report);
    }

    std::fs::create_dir_all(dir)?;
    for page in &pages {
        let path = dir.join(page.file_name());
        let mut out = MarkupWriter::create(&path, Dialect::Html)?;
        let count = render_page(page, notes, options, &mut out)?;
        log::debug!("Wrote {}", path.display());
        report.notes += count;
        report.pages.push(WrittenPage {
            tag: page.tag.clone(),
            path,
            notes: count,
        });
    }
    Ok(report)
}
