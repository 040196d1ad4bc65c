//! Publish use case: every web-facing export plus an index page

use crate::application::export::index::{self, IndexEntry};
use crate::application::export::{favorites, ExportFormat, ExportOptions, ExportService};
use crate::domain::Note;
use crate::error::Result;
use crate::infrastructure::markup::{Dialect, MarkupWriter};
use std::path::{Path, PathBuf};

/// Formats written by a publish run, in index order
pub const PUBLISHED_FORMATS: [ExportFormat; 7] = [
    ExportFormat::Favorites,
    ExportFormat::HtmlOutline,
    ExportFormat::Opml,
    ExportFormat::Bookmarks,
    ExportFormat::UrlUnion,
    ExportFormat::TabDelimited,
    ExportFormat::Xml,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishedOutput {
    pub format: ExportFormat,
    pub path: PathBuf,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishReport {
    pub outputs: Vec<PublishedOutput>,
    pub index: PathBuf,
}

pub struct PublishService<'a> {
    exporter: ExportService<'a>,
    notes: &'a [Note],
    index_file: String,
}

impl<'a> PublishService<'a> {
    pub fn new(notes: &'a [Note], options: ExportOptions, index_file: &str) -> Self {
        PublishService {
            exporter: ExportService::new(notes, options),
            notes,
            index_file: index_file.to_string(),
        }
    }

    /// Write every published format into `dest`, then the index page.
    ///
    /// Favorites only appear in the index when at least one page was written.
    pub fn publish(&self, dest: &Path) -> Result<PublishReport> {
        std::fs::create_dir_all(dest)?;
        let options = self.exporter.options();
        let mut outputs = Vec::new();
        let mut entries = Vec::new();

        for format in PUBLISHED_FORMATS {
            let name = format.default_file_name();
            let path = dest.join(name);

            if format == ExportFormat::Favorites {
                let report =
                    favorites::publish(&options.tree(self.notes), self.notes, options, &path)?;
                if report.is_empty() {
                    continue;
                }
                log::info!(
                    "Published {} favorites on {} pages to {}",
                    report.notes,
                    report.pages.len(),
                    path.display()
                );
                // One page keeps the format label; several are told apart by tag
                let several = report.pages.len() > 1;
                for page in report.pages {
                    let file = page
                        .path
                        .file_name()
                        .map(|f| f.to_string_lossy().into_owned())
                        .unwrap_or_default();
                    let mut entry = IndexEntry::new(format, format!("{}/{}", name, file));
                    if several {
                        entry = entry.with_label(page.tag);
                    }
                    entries.push(entry);
                    outputs.push(PublishedOutput {
                        format,
                        path: page.path,
                        count: page.notes,
                    });
                }
                continue;
            }

            let count = self.exporter.export(format, &path)?.count();
            entries.push(IndexEntry::new(format, name));
            outputs.push(PublishedOutput {
                format,
                path,
                count,
            });
        }

        let index_path = dest.join(&self.index_file);
        let mut out = MarkupWriter::create(&index_path, Dialect::Html)?;
        index::write(&entries, options, &mut out)?;
        log::info!(
            "Wrote index of {} outputs to {}",
            entries.len(),
            index_path.display()
        );

        Ok(PublishReport {
            outputs,
            index: index_path,
        })
    }
}
