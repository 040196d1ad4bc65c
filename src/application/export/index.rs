//! Index page linking every published output

use super::{ExportFormat, ExportOptions};
use crate::error::Result;
use crate::infrastructure::markup::MarkupWriter;
use std::io::Write;

/// One published output, linked relative to the index page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexEntry {
    pub format: ExportFormat,
    pub href: String,
    /// Link text; the format label unless set
    pub label: String,
}

impl IndexEntry {
    pub fn new(format: ExportFormat, href: impl Into<String>) -> Self {
        IndexEntry {
            format,
            href: href.into(),
            label: format.label().to_string(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Returns the number of entries linked
pub fn write<W: Write>(
    entries: &[IndexEntry],
    options: &ExportOptions,
    out: &mut MarkupWriter<W>,
) -> Result<usize> {
    out.open(&options.head(&options.title))?;
    out.element("h1", &options.title)?;

    if entries.is_empty() {
        out.element("p", "Nothing published.")?;
        out.close()?;
        return Ok(0);
    }

    out.start("ul")?;
    out.attr("class", "exports")?;
    out.finish_start()?;
    out.newline()?;
    for entry in entries {
        out.start("li")?;
        out.finish_start()?;
        out.start("a")?;
        out.attr("href", &entry.href)?;
        out.finish_start()?;
        out.text(&entry.label)?;
        out.end("a")?;
        out.text(&format!(": {}", entry.format.caption()))?;
        out.end("li")?;
        out.newline()?;
    }
    out.end("ul")?;
    out.newline()?;

    out.close()?;
    Ok(entries.len())
}
