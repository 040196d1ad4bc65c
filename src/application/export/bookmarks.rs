//! Netscape bookmark file export
//!
//! Walks the tag tree in document order and keeps track of the deepest open
//! folder. On reaching a node at level `L`, every folder opened at level `L`
//! or deeper is closed first; a tag node then opens its own folder.

use super::ExportOptions;
use crate::domain::tags::{NodeKind, TagTree};
use crate::domain::Note;
use crate::error::Result;
use crate::infrastructure::markup::MarkupWriter;
use chrono::NaiveDate;
use std::io::Write;

/// Write the bookmark file; notes without a link are skipped.
/// Returns the number of bookmarks written.
pub fn write<W: Write>(
    tree: &TagTree,
    notes: &[Note],
    options: &ExportOptions,
    out: &mut MarkupWriter<W>,
) -> Result<usize> {
    out.open(&options.head(&options.title))?;
    open_folder(out)?;

    let mut open_level = 0;
    let mut count = 0;

    for id in tree.walk() {
        let node = tree.node(id);
        while open_level >= node.level && open_level > 0 {
            close_folder(out)?;
            open_level -= 1;
        }

        match &node.kind {
            NodeKind::Root => {}
            NodeKind::Tag { name } => {
                out.raw("<DT>")?;
                out.start("H3")?;
                out.finish_start()?;
                out.text(name)?;
                out.end("H3")?;
                out.newline()?;
                open_folder(out)?;
                open_level = node.level;
            }
            NodeKind::Item { note } => {
                let Some(note) = notes.get(*note) else {
                    continue;
                };
                if note.link().is_empty() {
                    continue;
                }
                write_bookmark(note, out)?;
                count += 1;
            }
        }
    }

    while open_level > 0 {
        close_folder(out)?;
        open_level -= 1;
    }
    close_folder(out)?;

    out.close()?;
    Ok(count)
}

fn open_folder<W: Write>(out: &mut MarkupWriter<W>) -> Result<()> {
    out.start("DL")?;
    out.finish_start()?;
    out.raw("<p>")?;
    out.newline()
}

fn close_folder<W: Write>(out: &mut MarkupWriter<W>) -> Result<()> {
    out.end("DL")?;
    out.raw("<p>")?;
    out.newline()
}

fn write_bookmark<W: Write>(note: &Note, out: &mut MarkupWriter<W>) -> Result<()> {
    let modified = note.modified().map(|m| m.timestamp().to_string());
    let added = note
        .date_added()
        .and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok())
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|d| d.and_utc().timestamp().to_string())
        .or_else(|| modified.clone());

    out.raw("<DT>")?;
    out.start("A")?;
    out.attr("HREF", note.link())?;
    out.attr("ADD_DATE", added.as_deref().unwrap_or_default())?;
    out.attr("LAST_MODIFIED", modified.as_deref().unwrap_or_default())?;
    out.finish_start()?;
    out.text(note.title())?;
    out.end("A")?;
    out.newline()?;

    let teaser = note.teaser();
    if !teaser.is_empty() {
        out.raw("<DD>")?;
        out.text(&teaser)?;
        out.newline()?;
    }
    Ok(())
}
