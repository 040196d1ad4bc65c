//! OPML and HTML tags-outline exports
//!
//! Both walk the tag tree recursively: a tag node becomes a container holding
//! its children (first child, then the sibling chain), a note item becomes a
//! leaf labelled with the note title, optionally followed by `link:` and
//! `note:` detail lines.

use super::ExportOptions;
use crate::domain::tags::{NodeId, NodeKind, TagTree};
use crate::domain::Note;
use crate::error::Result;
use crate::infrastructure::markup::MarkupWriter;
use std::io::Write;

/// Which detail lines follow each note in an outline
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OutlineOptions {
    pub include_links: bool,
    pub include_notes: bool,
}

impl Default for OutlineOptions {
    fn default() -> Self {
        OutlineOptions {
            include_links: true,
            include_notes: true,
        }
    }
}

/// `link:` and `note:` lines for one note
fn detail_lines(note: &Note, options: &OutlineOptions) -> Vec<(&'static str, String)> {
    let mut lines = Vec::new();
    if options.include_links && !note.link().is_empty() {
        lines.push(("link", note.link().to_string()));
    }
    if options.include_notes {
        let teaser = note.teaser();
        if !teaser.is_empty() {
            lines.push(("note", teaser));
        }
    }
    lines
}

/// OPML outline of the tag tree; returns the number of note items written
pub fn write_opml<W: Write>(
    tree: &TagTree,
    notes: &[Note],
    options: &ExportOptions,
    out: &mut MarkupWriter<W>,
) -> Result<usize> {
    out.open(&options.head(&options.title))?;
    let mut count = 0;
    write_opml_children(tree, TagTree::ROOT, notes, options, out, &mut count)?;
    out.close()?;
    Ok(count)
}

fn write_opml_children<W: Write>(
    tree: &TagTree,
    parent: NodeId,
    notes: &[Note],
    options: &ExportOptions,
    out: &mut MarkupWriter<W>,
    count: &mut usize,
) -> Result<()> {
    let mut next = tree.node(parent).first_child;
    while let Some(id) = next {
        write_opml_node(tree, id, notes, options, out, count)?;
        next = tree.node(id).next_sibling;
    }
    Ok(())
}

fn write_opml_node<W: Write>(
    tree: &TagTree,
    id: NodeId,
    notes: &[Note],
    options: &ExportOptions,
    out: &mut MarkupWriter<W>,
    count: &mut usize,
) -> Result<()> {
    let node = tree.node(id);
    match &node.kind {
        NodeKind::Root => write_opml_children(tree, id, notes, options, out, count),
        NodeKind::Tag { name } => {
            out.start("outline")?;
            out.attr("text", name)?;
            if !node.has_children() {
                out.finish_empty()?;
                return out.newline();
            }
            out.finish_start()?;
            out.newline()?;
            write_opml_children(tree, id, notes, options, out, count)?;
            out.end("outline")?;
            out.newline()
        }
        NodeKind::Item { note } => {
            let Some(note) = notes.get(*note) else {
                return Ok(());
            };
            *count += 1;

            out.start("outline")?;
            out.attr("text", note.title())?;
            if !note.link().is_empty() {
                out.attr("type", "link")?;
                out.attr("url", note.link())?;
            }

            let details = detail_lines(note, &options.outline);
            if details.is_empty() {
                out.finish_empty()?;
                return out.newline();
            }
            out.finish_start()?;
            out.newline()?;
            for (label, value) in details {
                out.start("outline")?;
                out.attr("text", &format!("{}: {}", label, value))?;
                out.finish_empty()?;
                out.newline()?;
            }
            out.end("outline")?;
            out.newline()
        }
    }
}

/// Nested HTML lists of the tag tree; returns the number of note items written
pub fn write_html<W: Write>(
    tree: &TagTree,
    notes: &[Note],
    options: &ExportOptions,
    out: &mut MarkupWriter<W>,
) -> Result<usize> {
    out.open(&options.head(&options.title))?;
    out.element("h1", &options.title)?;

    let mut count = 0;
    if tree.is_empty() {
        out.element("p", "No tagged notes.")?;
    } else {
        out.start("ul")?;
        out.attr("class", "tags-outline")?;
        out.finish_start()?;
        out.newline()?;
        write_html_children(tree, TagTree::ROOT, notes, options, out, &mut count)?;
        out.end("ul")?;
        out.newline()?;
    }

    out.close()?;
    Ok(count)
}

fn write_html_children<W: Write>(
    tree: &TagTree,
    parent: NodeId,
    notes: &[Note],
    options: &ExportOptions,
    out: &mut MarkupWriter<W>,
    count: &mut usize,
) -> Result<()> {
    let mut next = tree.node(parent).first_child;
    while let Some(id) = next {
        write_html_node(tree, id, notes, options, out, count)?;
        next = tree.node(id).next_sibling;
    }
    Ok(())
}

fn write_html_node<W: Write>(
    tree: &TagTree,
    id: NodeId,
    notes: &[Note],
    options: &ExportOptions,
    out: &mut MarkupWriter<W>,
    count: &mut usize,
) -> Result<()> {
    let node = tree.node(id);
    match &node.kind {
        NodeKind::Root => write_html_children(tree, id, notes, options, out, count),
        NodeKind::Tag { name } => {
            out.start("li")?;
            out.finish_start()?;
            out.start("span")?;
            out.attr("class", "tag")?;
            out.finish_start()?;
            out.text(name)?;
            out.end("span")?;
            if node.has_children() {
                out.newline()?;
                out.start("ul")?;
                out.finish_start()?;
                out.newline()?;
                write_html_children(tree, id, notes, options, out, count)?;
                out.end("ul")?;
                out.newline()?;
            }
            out.end("li")?;
            out.newline()
        }
        NodeKind::Item { note } => {
            let Some(note) = notes.get(*note) else {
                return Ok(());
            };
            *count += 1;

            out.start("li")?;
            out.finish_start()?;
            write_title(note, out)?;

            let details = detail_lines(note, &options.outline);
            if !details.is_empty() {
                out.newline()?;
                out.start("ul")?;
                out.attr("class", "details")?;
                out.finish_start()?;
                out.newline()?;
                for (label, value) in details {
                    out.start("li")?;
                    out.finish_start()?;
                    out.text(&format!("{}: ", label))?;
                    if label == "link" {
                        out.start("a")?;
                        out.attr("href", &value)?;
                        out.finish_start()?;
                        out.text(&value)?;
                        out.end("a")?;
                    } else {
                        out.text(&value)?;
                    }
                    out.end("li")?;
                    out.newline()?;
                }
                out.end("ul")?;
                out.newline()?;
            }
            out.end("li")?;
            out.newline()
        }
    }
}

/// Note title, linked when the note has a link
pub(crate) fn write_title<W: Write>(note: &Note, out: &mut MarkupWriter<W>) -> Result<()> {
    if note.link().is_empty() {
        return out.text(note.title());
    }
    out.start("a")?;
    out.attr("href", note.link())?;
    out.finish_start()?;
    out.text(note.title())?;
    out.end("a")
}
