//! URL-union export: a flat HTML definition list of every selected note

use super::outline::write_title;
use super::ExportOptions;
use crate::domain::html::markdown_to_html;
use crate::domain::Note;
use crate::error::Result;
use crate::infrastructure::markup::MarkupWriter;
use std::io::Write;

/// One `<dt>`/`<dd>` group per selected note, in collection order
pub fn write<W: Write>(
    notes: &[Note],
    options: &ExportOptions,
    out: &mut MarkupWriter<W>,
) -> Result<usize> {
    let prepared: Vec<Note> = options
        .select_notes(notes)
        .into_iter()
        .map(|index| options.prepare(&notes[index]))
        .collect();

    out.open(&options.head(&options.title))?;
    out.element("h1", &options.title)?;
    out.start("dl")?;
    out.attr("class", "notes")?;
    out.finish_start()?;
    out.newline()?;

    for note in &prepared {
        out.start("dt")?;
        out.finish_start()?;
        write_title(note, out)?;
        out.end("dt")?;
        out.newline()?;

        if !note.tags().is_empty() {
            definition(out, "tags", |out| out.text(&format!("Tags: {}", note.tags())))?;
        }

        let body = markdown_to_html(note.body());
        let body = body.trim();
        if !body.is_empty() {
            definition(out, "body", |out| {
                out.newline()?;
                for line in body.lines() {
                    out.raw(line)?;
                    out.newline()?;
                }
                Ok(())
            })?;
        }

        if let Some(modified) = note.modified() {
            definition(out, "date", |out| {
                out.text(&format!("Last modified: {}", modified.format("%Y-%m-%d %H:%M")))
            })?;
        }
    }

    out.end("dl")?;
    out.newline()?;
    out.close()?;
    Ok(prepared.len())
}

fn definition<W, F>(out: &mut MarkupWriter<W>, class: &str, content: F) -> Result<()>
where
    W: Write,
    F: FnOnce(&mut MarkupWriter<W>) -> Result<()>,
{
    out.start("dd")?;
    out.attr("class", class)?;
    out.finish_start()?;
    content(out)?;
    out.end("dd")?;
    out.newline()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::export::test_support::{linked, note};
    use crate::infrastructure::markup::Dialect;
    use chrono::{TimeZone, Utc};

    fn export(notes: &[Note], options: &ExportOptions) -> (usize, String) {
        let mut out = MarkupWriter::new(Vec::new(), Dialect::Html);
        let count = write(notes, options, &mut out).unwrap();
        let counts = out.counts();
        assert_eq!(counts.opened, counts.closed);
        (count, String::from_utf8(out.into_inner()).unwrap())
    }

    #[test]
    fn test_definition_list_entries() {
        let notes = vec![
            linked("Rust", "tech", "https://rust-lang.org")
                .with_field("Body", "A *fast* language")
                .with_modified(Utc.with_ymd_and_hms(2025, 3, 4, 5, 6, 0).unwrap()),
            note("Plain", ""),
        ];

        let (count, html) = export(&notes, &ExportOptions::default());
        assert_eq!(count, 2);
        assert!(html.contains("<dt><a href=\"https://rust-lang.org\">Rust</a></dt>"));
        assert!(html.contains("<dd class=\"tags\">Tags: tech</dd>"));
        assert!(html.contains("<p>A <em>fast</em> language</p>"));
        assert!(html.contains("<dd class=\"date\">Last modified: 2025-03-04 05:06</dd>"));
        assert!(html.contains("<dt>Plain</dt>"));
        assert_eq!(html.matches("class=\"tags\"").count(), 1);
    }

    #[test]
    fn test_collection_order_and_selection() {
        let notes = vec![
            note("Zeta", "keep"),
            note("Alpha", "drop"),
            note("Mid", "keep"),
        ];
        let options = ExportOptions::default().with_select("keep");

        let (count, html) = export(&notes, &options);
        assert_eq!(count, 2);
        let zeta = html.find("Zeta").unwrap();
        let mid = html.find("Mid").unwrap();
        assert!(zeta < mid);
        assert!(!html.contains("Alpha"));
    }

    #[test]
    fn test_empty_collection_writes_empty_list() {
        let (count, html) = export(&[], &ExportOptions::default());
        assert_eq!(count, 0);
        assert!(html.contains("<dl class=\"notes\">\n    </dl>\n"));
    }
}
