//! Tab-delimited exports

use super::ExportOptions;
use crate::domain::record::{ExportRecord, RecordSchema};
use crate::domain::Note;
use crate::error::Result;
use std::io::Write;

/// Header row plus one row per selected note over the export schema
pub fn write_tab_delimited<W: Write>(
    notes: &[Note],
    options: &ExportOptions,
    out: &mut W,
) -> Result<usize> {
    let prepared: Vec<Note> = options
        .select_notes(notes)
        .into_iter()
        .map(|index| options.prepare(&notes[index]))
        .collect();
    let schema = RecordSchema::for_export(&prepared);

    write_row(out, schema.names().iter().map(String::as_str))?;
    for note in &prepared {
        let record = ExportRecord::project(note, &schema);
        write_row(out, record.values().iter().map(String::as_str))?;
    }

    Ok(prepared.len())
}

/// Three columns: `title#link`, raw tags and body. Tags are not suppressed.
pub fn write_ms_links<W: Write>(
    notes: &[Note],
    options: &ExportOptions,
    out: &mut W,
) -> Result<usize> {
    write_row(out, ["Link", "Tags", "Body"].into_iter())?;

    let selected = options.select_notes(notes);
    for &index in &selected {
        let note = &notes[index];
        let link = format!("{}#{}", note.title(), note.link());
        write_row(out, [link.as_str(), note.tags(), note.body()].into_iter())?;
    }

    Ok(selected.len())
}

fn write_row<'v, W: Write>(out: &mut W, values: impl Iterator<Item = &'v str>) -> Result<()> {
    let cells: Vec<String> = values.map(clean_cell).collect();
    out.write_all(cells.join("\t").as_bytes())?;
    out.write_all(b"\n")?;
    Ok(())
}

/// Tabs and line breaks would break the row structure
fn clean_cell(value: &str) -> String {
    value
        .replace("\r\n", " ")
        .replace(['\t', '\n', '\r'], " ")
}
