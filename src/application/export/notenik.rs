//! Native export: one Notenik note file per selected note

use super::ExportOptions;
use crate::domain::Note;
use crate::error::Result;
use crate::infrastructure::NoteFileWriter;
use std::path::Path;

/// Write the selected notes into `dir`, with suppression and field omission applied
pub fn write(notes: &[Note], options: &ExportOptions, dir: &Path) -> Result<usize> {
    let mut writer = NoteFileWriter::create(dir)?;
    let mut count = 0;

    for index in options.select_notes(notes) {
        let prepared = options.prepare(&notes[index]);
        let path = writer.write(&prepared)?;
        log::debug!("Wrote {}", path.display());
        count += 1;
    }

    Ok(count)
}
