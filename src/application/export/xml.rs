//! XML export

use super::ExportOptions;
use crate::domain::record::{ExportRecord, RecordSchema};
use crate::domain::Note;
use crate::error::Result;
use crate::infrastructure::markup::MarkupWriter;
use std::io::Write;

/// Values longer than this are written with the long element form
pub const LONG_VALUE: usize = 80;

/// `<notes>` root with one `<note>` per selected note and one element per non-empty field
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
    let schema = RecordSchema::for_export(&prepared);

    out.open(&options.head(&options.title))?;
    out.start("notes")?;
    out.finish_start()?;
    out.newline()?;

    for note in &prepared {
        let record = ExportRecord::project(note, &schema);
        out.start("note")?;
        out.finish_start()?;
        out.newline()?;
        for (name, value) in record.iter() {
            if value.is_empty() {
                continue;
            }
            let element = xml_name(name);
            if value.chars().count() > LONG_VALUE {
                out.long_element(&element, value)?;
            } else {
                out.element(&element, value)?;
            }
        }
        out.end("note")?;
        out.newline()?;
    }

    out.end("notes")?;
    out.close()?;
    Ok(prepared.len())
}

/// Canonical element name for a field: lower case, other characters become `-`
pub fn xml_name(field: &str) -> String {
    let mut name = String::new();
    for c in field.chars() {
        if c.is_ascii_alphanumeric() {
            name.push(c.to_ascii_lowercase());
        } else if !name.ends_with('-') {
            name.push('-');
        }
    }
    let name = name.trim_matches('-').to_string();

    match name.chars().next() {
        Some(c) if c.is_ascii_alphabetic() => name,
        _ => format!("field-{}", name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::export::test_support::note;
    use crate::infrastructure::markup::Dialect;

    fn export(notes: &[Note], options: &ExportOptions) -> (usize, String) {
        let mut out = MarkupWriter::new(Vec::new(), Dialect::Xml);
        let count = write(notes, options, &mut out).unwrap();
        (count, String::from_utf8(out.into_inner()).unwrap())
    }

    /// Text between `<name>` and `</name>`, ignoring the line breaks and
    /// indentation added by the long element form
    fn element_content<'a>(xml: &'a str, name: &str) -> &'a str {
        let open = format!("<{}>", name);
        let close = format!("</{}>", name);
        let start = xml.find(&open).unwrap() + open.len();
        let end = start + xml[start..].find(&close).unwrap();
        let inner = &xml[start..end];
        inner
            .strip_prefix('\n')
            .map(|s| s.trim_end_matches(' ').trim_end_matches('\n'))
            .unwrap_or(inner)
    }

    #[test]
    fn test_xml_name() {
        assert_eq!(xml_name("Title"), "title");
        assert_eq!(xml_name("Body as HTML"), "body-as-html");
        assert_eq!(xml_name("Date  Added!"), "date-added");
        assert_eq!(xml_name("2nd Field"), "field-2nd-field");
    }

    #[test]
    fn test_xml_structure_and_escaping() {
        let notes = vec![note("Fish & Chips", "food").with_field("Empty", "")];
        let (count, xml) = export(&notes, &ExportOptions::default());

        assert_eq!(count, 1);
        assert!(xml.starts_with("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<notes>\n  <note>\n"));
        assert!(xml.contains("    <title>Fish &amp; Chips</title>\n"));
        assert!(xml.contains("    <tags>food</tags>\n"));
        assert!(!xml.contains("<empty>"));
        assert!(xml.ends_with("  </note>\n</notes>\n"));
    }

    #[test]
    fn test_long_and_short_bodies_round_trip() {
        let long_body = "x".repeat(100);
        let short_body = "ten chars!";
        let long_notes = vec![note("Long", "t").with_field("Body", &long_body)];
        let short_notes = vec![note("Short", "t").with_field("Body", short_body)];

        let (_, long_xml) = export(&long_notes, &ExportOptions::default());
        let (_, short_xml) = export(&short_notes, &ExportOptions::default());

        assert!(long_xml.contains(&format!("    <body>\n{}\n    </body>\n", long_body)));
        assert!(short_xml.contains("    <body>ten chars!</body>\n"));
        assert_eq!(element_content(&long_xml, "body"), long_body);
        assert_eq!(element_content(&short_xml, "body"), short_body);
    }

    #[test]
    fn test_xml_applies_suppression() {
        let notes = vec![note("A", "a.b, c")];
        let options = ExportOptions::default().with_suppress("c");
        let (_, xml) = export(&notes, &options);
        assert!(xml.contains("<tags>a.b</tags>"));
    }
}
