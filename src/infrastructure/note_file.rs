//! Notenik-style note files
//!
//! A note file is a sequence of `Name: value` paragraphs separated by blank
//! lines. `Body:` comes last and everything after it belongs to the body:
//!
//! ```text
//! Title: Rust
//!
//! Tags: Favorites.Tech
//!
//! Body:
//!
//! A language empowering everyone.
//! ```
//!
//! Continuation lines of a multi-line value that are blank, look like a
//! label, or start with `\` are written with one leading `\`, which the
//! reader strips again. The body is written verbatim.

use crate::domain::note::{fields, normalize_field_name, Note};
use regex::Regex;
use std::sync::OnceLock;

const ESCAPE: char = '\\';

/// Matches a field label line: `Name: value` or `Name:`
fn label_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| Regex::new(r"^([A-Za-z][A-Za-z0-9 _-]{0,47}):(?: (.*))?$").unwrap())
}

/// A field whose value lines are still being read
struct PendingField {
    name: String,
    lines: Vec<String>,
    blank_run: usize,
}

impl PendingField {
    /// `inline` is the text after `Name: `; `None` for a bare `Name:`
    fn new(name: &str, inline: Option<&str>) -> Self {
        PendingField {
            name: name.to_string(),
            lines: inline.map(str::to_string).into_iter().collect(),
            blank_run: 0,
        }
    }

    fn push(&mut self, line: &str) {
        if line.trim().is_empty() {
            self.blank_run += 1;
            return;
        }
        self.lines
            .extend(std::iter::repeat(String::new()).take(self.blank_run));
        self.blank_run = 0;
        self.lines
            .push(line.strip_prefix(ESCAPE).unwrap_or(line).to_string());
    }

    /// Blank lines still pending here separate this field from the next
    fn finish(self, note: &mut Note) {
        note.set(&self.name, &self.lines.join("\n"));
    }
}

/// Parse note file text. Text that does not start with a field label is
/// treated as a plain body, titled with `fallback_title`.
pub fn parse_note(text: &str, fallback_title: &str) -> Note {
    let mut note = Note::new();
    let mut current: Option<PendingField> = None;
    let mut previous_blank = true;
    let mut offset = 0;

    for raw in text.split_inclusive('\n') {
        offset += raw.len();
        let line = raw.strip_suffix('\n').unwrap_or(raw);
        let line = line.strip_suffix('\r').unwrap_or(line);

        let label = if previous_blank {
            label_regex().captures(line)
        } else {
            None
        };

        match label {
            Some(caps) => {
                if let Some(field) = current.take() {
                    field.finish(&mut note);
                }
                let name = caps[1].trim_end();
                let inline = caps.get(2).map(|m| m.as_str());

                if normalize_field_name(name) == normalize_field_name(fields::BODY) {
                    note.set(fields::BODY, &read_body(inline, &text[offset..]));
                    return with_title(note, fallback_title);
                }
                current = Some(PendingField::new(name, inline));
            }
            None => match current.as_mut() {
                Some(field) => field.push(line),
                None if line.trim().is_empty() => {}
                None => {
                    // No labels at all: the whole text is the body
                    return Note::new()
                        .with_field(fields::TITLE, fallback_title)
                        .with_field(fields::BODY, text.trim_end_matches(['\n', '\r']));
                }
            },
        }
        previous_blank = line.trim().is_empty();
    }

    if let Some(field) = current.take() {
        field.finish(&mut note);
    }
    with_title(note, fallback_title)
}

/// Body text after the `Body:` line: one separating blank line is skipped
/// and the single line end the writer appends is dropped.
fn read_body(inline: Option<&str>, rest: &str) -> String {
    let mut body = match inline {
        Some(value) if !value.is_empty() => format!("{}\n{}", value, rest),
        _ => rest
            .strip_prefix("\r\n")
            .or_else(|| rest.strip_prefix('\n'))
            .unwrap_or(rest)
            .to_string(),
    };
    if body.ends_with('\n') {
        body.pop();
    }
    body
}

fn with_title(mut note: Note, fallback_title: &str) -> Note {
    if note.get(fields::TITLE).is_none() {
        note.set(fields::TITLE, fallback_title);
    }
    note
}

fn needs_escape(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with(ESCAPE) || label_regex().is_match(line)
}

/// Format a note as note file text; the body, if any, is written last
pub fn format_note(note: &Note) -> String {
    let body_key = normalize_field_name(fields::BODY);
    let mut output = String::new();
    let mut body = None;

    for field in note.fields() {
        if normalize_field_name(&field.name) == body_key {
            body = Some(field.value.as_str());
            continue;
        }

        let mut lines = field.value.split('\n');
        output.push_str(&format!("{}: {}\n", field.name, lines.next().unwrap_or_default()));
        for line in lines {
            if needs_escape(line) {
                output.push(ESCAPE);
            }
            output.push_str(line);
            output.push('\n');
        }
        output.push('\n');
    }

    if let Some(body) = body {
        output.push_str(&format!("{}:\n\n{}\n", fields::BODY, body));
    }

    output
}

/// File-system-safe stem: characters other than letters, digits, space,
/// `-` and `_` become `_`. May be empty.
pub fn safe_file_stem(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_alphanumeric() || c == ' ' || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// File name for a note, derived from its title
pub fn note_file_name(title: &str) -> String {
    let stem = safe_file_stem(title);
    if stem.is_empty() {
        "untitled.txt".to_string()
    } else {
        format!("{}.txt", stem)
    }
}
