//! Markup writer shared by every export driver
//!
//! `MarkupWriter` buffers one logical line at a time, indents each line in
//! proportion to the current element depth, and writes the line to its sink
//! in one call. A document moves through `Unopened -> Opened -> Closed`;
//! opening writes the dialect's preamble, closing writes the matching
//! postamble, flushes the sink and rejects any element still open.
//!
//! # Examples
//!
//! ```
//! use notepub::infrastructure::markup::{Dialect, DocumentHead, MarkupWriter};
//!
//! let mut out = MarkupWriter::new(Vec::new(), Dialect::Xml);
//! out.open(&DocumentHead::new("Notes")).unwrap();
//! out.start("notes").unwrap();
//! out.finish_start().unwrap();
//! out.newline().unwrap();
//! out.element("title", "Fish & Chips").unwrap();
//! out.end("notes").unwrap();
//! out.newline().unwrap();
//! out.close().unwrap();
//!
//! let xml = String::from_utf8(out.into_inner()).unwrap();
//! assert!(xml.contains("  <title>Fish &amp; Chips</title>\n"));
//! ```

use crate::domain::html::{escape_attr, escape_text};
use crate::error::{NotepubError, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Markup flavour, which decides preamble, postamble and empty-element syntax
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Html,
    Xml,
    Opml,
    /// Netscape bookmark file
    Bookmarks,
}

impl Dialect {
    fn default_indent(self) -> usize {
        match self {
            Dialect::Bookmarks => 4,
            _ => 2,
        }
    }
}

/// Title and metadata written by the document preamble
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentHead {
    pub title: String,
    pub stylesheet: Option<String>,
    pub metadata: Vec<(String, String)>,
}

impl DocumentHead {
    pub fn new(title: &str) -> Self {
        DocumentHead {
            title: title.to_string(),
            ..Self::default()
        }
    }

    /// Stylesheet link (HTML only); blank values are ignored
    pub fn with_stylesheet(mut self, href: Option<&str>) -> Self {
        self.stylesheet = href.filter(|h| !h.trim().is_empty()).map(str::to_string);
        self
    }

    pub fn with_meta(mut self, name: &str, content: &str) -> Self {
        self.metadata.push((name.to_string(), content.to_string()));
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocState {
    Unopened,
    Opened,
    Closed,
}

/// Number of container elements opened and closed so far
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TagCounts {
    pub opened: usize,
    pub closed: usize,
}

pub struct MarkupWriter<W: Write> {
    sink: W,
    dialect: Dialect,
    state: DocState,
    indent_width: usize,
    line: String,
    pending: Option<String>,
    open_elements: Vec<String>,
    counts: TagCounts,
}

impl MarkupWriter<BufWriter<File>> {
    /// Create (or truncate) a file and write markup to it
    pub fn create(path: &Path, dialect: Dialect) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file), dialect))
    }
}

impl<W: Write> MarkupWriter<W> {
    pub fn new(sink: W, dialect: Dialect) -> Self {
        MarkupWriter {
            sink,
            dialect,
            state: DocState::Unopened,
            indent_width: dialect.default_indent(),
            line: String::new(),
            pending: None,
            open_elements: Vec::new(),
            counts: TagCounts::default(),
        }
    }

    /// Override the number of spaces per nesting level
    pub fn with_indent(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    pub fn state(&self) -> DocState {
        self.state
    }

    pub fn depth(&self) -> usize {
        self.open_elements.len()
    }

    pub fn counts(&self) -> TagCounts {
        self.counts
    }

    /// Release the sink; pending output that was never flushed is lost
    pub fn into_inner(self) -> W {
        self.sink
    }

    /// Write the dialect preamble and start accepting content
    pub fn open(&mut self, head: &DocumentHead) -> Result<()> {
        match self.state {
            DocState::Unopened => {}
            DocState::Opened => return Err(markup_error("document is already open")),
            DocState::Closed => return Err(markup_error("document cannot be reopened")),
        }
        self.state = DocState::Opened;

        match self.dialect {
            Dialect::Html => {
                self.raw_line("<!DOCTYPE html>")?;
                self.start("html")?;
                self.attr("lang", "en")?;
                self.finish_start()?;
                self.newline()?;
                self.start("head")?;
                self.finish_start()?;
                self.newline()?;
                self.start("meta")?;
                self.attr("charset", "utf-8")?;
                self.finish_empty()?;
                self.newline()?;
                self.element("title", &head.title)?;
                for (name, content) in &head.metadata {
                    self.start("meta")?;
                    self.attr("name", name)?;
                    self.attr("content", content)?;
                    self.finish_empty()?;
                    self.newline()?;
                }
                if let Some(href) = &head.stylesheet {
                    self.start("link")?;
                    self.attr("rel", "stylesheet")?;
                    self.attr("href", href)?;
                    self.finish_empty()?;
                    self.newline()?;
                }
                self.end("head")?;
                self.newline()?;
                self.start("body")?;
                self.finish_start()?;
                self.newline()?;
            }
            Dialect::Xml => {
                self.raw_line(r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
            }
            Dialect::Opml => {
                self.raw_line(r#"<?xml version="1.0" encoding="UTF-8"?>"#)?;
                self.start("opml")?;
                self.attr("version", "2.0")?;
                self.finish_start()?;
                self.newline()?;
                self.start("head")?;
                self.finish_start()?;
                self.newline()?;
                self.element("title", &head.title)?;
                for (name, content) in &head.metadata {
                    self.element(name, content)?;
                }
                self.end("head")?;
                self.newline()?;
                self.start("body")?;
                self.finish_start()?;
                self.newline()?;
            }
            Dialect::Bookmarks => {
                self.raw_line("<!DOCTYPE NETSCAPE-Bookmark-file-1>")?;
                self.raw_line("<!-- This is an automatically generated file.")?;
                self.raw_line("     It will be read and overwritten.")?;
                self.raw_line("     DO NOT EDIT! -->")?;
                self.raw_line(
                    r#"<META HTTP-EQUIV="Content-Type" CONTENT="text/html; charset=UTF-8">"#,
                )?;
                self.element("TITLE", &head.title)?;
                self.element("H1", &head.title)?;
            }
        }
        Ok(())
    }

    /// Write the postamble, flush, and refuse further output
    pub fn close(&mut self) -> Result<()> {
        self.ensure_open()?;
        self.newline()?;

        match self.dialect {
            Dialect::Html => {
                self.end("body")?;
                self.newline()?;
                self.end("html")?;
                self.newline()?;
            }
            Dialect::Opml => {
                self.end("body")?;
                self.newline()?;
                self.end("opml")?;
                self.newline()?;
            }
            Dialect::Xml | Dialect::Bookmarks => {}
        }

        if !self.open_elements.is_empty() {
            return Err(markup_error(&format!(
                "unclosed elements at end of document: {}",
                self.open_elements.join(", ")
            )));
        }

        self.sink.flush()?;
        self.state = DocState::Closed;
        Ok(())
    }

    /// Begin a start tag; attributes may follow until it is finished
    pub fn start(&mut self, name: &str) -> Result<()> {
        self.ensure_content()?;
        self.begin_line();
        self.line.push('<');
        self.line.push_str(name);
        self.pending = Some(name.to_string());
        Ok(())
    }

    /// Add an attribute to the pending start tag.
    ///
    /// Skipped when either the name or the value is empty.
    pub fn attr(&mut self, name: &str, value: &str) -> Result<()> {
        self.ensure_open()?;
        if self.pending.is_none() {
            return Err(markup_error(&format!("attribute {} outside a start tag", name)));
        }
        if name.is_empty() || value.is_empty() {
            return Ok(());
        }
        self.line
            .push_str(&format!(" {}=\"{}\"", name, escape_attr(value)));
        Ok(())
    }

    /// Finish the pending start tag and nest one level deeper
    pub fn finish_start(&mut self) -> Result<()> {
        let name = self.take_pending()?;
        self.line.push('>');
        self.open_elements.push(name);
        self.counts.opened += 1;
        Ok(())
    }

    /// Finish the pending start tag as an element without content
    pub fn finish_empty(&mut self) -> Result<()> {
        self.take_pending()?;
        match self.dialect {
            Dialect::Xml | Dialect::Opml => self.line.push_str(" />"),
            Dialect::Html | Dialect::Bookmarks => self.line.push('>'),
        }
        Ok(())
    }

    /// Close the innermost open element, which must be `name`
    pub fn end(&mut self, name: &str) -> Result<()> {
        self.ensure_content()?;
        match self.open_elements.last() {
            Some(open) if open == name => {}
            Some(open) => {
                return Err(markup_error(&format!(
                    "cannot close </{}> while <{}> is open",
                    name, open
                )))
            }
            None => return Err(markup_error(&format!("no open element for </{}>", name))),
        }
        self.open_elements.pop();
        self.counts.closed += 1;
        self.begin_line();
        self.line.push_str("</");
        self.line.push_str(name);
        self.line.push('>');
        Ok(())
    }

    /// Escaped text content
    pub fn text(&mut self, text: &str) -> Result<()> {
        self.ensure_content()?;
        self.begin_line();
        self.line.push_str(&escape_text(text));
        Ok(())
    }

    /// Unescaped content, e.g. pre-rendered HTML
    pub fn raw(&mut self, content: &str) -> Result<()> {
        self.ensure_content()?;
        self.begin_line();
        self.line.push_str(content);
        Ok(())
    }

    /// Flush the buffered line, if any, as one line of output
    pub fn newline(&mut self) -> Result<()> {
        self.ensure_content()?;
        if self.line.is_empty() {
            return Ok(());
        }
        self.line.push('\n');
        self.sink.write_all(self.line.as_bytes())?;
        self.line.clear();
        Ok(())
    }

    /// `<name>text</name>` on a line of its own
    pub fn element(&mut self, name: &str, text: &str) -> Result<()> {
        self.newline()?;
        self.start(name)?;
        self.finish_start()?;
        self.text(text)?;
        self.end(name)?;
        self.newline()
    }

    /// Element for long values: start tag, the escaped value on its own
    /// unindented line(s), end tag.
    pub fn long_element(&mut self, name: &str, text: &str) -> Result<()> {
        self.newline()?;
        self.start(name)?;
        self.finish_start()?;
        self.newline()?;
        self.sink.write_all(escape_text(text).as_bytes())?;
        self.sink.write_all(b"\n")?;
        self.end(name)?;
        self.newline()
    }

    /// A line written exactly as given, without indentation
    pub fn raw_line(&mut self, content: &str) -> Result<()> {
        self.newline()?;
        self.sink.write_all(content.as_bytes())?;
        self.sink.write_all(b"\n")?;
        Ok(())
    }

    fn begin_line(&mut self) {
        if self.line.is_empty() {
            let indent = self.open_elements.len() * self.indent_width;
            self.line.push_str(&" ".repeat(indent));
        }
    }

    fn take_pending(&mut self) -> Result<String> {
        self.ensure_open()?;
        self.pending
            .take()
            .ok_or_else(|| markup_error("no start tag to finish"))
    }

    fn ensure_content(&self) -> Result<()> {
        self.ensure_open()?;
        match &self.pending {
            Some(name) => Err(markup_error(&format!("start tag <{}> not finished", name))),
            None => Ok(()),
        }
    }

    fn ensure_open(&self) -> Result<()> {
        match self.state {
            DocState::Opened => Ok(()),
            DocState::Unopened => Err(markup_error("document has not been opened")),
            DocState::Closed => Err(markup_error("document is already closed")),
        }
    }
}

fn markup_error(msg: &str) -> NotepubError {
    NotepubError::Markup(msg.to_string())
}
