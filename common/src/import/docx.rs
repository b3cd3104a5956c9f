//! `.docx` extraction: reads `word/document.xml` out of the zip container and emits
//! the small HTML vocabulary the markup normalizer understands.

use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use zip::ZipArchive;
use zip::result::ZipError;

use super::DocumentExtractor;
use crate::error::ImportError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Extracts paragraphs, line breaks and run formatting from Word documents.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocxExtractor;

impl DocumentExtractor for DocxExtractor {
    fn to_html(&self, bytes: &[u8]) -> Result<String, ImportError> {
        let xml = read_document_part(bytes)?;
        render_document(&xml)
    }
}

fn read_document_part(bytes: &[u8]) -> Result<String, ImportError> {
    let mut archive =
        ZipArchive::new(Cursor::new(bytes)).map_err(|e| ImportError::Archive(e.to_string()))?;
    let mut part = match archive.by_name(DOCUMENT_PART) {
        Ok(part) => part,
        Err(ZipError::FileNotFound) => return Err(ImportError::MissingPart(DOCUMENT_PART)),
        Err(e) => return Err(ImportError::Archive(e.to_string())),
    };

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| ImportError::Archive(e.to_string()))?;
    Ok(xml)
}

fn render_document(xml: &str) -> Result<String, ImportError> {
    let mut reader = Reader::from_str(xml);
    let mut walker = Walker::default();

    loop {
        match reader
            .read_event()
            .map_err(|e| ImportError::Xml(e.to_string()))?
        {
            Event::Start(e) => walker.start(&e, false),
            Event::Empty(e) => walker.start(&e, true),
            Event::End(e) => walker.end(e.local_name().as_ref()),
            Event::Text(t) => {
                let text = t.unescape().map_err(|e| ImportError::Xml(e.to_string()))?;
                walker.text(&text);
            }
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(walker.html)
}

/// Character formatting of one `w:r` run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct RunStyle {
    bold: bool,
    italic: bool,
    underline: bool,
    strike: bool,
    code: bool,
}

impl RunStyle {
    fn apply(&mut self, property: &[u8], element: &BytesStart<'_>) {
        let value = attribute(element, b"val");
        let enabled = !matches!(value.as_deref(), Some("0" | "false" | "none" | "off"));
        match property {
            b"b" => self.bold = enabled,
            b"i" => self.italic = enabled,
            b"u" => self.underline = enabled,
            b"strike" | b"dstrike" => self.strike = enabled,
            b"rStyle" => {
                self.code = value.is_some_and(|id| id.to_ascii_lowercase().contains("code"))
            }
            _ => {}
        }
    }

    /// Writes `content` wrapped in this run's tags, outermost first.
    fn wrap(self, content: &str, out: &mut String) {
        let tags: Vec<&str> = [
            (self.bold, "strong"),
            (self.italic, "em"),
            (self.underline, "u"),
            (self.strike, "s"),
            (self.code, "code"),
        ]
        .into_iter()
        .filter_map(|(on, tag)| on.then_some(tag))
        .collect();

        for tag in &tags {
            out.push_str(&format!("<{tag}>"));
        }
        out.push_str(content);
        for tag in tags.iter().rev() {
            out.push_str(&format!("</{tag}>"));
        }
    }
}

fn attribute(element: &BytesStart<'_>, name: &[u8]) -> Option<String> {
    element
        .attributes()
        .flatten()
        .find(|attr| attr.key.local_name().as_ref() == name)
        .map(|attr| String::from_utf8_lossy(&attr.value).into_owned())
}

/// One open `w:p` together with the state of the run being read inside it.
#[derive(Default)]
struct Paragraph {
    /// Spans already merged by formatting.
    spans: Vec<(RunStyle, String)>,
    /// Paragraphs of text boxes anchored in this one, written after it.
    nested: String,
    in_run: bool,
    in_run_props: bool,
    in_text: bool,
    style: RunStyle,
}

impl Paragraph {
    fn start(&mut self, name: &[u8], element: &BytesStart<'_>, empty: bool) {
        match name {
            b"r" if !empty => {
                self.in_run = true;
                self.style = RunStyle::default();
            }
            b"rPr" if self.in_run && !empty => self.in_run_props = true,
            b"t" if self.in_run && !empty => self.in_text = true,
            b"br" | b"cr" if self.in_run && !self.in_run_props => self.push("<br />"),
            b"tab" if self.in_run && !self.in_run_props => self.push("\t"),
            property if self.in_run_props => self.style.apply(property, element),
            _ => {}
        }
    }

    fn end(&mut self, name: &[u8]) {
        match name {
            b"r" => {
                self.in_run = false;
                self.in_run_props = false;
                self.in_text = false;
            }
            b"rPr" => self.in_run_props = false,
            b"t" => self.in_text = false,
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if self.in_run && self.in_text {
            self.push(&escape(text));
        }
    }

    /// Appends to the last span when the formatting matches, so Word's arbitrary run
    /// splits do not turn into `**a****b**`.
    fn push(&mut self, html: &str) {
        match self.spans.last_mut() {
            Some((style, content)) if *style == self.style => content.push_str(html),
            _ => self.spans.push((self.style, html.to_string())),
        }
    }

    fn into_html(self) -> String {
        let mut html = String::from("<p>");
        for (style, content) in self.spans {
            style.wrap(&content, &mut html);
        }
        html.push_str("</p>");
        html.push_str(&self.nested);
        html
    }
}

#[derive(Default)]
struct Walker {
    html: String,
    /// Open paragraphs, innermost last. Text boxes nest a `w:p` inside a run.
    open: Vec<Paragraph>,
    /// Depth inside an `mc:Fallback`, whose content repeats the preferred choice.
    skipped: usize,
}

impl Walker {
    fn start(&mut self, element: &BytesStart<'_>, empty: bool) {
        let name = element.local_name();
        let name = name.as_ref();
        if self.skipped > 0 || name == b"Fallback" {
            if !empty {
                self.skipped += 1;
            }
            return;
        }

        match name {
            b"p" if empty => self.emit("<p></p>".to_string()),
            b"p" => self.open.push(Paragraph::default()),
            _ => {
                if let Some(paragraph) = self.open.last_mut() {
                    paragraph.start(name, element, empty);
                }
            }
        }
    }

    fn end(&mut self, name: &[u8]) {
        if self.skipped > 0 {
            self.skipped -= 1;
            return;
        }

        match name {
            b"p" => {
                if let Some(paragraph) = self.open.pop() {
                    self.emit(paragraph.into_html());
                }
            }
            _ => {
                if let Some(paragraph) = self.open.last_mut() {
                    paragraph.end(name);
                }
            }
        }
    }

    fn text(&mut self, text: &str) {
        if self.skipped > 0 {
            return;
        }
        if let Some(paragraph) = self.open.last_mut() {
            paragraph.text(text);
        }
    }

    fn emit(&mut self, html: String) {
        match self.open.last_mut() {
            Some(outer) => outer.nested.push_str(&html),
            None => self.html.push_str(&html),
        }
    }
}
