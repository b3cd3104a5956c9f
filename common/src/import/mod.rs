//! Word import: turns a picked document into body text in the markup dialect.
//!
//! Extraction (container bytes to HTML) sits behind [`DocumentExtractor`] so the
//! `.docx` reader can be swapped; the HTML-to-markup step is [`html_to_markup`].

mod docx;
mod markup;

use std::fmt;

pub use docx::DocxExtractor;
pub use markup::{INLINE_RULES, InlineStyle, html_to_markup, tidy};

use crate::error::ImportError;

/// Turns a document container into semantic HTML.
pub trait DocumentExtractor {
    fn to_html(&self, bytes: &[u8]) -> Result<String, ImportError>;
}

impl<F> DocumentExtractor for F
where
    F: Fn(&[u8]) -> Result<String, ImportError>,
{
    fn to_html(&self, bytes: &[u8]) -> Result<String, ImportError> {
        self(bytes)
    }
}

/// Body text produced by the importer, ready for display and hand editing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl AsRef<str> for NormalizedText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts `bytes` with `extractor` and rewrites the HTML into the markup dialect.
pub fn normalize(
    extractor: &dyn DocumentExtractor,
    bytes: &[u8],
) -> Result<NormalizedText, ImportError> {
    let html = extractor.to_html(bytes)?;
    Ok(NormalizedText(html_to_markup(&html)))
}
