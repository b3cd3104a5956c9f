//! Renders body text in the markup dialect to HTML for the preview overlay.

use std::sync::LazyLock;

use pulldown_cmark::{html, Event, Options, Parser};
use regex::Regex;

static UNDERLINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__([^_\n]+?)__").expect("underline pattern"));

fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Markdown with strikethrough, `__x__` as underline and every newline kept.
///
/// The author's own text is escaped first, so the only raw HTML reaching the
/// output is the `<u>` produced here.
pub fn render_markup(text: &str) -> String {
    let escaped = escape_html(text);
    let underlined = UNDERLINE.replace_all(&escaped, "<u>$1</u>");

    let parser = Parser::new_ext(&underlined, Options::ENABLE_STRIKETHROUGH).map(|event| {
        match event {
            Event::SoftBreak => Event::HardBreak,
            other => other,
        }
    });
    let mut output = String::new();
    html::push_html(&mut output, parser);
    output
}
