//! HTML to markup-dialect rewriting.
//!
//! The HTML is parsed into a small fragment tree first and markup is emitted from the
//! tree, so nesting decides the markers rather than the order of textual rewrites.
//! The one precedence rule that matters, bold wrapping exactly one italic (or the
//! reverse) becoming a single `***` run, is applied while building the tree.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{ElementRef, Html, Node};

/// Inline styles of the markup dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InlineStyle {
    BoldItalic,
    Bold,
    Italic,
    Underline,
    Strikethrough,
    Code,
}

impl InlineStyle {
    /// Delimiter written on both sides of a styled run.
    pub fn marker(self) -> &'static str {
        match self {
            InlineStyle::BoldItalic => "***",
            InlineStyle::Bold => "**",
            InlineStyle::Italic => "*",
            InlineStyle::Underline => "__",
            InlineStyle::Strikethrough => "~~",
            InlineStyle::Code => "`",
        }
    }
}

/// Tag names recognised as inline styles. `BoldItalic` has no tag of its own: it only
/// arises from nesting, see [`styled`].
pub const INLINE_RULES: &[(&str, InlineStyle)] = &[
    ("strong", InlineStyle::Bold),
    ("b", InlineStyle::Bold),
    ("em", InlineStyle::Italic),
    ("i", InlineStyle::Italic),
    ("u", InlineStyle::Underline),
    ("ins", InlineStyle::Underline),
    ("s", InlineStyle::Strikethrough),
    ("del", InlineStyle::Strikethrough),
    ("strike", InlineStyle::Strikethrough),
    ("code", InlineStyle::Code),
];

static EXCESS_BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n\s*\n\s*\n").expect("blank line pattern"));

static TRAILING_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)[^\S\n]+$").expect("trailing whitespace pattern"));

#[derive(Debug, Clone, PartialEq)]
enum Fragment {
    Text(String),
    Break,
    Paragraph(Vec<Fragment>),
    Styled(InlineStyle, Vec<Fragment>),
    /// Any element without a rule; only its content survives.
    Plain(Vec<Fragment>),
}

/// Rewrites extracted document HTML into the markup dialect.
///
/// Paragraphs end in a blank line, `<br>` becomes a single newline and every tag
/// without a rule is dropped while keeping its text. The result goes through [`tidy`].
pub fn html_to_markup(html: &str) -> String {
    let document = Html::parse_fragment(html);
    let tree = children_of(document.root_element());

    let mut raw = String::with_capacity(html.len());
    emit(&tree, &mut raw);
    tidy(&raw)
}

/// Final whitespace pass: at most one blank line between blocks, no trailing
/// whitespace on any line, nothing around the whole text. Leading indentation and
/// the blank lines themselves are kept.
pub fn tidy(text: &str) -> String {
    let collapsed = EXCESS_BLANK_LINES.replace_all(text, "\n\n");
    let stripped = TRAILING_WHITESPACE.replace_all(&collapsed, "");
    stripped.trim().to_string()
}

fn style_for(tag: &str) -> Option<InlineStyle> {
    INLINE_RULES
        .iter()
        .find(|(name, _)| *name == tag)
        .map(|(_, style)| *style)
}

fn children_of(element: ElementRef<'_>) -> Vec<Fragment> {
    let mut fragments = Vec::new();
    for child in element.children() {
        match child.value() {
            Node::Text(text) => {
                let text: &str = text;
                fragments.push(Fragment::Text(text.to_owned()));
            }
            Node::Element(_) => {
                if let Some(child) = ElementRef::wrap(child) {
                    fragments.push(fragment_of(child));
                }
            }
            _ => {}
        }
    }
    fragments
}

fn fragment_of(element: ElementRef<'_>) -> Fragment {
    let name = element.value().name();
    match name {
        "p" => Fragment::Paragraph(children_of(element)),
        "br" => Fragment::Break,
        _ => match style_for(name) {
            Some(style) => styled(style, children_of(element)),
            None => Fragment::Plain(children_of(element)),
        },
    }
}

/// Bold around a lone italic child, or italic around a lone bold child, is one
/// bold-italic run. Anything else keeps its own marker.
fn styled(style: InlineStyle, mut children: Vec<Fragment>) -> Fragment {
    let combines = matches!(
        (style, children.as_slice()),
        (InlineStyle::Bold, [Fragment::Styled(InlineStyle::Italic, _)])
            | (InlineStyle::Italic, [Fragment::Styled(InlineStyle::Bold, _)])
    );
    if combines {
        if let Some(Fragment::Styled(_, inner)) = children.pop() {
            return Fragment::Styled(InlineStyle::BoldItalic, inner);
        }
    }
    Fragment::Styled(style, children)
}

fn emit(fragments: &[Fragment], out: &mut String) {
    for fragment in fragments {
        match fragment {
            Fragment::Text(text) => out.push_str(text),
            Fragment::Break => out.push('\n'),
            Fragment::Paragraph(children) => {
                emit(children, out);
                out.push_str("\n\n");
            }
            Fragment::Plain(children) => emit(children, out),
            Fragment::Styled(style, children) => {
                let mut inner = String::new();
                emit(children, &mut inner);
                // Word leaves empty formatted runs behind; markers around nothing are noise.
                if inner.trim().is_empty() {
                    out.push_str(&inner);
                } else {
                    out.push_str(style.marker());
                    out.push_str(&inner);
                    out.push_str(style.marker());
                }
            }
        }
    }
}
