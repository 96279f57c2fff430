use std::sync::OnceLock;

use regex::Regex;

use crate::blocks::{Block, Span};

/// A construct the scanner recognizes inside mixed text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pattern {
    /// A backtick fence, possibly still open at end of input.
    CodeBlock,
    /// A `<!DOCTYPE html>` ... `</html>` document.
    HtmlCodeBlock,
    /// An inline `<svg ...>` ... `</svg>` element.
    SvgBlock,
}

/// A pattern hit: where it sits in the source and the block it produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatternMatch {
    pub pattern: Pattern,
    pub span: Span,
    pub block: Block,
}

impl Pattern {
    /// Tie-break order when two patterns match at the same offset.
    pub const PRIORITY: [Pattern; 3] = [
        Pattern::CodeBlock,
        Pattern::HtmlCodeBlock,
        Pattern::SvgBlock,
    ];

    /// Finds the earliest match starting at or after byte offset `from`.
    ///
    /// Each call is an independent search; compiled regexes are shared but
    /// hold no position state between calls.
    pub fn find_at(self, text: &str, from: usize) -> Option<PatternMatch> {
        match self {
            Pattern::CodeBlock => find_code_block(text, from),
            Pattern::HtmlCodeBlock => find_html_document(text, from),
            Pattern::SvgBlock => find_svg(text, from),
        }
    }
}

// Opening fence: three or more backticks, an optional title, then a newline.
fn fence_open_regex() -> &'static Regex {
    static FENCE_OPEN_REGEX: OnceLock<Regex> = OnceLock::new();
    FENCE_OPEN_REGEX
        .get_or_init(|| Regex::new(r"`{3,}([^\n`]*)\n").expect("Invalid fence open regex"))
}

// Closing fence: a backtick run followed by space, `*`, newline or end of input.
// The boundary is matched but not consumed; only group 1 belongs to the block.
fn fence_close_regex() -> &'static Regex {
    static FENCE_CLOSE_REGEX: OnceLock<Regex> = OnceLock::new();
    FENCE_CLOSE_REGEX
        .get_or_init(|| Regex::new(r"(`{3,})(?:[ *\n]|\z)").expect("Invalid fence close regex"))
}

fn html_document_regex() -> &'static Regex {
    static HTML_DOCUMENT_REGEX: OnceLock<Regex> = OnceLock::new();
    HTML_DOCUMENT_REGEX.get_or_init(|| {
        Regex::new(r"(?is)<!DOCTYPE html>(.*?)</html>").expect("Invalid HTML document regex")
    })
}

fn svg_regex() -> &'static Regex {
    static SVG_REGEX: OnceLock<Regex> = OnceLock::new();
    SVG_REGEX.get_or_init(|| {
        Regex::new(r"(?s)<svg (?:xmlns|width|viewBox)=.*?</svg>").expect("Invalid SVG regex")
    })
}

fn find_code_block(text: &str, from: usize) -> Option<PatternMatch> {
    let open = fence_open_regex().captures_at(text, from)?;
    let whole = open.get(0)?;
    let title = open.get(1).map_or("", |m| m.as_str()).trim();
    let body_start = whole.end();

    let (body_end, end, is_partial) = match fence_close_regex().captures_at(text, body_start) {
        Some(close) => {
            let run = close.get(1)?;
            (run.start(), run.end(), false)
        }
        None => (text.len(), text.len(), true),
    };

    // Leading indentation is kept; only the whitespace tail goes.
    let code = text[body_start..body_end].trim_end();

    Some(PatternMatch {
        pattern: Pattern::CodeBlock,
        span: Span::new(whole.start(), end),
        block: Block::code(title, code, is_partial),
    })
}

fn find_html_document(text: &str, from: usize) -> Option<PatternMatch> {
    let caps = html_document_regex().captures_at(text, from)?;
    let whole = caps.get(0)?;
    let body = caps.get(1).map_or("", |m| m.as_str());

    Some(PatternMatch {
        pattern: Pattern::HtmlCodeBlock,
        span: Span::new(whole.start(), whole.end()),
        block: Block::code("html", format!("<!DOCTYPE html>{body}</html>"), false),
    })
}

fn find_svg(text: &str, from: usize) -> Option<PatternMatch> {
    let whole = svg_regex().find_at(text, from)?;

    Some(PatternMatch {
        pattern: Pattern::SvgBlock,
        span: Span::new(whole.start(), whole.end()),
        block: Block::code("svg", whole.as_str(), false),
    })
}
