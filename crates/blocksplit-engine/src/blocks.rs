use serde::Serialize;

/// A byte range `[start, end)` into the segmented text.
///
/// Every [`Segment`] carries the span it was produced from. Slicing the source
/// with each span in order reproduces the exact input, even where the block
/// content itself was normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    /// Returns the source text covered by this span.
    ///
    /// # Panics
    /// Panics if the span is out of bounds or not on char boundaries of `text`.
    pub fn slice(self, text: &str) -> &str {
        &text[self.start..self.end]
    }
}

/// One classified unit of output content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    /// Literal passthrough, rendered as prose/markdown.
    Text { content: String },
    /// A fenced code block, inline SVG snippet or HTML document.
    Code {
        /// Language or file tag from the opening fence; empty when absent.
        title: String,
        code: String,
        /// The closing fence has not arrived yet.
        is_partial: bool,
    },
    /// The whole input is an HTML page (e.g. a proxy error page).
    DangerousHtml { html: String },
    /// A Markdown image reference, `![alt](url)`.
    ImageUrl { url: String, alt: String },
}

impl Block {
    pub fn text(content: impl Into<String>) -> Self {
        Block::Text {
            content: content.into(),
        }
    }

    pub fn code(title: impl Into<String>, code: impl Into<String>, is_partial: bool) -> Self {
        Block::Code {
            title: title.into(),
            code: code.into(),
            is_partial,
        }
    }

    /// Short stable label for the block kind, matching its serialized tag.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Block::Text { .. } => "text",
            Block::Code { .. } => "code",
            Block::DangerousHtml { .. } => "dangerous_html",
            Block::ImageUrl { .. } => "image_url",
        }
    }

    /// True for a code block still waiting on its closing fence.
    pub fn is_partial(&self) -> bool {
        matches!(
            self,
            Block::Code {
                is_partial: true,
                ..
            }
        )
    }
}

/// A block together with the source span it was produced from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Segment {
    #[serde(flatten)]
    pub span: Span,
    #[serde(flatten)]
    pub block: Block,
}

impl Segment {
    pub fn new(span: Span, block: Block) -> Self {
        Self { span, block }
    }
}
