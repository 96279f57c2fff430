//! # blocksplit-engine
//!
//! Turns raw, possibly still-streaming model output into an ordered list of
//! typed content blocks (prose, fenced code, inline SVG, HTML documents,
//! image references) so a renderer can treat heterogeneous text uniformly.
//!
//! ```
//! use blocksplit_engine::{Block, parse_blocks};
//!
//! let blocks = parse_blocks("before\n```\nx\n```\nafter");
//! assert_eq!(blocks.len(), 3);
//! assert!(matches!(&blocks[1], Block::Code { code, is_partial: false, .. } if code == "x"));
//! ```
//!
//! The segmenter is a pure function of its input. Callers rendering a growing
//! buffer re-run it on the whole accumulated text; an unterminated trailing
//! fence comes back as a code block with `is_partial` set.

pub mod blocks;
pub mod heuristics;
pub mod segment;

// Re-export key types for easier usage
pub use blocks::{Block, Segment, Span};
pub use heuristics::{
    Disabled, HtmlPageHeuristic, ImageReferenceExtractor, MarkdownImageHeuristic,
    PureHtmlDetector,
};
pub use segment::{Pattern, PatternMatch, Segmenter};

/// Segments `text` with the default heuristics, keeping source spans.
pub fn segment(text: &str) -> Vec<Segment> {
    Segmenter::new().segment(text)
}

/// Segments `text` with the default heuristics.
pub fn parse_blocks(text: &str) -> Vec<Block> {
    Segmenter::new().blocks(text)
}
