//! # Whole-Text Heuristics
//!
//! Two checks run over the full text before any pattern scanning:
//!
//! 1. **Pure HTML** ([`PureHtmlDetector`]): the text *is* an HTML page, e.g. a
//!    proxy error page returned instead of model output. Wins over everything.
//! 2. **Image references** ([`ImageReferenceExtractor`]): the text reduces to
//!    Markdown image references; the extractor builds the blocks itself.
//!
//! Both are strategies so the segmenter can be tested with stubs or have a
//! check switched off. Plain closures implement either trait.

pub mod image_refs;
pub mod pure_html;

pub use image_refs::MarkdownImageHeuristic;
pub use pure_html::HtmlPageHeuristic;

use crate::blocks::Segment;

/// Decides whether the whole text is an HTML page rather than mixed content.
pub trait PureHtmlDetector {
    fn is_pure_html(&self, text: &str) -> bool;
}

/// Recognizes text made only of image references and builds its blocks.
///
/// Returned segments must tile `text` in order, like the scanner's output.
pub trait ImageReferenceExtractor {
    fn extract(&self, text: &str) -> Option<Vec<Segment>>;
}

impl<F> PureHtmlDetector for F
where
    F: Fn(&str) -> bool,
{
    fn is_pure_html(&self, text: &str) -> bool {
        self(text)
    }
}

impl<F> ImageReferenceExtractor for F
where
    F: Fn(&str) -> Option<Vec<Segment>>,
{
    fn extract(&self, text: &str) -> Option<Vec<Segment>> {
        self(text)
    }
}

/// A heuristic that never fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct Disabled;

impl PureHtmlDetector for Disabled {
    fn is_pure_html(&self, _text: &str) -> bool {
        false
    }
}

impl ImageReferenceExtractor for Disabled {
    fn extract(&self, _text: &str) -> Option<Vec<Segment>> {
        None
    }
}
