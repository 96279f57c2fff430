//! # Segmentation
//!
//! Splits text into an ordered `Vec<Segment>` in one pass.
//!
//! ## Phases
//!
//! 1. **Whole-text gate**: the pure-HTML detector, then the image-reference
//!    extractor. Either one can answer for the entire input.
//! 2. **Scan**: from a cursor, every [`Pattern`] searches independently; the
//!    match with the smallest start wins, ties going to the earlier entry in
//!    [`Pattern::PRIORITY`]. The gap before it becomes a `Text` block, the
//!    cursor jumps past the match, and the loop repeats until nothing matches.
//!    Whatever is left becomes a final `Text` block.
//!
//! ## Key Invariants
//!
//! - Segment spans tile the input: no gaps, no overlaps, no empty spans
//! - No state survives between calls; re-running on a grown buffer is the
//!   only way to stream

pub mod invariants;
pub mod patterns;

pub use patterns::{Pattern, PatternMatch};

use crate::blocks::{Block, Segment, Span};
use crate::heuristics::{
    Disabled, HtmlPageHeuristic, ImageReferenceExtractor, MarkdownImageHeuristic,
    PureHtmlDetector,
};

/// The segmenter with its two whole-text heuristics.
pub struct Segmenter {
    html_detector: Box<dyn PureHtmlDetector + Send + Sync>,
    image_extractor: Box<dyn ImageReferenceExtractor + Send + Sync>,
}

impl Default for Segmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter {
    /// A segmenter using [`HtmlPageHeuristic`] and [`MarkdownImageHeuristic`].
    pub fn new() -> Self {
        Self {
            html_detector: Box::new(HtmlPageHeuristic),
            image_extractor: Box::new(MarkdownImageHeuristic),
        }
    }

    /// A segmenter that only runs the pattern scan.
    pub fn plain() -> Self {
        Self {
            html_detector: Box::new(Disabled),
            image_extractor: Box::new(Disabled),
        }
    }

    pub fn with_html_detector(
        mut self,
        detector: impl PureHtmlDetector + Send + Sync + 'static,
    ) -> Self {
        self.html_detector = Box::new(detector);
        self
    }

    pub fn with_image_extractor(
        mut self,
        extractor: impl ImageReferenceExtractor + Send + Sync + 'static,
    ) -> Self {
        self.image_extractor = Box::new(extractor);
        self
    }

    /// Segments `text`, keeping the source span of every block.
    pub fn segment(&self, text: &str) -> Vec<Segment> {
        if self.html_detector.is_pure_html(text) {
            log::debug!("whole text treated as an HTML page ({} bytes)", text.len());
            return vec![Segment::new(
                Span::new(0, text.len()),
                Block::DangerousHtml {
                    html: text.to_string(),
                },
            )];
        }

        if let Some(images) = self.image_extractor.extract(text) {
            log::debug!("whole text reduced to {} image reference(s)", images.len());
            return images;
        }

        scan(text)
    }

    /// Segments `text`, dropping the spans.
    pub fn blocks(&self, text: &str) -> Vec<Block> {
        self.segment(text).into_iter().map(|s| s.block).collect()
    }
}

/// Runs the multi-pattern scan over `text` with no whole-text heuristics.
pub fn scan(text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    while let Some(found) = earliest_match(text, cursor) {
        // Anything before the match is text
        if found.span.start > cursor {
            let gap = Span::new(cursor, found.span.start);
            segments.push(Segment::new(gap, Block::text(gap.slice(text))));
        }

        log::trace!("{:?} at {}..{}", found.pattern, found.span.start, found.span.end);
        cursor = found.span.end;
        segments.push(Segment::new(found.span, found.block));
    }

    if cursor < text.len() {
        let rest = Span::new(cursor, text.len());
        segments.push(Segment::new(rest, Block::text(rest.slice(text))));
    }

    segments
}

fn earliest_match(text: &str, from: usize) -> Option<PatternMatch> {
    let mut best: Option<PatternMatch> = None;
    for pattern in Pattern::PRIORITY {
        if let Some(candidate) = pattern.find_at(text, from)
            && best
                .as_ref()
                .is_none_or(|b| candidate.span.start < b.span.start)
        {
            best = Some(candidate);
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn blocks(text: &str) -> Vec<Block> {
        Segmenter::new().blocks(text)
    }

    #[test]
    fn empty_input_yields_nothing() {
        assert!(blocks("").is_empty());
    }

    #[test]
    fn plain_text_is_one_block() {
        let text = "Just a paragraph.\n\nAnd *another* one.";
        assert_eq!(blocks(text), vec![Block::text(text)]);
    }

    #[test]
    fn closed_code_fence() {
        assert_eq!(
            blocks("```python\nprint(1)\n```"),
            vec![Block::code("python", "print(1)", false)]
        );
    }

    #[test]
    fn unclosed_trailing_fence_is_partial() {
        assert_eq!(
            blocks("```js\nconsole.log(1)"),
            vec![Block::code("js", "console.log(1)", true)]
        );
    }

    #[test]
    fn mixed_content_keeps_order() {
        assert_eq!(
            blocks("before\n```\nx\n```\nafter"),
            vec![
                Block::text("before\n"),
                Block::code("", "x", false),
                Block::text("\nafter"),
            ]
        );
    }

    #[test]
    fn pure_html_page_wins_over_fences() {
        let page = "<html>\n<body>\n```\ncode\n```\n</body>\n</html>\n";
        assert_eq!(
            blocks(page),
            vec![Block::DangerousHtml {
                html: page.to_string()
            }]
        );
    }

    #[test]
    fn image_references_bypass_the_scan() {
        let text = "![one](https://x/1.png)\n![two](https://x/2.png)";
        assert_eq!(
            blocks(text),
            vec![
                Block::ImageUrl {
                    url: "https://x/1.png".into(),
                    alt: "one".into()
                },
                Block::ImageUrl {
                    url: "https://x/2.png".into(),
                    alt: "two".into()
                },
            ]
        );
    }

    #[test]
    fn html_detector_is_consulted_before_images() {
        let segmenter = Segmenter::new()
            .with_html_detector(|_: &str| true)
            .with_image_extractor(|_: &str| -> Option<Vec<Segment>> {
                panic!("image extractor must not run after an HTML hit")
            });
        let out = segmenter.blocks("anything");
        assert_eq!(
            out,
            vec![Block::DangerousHtml {
                html: "anything".into()
            }]
        );
    }

    #[test]
    fn extractor_result_is_returned_verbatim() {
        let canned = vec![Segment::new(Span::new(0, 3), Block::text("canned"))];
        let expected = canned.clone();
        let segmenter = Segmenter::plain()
            .with_image_extractor(move |_: &str| Some(canned.clone()));
        assert_eq!(segmenter.segment("abc"), expected);
    }

    #[test]
    fn plain_segmenter_skips_heuristics() {
        let page = "<html><body>```\nx\n```\n</body></html>";
        let out = Segmenter::plain().blocks(page);
        assert_eq!(
            out,
            vec![
                Block::text("<html><body>"),
                Block::code("", "x", false),
                Block::text("\n</body></html>"),
            ]
        );
    }

    #[test]
    fn svg_and_html_documents_between_text() {
        let text = "Icon: <svg width=\"4\"><path/></svg>\nPage:\n<!DOCTYPE html><p>x</p></html>";
        assert_eq!(
            blocks(text),
            vec![
                Block::text("Icon: "),
                Block::code("svg", "<svg width=\"4\"><path/></svg>", false),
                Block::text("\nPage:\n"),
                Block::code("html", "<!DOCTYPE html><p>x</p></html>", false),
            ]
        );
    }

    #[test]
    fn fence_swallows_markup_inside_it() {
        let text = "```html\n<!DOCTYPE html><p>x</p></html>\n```\n";
        assert_eq!(
            blocks(text),
            vec![
                Block::code("html", "<!DOCTYPE html><p>x</p></html>", false),
                Block::text("\n"),
            ]
        );
    }

    #[test]
    fn earliest_start_wins_over_priority() {
        let text = "<svg xmlns=\"a\"></svg>```\nx\n```";
        let out = scan(text);
        assert_eq!(out[0].block, Block::code("svg", "<svg xmlns=\"a\"></svg>", false));
        assert_eq!(out[1].block, Block::code("", "x", false));
    }

    #[test]
    fn streaming_prefixes_converge_on_the_final_parse() {
        let full = "Intro\n```rust\nfn main() {}\n```\nOutro";
        let segmenter = Segmenter::new();

        for end in (0..=full.len()).filter(|&i| full.is_char_boundary(i)) {
            let prefix = &full[..end];
            let segments = segmenter.segment(prefix);
            invariants::check(prefix, &segments);
        }

        // Mid-stream the fence is open...
        let mid = &full[..full.find("}").unwrap()];
        assert!(segmenter.blocks(mid).iter().any(Block::is_partial));

        // ...and closed once the fence arrives
        assert_eq!(
            segmenter.blocks(full),
            vec![
                Block::text("Intro\n"),
                Block::code("rust", "fn main() {}", false),
                Block::text("\nOutro"),
            ]
        );
    }

    #[test]
    fn segmenting_is_idempotent() {
        let text = "a\n```\nb\n```\nc <svg width=\"1\"></svg>";
        let segmenter = Segmenter::new();
        assert_eq!(segmenter.segment(text), segmenter.segment(text));
    }
}
