use std::sync::OnceLock;

use regex::Regex;

use super::ImageReferenceExtractor;
use crate::blocks::{Block, Segment, Span};

/// Recognizes replies that consist only of Markdown image references, one
/// per line, e.g. the output of an image generation tool.
///
/// Blank lines are allowed anywhere and are folded into the span of the
/// neighbouring image so the returned segments still tile the input. Any
/// other line (prose, two images on one line, an empty URL) rejects the whole
/// text and leaves it to the scanner.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownImageHeuristic;

fn image_ref_regex() -> &'static Regex {
    static IMAGE_REF_REGEX: OnceLock<Regex> = OnceLock::new();
    IMAGE_REF_REGEX.get_or_init(|| {
        Regex::new(r"^!\[([^\]\n]*)\]\(([^)\s]+)\)$").expect("Invalid image reference regex")
    })
}

impl ImageReferenceExtractor for MarkdownImageHeuristic {
    fn extract(&self, text: &str) -> Option<Vec<Segment>> {
        let re = image_ref_regex();
        let mut segments: Vec<Segment> = Vec::new();
        let mut leading_blank: Option<usize> = None;
        let mut offset = 0;

        for line in text.split_inclusive('\n') {
            let line_span = Span::new(offset, offset + line.len());
            offset = line_span.end;

            let trimmed = line.trim();
            if trimmed.is_empty() {
                match segments.last_mut() {
                    Some(last) => last.span.end = line_span.end,
                    None => {
                        leading_blank.get_or_insert(line_span.start);
                    }
                }
                continue;
            }

            let caps = re.captures(trimmed)?;
            let start = leading_blank.take().unwrap_or(line_span.start);
            segments.push(Segment::new(
                Span::new(start, line_span.end),
                Block::ImageUrl {
                    url: caps[2].to_string(),
                    alt: caps[1].to_string(),
                },
            ));
        }

        if segments.is_empty() {
            None
        } else {
            Some(segments)
        }
    }
}
