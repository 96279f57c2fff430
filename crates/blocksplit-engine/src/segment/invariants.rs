use crate::blocks::{Block, Segment};

/// Validates segmenter output invariants.
///
/// Asserts that:
/// - Spans are non-empty and within text bounds
/// - Spans tile the text in order (each starts where the previous ended,
///   the first at 0 and the last at the end)
/// - `Text` blocks carry exactly the source they span
///
/// # Panics
/// Panics with a descriptive message if any invariant is violated.
pub fn check(text: &str, segments: &[Segment]) {
    let n = text.len();
    let mut expected_start = 0;

    for s in segments {
        assert!(
            s.span.start == expected_start,
            "gap or overlap before {:?}: expected start {} (text len: {})",
            s.span,
            expected_start,
            n
        );
        assert!(
            !s.span.is_empty() && s.span.end <= n,
            "span empty or out of bounds: {:?} (text len: {})",
            s.span,
            n
        );
        if let Block::Text { content } = &s.block {
            assert_eq!(
                content,
                s.span.slice(text),
                "text block does not match its span {:?}",
                s.span
            );
        }
        expected_start = s.span.end;
    }

    assert!(
        expected_start == n,
        "segments stop at {} but text len is {}",
        expected_start,
        n
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blocks::Span;

    #[test]
    fn accepts_empty_output_for_empty_text() {
        check("", &[]);
    }

    #[test]
    #[should_panic(expected = "segments stop at")]
    fn rejects_missing_tail() {
        check("abc", &[Segment::new(Span::new(0, 2), Block::text("ab"))]);
    }

    #[test]
    #[should_panic(expected = "gap or overlap")]
    fn rejects_gaps() {
        check(
            "abcd",
            &[
                Segment::new(Span::new(0, 1), Block::text("a")),
                Segment::new(Span::new(2, 4), Block::text("cd")),
            ],
        );
    }

    #[test]
    #[should_panic(expected = "does not match its span")]
    fn rejects_text_that_differs_from_source() {
        check("abc", &[Segment::new(Span::new(0, 3), Block::text("xyz"))]);
    }
}
