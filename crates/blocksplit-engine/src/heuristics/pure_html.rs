use super::PureHtmlDetector;

/// Detects responses that are a complete HTML page, such as the error page a
/// proxy or gateway serves in place of the expected model output.
///
/// A page must open with `<html` or `<!doctype html` and close with `</html>`
/// (ASCII case-insensitive, surrounding whitespace ignored). Documents that
/// begin with the exact `<!DOCTYPE html>` prefix are what models emit when
/// asked for HTML; those are left to the scanner, which shows them as code.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlPageHeuristic;

impl HtmlPageHeuristic {
    pub const ARTIFACT_DOCTYPE: &'static str = "<!DOCTYPE html>";
}

impl PureHtmlDetector for HtmlPageHeuristic {
    fn is_pure_html(&self, text: &str) -> bool {
        let trimmed = text.trim();
        if !(trimmed.starts_with('<') && trimmed.ends_with('>')) {
            return false;
        }
        if trimmed.starts_with(Self::ARTIFACT_DOCTYPE) {
            return false;
        }

        let opens_page = starts_with_ignore_case(trimmed, "<html")
            || starts_with_ignore_case(trimmed, "<!doctype html");
        opens_page && ends_with_ignore_case(trimmed, "</html>")
    }
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

fn ends_with_ignore_case(s: &str, suffix: &str) -> bool {
    s.len() >= suffix.len()
        && s
            .get(s.len() - suffix.len()..)
            .is_some_and(|tail| tail.eq_ignore_ascii_case(suffix))
}
