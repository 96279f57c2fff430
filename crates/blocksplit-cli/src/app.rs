use anyhow::Result;
use blocksplit_config::HeuristicsConfig;
use blocksplit_engine::{Block, HtmlPageHeuristic, MarkdownImageHeuristic, Segment, Segmenter};
use ratatui::widgets::ListState;
use serde::Serialize;

/// Builds a segmenter with only the heuristics the config enables.
pub fn segmenter_from_config(heuristics: &HeuristicsConfig) -> Segmenter {
    let mut segmenter = Segmenter::plain();
    if heuristics.pure_html {
        segmenter = segmenter.with_html_detector(HtmlPageHeuristic);
    }
    if heuristics.image_references {
        segmenter = segmenter.with_image_extractor(MarkdownImageHeuristic);
    }
    segmenter
}

#[derive(Serialize)]
struct Dump<'a> {
    segments: &'a [Segment],
}

/// Renders the segments of `text` as TOML, one `[[segments]]` entry per block.
pub fn dump(segmenter: &Segmenter, text: &str) -> Result<String> {
    let segments = segmenter.segment(text);
    Ok(toml::to_string_pretty(&Dump {
        segments: &segments,
    })?)
}

/// Preview state: a source text revealed chunk by chunk, re-segmented in full
/// after every step the way a streaming renderer would.
pub struct App {
    source: String,
    revealed: usize,
    chunk_size: usize,
    segmenter: Segmenter,
    pub segments: Vec<Segment>,
    pub list_state: ListState,
}

impl App {
    /// Starts with the whole source revealed.
    pub fn new(source: String, segmenter: Segmenter, chunk_size: usize) -> Self {
        let revealed = source.len();
        let mut app = Self {
            source,
            revealed,
            chunk_size: chunk_size.max(1),
            segmenter,
            segments: Vec::new(),
            list_state: ListState::default(),
        };
        app.resegment();
        app
    }

    pub fn visible_text(&self) -> &str {
        &self.source[..self.revealed]
    }

    pub fn revealed(&self) -> usize {
        self.revealed
    }

    pub fn total(&self) -> usize {
        self.source.len()
    }

    /// Reveals the next chunk, rounded up to a char boundary.
    pub fn step(&mut self) {
        if self.revealed >= self.source.len() {
            return;
        }
        let mut end = (self.revealed + self.chunk_size).min(self.source.len());
        while !self.source.is_char_boundary(end) {
            end += 1;
        }
        self.revealed = end;
        self.resegment();
    }

    pub fn reveal_all(&mut self) {
        self.revealed = self.source.len();
        self.resegment();
    }

    pub fn reset(&mut self) {
        self.revealed = 0;
        self.resegment();
    }

    pub fn next_block(&mut self) {
        if self.segments.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.segments.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn previous_block(&mut self) {
        if self.segments.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.segments.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
    }

    pub fn selected_segment(&self) -> Option<&Segment> {
        self.list_state
            .selected()
            .and_then(|i| self.segments.get(i))
    }

    /// One-line description of a block for the list panel.
    pub fn block_label(segment: &Segment) -> String {
        let range = format!("{}..{}", segment.span.start, segment.span.end);
        match &segment.block {
            Block::Code {
                title, is_partial, ..
            } => {
                let title = if title.is_empty() { "-" } else { title.as_str() };
                let open = if *is_partial { " (open)" } else { "" };
                format!("code [{title}]{open} {range}")
            }
            other => format!("{} {range}", other.kind_name()),
        }
    }

    /// Lines of the selected block's content for the content panel.
    pub fn content_lines(&self) -> Vec<String> {
        let Some(segment) = self.selected_segment() else {
            return vec!["Nothing revealed yet - press n to stream".to_string()];
        };
        match &segment.block {
            Block::Text { content } => content.lines().map(str::to_string).collect(),
            Block::Code { title, code, .. } => {
                let mut lines = vec![format!("```{title}")];
                lines.extend(code.lines().map(str::to_string));
                lines.push("```".to_string());
                lines
            }
            Block::DangerousHtml { html } => html.lines().map(str::to_string).collect(),
            Block::ImageUrl { url, alt } => vec![format!("Image: {alt}"), url.clone()],
        }
    }

    fn resegment(&mut self) {
        self.segments = self.segmenter.segment(&self.source[..self.revealed]);
        log::debug!(
            "{} block(s) after revealing {}/{} bytes",
            self.segments.len(),
            self.revealed,
            self.source.len()
        );

        let selected = match self.list_state.selected() {
            _ if self.segments.is_empty() => None,
            Some(i) => Some(i.min(self.segments.len() - 1)),
            None => Some(0),
        };
        self.list_state.select(selected);
    }
}
