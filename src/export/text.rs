//! Multi-page textual export: one page per step, continued onto further pages when a
//! step's content does not fit.
//!
//! Layout and PDF writing are separate steps. [`layout_step_pages`] is a pure function
//! producing positioned lines, which keeps pagination testable without parsing PDFs;
//! [`render_text_document`] then writes those lines with the standard Helvetica fonts.

use crate::error::ExportError;
use crate::journey::{Journey, Step, Trend};
use crate::export::fonts::text_width;
use crate::render::text::{truncate_with, wrap_with};
use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, Str};
use tracing::debug;

/// A4 portrait, in points.
pub const A4_WIDTH: f64 = 595.28;
pub const A4_HEIGHT: f64 = 841.89;

pub const NO_STEPS_NOTICE: &str = "This journey has no steps.";
pub const NO_METRICS_NOTICE: &str = "No metrics recorded.";
pub const CONTINUED_MARKER: &str = "(continued)";

/// Header lines kept on every page; longer headers end in an ellipsis.
pub const MAX_TITLE_LINES: usize = 2;
pub const MAX_HEADING_LINES: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub struct TextLayoutOptions {
    pub page_width: f64,
    pub page_height: f64,
    pub margin: f64,
    pub title_size: f64,
    pub heading_size: f64,
    pub body_size: f64,
    /// Line height as a multiple of the font size.
    pub line_height: f64,
}

impl Default for TextLayoutOptions {
    fn default() -> Self {
        Self {
            page_width: A4_WIDTH,
            page_height: A4_HEIGHT,
            margin: 40.0,
            title_size: 18.0,
            heading_size: 14.0,
            body_size: 11.0,
            line_height: 1.4,
        }
    }
}

impl TextLayoutOptions {
    /// Width available to wrapped text.
    pub fn content_width(&self) -> f64 {
        (self.page_width - 2.0 * self.margin).max(1.0)
    }

    pub fn with_page_size(mut self, width: f64, height: f64) -> Self {
        self.page_width = width;
        self.page_height = height;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Regular,
    Bold,
}

/// A positioned line; `y` is the baseline measured from the top of the page.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub font: FontStyle,
    pub size: f64,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextPage {
    /// The step this page belongs to; `None` for the cover of an empty journey.
    pub step_index: Option<usize>,
    pub continuation: bool,
    pub lines: Vec<TextLine>,
}

impl TextPage {
    pub fn contains(&self, needle: &str) -> bool {
        self.lines.iter().any(|l| l.text.contains(needle))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextDocument {
    pub width: f64,
    pub height: f64,
    pub pages: Vec<TextPage>,
}

/// Accumulates lines onto pages, breaking to a continuation page when full.
struct PageWriter<'a> {
    options: &'a TextLayoutOptions,
    journey_title: &'a str,
    step_heading: String,
    step_index: Option<usize>,
    pages: Vec<TextPage>,
    current: TextPage,
    header_lines: usize,
    y: f64,
}

impl<'a> PageWriter<'a> {
    fn new(options: &'a TextLayoutOptions, journey_title: &'a str) -> Self {
        Self {
            options,
            journey_title,
            step_heading: String::new(),
            step_index: None,
            pages: Vec::new(),
            current: TextPage {
                step_index: None,
                continuation: false,
                lines: Vec::new(),
            },
            header_lines: 0,
            y: options.margin,
        }
    }

    /// Starts a fresh page for a step and prints the journey and step headers.
    fn begin_step(&mut self, index: Option<usize>, heading: String) {
        self.flush();
        self.step_index = index;
        self.step_heading = heading;
        self.start_page(false);
    }

    fn start_page(&mut self, continuation: bool) {
        self.current = TextPage {
            step_index: self.step_index,
            continuation,
            lines: Vec::new(),
        };
        self.y = self.options.margin;

        let width = self.options.content_width();
        let title_size = self.options.title_size;
        let title = fit_lines(
            self.journey_title,
            width,
            FontStyle::Bold,
            title_size,
            MAX_TITLE_LINES,
        );
        for line in title {
            self.place(&line, FontStyle::Bold, title_size);
        }

        if !self.step_heading.is_empty() {
            let size = self.options.heading_size;
            let mut heading =
                fit_lines(&self.step_heading, width, FontStyle::Bold, size, MAX_HEADING_LINES);
            if continuation {
                let marked = heading
                    .last()
                    .map(|last| format!("{} {}", last, CONTINUED_MARKER))
                    .filter(|m| text_width(m, FontStyle::Bold, size) <= width);
                match marked {
                    Some(marked) => {
                        if let Some(last) = heading.last_mut() {
                            *last = marked;
                        }
                    }
                    None => heading.push(CONTINUED_MARKER.to_string()),
                }
            }
            for line in heading {
                self.place(&line, FontStyle::Bold, size);
            }
        }
        self.header_lines = self.current.lines.len();
        self.gap(self.options.body_size * 0.5);
    }

    fn bottom(&self) -> f64 {
        self.options.page_height - self.options.margin
    }

    /// Places a line without checking for overflow.
    fn place(&mut self, text: &str, font: FontStyle, size: f64) {
        self.y += size * self.options.line_height;
        self.current.lines.push(TextLine {
            text: text.to_string(),
            font,
            size,
            x: self.options.margin,
            y: self.y,
        });
    }

    /// Places a line, moving to a continuation page first if it would not fit.
    fn line(&mut self, text: &str, font: FontStyle, size: f64) {
        if self.y + size * self.options.line_height > self.bottom() && self.has_body() {
            self.flush();
            self.start_page(true);
        }
        self.place(text, font, size);
    }

    fn paragraph(&mut self, text: &str, font: FontStyle, size: f64) {
        let measure = |s: &str| text_width(s, font, size);
        for line in wrap_with(text, self.options.content_width(), measure) {
            if line.is_empty() {
                self.gap(size * 0.5);
            } else {
                self.line(&line, font, size);
            }
        }
    }

    fn gap(&mut self, amount: f64) {
        self.y += amount;
    }

    /// Whether the current page holds anything besides its headers.
    fn has_body(&self) -> bool {
        self.current.lines.len() > self.header_lines
    }

    fn flush(&mut self) {
        if !self.current.lines.is_empty() {
            let page = std::mem::replace(
                &mut self.current,
                TextPage {
                    step_index: None,
                    continuation: false,
                    lines: Vec::new(),
                },
            );
            self.pages.push(page);
        }
    }

    fn finish(mut self) -> Vec<TextPage> {
        self.flush();
        self.pages
    }
}

/// Wraps a header to at most `max_lines`, ending the last kept line in an ellipsis
/// when the text runs longer.
fn fit_lines(
    text: &str,
    width: f64,
    font: FontStyle,
    size: f64,
    max_lines: usize,
) -> Vec<String> {
    let measure = |s: &str| text_width(s, font, size);
    let mut lines: Vec<String> = wrap_with(text, width, measure)
        .into_iter()
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            *last = truncate_with(&format!("{}…", last), width, measure);
        }
    }
    lines
}

/// Lays out the per-step report for a journey.
pub fn layout_step_pages(journey: &Journey, options: &TextLayoutOptions) -> TextDocument {
    let mut writer = PageWriter::new(options, &journey.title);
    let total = journey.steps.len();

    if total == 0 {
        writer.begin_step(None, String::new());
        if !journey.description.trim().is_empty() {
            writer.paragraph(&journey.description, FontStyle::Regular, options.body_size);
            writer.gap(options.body_size);
        }
        writer.line(NO_STEPS_NOTICE, FontStyle::Regular, options.body_size);
    }

    for (i, step) in journey.steps.iter().enumerate() {
        writer.begin_step(
            Some(i),
            format!("Step {} of {}: {}", i + 1, total, step.title),
        );
        write_step_body(&mut writer, step, options);
    }

    let pages = writer.finish();
    debug!(journey = %journey.id, pages = pages.len(), "laid out step report");
    TextDocument {
        width: options.page_width,
        height: options.page_height,
        pages,
    }
}

fn write_step_body(writer: &mut PageWriter<'_>, step: &Step, options: &TextLayoutOptions) {
    let body = options.body_size;

    if !step.phase.trim().is_empty() {
        writer.paragraph(&format!("Phase: {}", step.phase), FontStyle::Regular, body);
    }
    if !step.description.trim().is_empty() {
        writer.gap(body * 0.5);
        writer.paragraph(&step.description, FontStyle::Regular, body);
    }
    if let Some(detail) = &step.detail {
        writer.gap(body * 0.5);
        writer.line("Details", FontStyle::Bold, body);
        writer.paragraph(detail, FontStyle::Regular, body);
    }

    writer.gap(body * 0.5);
    writer.line("Metrics", FontStyle::Bold, body);
    if step.metrics.is_empty() {
        writer.line(NO_METRICS_NOTICE, FontStyle::Regular, body);
    }
    for metric in &step.metrics {
        let trend = match metric.trend {
            Trend::Up => " (up)",
            Trend::Down => " (down)",
            Trend::Neutral => "",
        };
        writer.paragraph(
            &format!("\u{2022} {}: {}{}", metric.label, metric.value, trend),
            FontStyle::Regular,
            body,
        );
    }

    if let Some(signature) = &step.signature {
        writer.gap(body * 0.5);
        writer.paragraph(
            &format!("Signature: {}", signature),
            FontStyle::Regular,
            body * 0.85,
        );
    }
}

/// Writes a laid-out document as a PDF.
pub fn render_text_document(document: &TextDocument) -> Result<Vec<u8>, ExportError> {
    if document.pages.is_empty() {
        return Err(ExportError::PdfConvert("document has no pages".to_string()));
    }

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let regular_id = Ref::new(3);
    let bold_id = Ref::new(4);
    let page_ids: Vec<Ref> = (0..document.pages.len())
        .map(|i| Ref::new(5 + 2 * i as i32))
        .collect();

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id)
        .kids(page_ids.iter().copied())
        .count(page_ids.len() as i32);
    pdf.type1_font(regular_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));
    pdf.type1_font(bold_id)
        .base_font(Name(b"Helvetica-Bold"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    for (page, page_id) in document.pages.iter().zip(&page_ids) {
        let content_id = Ref::new(page_id.get() + 1);

        let mut pdf_page = pdf.page(*page_id);
        pdf_page
            .media_box(Rect::new(
                0.0,
                0.0,
                document.width as f32,
                document.height as f32,
            ))
            .parent(page_tree_id)
            .contents(content_id);
        pdf_page
            .resources()
            .fonts()
            .pair(Name(b"F1"), regular_id)
            .pair(Name(b"F2"), bold_id);
        pdf_page.finish();

        let mut content = Content::new();
        content.set_fill_rgb(0.06, 0.09, 0.16);
        for line in &page.lines {
            let font = match line.font {
                FontStyle::Regular => Name(b"F1"),
                FontStyle::Bold => Name(b"F2"),
            };
            let encoded = encode_win_ansi(&line.text);
            content.begin_text();
            content.set_font(font, line.size as f32);
            content.next_line(line.x as f32, (document.height - line.y) as f32);
            content.show(Str(&encoded));
            content.end_text();
        }
        pdf.stream(content_id, &content.finish());
    }

    Ok(pdf.finish())
}

/// Encodes text for the standard fonts' WinAnsi encoding. Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '\u{a0}'..='\u{ff}' => c as u32 as u8,
            '\u{20ac}' => 0x80,
            '\u{2026}' => 0x85,
            '\u{2018}' => 0x91,
            '\u{2019}' => 0x92,
            '\u{201c}' => 0x93,
            '\u{201d}' => 0x94,
            '\u{2022}' => 0x95,
            '\u{2013}' => 0x96,
            '\u{2014}' => 0x97,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("Hi"), b"Hi".to_vec());
        assert_eq!(encode_win_ansi("\u{2022} é"), vec![0x95, b' ', 0xe9]);
        assert_eq!(encode_win_ansi("日"), vec![b'?']);
    }
}
