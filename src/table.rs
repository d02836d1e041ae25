//! Structured HTML table records, serialized once at the boundary.
//!
//! Row and cell decisions (folding, colours, spans) are made on these
//! records; markup syntax only exists in the `to_html` methods.

use std::fmt::Write;

const PROGRESS_BAR_URL: &str = "https://progress-bar.xyz";
const NO_DATA_WIDTH: u32 = 38;
const NO_DATA_TITLE: &str = "No%20diff";

/// Colour of a progress bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarColor {
    Success,
    NearMiss,
    Failure,
    NoData,
}

impl BarColor {
    pub fn hex(&self) -> &'static str {
        match self {
            BarColor::Success => "7AB56D",
            BarColor::NearMiss => "B6743B",
            BarColor::Failure => "C4625A",
            BarColor::NoData => "498BC4",
        }
    }
}

/// A progress bar image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressBar {
    /// Filled to `fill` percent, labelled with the value.
    Measured { fill: i64, color: BarColor },
    /// Fixed-width, full, textless bar titled "No diff".
    NoData,
}

impl ProgressBar {
    pub fn color(&self) -> BarColor {
        match self {
            ProgressBar::Measured { color, .. } => *color,
            ProgressBar::NoData => BarColor::NoData,
        }
    }

    pub fn image_url(&self) -> String {
        let color = self.color().hex();
        match self {
            ProgressBar::Measured { fill, .. } => {
                format!("{PROGRESS_BAR_URL}/{fill}/?progress_color={color}")
            }
            ProgressBar::NoData => format!(
                "{PROGRESS_BAR_URL}/100/?show_text=false&width={NO_DATA_WIDTH}&progress_color={color}&title={NO_DATA_TITLE}"
            ),
        }
    }
}

/// Inline content of a cell.
#[derive(Debug, Clone, PartialEq)]
pub enum Inline {
    Text(String),
    Link { href: String, text: String },
    Tooltip { title: String, text: String },
    Progress(ProgressBar),
}

/// A `<td>` cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Cell {
    pub row_span: Option<usize>,
    pub content: Vec<Inline>,
}

impl Cell {
    pub fn new(content: Vec<Inline>) -> Self {
        Self {
            row_span: None,
            content,
        }
    }

    #[must_use]
    pub fn spanning(mut self, rows: usize) -> Self {
        self.row_span = Some(rows);
        self
    }

    pub fn to_html(&self) -> String {
        let mut out = String::from("<td");
        if let Some(span) = self.row_span {
            let _ = write!(out, " rowspan={span}");
        }
        out.push('>');
        for inline in &self.content {
            inline.write_html(&mut out);
        }
        out.push_str("</td>");
        out
    }
}

impl Inline {
    fn write_html(&self, out: &mut String) {
        match self {
            Inline::Text(text) => out.push_str(&escape(text)),
            Inline::Link { href, text } => {
                let _ = write!(out, "<a href=\"{}\">{}</a>", escape(href), escape(text));
            }
            Inline::Tooltip { title, text } => {
                let _ = write!(
                    out,
                    "<span title=\"{}\">{}</span>",
                    escape(title),
                    escape(text)
                );
            }
            Inline::Progress(bar) => {
                let _ = write!(out, "<img src=\"{}\" />", escape(&bar.image_url()));
            }
        }
    }
}

/// A `<tr>` of data cells. Cells covered by a row span above are simply
/// absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn to_html(&self) -> String {
        let mut out = String::from("<tr>\n");
        for cell in &self.cells {
            out.push_str(&cell.to_html());
            out.push('\n');
        }
        out.push_str("</tr>");
        out
    }
}

/// Render a header row of `<th>` cells.
pub fn header_row_html(headers: &[&str]) -> String {
    let cells: Vec<String> = headers
        .iter()
        .map(|h| format!("<th>{}</th>", escape(h)))
        .collect();
    format!("<tr>{}</tr>", cells.join("\n"))
}

/// Escape text for use in HTML content and double-quoted attributes.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}
