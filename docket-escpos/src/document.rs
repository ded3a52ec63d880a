//! Higher-level document composition on top of the command encoder
//!
//! A [`DocumentBuilder`] turns structured content (banners, tables, lists,
//! receipts) into ready-to-send [`PrintJob`]s. Everything here is pure:
//! the same input always yields the same segment sequence.

use crate::codepage::CodePage;
use crate::encode::{self, CutMode, TextStyle};
use crate::error::{EncodeError, EncodeResult};
use crate::segment::PrintJob;

/// Default line width in columns (58 mm paper; 80 mm printers take 48)
pub const DEFAULT_WIDTH: usize = 32;

/// Composes print documents for a fixed paper width and code page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocumentBuilder {
    width: usize,
    code_page: CodePage,
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH)
    }
}

impl DocumentBuilder {
    pub fn new(width: usize) -> Self {
        Self {
            width: width.max(1),
            code_page: CodePage::default(),
        }
    }

    pub fn with_code_page(mut self, code_page: CodePage) -> Self {
        self.code_page = code_page;
        self
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn code_page(&self) -> CodePage {
        self.code_page
    }

    // === Banner ===

    /// A centered, bold banner framed in `border` characters
    ///
    /// `width` defaults to the builder width and is floored at the text
    /// width plus four, so the frame always closes around the text.
    pub fn banner(&self, text: &str, border: char, width: Option<usize>) -> EncodeResult<PrintJob> {
        let text_cols = text.chars().count();
        let width = width.unwrap_or(self.width).max(text_cols + 4);
        let rule = border.to_string().repeat(width);
        let inner = width - text_cols - 2;
        let pad_left = inner / 2;
        let pad_right = inner - pad_left;
        let middle = format!(
            "{border}{}{text}{}{border}",
            " ".repeat(pad_left),
            " ".repeat(pad_right)
        );

        let mut job = PrintJob::new();
        job.push(encode::style(TextStyle::AlignCenter))
            .push(encode::style(TextStyle::BoldOn))
            .push(encode::line(&rule, false, self.code_page)?)
            .push(encode::line(&middle, false, self.code_page)?)
            .push(encode::line(&rule, false, self.code_page)?)
            .push(encode::style(TextStyle::BoldOff))
            .push(encode::style(TextStyle::AlignLeft))
            .push(encode::feed(2));
        Ok(job)
    }

    // === Table ===

    /// Column widths: the widest cell per column across all rows
    pub fn column_widths(rows: &[Vec<String>]) -> Vec<usize> {
        let Some(first) = rows.first() else {
            return Vec::new();
        };
        let mut widths = vec![0usize; first.len()];
        for row in rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
        widths
    }

    /// A column-aligned table, one text segment per row
    ///
    /// The first row sets the column count; every row must match it. Cells
    /// are left-justified to the widest cell in their column and joined by
    /// two spaces. An empty row set yields an empty job.
    pub fn table(&self, rows: &[Vec<String>]) -> EncodeResult<PrintJob> {
        let mut job = PrintJob::new();
        let Some(first) = rows.first() else {
            return Ok(job);
        };
        let columns = first.len();
        for (index, row) in rows.iter().enumerate() {
            if row.len() != columns {
                return Err(EncodeError::Validation(format!(
                    "table row {index} has {} cells, expected {columns}",
                    row.len()
                )));
            }
        }

        let widths = Self::column_widths(rows);
        for row in rows {
            let cells: Vec<String> = row
                .iter()
                .zip(&widths)
                .map(|(cell, &w)| format!("{cell:<w$}"))
                .collect();
            job.push(encode::line(cells.join("  ").trim_end(), false, self.code_page)?);
        }
        Ok(job)
    }

    // === List ===

    /// A bulleted list, one text segment per item
    pub fn list(&self, items: &[String], bullet: &str) -> EncodeResult<PrintJob> {
        let mut job = PrintJob::new();
        for item in items {
            job.push(encode::line(&format!("{bullet} {item}"), false, self.code_page)?);
        }
        Ok(job)
    }

    // === Receipt ===

    /// A full receipt: body lines, rule, optional centered footer, feed-out
    ///
    /// `cut` appends a full cut after the feed so the paper drops clear of
    /// the cutter.
    pub fn receipt(&self, lines: &[String], footer: Option<&str>, cut: bool) -> EncodeResult<PrintJob> {
        let mut job = PrintJob::new();
        job.push(encode::init());
        for line in lines {
            job.push(encode::line(line, false, self.code_page)?);
        }
        job.push(encode::line(&"-".repeat(self.width), false, self.code_page)?);
        if let Some(footer) = footer {
            job.push(encode::style(TextStyle::AlignCenter))
                .push(encode::line(footer, false, self.code_page)?)
                .push(encode::style(TextStyle::AlignLeft));
        }
        job.push(encode::feed(3));
        if cut {
            job.push(encode::cut(CutMode::Full));
        }
        Ok(job)
    }

    // === Test Page ===

    /// The fixed self-test document used to verify a printer end to end
    pub fn test_page(&self, printer_name: &str) -> EncodeResult<PrintJob> {
        let title = "Printer Self-Test";
        let mut job = PrintJob::new();
        job.push(encode::init())
            .push(encode::line(title, true, self.code_page)?)
            .push(encode::line(&"=".repeat(title.chars().count()), false, self.code_page)?)
            .push(encode::line("If you can read this, the print", false, self.code_page)?)
            .push(encode::line("path is working.", false, self.code_page)?)
            .push(encode::line(&format!("Printer:  {printer_name}"), false, self.code_page)?)
            .push(encode::line(&format!("Platform: {}", std::env::consts::OS), false, self.code_page)?)
            .push(encode::feed(3));
        Ok(job)
    }
}
