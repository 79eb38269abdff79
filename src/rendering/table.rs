//! Text and JSON rendering of a [`PageView`].

use crate::models::Record;
use crate::store::FallbackBanner;
use crate::view::{PageView, PaginationStrip};
use crate::{Error, Result};
use serde_json::{Value, json};
use std::fmt::Write;
use std::str::FromStr;

/// Widest a column may grow before cells are truncated.
const MAX_COLUMN_WIDTH: usize = 32;

/// Marker appended to the id of a record the server has not confirmed.
const PENDING_MARKER: char = '*';

/// Output format for rendered pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Aligned plain-text table.
    #[default]
    Table,
    /// Pretty-printed JSON document.
    Json,
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "table" | "text" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            other => Err(Error::InvalidInput(format!(
                "unknown output format '{other}' (expected table or json)"
            ))),
        }
    }
}

/// Renders pages of one resource.
#[derive(Debug, Clone)]
pub struct TableRenderer<'a> {
    label: &'a str,
    columns: &'a [&'a str],
    format: OutputFormat,
}

impl<'a> TableRenderer<'a> {
    /// Creates a renderer for the given columns. The id column is always
    /// shown first.
    #[must_use]
    pub const fn new(label: &'a str, columns: &'a [&'a str]) -> Self {
        Self {
            label,
            columns,
            format: OutputFormat::Table,
        }
    }

    /// Sets the output format.
    #[must_use]
    pub const fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Renders a page, preceded by the banner when one is raised.
    #[must_use]
    pub fn render(&self, page: &PageView, banner: Option<&FallbackBanner>) -> String {
        match self.format {
            OutputFormat::Table => self.render_table(page, banner),
            OutputFormat::Json => self.render_json(page, banner),
        }
    }

    fn render_table(&self, page: &PageView, banner: Option<&FallbackBanner>) -> String {
        let mut out = String::new();
        if let Some(banner) = banner {
            let _ = writeln!(out, "! {banner}");
            out.push('\n');
        }

        let _ = write!(out, "{}", self.label);
        if !page.search.is_empty() {
            let _ = write!(out, " matching \"{}\"", page.search);
        }
        let _ = writeln!(out, " ({} total)", page.total_matches);

        if page.is_empty() {
            out.push_str("No records found.\n");
        } else {
            self.write_rows(&mut out, &page.rows);
            if page.rows.iter().any(Record::is_pending) {
                let _ = writeln!(out, "{PENDING_MARKER} not yet synced with the server");
            }
        }

        out.push('\n');
        out.push_str(&render_strip(&page.strip));
        out.push('\n');
        out
    }

    fn write_rows(&self, out: &mut String, rows: &[Record]) {
        let mut header = vec!["id".to_string()];
        header.extend(self.columns.iter().map(|c| (*c).to_string()));

        let cells: Vec<Vec<String>> = rows
            .iter()
            .map(|record| {
                let mut row = vec![id_cell(record)];
                row.extend(
                    self.columns
                        .iter()
                        .map(|column| truncate(&record.field_text(column).unwrap_or_default())),
                );
                row
            })
            .collect();

        let widths: Vec<usize> = (0..header.len())
            .map(|i| {
                cells
                    .iter()
                    .map(|row| row[i].chars().count())
                    .chain(std::iter::once(header[i].chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write_line(out, &header, &widths);
        let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
        write_line(out, &rule, &widths);
        for row in &cells {
            write_line(out, row, &widths);
        }
    }

    fn render_json(&self, page: &PageView, banner: Option<&FallbackBanner>) -> String {
        let document = json!({
            "resource": self.label,
            "search": page.search,
            "totalMatches": page.total_matches,
            "page": page.strip.current,
            "totalPages": page.strip.total_pages,
            "perPage": page.per_page,
            "items": page.rows.iter().map(Record::to_view_json).collect::<Vec<Value>>(),
            "banner": banner.map(|b| json!({
                "message": b.message,
                "raisedAt": b.raised_at,
            })),
        });
        serde_json::to_string_pretty(&document).unwrap_or_else(|_| "{}".to_string())
    }
}

/// Renders `« Previous | [1] 2 3 | Next »`, with disabled ends in
/// parentheses.
#[must_use]
pub fn render_strip(strip: &PaginationStrip) -> String {
    let previous = if strip.previous_enabled {
        "« Previous"
    } else {
        "(« Previous)"
    };
    let next = if strip.next_enabled {
        "Next »"
    } else {
        "(Next »)"
    };
    let pages: Vec<String> = strip
        .pages
        .iter()
        .map(|n| {
            if *n == strip.current {
                format!("[{n}]")
            } else {
                n.to_string()
            }
        })
        .collect();

    if pages.is_empty() {
        format!("{previous} | {next}")
    } else {
        format!("{previous} | {} | {next}", pages.join(" "))
    }
}

fn id_cell(record: &Record) -> String {
    if record.is_pending() {
        format!("{}{PENDING_MARKER}", record.id)
    } else {
        record.id.to_string()
    }
}

fn truncate(text: &str) -> String {
    let single_line = text.replace(['\n', '\r'], " ");
    if single_line.chars().count() <= MAX_COLUMN_WIDTH {
        return single_line;
    }
    let mut cut: String = single_line.chars().take(MAX_COLUMN_WIDTH - 3).collect();
    cut.push_str("...");
    cut
}

fn write_line(out: &mut String, cells: &[String], widths: &[usize]) {
    let line: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, &width)| format!("{cell:<width$}"))
        .collect();
    let _ = writeln!(out, "{}", line.join("  ").trim_end());
}
