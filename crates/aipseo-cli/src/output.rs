//! Output rendering for pretty and JSON modes.
//!
//! Pretty mode prints API responses as a property/value table titled
//! "aipseo Results". JSON mode prints the response as pretty JSON.
//! Responses carrying an `error` key are never rendered as data.
//!
//! Styling is only applied to streams attached to a terminal.

use clap::ValueEnum;
use colored::{Color, ColoredString, Colorize};
use serde_json::Value;
use std::io::{self, IsTerminal, Write};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::error::{CliError, Result};

/// Title of the generic results table
pub const RESULTS_TITLE: &str = "aipseo Results";

const RESULT_COLUMNS: [(&str, Color); 2] = [("Property", Color::Cyan), ("Value", Color::Green)];

const LISTING_COLUMNS: [(&str, Color); 5] = [
    ("ID", Color::Cyan),
    ("Source URL", Color::Green),
    ("DR", Color::Yellow),
    ("Price (USD)", Color::Blue),
    ("Anchor Text", Color::Magenta),
];

/// Output format selected with `--format`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable tables
    #[default]
    Pretty,
    /// Machine-readable JSON
    Json,
}

/// Output writers of one CLI invocation
pub struct Output {
    format: OutputFormat,
    out: Box<dyn Write + Send>,
    err: Box<dyn Write + Send>,
    out_styled: bool,
    err_styled: bool,
}

impl Output {
    /// Write to the process stdout/stderr
    pub fn stdio(format: OutputFormat) -> Self {
        let mut output = Self::new(format, Box::new(io::stdout()), Box::new(io::stderr()));
        output.out_styled = format == OutputFormat::Pretty && io::stdout().is_terminal();
        output.err_styled = io::stderr().is_terminal();
        output
    }

    /// Write into in-memory buffers, readable through the returned handle
    pub fn captured(format: OutputFormat) -> (Self, Captured) {
        let captured = Captured::default();
        let output = Self::new(
            format,
            Box::new(captured.stdout.clone()),
            Box::new(captured.stderr.clone()),
        );
        (output, captured)
    }

    /// Plain output into arbitrary writers
    pub fn new(format: OutputFormat, out: Box<dyn Write + Send>, err: Box<dyn Write + Send>) -> Self {
        Self {
            format,
            out,
            err,
            out_styled: false,
            err_styled: false,
        }
    }

    /// Force terminal styling on or off for both streams
    pub fn with_style(mut self, styled: bool) -> Self {
        self.out_styled = styled;
        self.err_styled = styled;
        self
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn is_json(&self) -> bool {
        self.format == OutputFormat::Json
    }

    /// Print one line to stdout
    pub fn line(&mut self, text: impl AsRef<str>) -> Result<()> {
        writeln!(self.out, "{}", text.as_ref())?;
        Ok(())
    }

    /// Print a `label: value` line to stdout, the value in bold
    pub fn field(&mut self, label: &str, value: impl std::fmt::Display) -> Result<()> {
        let value = self.bold(value.to_string());
        writeln!(self.out, "{}: {}", label, value)?;
        Ok(())
    }

    /// Bold text for stdout
    pub fn bold(&self, text: impl Into<String>) -> String {
        paint(self.out_styled, text.into(), |s| s.bold())
    }

    /// Print `Error: <message>` to stderr
    pub fn error(&mut self, message: impl std::fmt::Display) {
        let label = paint(self.err_styled, "Error:".to_string(), |s| s.red().bold());
        // Nothing sensible is left to do if stderr itself fails
        let _ = writeln!(self.err, "{} {}", label, message);
        let _ = self.err.flush();
    }

    /// Print a value as pretty JSON regardless of the format
    pub fn json(&mut self, value: &Value) -> Result<()> {
        writeln!(self.out, "{}", serde_json::to_string_pretty(value)?)?;
        Ok(())
    }

    /// Render an API response in the selected format
    ///
    /// An `{"error": ...}` response is returned as [`CliError::Api`].
    pub fn render(&mut self, response: &Value) -> Result<()> {
        check_response(response)?;

        match self.format {
            OutputFormat::Json => self.json(response),
            OutputFormat::Pretty => match response {
                Value::Object(map) => {
                    let rows: Vec<Vec<String>> = map
                        .iter()
                        .map(|(key, value)| vec![key.clone(), display_value(value)])
                        .collect();
                    self.table(RESULTS_TITLE, &RESULT_COLUMNS, &rows)
                }
                other => {
                    self.line(RESULTS_TITLE)?;
                    self.json(other)
                }
            },
        }
    }

    /// Render marketplace listings
    pub fn listings(&mut self, listings: &Value) -> Result<()> {
        check_response(listings)?;

        if self.is_json() {
            return self.json(listings);
        }

        let items = listings.as_array().map(Vec::as_slice).unwrap_or_default();
        if items.is_empty() {
            return self.line("No listings match your criteria.");
        }

        let rows: Vec<Vec<String>> = items
            .iter()
            .map(|listing| {
                vec![
                    str_field(listing, "listing_id"),
                    str_field(listing, "source_url"),
                    listing.get("dr_bucket").map(display_value).unwrap_or_default(),
                    format_usd(listing.get("price_usd").and_then(Value::as_f64).unwrap_or(0.0)),
                    str_field(listing, "anchor"),
                ]
            })
            .collect();

        self.table("Marketplace Listings", &LISTING_COLUMNS, &rows)
    }

    /// Print a boxed table; multi-line cells span several rows
    ///
    /// Each column is a header and the color of its cells.
    pub fn table(
        &mut self,
        title: &str,
        columns: &[(&str, Color)],
        rows: &[Vec<String>],
    ) -> Result<()> {
        let mut widths: Vec<usize> = columns.iter().map(|(h, _)| h.chars().count()).collect();
        for row in rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                for line in cell.lines() {
                    widths[i] = widths[i].max(line.chars().count());
                }
            }
        }

        let separator = format!(
            "+{}+",
            widths
                .iter()
                .map(|w| "-".repeat(w + 2))
                .collect::<Vec<_>>()
                .join("+")
        );

        let styled = self.out_styled;
        writeln!(self.out, "{}", paint(styled, title.to_string(), |s| s.italic()))?;
        writeln!(self.out, "{}", separator)?;
        let header: Vec<String> = columns.iter().map(|(h, _)| h.to_string()).collect();
        self.table_row(&header, &widths, |_, cell| paint(styled, cell, |s| s.bold()))?;
        writeln!(self.out, "{}", separator)?;
        for row in rows {
            self.table_row(row, &widths, |i, cell| {
                paint(styled, cell, |s| s.color(columns[i].1))
            })?;
        }
        writeln!(self.out, "{}", separator)?;
        Ok(())
    }

    fn table_row(
        &mut self,
        row: &[String],
        widths: &[usize],
        style: impl Fn(usize, String) -> String,
    ) -> Result<()> {
        let cells: Vec<Vec<&str>> = widths
            .iter()
            .enumerate()
            .map(|(i, _)| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let lines: Vec<&str> = cell.lines().collect();
                if lines.is_empty() {
                    vec![""]
                } else {
                    lines
                }
            })
            .collect();
        let height = cells.iter().map(Vec::len).max().unwrap_or(1);

        for line_no in 0..height {
            let parts: Vec<String> = cells
                .iter()
                .zip(widths)
                .enumerate()
                .map(|(i, (lines, width))| {
                    let text = lines.get(line_no).copied().unwrap_or("");
                    format!(" {} ", style(i, format!("{:<w$}", text, w = *width)))
                })
                .collect();
            writeln!(self.out, "|{}|", parts.join("|"))?;
        }
        Ok(())
    }
}

/// Apply `style` when styling is enabled; padding must happen before
fn paint(enabled: bool, text: String, style: impl FnOnce(ColoredString) -> ColoredString) -> String {
    if enabled {
        style(text.as_str().normal()).to_string()
    } else {
        text
    }
}

/// Fail with the API's message if `response` is an error value
pub fn check_response(response: &Value) -> Result<()> {
    match seo_api::error_message(response) {
        Some(message) => Err(CliError::Api(message)),
        None => Ok(()),
    }
}

/// Format a dollar amount with two decimals
pub fn format_usd(amount: f64) -> String {
    format!("${:.2}", amount)
}

/// Cell text of a JSON value; nested values are pretty-printed
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(_) | Value::Array(_) => {
            serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
        }
        other => other.to_string(),
    }
}

fn str_field(value: &Value, key: &str) -> String {
    value.get(key).and_then(Value::as_str).unwrap_or_default().to_string()
}

/// In-memory stdout/stderr of a captured [`Output`]
#[derive(Clone, Default)]
pub struct Captured {
    stdout: SharedBuffer,
    stderr: SharedBuffer,
}

impl Captured {
    pub fn stdout(&self) -> String {
        self.stdout.contents()
    }

    pub fn stderr(&self) -> String {
        self.stderr.contents()
    }
}

#[derive(Clone, Default)]
struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

impl SharedBuffer {
    fn lock(&self) -> MutexGuard<'_, Vec<u8>> {
        self.0.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.lock()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_pretty_table() {
        let (mut output, captured) = Output::captured(OutputFormat::Pretty);
        output
            .render(&json!({"url": "example.com", "domain_authority": 45}))
            .unwrap();

        let text = captured.stdout();
        assert!(text.starts_with("aipseo Results\n"));
        assert!(text.contains("| Property         | Value       |"));
        assert!(text.contains("| url              | example.com |"));
        assert!(text.contains("| domain_authority | 45          |"));
        // response order, not alphabetical
        assert!(text.find("| url").unwrap() < text.find("| domain_authority").unwrap());
    }

    #[test]
    fn test_render_nested_values_span_rows() {
        let (mut output, captured) = Output::captured(OutputFormat::Pretty);
        output.render(&json!({"settings": {"api_enabled": true}})).unwrap();

        let text = captured.stdout();
        assert!(text.contains("| settings | {"));
        assert!(text.contains("|          |   \"api_enabled\": true"));
    }

    #[test]
    fn test_render_json() {
        let (mut output, captured) = Output::captured(OutputFormat::Json);
        output.render(&json!({"url": "example.com"})).unwrap();

        let parsed: Value = serde_json::from_str(&captured.stdout()).unwrap();
        assert_eq!(parsed, json!({"url": "example.com"}));
    }

    #[test]
    fn test_error_response_is_never_rendered() {
        for format in [OutputFormat::Pretty, OutputFormat::Json] {
            let (mut output, captured) = Output::captured(format);
            let err = output
                .render(&json!({"error": "Unknown endpoint: x"}))
                .unwrap_err();

            assert!(matches!(err, CliError::Api(ref m) if m == "Unknown endpoint: x"));
            assert_eq!(captured.stdout(), "");
        }
    }

    #[test]
    fn test_error_line_goes_to_stderr() {
        let (mut output, captured) = Output::captured(OutputFormat::Pretty);
        output.error("boom");
        assert_eq!(captured.stderr(), "Error: boom\n");
        assert_eq!(captured.stdout(), "");
    }

    #[test]
    fn test_styled_output() {
        colored::control::set_override(true);
        let (output, captured) = Output::captured(OutputFormat::Pretty);
        let mut output = output.with_style(true);

        output.error("boom");
        output
            .listings(&json!([{"listing_id": "lst_1", "source_url": "https://a.com", "dr_bucket": 45, "price_usd": 50.0, "anchor": "x"}]))
            .unwrap();

        let stderr = captured.stderr();
        assert!(stderr.contains("\u{1b}["));
        assert!(stderr.ends_with("boom\n"));
        // cyan id column
        assert!(captured.stdout().contains("\u{1b}[36mlst_1"));
    }

    #[test]
    fn test_captured_output_is_plain() {
        let (mut output, captured) = Output::captured(OutputFormat::Pretty);
        output.field("Tool ID", "abc").unwrap();
        output.render(&json!({"url": "example.com"})).unwrap();
        output.error("boom");

        assert!(!captured.stdout().contains('\u{1b}'));
        assert!(captured.stdout().starts_with("Tool ID: abc\n"));
        assert_eq!(captured.stderr(), "Error: boom\n");
    }

    #[test]
    fn test_listings_table() {
        let (mut output, captured) = Output::captured(OutputFormat::Pretty);
        output
            .listings(&json!([{
                "listing_id": "lst_12345678",
                "source_url": "https://example1.com/blog/post-1",
                "dr_bucket": 45,
                "price_usd": 50.0,
                "anchor": "sample anchor text 1"
            }]))
            .unwrap();

        let text = captured.stdout();
        assert!(text.starts_with("Marketplace Listings\n"));
        assert!(text.contains("lst_12345678"));
        assert!(text.contains("$50.00"));
        assert!(text.contains("| 45 |"));
    }

    #[test]
    fn test_empty_listings() {
        let (mut output, captured) = Output::captured(OutputFormat::Pretty);
        output.listings(&json!([])).unwrap();
        assert_eq!(captured.stdout(), "No listings match your criteria.\n");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(75.0), "$75.00");
        assert_eq!(format_usd(123.456), "$123.46");
    }
}
