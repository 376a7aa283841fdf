//! Output rendering and formatting

use comfy_table::{presets::UTF8_FULL, Attribute, Cell, ContentArrangement, Table};
use console::Style;
use pagesum_errors::Error;
use pagesum_events::{EventMessage, ReportEvent, ReportSink};
use pagesum_types::{format_elapsed, group_thousands, FailureKind};
use std::io::{self, Write};
use std::time::Duration;

/// Width of the URL column in per-URL lines
const URL_COLUMN: usize = 60;

/// Printed once a run has handed control back to the trigger
pub const COMPLETION_LINE: &str = "Control returned to start_batch.";

/// Re-trigger cue shown in interactive mode
pub const RETRIGGER_CUE: &str = "Press Enter to run again, q to quit.";

/// Line for one successfully fetched URL
pub fn per_url_line(url: &str, byte_length: u64) -> String {
    format!(
        "{url:<width$} {bytes:>10}",
        width = URL_COLUMN,
        bytes = group_thousands(byte_length)
    )
}

/// Line for one failed URL
pub fn error_line(url: &str, kind: FailureKind, message: &str) -> String {
    match kind {
        FailureKind::Network => format!("Error downloading {url}: {message}"),
        FailureKind::Unexpected => format!("Unexpected error downloading {url}: {message}"),
    }
}

/// The two summary lines closing a run
pub fn summary_lines(total_bytes: u64, elapsed: Duration) -> [String; 2] {
    [
        format!("Total bytes returned:  {}", group_thousands(total_bytes)),
        format!("Elapsed time:          {}", format_elapsed(elapsed)),
    ]
}

/// Sink that renders report events for a terminal (or any writer)
pub struct ConsoleSink<W: Write> {
    out: W,
    json: bool,
    interactive: bool,
    styles: Styles,
}

struct Styles {
    dim: Style,
    warning: Style,
    error: Style,
    bold: Style,
    success: Style,
}

impl Styles {
    fn new(colors: bool) -> Self {
        Self {
            dim: Style::new().dim().force_styling(colors),
            warning: Style::new().yellow().force_styling(colors),
            error: Style::new().red().force_styling(colors),
            bold: Style::new().bold().force_styling(colors),
            success: Style::new().green().force_styling(colors),
        }
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W, json: bool, colors: bool) -> Self {
        Self {
            out,
            json,
            interactive: false,
            styles: Styles::new(colors),
        }
    }

    /// Follow every completion with the re-trigger cue
    #[must_use]
    pub fn interactive(mut self) -> Self {
        self.interactive = true;
        self
    }

    /// Print a line outside the event stream (prompts, rejections)
    pub fn notice(&mut self, text: &str) -> io::Result<()> {
        if self.json {
            return Ok(());
        }
        writeln!(self.out, "{}", self.styles.dim.apply_to(text))?;
        self.out.flush()
    }

    #[cfg(test)]
    fn into_inner(self) -> W {
        self.out
    }

    fn render_text(&mut self, event: &ReportEvent) -> io::Result<()> {
        match event {
            ReportEvent::Started { url_count } => {
                let line = format!("Fetching {url_count} URLs...");
                writeln!(self.out, "{}", self.styles.dim.apply_to(line))?;
            }
            ReportEvent::PerUrl { url, byte_length } => {
                writeln!(self.out, "{}", per_url_line(url, *byte_length))?;
            }
            ReportEvent::Error { url, kind, message } => {
                let style = match kind {
                    FailureKind::Network => &self.styles.warning,
                    FailureKind::Unexpected => &self.styles.error,
                };
                writeln!(self.out, "{}", style.apply_to(error_line(url, *kind, message)))?;
            }
            ReportEvent::Summary {
                total_bytes,
                elapsed,
            } => {
                writeln!(self.out)?;
                for line in summary_lines(*total_bytes, *elapsed) {
                    writeln!(self.out, "{}", self.styles.bold.apply_to(line))?;
                }
            }
            ReportEvent::Completion => {
                writeln!(self.out, "{}", self.styles.success.apply_to(COMPLETION_LINE))?;
                if self.interactive {
                    writeln!(self.out, "{}", self.styles.dim.apply_to(RETRIGGER_CUE))?;
                }
            }
        }
        self.out.flush()
    }
}

impl<W: Write> ReportSink for ConsoleSink<W> {
    fn deliver(&mut self, message: &EventMessage) -> Result<(), Error> {
        if self.json {
            let line = serde_json::to_string(message)?;
            writeln!(self.out, "{line}")?;
            self.out.flush()?;
        } else {
            self.render_text(&message.event)?;
        }
        Ok(())
    }
}

/// Render the URL list as a table, or a JSON array
pub fn render_urls(urls: &[String], json: bool) -> io::Result<()> {
    if json {
        let json = serde_json::to_string_pretty(urls).map_err(io::Error::other)?;
        println!("{json}");
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("URL").add_attribute(Attribute::Bold),
    ]);

    for (index, url) in urls.iter().enumerate() {
        table.add_row(vec![Cell::new(index + 1), Cell::new(url)]);
    }

    println!("{table}");
    println!("{} URLs", urls.len());
    Ok(())
}
