//! Console preview of the ranked addresses.
//!
//! Renders a fixed-width table of the best few records. Column widths grow
//! when an address does not fit the IPv4-sized first column.

use crate::config::OutputSettings;
use crate::measurement::Measurement;
use colored::Colorize;
use log::{info, warn};

/// Longest address that fits the narrow layout.
const NARROW_ADDRESS_WIDTH: usize = 15;

const HEADERS: [&str; 6] = [
    "IP Address",
    "Sent",
    "Received",
    "Loss-Rate",
    "Average-Delay",
    "Download-Speed (MB/s)",
];

/// Column widths for one table layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub header: [usize; 6],
    pub row: [usize; 6],
}

impl Layout {
    pub const NARROW: Layout =
        Layout { header: [15, 5, 9, 10, 14, 21], row: [17, 7, 7, 13, 15, 15] };

    pub const WIDE: Layout =
        Layout { header: [40, 5, 9, 10, 14, 21], row: [42, 7, 7, 13, 15, 15] };

    /// Pick the layout that fits every address about to be shown.
    pub fn for_rows(rows: &[Row]) -> Self {
        if rows.iter().any(|r| r.address.len() > NARROW_ADDRESS_WIDTH) {
            Layout::WIDE
        } else {
            Layout::NARROW
        }
    }
}

/// Format a loss rate as a percentage with 2 decimal places.
pub fn format_loss_rate(loss_rate: f64) -> String {
    format!("{:.2}%", loss_rate * 100.0)
}

/// Format a delay in milliseconds with 2 decimal places.
pub fn format_delay_ms(delay_ms: f64) -> String {
    format!("{:.2}", delay_ms)
}

/// Format a speed given in bytes per second as MB/s with 2 decimal places.
pub fn format_speed_mbs(bytes_per_sec: f64) -> String {
    format!("{:.2}", bytes_per_sec / 1024.0 / 1024.0)
}

/// Display cells of one table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub address: String,
    pub sent: String,
    pub received: String,
    pub loss_rate: String,
    pub average_delay: String,
    pub download_speed: String,
}

impl Row {
    fn cells(&self) -> [&str; 6] {
        [
            &self.address,
            &self.sent,
            &self.received,
            &self.loss_rate,
            &self.average_delay,
            &self.download_speed,
        ]
    }
}

impl TryFrom<&Measurement> for Row {
    type Error = String;

    fn try_from(m: &Measurement) -> Result<Self, Self::Error> {
        if m.is_inconsistent() {
            return Err(format!(
                "{} received {} of {} probes",
                m.address(),
                m.received(),
                m.sent()
            ));
        }

        if !m.download_speed.is_finite() || m.download_speed < 0.0 {
            return Err(format!(
                "{} has download speed {}",
                m.address(),
                m.download_speed
            ));
        }

        Ok(Self {
            address: m.address().to_string(),
            sent: m.sent().to_string(),
            received: m.received().to_string(),
            loss_rate: format_loss_rate(m.loss_rate()),
            average_delay: format_delay_ms(
                m.average_delay().as_secs_f64() * 1000.0,
            ),
            download_speed: format_speed_mbs(m.download_speed),
        })
    }
}

fn pad(cells: [&str; 6], widths: [usize; 6]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect()
}

/// Render the header and up to `limit` rows.
///
/// Returns no lines when `limit` is zero or there is nothing to show.
/// Malformed records are logged with their position and left out.
pub fn render_table(records: &[Measurement], limit: usize) -> Vec<String> {
    let count = limit.min(records.len());
    if count == 0 {
        return Vec::new();
    }

    let rows: Vec<Row> = records[..count]
        .iter()
        .enumerate()
        .filter_map(|(i, m)| match Row::try_from(m) {
            Ok(row) => Some(row),
            Err(e) => {
                warn!("Malformed data for printing at index {}: {}", i, e);
                None
            }
        })
        .collect();

    let layout = Layout::for_rows(&rows);

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(pad(HEADERS, layout.header));
    lines.extend(rows.iter().map(|row| pad(row.cells(), layout.row)));
    lines
}

/// Lines printed after the table when the addresses were also exported.
pub fn render_footer(output: &OutputSettings) -> Vec<String> {
    if output.is_file_output_disabled() {
        return Vec::new();
    }

    let mut lines = vec![format!(
        "Clean IPs (one per line) have been written to {} file.",
        output.path.display()
    )];

    if output.is_default_path() {
        lines.push(format!(
            "Note: The file {} contains only IP addresses, one per line, \
             not full CSV data.",
            output.path.display()
        ));
    }

    lines.push("Full details are shown above in the console.".to_string());
    lines
}

/// Print the ranked records to stdout.
pub fn report(records: &[Measurement], output: &OutputSettings) {
    if output.is_print_disabled() {
        return;
    }

    if records.is_empty() {
        info!("No addresses left after ranking, skipping output results.");
        return;
    }

    let mut lines = render_table(records, output.print_limit).into_iter();
    if let Some(header) = lines.next() {
        println!("{}", header.bold().white());
    }
    for line in lines {
        println!("{}", line);
    }

    let footer = render_footer(output);
    if !footer.is_empty() {
        println!();
        for line in footer {
            println!("{}", line.bright_blue());
        }
    }
}
