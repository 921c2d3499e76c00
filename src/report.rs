//! Plain-text table of per-target statistics.

use std::fmt::Write;
use std::io;

use crate::latency_grade::LatencyGrade;
use crate::ping::PingTarget;

const HEADERS: [&str; 11] = [
    "Address",
    "Last (ms)",
    "Min (ms)",
    "Max (ms)",
    "Avg (ms)",
    "StdDev (ms)",
    "Success",
    "Fail",
    "Loss (%)",
    "Last Fail",
    "Grade",
];
const GRADE_COLUMN: usize = HEADERS.len() - 1;

pub const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[derive(Debug, Clone, Copy)]
pub struct TableStyle {
    pub green_threshold: u64,
    pub yellow_threshold: u64,
    /// Wrap the grade column in ANSI colors.
    pub color: bool,
}

fn millis(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.1}")).unwrap_or_default()
}

fn row(target: &PingTarget, style: &TableStyle) -> ([String; HEADERS.len()], LatencyGrade) {
    let stats = target.statistics();
    let grade = LatencyGrade::from_ping_response(
        target.last_response_time(),
        style.green_threshold,
        style.yellow_threshold,
    );
    let grade_cell = if stats.total_count() == 0 {
        String::new()
    } else {
        grade.to_string()
    };

    let cells = [
        target.address().to_string(),
        millis(target.last_response_time()),
        millis(stats.min()),
        millis(stats.max()),
        millis(stats.mean()),
        millis(stats.stddev()),
        stats.sample_count().to_string(),
        stats.lost_count().to_string(),
        stats
            .loss_rate()
            .map(|rate| format!("{:.2}", rate * 100.0))
            .unwrap_or_default(),
        target
            .last_failure()
            .map(|at| at.format("%H:%M:%S").to_string())
            .unwrap_or_default(),
        grade_cell,
    ];
    (cells, grade)
}

/// Renders one line per target. Cells without data are left blank.
pub fn render_table(targets: &[PingTarget], style: &TableStyle) -> String {
    let rows: Vec<_> = targets.iter().map(|target| row(target, style)).collect();

    let mut widths = HEADERS.map(str::len);
    for (cells, _) in &rows {
        for (width, cell) in widths.iter_mut().zip(cells) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header: Vec<String> = HEADERS
        .iter()
        .enumerate()
        .map(|(i, h)| pad(h, widths[i], i))
        .collect();
    let _ = writeln!(out, "{}", header.join("  ").trim_end());
    let total_width = widths.iter().sum::<usize>() + 2 * (widths.len() - 1);
    let _ = writeln!(out, "{}", "-".repeat(total_width));

    for (cells, grade) in &rows {
        let line: Vec<String> = cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let padded = pad(cell, widths[i], i);
                if style.color && i == GRADE_COLUMN && !cell.is_empty() {
                    format!("\x1b[{}m{}\x1b[0m", grade.ansi_color(), padded)
                } else {
                    padded
                }
            })
            .collect();
        let _ = writeln!(out, "{}", line.join("  ").trim_end());
    }

    out
}

/// Writes a rendered table, clearing the screen first when `clear` is set.
/// Fails once the reader has gone away.
pub fn write_table<W: io::Write>(out: &mut W, table: &str, clear: bool) -> io::Result<()> {
    if clear {
        write!(out, "{CLEAR_SCREEN}{table}")?;
    } else {
        writeln!(out, "{table}")?;
    }
    out.flush()
}

/// Address and grade are left aligned, numbers right aligned.
fn pad(cell: &str, width: usize, column: usize) -> String {
    if column == 0 || column == GRADE_COLUMN {
        format!("{cell:<width$}")
    } else {
        format!("{cell:>width$}")
    }
}
