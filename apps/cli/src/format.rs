use std::time::Duration;

use console::{Alignment, measure_text_width, pad_str};
use ytharvest_core::VideoRow;

const COLUMN_SEPARATOR: &str = " │ ";
const ELLIPSIS: &str = "…";
/// Index of "Video Link" in `VideoRow::HEADERS`. Links are never truncated.
const LINK_COLUMN: usize = 2;

pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

/// Multi-line cell text on one line, lines separated by ` | `.
fn flatten_cell(text: &str) -> String {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join(" | ")
}

fn push_line(output: &mut String, cells: &[String], widths: &[usize]) {
    let padded: Vec<_> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| pad_str(cell, *width, Alignment::Left, Some(ELLIPSIS)))
        .collect();
    output.push_str(padded.join(COLUMN_SEPARATOR).trim_end());
    output.push('\n');
}

/// Render rows as a plain-text table. Each column is as wide as its widest
/// cell, capped at `max_cell_width` but never narrower than its header.
/// The link column always gets its full width.
pub fn render_table(rows: &[VideoRow], max_cell_width: usize) -> String {
    let headers = VideoRow::HEADERS.map(String::from);
    let cells: Vec<[String; 6]> = rows
        .iter()
        .map(|row| row.cells().map(|cell| flatten_cell(&cell)))
        .collect();

    let widths: Vec<usize> = (0..headers.len())
        .map(|col| {
            let content = cells
                .iter()
                .map(|row| measure_text_width(&row[col]))
                .max()
                .unwrap_or(0);
            let cap = if col == LINK_COLUMN {
                content
            } else {
                max_cell_width
            };
            measure_text_width(&headers[col]).max(content.min(cap))
        })
        .collect();

    let mut output = String::new();
    push_line(&mut output, &headers, &widths);

    let rule: Vec<_> = widths.iter().map(|w| "─".repeat(*w)).collect();
    output.push_str(&rule.join("─┼─"));
    output.push('\n');

    for row in &cells {
        push_line(&mut output, row, &widths);
    }

    output
}

/// Full comments and transcript for one row, as markdown.
pub fn format_row_details(row: &VideoRow) -> String {
    let mut output = String::new();
    output.push_str(&format!("## {}. {}\n\n", row.serial_number, row.video_name));
    output.push_str(&format!(
        "**Link:** {} | **Posted:** {}\n\n",
        row.video_link, row.date_posted
    ));

    output.push_str("### Comments\n\n");
    if row.comments.is_empty() {
        output.push_str("(none)\n");
    } else {
        output.push_str(&row.comments);
        output.push('\n');
    }
    output.push('\n');

    output.push_str("### Transcript\n\n");
    output.push_str(&row.transcript);
    output.push('\n');

    output
}
