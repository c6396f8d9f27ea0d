//! Fixed-format status table.
//!
//! Layout contract: left-aligned cells, each column as wide as its longest
//! cell (header included) plus a 4-space margin appended after every cell,
//! one full-width dash separator under the header, rows in discovery order.

use krsync_core::Registry;

const HEADERS: [&str; 4] = ["Module", "Installed", "Expected", "Latest"];
const MARGIN: usize = 4;

/// Render the version status table, trailing newline included.
pub fn render(registry: &Registry) -> String {
    let rows: Vec<[String; 4]> = registry
        .components()
        .iter()
        .map(|c| {
            [
                c.name.to_string(),
                c.installed
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_default(),
                c.expected.to_string(),
                registry.latest().to_string(),
            ]
        })
        .collect();

    let mut widths = [0usize; 4];
    for (i, header) in HEADERS.iter().enumerate() {
        widths[i] = header.len() + MARGIN;
    }
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.len() + MARGIN);
        }
    }

    let mut out = String::new();
    push_row(&mut out, &HEADERS.map(str::to_owned), &widths);
    out.push_str(&"-".repeat(widths.iter().sum()));
    out.push('\n');
    for row in &rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String; 4], widths: &[usize; 4]) {
    for (cell, width) in cells.iter().zip(widths) {
        out.push_str(cell);
        out.push_str(&" ".repeat(width - cell.len()));
    }
    out.push('\n');
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
