//! Table reconstruction from extracted page text.
//!
//! The source documents lay their tables out with whitespace-aligned
//! columns. A line splitting into three or more cells on runs of two
//! or more spaces (or tabs) is treated as a table row; contiguous runs
//! of such rows form one table. Tables are numbered 0-based per page
//! in reading order, which is what positional classification keys on.
//! The heuristic is tuned to this one family of documents and breaks
//! silently on anything else.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref CELL_SEPARATOR: Regex = Regex::new(r"(?:\t| {2,})+").unwrap();
}

/// One reconstructed table: rows of trimmed, non-empty cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

/// Minimum cells for a line to count as a table row: code, name, and
/// at least one price column.
const MIN_CELLS: usize = 3;

/// Minimum rows for a run to count as a table; a lone aligned line is
/// not a table.
const MIN_ROWS: usize = 2;

/// Reconstruct the tables of one page, in reading order.
pub fn detect_tables(page_text: &str) -> Vec<Table> {
    let mut tables = Vec::new();
    let mut current: Vec<Vec<String>> = Vec::new();

    for line in page_text.lines() {
        let cells = split_cells(line);
        if cells.len() >= MIN_CELLS {
            current.push(cells);
        } else {
            flush(&mut current, &mut tables);
        }
    }
    flush(&mut current, &mut tables);

    tables
}

fn flush(current: &mut Vec<Vec<String>>, tables: &mut Vec<Table>) {
    if current.len() >= MIN_ROWS {
        tables.push(Table {
            rows: std::mem::take(current),
        });
    } else {
        current.clear();
    }
}

fn split_cells(line: &str) -> Vec<String> {
    CELL_SEPARATOR
        .split(line.trim())
        .map(str::trim)
        .filter(|cell| !cell.is_empty())
        .map(str::to_string)
        .collect()
}
