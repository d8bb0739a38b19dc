//! Table encoding
//!
//! Writes the header row followed by every participant row. Cells are
//! quoted only when they contain a separator, a quote or a line break.

use rollcall_core::Table;

/// Encode a table as delimited text
pub fn encode_table(table: &Table) -> String {
    let mut out = String::new();
    push_row(&mut out, table.columns());
    for row in table.rows() {
        push_row(&mut out, row);
    }
    out
}

/// Encode a single cell, quoting when needed
pub fn encode_cell(cell: &str) -> String {
    if needs_quotes(cell) {
        let mut quoted = String::with_capacity(cell.len() + 2);
        quoted.push('"');
        for c in cell.chars() {
            if c == '"' {
                quoted.push('"');
            }
            quoted.push(c);
        }
        quoted.push('"');
        quoted
    } else {
        cell.to_string()
    }
}

fn push_row(out: &mut String, cells: &[String]) {
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        out.push_str(&encode_cell(cell));
    }
    out.push('\n');
}

fn needs_quotes(cell: &str) -> bool {
    cell.contains([',', '"', '\n', '\r'])
}
