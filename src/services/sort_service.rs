use std::cmp::Ordering;

use crate::models::TableRow;

/// Sort column and direction tracked across repeated header activations.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SortState {
    pub column: Option<usize>,
    pub descending: bool,
}

impl SortState {
    /// Selecting the same column again flips the direction; a new column
    /// starts ascending.
    pub fn activate(&mut self, column: usize) {
        if self.column == Some(column) {
            self.descending = !self.descending;
        } else {
            self.column = Some(column);
            self.descending = false;
        }
    }
}

/// Numeric interpretation of a displayed cell value.
///
/// A value qualifies when removing at most one decimal point leaves only
/// digits; everything else (blank, "N/A", negative, text) compares as text.
pub fn numeric_value(cell: &str) -> Option<f64> {
    let stripped = cell.replacen('.', "", 1);
    if !stripped.is_empty() && stripped.chars().all(|c| c.is_ascii_digit()) {
        cell.parse().ok()
    } else {
        None
    }
}

fn compare_cells(a: &str, b: &str) -> Ordering {
    match (numeric_value(a), numeric_value(b)) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        _ => a.to_lowercase().cmp(&b.to_lowercase()),
    }
}

/// Reorder rows by one column, keeping the totals row pinned last.
///
/// The sort is stable, so tied rows keep their previous relative order.
pub fn sort_rows(rows: &mut Vec<TableRow>, column: usize, descending: bool) {
    let total_index = rows.iter().position(|r| r.is_total());
    let total = total_index.map(|i| rows.remove(i));

    rows.sort_by(|a, b| {
        let ord = compare_cells(a.column(column), b.column(column));
        if descending {
            ord.reverse()
        } else {
            ord
        }
    });

    if let Some(total) = total {
        rows.push(total);
    }
}
