use std::path::Path;

use rust_xlsxwriter::{Format, Workbook, Worksheet};

use crate::error::InventoryError;
use crate::models::{InventorySnapshot, TableRow, CLUSTER_COLUMNS, VM_COLUMNS};
use crate::services::sort_service::numeric_value;
use crate::services::vm_service::{expand_rows, totals_row};

/// Extra character width added on top of the longest cell in each column.
const COLUMN_PADDING: usize = 2;

/// Write the two-sheet workbook: "Cluster" (Tag/Value) and "Virtual
/// Machines" (the expanded rows plus the totals row).
///
/// The rows come from the same snapshot and the same expansion routine the
/// live table uses, so row counts and totals match what was on screen.
/// Header rows and the final (totals) row of the VM sheet are bold; column
/// widths track the longest stringified cell. Refuses to write when either
/// mapping is empty.
pub fn write_workbook(snapshot: &InventorySnapshot, path: &Path) -> Result<(), InventoryError> {
    if !snapshot.is_exportable() {
        return Err(InventoryError::EmptyExport);
    }

    let mut workbook = Workbook::new();
    let bold = Format::new().set_bold();

    let cluster_rows: Vec<Vec<String>> = snapshot
        .cluster
        .iter()
        .map(|(tag, value)| vec![tag.clone(), value.clone()])
        .collect();
    let sheet = workbook.add_worksheet().set_name("Cluster")?;
    write_sheet(sheet, &CLUSTER_COLUMNS, &cluster_rows, &bold, false)?;

    let mut vm_rows: Vec<Vec<String>> = expand_rows(&snapshot.vms).iter().map(row_cells).collect();
    vm_rows.push(row_cells(&totals_row(&snapshot.vms)));
    let sheet = workbook.add_worksheet().set_name("Virtual Machines")?;
    write_sheet(sheet, &VM_COLUMNS, &vm_rows, &bold, true)?;

    workbook.save(path)?;
    tracing::info!(path = %path.display(), "workbook written");
    Ok(())
}

fn row_cells(row: &TableRow) -> Vec<String> {
    row.cells().iter().map(|c| c.to_string()).collect()
}

fn write_sheet(
    sheet: &mut Worksheet,
    columns: &[&str],
    rows: &[Vec<String>],
    bold: &Format,
    bold_last_row: bool,
) -> Result<(), InventoryError> {
    for (col, header) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *header, bold)?;
    }

    for (r, row) in rows.iter().enumerate() {
        let emphasized = bold_last_row && r + 1 == rows.len();
        for (c, cell) in row.iter().enumerate() {
            write_cell(sheet, (r + 1) as u32, c as u16, cell, emphasized.then_some(bold))?;
        }
    }

    for (col, header) in columns.iter().enumerate() {
        let widest = rows
            .iter()
            .map(|row| row.get(col).map_or(0, |c| c.chars().count()))
            .max()
            .unwrap_or(0);
        let width = widest.max(header.chars().count()) + COLUMN_PADDING;
        sheet.set_column_width(col as u16, width as f64)?;
    }

    Ok(())
}

/// Numeric-looking cells become real numbers so spreadsheet arithmetic
/// works on the exported columns; the numeric test is the same one the
/// sort engine applies.
fn write_cell(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    cell: &str,
    format: Option<&Format>,
) -> Result<(), InventoryError> {
    match (numeric_value(cell), format) {
        (Some(n), Some(f)) => sheet.write_number_with_format(row, col, n, f)?,
        (Some(n), None) => sheet.write_number(row, col, n)?,
        (None, Some(f)) => sheet.write_string_with_format(row, col, cell, f)?,
        (None, None) => sheet.write_string(row, col, cell)?,
    };
    Ok(())
}
