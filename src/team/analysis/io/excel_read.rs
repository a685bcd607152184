use std::path::Path;

use calamine::{DataType, Reader, Xlsx, open_workbook};
use tracing::{info, instrument};

use crate::team::analysis::error::{AnalysisError, Result};
use crate::team::analysis::model::{Cell, RawTable};

/// Reads the first worksheet of an Excel workbook. The first row supplies the
/// column labels and every following row is kept, blank or not, so row
/// positions stay aligned with the worksheet.
#[instrument(level = "info", skip_all, fields(input = %path.display()))]
pub fn read_table(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        return Err(AnalysisError::MissingInput(path.to_path_buf()));
    }

    let mut workbook: Xlsx<_> = open_workbook(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| AnalysisError::EmptyWorkbook(path.to_path_buf()))?
        .map_err(AnalysisError::from)?;

    let table = range_to_table(&range);
    info!(
        column_count = table.columns.len(),
        row_count = table.rows.len(),
        "loaded worksheet"
    );
    Ok(table)
}

fn range_to_table(range: &calamine::Range<DataType>) -> RawTable {
    let mut rows = range.rows();
    let columns: Vec<String> = match rows.next() {
        Some(first_row) => first_row
            .iter()
            .map(cell_to_string)
            .collect(),
        None => Vec::new(),
    };

    let body: Vec<Vec<Cell>> = rows
        .map(|row| row.iter().map(to_cell).collect::<Vec<_>>())
        .collect();

    // Ranges start at the first used cell, not necessarily A1.
    let header_row = range.start().map(|(row, _)| row as usize + 1).unwrap_or(1);
    RawTable::new(columns, body).with_header_row(header_row)
}

fn to_cell(cell: &DataType) -> Cell {
    match cell {
        DataType::String(value) => Cell::Text(value.clone()),
        DataType::Float(value) => Cell::Number(*value),
        DataType::Int(value) => Cell::Number(*value as f64),
        DataType::Bool(value) => Cell::Bool(*value),
        DataType::Empty => Cell::Empty,
        other => Cell::Text(other.to_string()),
    }
}

fn cell_to_string(cell: &DataType) -> String {
    match cell {
        DataType::String(value) => value.clone(),
        DataType::Empty => String::new(),
        other => other.to_string(),
    }
}
