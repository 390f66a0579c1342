//! Tabular reader - Excel (.xlsx) → header row + data rows

use crate::error::{PrepError, PrepResult};
use crate::types::{CellValue, Table};
use calamine::{open_workbook, Data, Range, Reader, Xlsx};
use std::path::Path;
use tracing::info;

/// Read the first worksheet as a table.
///
/// Positions are taken from the sheet's absolute coordinates, so column A is
/// always `headers[0]` and row 2 is always `rows[0]`, even when the sheet's
/// used range starts further in.
pub fn read_table(path: &Path) -> PrepResult<Table> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
        PrepError::FileFormat(format!("Failed to open '{}': {}", path.display(), e))
    })?;

    let range = match workbook.worksheet_range_at(0) {
        Some(Ok(range)) => range,
        Some(Err(e)) => {
            return Err(PrepError::FileFormat(format!(
                "Failed to read first worksheet of '{}': {}",
                path.display(),
                e
            )))
        }
        None => {
            return Err(PrepError::FileFormat(format!(
                "'{}' contains no worksheet",
                path.display()
            )))
        }
    };

    let table = table_from_range(&range);
    info!(
        rows = table.rows.len(),
        columns = table.headers.len(),
        "loaded {}",
        path.display()
    );
    Ok(table)
}

/// Convert a calamine range into a table anchored at cell A1
pub fn table_from_range(range: &Range<Data>) -> Table {
    let Some((last_row, last_col)) = range.end() else {
        return Table::default();
    };

    let headers = (0..=last_col)
        .map(|col| header_text(range.get_value((0, col))))
        .collect();

    let rows = (1..=last_row)
        .map(|row| {
            (0..=last_col)
                .map(|col| range.get_value((row, col)).map(convert_data).unwrap_or_default())
                .collect()
        })
        .collect();

    Table::new(headers, rows)
}

fn header_text(cell: Option<&Data>) -> String {
    match cell {
        Some(Data::String(s)) => s.clone(),
        Some(Data::Int(i)) => i.to_string(),
        Some(Data::Float(f)) => f.to_string(),
        Some(Data::Bool(b)) => b.to_string(),
        _ => String::new(),
    }
}

/// Convert a calamine cell to a value
pub fn convert_data(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::DateTime(dt) => CellValue::DateTime(dt.as_f64()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::Text(s.clone()),
        Data::Error(e) => CellValue::Text(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}
