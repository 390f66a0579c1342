//! Excel reading and writing
//!
//! Two reads of the same workbook feed the pipeline:
//! - Styled read (umya-spreadsheet): cell fills for highlight detection
//! - Tabular read (calamine): header row and data rows
//!
//! Output is written with rust_xlsxwriter.

mod exporter;
mod scanner;
mod table;

pub use exporter::{
    OutputField, RecordExporter, RecordLayout, TableExporter, SOURCE_HEADER, TRANSLATION_SHEET,
};
pub use scanner::{is_yellow, read_styled_cells, scan_cells, scan_workbook, YELLOW_RGB_CODES};
pub use table::{convert_data, read_table, table_from_range};
