//! Excel exporter implementation

use crate::error::{PrepError, PrepResult};
use crate::types::{CellValue, ColumnRoleMap, ProjectedRecord};
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Sheet name of extraction output
pub const TRANSLATION_SHEET: &str = "Translation";

/// Header of the source column in extraction output
pub const SOURCE_HEADER: &str = "Source";

const CATEGORY_WIDTH: f64 = 30.0;
const TEXT_WIDTH: f64 = 80.0;

const DATE_FORMAT: &str = "yyyy-mm-dd";
const DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// One column of extraction output
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputField {
    /// Category column, headed by its original header
    Category(String),
    Source,
    /// Target language, headed by its code
    Target(String),
}

impl OutputField {
    pub fn header(&self) -> &str {
        match self {
            OutputField::Category(header) => header,
            OutputField::Source => SOURCE_HEADER,
            OutputField::Target(code) => code,
        }
    }

    pub fn width(&self) -> f64 {
        match self {
            OutputField::Category(_) => CATEGORY_WIDTH,
            OutputField::Source | OutputField::Target(_) => TEXT_WIDTH,
        }
    }
}

/// Column order of extraction output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordLayout {
    pub fields: Vec<OutputField>,
}

impl RecordLayout {
    /// Category first when any record has one, then source, then targets in
    /// configured order
    pub fn for_records(records: &[ProjectedRecord], roles: &ColumnRoleMap) -> Self {
        let mut fields = Vec::new();
        if let Some(category) = &roles.category {
            if records.iter().any(|r| r.category.is_some()) {
                fields.push(OutputField::Category(category.header.clone()));
            }
        }
        fields.push(OutputField::Source);
        fields.extend(
            roles
                .targets
                .iter()
                .map(|(code, _)| OutputField::Target(code.clone())),
        );
        Self { fields }
    }

    pub fn headers(&self) -> Vec<&str> {
        self.fields.iter().map(OutputField::header).collect()
    }

    /// Leading label columns kept visible while scrolling
    pub fn frozen_columns(&self) -> u16 {
        self.fields
            .iter()
            .take_while(|f| matches!(f, OutputField::Category(_) | OutputField::Source))
            .count() as u16
    }

    fn value<'a>(&self, field: &OutputField, record: &'a ProjectedRecord) -> Option<&'a CellValue> {
        match field {
            OutputField::Category(_) => record.category.as_ref(),
            OutputField::Source => Some(&record.source),
            OutputField::Target(code) => record.target(code),
        }
    }
}

/// Writes projected records to a single-sheet workbook
pub struct RecordExporter<'a> {
    records: &'a [ProjectedRecord],
    layout: RecordLayout,
}

impl<'a> RecordExporter<'a> {
    pub fn new(records: &'a [ProjectedRecord], layout: RecordLayout) -> Self {
        Self { records, layout }
    }

    pub fn export(&self, output_path: &Path) -> PrepResult<()> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let text_format = Format::new().set_text_wrap();

        let worksheet = workbook.add_worksheet();
        worksheet
            .set_name(TRANSLATION_SHEET)
            .map_err(|e| PrepError::Export(format!("Failed to set worksheet name: {}", e)))?;

        for (col, field) in self.layout.fields.iter().enumerate() {
            let col = col as u16;
            worksheet
                .write_string_with_format(0, col, field.header(), &header_format)
                .map_err(export_error)?;
            worksheet
                .set_column_width(col, field.width())
                .map_err(export_error)?;
        }

        for (idx, record) in self.records.iter().enumerate() {
            let row = idx as u32 + 1;
            for (col, field) in self.layout.fields.iter().enumerate() {
                if let Some(value) = self.layout.value(field, record) {
                    write_cell(worksheet, row, col as u16, value, &text_format)?;
                }
            }
        }

        worksheet
            .set_freeze_panes(1, self.layout.frozen_columns())
            .map_err(export_error)?;

        save_workbook(&mut workbook, output_path)?;
        debug!(rows = self.records.len(), "wrote {}", output_path.display());
        Ok(())
    }
}

/// Writes a header row plus a subset of data rows, preserving cell types
pub struct TableExporter<'a> {
    headers: &'a [String],
    rows: Vec<&'a [CellValue]>,
}

impl<'a> TableExporter<'a> {
    pub fn new(headers: &'a [String], rows: Vec<&'a [CellValue]>) -> Self {
        Self { headers, rows }
    }

    pub fn export(&self, output_path: &Path) -> PrepResult<()> {
        let mut workbook = Workbook::new();
        let header_format = Format::new().set_bold();
        let text_format = Format::new();

        let worksheet = workbook.add_worksheet();
        for (col, header) in self.headers.iter().enumerate() {
            worksheet
                .write_string_with_format(0, col as u16, header, &header_format)
                .map_err(export_error)?;
        }
        for (idx, row) in self.rows.iter().enumerate() {
            for (col, value) in row.iter().enumerate() {
                write_cell(worksheet, idx as u32 + 1, col as u16, value, &text_format)?;
            }
        }

        save_workbook(&mut workbook, output_path)?;
        debug!(rows = self.rows.len(), "wrote {}", output_path.display());
        Ok(())
    }
}

fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    text_format: &Format,
) -> PrepResult<()> {
    let written = match value {
        CellValue::Empty => return Ok(()),
        CellValue::Text(s) => worksheet.write_string_with_format(row, col, s, text_format),
        CellValue::Number(n) => worksheet.write_number(row, col, *n),
        CellValue::Bool(b) => worksheet.write_boolean(row, col, *b),
        CellValue::DateTime(serial) => {
            let format = Format::new().set_num_format(date_num_format(*serial));
            worksheet.write_number_with_format(row, col, *serial, &format)
        }
    };
    written.map_err(export_error)?;
    Ok(())
}

/// Whole-day serials print as dates, others with their time of day
fn date_num_format(serial: f64) -> &'static str {
    if serial.fract() == 0.0 {
        DATE_FORMAT
    } else {
        DATETIME_FORMAT
    }
}

/// Serialize the workbook and move it into place.
///
/// The file is written next to its destination first; a failed write removes
/// the partial file and leaves any existing destination untouched.
fn save_workbook(workbook: &mut Workbook, output_path: &Path) -> PrepResult<()> {
    let buffer = workbook.save_to_buffer().map_err(export_error)?;
    let partial = partial_path(output_path);

    let written =
        std::fs::write(&partial, &buffer).and_then(|_| std::fs::rename(&partial, output_path));
    if let Err(e) = written {
        let _ = std::fs::remove_file(&partial);
        return Err(PrepError::Io(e));
    }
    Ok(())
}

fn partial_path(output_path: &Path) -> PathBuf {
    let mut name = output_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    output_path.with_file_name(name)
}

fn export_error(e: XlsxError) -> PrepError {
    match e {
        XlsxError::IoError(io) => PrepError::Io(io),
        other => PrepError::Export(other.to_string()),
    }
}
