//! Highlight extraction pipeline: scan → read → resolve → project → write

use crate::config::ExtractConfig;
use crate::core::projector::{project_all_rows, project_highlights};
use crate::core::resolver::resolve_columns;
use crate::error::{PrepError, PrepResult};
use crate::excel::{read_table, scan_workbook, RecordExporter, RecordLayout};
use crate::types::{ColumnRoleMap, ProjectedRecord};
use std::path::{Path, PathBuf};
use tracing::info;

/// Marker appended to the input stem for the default output name
pub const OUTPUT_SUFFIX: &str = "_memoQ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractMode {
    /// Only highlighted target cells were exported
    Highlighted,
    /// No highlighted rows were usable; every row was exported
    AllRows,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExtractSummary {
    pub output: PathBuf,
    pub mode: ExtractMode,
    pub highlighted_cells: usize,
    pub highlighted_rows: usize,
    pub roles: ColumnRoleMap,
    pub records: Vec<ProjectedRecord>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExtractOutcome {
    Written(ExtractSummary),
    /// The workbook has no yellow cells
    NoHighlights,
    /// Yellow cells exist but no row had source text
    NoRecords { highlighted_rows: usize },
}

/// `<dir>/<stem>_memoQ.xlsx` next to the input
pub fn default_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    input.with_file_name(format!("{}{}.xlsx", stem, OUTPUT_SUFFIX))
}

/// Extract highlighted cells of `input` into `output`.
///
/// With `fallback_all_rows`, a file that yields no highlighted records is
/// exported in full instead.
pub fn run_extract(
    input: &Path,
    output: &Path,
    config: &ExtractConfig,
    fallback_all_rows: bool,
) -> PrepResult<ExtractOutcome> {
    if !input.exists() {
        return Err(PrepError::FileNotFound(input.to_path_buf()));
    }
    config.validate()?;

    let highlights = scan_workbook(input)?;
    if highlights.is_empty() && !fallback_all_rows {
        return Ok(ExtractOutcome::NoHighlights);
    }

    let table = read_table(input)?;
    let roles = resolve_columns(&table.headers, config)?;

    let mut mode = ExtractMode::Highlighted;
    let mut records = project_highlights(&highlights, &roles, &table);
    if records.is_empty() {
        if !fallback_all_rows {
            return Ok(ExtractOutcome::NoRecords {
                highlighted_rows: highlights.row_count(),
            });
        }
        info!("no highlighted records, exporting all rows");
        mode = ExtractMode::AllRows;
        records = project_all_rows(&roles, &table);
        if records.is_empty() {
            return Ok(if highlights.is_empty() {
                ExtractOutcome::NoHighlights
            } else {
                ExtractOutcome::NoRecords {
                    highlighted_rows: highlights.row_count(),
                }
            });
        }
    }

    let layout = RecordLayout::for_records(&records, &roles);
    RecordExporter::new(&records, layout).export(output)?;
    info!(records = records.len(), "wrote {}", output.display());

    Ok(ExtractOutcome::Written(ExtractSummary {
        output: output.to_path_buf(),
        mode,
        highlighted_cells: highlights.cell_count(),
        highlighted_rows: highlights.row_count(),
        roles,
        records,
    }))
}
