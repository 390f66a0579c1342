//! Termbase gap finder - rows with a source term but no translation
//!
//! Termbase exports repeat a block of columns per language (term, definition,
//! notes, ...). The first column named exactly after a language holds its
//! term; later repetitions are ignored.

use crate::core::resolver::find_exact;
use crate::error::{PrepError, PrepResult};
use crate::excel::{read_table, TableExporter};
use crate::types::{ColumnRef, Table};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapOptions {
    pub source_language: String,
    pub target_languages: Vec<String>,
    pub output_dir: PathBuf,
}

impl Default for GapOptions {
    fn default() -> Self {
        Self {
            source_language: "German".to_string(),
            target_languages: vec![
                "English".to_string(),
                "French".to_string(),
                "Italian".to_string(),
            ],
            output_dir: PathBuf::from("missing_translations"),
        }
    }
}

/// Missing translations for one target language
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageGaps {
    pub language: String,
    pub column: ColumnRef,
    /// Data indices of rows with source text but no translation
    pub missing_rows: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapAnalysis {
    pub source: ColumnRef,
    /// Rows with non-blank source text
    pub source_entries: usize,
    pub languages: Vec<LanguageGaps>,
    /// Target languages with no matching column
    pub missing_columns: Vec<String>,
}

/// A written gap file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapFile {
    pub language: String,
    pub path: PathBuf,
    pub rows: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GapReport {
    pub analysis: GapAnalysis,
    pub files: Vec<GapFile>,
}

impl GapOptions {
    /// Options from user-supplied names, trimmed; blank target names are dropped
    pub fn new(source_language: &str, target_languages: &[String], output_dir: PathBuf) -> Self {
        Self {
            source_language: source_language.trim().to_string(),
            target_languages: target_languages
                .iter()
                .map(|name| name.trim())
                .filter(|name| !name.is_empty())
                .map(str::to_string)
                .collect(),
            output_dir,
        }
    }
}

/// File name of the gap file for a language
pub fn gap_file_name(language: &str) -> String {
    format!("Missing_{}.xlsx", language)
}

/// Compute missing translations per target language
pub fn find_gaps(table: &Table, options: &GapOptions) -> PrepResult<GapAnalysis> {
    let source = find_exact(&table.headers, &options.source_language).ok_or_else(|| {
        PrepError::MissingSourceColumn {
            aliases: vec![options.source_language.clone()],
        }
    })?;

    let has_source: Vec<bool> = (0..table.rows.len())
        .map(|index| !table.cell(index, source.position).is_blank())
        .collect();
    let source_entries = has_source.iter().filter(|&&present| present).count();

    let mut languages = Vec::new();
    let mut missing_columns = Vec::new();
    for language in &options.target_languages {
        let Some(column) = find_exact(&table.headers, language) else {
            warn!(language = %language, "no column for target language");
            missing_columns.push(language.clone());
            continue;
        };

        let missing_rows = has_source
            .iter()
            .enumerate()
            .filter(|&(index, &present)| present && table.cell(index, column.position).is_blank())
            .map(|(index, _)| index)
            .collect::<Vec<_>>();

        info!(language = %language, missing = missing_rows.len(), "analyzed target language");
        languages.push(LanguageGaps {
            language: language.clone(),
            column,
            missing_rows,
        });
    }

    Ok(GapAnalysis {
        source,
        source_entries,
        languages,
        missing_columns,
    })
}

/// Write one file per language with missing rows; complete languages get none
pub fn write_gap_files(
    table: &Table,
    analysis: &GapAnalysis,
    output_dir: &Path,
) -> PrepResult<Vec<GapFile>> {
    std::fs::create_dir_all(output_dir)?;

    let mut files = Vec::new();
    for gaps in analysis.languages.iter().filter(|g| !g.missing_rows.is_empty()) {
        let rows = gaps
            .missing_rows
            .iter()
            .map(|&index| table.rows[index].as_slice())
            .collect();
        let path = output_dir.join(gap_file_name(&gaps.language));
        TableExporter::new(&table.headers, rows).export(&path)?;

        files.push(GapFile {
            language: gaps.language.clone(),
            path,
            rows: gaps.missing_rows.len(),
        });
    }
    Ok(files)
}

/// Read a termbase export, analyze it and write the gap files
pub fn run_gaps(input: &Path, options: &GapOptions) -> PrepResult<GapReport> {
    if !input.exists() {
        return Err(PrepError::FileNotFound(input.to_path_buf()));
    }
    let table = read_table(input)?;
    let analysis = find_gaps(&table, options)?;
    let files = write_gap_files(&table, &analysis, &options.output_dir)?;
    Ok(GapReport { analysis, files })
}
