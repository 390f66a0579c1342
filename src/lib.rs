//! memoQ Prep - translation spreadsheet preparation
//!
//! This library extracts yellow-highlighted target-language cells from
//! translation spreadsheets and finds missing translations in termbase
//! exports.
//!
//! # Features
//!
//! - Yellow-highlight detection from cell fills
//! - Language column resolution by configurable header aliases
//! - Output workbook with source text plus highlighted targets only
//! - Full-export fallback when nothing is highlighted
//! - Per-language files of untranslated termbase entries
//!
//! # Example
//!
//! ```no_run
//! use memoq_prep::config::ExtractConfig;
//! use memoq_prep::core::{run_extract, ExtractOutcome};
//! use std::path::Path;
//!
//! let config = ExtractConfig::default();
//! let outcome = run_extract(
//!     Path::new("strings.xlsx"),
//!     Path::new("strings_memoQ.xlsx"),
//!     &config,
//!     false,
//! )?;
//!
//! if let ExtractOutcome::Written(summary) = outcome {
//!     println!("Segments: {}", summary.records.len());
//! }
//! # Ok::<(), memoq_prep::error::PrepError>(())
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod excel;
pub mod types;

// Re-export commonly used types
pub use error::{PrepError, PrepResult};
pub use types::{CellValue, ColumnRoleMap, HighlightMap, ProjectedRecord, Table};
