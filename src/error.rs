use std::path::PathBuf;
use thiserror::Error;

pub type PrepResult<T> = Result<T, PrepError>;

#[derive(Error, Debug)]
pub enum PrepError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Input file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Not a readable spreadsheet: {0}")]
    FileFormat(String),

    #[error("No source column found (looking for {})", .aliases.join(", "))]
    MissingSourceColumn { aliases: Vec<String> },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Excel export error: {0}")]
    Export(String),
}
