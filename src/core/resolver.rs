//! Column resolution - header row → role positions

use crate::config::ExtractConfig;
use crate::error::{PrepError, PrepResult};
use crate::types::{ColumnRef, ColumnRoleMap};
use tracing::{debug, warn};

/// Find the first header matching any alias, case-insensitively
pub fn find_column(headers: &[String], aliases: &[String]) -> Option<ColumnRef> {
    let aliases: Vec<String> = aliases.iter().map(|a| a.to_uppercase()).collect();
    headers
        .iter()
        .position(|header| aliases.contains(&header.to_uppercase()))
        .map(|idx| ColumnRef {
            header: headers[idx].clone(),
            position: idx as u32 + 1,
        })
}

/// Find the first header exactly equal to `name`
pub fn find_exact(headers: &[String], name: &str) -> Option<ColumnRef> {
    headers
        .iter()
        .position(|header| header == name)
        .map(|idx| ColumnRef {
            header: headers[idx].clone(),
            position: idx as u32 + 1,
        })
}

/// Resolve source, category and target columns.
///
/// A missing source column is fatal. Missing targets are recorded in
/// `missing_targets` and left out of every record.
pub fn resolve_columns(headers: &[String], config: &ExtractConfig) -> PrepResult<ColumnRoleMap> {
    let source = find_column(headers, &config.source).ok_or_else(|| {
        PrepError::MissingSourceColumn {
            aliases: config.source.clone(),
        }
    })?;
    debug!(header = %source.header, position = source.position, "source column");

    let category = find_exact(headers, &config.category_column);

    let mut targets = Vec::new();
    let mut missing_targets = Vec::new();
    for code in &config.languages {
        match find_column(headers, &config.aliases_for(code)) {
            Some(column) => {
                debug!(
                    code = %code,
                    header = %column.header,
                    position = column.position,
                    "target column"
                );
                targets.push((code.clone(), column));
            }
            None => {
                warn!(code = %code, "target column not found");
                missing_targets.push(code.clone());
            }
        }
    }

    Ok(ColumnRoleMap {
        source,
        category,
        targets,
        missing_targets,
    })
}
