//! Row projection - highlighted rows → output records

use crate::types::{CellValue, ColumnRoleMap, HighlightMap, ProjectedRecord, Table, TargetField};
use tracing::debug;

/// Build one record per highlighted data row.
///
/// Target fields carry the tabular value of their cell when it is highlighted,
/// or empty when it is not. Rows without source text are dropped.
pub fn project_highlights(
    highlights: &HighlightMap,
    roles: &ColumnRoleMap,
    table: &Table,
) -> Vec<ProjectedRecord> {
    let mut records = Vec::new();

    for sheet_row in highlights.rows().filter(|&row| row > Table::HEADER_ROW) {
        let Some(index) = table.data_index(sheet_row) else {
            debug!(row = sheet_row, "highlighted row outside data range");
            continue;
        };

        let Some(mut record) = base_record(roles, table, index) else {
            debug!(row = sheet_row, "skipping row without source text");
            continue;
        };

        record.targets = roles
            .targets
            .iter()
            .map(|(code, column)| TargetField {
                code: code.clone(),
                value: if highlights.contains(sheet_row, column.position) {
                    table.cell(index, column.position).clone()
                } else {
                    CellValue::Empty
                },
            })
            .collect();

        debug!(
            row = sheet_row,
            source = %record.source,
            highlighted = record.targets.iter().filter(|t| !t.value.is_blank()).count(),
            "projected row"
        );
        records.push(record);
    }

    records
}

/// Build one record per data row with source text, ignoring highlighting
pub fn project_all_rows(roles: &ColumnRoleMap, table: &Table) -> Vec<ProjectedRecord> {
    (0..table.rows.len())
        .filter_map(|index| {
            let mut record = base_record(roles, table, index)?;
            record.targets = roles
                .targets
                .iter()
                .map(|(code, column)| TargetField {
                    code: code.clone(),
                    value: table.cell(index, column.position).clone(),
                })
                .collect();
            Some(record)
        })
        .collect()
}

/// Category and source of a data row; `None` when the source is blank
fn base_record(roles: &ColumnRoleMap, table: &Table, index: usize) -> Option<ProjectedRecord> {
    let source = table.cell(index, roles.source.position);
    if source.is_blank() {
        return None;
    }

    let category = roles
        .category
        .as_ref()
        .map(|column| table.cell(index, column.position))
        .filter(|value| !value.is_blank())
        .cloned();

    Some(ProjectedRecord {
        sheet_row: Table::sheet_row(index),
        category,
        source: source.clone(),
        targets: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExtractConfig;
    use crate::core::resolver::resolve_columns;
    use pretty_assertions::assert_eq;

    fn table(headers: &[&str], rows: &[&[&str]]) -> Table {
        Table::new(
            headers.iter().map(|s| s.to_string()).collect(),
            rows.iter()
                .map(|row| row.iter().map(|s| CellValue::from(*s)).collect())
                .collect(),
        )
    }

    fn scenario() -> (Table, ColumnRoleMap) {
        let table = table(
            &["Komponente", "DE", "FR", "IT", "EN"],
            &[
                &["Nav", "Speichern", "Enregistrer", "", ""],
                &["", "Abbrechen", "Annuler", "Annulla", "Cancel"],
                &["", "  ", "Vide", "", ""],
            ],
        );
        let roles = resolve_columns(&table.headers, &ExtractConfig::default()).unwrap();
        (table, roles)
    }

    #[test]
    fn test_single_highlight_scenario() {
        let (table, roles) = scenario();
        let mut highlights = HighlightMap::new();
        highlights.insert(2, 3, CellValue::text("Enregistrer"));

        let records = project_highlights(&highlights, &roles, &table);
        assert_eq!(
            records,
            vec![ProjectedRecord {
                sheet_row: 2,
                category: Some(CellValue::text("Nav")),
                source: CellValue::text("Speichern"),
                targets: vec![
                    TargetField { code: "FR".into(), value: CellValue::text("Enregistrer") },
                    TargetField { code: "IT".into(), value: CellValue::Empty },
                    TargetField { code: "EN".into(), value: CellValue::Empty },
                ],
            }]
        );
    }

    #[test]
    fn test_unhighlighted_target_is_empty_not_underlying_value() {
        let (table, roles) = scenario();
        let mut highlights = HighlightMap::new();
        highlights.insert(3, 3, CellValue::text("Annuler"));
        highlights.insert(3, 5, CellValue::text("Cancel"));

        let records = project_highlights(&highlights, &roles, &table);
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.category, None, "blank category is absent");
        assert_eq!(record.target("FR"), Some(&CellValue::text("Annuler")));
        assert_eq!(record.target("IT"), Some(&CellValue::Empty));
        assert_eq!(record.target("EN"), Some(&CellValue::text("Cancel")));
    }

    #[test]
    fn test_rows_without_source_are_dropped() {
        let (table, roles) = scenario();
        let mut highlights = HighlightMap::new();
        highlights.insert(4, 3, CellValue::text("Vide"));
        assert!(project_highlights(&highlights, &roles, &table).is_empty());
    }

    #[test]
    fn test_header_and_out_of_range_rows_are_skipped() {
        let (table, roles) = scenario();
        let mut highlights = HighlightMap::new();
        highlights.insert(1, 3, CellValue::text("FR"));
        highlights.insert(99, 3, CellValue::text("ghost"));
        assert!(project_highlights(&highlights, &roles, &table).is_empty());
    }

    #[test]
    fn test_empty_highlight_map_yields_nothing() {
        let (table, roles) = scenario();
        assert!(project_highlights(&HighlightMap::new(), &roles, &table).is_empty());
    }

    #[test]
    fn test_records_follow_row_order() {
        let (table, roles) = scenario();
        let mut highlights = HighlightMap::new();
        highlights.insert(3, 4, CellValue::text("Annulla"));
        highlights.insert(2, 4, CellValue::Empty);

        let rows: Vec<u32> = project_highlights(&highlights, &roles, &table)
            .iter()
            .map(|r| r.sheet_row)
            .collect();
        assert_eq!(rows, vec![2, 3]);
    }

    #[test]
    fn test_missing_target_column_is_absent() {
        let table = table(&["DE", "FR"], &[&["Ja", "Oui"]]);
        let roles = resolve_columns(&table.headers, &ExtractConfig::default()).unwrap();
        let mut highlights = HighlightMap::new();
        highlights.insert(2, 2, CellValue::text("Oui"));

        let records = project_highlights(&highlights, &roles, &table);
        assert_eq!(records[0].targets.len(), 1);
        assert_eq!(records[0].target("IT"), None);
    }

    #[test]
    fn test_highlighted_numbers_keep_their_type() {
        let mut table = table(&["DE", "FR"], &[&["Anzahl", ""]]);
        table.rows[0][1] = CellValue::Number(3.0);
        let roles = resolve_columns(&table.headers, &ExtractConfig::default()).unwrap();
        let mut highlights = HighlightMap::new();
        highlights.insert(2, 2, CellValue::text("3"));

        let records = project_highlights(&highlights, &roles, &table);
        assert_eq!(records[0].target("FR"), Some(&CellValue::Number(3.0)));
        assert_eq!(project_all_rows(&roles, &table)[0].targets, records[0].targets);
    }

    #[test]
    fn test_fallback_exports_full_values() {
        let (table, roles) = scenario();
        let records = project_all_rows(&roles, &table);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].target("IT"), Some(&CellValue::text("Annulla")));
        assert_eq!(records[1].target("EN"), Some(&CellValue::text("Cancel")));
        assert_eq!(records[0].category, Some(CellValue::text("Nav")));
    }
}
