//! Yellow-highlight scanner - styled read of every cell's fill

use crate::error::{PrepError, PrepResult};
use crate::types::{CellFill, CellValue, FillColor, FillPattern, HighlightMap, StyledCell};
use std::path::Path;
use tracing::{debug, info};
use umya_spreadsheet::PatternValues;

/// Near-yellow RGB codes accepted in addition to the `FFFF` rule
pub const YELLOW_RGB_CODES: [&str; 8] = [
    "FFFF00", "FFFFE0", "FFFACD", "FFFF99", "FFCC99", "FFD700", "FFFFCC", "FFF2CC",
];

/// Classify a fill as yellow.
///
/// Only solid fills qualify. A color matches when its code text (the ARGB
/// string, or the palette index in hex) contains `FFFF`, or when its ARGB
/// string contains one of [`YELLOW_RGB_CODES`]. Both are case-insensitive
/// substring tests, so some non-yellow colors such as `FFFF0000` match too.
pub fn is_yellow(fill: &CellFill) -> bool {
    if fill.pattern != FillPattern::Solid {
        return false;
    }
    let Some(color) = &fill.color else {
        return false;
    };

    let rgb = color.rgb.as_deref().map(str::to_ascii_uppercase);
    let index = color.indexed_hex();
    if rgb.iter().chain(index.iter()).any(|code| code.contains("FFFF")) {
        return true;
    }

    rgb.is_some_and(|rgb| YELLOW_RGB_CODES.iter().any(|code| rgb.contains(code)))
}

/// Build the highlight map from styled cells, in any order
pub fn scan_cells<I>(cells: I) -> HighlightMap
where
    I: IntoIterator<Item = StyledCell>,
{
    let mut map = HighlightMap::new();
    for cell in cells {
        if cell.fill.as_ref().is_some_and(is_yellow) {
            map.insert(cell.row, cell.column, cell.value);
        }
    }
    map
}

/// Scan the first worksheet of an .xlsx file for yellow cells
pub fn scan_workbook(path: &Path) -> PrepResult<HighlightMap> {
    let cells = read_styled_cells(path)?;
    let map = scan_cells(cells);
    info!(
        cells = map.cell_count(),
        rows = map.row_count(),
        "scanned {} for yellow cells",
        path.display()
    );
    Ok(map)
}

/// Read every populated or styled cell of the first worksheet in document order
pub fn read_styled_cells(path: &Path) -> PrepResult<Vec<StyledCell>> {
    let book = umya_spreadsheet::reader::xlsx::read(path).map_err(|e| {
        PrepError::FileFormat(format!("Failed to open '{}': {}", path.display(), e))
    })?;
    let sheet = book.get_sheet(&0).ok_or_else(|| {
        PrepError::FileFormat(format!("'{}' contains no worksheet", path.display()))
    })?;

    let mut cells: Vec<StyledCell> = sheet
        .get_cell_collection()
        .into_iter()
        .map(|cell| {
            let coordinate = cell.get_coordinate();
            let value = cell.get_value();
            StyledCell {
                row: *coordinate.get_row_num(),
                column: *coordinate.get_col_num(),
                value: CellValue::from(&*value),
                fill: convert_fill(cell.get_style()),
            }
        })
        .collect();
    cells.sort_by_key(|c| (c.row, c.column));

    debug!(cells = cells.len(), "read styled cells");
    Ok(cells)
}

fn convert_fill(style: &umya_spreadsheet::Style) -> Option<CellFill> {
    let fill = style.get_fill()?;
    let Some(pattern_fill) = fill.get_pattern_fill() else {
        // Gradient fills never count as highlighting
        return Some(CellFill {
            pattern: FillPattern::Other("gradient".to_string()),
            color: None,
        });
    };

    let pattern = match pattern_fill.get_pattern_type() {
        PatternValues::None => FillPattern::None,
        PatternValues::Solid => FillPattern::Solid,
        other => FillPattern::Other(format!("{:?}", other)),
    };
    let color = pattern_fill.get_foreground_color().map(convert_color);

    Some(CellFill { pattern, color })
}

/// Palette colors resolve to their ARGB where umya knows it; the index is
/// kept alongside. Unset indices read as 0.
fn convert_color(color: &umya_spreadsheet::Color) -> FillColor {
    let argb = color.get_argb();
    let index = *color.get_indexed();
    FillColor {
        rgb: (!argb.is_empty()).then(|| argb.to_string()),
        indexed: (index != 0 || argb.is_empty()).then_some(index),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cell(row: u32, column: u32, value: &str, fill: Option<CellFill>) -> StyledCell {
        StyledCell {
            row,
            column,
            value: CellValue::from(value),
            fill,
        }
    }

    #[test]
    fn test_allow_list_colors_are_yellow() {
        for code in YELLOW_RGB_CODES {
            let fill = CellFill::solid(FillColor::rgb(format!("FF{}", code)));
            assert!(is_yellow(&fill), "{} should be yellow", code);
        }
    }

    #[test]
    fn test_rgb_rule_is_case_insensitive() {
        assert!(is_yellow(&CellFill::solid(FillColor::rgb("fffff2cc"))));
        assert!(is_yellow(&CellFill::solid(FillColor::rgb("ffd700"))));
    }

    #[test]
    fn test_allow_list_matches_inside_longer_codes() {
        assert!(is_yellow(&CellFill::solid(FillColor::rgb("00FFD700"))));
        assert!(is_yellow(&CellFill::solid(FillColor::rgb("80FFCC99"))));
    }

    #[test]
    fn test_ffff_rule_applies_to_argb_text() {
        // Red, white and orange all contain FFFF
        assert!(is_yellow(&CellFill::solid(FillColor::rgb("FFFF0000"))));
        assert!(is_yellow(&CellFill::solid(FillColor::rgb("FFFFFFFF"))));
        assert!(is_yellow(&CellFill::solid(FillColor::rgb("FFFFCC00"))));
    }

    #[test]
    fn test_indexed_rule() {
        assert!(is_yellow(&CellFill::solid(FillColor::indexed(0xFFFF))));
        assert!(is_yellow(&CellFill::solid(FillColor::indexed(0x1FFFF))));
        assert!(!is_yellow(&CellFill::solid(FillColor::indexed(64))));
    }

    #[test]
    fn test_non_yellow_colors() {
        assert!(!is_yellow(&CellFill::solid(FillColor::rgb("FF92D050"))));
        assert!(!is_yellow(&CellFill::solid(FillColor::rgb("FF0000FF"))));
        assert!(!is_yellow(&CellFill::solid(FillColor::rgb("FF808000"))));
        assert!(!is_yellow(&CellFill::solid(FillColor::indexed(13))));
    }

    #[test]
    fn test_non_solid_fills_never_match() {
        let none = CellFill {
            pattern: FillPattern::None,
            color: Some(FillColor::rgb("FFFFFF00")),
        };
        let grid = CellFill {
            pattern: FillPattern::Other("darkGrid".to_string()),
            color: Some(FillColor::rgb("FFFFFF00")),
        };
        let colorless = CellFill {
            pattern: FillPattern::Solid,
            color: None,
        };
        assert!(!is_yellow(&none));
        assert!(!is_yellow(&grid));
        assert!(!is_yellow(&colorless));
    }

    #[test]
    fn test_scan_without_colors_is_empty() {
        let map = scan_cells(vec![cell(1, 1, "DE", None), cell(2, 1, "Speichern", None)]);
        assert!(map.is_empty());
        assert_eq!(map.cell_count(), 0);
    }

    #[test]
    fn test_scan_records_values_and_counts() {
        let yellow = CellFill::solid(FillColor::rgb("FFFFFF00"));
        let green = CellFill::solid(FillColor::rgb("FF92D050"));
        let map = scan_cells(vec![
            cell(3, 2, "b", Some(yellow.clone())),
            cell(2, 3, "Enregistrer", Some(yellow.clone())),
            cell(2, 4, "", Some(yellow)),
            cell(2, 5, "green", Some(green)),
        ]);
        assert_eq!(map.cell_count(), 3);
        assert_eq!(map.row_count(), 2);
        assert_eq!(map.get(2, 3), Some(&CellValue::text("Enregistrer")));
        assert_eq!(map.get(2, 4), Some(&CellValue::Empty));
        assert!(!map.contains(2, 5));
    }
}
