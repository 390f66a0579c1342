use std::collections::BTreeMap;
use std::fmt;

//==============================================================================
// Cell values
//==============================================================================

/// Literal value of a spreadsheet cell, as read by either reader
#[derive(Debug, Clone, PartialEq, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    /// Excel serial date, days since 1899-12-30
    DateTime(f64),
}

impl CellValue {
    /// True for empty cells and for text that is empty after trimming
    pub fn is_blank(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            CellValue::Number(_) | CellValue::Bool(_) | CellValue::DateTime(_) => false,
        }
    }

    pub fn text<S: Into<String>>(s: S) -> Self {
        CellValue::Text(s.into())
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) | CellValue::DateTime(n) => write!(f, "{}", n),
            CellValue::Bool(b) => write!(f, "{}", if *b { "TRUE" } else { "FALSE" }),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            CellValue::Empty
        } else {
            CellValue::Text(s.to_string())
        }
    }
}

//==============================================================================
// Cell styling
//==============================================================================

/// Pattern type of a cell fill
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FillPattern {
    None,
    Solid,
    /// Any other pattern (gray125, darkGrid, ...) or a gradient fill
    Other(String),
}

/// Foreground color of a fill
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FillColor {
    /// ARGB hex string, e.g. `FFFFFF00`
    pub rgb: Option<String>,
    /// Legacy palette index
    pub indexed: Option<u32>,
}

impl FillColor {
    pub fn rgb<S: Into<String>>(argb: S) -> Self {
        Self {
            rgb: Some(argb.into()),
            indexed: None,
        }
    }

    pub fn indexed(index: u32) -> Self {
        Self {
            rgb: None,
            indexed: Some(index),
        }
    }

    /// Palette index in hex, for indexed colors
    pub fn indexed_hex(&self) -> Option<String> {
        self.indexed.map(|index| format!("{:X}", index))
    }
}

/// Fill descriptor of a single cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellFill {
    pub pattern: FillPattern,
    pub color: Option<FillColor>,
}

impl CellFill {
    pub fn solid(color: FillColor) -> Self {
        Self {
            pattern: FillPattern::Solid,
            color: Some(color),
        }
    }
}

/// A cell as seen by the styled reader (1-based coordinates)
#[derive(Debug, Clone, PartialEq)]
pub struct StyledCell {
    pub row: u32,
    pub column: u32,
    pub value: CellValue,
    pub fill: Option<CellFill>,
}

//==============================================================================
// Highlight map
//==============================================================================

/// Yellow cells keyed by 1-based row, then 1-based column
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HighlightMap {
    rows: BTreeMap<u32, BTreeMap<u32, CellValue>>,
    cell_count: usize,
}

impl HighlightMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, row: u32, column: u32, value: CellValue) {
        if self
            .rows
            .entry(row)
            .or_default()
            .insert(column, value)
            .is_none()
        {
            self.cell_count += 1;
        }
    }

    pub fn get(&self, row: u32, column: u32) -> Option<&CellValue> {
        self.rows.get(&row).and_then(|cols| cols.get(&column))
    }

    pub fn contains(&self, row: u32, column: u32) -> bool {
        self.get(row, column).is_some()
    }

    /// Rows with at least one yellow cell, ascending
    pub fn rows(&self) -> impl Iterator<Item = u32> + '_ {
        self.rows.keys().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Total number of yellow cells
    pub fn cell_count(&self) -> usize {
        self.cell_count
    }

    /// Number of distinct rows containing yellow cells
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }
}

//==============================================================================
// Tabular reading
//==============================================================================

/// Header row plus data rows of the first worksheet.
///
/// `headers[i]` is spreadsheet column `i + 1` and `rows[d]` is spreadsheet
/// row `d + 2`: row 1 holds the headers and spreadsheet rows are 1-based.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    /// Spreadsheet row of the header
    pub const HEADER_ROW: u32 = 1;

    pub fn new(headers: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { headers, rows }
    }

    /// Data index for a 1-based spreadsheet row, if it is a data row in range
    pub fn data_index(&self, sheet_row: u32) -> Option<usize> {
        let index = sheet_row.checked_sub(Self::HEADER_ROW + 1)? as usize;
        (index < self.rows.len()).then_some(index)
    }

    /// 1-based spreadsheet row of a data index
    pub fn sheet_row(data_index: usize) -> u32 {
        data_index as u32 + Self::HEADER_ROW + 1
    }

    /// Cell at a data row and 1-based column; missing trailing cells read as empty
    pub fn cell(&self, data_index: usize, column: u32) -> &CellValue {
        static EMPTY: CellValue = CellValue::Empty;
        column
            .checked_sub(1)
            .and_then(|c| self.rows.get(data_index)?.get(c as usize))
            .unwrap_or(&EMPTY)
    }
}

//==============================================================================
// Column roles
//==============================================================================

/// A header resolved to its 1-based column position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRef {
    pub header: String,
    pub position: u32,
}

/// Resolution of logical roles to columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnRoleMap {
    pub source: ColumnRef,
    pub category: Option<ColumnRef>,
    /// Resolved targets in configured order: (language code, column)
    pub targets: Vec<(String, ColumnRef)>,
    /// Configured target codes with no matching header
    pub missing_targets: Vec<String>,
}

impl ColumnRoleMap {
    pub fn target(&self, code: &str) -> Option<&ColumnRef> {
        self.targets
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, col)| col)
    }
}

//==============================================================================
// Projected records
//==============================================================================

/// One target-language field of a record
#[derive(Debug, Clone, PartialEq)]
pub struct TargetField {
    pub code: String,
    pub value: CellValue,
}

/// One output row built from a source row
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedRecord {
    /// Originating 1-based spreadsheet row
    pub sheet_row: u32,
    pub category: Option<CellValue>,
    pub source: CellValue,
    pub targets: Vec<TargetField>,
}

impl ProjectedRecord {
    pub fn target(&self, code: &str) -> Option<&CellValue> {
        self.targets
            .iter()
            .find(|t| t.code == code)
            .map(|t| &t.value)
    }
}
