//! Workbook fixtures shared by the integration tests

#![allow(dead_code)]

use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{Color, Format, Workbook};
use std::path::Path;

/// Standard yellow highlight
pub const YELLOW: Color = Color::RGB(0xFFFF00);

/// Write a single-sheet workbook. `highlights` are 0-based (row, col) cells
/// filled with `fill`.
pub fn write_workbook(path: &Path, rows: &[&[&str]], highlights: &[(u32, u16)], fill: Color) {
    let mut workbook = Workbook::new();
    let highlight = Format::new().set_background_color(fill);
    let worksheet = workbook.add_worksheet();

    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            let (r, c) = (r as u32, c as u16);
            let highlighted = highlights.contains(&(r, c));
            match (value.is_empty(), highlighted) {
                (true, true) => {
                    worksheet.write_blank(r, c, &highlight).unwrap();
                }
                (true, false) => {}
                (false, true) => {
                    worksheet.write_string_with_format(r, c, *value, &highlight).unwrap();
                }
                (false, false) => {
                    worksheet.write_string(r, c, *value).unwrap();
                }
            }
        }
    }

    workbook.save(path).unwrap();
}

/// Read the first sheet back as strings, empty cells as ""
pub fn read_rows(path: &Path) -> Vec<Vec<String>> {
    let mut workbook: Xlsx<_> = open_workbook(path).unwrap();
    let range = workbook.worksheet_range_at(0).unwrap().unwrap();
    range
        .rows()
        .map(|row| {
            row.iter()
                .map(|cell| match cell {
                    Data::Empty => String::new(),
                    Data::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect()
}

/// Sheet names of a workbook
pub fn sheet_names(path: &Path) -> Vec<String> {
    let workbook: Xlsx<_> = open_workbook(path).unwrap();
    workbook.sheet_names().to_vec()
}

pub fn strings(row: &[&str]) -> Vec<String> {
    row.iter().map(|s| s.to_string()).collect()
}
