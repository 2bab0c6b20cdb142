// File: ./src/workbook.rs
//! Loads roster workbooks (xlsx, xls, xlsm, xlsb, ods) into [`Sheet`] grids.

use crate::sheet::{Cell, Sheet};
use anyhow::{Context, Result};
use calamine::{Data, Range, Reader, open_workbook_auto};
use std::path::Path;

/// Reads every worksheet of a workbook.
///
/// Failing to open the file is an error. A single unreadable worksheet is
/// logged and left out so the rest of the workbook still counts. The file
/// handle is released when this returns.
pub fn load_sheets(path: &Path) -> Result<Vec<Sheet>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open workbook: {}", path.display()))?;

    let mut sheets = Vec::new();
    for name in workbook.sheet_names() {
        match workbook.worksheet_range(&name) {
            Ok(range) => sheets.push(Sheet::new(name, anchored_rows(&range))),
            Err(e) => {
                log::warn!("Skipping sheet '{}' in {}: {}", name, path.display(), e);
            }
        }
    }
    Ok(sheets)
}

/// calamine ranges start at the first used cell; rosters are addressed from
/// A1, so leading empty rows and columns are restored.
fn anchored_rows(range: &Range<Data>) -> Vec<Vec<Cell>> {
    let Some((top, left)) = range.start() else {
        return Vec::new();
    };
    let mut rows: Vec<Vec<Cell>> = vec![Vec::new(); top as usize];
    for row in range.rows() {
        let mut cells = vec![Cell::Empty; left as usize];
        cells.extend(row.iter().map(Cell::from));
        rows.push(cells);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchored_rows_restore_offset() {
        let mut range: Range<Data> = Range::new((1, 2), (2, 3));
        range.set_value((1, 2), Data::String("标题".to_string()));
        range.set_value((2, 3), Data::Float(45356.0));

        let rows = anchored_rows(&range);
        assert_eq!(rows.len(), 3);
        assert!(rows[0].is_empty());
        assert_eq!(rows[1][2], Cell::text("标题"));
        assert_eq!(rows[1][0], Cell::Empty);
        assert_eq!(rows[2][3], Cell::Number(45356.0));
    }

    #[test]
    fn test_empty_range() {
        let range: Range<Data> = Range::empty();
        assert!(anchored_rows(&range).is_empty());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let path = std::env::temp_dir()
            .join(format!("rostercal_missing_{}.xlsx", uuid::Uuid::new_v4()));
        assert!(load_sheets(&path).is_err());
    }
}
