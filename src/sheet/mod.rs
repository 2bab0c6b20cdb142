// File: ./src/sheet/mod.rs
//! Roster sheets: header reading, shape classification and dispatch.
//!
//! Roster authors lay out tables by hand, so the same workbook may hold a
//! two-row-header branch campus sheet next to a three-row-header main campus
//! sheet and a flat special-shift list. Each sheet is classified once into a
//! [`SheetShape`] and handed to the matching parser.

pub mod cell;
pub mod field;
pub mod multilevel;
pub mod special;

pub use cell::Cell;

use crate::matcher::NameMatcher;
use crate::model::ShiftEntry;
use crate::resolver::DateResolver;
use chrono::NaiveDate;

/// Row 0 of every roster is a title banner; headers start below it.
pub const HEADER_START: usize = 1;

/// Stand-in for a blank header cell that could not be filled.
pub const PLACEHOLDER: &str = "Unnamed";

const BRANCH_SHEET_KEYWORDS: &[&str] = &["锦江"];
const SPECIAL_SHEET_KEYWORDS: &[&str] = &["采图", "加快", "专科会诊"];
const HALF_DAY_MARKERS: &[&str] = &["上午", "下午"];

// --- GRID ---

/// A raw worksheet, anchored at cell A1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
    pub name: String,
    pub rows: Vec<Vec<Cell>>,
}

/// A sheet split into header columns and data rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    /// One entry per column: its header label at every level, top first.
    pub columns: Vec<Vec<String>>,
    /// Data rows, each padded to the column count.
    pub rows: Vec<Vec<Cell>>,
}

impl Sheet {
    pub fn new(name: impl Into<String>, rows: Vec<Vec<Cell>>) -> Self {
        Self {
            name: name.into(),
            rows,
        }
    }

    /// Reads `depth` header rows starting at [`HEADER_START`].
    ///
    /// With more than one level, every level is forward-filled to the right,
    /// since merged header cells only carry their value in the first column.
    /// The fill stops at any column where a higher level was labelled in the
    /// sheet itself. Blank cells left over become [`PLACEHOLDER`] labels.
    ///
    /// Returns `None` when the sheet is too short to hold the header.
    pub fn header_table(&self, depth: usize) -> Option<Table> {
        let body_start = HEADER_START + depth;
        if depth == 0 || self.rows.len() < body_start {
            return None;
        }
        let width = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        if width == 0 {
            return None;
        }

        let mut open = vec![true; width];
        let mut levels: Vec<Vec<String>> = Vec::with_capacity(depth);
        for (level, row) in self.rows[HEADER_START..body_start].iter().enumerate() {
            let mut labels: Vec<String> = (0..width)
                .map(|c| row.get(c).map(Cell::to_label).unwrap_or_default())
                .collect();
            if depth > 1 {
                forward_fill(&mut labels, &mut open);
            }
            for (c, label) in labels.iter_mut().enumerate() {
                if label.trim().is_empty() {
                    *label = format!("{PLACEHOLDER}: {c}_level_{level}");
                }
            }
            levels.push(labels);
        }

        let columns = (0..width)
            .map(|c| levels.iter().map(|l| l[c].clone()).collect())
            .collect();
        let rows = self.rows[body_start..]
            .iter()
            .filter(|row| !row.iter().all(Cell::is_blank))
            .map(|row| {
                let mut padded = row.clone();
                padded.resize(width, Cell::Empty);
                padded
            })
            .collect();

        Some(Table { columns, rows })
    }
}

fn forward_fill(labels: &mut [String], open: &mut [bool]) {
    let mut last = String::new();
    for (label, is_open) in labels.iter_mut().zip(open.iter_mut()) {
        if !*is_open {
            last = label.clone();
        }
        if label.trim().is_empty() {
            *label = last.clone();
        } else {
            *is_open = false;
            last = label.clone();
        }
    }
}

/// Header fragments that carry meaning: trimmed, without blanks and
/// placeholders.
pub fn meaningful_fragments(column: &[String]) -> Vec<&str> {
    column
        .iter()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty() && !s.contains(PLACEHOLDER))
        .collect()
}

impl Table {
    /// Index of the first single-level column whose label is exactly `label`.
    pub fn column_index(&self, label: &str) -> Option<usize> {
        self.columns
            .iter()
            .position(|col| col.first().is_some_and(|l| l.trim() == label))
    }

    /// Labels at header level `level` (0-based), one per column.
    pub fn level(&self, level: usize) -> impl Iterator<Item = &str> {
        self.columns
            .iter()
            .filter_map(move |col| col.get(level).map(String::as_str))
    }
}

// --- PARSE CONTEXT ---

/// Everything a parser needs to decide whether a cell belongs to the person.
#[derive(Debug, Clone)]
pub struct ParseContext {
    pub resolver: DateResolver,
    pub matcher: NameMatcher,
}

impl ParseContext {
    pub fn new(name: &str, year: &str) -> Self {
        Self {
            resolver: DateResolver::new(year),
            matcher: NameMatcher::new(name),
        }
    }
}

/// Walks rows dated by columns 0 and 1, calling `build` with the date, the
/// weekday label and the cleaned header fragments of every matching cell
/// from column 2 on. Columns without meaningful fragments are ignored.
pub(crate) fn scan_positional<F>(
    table: &Table,
    ctx: &ParseContext,
    mut build: F,
) -> Vec<ShiftEntry>
where
    F: FnMut(NaiveDate, &str, &[&str]) -> ShiftEntry,
{
    let mut entries = Vec::new();
    for row in &table.rows {
        let Some((date, weekday)) = ctx.resolver.resolve(row.first(), row.get(1)) else {
            continue;
        };
        for (col, cell) in row.iter().enumerate().skip(2) {
            if !ctx.matcher.matches(cell) {
                continue;
            }
            let fragments = meaningful_fragments(&table.columns[col]);
            if fragments.is_empty() {
                continue;
            }
            entries.push(build(date, &weekday, &fragments));
        }
    }
    entries
}

// --- CLASSIFICATION ---

/// The closed set of roster layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetShape {
    /// Two header rows (task, group); every shift is a full branch-campus day.
    BranchCampus,
    /// Three header rows (task, half-day slot, group).
    MainCampus,
    /// Three header rows without half-day slots; locations come from keywords.
    FieldAssignment,
    /// One header row with labelled date/weekday columns.
    SpecialShift,
}

impl SheetShape {
    pub fn header_depth(&self) -> usize {
        match self {
            SheetShape::BranchCampus => 2,
            SheetShape::MainCampus | SheetShape::FieldAssignment => 3,
            SheetShape::SpecialShift => 1,
        }
    }

    pub fn parse(&self, table: &Table, ctx: &ParseContext) -> Vec<ShiftEntry> {
        match self {
            SheetShape::BranchCampus => multilevel::parse_branch(table, ctx),
            SheetShape::MainCampus => multilevel::parse_main(table, ctx),
            SheetShape::FieldAssignment => field::parse(table, ctx),
            SheetShape::SpecialShift => special::parse(table, ctx),
        }
    }
}

/// Decides a sheet's shape from its name and, failing that, from the second
/// level of a three-row header. Returns the header table read at the chosen
/// depth, or `None` when the sheet cannot be read.
pub fn classify(sheet: &Sheet) -> Option<(SheetShape, Table)> {
    let name = sheet.name.to_lowercase();
    let by_name = if BRANCH_SHEET_KEYWORDS.iter().any(|k| name.contains(k)) {
        Some(SheetShape::BranchCampus)
    } else if SPECIAL_SHEET_KEYWORDS.iter().any(|k| name.contains(k)) {
        Some(SheetShape::SpecialShift)
    } else {
        None
    };

    if let Some(shape) = by_name {
        let table = sheet.header_table(shape.header_depth())?;
        return Some((shape, table));
    }

    let table = sheet.header_table(3)?;
    let has_half_days = table
        .level(1)
        .any(|label| HALF_DAY_MARKERS.contains(&label));
    let shape = if has_half_days {
        SheetShape::MainCampus
    } else {
        SheetShape::FieldAssignment
    };
    Some((shape, table))
}

/// Classifies and parses one sheet. Unreadable sheets yield nothing.
pub fn parse_sheet(sheet: &Sheet, ctx: &ParseContext) -> Vec<ShiftEntry> {
    match classify(sheet) {
        Some((shape, table)) => {
            let entries = shape.parse(&table, ctx);
            log::debug!(
                "Sheet '{}' parsed as {:?}: {} entries",
                sheet.name,
                shape,
                entries.len()
            );
            entries
        }
        None => {
            log::debug!("Skipping sheet '{}': header could not be read", sheet.name);
            Vec::new()
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Builds a row from string literals; "" is an empty cell.
    pub(crate) fn row(cells: &[&str]) -> Vec<Cell> {
        cells
            .iter()
            .map(|s| if s.is_empty() { Cell::Empty } else { Cell::text(*s) })
            .collect()
    }

    #[test]
    fn test_header_forward_fill_respects_upper_level() {
        let sheet = Sheet::new(
            "总院",
            vec![
                row(&["title"]),
                row(&["日期", "星期", "坐诊", "", "取材", ""]),
                row(&["", "", "上午", "下午", "", "上午"]),
                row(&["", "", "A组", "B组", "C组", ""]),
            ],
        );
        let table = sheet.header_table(3).unwrap();
        assert_eq!(table.columns[3], vec!["坐诊", "下午", "B组"]);
        // Level 1 does not fill into column 4: its top level is labelled.
        assert_eq!(table.columns[4][1], "Unnamed: 4_level_1");
        assert_eq!(table.columns[5], vec!["取材", "上午", "Unnamed: 5_level_2"]);
        assert_eq!(meaningful_fragments(&table.columns[5]), vec!["取材", "上午"]);
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_last_level_filled_under_merged_columns() {
        let sheet = Sheet::new(
            "锦江",
            vec![
                row(&["title"]),
                row(&["日期", "星期", "诊断", "", "记录"]),
                row(&["", "", "一组", "", ""]),
            ],
        );
        let table = sheet.header_table(2).unwrap();
        // Column 3 sits under a merged top cell, so its group is carried over.
        assert_eq!(table.columns[3], vec!["诊断", "一组"]);
        // Column 4 has its own top label; the group is not carried into it.
        assert_eq!(table.columns[4], vec!["记录", "Unnamed: 4_level_1"]);
        assert_eq!(table.columns[0], vec!["日期", "Unnamed: 0_level_1"]);
    }

    #[test]
    fn test_header_too_short() {
        let sheet = Sheet::new("x", vec![row(&["title"]), row(&["a"])]);
        assert!(sheet.header_table(1).is_some());
        assert!(sheet.header_table(2).is_none());
        assert!(Sheet::new("empty", vec![]).header_table(1).is_none());
    }

    #[test]
    fn test_blank_data_rows_dropped_and_padded() {
        let sheet = Sheet::new(
            "x",
            vec![
                row(&["title"]),
                row(&["日期", "星期", "采图"]),
                row(&["", " "]),
                row(&["2024-03-04"]),
            ],
        );
        let table = sheet.header_table(1).unwrap();
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].len(), 3);
        assert_eq!(table.column_index("星期"), Some(1));
        assert_eq!(table.column_index("missing"), None);
    }

    #[test]
    fn test_classification_by_name_and_header() {
        let three_rows = |slot: &str| {
            vec![
                row(&["title"]),
                row(&["日期", "星期", "坐诊"]),
                row(&["", "", slot]),
                row(&["", "", "A组"]),
            ]
        };

        let (shape, _) = classify(&Sheet::new("锦江3月", three_rows("x"))).unwrap();
        assert_eq!(shape, SheetShape::BranchCampus);
        let (shape, _) = classify(&Sheet::new("专科会诊", three_rows("x"))).unwrap();
        assert_eq!(shape, SheetShape::SpecialShift);
        let (shape, _) = classify(&Sheet::new("3月", three_rows("上午"))).unwrap();
        assert_eq!(shape, SheetShape::MainCampus);
        let (shape, _) = classify(&Sheet::new("外检", three_rows("天府"))).unwrap();
        assert_eq!(shape, SheetShape::FieldAssignment);

        let short = Sheet::new("3月", vec![row(&["title"]), row(&["日期"])]);
        assert!(classify(&short).is_none());
        assert!(parse_sheet(&short, &ParseContext::new("张三", "2024")).is_empty());
    }
}
