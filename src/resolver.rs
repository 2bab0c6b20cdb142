// File: ./src/resolver.rs
//! Resolves roster date cells into calendar dates of one target year.
//!
//! Rosters store dates as spreadsheet serials, as full date strings, or as a
//! bare month-day ("3-5", "03/05 周二"). Candidates are tried in that order and
//! the first one that lands in the target year wins. Everything else is
//! rejected with `None`; callers skip the row.

use crate::sheet::Cell;
use chrono::{Datelike, Days, NaiveDate, NaiveDateTime};

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%Y.%m.%d", "%Y年%m月%d日"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%Y/%m/%d %H:%M",
    "%Y-%m-%dT%H:%M:%S%.f",
];

/// Serials outside this many days are not dates.
const MAX_SERIAL_DAYS: f64 = 2_958_465.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateResolver {
    year: Option<i32>,
}

impl DateResolver {
    /// `year` must be exactly four ASCII digits; anything else yields a
    /// resolver that rejects every value.
    pub fn new(year: &str) -> Self {
        let year = (year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()))
            .then(|| year.parse::<i32>().ok())
            .flatten();
        Self { year }
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }

    /// Resolves a row's date cell and optional weekday cell.
    ///
    /// A weekday cell with content is kept verbatim. A missing or empty cell
    /// gets the full English weekday name of the resolved date, which lies
    /// outside [`crate::model::STANDARD_WEEKDAYS`] and so marks the date as special.
    pub fn resolve(
        &self,
        date: Option<&Cell>,
        weekday: Option<&Cell>,
    ) -> Option<(NaiveDate, String)> {
        let date = self.resolve_date(date?)?;
        let label = match weekday {
            Some(cell) if *cell != Cell::Empty => cell.to_label(),
            _ => weekday_name(date),
        };
        Some((date, label))
    }

    pub fn resolve_date(&self, cell: &Cell) -> Option<NaiveDate> {
        let year = self.year?;
        let in_year = |d: &NaiveDate| d.year() == year;
        match cell {
            Cell::Number(n) => from_serial(*n).filter(in_year),
            Cell::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return None;
                }
                parse_full(s)
                    .filter(in_year)
                    .or_else(|| parse_partial(s, year).filter(in_year))
            }
            Cell::Empty | Cell::Bool(_) => None,
        }
    }
}

/// Converts a spreadsheet day serial (epoch 1899-12-30) to a date.
/// Fractional parts are a time of day and are dropped.
pub fn from_serial(days: f64) -> Option<NaiveDate> {
    if !days.is_finite() || days.abs() > MAX_SERIAL_DAYS {
        return None;
    }
    let epoch = NaiveDate::from_ymd_opt(1899, 12, 30)?;
    let whole = days.floor() as i64;
    if whole >= 0 {
        epoch.checked_add_days(Days::new(whole as u64))
    } else {
        epoch.checked_sub_days(Days::new(whole.unsigned_abs()))
    }
}

/// Full weekday name ("Friday") used when the roster leaves the weekday out.
pub fn weekday_name(date: NaiveDate) -> String {
    date.format("%A").to_string()
}

fn parse_full(s: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
                .map(|dt| dt.date())
        })
}

fn parse_partial(s: &str, year: i32) -> Option<NaiveDate> {
    let head = s.split_whitespace().next()?;
    [
        format!("{year}-{head}"),
        format!("{year}/{head}"),
        format!("{year}年{head}"),
    ]
    .iter()
    .find_map(|candidate| parse_full(candidate))
}
