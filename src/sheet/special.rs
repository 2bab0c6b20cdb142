// File: ./src/sheet/special.rs
//! Special-shift lists (imaging, consults, rapid clinic).
//!
//! A single header row; the date and weekday sit in columns labelled
//! "日期" and "星期" wherever they appear, and every other column is a duty.

use super::{PLACEHOLDER, ParseContext, Table};
use crate::model::{Location, ShiftEntry, TimeOfDay};

pub const DATE_LABEL: &str = "日期";
pub const WEEKDAY_LABEL: &str = "星期";

/// Duty columns that map to a fixed activity in the imaging pool.
const POOL_DUTIES: &[(&str, &str)] = &[
    ("采图", "采图"),
    ("血液", "血液会诊"),
    ("消化", "消化会诊"),
];

fn duty(label: &str) -> Option<(String, Location)> {
    if let Some((_, activity)) = POOL_DUTIES.iter().find(|(k, _)| label.contains(k)) {
        return Some((activity.to_string(), Location::ImagingPool));
    }
    if label.is_empty()
        || label == DATE_LABEL
        || label == WEEKDAY_LABEL
        || label.contains(PLACEHOLDER)
    {
        return None;
    }
    Some((format!("加快 ({label})"), Location::RapidClinic))
}

pub fn parse(table: &Table, ctx: &ParseContext) -> Vec<ShiftEntry> {
    let date_col = table.column_index(DATE_LABEL);
    let weekday_col = table.column_index(WEEKDAY_LABEL);
    let Some(date_col) = date_col else {
        log::debug!("Special-shift table has no '{DATE_LABEL}' column");
        return Vec::new();
    };

    let mut entries = Vec::new();
    for row in &table.rows {
        let weekday = weekday_col.and_then(|c| row.get(c));
        let Some((date, weekday)) = ctx.resolver.resolve(row.get(date_col), weekday) else {
            continue;
        };
        for (cell, column) in row.iter().zip(&table.columns) {
            if !ctx.matcher.matches(cell) {
                continue;
            }
            let label = column.first().map_or("", |l| l.trim());
            if let Some((activity, location)) = duty(label) {
                entries.push(ShiftEntry::new(
                    date,
                    weekday.as_str(),
                    TimeOfDay::AllDay,
                    activity,
                    location,
                ));
            }
        }
    }
    entries
}
