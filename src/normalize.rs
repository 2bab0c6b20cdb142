// File: ./src/normalize.rs
//! Cross-sheet normalization: duplicate removal and special-shift overrides.

use crate::model::{REINFORCED_MARKER, ShiftEntry, TimeOfDay};
use chrono::NaiveDate;
use std::collections::HashSet;

/// Keeps the first entry for every (date, location, time of day) slot.
///
/// Input order is the workbook/sheet traversal order, so earlier sources win.
pub fn dedup(entries: Vec<ShiftEntry>) -> Vec<ShiftEntry> {
    let mut seen = HashSet::new();
    entries
        .into_iter()
        .filter(|e| seen.insert(e.slot_key()))
        .collect()
}

/// Applies the special-shift rule.
///
/// A date that carries any entry with a non-standard weekday label is a
/// special date. On such dates only the non-standard entries survive, moved
/// to the evening and relabelled as reinforced duty. Other dates pass through
/// untouched.
pub fn resolve_special_shifts(entries: Vec<ShiftEntry>) -> Vec<ShiftEntry> {
    let special_dates: HashSet<NaiveDate> = entries
        .iter()
        .filter(|e| e.is_special())
        .map(|e| e.date)
        .collect();
    if special_dates.is_empty() {
        return entries;
    }

    entries
        .into_iter()
        .filter_map(|mut entry| {
            if !special_dates.contains(&entry.date) {
                return Some(entry);
            }
            if !entry.is_special() {
                return None;
            }
            entry.time_of_day = TimeOfDay::Evening;
            entry.activity = reinforced(&entry.activity);
            Some(entry)
        })
        .collect()
}

fn reinforced(activity: &str) -> String {
    let base = activity.replace("上午", "").replace("下午", "");
    format!("{REINFORCED_MARKER}{base}")
}

/// Full pipeline over raw parser output: dedup, special shifts, then a stable
/// sort by date.
///
/// Moving special entries to the evening can make two of them share a slot,
/// so the slot key is enforced once more after the override.
pub fn normalize(raw: Vec<ShiftEntry>) -> Vec<ShiftEntry> {
    let mut entries = dedup(resolve_special_shifts(dedup(raw)));
    entries.sort_by_key(|e| e.date);
    entries
}
