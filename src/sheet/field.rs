// File: ./src/sheet/field.rs
//! Field-assignment rosters: three header rows without half-day slots.
//!
//! The joined header text names the duty and, for off-site work, the campus.

use super::{ParseContext, Table, scan_positional};
use crate::model::{Location, ShiftEntry, TimeOfDay};

const CAMPUS_KEYWORDS: &[(&str, Location)] = &[
    ("天府", Location::TianfuCampus),
    ("上锦", Location::ShangjinCampus),
    ("永宁", Location::YongningCampus),
];

const RAPID_CLINIC_KEYWORD: &str = "快速初诊";
const RAPID_CLINIC_LABEL: &str = "加快";

/// Location implied by an activity, and the activity as it should be shown.
fn locate(activity: String) -> (String, Location) {
    if let Some((_, location)) = CAMPUS_KEYWORDS.iter().find(|(k, _)| activity.contains(k)) {
        return (activity, *location);
    }
    if activity.contains(RAPID_CLINIC_KEYWORD) {
        let renamed = activity.replace(RAPID_CLINIC_KEYWORD, RAPID_CLINIC_LABEL);
        return (renamed, Location::RapidClinic);
    }
    (activity, Location::MainCampus)
}

pub fn parse(table: &Table, ctx: &ParseContext) -> Vec<ShiftEntry> {
    scan_positional(table, ctx, |date, weekday, fragments| {
        let (activity, location) = locate(fragments.join(" "));
        ShiftEntry::new(date, weekday, TimeOfDay::AllDay, activity, location)
    })
}
