// File: ./src/engine.rs
//! Batch entry point: workbooks in, one normalized [`Schedule`] out.
//!
//! Every call builds its own entry list; nothing is shared between calls.
//! Failures are contained to the smallest unit: a bad row is skipped by the
//! parsers, a bad sheet by [`crate::sheet::parse_sheet`], a bad workbook here.

use crate::ics;
use crate::model::ShiftEntry;
use crate::normalize::normalize;
use crate::sheet::{ParseContext, Sheet, parse_sheet};
use crate::stats::SummaryStats;
use crate::workbook::load_sheets;
use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::Path;

/// The normalized shifts of one person for one year, sorted by date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Schedule {
    pub person: String,
    pub year: String,
    entries: Vec<ShiftEntry>,
}

impl Schedule {
    pub fn new(person: &str, year: &str, entries: Vec<ShiftEntry>) -> Self {
        Self {
            person: person.trim().to_string(),
            year: year.to_string(),
            entries,
        }
    }

    pub fn entries(&self) -> &[ShiftEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No shifts found. This is a normal outcome, not an error.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> SummaryStats {
        SummaryStats::from_entries(&self.entries)
    }

    /// Entries grouped by (year, month), then by day of month.
    pub fn by_month(&self) -> BTreeMap<(i32, u32), BTreeMap<u32, Vec<&ShiftEntry>>> {
        let mut months = BTreeMap::new();
        for entry in &self.entries {
            months
                .entry((entry.date.year(), entry.date.month()))
                .or_insert_with(BTreeMap::new)
                .entry(entry.date.day())
                .or_insert_with(Vec::new)
                .push(entry);
        }
        months
    }

    /// Entries on one date, in list order.
    pub fn on(&self, date: NaiveDate) -> impl Iterator<Item = &ShiftEntry> {
        self.entries.iter().filter(move |e| e.date == date)
    }

    pub fn to_ics(&self) -> String {
        ics::to_ics_string(&self.entries, &self.person)
    }

    pub fn write_ics(&self, path: &Path) -> Result<()> {
        ics::write_ics(&self.entries, &self.person, path)
    }
}

fn context(name: &str, year: &str) -> ParseContext {
    let ctx = ParseContext::new(name, year);
    if ctx.matcher.is_empty() {
        log::warn!("No name given; nothing can match");
    }
    if ctx.resolver.year().is_none() {
        log::warn!("Target year '{}' is not a 4-digit year; no dates will resolve", year);
    }
    ctx
}

/// Parses already loaded sheets, in order.
pub fn parse_sheets(sheets: &[Sheet], name: &str, year: &str) -> Schedule {
    let ctx = context(name, year);
    let raw: Vec<ShiftEntry> = sheets.iter().flat_map(|s| parse_sheet(s, &ctx)).collect();
    build(name, year, raw)
}

/// Parses a batch of workbooks. A workbook that cannot be opened is logged
/// and skipped; the remaining ones still count.
pub fn parse_files<P: AsRef<Path>>(paths: &[P], name: &str, year: &str) -> Schedule {
    let ctx = context(name, year);
    let mut raw = Vec::new();
    for path in paths {
        let path = path.as_ref();
        let sheets = match load_sheets(path) {
            Ok(sheets) => sheets,
            Err(e) => {
                log::warn!("Error parsing {}: {:#}", path.display(), e);
                continue;
            }
        };
        for sheet in &sheets {
            raw.extend(parse_sheet(sheet, &ctx));
        }
        log::debug!("{}: {} sheets read", path.display(), sheets.len());
    }
    build(name, year, raw)
}

fn build(name: &str, year: &str, raw: Vec<ShiftEntry>) -> Schedule {
    let raw_count = raw.len();
    let entries = normalize(raw);
    log::info!(
        "Found {} shifts for '{}' in {} ({} before normalization)",
        entries.len(),
        name.trim(),
        year,
        raw_count
    );
    Schedule::new(name, year, entries)
}
