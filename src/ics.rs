// File: ./src/ics.rs
//! iCalendar (RFC 5545) export of normalized shifts.
//!
//! The document is assembled by hand: every event is a fixed set of
//! properties and the folding rule has to respect UTF-8 boundaries for the
//! Chinese activity names that dominate rosters.

use crate::model::{ShiftEntry, TimeOfDay};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::fs;
use std::path::Path;
use uuid::Uuid;

/// Maximum octets on a physical content line, CRLF excluded.
pub const FOLD_LIMIT: usize = 75;

const CRLF: &str = "\r\n";
const UID_DOMAIN: &str = "rostercal.local";

/// Escapes a TEXT property value (RFC 5545 §3.3.11).
pub fn escape_text(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '\\' => out.push_str("\\\\"),
            ',' => out.push_str("\\,"),
            ';' => out.push_str("\\;"),
            '\n' => out.push_str("\\n"),
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                out.push_str("\\n");
            }
            _ => out.push(c),
        }
    }
    out
}

/// Folds a content line into physical lines of at most [`FOLD_LIMIT`] octets.
///
/// Continuation lines start with a single space, which counts towards their
/// limit. Splits always fall on a character boundary.
pub fn fold_line(line: &str) -> String {
    if line.len() <= FOLD_LIMIT {
        return line.to_string();
    }
    let mut out = String::with_capacity(line.len() + line.len() / (FOLD_LIMIT - 1) * 3);
    let mut rest = line;
    let mut limit = FOLD_LIMIT;
    while rest.len() > limit {
        let mut split = limit;
        while !rest.is_char_boundary(split) {
            split -= 1;
        }
        out.push_str(&rest[..split]);
        out.push_str(CRLF);
        out.push(' ');
        rest = &rest[split..];
        limit = FOLD_LIMIT - 1;
    }
    out.push_str(rest);
    out
}

/// Clock range and description for a slot. All-day shifts have no range.
fn slot_times(time_of_day: TimeOfDay) -> (Option<(&'static str, &'static str)>, &'static str) {
    match time_of_day {
        TimeOfDay::Morning => (Some(("090000", "120000")), "班次: 上午"),
        TimeOfDay::Afternoon => (Some(("140000", "170000")), "班次: 下午"),
        TimeOfDay::Evening => (Some(("190000", "210000")), "班次: 晚上 (加强)"),
        TimeOfDay::AllDay => (None, "班次: 全天"),
    }
}

fn push_event(lines: &mut Vec<String>, entry: &ShiftEntry, stamp: &str) {
    let date = entry.date.format("%Y%m%d").to_string();
    let (range, description) = slot_times(entry.time_of_day);

    lines.push("BEGIN:VEVENT".to_string());
    lines.push(format!("UID:{}@{}", Uuid::new_v4(), UID_DOMAIN));
    lines.push(format!("DTSTAMP:{stamp}"));
    match range {
        Some((start, end)) => {
            lines.push(format!("DTSTART:{date}T{start}"));
            lines.push(format!("DTEND:{date}T{end}"));
        }
        None => lines.push(format!("DTSTART;VALUE=DATE:{date}")),
    }
    lines.push(fold_line(&format!(
        "SUMMARY:{}",
        escape_text(&entry.summary_text())
    )));
    lines.push(fold_line(&format!(
        "LOCATION:{}",
        escape_text(&entry.location.to_string())
    )));
    lines.push(fold_line(&format!(
        "DESCRIPTION:{}",
        escape_text(description)
    )));
    lines.push("END:VEVENT".to_string());
}

/// Renders the calendar with an explicit DTSTAMP instant.
pub fn render_at(entries: &[ShiftEntry], name: &str, now: DateTime<Utc>) -> String {
    let stamp = now.format("%Y%m%dT%H%M%SZ").to_string();
    let mut lines = vec![
        "BEGIN:VCALENDAR".to_string(),
        "VERSION:2.0".to_string(),
        fold_line(&format!(
            "PRODID:-//Rostercal//{}//{}//CN",
            env!("CARGO_PKG_VERSION"),
            name
        )),
        "CALSCALE:GREGORIAN".to_string(),
    ];
    for entry in entries {
        push_event(&mut lines, entry, &stamp);
    }
    lines.push("END:VCALENDAR".to_string());

    let mut out = lines.join(CRLF);
    out.push_str(CRLF);
    out
}

/// Renders the calendar stamped with the current UTC time.
pub fn to_ics_string(entries: &[ShiftEntry], name: &str) -> String {
    render_at(entries, name, Utc::now())
}

/// Writes the calendar to `path`, replacing it atomically.
pub fn write_ics(entries: &[ShiftEntry], name: &str, path: &Path) -> Result<()> {
    let contents = to_ics_string(entries, name);
    let tmp_path = path.with_extension("ics.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("Failed to write calendar file: {}", tmp_path.display()))?;
    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(e).with_context(|| {
            format!("Failed to move calendar file into place: {}", path.display())
        });
    }
    log::info!("Wrote {} events to {}", entries.len(), path.display());
    Ok(())
}
