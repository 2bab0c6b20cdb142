// File: ./src/sheet/multilevel.rs
//! Campus rosters with stacked header rows.
//!
//! Branch campus sheets label each column with (task, group). Main campus
//! sheets add a half-day slot in between: (task, slot, group). The activity
//! reads group first, e.g. "A组坐诊".

use super::{ParseContext, Table, scan_positional};
use crate::model::{Location, ShiftEntry, TimeOfDay};

fn activity(task: &str, group: Option<&str>) -> String {
    match group {
        Some(group) => format!("{group}{task}"),
        None => task.to_string(),
    }
}

/// Branch campus: every matched shift is a full day at the branch.
pub fn parse_branch(table: &Table, ctx: &ParseContext) -> Vec<ShiftEntry> {
    scan_positional(table, ctx, |date, weekday, fragments| {
        let task = fragments[0];
        let group = fragments.get(1).copied();
        ShiftEntry::new(
            date,
            weekday,
            TimeOfDay::AllDay,
            activity(task, group),
            Location::JinjiangBranch,
        )
    })
}

/// Main campus: the second fragment is the half-day slot.
pub fn parse_main(table: &Table, ctx: &ParseContext) -> Vec<ShiftEntry> {
    scan_positional(table, ctx, |date, weekday, fragments| {
        let task = fragments[0];
        let time_of_day = fragments
            .get(1)
            .map_or(TimeOfDay::AllDay, |slot| TimeOfDay::from_slot(slot));
        let group = fragments.get(2).copied();
        ShiftEntry::new(
            date,
            weekday,
            time_of_day,
            activity(task, group),
            Location::MainCampus,
        )
    })
}
