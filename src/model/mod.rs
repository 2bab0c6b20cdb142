// File: ./src/model/mod.rs
pub mod entry;

pub use entry::{Category, Location, ShiftEntry, TimeOfDay, REINFORCED_MARKER, STANDARD_WEEKDAYS};
