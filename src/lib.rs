// Crate root library declaration and module exports.
pub mod cli;
pub mod config;
pub mod context;
pub mod engine;
pub mod ics;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod resolver;
pub mod sheet;
pub mod stats;
pub mod workbook;

pub use engine::{Schedule, parse_files, parse_sheets};
