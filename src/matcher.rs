// File: ./src/matcher.rs
use crate::sheet::Cell;

/// Whitespace-insensitive substring match of a person's name in a cell.
///
/// Roster cells frequently list several people ("张三 / 李四"), so a match
/// anywhere in the cell counts. Only text cells can match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameMatcher {
    needle: String,
}

impl NameMatcher {
    pub fn new(name: &str) -> Self {
        Self {
            needle: strip_whitespace(name),
        }
    }

    pub fn name(&self) -> &str {
        &self.needle
    }

    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn matches(&self, cell: &Cell) -> bool {
        if self.needle.is_empty() {
            return false;
        }
        match cell.as_text() {
            Some(text) => strip_whitespace(text).contains(&self.needle),
            None => false,
        }
    }
}

fn strip_whitespace(s: &str) -> String {
    s.chars().filter(|c| !c.is_whitespace()).collect()
}
