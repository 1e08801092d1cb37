use super::Column;
use crate::model::AlertRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    /// Header marker shown next to the sorted column.
    pub fn arrow(self) -> &'static str {
        match self {
            Direction::Asc => "▲",
            Direction::Desc => "▼",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Asc => write!(f, "asc"),
            Direction::Desc => write!(f, "desc"),
        }
    }
}

impl FromStr for Direction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Ok(Direction::Asc),
            "desc" | "descending" => Ok(Direction::Desc),
            other => Err(format!("unknown sort direction '{}'", other)),
        }
    }
}

/// Single-column sort state for the alert table.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    current: Option<(Column, Direction)>,
}

impl SortState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn by(column: Column, direction: Direction) -> Self {
        Self {
            current: Some((column, direction)),
        }
    }

    pub fn current(&self) -> Option<(Column, Direction)> {
        self.current
    }

    /// Header click: a new column starts ascending and replaces the old
    /// sort; the same column cycles ascending, descending, unsorted.
    pub fn toggle(&mut self, column: Column) {
        self.current = match self.current {
            Some((c, Direction::Asc)) if c == column => Some((column, Direction::Desc)),
            Some((c, Direction::Desc)) if c == column => None,
            _ => Some((column, Direction::Asc)),
        };
    }

    pub fn set(&mut self, column: Column, direction: Direction) {
        self.current = Some((column, direction));
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Arrow for `column` if it is the sorted one.
    pub fn marker(&self, column: Column) -> &'static str {
        match self.current {
            Some((c, dir)) if c == column => dir.arrow(),
            _ => "",
        }
    }

    /// Stable sort in place; unsorted leaves input order untouched.
    pub fn sort(&self, rows: &mut [&AlertRecord]) {
        if let Some((column, direction)) = self.current {
            rows.sort_by(|a, b| {
                let ord = column.compare(a, b);
                match direction {
                    Direction::Asc => ord,
                    Direction::Desc => ord.reverse(),
                }
            });
        }
    }
}
