//! # Query Engine
//!
//! Filters derived stock lines by a free-text query and a status facet.
//! Matching is a case-insensitive substring test over the line's name,
//! category, unit, status and remarks, joined by single spaces. Output keeps
//! the stored order.

use crate::model::Status;
use crate::stock::StockLine;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatusFilter {
    #[default]
    All,
    Only(Status),
}

impl StatusFilter {
    pub fn matches(self, status: Status) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Only(wanted) => wanted == status,
        }
    }
}

impl FromStr for StatusFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "all" | "" => Ok(StatusFilter::All),
            "ok" => Ok(StatusFilter::Only(Status::Ok)),
            "reorder" => Ok(StatusFilter::Only(Status::Reorder)),
            "out of stock" | "out-of-stock" | "oos" => Ok(StatusFilter::Only(Status::OutOfStock)),
            other => Err(format!(
                "Unknown status filter: {} (expected ALL, OK, Reorder or \"Out of Stock\")",
                other
            )),
        }
    }
}

impl fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusFilter::All => f.write_str("ALL"),
            StatusFilter::Only(status) => write!(f, "{}", status),
        }
    }
}

/// The text a query is matched against.
fn haystack(line: &StockLine) -> String {
    [
        line.item.name.as_str(),
        line.item.category.as_str(),
        line.item.unit.as_str(),
        line.status.as_str(),
        line.item.remarks.as_str(),
    ]
    .join(" ")
    .to_lowercase()
}

pub fn matches(line: &StockLine, query: &str, facet: StatusFilter) -> bool {
    if !facet.matches(line.status) {
        return false;
    }
    let needle = query.trim().to_lowercase();
    needle.is_empty() || haystack(line).contains(&needle)
}

pub fn filter(lines: &[StockLine], query: &str, facet: StatusFilter) -> Vec<StockLine> {
    lines
        .iter()
        .filter(|line| matches(line, query, facet))
        .cloned()
        .collect()
}
