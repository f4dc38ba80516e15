//! # CSV Exporter
//!
//! The exported sheet is the one artifact other tools read, so its layout is
//! fixed: header text, column order, quoting and line endings must not change.
//!
//! ```text
//! Date,Item Name,Category,Opening Stock,Stock In,Stock Out,Closing Stock,Unit,Reorder Level,Status,Remarks
//! 2024-01-01,Rice,Grocery,10,5,3,12,kg,4,OK,"ok, fresh"
//! ```
//!
//! Text fields are quoted only when they contain a comma, a double quote or a
//! newline. Numbers are never quoted. Rows are joined with `\n` and there is no
//! trailing newline.

use crate::stock::{format_number, StockLine};

pub const HEADER: [&str; 11] = [
    "Date",
    "Item Name",
    "Category",
    "Opening Stock",
    "Stock In",
    "Stock Out",
    "Closing Stock",
    "Unit",
    "Reorder Level",
    "Status",
    "Remarks",
];

pub const MIME_TYPE: &str = "text/csv";

pub fn export_filename(report_date: &str) -> String {
    format!("Kolapasi_Daily_Stock_{}.csv", report_date)
}

pub fn escape_field(value: &str) -> String {
    if value.contains([',', '"', '\n']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

fn row(line: &StockLine, report_date: &str) -> String {
    let item = &line.item;
    [
        report_date.to_string(),
        escape_field(&item.name),
        escape_field(&item.category),
        item.opening.to_string(),
        item.stock_in.to_string(),
        item.stock_out.to_string(),
        format_number(line.closing),
        escape_field(&item.unit),
        item.reorder_level.to_string(),
        escape_field(line.status.as_str()),
        escape_field(&item.remarks),
    ]
    .join(",")
}

/// Serializes every line, ignoring whatever filter the caller is displaying.
pub fn export(lines: &[StockLine], report_date: &str) -> String {
    std::iter::once(HEADER.join(","))
        .chain(lines.iter().map(|line| row(line, report_date)))
        .collect::<Vec<_>>()
        .join("\n")
}
