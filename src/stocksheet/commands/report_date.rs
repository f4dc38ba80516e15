use crate::commands::{CmdMessage, CmdResult};
use crate::error::{Result, StockError};
use crate::store::ItemStore;
use chrono::NaiveDate;

pub fn show<S: ItemStore>(store: &S) -> Result<CmdResult> {
    Ok(CmdResult::default().with_report_date(store.load_report_date()))
}

/// Sets the report date. Only real `YYYY-MM-DD` dates are accepted.
pub fn set<S: ItemStore>(store: &mut S, value: &str) -> Result<CmdResult> {
    let value = value.trim();
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| StockError::Validation(format!("Invalid report date: {} (expected YYYY-MM-DD)", value)))?;
    let normalized = date.format("%Y-%m-%d").to_string();
    store.save_report_date(&normalized)?;

    let mut result = CmdResult::default();
    result.add_message(CmdMessage::success(format!("Report date set to {}", normalized)));
    Ok(result.with_report_date(normalized))
}
