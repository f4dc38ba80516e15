//! # Stock Calculator
//!
//! Closing stock and status are derived from an item's four quantities every
//! time they are needed. They are never stored, so an edit can never leave
//! them stale.
//!
//! Status precedence, first match wins:
//!
//! 1. `closing <= 0` is **Out of Stock**
//! 2. `reorder_level > 0 && closing <= reorder_level` is **Reorder**
//! 3. otherwise **OK**
//!
//! A reorder level of zero or below disables the Reorder tier.

use crate::model::{Status, StockItem};

/// Maps any number to a finite one. NaN and infinities become zero.
pub fn coerce(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Parses user or stored text as a quantity. Blank or unparseable text is zero.
pub fn coerce_text(raw: &str) -> f64 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0.0;
    }
    trimmed.parse::<f64>().map(coerce).unwrap_or(0.0)
}

pub fn compute_closing(item: &StockItem) -> f64 {
    coerce(item.opening.value()) + coerce(item.stock_in.value()) - coerce(item.stock_out.value())
}

pub fn compute_status(item: &StockItem) -> Status {
    status_for(compute_closing(item), coerce(item.reorder_level.value()))
}

fn status_for(closing: f64, reorder_level: f64) -> Status {
    if closing <= 0.0 {
        Status::OutOfStock
    } else if reorder_level > 0.0 && closing <= reorder_level {
        Status::Reorder
    } else {
        Status::Ok
    }
}

/// Rounds to two decimals and drops trailing zeros: `3`, `3.5`, `3.33`.
/// Halves round toward positive infinity. Non-finite input renders empty.
pub fn format_number(n: f64) -> String {
    if !n.is_finite() {
        return String::new();
    }
    let rounded = (n * 100.0 + 0.5).floor() / 100.0;
    format_raw(rounded)
}

/// Renders a number as-is, without forced trailing zeros.
///
/// Magnitudes of `1e21` and above, or below `1e-6`, switch to exponent form
/// with an explicit sign on positive exponents: `1e+21`, `1.5e-7`.
pub fn format_raw(n: f64) -> String {
    if !n.is_finite() {
        return String::new();
    }
    // Avoid printing "-0".
    if n == 0.0 {
        return "0".to_string();
    }
    let magnitude = n.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return n.to_string();
    }
    let exp = format!("{:e}", n);
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{}e+{}", mantissa, power),
        _ => exp,
    }
}

/// An item together with its derived values.
#[derive(Debug, Clone, PartialEq)]
pub struct StockLine {
    pub item: StockItem,
    pub closing: f64,
    pub status: Status,
}

impl StockLine {
    pub fn new(item: StockItem) -> Self {
        let closing = compute_closing(&item);
        let status = compute_status(&item);
        Self {
            item,
            closing,
            status,
        }
    }
}

pub fn derive(items: Vec<StockItem>) -> Vec<StockLine> {
    items.into_iter().map(StockLine::new).collect()
}

/// Status counts over the whole sheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub ok: usize,
    pub reorder: usize,
    pub out_of_stock: usize,
}

impl Summary {
    pub fn of(lines: &[StockLine]) -> Self {
        lines.iter().fold(
            Summary {
                total: lines.len(),
                ..Summary::default()
            },
            |mut acc, line| {
                match line.status {
                    Status::Ok => acc.ok += 1,
                    Status::Reorder => acc.reorder += 1,
                    Status::OutOfStock => acc.out_of_stock += 1,
                }
                acc
            },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(opening: f64, stock_in: f64, stock_out: f64, reorder: f64) -> StockItem {
        StockItem::new("Test").with_quantities(opening, stock_in, stock_out, reorder)
    }

    #[test]
    fn closing_is_opening_plus_in_minus_out() {
        assert_eq!(compute_closing(&item(10.0, 5.0, 3.0, 0.0)), 12.0);
        assert_eq!(compute_closing(&item(0.0, 0.0, 4.0, 0.0)), -4.0);
    }

    #[test]
    fn zero_closing_is_out_of_stock() {
        let it = item(5.0, 0.0, 5.0, 2.0);
        assert_eq!(compute_closing(&it), 0.0);
        assert_eq!(compute_status(&it), Status::OutOfStock);
    }

    #[test]
    fn negative_closing_is_out_of_stock() {
        assert_eq!(compute_status(&item(1.0, 0.0, 3.0, 0.0)), Status::OutOfStock);
    }

    #[test]
    fn closing_equal_to_reorder_level_is_reorder() {
        let it = item(10.0, 0.0, 5.0, 5.0);
        assert_eq!(compute_closing(&it), 5.0);
        assert_eq!(compute_status(&it), Status::Reorder);
    }

    #[test]
    fn zero_reorder_level_never_triggers_reorder() {
        assert_eq!(compute_status(&item(3.0, 0.0, 0.0, 0.0)), Status::Ok);
        assert_eq!(compute_status(&item(3.0, 0.0, 0.0, -1.0)), Status::Ok);
    }

    #[test]
    fn above_reorder_level_is_ok() {
        assert_eq!(compute_status(&item(10.0, 0.0, 0.0, 4.0)), Status::Ok);
    }

    #[test]
    fn coerce_text_handles_junk() {
        assert_eq!(coerce_text(""), 0.0);
        assert_eq!(coerce_text("   "), 0.0);
        assert_eq!(coerce_text("abc"), 0.0);
        assert_eq!(coerce_text("NaN"), 0.0);
        assert_eq!(coerce_text("inf"), 0.0);
        assert_eq!(coerce_text(" 12.5 "), 12.5);
        assert_eq!(coerce_text("-3"), -3.0);
    }

    #[test]
    fn coerce_non_finite() {
        assert_eq!(coerce(f64::NAN), 0.0);
        assert_eq!(coerce(f64::INFINITY), 0.0);
        assert_eq!(coerce(2.0), 2.0);
    }

    #[test]
    fn format_number_drops_trailing_zeros() {
        assert_eq!(format_number(3.0), "3");
        assert_eq!(format_number(3.5), "3.5");
        assert_eq!(format_number(3.333), "3.33");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(-0.001), "0");
        assert_eq!(format_number(f64::NAN), "");
    }

    #[test]
    fn format_raw_uses_exponents_at_the_extremes() {
        assert_eq!(format_raw(0.000001), "0.000001");
        assert_eq!(format_raw(1e-7), "1e-7");
        assert_eq!(format_raw(1.5e-9), "1.5e-9");
        assert_eq!(format_raw(1e20), "100000000000000000000");
        assert_eq!(format_raw(1e21), "1e+21");
        assert_eq!(format_raw(-2.5e22), "-2.5e+22");
        assert_eq!(format_raw(-0.0), "0");
        assert_eq!(format_raw(12.5), "12.5");
    }

    #[test]
    fn summary_counts_each_status() {
        let lines = derive(vec![
            item(10.0, 0.0, 0.0, 0.0),
            item(3.0, 0.0, 0.0, 5.0),
            item(0.0, 0.0, 0.0, 0.0),
            item(8.0, 0.0, 0.0, 2.0),
        ]);
        let summary = Summary::of(&lines);
        assert_eq!(
            summary,
            Summary {
                total: 4,
                ok: 2,
                reorder: 1,
                out_of_stock: 1
            }
        );
    }
}
