use chrono::{DateTime, Utc};
use colored::{ColoredString, Colorize};
use stocksheet::api::{CmdMessage, MessageLevel};
use stocksheet::config::StockConfig;
use stocksheet::model::Status;
use stocksheet::stock::{format_number, StockLine, Summary};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const REMARKS_WIDTH: usize = 30;
const SHORT_ID_LEN: usize = 8;

const COLUMNS: [&str; 11] = [
    "Id", "Item", "Category", "Opening", "In", "Out", "Closing", "Unit", "Reorder", "Status",
    "Remarks",
];
// Right-aligned numeric columns.
const NUMERIC: [bool; 11] = [
    false, false, false, true, true, true, true, false, true, false, false,
];

pub(crate) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
        }
    }
}

fn colored_status(status: Status) -> ColoredString {
    match status {
        Status::Ok => status.as_str().green(),
        Status::Reorder => status.as_str().yellow(),
        Status::OutOfStock => status.as_str().red(),
    }
}

fn short_id(id: &str) -> String {
    id.chars().take(SHORT_ID_LEN).collect()
}

fn cells(line: &StockLine) -> [String; 11] {
    let item = &line.item;
    [
        short_id(&item.id),
        item.name.clone(),
        item.category.clone(),
        format_number(item.opening.value()),
        format_number(item.stock_in.value()),
        format_number(item.stock_out.value()),
        format_number(line.closing),
        item.unit.clone(),
        format_number(item.reorder_level.value()),
        line.status.as_str().to_string(),
        truncate_to_width(&item.remarks.replace('\n', " "), REMARKS_WIDTH),
    ]
}

fn pad(text: &str, width: usize, right_align: bool) -> String {
    let fill = " ".repeat(width.saturating_sub(text.width()));
    if right_align {
        format!("{}{}", fill, text)
    } else {
        format!("{}{}", text, fill)
    }
}

pub(crate) fn print_lines(lines: &[StockLine]) {
    if lines.is_empty() {
        println!("No items found.");
        return;
    }

    let rows: Vec<[String; 11]> = lines.iter().map(cells).collect();
    let mut widths = COLUMNS.map(|c| c.width());
    for row in &rows {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.width());
        }
    }

    let header: Vec<String> = COLUMNS
        .iter()
        .enumerate()
        .map(|(i, c)| pad(c, widths[i], NUMERIC[i]))
        .collect();
    println!("{}", header.join("  ").bold());

    for (row, line) in rows.iter().zip(lines) {
        let rendered: Vec<String> = row
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let padded = pad(cell, widths[i], NUMERIC[i]);
                match i {
                    0 => padded.dimmed().to_string(),
                    1 | 6 => padded.bold().to_string(),
                    9 => pad_colored(line.status, widths[i]),
                    _ => padded,
                }
            })
            .collect();
        println!("{}", rendered.join("  ").trim_end());
    }
}

fn pad_colored(status: Status, width: usize) -> String {
    let fill = " ".repeat(width.saturating_sub(status.as_str().width()));
    format!("{}{}", colored_status(status), fill)
}

pub(crate) fn print_summary(summary: &Summary) {
    println!();
    println!(
        "Total {}   {} {}   {} {}   {} {}",
        summary.total.to_string().bold(),
        "OK".green(),
        summary.ok,
        "Reorder".yellow(),
        summary.reorder,
        "Out of Stock".red(),
        summary.out_of_stock
    );
}

pub(crate) fn print_full_line(line: &StockLine) {
    let item = &line.item;
    println!("{} {}", item.name.bold(), colored_status(line.status));
    println!("--------------------------------");
    println!("Id:        {}", item.id);
    println!("Category:  {}", item.category);
    println!("Unit:      {}", item.unit);
    println!("Opening:   {}", format_number(item.opening.value()));
    println!("In:        {}", format_number(item.stock_in.value()));
    println!("Out:       {}", format_number(item.stock_out.value()));
    println!("Closing:   {}", format_number(line.closing).bold());
    println!("Reorder:   {}", format_number(item.reorder_level.value()));
    if !item.remarks.is_empty() {
        println!("Remarks:   {}", item.remarks);
    }
    if let Some(updated) = item.updated_at {
        println!("Updated:   {}", format_time_ago(updated).dimmed());
    }
}

pub(crate) fn print_config(config: &StockConfig) {
    println!("export-dir = {}", config.export_dir.display());
    println!("default-category = {}", config.default_category);
    println!("default-unit = {}", config.default_unit);
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    Formatter::new().convert(duration.to_std().unwrap_or_default())
}
