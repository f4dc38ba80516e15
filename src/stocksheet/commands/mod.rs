use crate::config::StockConfig;
use crate::error::{Result, StockError};
use crate::model::StockItem;
use crate::stock::{StockLine, Summary};
use std::path::PathBuf;

pub mod config;
pub mod delete;
pub mod edit;
pub mod export;
pub mod list;
pub mod report_date;
pub mod show;
pub mod upsert;

pub const NAME_REQUIRED: &str = "Item Name is required.";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_items: Vec<StockItem>,
    pub listed_lines: Vec<StockLine>,
    pub summary: Option<Summary>,
    pub report_date: Option<String>,
    pub csv: Option<String>,
    pub export_path: Option<PathBuf>,
    pub config: Option<StockConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_affected_items(mut self, items: Vec<StockItem>) -> Self {
        self.affected_items = items;
        self
    }

    pub fn with_listed_lines(mut self, lines: Vec<StockLine>) -> Self {
        self.listed_lines = lines;
        self
    }

    pub fn with_summary(mut self, summary: Summary) -> Self {
        self.summary = Some(summary);
        self
    }

    pub fn with_report_date(mut self, date: String) -> Self {
        self.report_date = Some(date);
        self
    }

    pub fn with_config(mut self, config: StockConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Raw field values for adding or editing an item, as typed by the user.
///
/// Every field is optional text. Quantities are coerced when the item is
/// built (blank or non-numeric becomes `0`); only `name` is validated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemInput {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub opening: Option<String>,
    pub stock_in: Option<String>,
    pub stock_out: Option<String>,
    pub reorder: Option<String>,
    pub remarks: Option<String>,
}

impl ItemInput {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Prefills every field from a stored item, as an edit form would.
    pub fn from_item(item: &StockItem) -> Self {
        Self {
            id: Some(item.id.clone()),
            name: Some(item.name.clone()),
            category: Some(item.category.clone()),
            unit: Some(item.unit.clone()),
            opening: Some(item.opening.to_string()),
            stock_in: Some(item.stock_in.to_string()),
            stock_out: Some(item.stock_out.to_string()),
            reorder: Some(item.reorder_level.to_string()),
            remarks: Some(item.remarks.clone()),
        }
    }

    /// Fields set in `changes` win; everything else is kept.
    pub fn overlay(self, changes: &ItemInput) -> Self {
        Self {
            id: changes.id.clone().or(self.id),
            name: changes.name.clone().or(self.name),
            category: changes.category.clone().or(self.category),
            unit: changes.unit.clone().or(self.unit),
            opening: changes.opening.clone().or(self.opening),
            stock_in: changes.stock_in.clone().or(self.stock_in),
            stock_out: changes.stock_out.clone().or(self.stock_out),
            reorder: changes.reorder.clone().or(self.reorder),
            remarks: changes.remarks.clone().or(self.remarks),
        }
    }

    /// The trimmed name, or a validation error if it is blank.
    pub fn validated_name(&self) -> Result<&str> {
        match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Ok(name),
            _ => Err(StockError::Validation(NAME_REQUIRED.to_string())),
        }
    }

    /// The supplied id, if it is not blank.
    pub fn existing_id(&self) -> Option<&str> {
        self.id.as_deref().map(str::trim).filter(|id| !id.is_empty())
    }
}
