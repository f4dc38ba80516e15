//! # API Facade
//!
//! `StockApi` is the single entry point for stock sheet operations. It
//! dispatches to `commands/*.rs` and returns structured [`CmdResult`]s; it does
//! no formatting and no terminal I/O.
//!
//! The API is generic over [`ItemStore`]:
//! - Production: `StockApi<FileStore>`
//! - Testing: `StockApi<InMemoryStore>`

use crate::commands;
use crate::config::StockConfig;
use crate::error::Result;
use crate::query::StatusFilter;
use crate::store::ItemStore;
use std::path::{Path, PathBuf};

pub struct StockApi<S: ItemStore> {
    store: S,
    config_dir: PathBuf,
    config: StockConfig,
}

impl<S: ItemStore> StockApi<S> {
    pub fn new(store: S, config_dir: PathBuf, config: StockConfig) -> Self {
        Self {
            store,
            config_dir,
            config,
        }
    }

    pub fn list_items(&self, query: &str, facet: StatusFilter) -> Result<CmdResult> {
        commands::list::run(&self.store, query, facet)
    }

    pub fn show_item(&self, id: &str) -> Result<CmdResult> {
        commands::show::run(&self.store, id)
    }

    pub fn upsert_item(&mut self, input: &ItemInput) -> Result<CmdResult> {
        commands::upsert::run(&mut self.store, input, &self.config)
    }

    pub fn edit_item(&mut self, id: &str, changes: &ItemInput) -> Result<CmdResult> {
        commands::edit::run(&mut self.store, id, changes, &self.config)
    }

    pub fn delete_item(&mut self, id: &str) -> Result<CmdResult> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn export_csv(&self) -> Result<CmdResult> {
        commands::export::render(&self.store)
    }

    /// Writes the export file into `out_dir`, or the configured export dir.
    pub fn export_file(&self, out_dir: Option<&Path>) -> Result<CmdResult> {
        let dir = out_dir.unwrap_or(self.config.export_dir.as_path());
        commands::export::write_file(&self.store, dir)
    }

    pub fn report_date(&self) -> Result<CmdResult> {
        commands::report_date::show(&self.store)
    }

    pub fn set_report_date(&mut self, value: &str) -> Result<CmdResult> {
        commands::report_date::set(&mut self.store, value)
    }

    pub fn config(&mut self, action: ConfigAction) -> Result<CmdResult> {
        let result = commands::config::run(&self.config_dir, action)?;
        if let Some(config) = &result.config {
            self.config = config.clone();
        }
        Ok(result)
    }
}

pub use crate::commands::config::ConfigAction;
pub use commands::{CmdMessage, CmdResult, ItemInput, MessageLevel};
