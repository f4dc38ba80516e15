use super::{encode_items, parse_items, report_date_or_today, ItemStore};
use crate::error::{Result, StockError};
use crate::model::StockItem;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const ITEMS_FILE: &str = "items.json";
const REPORT_DATE_FILE: &str = "report_date";

pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn items_path(&self) -> PathBuf {
        self.root.join(ITEMS_FILE)
    }

    fn ensure_dir(&self) -> Result<()> {
        if !self.root.exists() {
            fs::create_dir_all(&self.root).map_err(StockError::Io)?;
        }
        Ok(())
    }

    fn read_optional(&self, name: &str) -> Option<String> {
        let path = self.root.join(name);
        match fs::read_to_string(&path) {
            Ok(content) => Some(content),
            Err(e) if e.kind() == ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "could not read stored file");
                None
            }
        }
    }

    /// Writes next to the target, then renames over it, so readers see either
    /// the old file or the new one.
    fn write_replace(&self, name: &str, content: &str) -> Result<()> {
        self.ensure_dir()?;
        let target = self.root.join(name);
        let staging = self.root.join(format!(".{}.tmp", name));
        fs::write(&staging, content).map_err(StockError::Io)?;
        fs::rename(&staging, &target).map_err(StockError::Io)?;
        Ok(())
    }
}

impl ItemStore for FileStore {
    fn load(&self) -> Vec<StockItem> {
        let items = self
            .read_optional(ITEMS_FILE)
            .map(|raw| parse_items(&raw))
            .unwrap_or_default();
        tracing::debug!(count = items.len(), root = %self.root.display(), "loaded items");
        items
    }

    fn save(&mut self, items: &[StockItem]) -> Result<()> {
        let content = encode_items(items)?;
        self.write_replace(ITEMS_FILE, &content)?;
        tracing::debug!(count = items.len(), root = %self.root.display(), "saved items");
        Ok(())
    }

    fn load_report_date(&self) -> String {
        report_date_or_today(self.read_optional(REPORT_DATE_FILE).as_deref())
    }

    fn save_report_date(&mut self, value: &str) -> Result<()> {
        self.write_replace(REPORT_DATE_FILE, value)
    }
}
