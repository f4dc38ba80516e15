use crate::commands::{CmdMessage, CmdResult};
use crate::csv_export::{export, export_filename};
use crate::error::{Result, StockError};
use crate::stock::derive;
use crate::store::ItemStore;
use std::fs;
use std::path::Path;

struct Sheet {
    report_date: String,
    csv: String,
    item_count: usize,
}

fn build_sheet<S: ItemStore>(store: &S) -> Sheet {
    let report_date = store.load_report_date();
    let lines = derive(store.load());
    Sheet {
        csv: export(&lines, &report_date),
        item_count: lines.len(),
        report_date,
    }
}

fn base_result(sheet: &Sheet) -> CmdResult {
    let mut result = CmdResult::default();
    if sheet.item_count == 0 {
        result.add_message(CmdMessage::warning(
            "The sheet has no items; exporting the header only.",
        ));
    }
    result.with_report_date(sheet.report_date.clone())
}

/// Builds the CSV for the whole sheet under the stored report date.
pub fn render<S: ItemStore>(store: &S) -> Result<CmdResult> {
    let sheet = build_sheet(store);
    let mut result = base_result(&sheet);
    result.csv = Some(sheet.csv);
    Ok(result)
}

/// Writes `Kolapasi_Daily_Stock_<date>.csv` into `out_dir`, replacing any earlier export.
pub fn write_file<S: ItemStore>(store: &S, out_dir: &Path) -> Result<CmdResult> {
    let sheet = build_sheet(store);
    let mut result = base_result(&sheet);

    if !out_dir.exists() {
        fs::create_dir_all(out_dir).map_err(StockError::Io)?;
    }
    let path = out_dir.join(export_filename(&sheet.report_date));
    fs::write(&path, sheet.csv.as_bytes()).map_err(StockError::Io)?;
    tracing::debug!(path = %path.display(), bytes = sheet.csv.len(), "wrote export");

    result.add_message(CmdMessage::success(format!("Exported to {}", path.display())));
    result.export_path = Some(path);
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use crate::store::memory::fixtures::StoreFixture;
    use tempfile::TempDir;

    #[test]
    fn renders_full_sheet_with_report_date() {
        let f = StoreFixture::new()
            .with_item("Rice", 10.0, 5.0, 3.0, 4.0)
            .with_item("Salt", 0.0, 0.0, 0.0, 0.0)
            .with_report_date("2024-01-01");
        let result = render(&f.store).unwrap();
        let csv = result.csv.unwrap();
        let rows: Vec<_> = csv.lines().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1], "2024-01-01,Rice,Other,10,5,3,12,Nos,4,OK,");
        assert_eq!(rows[2], "2024-01-01,Salt,Other,0,0,0,0,Nos,0,Out of Stock,");
    }

    #[test]
    fn empty_sheet_warns() {
        let f = StoreFixture::new();
        let result = render(&f.store).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
    }

    #[test]
    fn writes_named_file() {
        let temp = TempDir::new().unwrap();
        let out_dir = temp.path().join("exports");
        let f = StoreFixture::new()
            .with_item("Rice", 10.0, 5.0, 3.0, 4.0)
            .with_report_date("2024-01-01");

        let result = write_file(&f.store, &out_dir).unwrap();
        let path = result.export_path.unwrap();
        assert_eq!(path, out_dir.join("Kolapasi_Daily_Stock_2024-01-01.csv"));
        let written = fs::read_to_string(path).unwrap();
        assert!(written.starts_with("Date,Item Name,"));
        assert!(!written.ends_with('\n'));
    }
}
