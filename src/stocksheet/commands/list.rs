use crate::commands::CmdResult;
use crate::error::Result;
use crate::query::{filter, StatusFilter};
use crate::stock::{derive, Summary};
use crate::store::ItemStore;

/// Filtered lines for display, plus the summary of the whole sheet.
pub fn run<S: ItemStore>(store: &S, query: &str, facet: StatusFilter) -> Result<CmdResult> {
    let lines = derive(store.load());
    let summary = Summary::of(&lines);
    let listed = filter(&lines, query, facet);

    Ok(CmdResult::default()
        .with_listed_lines(listed)
        .with_summary(summary))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use crate::store::memory::fixtures::StoreFixture;

    fn fixture() -> StoreFixture {
        StoreFixture::new()
            .with_item("Rice", 10.0, 5.0, 3.0, 4.0)
            .with_item("Milk", 4.0, 0.0, 0.0, 5.0)
            .with_item("Sugar", 2.0, 0.0, 2.0, 1.0)
    }

    #[test]
    fn lists_everything_in_stored_order() {
        let f = fixture();
        let result = run(&f.store, "", StatusFilter::All).unwrap();
        let names: Vec<_> = result.listed_lines.iter().map(|l| l.item.name.as_str()).collect();
        assert_eq!(names, vec!["Rice", "Milk", "Sugar"]);
    }

    #[test]
    fn summary_ignores_filter() {
        let f = fixture();
        let result = run(&f.store, "rice", StatusFilter::All).unwrap();
        assert_eq!(result.listed_lines.len(), 1);
        let summary = result.summary.unwrap();
        assert_eq!(summary.total, 3);
        assert_eq!(summary.ok, 1);
        assert_eq!(summary.reorder, 1);
        assert_eq!(summary.out_of_stock, 1);
    }

    #[test]
    fn filters_by_status() {
        let f = fixture();
        let result = run(&f.store, "", StatusFilter::Only(Status::Reorder)).unwrap();
        assert_eq!(result.listed_lines.len(), 1);
        assert_eq!(result.listed_lines[0].item.name, "Milk");
        assert_eq!(result.listed_lines[0].closing, 4.0);
    }
}
