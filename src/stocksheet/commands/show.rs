use crate::commands::CmdResult;
use crate::error::{Result, StockError};
use crate::stock::StockLine;
use crate::store::ItemStore;

pub fn run<S: ItemStore>(store: &S, id: &str) -> Result<CmdResult> {
    let item = store
        .load()
        .into_iter()
        .find(|it| it.id == id)
        .ok_or_else(|| StockError::ItemNotFound(id.to_string()))?;
    Ok(CmdResult::default().with_listed_lines(vec![StockLine::new(item)]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Status;
    use crate::store::memory::fixtures::StoreFixture;

    #[test]
    fn shows_derived_values() {
        let f = StoreFixture::new().with_item("Rice", 10.0, 0.0, 5.0, 5.0);
        let result = run(&f.store, &f.id_of("Rice")).unwrap();
        let line = &result.listed_lines[0];
        assert_eq!(line.closing, 5.0);
        assert_eq!(line.status, Status::Reorder);
    }

    #[test]
    fn unknown_id_errors() {
        let f = StoreFixture::new();
        assert!(matches!(
            run(&f.store, "ghost"),
            Err(StockError::ItemNotFound(_))
        ));
    }
}
