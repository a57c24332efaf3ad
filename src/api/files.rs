//! Implements the `DataSource` trait over JSON files in the data directory.

use crate::api::DataSource;
use crate::model::{Category, Expense, ExpenseFilter, Income, IncomeFilter};
use crate::{utils, Result};
use std::path::{Path, PathBuf};
use tracing::trace;

pub(crate) const EXPENSES_JSON: &str = "expenses.json";
pub(crate) const INCOME_JSON: &str = "income.json";
pub(crate) const CATEGORIES_JSON: &str = "categories.json";

/// Reads `expenses.json`, `income.json` and `categories.json` from a directory. Each file holds a
/// JSON array of records. The files are read on every call, so edits made between calls are seen.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file_name: &str) -> PathBuf {
        self.dir.join(file_name)
    }
}

#[async_trait::async_trait]
impl DataSource for FileStore {
    async fn expenses(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        let path = self.path(EXPENSES_JSON);
        trace!("Reading expenses from {}", path.display());
        let all: Vec<Expense> = utils::deserialize(&path).await?;
        Ok(all.into_iter().filter(|e| filter.matches(e)).collect())
    }

    async fn income(&self, filter: &IncomeFilter) -> Result<Vec<Income>> {
        let path = self.path(INCOME_JSON);
        trace!("Reading income from {}", path.display());
        let all: Vec<Income> = utils::deserialize(&path).await?;
        Ok(all.into_iter().filter(|i| filter.matches(i)).collect())
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        let path = self.path(CATEGORIES_JSON);
        trace!("Reading categories from {}", path.display());
        utils::deserialize(&path).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Amount, IncomeSource};
    use crate::test::date;
    use tempfile::TempDir;

    const EXPENSES: &str = r##"[
        {"id": "a", "amount": "12.50", "date": "2026-10-02", "category_id": "food"},
        {"id": "b", "amount": 40, "date": "2026-09-30", "category_id": "fun", "description": "Bowling"}
    ]"##;

    const INCOME: &str = r##"[
        {"id": "x", "amount": "$2,000.00", "date": "2026-10-01", "source": "salary"}
    ]"##;

    const CATEGORIES: &str = r##"[
        {"id": "food", "name": "Food", "color": "#00ff00", "created_at": "2026-01-01T00:00:00Z"}
    ]"##;

    async fn store() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        utils::write(dir.path().join(EXPENSES_JSON), EXPENSES)
            .await
            .unwrap();
        utils::write(dir.path().join(INCOME_JSON), INCOME)
            .await
            .unwrap();
        utils::write(dir.path().join(CATEGORIES_JSON), CATEGORIES)
            .await
            .unwrap();
        let store = FileStore::new(dir.path());
        (dir, store)
    }

    #[tokio::test]
    async fn test_reads_and_filters() {
        let (_dir, store) = store().await;
        let filter = ExpenseFilter {
            start: Some(date(2026, 10, 1)),
            ..ExpenseFilter::default()
        };
        let expenses = store.expenses(&filter).await.unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].get_id(), "a");
        assert_eq!(expenses[0].amount(), Amount::new(rust_decimal::Decimal::new(1250, 2)));

        let all = store.expenses(&ExpenseFilter::default()).await.unwrap();
        assert_eq!(all[1].get_description(), Some("Bowling"));

        let income = store.income(&IncomeFilter::default()).await.unwrap();
        assert_eq!(income[0].source(), IncomeSource::Salary);
        assert_eq!(income[0].amount(), Amount::from(2000));

        let categories = store.categories().await.unwrap();
        assert_eq!(categories[0].color_hex(), Some("#00ff00"));
    }

    #[tokio::test]
    async fn test_sees_changes_between_calls() {
        let (dir, store) = store().await;
        assert_eq!(store.categories().await.unwrap().len(), 1);
        utils::write(dir.path().join(CATEGORIES_JSON), "[]")
            .await
            .unwrap();
        assert!(store.categories().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path());
        assert!(store.categories().await.is_err());
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let (dir, store) = store().await;
        utils::write(dir.path().join(INCOME_JSON), "{not json")
            .await
            .unwrap();
        assert!(store.income(&IncomeFilter::default()).await.is_err());
    }
}
