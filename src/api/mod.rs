//! The data-access seam. Everything that computes metrics receives its records through the
//! `DataSource` trait so that the storage behind it can be swapped out, e.g. for seeded in-memory
//! data when testing.

mod files;
mod memory;

use crate::model::{Category, Expense, ExpenseFilter, Income, IncomeFilter};
use crate::{Config, Result};
use std::sync::Arc;
use tracing::debug;

pub(crate) use files::{CATEGORIES_JSON, EXPENSES_JSON, INCOME_JSON};
pub use files::FileStore;
pub use memory::MemoryStore;

/// The name of the environment variable that, when set to a non-empty value, causes the program
/// to use seeded in-memory data instead of the files in the data directory.
pub const TEST_MODE_ENV: &str = "SPENDBOARD_IN_TEST_MODE";

/// Provides expense, income and category records.
///
/// Implementations must be safe to call concurrently; the dashboard issues all of its queries at
/// once.
#[async_trait::async_trait]
pub trait DataSource: Send + Sync {
    /// All expenses selected by `filter`.
    async fn expenses(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>>;

    /// All income records selected by `filter`.
    async fn income(&self, filter: &IncomeFilter) -> Result<Vec<Income>>;

    /// All categories, unfiltered.
    async fn categories(&self) -> Result<Vec<Category>>;
}

/// Selects which `DataSource` implementation the program uses.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq)]
pub enum Mode {
    /// Read the JSON files in the configured data directory.
    #[default]
    Files,
    /// Use the seeded `MemoryStore`.
    Testing,
}

impl Mode {
    /// Returns `Mode::Testing` when `SPENDBOARD_IN_TEST_MODE` is set and non-empty, otherwise
    /// `Mode::Files`.
    pub fn from_env() -> Self {
        match std::env::var(TEST_MODE_ENV) {
            Ok(value) if !value.is_empty() => Mode::Testing,
            _ => Mode::Files,
        }
    }
}

/// Creates the `DataSource` for `mode`.
pub fn data_source(config: &Config, mode: Mode) -> Arc<dyn DataSource> {
    debug!("Using data source mode {mode:?}");
    match mode {
        Mode::Files => Arc::new(FileStore::new(config.data_dir())),
        Mode::Testing => Arc::new(MemoryStore::demo()),
    }
}
