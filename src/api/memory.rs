//! Implements the `DataSource` trait using in-memory data.
//!
//! Note: this is compiled even in the "production" version of this app so that we can run the whole
//! app, top-to-bottom, without any data files.

use crate::api::DataSource;
use crate::model::{Amount, Category, Expense, ExpenseFilter, Income, IncomeFilter, IncomeSource};
use crate::Result;
use anyhow::Context;
use chrono::NaiveDate;
use std::io::Cursor;
use std::str::FromStr;
use tracing::error;

/// An implementation of the `DataSource` trait that holds its records in memory. By default, it
/// is seeded with some demo data.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    expenses: Vec<Expense>,
    income: Vec<Income>,
    categories: Vec<Category>,
}

impl MemoryStore {
    /// Create a new `MemoryStore` holding exactly the given records.
    pub fn new(expenses: Vec<Expense>, income: Vec<Income>, categories: Vec<Category>) -> Self {
        Self {
            expenses,
            income,
            categories,
        }
    }

    /// Create a `MemoryStore` holding the seed data from this module.
    pub fn seeded() -> Result<Self> {
        Ok(Self::new(
            parse_expenses(EXPENSE_DATA).context("Bad expense seed data")?,
            parse_income(INCOME_DATA).context("Bad income seed data")?,
            parse_categories(CATEGORY_DATA).context("Bad category seed data")?,
        ))
    }

    /// The seeded store, or an empty one if the seed data cannot be parsed.
    pub fn demo() -> Self {
        Self::seeded().unwrap_or_else(|e| {
            error!("Unable to load the seed data, continuing without it: {e:#}");
            Self::default()
        })
    }
}

#[async_trait::async_trait]
impl DataSource for MemoryStore {
    async fn expenses(&self, filter: &ExpenseFilter) -> Result<Vec<Expense>> {
        Ok(self
            .expenses
            .iter()
            .filter(|e| filter.matches(e))
            .cloned()
            .collect())
    }

    async fn income(&self, filter: &IncomeFilter) -> Result<Vec<Income>> {
        Ok(self
            .income
            .iter()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect())
    }

    async fn categories(&self) -> Result<Vec<Category>> {
        Ok(self.categories.clone())
    }
}

/// Loads data rows, without the header row, from a CSV-formatted string.
fn load_csv(csv_data: &str) -> Result<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .from_reader(Cursor::new(csv_data.as_bytes()));

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }
    Ok(rows)
}

/// Returns the cell at `ix`, failing if the row is too short.
fn cell(row: &[String], ix: usize) -> Result<&str> {
    row.get(ix)
        .map(|s| s.as_str())
        .with_context(|| format!("Column {ix} is missing from row {row:?}"))
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").with_context(|| format!("Bad date '{value}'"))
}

fn parse_amount(value: &str) -> Result<Amount> {
    Amount::from_str(value).with_context(|| format!("Bad amount '{value}'"))
}

fn parse_expenses(csv_data: &str) -> Result<Vec<Expense>> {
    let mut expenses = Vec::new();
    for row in load_csv(csv_data)? {
        let mut expense = Expense::new(
            parse_amount(cell(&row, 3)?)?,
            parse_date(cell(&row, 1)?)?,
            cell(&row, 2)?,
        )
        .id(cell(&row, 0)?);
        if let Some(description) = optional(cell(&row, 4)?) {
            expense = expense.description(description);
        }
        expenses.push(expense);
    }
    Ok(expenses)
}

fn parse_income(csv_data: &str) -> Result<Vec<Income>> {
    let mut income = Vec::new();
    for row in load_csv(csv_data)? {
        let source_name = cell(&row, 2)?;
        let source = IncomeSource::from_str(source_name)
            .with_context(|| format!("Bad income source '{source_name}'"))?;
        let mut record = Income::new(
            parse_amount(cell(&row, 3)?)?,
            parse_date(cell(&row, 1)?)?,
            source,
        )
        .id(cell(&row, 0)?);
        if let Some(description) = optional(cell(&row, 4)?) {
            record = record.description(description);
        }
        income.push(record);
    }
    Ok(income)
}

fn parse_categories(csv_data: &str) -> Result<Vec<Category>> {
    let mut categories = Vec::new();
    for row in load_csv(csv_data)? {
        let mut category = Category::with_id(cell(&row, 0)?, cell(&row, 1)?);
        if let Some(color) = optional(cell(&row, 2)?) {
            category = category.color(color);
        }
        categories.push(category);
    }
    Ok(categories)
}

/// Seed category data.
const CATEGORY_DATA: &str = r##"id,name,color
groceries,Groceries,#4caf50
dining,Dining Out,#ff9800
transport,Transport,#2196f3
utilities,Utilities,#9c27b0
fun,Entertainment,#e91e63
health,Health,
"##;

/// Seed expense data.
const EXPENSE_DATA: &str = r##"id,date,category_id,amount,description
e101,2026-10-02,groceries,$87.43,Whole Foods Market
e102,2026-10-03,dining,$14.85,Chipotle Mexican Grill
e103,2026-10-05,transport,$52.30,Shell Gas Station
e104,2026-10-07,utilities,$142.67,PG&E Electric
e105,2026-10-09,groceries,$63.21,Trader Joe's
e106,2026-10-11,fun,$45.00,Concert tickets
e107,2026-10-14,dining,$42.30,Olive Garden
e201,2026-09-04,groceries,$118.56,Costco Wholesale
e202,2026-09-10,utilities,$139.12,PG&E Electric
e203,2026-09-18,transport,$61.45,Shell Station
e204,2026-09-25,health,$30.00,
e301,2026-08-06,groceries,$95.82,Safeway
e302,2026-08-20,fun,$60.00,Movie night
e401,2026-03-15,utilities,$120.00,City Water District
e501,2025-12-20,fun,$200.00,Holiday party
"##;

/// Seed income data.
const INCOME_DATA: &str = r##"id,date,source,amount,description
i101,2026-10-01,salary,"$3,200.00",October paycheck
i102,2026-10-12,freelance,$450.00,Logo design
i201,2026-09-01,salary,"$3,200.00",September paycheck
i301,2026-08-01,salary,"$3,200.00",August paycheck
i302,2026-08-15,gift,$100.00,
i401,2026-03-01,salary,"$3,000.00",March paycheck
"##;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics::{total_expenses, total_income};
    use crate::model::DateWindow;
    use crate::test::date;

    #[test]
    fn test_seed_data_parses() {
        let store = MemoryStore::seeded().unwrap();
        assert_eq!(store.expenses.len(), 15);
        assert_eq!(store.income.len(), 6);
        assert_eq!(store.categories.len(), 6);

        let health = store.categories.iter().find(|c| c.id() == "health").unwrap();
        assert_eq!(health.color_hex(), None);
        let costco = store.expenses.iter().find(|e| e.get_id() == "e201").unwrap();
        assert_eq!(costco.get_description(), Some("Costco Wholesale"));
        let pharmacy = store.expenses.iter().find(|e| e.get_id() == "e204").unwrap();
        assert_eq!(pharmacy.get_description(), None);
    }

    #[test]
    fn test_quoted_amounts_keep_thousands() {
        let store = MemoryStore::seeded().unwrap();
        let paycheck = store.income.iter().find(|i| i.get_id() == "i101").unwrap();
        assert_eq!(paycheck.amount(), Amount::from(3200));
    }

    #[tokio::test]
    async fn test_filters_by_window() {
        let store = MemoryStore::demo();
        let october = DateWindow::month_of(date(2026, 10, 16)).unwrap();

        let expenses = store
            .expenses(&ExpenseFilter::in_window(october))
            .await
            .unwrap();
        assert_eq!(expenses.len(), 7);
        assert_eq!(total_expenses(&expenses), Amount::from_str("447.76").unwrap());

        let income = store.income(&IncomeFilter::in_window(october)).await.unwrap();
        assert_eq!(total_income(&income), Amount::from(3650));
    }

    #[tokio::test]
    async fn test_filters_by_category_and_description() {
        let store = MemoryStore::demo();
        let filter = ExpenseFilter {
            category_id: Some("utilities".to_string()),
            description: Some("pg&e".to_string()),
            ..ExpenseFilter::default()
        };
        let expenses = store.expenses(&filter).await.unwrap();
        let ids: Vec<&str> = expenses.iter().map(|e| e.get_id()).collect();
        assert_eq!(ids, vec!["e104", "e202"]);
    }

    #[tokio::test]
    async fn test_empty_store() {
        let store = MemoryStore::default();
        assert!(store.categories().await.unwrap().is_empty());
        assert!(store
            .income(&IncomeFilter::default())
            .await
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_bad_seed_row_is_an_error() {
        let bad = "id,date,category_id,amount,description\nx,not-a-date,food,$1.00,\n";
        assert!(parse_expenses(bad).is_err());
        let bad = "id,date,source,amount,description\nx,2026-01-01,lottery,$1.00,\n";
        assert!(parse_income(bad).is_err());
    }
}
