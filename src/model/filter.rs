//! Criteria for selecting expense and income records from a data source.
//!
//! Every criterion is optional. Bounds are inclusive and blank text criteria are ignored.

use crate::model::{Amount, DateWindow, Expense, Income};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct ExpenseFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub category_id: Option<String>,
    pub min_amount: Option<Amount>,
    pub max_amount: Option<Amount>,
    /// Case-insensitive substring of the description.
    pub description: Option<String>,
}

impl ExpenseFilter {
    /// Selects every expense inside `window`.
    pub fn in_window(window: DateWindow) -> Self {
        Self {
            start: Some(window.start()),
            end: Some(window.end()),
            ..Self::default()
        }
    }

    pub fn matches(&self, expense: &Expense) -> bool {
        in_dates(self.start, self.end, expense.date())
            && in_amounts(self.min_amount, self.max_amount, expense.amount())
            && non_blank(&self.category_id).map_or(true, |id| expense.category_id() == id)
            && text_contains(&self.description, expense.get_description())
    }
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct IncomeFilter {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    /// Case-insensitive substring of the source name, e.g. `free` matches `freelance`.
    pub source: Option<String>,
    pub min_amount: Option<Amount>,
    pub max_amount: Option<Amount>,
    /// Case-insensitive substring of the description.
    pub description: Option<String>,
}

impl IncomeFilter {
    /// Selects every income record inside `window`.
    pub fn in_window(window: DateWindow) -> Self {
        Self {
            start: Some(window.start()),
            end: Some(window.end()),
            ..Self::default()
        }
    }

    pub fn matches(&self, income: &Income) -> bool {
        in_dates(self.start, self.end, income.date())
            && in_amounts(self.min_amount, self.max_amount, income.amount())
            && text_contains(&self.source, Some(&income.source().to_string()))
            && text_contains(&self.description, income.get_description())
    }
}

fn in_dates(start: Option<NaiveDate>, end: Option<NaiveDate>, date: NaiveDate) -> bool {
    start.map_or(true, |s| date >= s) && end.map_or(true, |e| date <= e)
}

fn in_amounts(min: Option<Amount>, max: Option<Amount>, amount: Amount) -> bool {
    min.map_or(true, |m| amount >= m) && max.map_or(true, |m| amount <= m)
}

fn non_blank(criterion: &Option<String>) -> Option<&str> {
    criterion.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn text_contains(criterion: &Option<String>, haystack: Option<&str>) -> bool {
    match non_blank(criterion) {
        None => true,
        Some(needle) => haystack
            .map(|h| h.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false),
    }
}
