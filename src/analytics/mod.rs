//! Aggregations that turn collections of expenses and income into dashboard metrics.
//!
//! Every function here is pure: inputs are borrowed read-only, results are newly allocated, and
//! none of them fail. Division by zero resolves to zero, and a percentage too large for a
//! `Decimal` saturates at `Decimal::MAX` or `Decimal::MIN`.

mod period;

pub use period::{monthly_analytics, yearly_analytics, MonthlyAnalytics, YearlyAnalytics};

use crate::model::{Amount, Category, Expense, Income, MonthKey};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

/// The name given to expenses whose category cannot be found.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// How many categories `top_categories` returns when the caller has no preference.
pub const DEFAULT_TOP_CATEGORIES: usize = 5;

/// All the expenses of one category within the collection that was analyzed.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub struct CategoryExpense {
    pub category_id: String,
    /// Resolved at computation time, `Unknown` if the category no longer exists.
    pub category_name: String,
    pub amount: Amount,
    /// Share of the analyzed total, 0 to 100.
    pub percentage: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

pub fn total_expenses(expenses: &[Expense]) -> Amount {
    expenses.iter().map(Expense::amount).sum()
}

pub fn total_income(income: &[Income]) -> Amount {
    income.iter().map(Income::amount).sum()
}

/// Income minus expenses. Negative when spending exceeds income.
pub fn balance(total_income: Amount, total_expenses: Amount) -> Amount {
    total_income - total_expenses
}

/// The percentage of income that was not spent. Zero when there is no income.
pub fn savings_rate(total_income: Amount, total_expenses: Amount) -> Decimal {
    percentage(balance(total_income, total_expenses), total_income)
}

/// `part` as a percentage of `total`, or zero when `total` is zero.
pub fn percentage(part: Amount, total: Amount) -> Decimal {
    if total.is_zero() {
        return Decimal::ZERO;
    }
    let ratio = part
        .value()
        .checked_div(total.value())
        .and_then(|r| r.checked_mul(Decimal::ONE_HUNDRED));
    match ratio {
        Some(ratio) => ratio,
        None => {
            warn!("{part} as a percentage of {total} is out of range");
            if part.is_negative() == total.is_negative() {
                Decimal::MAX
            } else {
                Decimal::MIN
            }
        }
    }
}

/// Groups `expenses` by category and sums each group.
///
/// Names and colors are looked up in `categories`; when an id occurs more than once the first
/// category wins. Percentages are relative to the total of `expenses`. The result is sorted by
/// amount, largest first, and equal amounts keep the order in which their category first appears
/// in `expenses`.
pub fn expenses_by_category(expenses: &[Expense], categories: &[Category]) -> Vec<CategoryExpense> {
    let total = total_expenses(expenses);

    let mut lookup: HashMap<&str, &Category> = HashMap::with_capacity(categories.len());
    for category in categories {
        lookup.entry(category.id()).or_insert(category);
    }

    // Groups in first-seen order
    let mut positions: HashMap<&str, usize> = HashMap::new();
    let mut groups: Vec<(&str, Amount)> = Vec::new();
    for expense in expenses {
        let id = expense.category_id();
        match positions.get(id) {
            Some(&ix) => groups[ix].1 += expense.amount(),
            None => {
                positions.insert(id, groups.len());
                groups.push((id, expense.amount()));
            }
        }
    }

    let mut breakdown: Vec<CategoryExpense> = groups
        .into_iter()
        .map(|(id, amount)| {
            let category = lookup.get(id);
            CategoryExpense {
                category_id: id.to_string(),
                category_name: category
                    .map(|c| c.name().to_string())
                    .unwrap_or_else(|| UNKNOWN_CATEGORY.to_string()),
                amount,
                percentage: percentage(amount, total),
                color: category.and_then(|c| c.color_hex()).map(str::to_string),
            }
        })
        .collect();

    // sort_by is stable, which preserves first-seen order for ties
    breakdown.sort_by(|a, b| b.amount.cmp(&a.amount));
    breakdown
}

/// The `limit` largest entries of `category_expenses`, largest first.
///
/// The input is not assumed to be sorted and is left untouched.
pub fn top_categories(category_expenses: &[CategoryExpense], limit: usize) -> Vec<CategoryExpense> {
    let mut sorted = category_expenses.to_vec();
    sorted.sort_by(|a, b| b.amount.cmp(&a.amount));
    sorted.truncate(limit);
    sorted
}

/// The average of the monthly expense totals, over the months that have at least one expense.
pub fn average_monthly_expenses(expenses: &[Expense]) -> Amount {
    average_per_month(expenses.iter().map(|e| (e.date(), e.amount())))
}

/// The average of the monthly income totals, over the months that have at least one record.
pub fn average_monthly_income(income: &[Income]) -> Amount {
    average_per_month(income.iter().map(|i| (i.date(), i.amount())))
}

/// Sums amounts per calendar month of their own date.
pub(crate) fn totals_by_month(
    records: impl IntoIterator<Item = (NaiveDate, Amount)>,
) -> BTreeMap<MonthKey, Amount> {
    let mut totals = BTreeMap::new();
    for (date, amount) in records {
        *totals.entry(MonthKey::from(date)).or_insert(Amount::ZERO) += amount;
    }
    totals
}

fn average_per_month(records: impl IntoIterator<Item = (NaiveDate, Amount)>) -> Amount {
    let totals = totals_by_month(records);
    if totals.is_empty() {
        return Amount::ZERO;
    }
    let sum: Amount = totals.values().sum();
    Amount::new(sum.value() / Decimal::from(totals.len()))
}
