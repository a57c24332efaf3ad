use super::{balance, expenses_by_category, total_expenses, total_income, CategoryExpense};
use crate::model::{Amount, Category, Expense, Income, MonthKey};
use chrono::Datelike;
use serde::Serialize;
use std::collections::BTreeMap;

/// Totals for one calendar month.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct MonthlyAnalytics {
    pub month: MonthKey,
    /// e.g. `October 2026`
    pub label: String,
    pub total_expenses: Amount,
    pub total_income: Amount,
    pub balance: Amount,
    pub expenses_by_category: Vec<CategoryExpense>,
}

/// Totals for one calendar year, with a breakdown of the months that had activity.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct YearlyAnalytics {
    pub year: i32,
    pub months: Vec<MonthlyAnalytics>,
    pub total_expenses: Amount,
    pub total_income: Amount,
    pub total_balance: Amount,
}

/// One entry per month with at least one expense or income record, oldest first.
pub fn monthly_analytics(
    expenses: &[Expense],
    income: &[Income],
    categories: &[Category],
) -> Vec<MonthlyAnalytics> {
    let mut months: BTreeMap<MonthKey, (Vec<Expense>, Vec<Income>)> = BTreeMap::new();
    for expense in expenses {
        months
            .entry(MonthKey::from(expense.date()))
            .or_default()
            .0
            .push(expense.clone());
    }
    for record in income {
        months
            .entry(MonthKey::from(record.date()))
            .or_default()
            .1
            .push(record.clone());
    }

    months
        .into_iter()
        .map(|(month, (expenses, income))| {
            let spent = total_expenses(&expenses);
            let earned = total_income(&income);
            MonthlyAnalytics {
                month,
                label: month.to_string(),
                total_expenses: spent,
                total_income: earned,
                balance: balance(earned, spent),
                expenses_by_category: expenses_by_category(&expenses, categories),
            }
        })
        .collect()
}

/// Analytics for `year`. Records dated in other years are ignored.
pub fn yearly_analytics(
    year: i32,
    expenses: &[Expense],
    income: &[Income],
    categories: &[Category],
) -> YearlyAnalytics {
    let expenses: Vec<Expense> = expenses
        .iter()
        .filter(|e| e.date().year() == year)
        .cloned()
        .collect();
    let income: Vec<Income> = income
        .iter()
        .filter(|i| i.date().year() == year)
        .cloned()
        .collect();

    let spent = total_expenses(&expenses);
    let earned = total_income(&income);
    YearlyAnalytics {
        year,
        months: monthly_analytics(&expenses, &income, categories),
        total_expenses: spent,
        total_income: earned,
        total_balance: balance(earned, spent),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::IncomeSource;
    use crate::test::{category, date, expense, income};

    #[test]
    fn test_monthly_analytics_in_chronological_order() {
        let expenses = vec![
            expense(40, date(2026, 3, 2), "food"),
            expense(10, date(2025, 12, 24), "fun"),
            expense(60, date(2026, 3, 20), "fun"),
        ];
        let income = vec![income(500, date(2026, 1, 31), IncomeSource::Salary)];
        let categories = vec![category("food", "Food"), category("fun", "Fun")];

        let months = monthly_analytics(&expenses, &income, &categories);
        let labels: Vec<&str> = months.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(labels, vec!["December 2025", "January 2026", "March 2026"]);

        // January only has income
        assert_eq!(months[1].total_expenses, Amount::ZERO);
        assert_eq!(months[1].balance, Amount::from(500));
        assert!(months[1].expenses_by_category.is_empty());

        let march = &months[2];
        assert_eq!(march.total_expenses, Amount::from(100));
        assert_eq!(march.balance, Amount::from(-100));
        assert_eq!(march.expenses_by_category[0].category_name, "Fun");
    }

    #[test]
    fn test_monthly_analytics_empty() {
        assert!(monthly_analytics(&[], &[], &[]).is_empty());
    }

    #[test]
    fn test_yearly_analytics_ignores_other_years() {
        let expenses = vec![
            expense(40, date(2026, 3, 2), "food"),
            expense(1000, date(2025, 3, 2), "food"),
        ];
        let income = vec![
            income(300, date(2026, 7, 1), IncomeSource::Bonus),
            income(9000, date(2027, 1, 1), IncomeSource::Salary),
        ];

        let report = yearly_analytics(2026, &expenses, &income, &[]);
        assert_eq!(report.year, 2026);
        assert_eq!(report.total_expenses, Amount::from(40));
        assert_eq!(report.total_income, Amount::from(300));
        assert_eq!(report.total_balance, Amount::from(260));
        assert_eq!(report.months.len(), 2);
        let month_sum: Amount = report.months.iter().map(|m| m.balance).sum();
        assert_eq!(month_sum, report.total_balance);
    }
}
