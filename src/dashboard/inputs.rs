use crate::analytics::{
    average_monthly_expenses, average_monthly_income, balance, expenses_by_category,
    savings_rate, top_categories, total_expenses, total_income,
};
use crate::dashboard::{
    Dashboard, DashboardChartData, DashboardSettings, DashboardStats, RecentActivity, TrendPoint,
};
use crate::model::{Amount, Category, Expense, Income};
use crate::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// The state of one query the dashboard depends on.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub enum Fetch<T> {
    /// The query has not completed yet.
    #[default]
    Pending,
    Ready(T),
    /// The query failed with this message.
    Failed(String),
}

impl<T> Fetch<T> {
    pub fn is_pending(&self) -> bool {
        matches!(self, Fetch::Pending)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Fetch::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn ready(&self) -> Option<&T> {
        match self {
            Fetch::Ready(value) => Some(value),
            _ => None,
        }
    }
}

impl<T> From<Result<T>> for Fetch<T> {
    fn from(result: Result<T>) -> Self {
        match result {
            Ok(value) => Fetch::Ready(value),
            Err(e) => Fetch::Failed(format!("{e:#}")),
        }
    }
}

/// Everything the dashboard is computed from: expenses and income for each of the three windows,
/// plus the full category list. Every slot starts out `Pending`.
#[derive(Debug, Clone, Default)]
pub struct DashboardInputs {
    pub current_month_expenses: Fetch<Vec<Expense>>,
    pub current_month_income: Fetch<Vec<Income>>,
    pub previous_month_expenses: Fetch<Vec<Expense>>,
    pub previous_month_income: Fetch<Vec<Income>>,
    pub current_year_expenses: Fetch<Vec<Expense>>,
    pub current_year_income: Fetch<Vec<Income>>,
    pub categories: Fetch<Vec<Category>>,
}

impl DashboardInputs {
    /// The first failure, in field order.
    fn first_error(&self) -> Option<&str> {
        [
            self.current_month_expenses.error(),
            self.current_month_income.error(),
            self.previous_month_expenses.error(),
            self.previous_month_income.error(),
            self.current_year_expenses.error(),
            self.current_year_income.error(),
            self.categories.error(),
        ]
        .into_iter()
        .flatten()
        .next()
    }

    fn pending_count(&self) -> usize {
        [
            self.current_month_expenses.is_pending(),
            self.current_month_income.is_pending(),
            self.previous_month_expenses.is_pending(),
            self.previous_month_income.is_pending(),
            self.current_year_expenses.is_pending(),
            self.current_year_income.is_pending(),
            self.categories.is_pending(),
        ]
        .into_iter()
        .filter(|pending| *pending)
        .count()
    }

    /// Builds the dashboard.
    ///
    /// The result is all-or-nothing. If any slot has failed, the placeholder is returned with the
    /// first error. Otherwise, if any slot is still pending, the placeholder is returned with
    /// `is_loading` set. Only when every slot is ready are the metrics computed.
    pub fn compose(&self, settings: &DashboardSettings) -> Dashboard {
        if let Some(error) = self.first_error() {
            warn!("A dashboard query failed: {error}");
            return Dashboard::failed(error);
        }

        let (
            Fetch::Ready(month_expenses),
            Fetch::Ready(month_income),
            Fetch::Ready(previous_expenses),
            Fetch::Ready(previous_income),
            Fetch::Ready(year_expenses),
            Fetch::Ready(year_income),
            Fetch::Ready(categories),
        ) = (
            &self.current_month_expenses,
            &self.current_month_income,
            &self.previous_month_expenses,
            &self.previous_month_income,
            &self.current_year_expenses,
            &self.current_year_income,
            &self.categories,
        )
        else {
            debug!("{} dashboard queries are still pending", self.pending_count());
            return Dashboard::loading();
        };

        let income = total_income(month_income);
        let expenses = total_expenses(month_expenses);
        let stats = DashboardStats {
            total_income: income,
            total_expenses: expenses,
            balance: balance(income, expenses),
            savings_rate: savings_rate(income, expenses),
            average_monthly_expenses: average_monthly_expenses(year_expenses),
            average_monthly_income: average_monthly_income(year_income),
            categories_count: categories.len(),
            expense_count: month_expenses.len(),
            income_count: month_income.len(),
        };

        let breakdown = expenses_by_category(month_expenses, categories);
        let top = top_categories(&breakdown, settings.top_categories_limit);
        let trend = trend_series(
            (total_income(previous_income), total_expenses(previous_expenses)),
            (income, expenses),
        );

        debug!(
            "Composed dashboard from {} expenses and {} income records",
            month_expenses.len(),
            month_income.len()
        );

        Dashboard {
            stats,
            charts: DashboardChartData {
                expenses_by_category: breakdown,
                top_categories: top,
                monthly_trend: trend,
            },
            activity: RecentActivity {
                expenses: most_recent(month_expenses, settings.recent_limit, Expense::date),
                income: most_recent(month_income, settings.recent_limit, Income::date),
            },
            is_loading: false,
            error: None,
        }
    }
}

/// Income is scaled by this to estimate the month before last.
fn estimated_income_factor() -> Decimal {
    Decimal::new(9, 1)
}

/// Expenses are scaled by this to estimate the month before last.
fn estimated_expenses_factor() -> Decimal {
    Decimal::new(95, 2)
}

/// Three points, oldest first. The month before last is not queried; it is estimated from last
/// month's totals and marked as `estimated`.
fn trend_series(last_month: (Amount, Amount), this_month: (Amount, Amount)) -> Vec<TrendPoint> {
    let (last_income, last_expenses) = last_month;
    let (income, expenses) = this_month;
    vec![
        TrendPoint::estimated(
            "2 months ago",
            last_income.scale(estimated_income_factor()),
            last_expenses.scale(estimated_expenses_factor()),
        ),
        TrendPoint::actual("Last month", last_income, last_expenses),
        TrendPoint::actual("This month", income, expenses),
    ]
}

/// The `limit` latest records, newest first. Records on the same day keep their input order.
fn most_recent<T: Clone>(records: &[T], limit: usize, date: impl Fn(&T) -> NaiveDate) -> Vec<T> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| date(b).cmp(&date(a)));
    sorted.truncate(limit);
    sorted
}
