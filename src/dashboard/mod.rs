//! The dashboard: current month totals, yearly averages, a category breakdown, a short trend and
//! the latest activity, all computed in one pass from the records of three date windows.

mod inputs;
mod windows;

pub use inputs::{DashboardInputs, Fetch};
pub use windows::DashboardWindows;

use crate::analytics::{CategoryExpense, DEFAULT_TOP_CATEGORIES};
use crate::api::DataSource;
use crate::model::{Amount, Expense, ExpenseFilter, Income, IncomeFilter};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

/// How many recent expenses and income records the dashboard lists by default.
pub const DEFAULT_RECENT_LIMIT: usize = 5;

/// Knobs for the lists on the dashboard.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct DashboardSettings {
    pub recent_limit: usize,
    pub top_categories_limit: usize,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            recent_limit: DEFAULT_RECENT_LIMIT,
            top_categories_limit: DEFAULT_TOP_CATEGORIES,
        }
    }
}

/// Headline numbers. Totals and counts are for the current month; averages are over the months of
/// the current year that have records.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct DashboardStats {
    pub total_income: Amount,
    pub total_expenses: Amount,
    pub balance: Amount,
    pub savings_rate: Decimal,
    pub average_monthly_expenses: Amount,
    pub average_monthly_income: Amount,
    /// All categories, not only those used this month.
    pub categories_count: usize,
    pub expense_count: usize,
    pub income_count: usize,
}

/// One period on the trend chart.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct TrendPoint {
    pub label: String,
    pub income: Amount,
    pub expenses: Amount,
    pub balance: Amount,
    /// True when the values are an approximation rather than totals of real records.
    pub estimated: bool,
}

impl TrendPoint {
    fn new(label: &str, income: Amount, expenses: Amount, estimated: bool) -> Self {
        Self {
            label: label.to_string(),
            income,
            expenses,
            balance: income - expenses,
            estimated,
        }
    }

    pub(crate) fn actual(label: &str, income: Amount, expenses: Amount) -> Self {
        Self::new(label, income, expenses, false)
    }

    pub(crate) fn estimated(label: &str, income: Amount, expenses: Amount) -> Self {
        Self::new(label, income, expenses, true)
    }
}

#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct DashboardChartData {
    pub expenses_by_category: Vec<CategoryExpense>,
    pub top_categories: Vec<CategoryExpense>,
    /// Oldest first.
    pub monthly_trend: Vec<TrendPoint>,
}

/// The latest records of the current month, newest first.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct RecentActivity {
    pub expenses: Vec<Expense>,
    pub income: Vec<Income>,
}

/// Everything the dashboard shows.
///
/// Either every section is filled in, or none is: while loading, and after an error, all numbers
/// are zero and all lists are empty.
#[derive(Debug, Clone, Default, Eq, PartialEq, Serialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub charts: DashboardChartData,
    pub activity: RecentActivity,
    pub is_loading: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Dashboard {
    /// The placeholder shown while queries are outstanding.
    pub fn loading() -> Self {
        Self {
            is_loading: true,
            ..Self::default()
        }
    }

    /// The placeholder shown after a query failed.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }

    /// True when the dashboard holds real numbers.
    pub fn is_ready(&self) -> bool {
        !self.is_loading && self.error.is_none()
    }
}

/// Queries `source` for the three windows around `today`, all at once, and composes the result.
///
/// This never returns an error; failures are reported through `Dashboard::error`.
pub async fn load_dashboard(
    source: &dyn DataSource,
    today: NaiveDate,
    settings: &DashboardSettings,
) -> Dashboard {
    let windows = match DashboardWindows::new(today) {
        Ok(windows) => windows,
        Err(e) => {
            error!("Unable to compute the dashboard windows for {today}: {e:#}");
            return Dashboard::failed(format!("{e:#}"));
        }
    };
    debug!(
        "Loading dashboard: month {}, previous month {}, year {}",
        windows.current_month, windows.previous_month, windows.current_year
    );

    let month_expenses = ExpenseFilter::in_window(windows.current_month);
    let month_income = IncomeFilter::in_window(windows.current_month);
    let previous_expenses = ExpenseFilter::in_window(windows.previous_month);
    let previous_income = IncomeFilter::in_window(windows.previous_month);
    let year_expenses = ExpenseFilter::in_window(windows.current_year);
    let year_income = IncomeFilter::in_window(windows.current_year);

    let (
        current_month_expenses,
        current_month_income,
        previous_month_expenses,
        previous_month_income,
        current_year_expenses,
        current_year_income,
        categories,
    ) = tokio::join!(
        source.expenses(&month_expenses),
        source.income(&month_income),
        source.expenses(&previous_expenses),
        source.income(&previous_income),
        source.expenses(&year_expenses),
        source.income(&year_income),
        source.categories(),
    );

    DashboardInputs {
        current_month_expenses: current_month_expenses.into(),
        current_month_income: current_month_income.into(),
        previous_month_expenses: previous_month_expenses.into(),
        previous_month_income: previous_month_income.into(),
        current_year_expenses: current_year_expenses.into(),
        current_year_income: current_year_income.into(),
        categories: categories.into(),
    }
    .compose(settings)
}
