use crate::api::{self, Mode};
use crate::args::DashboardArgs;
use crate::commands::Out;
use crate::dashboard::{load_dashboard, Dashboard};
use crate::error::{ErrorType, IntoResult};
use crate::model::MonthKey;
use crate::{Config, Result};
use chrono::NaiveDate;
use tracing::debug;

/// Computes the dashboard for `--as-of`, or for `today` when it is not given.
///
/// # Errors
/// - Returns a data error if any of the dashboard's queries fail.
pub async fn dashboard(
    config: &Config,
    mode: Mode,
    args: &DashboardArgs,
    today: NaiveDate,
) -> Result<Out<Dashboard>> {
    let as_of = args.as_of().unwrap_or(today);
    debug!("Computing the dashboard as of {as_of}");
    let source = api::data_source(config, mode);
    let dashboard = load_dashboard(source.as_ref(), as_of, &config.dashboard_settings()).await;

    if let Some(error) = dashboard.error.as_deref() {
        return Err(anyhow::anyhow!("Unable to load the dashboard: {error}"))
            .pub_result(ErrorType::Data);
    }

    let message = summarize(&dashboard, MonthKey::from(as_of));
    Ok(Out::new(message, dashboard))
}

fn summarize(dashboard: &Dashboard, month: MonthKey) -> String {
    let stats = &dashboard.stats;
    let mut lines = vec![
        format!(
            "{month}: income {}, expenses {}, balance {}, savings rate {}%",
            stats.total_income,
            stats.total_expenses,
            stats.balance,
            stats.savings_rate.round_dp(1)
        ),
        format!(
            "Monthly averages this year: income {}, expenses {}",
            stats.average_monthly_income, stats.average_monthly_expenses
        ),
    ];

    if !dashboard.charts.top_categories.is_empty() {
        lines.push("Top categories:".to_string());
        lines.extend(dashboard.charts.top_categories.iter().map(|category| {
            format!(
                "  {} {} ({}%)",
                category.category_name,
                category.amount,
                category.percentage.round_dp(1)
            )
        }));
    }

    lines.push("Trend:".to_string());
    lines.extend(dashboard.charts.monthly_trend.iter().map(|point| {
        let marker = if point.estimated { " (estimated)" } else { "" };
        format!(
            "  {}{marker}: income {}, expenses {}, balance {}",
            point.label, point.income, point.expenses, point.balance
        )
    }));

    if !dashboard.activity.expenses.is_empty() {
        lines.push("Recent expenses:".to_string());
        lines.extend(dashboard.activity.expenses.iter().map(|expense| {
            format!(
                "  {} {} {}",
                expense.date(),
                expense.amount(),
                expense.get_description().unwrap_or(expense.category_id())
            )
        }));
    }

    if !dashboard.activity.income.is_empty() {
        lines.push("Recent income:".to_string());
        lines.extend(dashboard.activity.income.iter().map(|income| {
            format!(
                "  {} {} {}",
                income.date(),
                income.amount(),
                income.get_description().unwrap_or("")
            )
        }));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use crate::test::{date, TestEnv};

    #[tokio::test]
    async fn test_dashboard_on_demo_data() {
        let env = TestEnv::new().await;
        let out = dashboard(
            &env.config(),
            Mode::Testing,
            &DashboardArgs::default(),
            date(2026, 10, 16),
        )
        .await
        .unwrap();
        let board = out.structure().unwrap();
        assert_eq!(board.stats.total_income, Amount::from(3650));
        assert!(out.message().starts_with("October 2026: income $3,650.00"));
        assert!(out.message().contains("2 months ago (estimated)"));
        assert!(out.message().contains("Groceries $150.64"));
    }

    #[tokio::test]
    async fn test_dashboard_as_of() {
        let env = TestEnv::new().await;
        let args = DashboardArgs::new(Some(date(2026, 9, 5)));
        let out = dashboard(&env.config(), Mode::Testing, &args, date(2026, 10, 16))
            .await
            .unwrap();
        let board = out.structure().unwrap();
        assert_eq!(board.stats.total_income, Amount::from(3200));
        assert_eq!(board.stats.expense_count, 4);
    }

    #[tokio::test]
    async fn test_dashboard_from_files() {
        let env = TestEnv::new().await;
        env.write_expenses(r#"[{"id":"a","amount":"25","date":"2026-10-02","category_id":"x"}]"#)
            .await;
        let out = dashboard(
            &env.config(),
            Mode::Files,
            &DashboardArgs::default(),
            date(2026, 10, 16),
        )
        .await
        .unwrap();
        let board = out.structure().unwrap();
        assert_eq!(board.stats.total_expenses, Amount::from(25));
        assert_eq!(board.charts.expenses_by_category[0].category_name, "Unknown");
    }

    #[tokio::test]
    async fn test_dashboard_with_broken_file_is_data_error() {
        let env = TestEnv::new().await;
        env.write_expenses("this is not json").await;
        let err = dashboard(
            &env.config(),
            Mode::Files,
            &DashboardArgs::default(),
            date(2026, 10, 16),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "data error");
        assert!(format!("{err:#}").contains("expenses.json"));
    }
}
