use crate::analytics::{yearly_analytics, YearlyAnalytics};
use crate::api::{self, Mode};
use crate::args::ReportArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::{DateWindow, ExpenseFilter, IncomeFilter};
use crate::{Config, Result};
use anyhow::Context;
use chrono::{Datelike, NaiveDate};

/// Reports income, expenses and balance for each month of `--year`, or of the year of `today`.
///
/// # Errors
/// - Returns a usage error if the year is outside the supported calendar.
/// - Returns a data error if the records cannot be read.
pub async fn report(
    config: &Config,
    mode: Mode,
    args: &ReportArgs,
    today: NaiveDate,
) -> Result<Out<YearlyAnalytics>> {
    let year = args.year().unwrap_or_else(|| today.year());
    let window = NaiveDate::from_ymd_opt(year, 1, 1)
        .with_context(|| format!("{year} is not a supported year"))
        .and_then(DateWindow::year_of)
        .pub_result(ErrorType::Usage)?;

    let source = api::data_source(config, mode);
    let expense_filter = ExpenseFilter::in_window(window);
    let income_filter = IncomeFilter::in_window(window);
    let (expenses, income, categories) = tokio::try_join!(
        source.expenses(&expense_filter),
        source.income(&income_filter),
        source.categories(),
    )
    .pub_result(ErrorType::Data)?;

    let analytics = yearly_analytics(year, &expenses, &income, &categories);

    let mut lines = vec![format!(
        "{year}: income {}, expenses {}, balance {}",
        analytics.total_income, analytics.total_expenses, analytics.total_balance
    )];
    lines.extend(analytics.months.iter().map(|month| {
        format!(
            "  {}: income {}, expenses {}, balance {}",
            month.label, month.total_income, month.total_expenses, month.balance
        )
    }));
    let message = lines.join("\n");
    Ok(Out::new(message, analytics))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Amount;
    use crate::test::{date, TestEnv};

    #[tokio::test]
    async fn test_report_current_year() {
        let env = TestEnv::new().await;
        let out = report(
            &env.config(),
            Mode::Testing,
            &ReportArgs::default(),
            date(2026, 10, 16),
        )
        .await
        .unwrap();
        let analytics = out.structure().unwrap();
        assert_eq!(analytics.year, 2026);
        assert_eq!(analytics.total_income, Amount::from(13150));
        let labels: Vec<&str> = analytics.months.iter().map(|m| m.label.as_str()).collect();
        assert_eq!(
            labels,
            vec!["March 2026", "August 2026", "September 2026", "October 2026"]
        );
        assert!(out.message().contains("\n  March 2026: income $3,000.00"));
    }

    #[tokio::test]
    async fn test_report_other_year() {
        let env = TestEnv::new().await;
        let out = report(
            &env.config(),
            Mode::Testing,
            &ReportArgs::new(Some(2025)),
            date(2026, 10, 16),
        )
        .await
        .unwrap();
        let analytics = out.structure().unwrap();
        assert_eq!(analytics.total_expenses, Amount::from(200));
        assert_eq!(analytics.total_balance, Amount::from(-200));
        assert_eq!(analytics.months.len(), 1);
    }

    #[tokio::test]
    async fn test_report_unsupported_year() {
        let env = TestEnv::new().await;
        let err = report(
            &env.config(),
            Mode::Testing,
            &ReportArgs::new(Some(i32::MAX)),
            date(2026, 10, 16),
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), "usage error");
    }
}
