use crate::analytics::{expenses_by_category, top_categories, total_expenses, CategoryExpense};
use crate::api::{self, Mode};
use crate::args::BreakdownArgs;
use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::model::{Amount, DatePreset, DateWindow, ExpenseFilter};
use crate::{Config, Result};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

/// Spending by category for one date window.
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Breakdown {
    pub window: DateWindow,
    pub total_expenses: Amount,
    pub expense_count: usize,
    pub expenses_by_category: Vec<CategoryExpense>,
    pub top_categories: Vec<CategoryExpense>,
}

/// Breaks down the expenses selected by `args` by category.
///
/// The window is `--from`/`--to` when given, otherwise `--preset` (default `this-month`) resolved
/// against `today`. Percentages are relative to the selected expenses only.
///
/// # Errors
/// - Returns a usage error if the window or the amount range is inverted.
/// - Returns a data error if the records cannot be read.
pub async fn breakdown(
    config: &Config,
    mode: Mode,
    args: &BreakdownArgs,
    today: NaiveDate,
) -> Result<Out<Breakdown>> {
    let (preset, window) = validate(args, today).pub_result(ErrorType::Usage)?;

    let filter = ExpenseFilter {
        category_id: args.category().map(str::to_string),
        min_amount: args.min(),
        max_amount: args.max(),
        description: args.description().map(str::to_string),
        ..ExpenseFilter::in_window(window)
    };
    debug!("Breaking down expenses with {filter:?}");

    let source = api::data_source(config, mode);
    let (expenses, categories) = tokio::try_join!(source.expenses(&filter), source.categories())
        .pub_result(ErrorType::Data)?;

    let by_category = expenses_by_category(&expenses, &categories);
    let limit = args.limit().unwrap_or(config.top_categories_limit());
    let breakdown = Breakdown {
        window,
        total_expenses: total_expenses(&expenses),
        expense_count: expenses.len(),
        top_categories: top_categories(&by_category, limit),
        expenses_by_category: by_category,
    };

    let summary = format!(
        "{} expenses totalling {} from {}",
        breakdown.expense_count, breakdown.total_expenses, breakdown.window
    );
    let mut lines = vec![match preset {
        Some(preset) => format!("{}: {summary}", preset.label()),
        None => summary,
    }];
    lines.extend(breakdown.top_categories.iter().map(|category| {
        format!(
            "  {} {} ({}%)",
            category.category_name,
            category.amount,
            category.percentage.round_dp(1)
        )
    }));
    let message = lines.join("\n");
    Ok(Out::new(message, breakdown))
}

/// Checks that the arguments make sense together and resolves the window, along with the preset
/// it came from when no explicit range was given.
fn validate(args: &BreakdownArgs, today: NaiveDate) -> Result<(Option<DatePreset>, DateWindow)> {
    if let (Some(min), Some(max)) = (args.min(), args.max()) {
        anyhow::ensure!(min <= max, "--min {min} is greater than --max {max}");
    }
    match (args.from(), args.to()) {
        (Some(from), Some(to)) => Ok((None, DateWindow::new(from, to)?)),
        (None, None) => {
            let preset = args.preset().unwrap_or_default();
            Ok((Some(preset), preset.window(today)?))
        }
        _ => anyhow::bail!("--from and --to must be given together"),
    }
}
