use crate::model::DateWindow;
use crate::Result;
use anyhow::Context;
use chrono::NaiveDate;
use serde::Serialize;

/// The three date windows the dashboard queries, all relative to one "today".
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize)]
pub struct DashboardWindows {
    pub current_month: DateWindow,
    pub previous_month: DateWindow,
    pub current_year: DateWindow,
}

impl DashboardWindows {
    pub fn new(today: NaiveDate) -> Result<Self> {
        Ok(Self {
            current_month: DateWindow::month_of(today)
                .context("Unable to compute the current month")?,
            previous_month: DateWindow::previous_month_of(today)
                .context("Unable to compute the previous month")?,
            current_year: DateWindow::year_of(today)
                .context("Unable to compute the current year")?,
        })
    }
}
