//! Closed date intervals and the calendar boundaries used to build them.

use crate::Result;
use anyhow::Context;
use chrono::{Datelike, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A closed interval of calendar days, `[start, end]`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct DateWindow {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateWindow {
    /// Creates a window from `start` to `end`, both inclusive.
    ///
    /// # Errors
    /// - Returns an error if `end` is before `start`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        anyhow::ensure!(
            start <= end,
            "The window start {start} is after the window end {end}"
        );
        Ok(Self { start, end })
    }

    /// The calendar month containing `date`.
    pub fn month_of(date: NaiveDate) -> Result<Self> {
        Ok(Self {
            start: start_of_month(date)?,
            end: end_of_month(date)?,
        })
    }

    /// The calendar month before the one containing `date`.
    pub fn previous_month_of(date: NaiveDate) -> Result<Self> {
        let previous = date
            .checked_sub_months(Months::new(1))
            .with_context(|| format!("There is no month before {date}"))?;
        Self::month_of(previous)
    }

    /// The calendar year containing `date`.
    pub fn year_of(date: NaiveDate) -> Result<Self> {
        Ok(Self {
            start: start_of_year(date)?,
            end: end_of_year(date)?,
        })
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

impl Display for DateWindow {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}

pub fn start_of_month(date: NaiveDate) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1)
        .with_context(|| format!("Unable to find the first day of the month of {date}"))
}

pub fn end_of_month(date: NaiveDate) -> Result<NaiveDate> {
    start_of_month(date)?
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .with_context(|| format!("Unable to find the last day of the month of {date}"))
}

pub fn start_of_year(date: NaiveDate) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), 1, 1)
        .with_context(|| format!("Unable to find the first day of the year of {date}"))
}

pub fn end_of_year(date: NaiveDate) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(date.year(), 12, 31)
        .with_context(|| format!("Unable to find the last day of the year of {date}"))
}

/// Named windows that are relative to today.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    serde::Serialize,
    serde::Deserialize,
    clap::ValueEnum,
)]
#[serde(rename_all = "kebab-case")]
pub enum DatePreset {
    Today,
    #[default]
    ThisMonth,
    LastMonth,
    ThisYear,
    LastYear,
}

serde_plain::derive_display_from_serialize!(DatePreset);
serde_plain::derive_fromstr_from_deserialize!(DatePreset);

impl DatePreset {
    /// A human readable name for the preset.
    pub fn label(&self) -> &'static str {
        match self {
            DatePreset::Today => "Today",
            DatePreset::ThisMonth => "This Month",
            DatePreset::LastMonth => "Last Month",
            DatePreset::ThisYear => "This Year",
            DatePreset::LastYear => "Last Year",
        }
    }

    /// Resolves the preset against `today`.
    pub fn window(&self, today: NaiveDate) -> Result<DateWindow> {
        match self {
            DatePreset::Today => DateWindow::new(today, today),
            DatePreset::ThisMonth => DateWindow::month_of(today),
            DatePreset::LastMonth => DateWindow::previous_month_of(today),
            DatePreset::ThisYear => DateWindow::year_of(today),
            DatePreset::LastYear => {
                let last_year = today
                    .checked_sub_months(Months::new(12))
                    .with_context(|| format!("There is no year before {today}"))?;
                DateWindow::year_of(last_year)
            }
        }
    }
}

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Identifies a calendar month. Orders chronologically.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    year: i32,
    month: u32,
}

impl MonthKey {
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The month number, 1 through 12.
    pub fn month(&self) -> u32 {
        self.month
    }
}

impl From<NaiveDate> for MonthKey {
    fn from(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl Display for MonthKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = (self.month as usize)
            .checked_sub(1)
            .and_then(|ix| MONTH_NAMES.get(ix))
            .copied()
            .unwrap_or("Unknown");
        write!(f, "{name} {}", self.year)
    }
}
