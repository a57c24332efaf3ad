//! These structs provide the CLI interface for the spendboard CLI.

use crate::model::{Amount, DatePreset};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::convert::Infallible;
use std::fmt::{Display, Formatter};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::error;
use tracing_subscriber::filter::LevelFilter;

/// spendboard: A command-line tool for understanding where your money goes.
///
/// Expenses, income and categories are kept as JSON files in the data directory. spendboard
/// reads them and reports totals, your savings rate, a breakdown of spending by category, monthly
/// averages and recent activity.
///
/// Set SPENDBOARD_IN_TEST_MODE to any non-empty value to run against built-in demo data instead.
#[derive(Debug, Parser, Clone)]
pub struct Args {
    #[clap(flatten)]
    common: Common,

    #[command(subcommand)]
    command: Command,
}

impl Args {
    pub fn new(common: Common, command: Command) -> Self {
        Self { common, command }
    }

    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn command(&self) -> &Command {
        &self.command
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Create the home directory, the configuration file and empty data files.
    ///
    /// This is the first command you should run. Existing files are left alone, so it is safe to
    /// run it again.
    Init,
    /// Show the dashboard: this month's totals and savings rate, averages over the year, spending
    /// by category, a three month trend and the latest activity.
    Dashboard(DashboardArgs),
    /// Break spending down by category for one date window.
    Breakdown(BreakdownArgs),
    /// Show income, expenses and balance for each month of a year.
    Report(ReportArgs),
}

/// Arguments common to all subcommands.
#[derive(Debug, Parser, Clone)]
pub struct Common {
    /// The logging verbosity. One of, from least to most verbose:
    /// off, error, warn, info, debug, trace
    ///
    /// This can be overridden by RUST_LOG.
    #[arg(long, default_value_t = LevelFilter::INFO)]
    log_level: LevelFilter,

    /// The directory where spendboard data and configuration is held. Defaults to ~/spendboard
    #[arg(long, env = "SPENDBOARD_HOME", default_value_t = default_home())]
    home: DisplayPath,

    /// Write the command's structured output to stdout as JSON.
    #[arg(long)]
    json: bool,
}

impl Common {
    pub fn new(log_level: LevelFilter, home: PathBuf, json: bool) -> Self {
        Self {
            log_level,
            home: home.into(),
            json,
        }
    }

    pub fn log_level(&self) -> LevelFilter {
        self.log_level
    }

    pub fn home(&self) -> &DisplayPath {
        &self.home
    }

    pub fn json(&self) -> bool {
        self.json
    }
}

/// (Not shown): Args for the `spendboard dashboard` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct DashboardArgs {
    /// Compute the dashboard as if today were this date (YYYY-MM-DD). Defaults to today.
    #[arg(long)]
    as_of: Option<NaiveDate>,
}

impl DashboardArgs {
    pub fn new(as_of: Option<NaiveDate>) -> Self {
        Self { as_of }
    }

    pub fn as_of(&self) -> Option<NaiveDate> {
        self.as_of
    }
}

/// (Not shown): Args for the `spendboard breakdown` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct BreakdownArgs {
    /// A named date window. Defaults to this-month when neither --preset nor --from/--to is given.
    #[arg(long, value_enum, conflicts_with_all = ["from", "to"])]
    preset: Option<DatePreset>,

    /// The first day of a custom date window (YYYY-MM-DD), inclusive.
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,

    /// The last day of a custom date window (YYYY-MM-DD), inclusive.
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,

    /// Only include expenses in this category id.
    #[arg(long)]
    category: Option<String>,

    /// Only include expenses of at least this amount.
    #[arg(long)]
    min: Option<Amount>,

    /// Only include expenses of at most this amount.
    #[arg(long)]
    max: Option<Amount>,

    /// Only include expenses whose description contains this text, ignoring case.
    #[arg(long)]
    description: Option<String>,

    /// How many top categories to show. Defaults to the top_categories_limit in config.json.
    #[arg(long)]
    limit: Option<usize>,
}

impl BreakdownArgs {
    pub fn preset(&self) -> Option<DatePreset> {
        self.preset
    }

    pub fn set_preset(mut self, preset: DatePreset) -> Self {
        self.preset = Some(preset);
        self
    }

    pub fn from(&self) -> Option<NaiveDate> {
        self.from
    }

    pub fn to(&self) -> Option<NaiveDate> {
        self.to
    }

    pub fn set_range(mut self, from: NaiveDate, to: NaiveDate) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn set_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn min(&self) -> Option<Amount> {
        self.min
    }

    pub fn max(&self) -> Option<Amount> {
        self.max
    }

    pub fn set_amounts(mut self, min: Option<Amount>, max: Option<Amount>) -> Self {
        self.min = min;
        self.max = max;
        self
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn set_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn limit(&self) -> Option<usize> {
        self.limit
    }

    pub fn set_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// (Not shown): Args for the `spendboard report` command.
#[derive(Debug, Default, Parser, Clone)]
pub struct ReportArgs {
    /// The year to report on. Defaults to the current year.
    #[arg(long)]
    year: Option<i32>,
}

impl ReportArgs {
    pub fn new(year: Option<i32>) -> Self {
        Self { year }
    }

    pub fn year(&self) -> Option<i32> {
        self.year
    }
}

fn default_home() -> DisplayPath {
    DisplayPath(match dirs::home_dir() {
        Some(home) => home.join("spendboard"),
        None => {
            error!(
                "There was an error when trying to get your home directory. You can get around \
                this by providing --home or SPENDBOARD_HOME instead of relying on the default \
                spendboard home directory. If you continue using the program right now, you may \
                have problems!",
            );
            PathBuf::from("spendboard")
        }
    })
}

#[derive(Debug, Default, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct DisplayPath(PathBuf);

impl From<PathBuf> for DisplayPath {
    fn from(value: PathBuf) -> Self {
        DisplayPath(value)
    }
}

impl Deref for DisplayPath {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl AsRef<Path> for DisplayPath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl Display for DisplayPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_string_lossy())
    }
}

impl FromStr for DisplayPath {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(PathBuf::from(s)))
    }
}

impl DisplayPath {
    pub fn path(&self) -> &Path {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::date;

    #[test]
    fn test_parse_breakdown() {
        let args = Args::try_parse_from([
            "spendboard",
            "--home",
            "/tmp/sb",
            "breakdown",
            "--from",
            "2026-01-01",
            "--to",
            "2026-01-31",
            "--min",
            "$1,000",
            "--category",
            "food",
        ])
        .unwrap();
        assert_eq!(args.common().home().path(), Path::new("/tmp/sb"));
        let Command::Breakdown(breakdown) = args.command() else {
            panic!("expected breakdown, got {:?}", args.command());
        };
        assert_eq!(breakdown.from(), Some(date(2026, 1, 1)));
        assert_eq!(breakdown.to(), Some(date(2026, 1, 31)));
        assert_eq!(breakdown.min(), Some(Amount::from(1000)));
        assert_eq!(breakdown.category(), Some("food"));
        assert_eq!(breakdown.preset(), None);
    }

    #[test]
    fn test_preset_conflicts_with_range() {
        let result = Args::try_parse_from([
            "spendboard",
            "breakdown",
            "--preset",
            "last-month",
            "--from",
            "2026-01-01",
            "--to",
            "2026-01-31",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_from_requires_to() {
        let result = Args::try_parse_from(["spendboard", "breakdown", "--from", "2026-01-01"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_common_flags() {
        let args =
            Args::try_parse_from(["spendboard", "--log-level", "debug", "--json", "report"])
                .unwrap();
        assert_eq!(args.common().log_level(), LevelFilter::DEBUG);
        assert!(args.common().json());
        assert!(matches!(args.command(), Command::Report(r) if r.year().is_none()));
    }

    #[test]
    fn test_bad_date_is_rejected() {
        let result = Args::try_parse_from(["spendboard", "dashboard", "--as-of", "yesterday"]);
        assert!(result.is_err());
    }
}
