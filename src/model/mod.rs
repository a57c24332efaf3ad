//! Types that represent the core data model, such as `Expense`, `Income` and `Category`.
mod amount;
mod category;
mod expense;
mod filter;
mod income;
mod window;

pub use amount::{Amount, AmountError};
pub use category::Category;
pub use expense::Expense;
pub use filter::{ExpenseFilter, IncomeFilter};
pub use income::{Income, IncomeSource};
pub use window::{
    end_of_month, end_of_year, start_of_month, start_of_year, DatePreset, DateWindow, MonthKey,
};
