pub mod analytics;
pub mod api;
pub mod args;
pub mod commands;
mod config;
pub mod dashboard;
mod error;
pub mod model;
mod utils;


pub use api::Mode;
pub use config::Config;
pub use error::{Error, ErrorType, IntoResult, Result};
pub use model::Amount;
