use crate::commands::Out;
use crate::error::{ErrorType, IntoResult};
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory and:
/// - Creates an initial `config.json` file with default settings
/// - Creates empty `expenses.json`, `income.json` and `categories.json` files in the data dir
///
/// Files that already exist are kept.
///
/// # Arguments
/// - `home` - The directory that will be the root of the home directory, e.g. `$HOME/spendboard`
///
/// # Errors
/// - Returns an error if any file operations fail.
pub async fn init(home: &Path) -> Result<Out<()>> {
    let config = Config::create(home)
        .await
        .context("Unable to create the home directory and configs")
        .pub_result(ErrorType::Config)?;
    Ok(format!(
        "Successfully created the spendboard directory at {} with settings in {}. Add your records \
         to the files in {}",
        config.root().display(),
        config.config_path().display(),
        config.data_dir().display()
    )
    .into())
}
