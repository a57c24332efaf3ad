//! Error and result types shared across the crate.
//!
//! Internally everything is an `anyhow::Error`. At command boundaries, `IntoResult::pub_result`
//! tags an error with the broad `ErrorType` it belongs to so that the outermost message tells the
//! user which part of the program failed.

use serde::{Deserialize, Serialize};

pub type Error = anyhow::Error;
pub type Result<T> = std::result::Result<T, Error>;

/// The broad category of a failure that is surfaced to the user.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// The home directory or `config.json` is missing or invalid.
    Config,
    /// Expense, income or category data could not be read or parsed.
    Data,
    /// The arguments given to a command do not make sense together.
    Usage,
}

serde_plain::derive_display_from_serialize!(ErrorType);
serde_plain::derive_fromstr_from_deserialize!(ErrorType);

/// Converts any result into a crate `Result` whose error carries an `ErrorType` tag.
pub trait IntoResult<T> {
    fn pub_result(self, error_type: ErrorType) -> Result<T>;
}

impl<T, E> IntoResult<T> for std::result::Result<T, E>
where
    E: Into<Error>,
{
    fn pub_result(self, error_type: ErrorType) -> Result<T> {
        self.map_err(|e| e.into().context(format!("{error_type} error")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_pub_result_adds_error_type() {
        let result: std::result::Result<(), Error> = Err(anyhow!("file not found"));
        let err = result.pub_result(ErrorType::Data).unwrap_err();
        assert_eq!(err.to_string(), "data error");
        assert_eq!(format!("{err:#}"), "data error: file not found");
    }

    #[test]
    fn test_pub_result_passes_ok_through() {
        let result: std::result::Result<u8, Error> = Ok(7);
        assert_eq!(result.pub_result(ErrorType::Config).unwrap(), 7);
    }

    #[test]
    fn test_error_type_display() {
        assert_eq!(ErrorType::Usage.to_string(), "usage");
        assert_eq!("config".parse::<ErrorType>().unwrap(), ErrorType::Config);
    }
}
