use crate::model::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where a piece of income came from.
#[derive(Debug, Default, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncomeSource {
    #[default]
    Salary,
    Freelance,
    Business,
    Investment,
    Rental,
    Gift,
    Bonus,
    Refund,
    Other,
}

serde_plain::derive_display_from_serialize!(IncomeSource);
serde_plain::derive_fromstr_from_deserialize!(IncomeSource);

/// A single income record.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Income {
    pub(crate) id: String,
    pub(crate) amount: Amount,
    pub(crate) date: NaiveDate,
    pub(crate) source: IncomeSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
}

impl Income {
    /// Creates an income record with a freshly generated id.
    pub fn new(amount: impl Into<Amount>, date: NaiveDate, source: IncomeSource) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            amount: amount.into(),
            date,
            source,
            description: None,
        }
    }

    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn get_id(&self) -> &str {
        &self.id
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn source(&self) -> IncomeSource {
        self.source
    }

    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
