use crate::model::Amount;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single spending record, tagged with the category it belongs to.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Expense {
    pub(crate) id: String,
    pub(crate) amount: Amount,
    /// The local calendar day the money was spent.
    pub(crate) date: NaiveDate,
    pub(crate) category_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) description: Option<String>,
}

impl Expense {
    /// Creates an expense with a freshly generated id.
    pub fn new(amount: impl Into<Amount>, date: NaiveDate, category_id: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            amount: amount.into(),
            date,
            category_id: category_id.into(),
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

    pub fn category_id(&self) -> &str {
        &self.category_id
    }

    pub fn get_description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_expense() {
        let json = r#"{
            "id": "e1",
            "amount": 12.5,
            "date": "2026-10-03",
            "category_id": "food",
            "description": "Lunch"
        }"#;
        let expense: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(expense.get_id(), "e1");
        assert_eq!(expense.amount().to_string(), "$12.50");
        assert_eq!(expense.date(), NaiveDate::from_ymd_opt(2026, 10, 3).unwrap());
        assert_eq!(expense.category_id(), "food");
        assert_eq!(expense.get_description(), Some("Lunch"));
    }

    #[test]
    fn test_builder() {
        let date = NaiveDate::from_ymd_opt(2026, 1, 31).unwrap();
        let expense = Expense::new(40, date, "fun").id("x").description("Cinema");
        assert_eq!(expense.get_id(), "x");
        assert_eq!(expense.amount(), Amount::from(40));
        assert_eq!(expense.get_description(), Some("Cinema"));
    }
}
