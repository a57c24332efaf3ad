use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A user-defined label that expenses are tagged with.
///
/// Names are unique by convention only; nothing in this crate enforces it.
#[derive(Debug, Clone, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Category {
    pub(crate) id: String,
    pub(crate) name: String,
    /// Display color, e.g. `#4caf50`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub(crate) color: Option<String>,
    pub(crate) created_at: DateTime<Utc>,
}

impl Category {
    /// Creates a category with a freshly generated id, created now.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name)
    }

    /// Creates a category with a known id, created now.
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
            created_at: Utc::now(),
        }
    }

    pub fn color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn color_hex(&self) -> Option<&str> {
        self.color.as_deref()
    }

    pub fn creation_time(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_generates_distinct_ids() {
        let a = Category::new("Food");
        let b = Category::new("Food");
        assert_ne!(a.id(), b.id());
        assert_eq!(a.name(), b.name());
    }

    #[test]
    fn test_deserialize_without_color() {
        let json = r#"{"id":"food","name":"Food","created_at":"2026-01-02T03:04:05Z"}"#;
        let category: Category = serde_json::from_str(json).unwrap();
        assert_eq!(category.id(), "food");
        assert_eq!(category.color_hex(), None);
    }

    #[test]
    fn test_serialize_omits_missing_color() {
        let json = serde_json::to_string(&Category::with_id("fun", "Fun")).unwrap();
        assert!(!json.contains("color"));
        let json = serde_json::to_string(&Category::with_id("fun", "Fun").color("#ff0000")).unwrap();
        assert!(json.contains("\"color\":\"#ff0000\""));
    }
}
