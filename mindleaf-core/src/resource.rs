use serde_json::Value;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

/// A kind of per-date record the backend keeps, one collection per screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Resource {
    Journal,
    Gratitude,
    Todo,
    Affirmation,
}

impl Resource {
    /// Path segment under the API root, e.g. `journal`.
    pub fn path(&self) -> &'static str {
        match self {
            Resource::Journal => "journal",
            Resource::Gratitude => "gratitude",
            Resource::Todo => "todo",
            Resource::Affirmation => "affirmation",
        }
    }

    /// Path segment listing the dates with saved records.
    pub fn index_path(&self) -> &'static str {
        match self {
            Resource::Journal | Resource::Gratitude => "history",
            Resource::Todo | Resource::Affirmation => "dates",
        }
    }

    /// Blank gratitude entries are refused instead of stored.
    pub fn requires_text(&self) -> bool {
        matches!(self, Resource::Gratitude)
    }

    /// Saving a blank to-do list or affirmation deletes the stored record.
    pub fn deletes_when_blank(&self) -> bool {
        matches!(self, Resource::Todo | Resource::Affirmation)
    }

    /// Whether a stored payload counts as blank for this resource.
    pub fn is_blank_payload(&self, payload: &Value) -> bool {
        match self {
            Resource::Todo => payload
                .get("tasks")
                .and_then(Value::as_array)
                .is_none_or(|tasks| tasks.is_empty()),
            Resource::Journal | Resource::Gratitude | Resource::Affirmation => payload
                .get("text")
                .and_then(Value::as_str)
                .is_none_or(|text| text.trim().is_empty()),
        }
    }
}
