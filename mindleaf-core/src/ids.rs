use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identifier of an item living inside an entry (an overlay or a to-do task).
///
/// Fresh ids are random 128-bit tokens. Ids read back from storage keep their
/// textual form, which lets older entries with numeric ids load unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemId(String);

impl ItemId {
    pub fn generate() -> Self {
        Self(Uuid::new_v4().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ItemId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ItemId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// An id as it appears on the wire: a string, or a number for entries saved
/// before ids were tokens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawId {
    Text(String),
    Number(serde_json::Number),
}

impl Default for RawId {
    fn default() -> Self {
        RawId::Text(String::new())
    }
}

impl From<RawId> for ItemId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Text(s) => ItemId(s),
            RawId::Number(n) => ItemId(n.to_string()),
        }
    }
}

impl From<&ItemId> for RawId {
    fn from(id: &ItemId) -> Self {
        RawId::Text(id.0.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_ids_do_not_collide() {
        let ids: HashSet<ItemId> = (0..1_000).map(|_| ItemId::generate()).collect();
        assert_eq!(ids.len(), 1_000);
    }

    #[test]
    fn numeric_ids_keep_their_text() {
        let raw: RawId = serde_json::from_str("1712345678901.42").unwrap();
        assert_eq!(ItemId::from(raw).as_str(), "1712345678901.42");
    }
}
