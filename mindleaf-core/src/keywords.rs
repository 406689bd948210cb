use chrono::Weekday;
use once_cell::sync::Lazy;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

/// Words accepted in place of a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "kebab-case")]
pub enum Keyword {
    Today,
    Yesterday,
    Tomorrow,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Keyword {
    pub fn weekday(&self) -> Option<Weekday> {
        match self {
            Keyword::Monday => Some(Weekday::Mon),
            Keyword::Tuesday => Some(Weekday::Tue),
            Keyword::Wednesday => Some(Weekday::Wed),
            Keyword::Thursday => Some(Weekday::Thu),
            Keyword::Friday => Some(Weekday::Fri),
            Keyword::Saturday => Some(Weekday::Sat),
            Keyword::Sunday => Some(Weekday::Sun),
            Keyword::Today | Keyword::Yesterday | Keyword::Tomorrow => None,
        }
    }
}

pub struct Keywords;

impl Keywords {
    /// Global lowercased `word -> keyword` table, seeded with the canonical
    /// names and grown by [`extend`](Self::extend).
    fn registry() -> &'static RwLock<HashMap<String, Keyword>> {
        static REGISTRY: Lazy<RwLock<HashMap<String, Keyword>>> = Lazy::new(|| {
            RwLock::new(
                Keyword::iter()
                    .map(|k| (k.as_ref().to_string(), k))
                    .collect(),
            )
        });
        &REGISTRY
    }

    /// Adds `(alias, target)` synonyms. Pairs whose target is not already
    /// known are ignored.
    pub fn extend(synonyms: &[(String, String)]) {
        let mut reg = Self::registry()
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        for (alias, target) in synonyms {
            if let Some(&canonical) = reg.get(&target.to_ascii_lowercase()) {
                reg.insert(alias.to_ascii_lowercase(), canonical);
            }
        }
    }

    pub fn is_canonical(word: &str) -> bool {
        let word = word.to_ascii_lowercase();
        Keyword::iter().any(|key| key.as_ref() == word)
    }

    pub fn lookup(input: &str) -> Option<Keyword> {
        let reg = Self::registry()
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        reg.get(&input.trim().to_ascii_lowercase()).copied()
    }

    pub fn matches(keyword: Keyword, input: &str) -> bool {
        Self::lookup(input) == Some(keyword)
    }
}
