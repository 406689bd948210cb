//! Daily mood check-ins.
//!
//! Library only: moods are kept in memory for the running session and have
//! no backend route, so the `mindleaf` binary does not expose them.

use chrono::NaiveDate;
use strum_macros::{AsRefStr, EnumIter, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, AsRefStr, EnumString)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Mood {
    Happy,
    Content,
    Neutral,
    Sad,
    Crying,
    Angry,
    Anxious,
    Loved,
}

impl Mood {
    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😄",
            Mood::Content => "🙂",
            Mood::Neutral => "😐",
            Mood::Sad => "😔",
            Mood::Crying => "😢",
            Mood::Angry => "😡",
            Mood::Anxious => "😱",
            Mood::Loved => "🥰",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Content => "Content",
            Mood::Neutral => "Neutral",
            Mood::Sad => "Sad",
            Mood::Crying => "Crying",
            Mood::Angry => "Angry",
            Mood::Anxious => "Anxious",
            Mood::Loved => "Loved",
        }
    }

    /// Accent colour as `#rrggbb`.
    pub fn color(&self) -> &'static str {
        match self {
            Mood::Happy => "#ffe066",
            Mood::Content => "#b5ead7",
            Mood::Neutral => "#bdbdbd",
            Mood::Sad => "#a0c4ff",
            Mood::Crying => "#b2a4ff",
            Mood::Angry => "#ffb4a2",
            Mood::Anxious => "#ffd6e0",
            Mood::Loved => "#ffd6ec",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MoodCheckIn {
    pub date: NaiveDate,
    pub mood: Mood,
    pub note: String,
}

/// Mood check-ins, newest first, at most one per date.
#[derive(Debug, Clone, Default)]
pub struct MoodLog {
    entries: Vec<MoodCheckIn>,
}

impl MoodLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a check-in, replacing any earlier one for the same date.
    pub fn record(&mut self, date: NaiveDate, mood: Mood, note: &str) {
        self.entries.retain(|e| e.date != date);
        self.entries.insert(
            0,
            MoodCheckIn {
                date,
                mood,
                note: note.trim().to_string(),
            },
        );
    }

    pub fn on(&self, date: NaiveDate) -> Option<&MoodCheckIn> {
        self.entries.iter().find(|e| e.date == date)
    }

    pub fn history(&self) -> &[MoodCheckIn] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn one_check_in_per_day() {
        let today = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();
        let yesterday = NaiveDate::from_ymd_opt(2025, 8, 14).unwrap();
        let mut log = MoodLog::new();
        log.record(yesterday, Mood::Sad, "");
        log.record(today, Mood::Neutral, "meh");
        log.record(today, Mood::Happy, " sunny walk ");

        assert_eq!(log.history().len(), 2);
        assert_eq!(log.history()[0].mood, Mood::Happy);
        assert_eq!(log.history()[0].note, "sunny walk");
        assert_eq!(log.on(yesterday).map(|c| c.mood), Some(Mood::Sad));
    }

    #[test]
    fn moods_parse_case_insensitively() {
        assert_eq!(Mood::from_str("LOVED").unwrap(), Mood::Loved);
        assert_eq!(Mood::iter().count(), 8);
    }
}
