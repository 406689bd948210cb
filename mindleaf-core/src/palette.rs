//! Prebuilt snippets and stickers offered next to each writing space, and
//! the glue that turns a palette click into an edit of the entry.

use crate::canvas::{CanvasEntry, Cursor};
use crate::overlay::{OverlayId, OverlayKind, Spawn};
use crate::resource::Resource;
use rand::Rng;
use strum_macros::{AsRefStr, Display, EnumIter, EnumString};

const JOURNAL_STICKERS: &[&str] = &["🌸", "🌿", "🌻", "✨", "🍀", "🦋", "🌼", "💖", "🌙", "🍃"];

const GRATITUDE_PHRASES: &[&str] = &[
    "I am grateful for my family and friends.",
    "I appreciate the little things in life.",
    "I am thankful for my health.",
    "I am grateful for new opportunities.",
    "I appreciate the beauty of nature.",
    "I am thankful for a safe place to live.",
    "I am grateful for the kindness of others.",
    "I appreciate moments of peace and calm.",
];
const GRATITUDE_STICKERS: &[&str] = &["🌸", "🌈", "💖", "😊", "✨", "🍃", "🌻", "🥰"];

const MOTIVATIONAL_QUOTES: &[&str] = &[
    "You are stronger than you think.",
    "Believe in yourself and all that you are.",
    "Every day is a fresh start.",
    "You are worthy of love and respect.",
    "Progress, not perfection.",
];
const PREBUILT_AFFIRMATIONS: &[&str] = &[
    "I am calm and centered.",
    "I am worthy of good things.",
    "I choose to focus on the present.",
    "I am growing stronger every day.",
    "I radiate positivity and kindness.",
];
/// Affirmation stickers go into the text itself; the first one is a bullet.
const AFFIRMATION_STICKERS: &[&str] = &["•", "🌈", "💪", "🌟", "✨", "💖", "😊", "🌸", "🙌"];

pub const BULLET: &str = "• ";

/// A writing space with a palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, AsRefStr, EnumString, Display)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Screen {
    Journal,
    Gratitude,
    #[strum(to_string = "affirmation", serialize = "affirmations")]
    Affirmation,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaletteItem {
    /// Text spliced into the body at the cursor.
    Snippet(String),
    /// A glyph dropped onto the canvas as a movable overlay.
    Sticker(String),
}

/// What applying a palette item did to the entry.
#[derive(Debug, Clone, PartialEq)]
pub enum Applied {
    Inserted,
    Overlay(OverlayId),
}

impl Screen {
    /// The resource an entry on this screen is saved to.
    pub fn resource(&self) -> Resource {
        match self {
            Screen::Journal => Resource::Journal,
            Screen::Gratitude => Resource::Gratitude,
            Screen::Affirmation => Resource::Affirmation,
        }
    }

    pub fn for_resource(resource: Resource) -> Option<Screen> {
        match resource {
            Resource::Journal => Some(Screen::Journal),
            Resource::Gratitude => Some(Screen::Gratitude),
            Resource::Affirmation => Some(Screen::Affirmation),
            Resource::Todo => None,
        }
    }

    /// Every item offered on this screen, in display order.
    pub fn palette(&self) -> Vec<PaletteItem> {
        let snippets = |items: &[&str], suffix: &str| {
            items
                .iter()
                .map(|s| PaletteItem::Snippet(format!("{s}{suffix}")))
                .collect::<Vec<_>>()
        };
        let stickers = |items: &[&str]| {
            items
                .iter()
                .map(|s| PaletteItem::Sticker(s.to_string()))
                .collect::<Vec<_>>()
        };

        match self {
            Screen::Journal => stickers(JOURNAL_STICKERS),
            Screen::Gratitude => {
                let mut items = snippets(GRATITUDE_PHRASES, " ");
                items.push(PaletteItem::Snippet(BULLET.to_string()));
                items.extend(stickers(GRATITUDE_STICKERS));
                items
            }
            Screen::Affirmation => {
                let mut items = snippets(MOTIVATIONAL_QUOTES, "");
                items.extend(snippets(PREBUILT_AFFIRMATIONS, ""));
                items.extend(snippets(AFFIRMATION_STICKERS, ""));
                items
            }
        }
    }

    /// Where new overlays of `kind` appear on this screen, if it has any.
    pub fn spawn(&self, kind: &OverlayKind) -> Option<Spawn> {
        match (self, kind) {
            (Screen::Journal, OverlayKind::Sticker { .. }) => Some(Spawn::JOURNAL_STICKER),
            (Screen::Journal, OverlayKind::Image { .. }) => Some(Spawn::JOURNAL_IMAGE),
            (Screen::Gratitude, OverlayKind::Sticker { .. }) => Some(Spawn::GRATITUDE_STICKER),
            _ => None,
        }
    }

    pub fn supports_overlays(&self) -> bool {
        !matches!(self, Screen::Affirmation)
    }
}

/// Applies a palette click to `entry`: snippets go in at the cursor (or the
/// end, without one), stickers become overlays.
pub fn apply<R: Rng + ?Sized>(
    screen: Screen,
    item: &PaletteItem,
    entry: &mut CanvasEntry,
    cursor: Option<Cursor>,
    rng: &mut R,
) -> Applied {
    match item {
        PaletteItem::Snippet(text) => {
            entry.insert_at_cursor(text, cursor);
            Applied::Inserted
        }
        PaletteItem::Sticker(glyph) => {
            let kind = OverlayKind::sticker(glyph.clone());
            match screen.spawn(&kind) {
                Some(spawn) => Applied::Overlay(entry.add_overlay(kind, &spawn, rng)),
                None => {
                    entry.insert_at_cursor(glyph, cursor);
                    Applied::Inserted
                }
            }
        }
    }
}
