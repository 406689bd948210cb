//! The freeform canvas entry: one date's rich-text body plus the overlays
//! placed over it.
//!
//! The body is an opaque blob (it may hold markup produced by the editor).
//! It is stored and returned verbatim and never parsed.

use crate::ids::ItemId;
use crate::overlay::{
    OverlayId, OverlayKind, OverlayObject, OverlayUpdate, Overlays, Position, Size, Spawn,
};
use crate::wire::{RawCanvas, RawFrame, RawImage, RawSticker};
use chrono::NaiveDate;
use rand::Rng;

/// Where inserted text goes. Offsets count characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cursor {
    /// A caret between two characters.
    At(usize),
    /// A selected span, replaced by the inserted text.
    Selection { start: usize, end: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct CanvasEntry {
    date: NaiveDate,
    body: String,
    overlays: Overlays,
}

impl CanvasEntry {
    /// An entry for a date that has never been saved.
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            body: String::new(),
            overlays: Overlays::new(),
        }
    }

    /// Builds an entry from its stored form.
    ///
    /// Overlays are stacked by their stored `z`; overlays without one come
    /// after those that have it, stickers before images.
    pub fn hydrate(date: NaiveDate, raw: RawCanvas) -> Self {
        let stickers = raw.stickers.into_iter().map(|s| {
            (
                s.frame,
                ItemId::from(s.id),
                OverlayKind::Sticker { glyph: s.emoji },
            )
        });
        let images = raw
            .images
            .into_iter()
            .map(|i| (i.frame, ItemId::from(i.id), OverlayKind::Image { src: i.src }));

        let mut stacked: Vec<(usize, RawFrame, ItemId, OverlayKind)> = stickers
            .chain(images)
            .enumerate()
            .map(|(seq, (frame, id, kind))| (seq, frame, id, kind))
            .collect();
        stacked.sort_by_key(|(seq, frame, _, _)| (frame.z.unwrap_or(usize::MAX), *seq));

        let mut overlays = Overlays::new();
        for (_, frame, id, kind) in stacked {
            let default_size = kind.default_size();
            let size = Size {
                width: frame.width.unwrap_or(default_size.width),
                height: frame.height.unwrap_or(default_size.height),
            };
            let position = Position {
                x: frame.x,
                y: frame.y,
            };
            overlays.push(OverlayObject::restore(id, kind, position, size));
        }

        Self {
            date,
            body: raw.text,
            overlays,
        }
    }

    /// The stored form. `hydrate(date, entry.serialize())` gives back an
    /// equal entry.
    pub fn serialize(&self) -> RawCanvas {
        let mut raw = RawCanvas {
            text: self.body.clone(),
            ..Default::default()
        };
        for (z, overlay) in self.overlays.iter().enumerate() {
            let size = overlay.size();
            let frame = RawFrame {
                x: overlay.position.x,
                y: overlay.position.y,
                width: Some(size.width),
                height: Some(size.height),
                z: Some(z),
            };
            match &overlay.kind {
                OverlayKind::Sticker { glyph } => raw.stickers.push(RawSticker {
                    id: (&overlay.id).into(),
                    emoji: glyph.clone(),
                    frame,
                }),
                OverlayKind::Image { src } => raw.images.push(RawImage {
                    id: (&overlay.id).into(),
                    src: src.clone(),
                    frame,
                }),
            }
        }
        raw
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn overlays(&self) -> &Overlays {
        &self.overlays
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Splices `text` into the body at `cursor`.
    ///
    /// Without a cursor (the editor is not focused) the text is appended, so
    /// an insertion is never lost. Offsets past the end also append.
    pub fn insert_at_cursor(&mut self, text: &str, cursor: Option<Cursor>) {
        let (start, end) = match cursor {
            None => {
                self.body.push_str(text);
                return;
            }
            Some(Cursor::At(at)) => (at, at),
            Some(Cursor::Selection { start, end }) if start <= end => (start, end),
            Some(Cursor::Selection { start, end }) => (end, start),
        };
        let start = self.byte_offset(start);
        let end = self.byte_offset(end);
        self.body.replace_range(start..end, text);
    }

    fn byte_offset(&self, chars: usize) -> usize {
        self.body
            .char_indices()
            .nth(chars)
            .map(|(i, _)| i)
            .unwrap_or(self.body.len())
    }

    /// Creates an overlay of `kind` on top of the others.
    pub fn add_overlay<R: Rng + ?Sized>(
        &mut self,
        kind: OverlayKind,
        spawn: &Spawn,
        rng: &mut R,
    ) -> OverlayId {
        self.overlays.push(OverlayObject::create(kind, spawn, rng))
    }

    /// Returns `false` when no overlay has `id`.
    pub fn update_overlay(&mut self, id: &OverlayId, update: OverlayUpdate) -> bool {
        self.overlays.update(id, update)
    }

    /// Removes an overlay. Removing an absent id is a no-op.
    pub fn remove_overlay(&mut self, id: &OverlayId) -> Option<OverlayObject> {
        self.overlays.remove(id)
    }

    /// Empties the body and drops every overlay.
    pub fn clear(&mut self) {
        self.body.clear();
        self.overlays.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.body.trim().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::overlay::SizeBounds;
    use pretty_assertions::assert_eq;
    use rand::{SeedableRng, rngs::StdRng};

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
    }

    fn busy_entry() -> CanvasEntry {
        let mut rng = StdRng::seed_from_u64(42);
        let mut entry = CanvasEntry::new(date());
        entry.set_body("<div>Grateful for <b>sunshine</b></div>");
        let a = entry.add_overlay(OverlayKind::sticker("🌸"), &Spawn::JOURNAL_STICKER, &mut rng);
        entry.add_overlay(OverlayKind::image("data:image/png;base64,iVBO"), &Spawn::JOURNAL_IMAGE, &mut rng);
        entry.add_overlay(OverlayKind::sticker("🌙"), &Spawn::JOURNAL_STICKER, &mut rng);
        entry.update_overlay(&a, OverlayUpdate::Resize { width: 500.0, height: 10.0 });
        entry.update_overlay(&a, OverlayUpdate::Move { x: 12.25, y: 400.125 });
        entry
    }

    #[test]
    fn hydrate_inverts_serialize() {
        let entry = busy_entry();
        let back = CanvasEntry::hydrate(date(), entry.serialize());
        assert_eq!(back, entry);
    }

    #[test]
    fn round_trip_survives_json_text() {
        let entry = busy_entry();
        let text = serde_json::to_string(&entry.serialize()).unwrap();
        let raw: RawCanvas = serde_json::from_str(&text).unwrap();
        assert_eq!(CanvasEntry::hydrate(date(), raw), entry);
    }

    #[test]
    fn non_finite_moves_still_round_trip() {
        let mut entry = busy_entry();
        let id = entry.overlays().iter().next().unwrap().id.clone();
        assert!(entry.update_overlay(&id, OverlayUpdate::Move { x: f64::INFINITY, y: f64::NAN }));
        assert_eq!(entry.overlays().get(&id).unwrap().position, Position { x: 12.25, y: 400.125 });

        let text = serde_json::to_string(&entry.serialize()).unwrap();
        let raw: RawCanvas = serde_json::from_str(&text).unwrap();
        assert_eq!(CanvasEntry::hydrate(date(), raw), entry);
    }

    #[test]
    fn interleaved_kinds_keep_their_stacking_order() {
        let entry = busy_entry();
        let back = CanvasEntry::hydrate(date(), entry.serialize());
        let kinds: Vec<bool> = back.overlays().iter().map(|o| o.kind.is_sticker()).collect();
        assert_eq!(kinds, vec![true, false, true]);
    }

    #[test]
    fn hydrate_without_z_puts_stickers_first() {
        let raw: RawCanvas = serde_json::from_str(
            r#"{"text":"x",
                "images":[{"id":1,"src":"a.png","x":1,"y":1,"width":100,"height":100}],
                "stickers":[{"id":2,"emoji":"🌸","x":2,"y":2,"width":60,"height":60}]}"#,
        )
        .unwrap();
        let entry = CanvasEntry::hydrate(date(), raw);
        let ids: Vec<&str> = entry.overlays().iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "1"]);
    }

    #[test]
    fn hydrate_defaults_missing_fields_and_clamps_sizes() {
        let entry = CanvasEntry::hydrate(date(), RawCanvas::default());
        assert_eq!(entry.body(), "");
        assert!(entry.overlays().is_empty());

        let raw: RawCanvas =
            serde_json::from_str(r#"{"stickers":[{"id":"s","emoji":"✨","width":9000}]}"#).unwrap();
        let entry = CanvasEntry::hydrate(date(), raw);
        let sticker = entry.overlays().iter().next().unwrap();
        assert_eq!(sticker.size(), Size { width: 200.0, height: 60.0 });
        assert!(SizeBounds::STICKER.contains(sticker.size()));
    }

    #[test]
    fn hydrate_repairs_duplicate_ids() {
        let raw: RawCanvas = serde_json::from_str(
            r#"{"stickers":[{"id":"same","emoji":"🌸"},{"id":"same","emoji":"🌿"}]}"#,
        )
        .unwrap();
        let entry = CanvasEntry::hydrate(date(), raw);
        let ids: Vec<_> = entry.overlays().iter().map(|o| o.id.clone()).collect();
        assert_eq!(ids.len(), 2);
        assert_ne!(ids[0], ids[1]);
    }

    #[test]
    fn insert_without_cursor_appends() {
        let mut entry = CanvasEntry::new(date());
        entry.set_body("Today ");
        entry.insert_at_cursor("• ", None);
        assert_eq!(entry.body(), "Today • ");
    }

    #[test]
    fn insert_at_cursor_counts_characters() {
        let mut entry = CanvasEntry::new(date());
        entry.set_body("🌸ab");
        entry.insert_at_cursor("X", Some(Cursor::At(1)));
        assert_eq!(entry.body(), "🌸Xab");
    }

    #[test]
    fn insert_past_end_appends() {
        let mut entry = CanvasEntry::new(date());
        entry.set_body("abc");
        entry.insert_at_cursor("!", Some(Cursor::At(99)));
        assert_eq!(entry.body(), "abc!");
    }

    #[test]
    fn insert_replaces_selection() {
        let mut entry = CanvasEntry::new(date());
        entry.set_body("I am tired.");
        entry.insert_at_cursor("calm", Some(Cursor::Selection { start: 10, end: 5 }));
        assert_eq!(entry.body(), "I am calm.");
    }

    #[test]
    fn clear_drops_everything() {
        let mut entry = busy_entry();
        entry.clear();
        assert!(entry.is_blank());
        assert!(entry.overlays().is_empty());
    }
}
