//! Positionable decorations (stickers and images) layered over an entry's text.
//!
//! Every overlay kind carries its own size bounds. Sizes are clamped into
//! those bounds whenever they change; positions are stored as given, since
//! keeping an overlay inside the visible canvas is a rendering concern.

use crate::ids::ItemId;
use rand::Rng;

pub type OverlayId = ItemId;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn square(side: f64) -> Self {
        Self {
            width: side,
            height: side,
        }
    }
}

/// Inclusive `[min, max]` range applied to both dimensions of an overlay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeBounds {
    pub min: f64,
    pub max: f64,
}

impl SizeBounds {
    pub const STICKER: SizeBounds = SizeBounds {
        min: 36.0,
        max: 200.0,
    };
    pub const IMAGE: SizeBounds = SizeBounds {
        min: 60.0,
        max: 600.0,
    };

    /// Clamps one dimension. NaN collapses to the lower bound.
    pub fn clamp_dimension(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        value.clamp(self.min, self.max)
    }

    pub fn clamp(&self, size: Size) -> Size {
        Size {
            width: self.clamp_dimension(size.width),
            height: self.clamp_dimension(size.height),
        }
    }

    pub fn contains(&self, size: Size) -> bool {
        (self.min..=self.max).contains(&size.width) && (self.min..=self.max).contains(&size.height)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OverlayKind {
    /// A short glyph, usually a single emoji.
    Sticker { glyph: String },
    /// An uploaded picture: a data URL or a reference to one.
    Image { src: String },
}

impl OverlayKind {
    pub fn sticker(glyph: impl Into<String>) -> Self {
        OverlayKind::Sticker {
            glyph: glyph.into(),
        }
    }

    pub fn image(src: impl Into<String>) -> Self {
        OverlayKind::Image { src: src.into() }
    }

    pub fn bounds(&self) -> SizeBounds {
        match self {
            OverlayKind::Sticker { .. } => SizeBounds::STICKER,
            OverlayKind::Image { .. } => SizeBounds::IMAGE,
        }
    }

    pub fn default_size(&self) -> Size {
        match self {
            OverlayKind::Sticker { .. } => Spawn::JOURNAL_STICKER.size,
            OverlayKind::Image { .. } => Spawn::JOURNAL_IMAGE.size,
        }
    }

    pub fn is_sticker(&self) -> bool {
        matches!(self, OverlayKind::Sticker { .. })
    }
}

/// Rectangle new overlays are dropped into, so that several additions in a
/// row do not pile up on one point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnBand {
    pub origin: Position,
    pub span: Size,
}

impl SpawnBand {
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Position {
        Position {
            x: self.origin.x + rng.random::<f64>() * self.span.width,
            y: self.origin.y + rng.random::<f64>() * self.span.height,
        }
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= self.origin.x
            && position.x <= self.origin.x + self.span.width
            && position.y >= self.origin.y
            && position.y <= self.origin.y + self.span.height
    }
}

/// Where and how large a freshly created overlay starts out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spawn {
    pub band: SpawnBand,
    pub size: Size,
}

impl Spawn {
    pub const JOURNAL_STICKER: Spawn = Spawn {
        band: SpawnBand {
            origin: Position { x: 100.0, y: 100.0 },
            span: Size::square(200.0),
        },
        size: Size::square(60.0),
    };
    pub const JOURNAL_IMAGE: Spawn = Spawn {
        band: SpawnBand {
            origin: Position { x: 120.0, y: 120.0 },
            span: Size::square(200.0),
        },
        size: Size::square(120.0),
    };
    pub const GRATITUDE_STICKER: Spawn = Spawn {
        band: SpawnBand {
            origin: Position { x: 120.0, y: 60.0 },
            span: Size::square(120.0),
        },
        size: Size::square(44.0),
    };
}

#[derive(Debug, Clone, PartialEq)]
pub struct OverlayObject {
    pub id: OverlayId,
    pub kind: OverlayKind,
    pub position: Position,
    size: Size,
}

impl OverlayObject {
    /// Creates an overlay with a fresh id, placed at a random point of the
    /// spawn band.
    pub fn create<R: Rng + ?Sized>(kind: OverlayKind, spawn: &Spawn, rng: &mut R) -> Self {
        let size = kind.bounds().clamp(spawn.size);
        Self {
            id: OverlayId::generate(),
            position: spawn.band.sample(rng),
            kind,
            size,
        }
    }

    /// Rebuilds an overlay from stored values. The size is clamped like any
    /// other update.
    pub fn restore(id: OverlayId, kind: OverlayKind, position: Position, size: Size) -> Self {
        let size = kind.bounds().clamp(size);
        Self {
            id,
            kind,
            position,
            size,
        }
    }

    pub fn size(&self) -> Size {
        self.size
    }

    /// Moves the overlay. A non-finite coordinate cannot be stored, so that
    /// axis keeps its current value.
    pub fn reposition(&mut self, x: f64, y: f64) {
        if x.is_finite() {
            self.position.x = x;
        }
        if y.is_finite() {
            self.position.y = y;
        }
    }

    pub fn resize(&mut self, width: f64, height: f64) {
        self.size = self.kind.bounds().clamp(Size { width, height });
    }

    /// A resize dragged from a top or left handle also moves the origin.
    pub fn resize_from(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.reposition(x, y);
        self.resize(width, height);
    }
}

/// A change requested by a drag or resize gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OverlayUpdate {
    Move { x: f64, y: f64 },
    Resize { width: f64, height: f64 },
    ResizeFrom { x: f64, y: f64, width: f64, height: f64 },
}

/// Ordered overlays of one entry. Order is z-order: later items render on top.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overlays {
    items: Vec<OverlayObject>,
}

impl Overlays {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an overlay on top of the others.
    ///
    /// An id already present (or empty) is swapped for a fresh one, so ids
    /// stay unique within the collection. Returns the id actually stored.
    pub fn push(&mut self, mut overlay: OverlayObject) -> OverlayId {
        if overlay.id.is_empty() || self.contains(&overlay.id) {
            let fresh = OverlayId::generate();
            log::warn!("overlay id '{}' is not unique, using '{}'", overlay.id, fresh);
            overlay.id = fresh;
        }
        let id = overlay.id.clone();
        self.items.push(overlay);
        id
    }

    pub fn contains(&self, id: &OverlayId) -> bool {
        self.items.iter().any(|o| &o.id == id)
    }

    pub fn get(&self, id: &OverlayId) -> Option<&OverlayObject> {
        self.items.iter().find(|o| &o.id == id)
    }

    /// Applies `update` to the overlay with `id`. Returns `false` when there
    /// is no such overlay.
    pub fn update(&mut self, id: &OverlayId, update: OverlayUpdate) -> bool {
        let Some(overlay) = self.items.iter_mut().find(|o| &o.id == id) else {
            return false;
        };
        match update {
            OverlayUpdate::Move { x, y } => overlay.reposition(x, y),
            OverlayUpdate::Resize { width, height } => overlay.resize(width, height),
            OverlayUpdate::ResizeFrom {
                x,
                y,
                width,
                height,
            } => overlay.resize_from(x, y, width, height),
        }
        true
    }

    /// Removes the overlay with `id`. Removing an absent id does nothing.
    pub fn remove(&mut self, id: &OverlayId) -> Option<OverlayObject> {
        let index = self.items.iter().position(|o| &o.id == id)?;
        Some(self.items.remove(index))
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &OverlayObject> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
