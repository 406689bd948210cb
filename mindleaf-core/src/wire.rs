//! Storage representation of entries, as exchanged with a persistence backend.
//!
//! Every field is optional on read. Entries written by older clients lack
//! fields introduced later (`z`, sometimes `images`) and must still load.

use crate::ids::RawId;
use serde::{Deserialize, Deserializer, Serialize};

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCanvas {
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub stickers: Vec<RawSticker>,
    #[serde(deserialize_with = "null_as_default")]
    pub images: Vec<RawImage>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSticker {
    pub id: RawId,
    #[serde(deserialize_with = "null_as_default")]
    pub emoji: String,
    #[serde(flatten)]
    pub frame: RawFrame,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawImage {
    pub id: RawId,
    #[serde(deserialize_with = "null_as_default")]
    pub src: String,
    #[serde(flatten)]
    pub frame: RawFrame,
}

/// Geometry shared by every overlay kind. `z` is the overlay's index in the
/// entry-wide stacking order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawFrame {
    #[serde(deserialize_with = "null_as_default")]
    pub x: f64,
    #[serde(deserialize_with = "null_as_default")]
    pub y: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<usize>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTodoList {
    #[serde(deserialize_with = "null_as_default")]
    pub tasks: Vec<RawTask>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawTask {
    pub id: RawId,
    #[serde(deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(deserialize_with = "null_as_default")]
    pub completed: bool,
}
