pub mod auth;
pub mod backend;
pub mod canvas;
pub mod config;
pub mod dates;
pub mod ids;
pub mod keywords;
pub mod mood;
pub mod overlay;
pub mod palette;
pub mod record;
pub mod resource;
pub mod store;
pub mod todo_list;
pub mod wire;

pub use canvas::{CanvasEntry, Cursor};
pub use config::Config;
pub use overlay::{OverlayId, OverlayKind, OverlayUpdate};
pub use record::Record;
pub use resource::Resource;
pub use store::{EntryIndex, EntryStore, Selected, StoreError};
pub use todo_list::TodoList;

#[cfg(test)]
mod tests;
