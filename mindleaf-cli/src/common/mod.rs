mod editor_utils;
mod image;
mod lookup;

pub use editor_utils::{edit_in_editor, resolve_editor};
pub use image::data_url;
pub use lookup::{find_overlay, find_task};
