mod cli;
mod cli_modes;
mod common;
mod logging;
mod render;

pub use cli::Cli;
pub use cli_modes::App;
pub use logging::init_logging;
pub use render::{ColorMode, RenderOptions, Renderer};
