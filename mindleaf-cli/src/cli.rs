use crate::render::ColorMode;
use clap::{Parser, Subcommand};
use mindleaf_core::{Resource, palette::Screen};
use std::path::PathBuf;

/// mindleaf: journal, gratitude, affirmations and to-dos, one page per day
#[derive(Parser, Debug)]
#[command(version, about)]
pub struct Cli {
    /// Control ANSI colors in output.
    /// By default, colors are disabled when output is redirected (e.g with `>` or `|`).
    #[arg(long, value_enum, global = true, default_value_t = ColorMode::Auto)]
    pub color: ColorMode,
    /// The day to work on (e.g. `today`, `yesterday`, `friday`, `2024-03-01`).
    #[arg(long, global = true, default_value = "today")]
    pub on: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Prints where entries are kept.
    Path,
    /// Shows the entry for the day.
    Show { resource: Resource },
    /// Lists every day with a saved entry, newest first.
    Dates { resource: Resource },
    /// Replaces the entry's text. Opens your $EDITOR when no text is given.
    Write {
        resource: Resource,
        text: Vec<String>,
    },
    /// Adds a line to the end of the entry's text.
    Append {
        resource: Resource,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Lists the quotes, phrases and stickers offered for a page.
    Palette { screen: Screen },
    /// Applies a palette item (by its number in `mindleaf palette`).
    Insert {
        screen: Screen,
        item: usize,
        /// Character offset to insert at. Without it the item is appended.
        #[arg(long)]
        at: Option<usize>,
        /// End of a selection starting at `--at`, replaced by the item.
        #[arg(long, requires = "at")]
        to: Option<usize>,
    },
    /// Places, moves, resizes or removes stickers and images.
    #[command(subcommand)]
    Sticker(StickerCommand),
    /// Adds images to the journal page.
    #[command(subcommand)]
    Image(ImageCommand),
    /// Manages the day's to-do list.
    #[command(subcommand)]
    Todo(TodoCommand),
    /// Empties the entry (text and stickers) and saves it.
    Clear { resource: Resource },
    /// Signs in with email and password.
    Login(Credentials),
    /// Creates an account with email and password.
    Signup(Credentials),
    /// Signs out.
    Logout,
    /// Prints who entries are being written as.
    Whoami,
}

#[derive(clap::Args, Debug)]
pub struct Credentials {
    pub email: String,
    #[arg(long, env = "MINDLEAF_PASSWORD", hide_env_values = true)]
    pub password: String,
}

#[derive(Subcommand, Debug)]
pub enum StickerCommand {
    /// Drops a sticker onto the page at a random spot.
    Add { screen: Screen, glyph: String },
    /// Moves a sticker or image (by number or id).
    Move {
        screen: Screen,
        id: String,
        x: f64,
        y: f64,
    },
    /// Resizes a sticker or image. Sizes are kept within the kind's limits.
    Resize {
        screen: Screen,
        id: String,
        width: f64,
        height: f64,
        /// New left edge, when resizing from the top or left.
        #[arg(long, requires = "y")]
        x: Option<f64>,
        /// New top edge, when resizing from the top or left.
        #[arg(long, requires = "x")]
        y: Option<f64>,
    },
    /// Removes a sticker or image.
    Rm { screen: Screen, id: String },
}

#[derive(Subcommand, Debug)]
pub enum ImageCommand {
    /// Places an image on the journal page.
    Add {
        /// Image file to embed.
        #[arg(long, required_unless_present = "src", conflicts_with = "src")]
        file: Option<PathBuf>,
        /// Image URL or data URL to reference as-is.
        #[arg(long)]
        src: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum TodoCommand {
    /// Adds a task.
    Add {
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Marks a task done, or pending again.
    Toggle { task: String },
    /// Rewrites a task.
    Edit {
        task: String,
        #[arg(required = true)]
        text: Vec<String>,
    },
    /// Removes a task.
    Rm { task: String },
    /// Removes every task.
    Clear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verifies_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_resource_and_date() {
        let cli = Cli::try_parse_from(["mindleaf", "show", "gratitude", "--on", "yesterday"]).unwrap();
        assert_eq!(cli.on, "yesterday");
        assert!(matches!(cli.command, Command::Show { resource: Resource::Gratitude }));
    }

    #[test]
    fn insert_selection_needs_start() {
        assert!(Cli::try_parse_from(["mindleaf", "insert", "gratitude", "1", "--to", "4"]).is_err());
        let cli =
            Cli::try_parse_from(["mindleaf", "insert", "affirmations", "2", "--at", "0", "--to", "4"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Insert { screen: Screen::Affirmation, item: 2, at: Some(0), to: Some(4) }
        ));
    }

    #[test]
    fn image_needs_a_source() {
        assert!(Cli::try_parse_from(["mindleaf", "image", "add"]).is_err());
        assert!(Cli::try_parse_from(["mindleaf", "image", "add", "--src", "https://x/y.png"]).is_ok());
    }
}
