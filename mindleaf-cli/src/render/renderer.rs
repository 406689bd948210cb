use super::theme::Leaf;
use mindleaf_core::{
    CanvasEntry, EntryIndex, Resource, TodoList,
    auth::User,
    dates::format_date,
    overlay::{OverlayKind, OverlayObject},
    palette::{PaletteItem, Screen},
};
use once_cell::sync::Lazy;
use regex::Regex;
use termimad::{
    MadSkin,
    crossterm::style::{Color, Stylize},
};

#[derive(Clone)]
pub struct RenderOptions {
    pub date_format: String,
    pub use_color: bool,
}

pub struct Renderer {
    skin: MadSkin,
    opts: RenderOptions,
}

impl Renderer {
    pub fn new(config: Option<RenderOptions>) -> Self {
        Self {
            skin: Leaf::default_leaf_skin(),
            opts: match config {
                Some(config) => config,
                None => RenderOptions {
                    date_format: "%A, %d %b %Y".to_string(),
                    use_color: true,
                },
            },
        }
    }

    pub fn print_md(&self, md: &str) {
        if self.opts.use_color {
            self.skin.print_text(md);
        } else {
            print!("{md}");
        }
    }

    pub fn print_info(&self, message: &str) {
        if self.opts.use_color {
            let md = format!("|-|\n| {message} |\n|-|\n");
            self.skin.print_text(&md);
        } else {
            println!("{message}");
        }
    }

    fn heading(&self, resource: Resource, date: chrono::NaiveDate) -> String {
        format!(
            "## {} · {}\n",
            title(resource),
            format_date(date, &self.opts.date_format)
        )
    }

    pub fn print_canvas(&self, resource: Resource, entry: &CanvasEntry) {
        self.print_md(&self.heading(resource, entry.date()));
        let body = plain_text(entry.body());
        if body.trim().is_empty() {
            self.print_md("*Nothing written yet.*\n");
        } else {
            println!("{}", body.trim_end());
        }

        if entry.overlays().is_empty() {
            return;
        }
        println!();
        for (i, overlay) in entry.overlays().iter().enumerate() {
            println!("{}", self.overlay_line(i + 1, overlay));
        }
    }

    fn overlay_line(&self, n: usize, overlay: &OverlayObject) -> String {
        let what = match &overlay.kind {
            OverlayKind::Sticker { glyph } => glyph.clone(),
            OverlayKind::Image { src } => format!("image {}", summarize_src(src)),
        };
        let size = overlay.size();
        let geometry = format!(
            "at ({:.0}, {:.0}) {:.0}x{:.0}",
            overlay.position.x, overlay.position.y, size.width, size.height
        );
        let id = overlay.id.to_string();
        if self.opts.use_color {
            format!(
                "  {n:>2}. {what} {} {}",
                geometry.with(Color::Blue),
                id.with(Color::DarkGrey)
            )
        } else {
            format!("  {n:>2}. {what} {geometry} {id}")
        }
    }

    pub fn print_todo_list(&self, list: &TodoList) {
        self.print_md(&self.heading(Resource::Todo, list.date()));
        if list.is_empty() {
            self.print_md("*No tasks.*\n");
            return;
        }
        for (i, task) in list.tasks().iter().enumerate() {
            let mark = if task.completed { "[x]" } else { "[ ]" };
            if self.opts.use_color && task.completed {
                println!("  {:>2}. {} {}", i + 1, mark.with(Color::Green), task.text.clone().crossed_out());
            } else if self.opts.use_color {
                println!("  {:>2}. {} {}", i + 1, mark.with(Color::Yellow), task.text);
            } else {
                println!("  {:>2}. {mark} {}", i + 1, task.text);
            }
        }
        println!("\n{} of {} pending", list.pending(), list.tasks().len());
    }

    pub fn print_dates(&self, resource: Resource, index: &EntryIndex) {
        if index.is_empty() {
            self.print_info(&format!("No saved {resource} entries."));
            return;
        }
        self.print_info(&format!("{} saved {resource} entries.", index.len()));
        for date in index.iter() {
            let key = date.format("%Y-%m-%d").to_string();
            let shown = format_date(date, &self.opts.date_format);
            if self.opts.use_color {
                println!("{} {}", key.with(Color::Cyan), shown);
            } else {
                println!("{key} {shown}");
            }
        }
    }

    pub fn print_palette(&self, screen: Screen, items: &[PaletteItem]) {
        self.print_md(&format!("## {} palette\n", title(screen.resource())));
        for (i, item) in items.iter().enumerate() {
            match item {
                PaletteItem::Snippet(text) => println!("  {:>2}. {}", i + 1, text.trim_end()),
                PaletteItem::Sticker(glyph) => println!("  {:>2}. {glyph}  (sticker)", i + 1),
            }
        }
    }

    pub fn print_user(&self, user: Option<&User>, user_id: &str) {
        match user {
            Some(user) => self.print_info(&format!("Signed in as {} ({})", user.email, user.uid)),
            None => self.print_info(&format!("Not signed in; writing as '{user_id}'.")),
        }
    }
}

fn title(resource: Resource) -> &'static str {
    match resource {
        Resource::Journal => "Daily Journal",
        Resource::Gratitude => "Gratitude Journal",
        Resource::Todo => "To-Do List",
        Resource::Affirmation => "Affirmations",
    }
}

static LINE_BREAKS: Lazy<Option<Regex>> =
    Lazy::new(|| Regex::new(r"(?i)<br\s*/?>|</(p|div|li|h[1-6])>").ok());
static TAGS: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"<[^>]*>").ok());

/// Readable text from an entry body that may carry editor markup.
fn plain_text(body: &str) -> String {
    let (Some(breaks), Some(tags)) = (LINE_BREAKS.as_ref(), TAGS.as_ref()) else {
        return body.to_string();
    };
    let text = breaks.replace_all(body, "\n");
    let text = tags.replace_all(&text, "");
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&amp;", "&")
}

/// Data URLs are far too long to print.
fn summarize_src(src: &str) -> String {
    match src.strip_prefix("data:").and_then(|rest| rest.split_once(',')) {
        Some((meta, payload)) => {
            let mime = meta.split(';').next().unwrap_or("data");
            let kb = payload.len() as f64 * 3.0 / 4.0 / 1024.0;
            format!("{mime} ({kb:.1} KB)")
        }
        None => src.to_string(),
    }
}
