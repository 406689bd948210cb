use super::App;
use crate::cli::{ImageCommand, StickerCommand};
use crate::common::{data_url, find_overlay};
use anyhow::{Result, bail};
use mindleaf_core::{
    OverlayKind, OverlayUpdate,
    palette::{self, Applied, PaletteItem, Screen},
};

pub async fn sticker(app: &App, cmd: StickerCommand) -> Result<()> {
    match cmd {
        StickerCommand::Add { screen, glyph } => {
            let (store, mut entry) = app.open_canvas(screen.resource()).await?;
            let item = PaletteItem::Sticker(glyph);
            match palette::apply(screen, &item, &mut entry, None, &mut rand::rng()) {
                Applied::Overlay(id) => app.renderer.print_info(&format!("Placed sticker {id}.")),
                Applied::Inserted => app
                    .renderer
                    .print_info(&format!("The {screen} page has no stickers; added it to the text.")),
            }
            app.save(&store, &entry).await
        }
        StickerCommand::Move { screen, id, x, y } => {
            update(app, screen, &id, OverlayUpdate::Move { x, y }).await
        }
        StickerCommand::Resize {
            screen,
            id,
            width,
            height,
            x,
            y,
        } => {
            let change = match (x, y) {
                (Some(x), Some(y)) => OverlayUpdate::ResizeFrom {
                    x,
                    y,
                    width,
                    height,
                },
                _ => OverlayUpdate::Resize { width, height },
            };
            update(app, screen, &id, change).await
        }
        StickerCommand::Rm { screen, id } => {
            let (store, mut entry) = app.open_canvas(screen.resource()).await?;
            let id = find_overlay(&entry, &id)?;
            entry.remove_overlay(&id);
            app.save(&store, &entry).await
        }
    }
}

async fn update(app: &App, screen: Screen, key: &str, change: OverlayUpdate) -> Result<()> {
    let (store, mut entry) = app.open_canvas(screen.resource()).await?;
    let id = find_overlay(&entry, key)?;
    entry.update_overlay(&id, change);
    app.save(&store, &entry).await
}

pub async fn image(app: &App, cmd: ImageCommand) -> Result<()> {
    match cmd {
        ImageCommand::Add { file, src } => {
            let src = match (file, src) {
                (Some(path), _) => data_url(&path)?,
                (None, Some(src)) => src,
                (None, None) => bail!("give an image with --file or --src"),
            };
            let kind = OverlayKind::image(src);
            let screen = Screen::Journal;
            let Some(spawn) = screen.spawn(&kind) else {
                bail!("images can only be placed on the journal page");
            };
            let (store, mut entry) = app.open_canvas(screen.resource()).await?;
            let id = entry.add_overlay(kind, &spawn, &mut rand::rng());
            app.renderer.print_info(&format!("Placed image {id}."));
            app.save(&store, &entry).await
        }
    }
}
