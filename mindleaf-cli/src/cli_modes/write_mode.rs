use super::App;
use crate::common::{edit_in_editor, resolve_editor};
use anyhow::{Result, bail};
use mindleaf_core::{
    Cursor, Resource, TodoList,
    palette::{self, Applied, Screen},
};

pub async fn write(app: &App, resource: Resource, text: &[String]) -> Result<()> {
    let (store, mut entry) = app.open_canvas(resource).await?;

    let new_body = if text.is_empty() {
        let editor = resolve_editor(app.config.editor.as_deref());
        let edited = edit_in_editor(&editor, entry.body())?;
        let edited = edited.trim_end();
        if edited == entry.body() {
            app.renderer.print_info("Nothing changed.");
            return Ok(());
        }
        edited.to_string()
    } else {
        text.join(" ")
    };

    entry.set_body(new_body);
    app.save(&store, &entry).await
}

pub async fn append(app: &App, resource: Resource, text: &[String]) -> Result<()> {
    let (store, mut entry) = app.open_canvas(resource).await?;
    let line = text.join(" ");
    let separator = if entry.body().is_empty() || entry.body().ends_with('\n') {
        ""
    } else {
        "\n"
    };
    entry.insert_at_cursor(&format!("{separator}{line}"), None);
    app.save(&store, &entry).await
}

pub async fn insert(
    app: &App,
    screen: Screen,
    item: usize,
    at: Option<usize>,
    to: Option<usize>,
) -> Result<()> {
    let items = screen.palette();
    let Some(chosen) = item.checked_sub(1).and_then(|i| items.get(i)) else {
        bail!(
            "the {screen} palette has items 1 to {}; see `mindleaf palette {screen}`",
            items.len()
        );
    };
    let cursor = match (at, to) {
        (Some(start), Some(end)) => Some(Cursor::Selection { start, end }),
        (Some(offset), None) => Some(Cursor::At(offset)),
        _ => None,
    };

    let (store, mut entry) = app.open_canvas(screen.resource()).await?;
    if let Applied::Overlay(id) = palette::apply(screen, chosen, &mut entry, cursor, &mut rand::rng()) {
        app.renderer.print_info(&format!("Placed sticker {id}."));
    }
    app.save(&store, &entry).await
}

pub async fn clear(app: &App, resource: Resource) -> Result<()> {
    if resource == Resource::Todo {
        let store = app.store(resource);
        let mut list: TodoList = store.load(app.date).await?;
        list.clear();
        return app.save(&store, &list).await;
    }
    let (store, mut entry) = app.open_canvas(resource).await?;
    if resource.requires_text() {
        bail!("a {resource} entry cannot be saved empty; use `mindleaf write {resource}` instead");
    }
    entry.clear();
    app.save(&store, &entry).await
}
