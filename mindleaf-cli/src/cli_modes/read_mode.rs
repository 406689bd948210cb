use super::App;
use anyhow::{Context, Result};
use mindleaf_core::{CanvasEntry, Resource, TodoList, config::BackendKind, palette::Screen};

pub fn path(app: &App) -> Result<()> {
    match app.config.backend {
        BackendKind::Http => app.renderer.print_info(&app.config.api_url),
        BackendKind::File => app
            .renderer
            .print_info(&app.config.data_dir.join(app.user_id()).display().to_string()),
    }
    Ok(())
}

pub async fn show(app: &App, resource: Resource) -> Result<()> {
    if resource == Resource::Todo {
        let list: TodoList = app
            .store(resource)
            .load(app.date)
            .await
            .with_context(|| format!("loading {resource} for {}", app.date))?;
        app.renderer.print_todo_list(&list);
        return Ok(());
    }
    let (_, entry): (_, CanvasEntry) = app.open_canvas(resource).await?;
    app.renderer.print_canvas(resource, &entry);
    Ok(())
}

pub async fn dates(app: &App, resource: Resource) -> Result<()> {
    let index = app
        .store(resource)
        .list_dates()
        .await
        .with_context(|| format!("listing saved {resource} days"))?;
    app.renderer.print_dates(resource, &index);
    Ok(())
}

pub fn palette(app: &App, screen: Screen) -> Result<()> {
    app.renderer.print_palette(screen, &screen.palette());
    Ok(())
}
