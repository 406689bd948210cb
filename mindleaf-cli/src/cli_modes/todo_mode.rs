use super::App;
use crate::cli::TodoCommand;
use crate::common::find_task;
use anyhow::{Context, Result, bail};
use mindleaf_core::{Resource, TodoList};

pub async fn todo(app: &App, cmd: TodoCommand) -> Result<()> {
    let store = app.store(Resource::Todo);
    let mut list: TodoList = store
        .load(app.date)
        .await
        .with_context(|| format!("loading the to-do list for {}", app.date))?;

    match cmd {
        TodoCommand::Add { text } => {
            if list.add(&text.join(" ")).is_none() {
                bail!("a task needs some text");
            }
        }
        TodoCommand::Toggle { task } => {
            let id = find_task(&list, &task)?;
            list.toggle(&id);
        }
        TodoCommand::Edit { task, text } => {
            let id = find_task(&list, &task)?;
            if !list.edit(&id, &text.join(" ")) {
                bail!("a task needs some text; use `mindleaf todo rm` to remove it");
            }
        }
        TodoCommand::Rm { task } => {
            let id = find_task(&list, &task)?;
            list.remove(&id);
        }
        TodoCommand::Clear => list.clear(),
    }

    app.save(&store, &list).await?;
    app.renderer.print_todo_list(&list);
    Ok(())
}
