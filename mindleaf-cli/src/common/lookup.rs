//! Commands name tasks and overlays by their 1-based position in the listing
//! or by (a prefix of) their id.

use anyhow::{Result, bail};
use mindleaf_core::{CanvasEntry, OverlayId, TodoList, todo_list::TaskId};

fn find<'a, I>(ids: I, key: &str, what: &str) -> Result<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let ids: Vec<&str> = ids.into_iter().collect();
    match key.parse::<usize>() {
        Ok(n) if (1..=ids.len()).contains(&n) => return Ok(ids[n - 1].to_string()),
        _ => {}
    }
    let matches: Vec<&str> = ids.iter().copied().filter(|id| id.starts_with(key)).collect();
    match matches.as_slice() {
        [id] => Ok(id.to_string()),
        [] => bail!("no {what} '{key}'"),
        _ => bail!("'{key}' matches {} {what}s; use more of the id", matches.len()),
    }
}

pub fn find_overlay(entry: &CanvasEntry, key: &str) -> Result<OverlayId> {
    let id = find(entry.overlays().iter().map(|o| o.id.as_str()), key, "overlay")?;
    Ok(OverlayId::from(id))
}

pub fn find_task(list: &TodoList, key: &str) -> Result<TaskId> {
    let id = find(list.tasks().iter().map(|t| t.id.as_str()), key, "task")?;
    Ok(TaskId::from(id))
}
