use crate::ids::ItemId;
use crate::wire::{RawTask, RawTodoList};
use chrono::NaiveDate;

pub type TaskId = ItemId;

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
}

/// The tasks planned for one date.
#[derive(Debug, Clone, PartialEq)]
pub struct TodoList {
    date: NaiveDate,
    tasks: Vec<Task>,
}

impl TodoList {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            tasks: Vec::new(),
        }
    }

    pub fn hydrate(date: NaiveDate, raw: RawTodoList) -> Self {
        let mut list = Self::new(date);
        for task in raw.tasks {
            let mut id = ItemId::from(task.id);
            if id.is_empty() || list.get(&id).is_some() {
                id = TaskId::generate();
            }
            list.tasks.push(Task {
                id,
                text: task.text,
                completed: task.completed,
            });
        }
        list
    }

    pub fn serialize(&self) -> RawTodoList {
        RawTodoList {
            tasks: self
                .tasks
                .iter()
                .map(|t| RawTask {
                    id: (&t.id).into(),
                    text: t.text.clone(),
                    completed: t.completed,
                })
                .collect(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: &TaskId) -> Option<&Task> {
        self.tasks.iter().find(|t| &t.id == id)
    }

    /// Adds a pending task. Blank text adds nothing.
    pub fn add(&mut self, text: &str) -> Option<TaskId> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        let id = TaskId::generate();
        self.tasks.push(Task {
            id: id.clone(),
            text: text.to_string(),
            completed: false,
        });
        Some(id)
    }

    /// Flips a task between pending and done. Returns the new state.
    pub fn toggle(&mut self, id: &TaskId) -> Option<bool> {
        let task = self.tasks.iter_mut().find(|t| &t.id == id)?;
        task.completed = !task.completed;
        Some(task.completed)
    }

    /// Rewrites a task's text. Blank text leaves the task as it was.
    pub fn edit(&mut self, id: &TaskId, text: &str) -> bool {
        let text = text.trim();
        if text.is_empty() {
            return false;
        }
        match self.tasks.iter_mut().find(|t| &t.id == id) {
            Some(task) => {
                task.text = text.to_string();
                true
            }
            None => false,
        }
    }

    /// Removing an absent task is a no-op.
    pub fn remove(&mut self, id: &TaskId) -> Option<Task> {
        let index = self.tasks.iter().position(|t| &t.id == id)?;
        Some(self.tasks.remove(index))
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn pending(&self) -> usize {
        self.tasks.iter().filter(|t| !t.completed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 15).unwrap()
    }

    #[test]
    fn add_trims_and_skips_blank_text() {
        let mut list = TodoList::new(date());
        assert!(list.add("   ").is_none());
        let id = list.add("  water the plants ").unwrap();
        assert_eq!(list.get(&id).unwrap().text, "water the plants");
        assert_eq!(list.tasks().len(), 1);
    }

    #[test]
    fn toggle_edit_remove() {
        let mut list = TodoList::new(date());
        let a = list.add("stretch").unwrap();
        let b = list.add("read").unwrap();

        assert_eq!(list.toggle(&a), Some(true));
        assert_eq!(list.pending(), 1);
        assert_eq!(list.toggle(&a), Some(false));
        assert!(list.edit(&b, "read a chapter"));
        assert!(!list.edit(&b, "   "));
        assert_eq!(list.get(&b).unwrap().text, "read a chapter");

        assert!(list.remove(&a).is_some());
        assert!(list.remove(&a).is_none());
        assert_eq!(list.tasks().len(), 1);
        assert_eq!(list.toggle(&a), None);
    }

    #[test]
    fn hydrate_inverts_serialize() {
        let mut list = TodoList::new(date());
        let a = list.add("journal").unwrap();
        list.add("walk").unwrap();
        list.toggle(&a);
        assert_eq!(TodoList::hydrate(date(), list.serialize()), list);
    }

    #[test]
    fn hydrate_gives_missing_ids_a_token() {
        let raw: RawTodoList =
            serde_json::from_str(r#"{"tasks":[{"text":"a"},{"text":"b"}]}"#).unwrap();
        let list = TodoList::hydrate(date(), raw);
        assert_ne!(list.tasks()[0].id, list.tasks()[1].id);
        assert!(!list.tasks()[0].id.is_empty());
    }
}
