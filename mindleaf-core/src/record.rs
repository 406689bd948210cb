use crate::canvas::CanvasEntry;
use crate::todo_list::TodoList;
use crate::wire::{RawCanvas, RawTodoList};
use chrono::NaiveDate;
use serde::{Serialize, de::DeserializeOwned};

/// A per-date document the entry store can load and save.
pub trait Record: Sized + Send + Sync {
    /// Stored form. Must read an empty object as the empty record.
    type Raw: Serialize + DeserializeOwned + Default + Send;

    fn empty(date: NaiveDate) -> Self;
    fn hydrate(date: NaiveDate, raw: Self::Raw) -> Self;
    fn serialize(&self) -> Self::Raw;
    fn date(&self) -> NaiveDate;
    fn is_blank(&self) -> bool;
}

impl Record for CanvasEntry {
    type Raw = RawCanvas;

    fn empty(date: NaiveDate) -> Self {
        CanvasEntry::new(date)
    }

    fn hydrate(date: NaiveDate, raw: RawCanvas) -> Self {
        CanvasEntry::hydrate(date, raw)
    }

    fn serialize(&self) -> RawCanvas {
        CanvasEntry::serialize(self)
    }

    fn date(&self) -> NaiveDate {
        CanvasEntry::date(self)
    }

    fn is_blank(&self) -> bool {
        CanvasEntry::is_blank(self)
    }
}

impl Record for TodoList {
    type Raw = RawTodoList;

    fn empty(date: NaiveDate) -> Self {
        TodoList::new(date)
    }

    fn hydrate(date: NaiveDate, raw: RawTodoList) -> Self {
        TodoList::hydrate(date, raw)
    }

    fn serialize(&self) -> RawTodoList {
        TodoList::serialize(self)
    }

    fn date(&self) -> NaiveDate {
        TodoList::date(self)
    }

    fn is_blank(&self) -> bool {
        TodoList::is_empty(self)
    }
}
