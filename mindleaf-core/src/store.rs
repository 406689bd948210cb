//! Client-side view of one user's per-date records for one resource.

use crate::backend::{Backend, BackendError, date_key};
use crate::record::Record;
use crate::resource::Resource;
use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::Serialize;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicU64, Ordering};
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Backend(#[from] BackendError),

    #[error("stored entry for {date} is malformed: {source}")]
    Decode {
        date: NaiveDate,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not encode entry: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("{0} entry is empty, nothing to save")]
    EmptyEntry(Resource),

    /// The record was saved but the list of dates could not be reloaded.
    #[error("entry saved, but refreshing saved dates failed: {0}")]
    IndexRefresh(#[source] BackendError),
}

/// Dates with a saved record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryIndex {
    dates: BTreeSet<NaiveDate>,
}

impl EntryIndex {
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.dates.contains(&date)
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.dates.iter().rev().copied()
    }

    pub fn newest(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

impl FromIterator<NaiveDate> for EntryIndex {
    fn from_iter<I: IntoIterator<Item = NaiveDate>>(iter: I) -> Self {
        Self {
            dates: iter.into_iter().collect(),
        }
    }
}

/// Outcome of [`EntryStore::select`].
#[derive(Debug, Clone, PartialEq)]
pub enum Selected<R> {
    Current(R),
    /// A later `select` was issued while this one was in flight; the result
    /// must not be shown.
    Superseded { date: NaiveDate },
}

impl<R> Selected<R> {
    pub fn current(self) -> Option<R> {
        match self {
            Selected::Current(record) => Some(record),
            Selected::Superseded { .. } => None,
        }
    }
}

/// What goes over the wire on save: the record fields plus its owner and date.
#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    user_id: &'a str,
    date: String,
    #[serde(flatten)]
    record: T,
}

pub struct EntryStore<B> {
    backend: B,
    resource: Resource,
    user_id: String,
    latest: AtomicU64,
    index: RwLock<EntryIndex>,
}

impl<B: Backend> EntryStore<B> {
    pub fn new(backend: B, resource: Resource, user_id: impl Into<String>) -> Self {
        Self {
            backend,
            resource,
            user_id: user_id.into(),
            latest: AtomicU64::new(0),
            index: RwLock::new(EntryIndex::default()),
        }
    }

    pub fn resource(&self) -> Resource {
        self.resource
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    /// The stored record for `date`, or an empty one when nothing was saved.
    pub async fn load<R: Record>(&self, date: NaiveDate) -> Result<R, StoreError> {
        debug!("loading {} for {date}", self.resource);
        let Some(value) = self.backend.fetch(self.resource, &self.user_id, date).await? else {
            debug!("no {} saved for {date}", self.resource);
            return Ok(R::empty(date));
        };
        let raw: R::Raw =
            serde_json::from_value(value).map_err(|source| StoreError::Decode { date, source })?;
        Ok(R::hydrate(date, raw))
    }

    /// Like [`load`](Self::load), but only the most recently issued call
    /// yields its result. Earlier calls that finish later come back
    /// `Superseded`, errors included.
    pub async fn select<R: Record>(&self, date: NaiveDate) -> Result<Selected<R>, StoreError> {
        let ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
        let result = self.load(date).await;
        if self.latest.load(Ordering::SeqCst) != ticket {
            debug!("discarding stale {} load for {date}", self.resource);
            return Ok(Selected::Superseded { date });
        }
        result.map(Selected::Current)
    }

    /// Replaces whatever is stored at the record's date, then reloads the
    /// index from the backend.
    pub async fn save<R: Record>(&self, record: &R) -> Result<EntryIndex, StoreError> {
        let date = record.date();
        if self.resource.requires_text() && record.is_blank() {
            return Err(StoreError::EmptyEntry(self.resource));
        }

        let payload = serde_json::to_value(Envelope {
            user_id: &self.user_id,
            date: date_key(date),
            record: record.serialize(),
        })
        .map_err(StoreError::Encode)?;

        self.backend
            .put(self.resource, &self.user_id, date, payload)
            .await?;
        info!("saved {} for {date}", self.resource);

        self.refresh().await.map_err(|e| {
            warn!("index refresh after saving {date} failed: {e}");
            StoreError::IndexRefresh(e)
        })
    }

    /// Asks the backend for every date with a saved record.
    pub async fn list_dates(&self) -> Result<EntryIndex, StoreError> {
        Ok(self.refresh().await?)
    }

    /// The index as of the last successful listing.
    pub async fn index(&self) -> EntryIndex {
        self.index.read().await.clone()
    }

    async fn refresh(&self) -> Result<EntryIndex, BackendError> {
        let index: EntryIndex = self
            .backend
            .dates(self.resource, &self.user_id)
            .await?
            .into_iter()
            .collect();
        debug!("{} has {} saved dates", self.resource, index.len());
        *self.index.write().await = index.clone();
        Ok(index)
    }
}
