//! Persistence collaborators: where entries are durably kept.

mod errors;
mod file;
mod http;
mod paths;

pub use errors::BackendError;
pub use file::FileBackend;
pub use http::HttpBackend;

use crate::resource::Resource;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use std::sync::Arc;

/// A durable per-user, per-date key-value store of JSON records.
///
/// Every call is a single request with no retries. Payloads passed to `put`
/// carry `user_id` and `date` alongside the record fields, and replace
/// whatever was stored before.
#[async_trait]
pub trait Backend: Send + Sync {
    /// The stored record, or `None` when nothing was saved for `date`.
    async fn fetch(
        &self,
        resource: Resource,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<Value>, BackendError>;

    async fn put(
        &self,
        resource: Resource,
        user_id: &str,
        date: NaiveDate,
        payload: Value,
    ) -> Result<(), BackendError>;

    /// Every date with a stored record, in any order.
    async fn dates(&self, resource: Resource, user_id: &str) -> Result<Vec<NaiveDate>, BackendError>;
}

#[async_trait]
impl<B: Backend + ?Sized> Backend for Arc<B> {
    async fn fetch(
        &self,
        resource: Resource,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<Value>, BackendError> {
        (**self).fetch(resource, user_id, date).await
    }

    async fn put(
        &self,
        resource: Resource,
        user_id: &str,
        date: NaiveDate,
        payload: Value,
    ) -> Result<(), BackendError> {
        (**self).put(resource, user_id, date, payload).await
    }

    async fn dates(&self, resource: Resource, user_id: &str) -> Result<Vec<NaiveDate>, BackendError> {
        (**self).dates(resource, user_id).await
    }
}

/// Parses the `YYYY-MM-DD` keys used on the wire and in file names.
pub(crate) fn parse_date_key(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_KEY_FORMAT).ok()
}

pub(crate) const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

pub(crate) fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}
