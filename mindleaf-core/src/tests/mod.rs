//! Shared test doubles.

use crate::backend::{Backend, BackendError};
use crate::resource::Resource;
use async_trait::async_trait;
use chrono::NaiveDate;
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

pub(crate) use crate::config::tests::mk_config;

type Key = (Resource, String, NaiveDate);

/// In-memory backend that behaves like the REST API, with knobs for slow
/// and failing requests.
#[derive(Default)]
pub struct MockBackend {
    records: Mutex<HashMap<Key, Value>>,
    delays: Mutex<HashMap<NaiveDate, Duration>>,
    failing: Mutex<HashSet<NaiveDate>>,
    offline: AtomicBool,
    dates_fail: AtomicBool,
    puts: AtomicUsize,
}

impl MockBackend {
    /// Makes every fetch for `date` take `delay`.
    pub fn delay(&self, date: NaiveDate, delay: Duration) {
        self.delays.lock().unwrap().insert(date, delay);
    }

    /// Makes every fetch for `date` fail with a transport error.
    pub fn fail_on(&self, date: NaiveDate) {
        self.failing.lock().unwrap().insert(date);
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub fn fail_dates(&self, fail: bool) {
        self.dates_fail.store(fail, Ordering::SeqCst);
    }

    pub fn insert(&self, resource: Resource, user_id: &str, date: NaiveDate, value: Value) {
        self.records
            .lock()
            .unwrap()
            .insert((resource, user_id.to_string(), date), value);
    }

    pub fn stored(&self, resource: Resource, user_id: &str, date: NaiveDate) -> Option<Value> {
        self.records
            .lock()
            .unwrap()
            .get(&(resource, user_id.to_string(), date))
            .cloned()
    }

    pub fn puts(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }

    fn check_online(&self) -> Result<(), BackendError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(BackendError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl Backend for MockBackend {
    async fn fetch(
        &self,
        resource: Resource,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<Value>, BackendError> {
        let delay = self.delays.lock().unwrap().get(&date).copied();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        self.check_online()?;
        if self.failing.lock().unwrap().contains(&date) {
            return Err(BackendError::Transport("connection reset".to_string()));
        }
        Ok(self.stored(resource, user_id, date))
    }

    async fn put(
        &self,
        resource: Resource,
        user_id: &str,
        date: NaiveDate,
        payload: Value,
    ) -> Result<(), BackendError> {
        self.check_online()?;
        self.puts.fetch_add(1, Ordering::SeqCst);
        let key = (resource, user_id.to_string(), date);
        let mut records = self.records.lock().unwrap();
        if resource.deletes_when_blank() && resource.is_blank_payload(&payload) {
            records.remove(&key);
        } else {
            records.insert(key, payload);
        }
        Ok(())
    }

    async fn dates(&self, resource: Resource, user_id: &str) -> Result<Vec<NaiveDate>, BackendError> {
        self.check_online()?;
        if self.dates_fail.load(Ordering::SeqCst) {
            return Err(BackendError::Status {
                status: 500,
                message: "internal error".to_string(),
            });
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .keys()
            .filter(|(r, u, _)| *r == resource && u == user_id)
            .map(|(_, _, date)| *date)
            .collect())
    }
}
