use super::paths::{day_dir, day_path, resource_root};
use super::{Backend, BackendError, parse_date_key};
use crate::resource::Resource;
use async_trait::async_trait;
use chrono::NaiveDate;
use log::{debug, error, info, warn};
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use uuid::Uuid;

/// Keeps records as JSON files under `<data_dir>/<user>/<resource>/YYYY/MM/`.
#[derive(Debug, Clone)]
pub struct FileBackend {
    data_dir: PathBuf,
}

impl FileBackend {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    async fn write_atomic(&self, path: &Path, contents: String) -> Result<(), BackendError> {
        let Some(dir) = path.parent() else {
            return Err(BackendError::Io(std::io::Error::other(format!(
                "no parent directory for {}",
                path.display()
            ))));
        };
        fs::create_dir_all(dir).await?;
        let tmp = dir.join(format!(".{}.tmp", Uuid::new_v4().simple()));
        fs::write(&tmp, contents).await?;
        if let Err(e) = fs::rename(&tmp, path).await {
            if let Err(cleanup) = fs::remove_file(&tmp).await {
                error!("failed to remove {}: {cleanup}", tmp.display());
            }
            return Err(e.into());
        }
        Ok(())
    }
}

async fn subdirs(dir: &Path) -> Result<Vec<PathBuf>, BackendError> {
    let mut out = Vec::new();
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(out),
        Err(e) => return Err(e.into()),
    };
    while let Some(entry) = entries.next_entry().await? {
        if entry.file_type().await?.is_dir() {
            out.push(entry.path());
        }
    }
    Ok(out)
}

#[async_trait]
impl Backend for FileBackend {
    async fn fetch(
        &self,
        resource: Resource,
        user_id: &str,
        date: NaiveDate,
    ) -> Result<Option<Value>, BackendError> {
        let root = resource_root(&self.data_dir, user_id, resource)?;
        let path = day_path(&root, date);
        let contents = match fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("no {resource} record at {}", path.display());
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };
        let value = serde_json::from_str(&contents)
            .map_err(|e| BackendError::Decode(format!("{}: {e}", path.display())))?;
        Ok(Some(value))
    }

    async fn put(
        &self,
        resource: Resource,
        user_id: &str,
        date: NaiveDate,
        payload: Value,
    ) -> Result<(), BackendError> {
        let root = resource_root(&self.data_dir, user_id, resource)?;
        let path = day_path(&root, date);

        if resource.deletes_when_blank() && resource.is_blank_payload(&payload) {
            match fs::remove_file(&path).await {
                Ok(()) => info!("deleted {}", path.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => return Err(e.into()),
            }
            return Ok(());
        }

        let contents = serde_json::to_string_pretty(&payload)
            .map_err(|e| BackendError::Decode(e.to_string()))?;
        self.write_atomic(&path, contents).await?;
        info!("saved {}", path.display());
        Ok(())
    }

    async fn dates(&self, resource: Resource, user_id: &str) -> Result<Vec<NaiveDate>, BackendError> {
        let root = resource_root(&self.data_dir, user_id, resource)?;
        let mut dates = Vec::new();
        for year in subdirs(&root).await? {
            for month in subdirs(&year).await? {
                let mut entries = fs::read_dir(&month).await?;
                while let Some(entry) = entries.next_entry().await? {
                    let path = entry.path();
                    if path.extension().and_then(|e| e.to_str()) != Some("json") {
                        continue;
                    }
                    let Some(date) = path
                        .file_stem()
                        .and_then(|s| s.to_str())
                        .and_then(parse_date_key)
                    else {
                        continue;
                    };
                    if day_dir(&root, date) != month {
                        warn!("{} is filed under the wrong month", path.display());
                    }
                    dates.push(date);
                }
            }
        }
        Ok(dates)
    }
}
