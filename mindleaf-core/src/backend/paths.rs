use super::{BackendError, date_key};
use crate::resource::Resource;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

pub fn day_file_name(date: NaiveDate) -> String {
    format!("{}.json", date_key(date))
}

/// `<data_dir>/<user>/<resource>`, refusing user ids that would escape it.
pub fn resource_root(data_dir: &Path, user_id: &str, resource: Resource) -> Result<PathBuf, BackendError> {
    let valid = !user_id.is_empty()
        && user_id != "."
        && user_id != ".."
        && !user_id.contains(['/', '\\', '\0']);
    if !valid {
        return Err(BackendError::InvalidUser(user_id.to_string()));
    }
    Ok(data_dir.join(user_id).join(resource.path()))
}

pub fn day_dir(root: &Path, date: NaiveDate) -> PathBuf {
    root.join(date.format("%Y").to_string())
        .join(date.format("%m").to_string())
}

pub fn day_path(root: &Path, date: NaiveDate) -> PathBuf {
    day_dir(root, date).join(day_file_name(date))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn day_path_layout() {
        let root = resource_root(Path::new("/data"), "alice", Resource::Gratitude).unwrap();
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        assert_eq!(
            day_path(&root, date),
            PathBuf::from("/data/alice/gratitude/2024/03/2024-03-01.json")
        );
    }

    #[test]
    fn rejects_escaping_user_ids() {
        for bad in ["", "..", "a/b", "a\\b"] {
            assert!(matches!(
                resource_root(Path::new("/data"), bad, Resource::Journal),
                Err(BackendError::InvalidUser(_))
            ));
        }
    }
}
