use anyhow::{Context, Result};
use directories::BaseDirs;
use log::warn;
use serde::Deserialize;
use std::{collections::HashMap, fs, path::PathBuf};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::dates::is_valid_format;
use crate::keywords::Keywords;

pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_USER_ID: &str = "default";
pub const DEFAULT_DATE_FORMAT: &str = "%A, %d %b %Y";

/// Where entries are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, AsRefStr, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum BackendKind {
    /// The MindLeaf REST API at `api_url`.
    #[default]
    Http,
    /// JSON files under `data_dir`.
    File,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendKind,
    pub api_url: String,
    /// Root for the file backend and the saved sign-in session.
    pub data_dir: PathBuf,
    /// Whose entries to read and write when nobody is signed in.
    pub user_id: String,
    /// Preferred editor. Optional; the CLI falls back to $VISUAL/$EDITOR.
    pub editor: Option<String>,
    pub date_format: String,
    pub input_date_formats: Vec<String>,
    pub firebase_api_key: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    backend: Option<BackendKind>,
    api_url: Option<String>,
    data_dir: Option<PathBuf>,
    user_id: Option<String>,
    editor: Option<String>,
    date_format: Option<String>,
    input_date_formats: Option<Vec<String>>,
    firebase_api_key: Option<String>,
    /// Optional table:
    /// [synonyms]
    /// ayer = "yesterday"
    synonyms: Option<HashMap<String, String>>,
}

impl Config {
    /// Loads the first config file found, applies defaults, and registers
    /// `[synonyms]` with the keyword table. A broken file is reported and
    /// ignored.
    pub fn load() -> Result<Self> {
        let file_config = Self::read_file_config().unwrap_or_else(|e| {
            warn!("ignoring config: {e:#}");
            FileConfig::default()
        });
        Ok(Self::from_file_config(file_config))
    }

    fn from_file_config(file_config: FileConfig) -> Self {
        Self::load_synonyms(&file_config.synonyms);

        Self {
            backend: file_config.backend.unwrap_or_default(),
            api_url: file_config
                .api_url
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            data_dir: file_config.data_dir.unwrap_or_else(Self::default_data_dir),
            user_id: file_config
                .user_id
                .filter(|u| !u.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_USER_ID.to_string()),
            editor: file_config.editor,
            date_format: file_config
                .date_format
                .filter(|fmt| {
                    let valid = is_valid_format(fmt);
                    if !valid {
                        warn!("ignoring date_format '{fmt}': not a valid strftime format");
                    }
                    valid
                })
                .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string()),
            input_date_formats: file_config
                .input_date_formats
                .unwrap_or_else(|| vec!["%Y-%m-%d".to_string()]),
            firebase_api_key: file_config.firebase_api_key.filter(|k| !k.is_empty()),
        }
    }

    /// Default data root: `{data_dir}/mindleaf`
    /// - macOS:   `~/Library/Application Support/mindleaf`
    /// - Linux:   `$XDG_DATA_HOME/mindleaf` or `~/.local/share/mindleaf`
    /// - Windows: `%APPDATA%\mindleaf`
    fn default_data_dir() -> PathBuf {
        match BaseDirs::new() {
            Some(base) => base.data_dir().join("mindleaf"),
            None => PathBuf::from("./mindleaf"),
        }
    }

    fn config_file_paths() -> Vec<PathBuf> {
        let mut v = Vec::new();
        if let Some(b) = BaseDirs::new() {
            v.push(b.home_dir().join(".config").join("mindleaf").join("config.toml"));
            v.push(b.config_dir().join("mindleaf").join("config.toml"));
        }
        v
    }

    fn read_file_config() -> Result<FileConfig> {
        for path in Self::config_file_paths() {
            if !path.exists() {
                continue;
            }
            let s =
                fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
            return Self::parse_file(&s).with_context(|| format!("parsing {}", path.display()));
        }
        Ok(FileConfig::default())
    }

    fn parse_file(s: &str) -> Result<FileConfig> {
        Ok(toml::from_str::<FileConfig>(s)?)
    }

    /// Canonical words ("today") cannot be redefined.
    fn load_synonyms(synonyms: &Option<HashMap<String, String>>) {
        let Some(map) = synonyms else { return };
        let pairs: Vec<(String, String)> = map
            .iter()
            .filter(|(alias, _)| !Keywords::is_canonical(alias))
            .map(|(a, t)| (a.clone(), t.clone()))
            .collect();
        if !pairs.is_empty() {
            Keywords::extend(&pairs);
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::keywords::{Keyword, Keywords};
    use pretty_assertions::assert_eq;
    use std::path::Path;

    /// Single source of truth for test configuration.
    pub(crate) fn mk_config(data_dir: PathBuf) -> Config {
        Config {
            backend: BackendKind::File,
            api_url: DEFAULT_API_URL.to_string(),
            data_dir,
            user_id: DEFAULT_USER_ID.to_string(),
            editor: None,
            date_format: DEFAULT_DATE_FORMAT.to_string(),
            input_date_formats: vec!["%Y-%m-%d".to_string()],
            firebase_api_key: None,
        }
    }

    #[test]
    fn candidates_prioritize_xdg_then_native() {
        if let Some(b) = BaseDirs::new() {
            let c = Config::config_file_paths();
            assert_eq!(
                c.first(),
                Some(&b.home_dir().join(".config").join("mindleaf").join("config.toml"))
            );
            assert_eq!(c.get(1), Some(&b.config_dir().join("mindleaf").join("config.toml")));
        }
    }

    #[test]
    fn empty_file_gets_defaults() {
        let config = Config::from_file_config(Config::parse_file("").unwrap());
        assert_eq!(config.backend, BackendKind::Http);
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert_eq!(config.user_id, "default");
        assert_eq!(config.date_format, "%A, %d %b %Y");
        assert_eq!(config.input_date_formats, vec!["%Y-%m-%d".to_string()]);
        assert!(config.firebase_api_key.is_none());
    }

    #[test]
    fn parse_file_accepts_file_backend() {
        let toml = r#"
            backend = "file"
            data_dir = "/tmp/leaves"
            user_id = "alice"
            editor = "hx"
            input_date_formats = ["%d/%m/%Y"]
        "#;
        let config = Config::from_file_config(Config::parse_file(toml).unwrap());
        assert_eq!(config.backend, BackendKind::File);
        assert_eq!(config.data_dir, Path::new("/tmp/leaves"));
        assert_eq!(config.user_id, "alice");
        assert_eq!(config.editor.as_deref(), Some("hx"));
        assert_eq!(config.input_date_formats, vec!["%d/%m/%Y".to_string()]);
    }

    #[test]
    fn bad_date_format_falls_back_to_default() {
        let config = Config::from_file_config(Config::parse_file(r#"date_format = "%Q %d""#).unwrap());
        assert_eq!(config.date_format, DEFAULT_DATE_FORMAT);
        let config = Config::from_file_config(Config::parse_file(r#"date_format = "%d/%m""#).unwrap());
        assert_eq!(config.date_format, "%d/%m");
    }

    #[test]
    fn unknown_backend_is_a_parse_error() {
        assert!(Config::parse_file(r#"backend = "ftp""#).is_err());
    }

    #[test]
    fn synonyms_extend_registry_but_not_canonicals() {
        let toml = r#"
            [synonyms]
            ayer = "yesterday"
            today = "yesterday"
        "#;
        Config::from_file_config(Config::parse_file(toml).unwrap());
        assert!(Keywords::matches(Keyword::Yesterday, "ayer"));
        assert!(!Keywords::matches(Keyword::Yesterday, "today"));
    }

    #[test]
    fn mk_config_uses_given_dir() {
        let cfg = mk_config(PathBuf::from("/tmp/x"));
        assert_eq!(cfg.data_dir, Path::new("/tmp/x"));
    }
}
