use anyhow::{Context, Result};
use std::{fs, path::Path, process::Command};

pub fn resolve_editor(editor: Option<&str>) -> String {
    editor
        .map(str::to_string)
        .or_else(|| std::env::var("VISUAL").ok())
        .or_else(|| std::env::var("EDITOR").ok())
        .unwrap_or_else(|| "vim".into())
}

/// Opens `initial` in the editor and returns what was saved.
pub fn edit_in_editor(editor_cmd: &str, initial: &str) -> Result<String> {
    let file = tempfile::Builder::new()
        .prefix("mindleaf")
        .suffix(".txt")
        .tempfile()?;
    fs::write(file.path(), initial)?;

    open_file_in_editor(editor_cmd, file.path())?;
    fs::read_to_string(file.path()).with_context(|| format!("reading {}", file.path().display()))
}

fn open_file_in_editor(editor_cmd: &str, path: &Path) -> Result<()> {
    let status = Command::new(editor_cmd)
        .arg(path)
        .status()
        .with_context(|| format!("launching editor '{editor_cmd}'"))?;
    if !status.success() {
        anyhow::bail!("Editor exited with status {}", status);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn configured_editor_wins() {
        assert_eq!(resolve_editor(Some("hx")), "hx");
    }

    #[test]
    fn failing_editor_is_an_error() {
        assert!(edit_in_editor("false", "draft").is_err());
    }

    #[test]
    fn untouched_buffer_keeps_initial_text() {
        assert_eq!(edit_in_editor("true", "draft").unwrap(), "draft");
    }
}
