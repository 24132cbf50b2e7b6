//! Session configuration stored as TOML.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use maze_core::MazeConfig;

/// Load config from a TOML file.
///
/// If the file is missing, returns `MazeConfig::default()`.
pub fn load_config(path: &Path) -> Result<MazeConfig> {
    if !path.exists() {
        let config = MazeConfig::default();
        config.validate()?;
        return Ok(config);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let config: MazeConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    config.validate().with_context(|| format!("validate {}", path.display()))?;
    Ok(config)
}

/// Atomically write config to disk (temp file + rename).
pub fn write_config(path: &Path, config: &MazeConfig) -> Result<()> {
    config.validate()?;
    let mut buf = toml::to_string_pretty(config).context("serialize config toml")?;
    buf.push('\n');
    write_atomic(path, &buf)
}

fn write_atomic(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let tmp_path = path.with_extension("toml.tmp");
    fs::write(&tmp_path, contents)
        .with_context(|| format!("write temp config {}", tmp_path.display()))?;
    fs::rename(&tmp_path, path).with_context(|| format!("replace config {}", path.display()))?;
    Ok(())
}
