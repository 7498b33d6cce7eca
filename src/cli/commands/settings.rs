//! Config file commands.

use std::path::{Path, PathBuf};

use anyhow::bail;

use crate::config::{self, Config, ConfigError};

/// Write a default config file to `path` (or the standard location).
///
/// Refuses to replace an existing file unless `force` is set. Returns the
/// path written.
pub fn cmd_init_config(path: Option<&Path>, force: bool) -> anyhow::Result<PathBuf> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => config::config_path().ok_or(ConfigError::NoConfigDir)?,
    };

    if path.exists() && !force {
        bail!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        );
    }

    config::save_to(&Config::default(), &path)?;
    println!("✓ Wrote default config to {}", path.display());
    Ok(path)
}
