//
//  esclient
//  config/file.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Low-level configuration file I/O.
//!
//! These helpers only move text in and out of files; parsing and validation
//! live in [`Config`](super::Config).

use std::path::Path;

use anyhow::{Context, Result};

/// Reads a configuration file into a string.
///
/// # Errors
///
/// Fails if the file does not exist or cannot be read; the error names the
/// path.
pub fn read_config_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))
}

/// Writes configuration text, creating parent directories as needed.
///
/// Existing files are overwritten.
///
/// # Example
///
/// ```rust,no_run
/// use std::path::Path;
/// use esclient::config::write_config_file;
///
/// write_config_file(Path::new("/tmp/esc/config.toml"), "[client]\nnode = \"http://localhost:9200\"\n")?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn write_config_file(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config directory {}", parent.display()))?;
    }
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write config file {}", path.display()))
}

/// Returns `true` if a file exists at `path`.
pub fn config_exists(path: &Path) -> bool {
    path.is_file()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        assert!(!config_exists(&path));
        write_config_file(&path, "[client]\n").unwrap();
        assert!(config_exists(&path));
        assert_eq!(read_config_file(&path).unwrap(), "[client]\n");
    }

    #[test]
    fn test_read_missing_names_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.toml");
        let err = read_config_file(&path).unwrap_err();
        assert!(format!("{:#}", err).contains("absent.toml"));
    }
}
