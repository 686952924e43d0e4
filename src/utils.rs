//! Utility functions for naming and file system checks.
//!
//! This module provides helper functions used by the binary and the output
//! writers:
//! - Slugification of employee names for file names
//! - Local date and time stamps for digests
//! - File system validation for output directories

use chrono::Local;
use std::error::Error;
use std::fs as stdfs;
use tokio::fs;
use tracing::{info, instrument};

/// Convert a name to a file-name-friendly slug.
///
/// Lowercases the text, removes everything but alphanumerics, spaces and
/// hyphens, then replaces spaces with hyphens. Non-ASCII letters are kept.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(slugify("Kim Minji"), "kim-minji");
/// assert_eq!(slugify("O'Brien, Pat"), "obrien-pat");
/// ```
pub fn slugify(name: &str) -> String {
    let slug = name
        .trim()
        .to_lowercase()
        .replace(|c: char| !c.is_alphanumeric() && c != ' ' && c != '-', "")
        .replace(' ', "-");
    if slug.is_empty() {
        "anonymous".to_string()
    } else {
        slug
    }
}

/// Current local date (`YYYY-MM-DD`) and time.
pub fn local_stamp() -> (String, String) {
    let now = Local::now();
    (now.date_naive().to_string(), now.time().format("%H:%M:%S").to_string())
}

/// Ensure a directory exists and is writable.
///
/// Creates the directory if it doesn't exist, then creates and immediately
/// deletes a probe file.
///
/// # Errors
///
/// Returns an error if:
/// - The directory cannot be created
/// - The directory is not writable (permission denied, read-only filesystem, etc.)
#[instrument(level = "info", skip_all, fields(path = %path))]
pub async fn ensure_writable_dir(path: &str) -> Result<(), Box<dyn Error>> {
    fs::create_dir_all(path).await?;
    let probe_path = format!("{}/..__probe_write__", path.trim_end_matches('/'));
    stdfs::File::create(&probe_path)?;
    let _ = stdfs::remove_file(&probe_path);
    info!("Output directory is writable");
    Ok(())
}
