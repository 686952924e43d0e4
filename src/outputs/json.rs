//! JSON output for a digest.
//!
//! Files are organized by date, one file per employee:
//! ```text
//! json_output_dir/
//! └── 2025-05-06/
//!     └── kim-minji.json
//! ```

use crate::models::Digest;
use crate::utils::slugify;
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Write a [`Digest`] to `{json_output_dir}/{date}/{employee}.json`.
///
/// Creates the date directory when needed and returns the path written.
///
/// # Errors
///
/// Returns an error if serialization, directory creation or the write fails.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir))]
pub async fn write_digest(
    digest: &Digest,
    json_output_dir: &str,
) -> Result<String, Box<dyn Error>> {
    let json = serde_json::to_string_pretty(digest)?;

    let full_json_dir = format!(
        "{}/{}",
        json_output_dir.trim_end_matches('/'),
        digest.local_date
    );
    info!(%full_json_dir, "Ensuring JSON directory exists");
    if let Err(e) = fs::create_dir_all(&full_json_dir).await {
        error!(%full_json_dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let output_json_filename = format!("{}/{}.json", full_json_dir, slugify(&digest.employee_name));
    fs::write(&output_json_filename, json).await?;
    info!(path = %output_json_filename, items = digest.items.len(), "Wrote digest JSON");

    Ok(output_json_filename)
}
