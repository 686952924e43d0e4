//! Markdown rendering for a digest.
//!
//! Items are grouped under one heading per category, in the order the
//! categories first appear.

use crate::models::{Digest, NewsItem};
use crate::utils::slugify;
use std::error::Error;
use tokio::fs;
use tracing::{info, instrument};

/// Render a [`Digest`] as a Markdown document.
pub fn digest_to_markdown(digest: &Digest) -> String {
    let mut md = format!(
        "# Daily News for {}\n\n_{} {}_\n",
        digest.employee_name, digest.local_date, digest.local_time
    );

    let mut categories: Vec<(&str, Vec<&NewsItem>)> = Vec::new();
    for item in &digest.items {
        match categories.iter_mut().find(|(c, _)| *c == item.category) {
            Some((_, items)) => items.push(item),
            None => categories.push((item.category.as_str(), vec![item])),
        }
    }

    for (category, items) in categories {
        let heading = if category.is_empty() { "General" } else { category };
        md.push_str(&format!("\n## {heading}\n"));
        for item in items {
            md.push_str(&item_to_markdown(item));
        }
    }

    md
}

fn item_to_markdown(item: &NewsItem) -> String {
    let mut md = String::from("\n");
    match (item.title.is_empty(), item.url.is_empty()) {
        (false, false) => md.push_str(&format!("### [{}]({})\n", item.title, item.url)),
        (false, true) => md.push_str(&format!("### {}\n", item.title)),
        (true, _) => {}
    }
    if !item.date.is_empty() {
        md.push_str(&format!("*{}*\n", item.date.trim()));
    }
    if !item.summary.is_empty() {
        md.push_str(&format!("\n{}\n", item.summary));
    }
    if item.title.is_empty() && !item.url.is_empty() {
        md.push_str(&format!("\n[Read more]({})\n", item.url));
    }
    md
}

/// Write the rendered digest to `{markdown_output_dir}/{date}_{employee}.md`.
///
/// # Errors
///
/// Returns an error if the file cannot be written.
#[instrument(level = "info", skip_all, fields(markdown_output_dir = %markdown_output_dir))]
pub async fn write_digest(
    digest: &Digest,
    markdown_output_dir: &str,
) -> Result<String, Box<dyn Error>> {
    let path = format!(
        "{}/{}_{}.md",
        markdown_output_dir.trim_end_matches('/'),
        digest.local_date,
        slugify(&digest.employee_name)
    );
    fs::write(&path, digest_to_markdown(digest)).await?;
    info!(%path, "Wrote digest Markdown");
    Ok(path)
}
