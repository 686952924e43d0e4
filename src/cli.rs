//! Command-line interface definitions for Daily News.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Most options can also be provided via environment variables, and the
//! connection settings can fall back to a YAML config file.

use clap::Parser;

/// Command-line arguments for the Daily News application.
///
/// # Examples
///
/// ```sh
/// # Fetch and print today's digest
/// daily_news -e "Kim Minji" --base-url https://chat.example.com
///
/// # Skip the fetch if the digest was already seen today
/// daily_news -e "Kim Minji" --last-active-at 1746489600
///
/// # Write JSON and Markdown files instead of printing
/// daily_news -e "Kim Minji" -j ./json -m ./markdown
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Employee whose digest should be fetched
    #[arg(short, long, env = "DAILY_NEWS_EMPLOYEE")]
    pub employee_name: String,

    /// Origin that relative endpoints are resolved against
    #[arg(long, env = "DAILY_NEWS_BASE_URL")]
    pub base_url: Option<String>,

    /// News proxy endpoint, as a path or an absolute URL
    #[arg(long)]
    pub endpoint: Option<String>,

    /// Bearer token; takes precedence over --token-store
    #[arg(long, env = "DAILY_NEWS_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// JSON key-value file to read the bearer token from
    #[arg(long)]
    pub token_store: Option<String>,

    /// When the employee was last active, in seconds since the Unix epoch
    #[arg(long, allow_negative_numbers = true)]
    pub last_active_at: Option<i64>,

    /// Fetch even if the digest was already shown today
    #[arg(long)]
    pub force: bool,

    /// Output directory for the JSON file
    #[arg(short, long)]
    pub json_output_dir: Option<String>,

    /// Output directory for the Markdown file
    #[arg(short, long)]
    pub markdown_output_dir: Option<String>,

    /// Optional path to config.yaml file
    #[arg(short, long)]
    pub config: Option<String>,
}

impl Cli {
    /// Whether the digest should be printed rather than written to files.
    pub fn prints_to_stdout(&self) -> bool {
        self.json_output_dir.is_none() && self.markdown_output_dir.is_none()
    }
}
