//! # Daily News
//!
//! Command-line front end for the `daily_news` library: checks whether the
//! digest is due, fetches it from the news proxy, and prints or writes it.
//!
//! ## Usage
//!
//! ```sh
//! daily_news -e "Kim Minji" --base-url https://chat.example.com
//! ```
//!
//! ## Flow
//!
//! 1. **Gate**: Skip everything if the digest was already shown today
//! 2. **Fetching**: `POST` the employee name to the proxy
//! 3. **Parsing**: Clean and flatten the payload into items
//! 4. **Output**: Print Markdown, or write JSON and Markdown files

use clap::Parser;
use daily_news::cli::Cli;
use daily_news::config::{load_config, Config};
use daily_news::outputs::{json, markdown};
use daily_news::token_store::{FileStore, MemoryStore, TokenStore, UnavailableStore};
use daily_news::utils::{ensure_writable_dir, local_stamp};
use daily_news::{should_show_daily_news, Digest, NewsClient, TOKEN_KEY};
use std::error::Error;
use std::sync::Arc;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};
use url::Url;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .with_writer(std::io::stderr)
        .init();

    let start_time = std::time::Instant::now();
    info!("daily_news starting up");

    let args = Cli::parse();
    debug!(employee = %args.employee_name, ?args.last_active_at, force = args.force, "Parsed CLI arguments");

    if !args.force && !should_show_daily_news(args.last_active_at) {
        info!(last_active_at = ?args.last_active_at, "Digest already shown today; nothing to do");
        return Ok(());
    }

    let config = match args.config.as_deref() {
        Some(path) => load_config(path).await?,
        None => Config::default(),
    };

    // Early check: ensure output dirs are writable
    for dir in [&args.json_output_dir, &args.markdown_output_dir].into_iter().flatten() {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(path = %dir, error = %e, "Output directory is not writable");
            return Err(e);
        }
    }

    // ---- Client ----
    let base_url = args
        .base_url
        .as_deref()
        .or(config.base_url.as_deref())
        .map(Url::parse)
        .transpose()?;
    let endpoint = args.endpoint.as_deref().or(config.endpoint.as_deref());

    let token_path = args.token_store.as_ref().or(config.token_store.as_ref());
    let token_store: Arc<dyn TokenStore> = match (&args.token, token_path) {
        (Some(token), _) => Arc::new(MemoryStore::with_item(TOKEN_KEY, token.clone())),
        (None, Some(path)) => Arc::new(FileStore::new(path)),
        (None, None) => Arc::new(UnavailableStore),
    };

    let http = reqwest::Client::builder()
        .cookie_store(true)
        .timeout(config.timeout())
        .build()?;
    let client = NewsClient::with_client(http, base_url, token_store);
    info!(?client, ?endpoint, timeout = ?config.timeout(), "News client ready");

    // ---- Fetch & parse ----
    let items = match client.get_daily_news_items(&args.employee_name, endpoint).await {
        Ok(items) => items,
        Err(e) => {
            error!(error = %e, "Failed to load daily news");
            return Err(e.into());
        }
    };

    let (local_date, local_time) = local_stamp();
    let digest = Digest {
        employee_name: args.employee_name.clone(),
        local_date,
        local_time,
        items,
    };
    info!(items = digest.items.len(), local_date = %digest.local_date, "Digest assembled");

    // ---- Output ----
    if args.prints_to_stdout() {
        print!("{}", markdown::digest_to_markdown(&digest));
    }

    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = json::write_digest(&digest, dir).await {
            error!(error = %e, "Failed to write digest JSON");
            return Err(e);
        }
    }

    if let Some(dir) = &args.markdown_output_dir {
        if let Err(e) = markdown::write_digest(&digest, dir).await {
            error!(error = %e, "Failed to write digest Markdown");
            return Err(e);
        }
    }

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
