//! # Daily News
//!
//! Fetch a per-employee daily news digest from the application's news proxy,
//! normalize the loosely-typed response into display-ready items, and decide
//! whether the digest is due again.
//!
//! ## Pieces
//!
//! - [`visibility`]: has the digest already been shown today?
//! - [`fetch`]: one `POST` to the proxy, with an optional bearer token
//! - [`parse`]: untyped payload in, cleaned [`NewsItem`]s out
//! - [`token_store`]: read-only access to wherever the token lives
//! - [`outputs`]: JSON and Markdown writers used by the binary
//!
//! ## Example
//!
//! ```no_run
//! use daily_news::{FileStore, NewsClient};
//! use std::sync::Arc;
//! use url::Url;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let base = Url::parse("https://chat.example.com")?;
//! let client = NewsClient::new(Some(base), Arc::new(FileStore::new("storage.json")))?;
//! for item in client.get_daily_news_items("Kim Minji", None).await? {
//!     println!("[{}] {}", item.category, item.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod fetch;
pub mod models;
pub mod outputs;
pub mod parse;
pub mod token_store;
pub mod utils;
pub mod visibility;

pub use error::NewsError;
pub use fetch::{NewsClient, NEWS_PROXY_ENDPOINT, TOKEN_KEY};
pub use models::{Digest, NewsArticle, NewsItem, NewsResponse};
pub use parse::parse_daily_news;
pub use token_store::{FileStore, MemoryStore, TokenStore, UnavailableStore};
pub use visibility::should_show_daily_news;
