//! Data models for the daily news digest.
//!
//! This module defines the core data structures used throughout the crate:
//! - [`NewsResponse`]: The untyped payload returned by the news proxy
//! - [`NewsArticle`]: A lenient view over one raw article record
//! - [`NewsItem`]: A cleaned, display-ready item
//! - [`Digest`]: The set of items shown to one employee on one day
//!
//! The proxy payload is untrusted, so it stays a [`serde_json::Value`] until
//! the parser has checked its shape. Nothing here is persisted.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The raw payload returned by the news proxy.
///
/// Expected to be an object mapping category names to arrays of article
/// records, but no structure is guaranteed. Key order is kept as received.
pub type NewsResponse = Value;

/// A raw news article as delivered by the proxy.
///
/// Every field is optional. Only string values are accepted; anything else
/// is treated as absent, except `date`, where numbers and booleans are kept
/// as their JSON text.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct NewsArticle {
    pub title: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    pub link: Option<String>,
    pub originallink: Option<String>,
}

impl NewsArticle {
    /// Build an article from an arbitrary JSON value.
    ///
    /// Non-object values yield an article with every field absent.
    pub fn from_value(value: &Value) -> Self {
        let text = |key: &str| value.get(key).and_then(Value::as_str).map(str::to_owned);

        let date = value.get("date").and_then(|d| match d {
            Value::String(s) => Some(s.clone()),
            Value::Number(_) | Value::Bool(_) => Some(d.to_string()),
            _ => None,
        });

        Self {
            title: text("title"),
            date,
            description: text("description"),
            url: text("url"),
            link: text("link"),
            originallink: text("originallink"),
        }
    }

    /// The first non-empty link among `url`, `link` and `originallink`.
    pub fn first_link(&self) -> Option<&str> {
        [&self.url, &self.link, &self.originallink]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .find(|s| !s.is_empty())
    }
}

/// A display-ready news item.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewsItem {
    /// The category key the article was listed under.
    pub category: String,
    /// Title with markup removed and surrounding whitespace trimmed.
    pub title: String,
    /// Publication date, passed through verbatim.
    pub date: String,
    /// Description with markup removed and whitespace collapsed.
    pub summary: String,
    /// Link to the full article, empty when the article carried none.
    pub url: String,
}

impl NewsItem {
    /// An item is displayable when it has a title or a summary.
    pub fn is_displayable(&self) -> bool {
        !self.title.is_empty() || !self.summary.is_empty()
    }
}

/// One employee's digest for one day.
///
/// Produced by the CLI after a successful fetch and handed to the writers in
/// [`crate::outputs`].
#[derive(Debug, Deserialize, Serialize)]
pub struct Digest {
    /// The employee the digest was requested for.
    pub employee_name: String,
    /// The local date of the fetch in `YYYY-MM-DD` format.
    pub local_date: String,
    /// The local time of the fetch.
    pub local_time: String,
    /// The parsed items, in payload order.
    pub items: Vec<NewsItem>,
}
