//! Turn the proxy payload into display-ready [`NewsItem`]s.
//!
//! The payload is untrusted. Its top level must be a keyed structure (an
//! object, or an array keyed by index); everything below that is coalesced
//! field by field and anything unusable is skipped.
//!
//! Markup removal is a plain `<...>` regex. It has no notion of tag structure
//! and does not decode entities, so `&amp;` stays `&amp;`.

use crate::error::NewsError;
use crate::models::{NewsArticle, NewsItem, NewsResponse};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;
use tracing::{debug, instrument};

static HTML_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]+>").unwrap());
static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\s\x{FEFF}]+").unwrap());

/// Remove every `<...>` span from `value`.
pub fn strip_html_tags(value: &str) -> String {
    HTML_TAG.replace_all(value, "").into_owned()
}

/// Collapse each run of whitespace to a single space.
///
/// A byte order mark counts as whitespace here and in [`trim_whitespace`].
pub fn collapse_whitespace(value: &str) -> String {
    WHITESPACE_RUN.replace_all(value, " ").into_owned()
}

/// Trim whitespace, including byte order marks, from both ends.
pub fn trim_whitespace(value: &str) -> &str {
    value.trim_matches(|c: char| c.is_whitespace() || c == '\u{FEFF}')
}

/// Clean one raw article into an item tagged with `category`.
///
/// Returns `None` when neither a title nor a summary survives cleanup.
pub fn clean_article(category: &str, article: &NewsArticle) -> Option<NewsItem> {
    let raw_title = article.title.as_deref().unwrap_or_default();
    let raw_description = article.description.as_deref().unwrap_or_default();

    let item = NewsItem {
        category: category.to_string(),
        title: trim_whitespace(&strip_html_tags(raw_title)).to_string(),
        date: article.date.clone().unwrap_or_default(),
        summary: trim_whitespace(&collapse_whitespace(&strip_html_tags(raw_description)))
            .to_string(),
        url: article.first_link().unwrap_or_default().to_string(),
    };

    item.is_displayable().then_some(item)
}

/// Parse `key` as an array index: canonical decimal, below `u32::MAX`.
fn array_index(key: &str) -> Option<u32> {
    let index: u32 = key.parse().ok()?;
    (index != u32::MAX && index.to_string() == key).then_some(index)
}

/// The `(category, articles)` entries of a payload, in visiting order.
///
/// Object keys that look like array indices come first in ascending order,
/// then the remaining keys in payload order. Arrays are keyed by index.
/// Returns `None` for anything that is not a keyed structure.
fn category_entries(payload: &NewsResponse) -> Option<Vec<(String, &Value)>> {
    match payload {
        Value::Object(map) => {
            let (mut entries, named): (Vec<_>, Vec<_>) = map
                .iter()
                .map(|(key, value)| (key.clone(), value))
                .partition(|(key, _)| array_index(key).is_some());
            entries.sort_by_key(|(key, _)| array_index(key));
            entries.extend(named);
            Some(entries)
        }
        Value::Array(list) => Some(
            list.iter()
                .enumerate()
                .map(|(i, value)| (i.to_string(), value))
                .collect(),
        ),
        _ => None,
    }
}

/// Flatten a proxy payload into a list of items.
///
/// Categories are visited in key order (index-like keys first, then payload
/// order), articles in array order. Categories whose value is not an array,
/// or is an empty array, are skipped.
///
/// # Errors
///
/// - [`NewsError::InvalidPayload`] when `payload` is not an object or array
/// - [`NewsError::NoNewsItems`] when no article yields a title or summary
#[instrument(level = "debug", skip_all)]
pub fn parse_daily_news(payload: &NewsResponse) -> Result<Vec<NewsItem>, NewsError> {
    let Some(categories) = category_entries(payload) else {
        return Err(NewsError::InvalidPayload);
    };

    let items: Vec<NewsItem> = categories
        .iter()
        .filter_map(|(category, articles)| match articles {
            Value::Array(list) if !list.is_empty() => Some((category, list)),
            _ => None,
        })
        .flat_map(|(category, list)| {
            list.iter().filter_map(move |raw| {
                clean_article(category, &NewsArticle::from_value(raw))
            })
        })
        .collect();

    debug!(
        categories = categories.len(),
        items = items.len(),
        "Parsed daily news payload"
    );

    if items.is_empty() {
        return Err(NewsError::NoNewsItems);
    }

    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn item(category: &str, title: &str, date: &str, summary: &str, url: &str) -> NewsItem {
        NewsItem {
            category: category.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            summary: summary.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_strip_html_tags() {
        assert_eq!(strip_html_tags("<b>Hello</b>"), "Hello");
        assert_eq!(strip_html_tags("a <br/> b"), "a  b");
        assert_eq!(strip_html_tags("Tom &amp; Jerry"), "Tom &amp; Jerry");
        assert_eq!(strip_html_tags("1 < 2"), "1 < 2");
        assert_eq!(strip_html_tags("<>"), "<>");
    }

    #[test]
    fn test_collapse_whitespace() {
        assert_eq!(collapse_whitespace("a  \n\t b"), "a b");
        assert_eq!(collapse_whitespace("  lead"), " lead");
        assert_eq!(collapse_whitespace("a\u{FEFF} b"), "a b");
    }

    #[test]
    fn test_trim_whitespace_includes_bom() {
        assert_eq!(trim_whitespace("\u{FEFF} Hello \n"), "Hello");
        assert_eq!(trim_whitespace("\u{FEFF}"), "");
        assert_eq!(trim_whitespace("a\u{FEFF}b"), "a\u{FEFF}b");
    }

    #[test]
    fn test_bom_only_article_is_dropped() {
        let payload = json!({
            "T": [
                { "title": "\u{FEFF}", "description": "<p>\u{FEFF}</p>" },
                { "title": "\u{FEFF}Real\u{FEFF}" }
            ]
        });

        let items = parse_daily_news(&payload).unwrap();
        assert_eq!(items, vec![item("T", "Real", "", "", "")]);
    }

    #[test]
    fn test_array_payload_is_keyed_by_index() {
        let items = parse_daily_news(&json!([[{ "title": "x" }]])).unwrap();
        assert_eq!(items, vec![item("0", "x", "", "", "")]);

        let items = parse_daily_news(&json!([[], "skip", [{ "title": "y" }]])).unwrap();
        assert_eq!(items, vec![item("2", "y", "", "", "")]);
    }

    #[test]
    fn test_array_of_articles_is_no_news_items() {
        let err = parse_daily_news(&json!([{ "title": "A" }])).unwrap_err();
        assert!(matches!(err, NewsError::NoNewsItems));
    }

    #[test]
    fn test_index_like_keys_come_first() {
        let payload = json!({
            "b": [{ "title": "b" }],
            "10": [{ "title": "ten" }],
            "01": [{ "title": "leading zero" }],
            "1": [{ "title": "one" }],
            "a": [{ "title": "a" }]
        });

        let categories: Vec<String> = parse_daily_news(&payload)
            .unwrap()
            .into_iter()
            .map(|i| i.category)
            .collect();

        assert_eq!(categories, vec!["1", "10", "b", "01", "a"]);
    }

    #[test]
    fn test_array_index() {
        assert_eq!(array_index("0"), Some(0));
        assert_eq!(array_index("42"), Some(42));
        assert_eq!(array_index("01"), None);
        assert_eq!(array_index("+1"), None);
        assert_eq!(array_index("-1"), None);
        assert_eq!(array_index("4294967295"), None);
        assert_eq!(array_index("Tech"), None);
    }

    #[test]
    fn test_cleans_title_and_description() {
        let payload = json!({
            "World": [{ "title": "<b>Hello</b>", "description": "<p>World   now</p>" }]
        });

        let items = parse_daily_news(&payload).unwrap();
        assert_eq!(items, vec![item("World", "Hello", "", "World now", "")]);
    }

    #[test]
    fn test_link_fallback_and_empty_category() {
        let payload = json!({
            "Tech": [{ "title": "A", "link": "http://x" }],
            "Sports": []
        });

        let items = parse_daily_news(&payload).unwrap();
        assert_eq!(items, vec![item("Tech", "A", "", "", "http://x")]);
    }

    #[test]
    fn test_drops_articles_without_title_or_summary() {
        let payload = json!({
            "Tech": [
                { "title": "", "description": "" },
                { "title": "<i></i>", "description": "   " },
                { "date": "2025-05-06", "url": "http://only-link" },
                { "title": "Kept" }
            ]
        });

        let items = parse_daily_news(&payload).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Kept");
    }

    #[test]
    fn test_summary_only_item_is_kept() {
        let payload = json!({ "Biz": [{ "description": "Markets rose" }] });
        let items = parse_daily_news(&payload).unwrap();
        assert_eq!(items, vec![item("Biz", "", "", "Markets rose", "")]);
    }

    #[test]
    fn test_preserves_category_then_array_order() {
        let payload = json!({
            "Zeta": [{ "title": "z1" }, { "title": "z2" }],
            "Alpha": [{ "title": "a1" }],
            "Mid": [{ "title": "m1" }, { "title": "m2" }]
        });

        let titles: Vec<(String, String)> = parse_daily_news(&payload)
            .unwrap()
            .into_iter()
            .map(|i| (i.category, i.title))
            .collect();

        assert_eq!(
            titles,
            vec![
                ("Zeta".to_string(), "z1".to_string()),
                ("Zeta".to_string(), "z2".to_string()),
                ("Alpha".to_string(), "a1".to_string()),
                ("Mid".to_string(), "m1".to_string()),
                ("Mid".to_string(), "m2".to_string()),
            ]
        );
    }

    #[test]
    fn test_date_passes_through_verbatim() {
        let payload = json!({ "Tech": [{ "title": "T", "date": "  Tue, 06 May 2025 " }] });
        let items = parse_daily_news(&payload).unwrap();
        assert_eq!(items[0].date, "  Tue, 06 May 2025 ");
    }

    #[test]
    fn test_skips_non_array_categories() {
        let payload = json!({
            "Broken": "not a list",
            "Null": null,
            "Object": { "title": "nested" },
            "": [{ "title": "Unnamed category" }]
        });

        let items = parse_daily_news(&payload).unwrap();
        assert_eq!(items, vec![item("", "Unnamed category", "", "", "")]);
    }

    #[test]
    fn test_skips_non_object_articles() {
        let payload = json!({ "Tech": [null, 7, "text", { "title": "Real" }] });
        let items = parse_daily_news(&payload).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "Real");
    }

    #[test]
    fn test_empty_object_is_no_news_items() {
        let err = parse_daily_news(&json!({})).unwrap_err();
        assert!(matches!(err, NewsError::NoNewsItems));
    }

    #[test]
    fn test_only_unusable_articles_is_no_news_items() {
        let payload = json!({ "Tech": [{ "title": "", "description": "<p></p>" }], "Sports": [] });
        let err = parse_daily_news(&payload).unwrap_err();
        assert!(matches!(err, NewsError::NoNewsItems));
    }

    #[test]
    fn test_null_and_scalars_are_invalid() {
        for payload in [json!(null), json!("news"), json!(3), json!(true)] {
            let err = parse_daily_news(&payload).unwrap_err();
            assert!(matches!(err, NewsError::InvalidPayload), "payload: {payload}");
        }
    }

    #[test]
    fn test_parse_is_deterministic() {
        let payload = json!({
            "Tech": [{ "title": "<b>A</b>", "description": "x  y", "url": "u" }],
            "World": [{ "title": "B", "originallink": "o" }]
        });

        assert_eq!(
            parse_daily_news(&payload).unwrap(),
            parse_daily_news(&payload).unwrap()
        );
    }
}
