//! RSS/Atom parsing into NewsItems

use chrono::{DateTime, Utc};
use tracing::debug;

use newsboard_core::NewsItem;

use crate::error::FeedError;

/// Parse a feed body, trying RSS first and then Atom
///
/// Entries without a usable link are dropped. Missing titles become empty
/// strings. Dates are converted to UTC, or left absent when unparseable.
pub fn parse_feed(content: &[u8], keyword: &str) -> Result<Vec<NewsItem>, FeedError> {
    if let Ok(channel) = rss::Channel::read_from(content) {
        return Ok(parse_rss_channel(&channel, keyword));
    }

    match atom_syndication::Feed::read_from(content) {
        Ok(feed) => Ok(parse_atom_feed(&feed, keyword)),
        Err(e) => Err(FeedError::ParseError(format!(
            "Body for '{}' is neither RSS nor Atom: {}",
            keyword, e
        ))),
    }
}

fn parse_rss_channel(channel: &rss::Channel, keyword: &str) -> Vec<NewsItem> {
    channel
        .items()
        .iter()
        .filter_map(|item| {
            let Some(link) = usable_link(item.link()) else {
                debug!("Skipping RSS entry without link for '{}'", keyword);
                return None;
            };

            let published_at = item.pub_date().and_then(parse_date).or_else(|| {
                // Dublin Core date as a fallback
                item.dublin_core_ext()
                    .and_then(|dc| dc.dates().first())
                    .and_then(|d| parse_date(d))
            });

            let source = item
                .source()
                .and_then(|s| s.title())
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty());

            Some(NewsItem {
                title: item.title().unwrap_or_default().trim().to_string(),
                link,
                published_at,
                source,
                keyword: keyword.to_string(),
            })
        })
        .collect()
}

fn parse_atom_feed(feed: &atom_syndication::Feed, keyword: &str) -> Vec<NewsItem> {
    feed.entries()
        .iter()
        .filter_map(|entry| {
            // Prefer the alternate link, which points at the article itself
            let href = entry
                .links()
                .iter()
                .find(|l| l.rel() == "alternate")
                .or_else(|| entry.links().first())
                .map(|l| l.href());

            let Some(link) = usable_link(href) else {
                debug!("Skipping Atom entry without link for '{}'", keyword);
                return None;
            };

            let source = entry
                .source()
                .map(|s| s.title().as_str().trim().to_string())
                .filter(|t| !t.is_empty());

            Some(NewsItem {
                title: entry.title().as_str().trim().to_string(),
                link,
                published_at: entry.published().map(|d| d.with_timezone(&Utc)),
                source,
                keyword: keyword.to_string(),
            })
        })
        .collect()
}

fn usable_link(link: Option<&str>) -> Option<String> {
    link.map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
}

/// Parse an RSS date: RFC 2822 first, then RFC 3339
fn parse_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const GOOGLE_NEWS_RSS: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0" xmlns:media="http://search.yahoo.com/mrss/">
  <channel>
    <title>"東山奈央" - Google ニュース</title>
    <link>https://news.google.com/search?q=%E6%9D%B1%E5%B1%B1%E5%A5%88%E5%A4%AE</link>
    <description>Google ニュース</description>
    <item>
      <title>新作アニメに出演決定 - アニメイトタイムズ</title>
      <link>https://news.google.com/rss/articles/abc</link>
      <pubDate>Tue, 02 Jan 2024 09:00:00 +0900</pubDate>
      <source url="https://www.animatetimes.com">アニメイトタイムズ</source>
    </item>
    <item>
      <title>日付なし記事</title>
      <link>https://news.google.com/rss/articles/def</link>
    </item>
    <item>
      <title>リンクなし記事</title>
    </item>
    <item>
      <link>https://news.google.com/rss/articles/ghi</link>
      <pubDate>not a date</pubDate>
    </item>
  </channel>
</rss>"#;

    const ATOM_FEED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Example</title>
  <id>urn:example</id>
  <updated>2024-01-03T00:00:00Z</updated>
  <entry>
    <title>Atom entry</title>
    <id>urn:example:1</id>
    <link rel="self" href="https://example.com/self/1"/>
    <link rel="alternate" href="https://example.com/articles/1"/>
    <published>2024-01-03T12:00:00+09:00</published>
    <updated>2024-01-03T12:00:00+09:00</updated>
  </entry>
  <entry>
    <title>No link</title>
    <id>urn:example:2</id>
    <updated>2024-01-03T00:00:00Z</updated>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_google_news_rss() {
        let items = parse_feed(GOOGLE_NEWS_RSS.as_bytes(), "東山奈央").unwrap();
        assert_eq!(items.len(), 3);

        let first = &items[0];
        assert_eq!(first.title, "新作アニメに出演決定 - アニメイトタイムズ");
        assert_eq!(first.link, "https://news.google.com/rss/articles/abc");
        assert_eq!(
            first.published_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap())
        );
        assert_eq!(first.source.as_deref(), Some("アニメイトタイムズ"));
        assert_eq!(first.keyword, "東山奈央");

        assert_eq!(items[1].published_at, None);
        assert_eq!(items[1].source, None);

        // Missing title is kept as empty, bad date becomes absent
        assert_eq!(items[2].title, "");
        assert_eq!(items[2].published_at, None);
    }

    #[test]
    fn test_parse_atom_feed() {
        let items = parse_feed(ATOM_FEED.as_bytes(), "kw").unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].link, "https://example.com/articles/1");
        assert_eq!(
            items[0].published_at,
            Some(Utc.with_ymd_and_hms(2024, 1, 3, 3, 0, 0).unwrap())
        );
    }

    #[test]
    fn test_parse_garbage_is_error() {
        let result = parse_feed(b"<html><body>captcha</body></html>", "kw");
        assert!(matches!(result, Err(FeedError::ParseError(_))));
    }

    #[test]
    fn test_parse_date_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(parse_date("Mon, 01 Jan 2024 00:00:00 GMT"), Some(expected));
        assert_eq!(parse_date("2024-01-01T09:00:00+09:00"), Some(expected));
        assert_eq!(parse_date("yesterday"), None);
    }
}
