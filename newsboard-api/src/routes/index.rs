//! HTML news page

use std::fmt::Write;

use axum::{extract::State, response::Html, routing::get, Router};
use chrono::{DateTime, Utc};

use newsboard_core::NewsSnapshot;

use crate::AppState;

const NOT_UPDATED: &str = "更新されていません";

/// Create page routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}

/// GET / - News list page
async fn index(State(state): State<AppState>) -> Html<String> {
    let snapshot = state.news_cache.snapshot();
    Html(render_page(&snapshot, state.news_cache.keywords()))
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Render the page for one snapshot
fn render_page(snapshot: &NewsSnapshot, keywords: &[String]) -> String {
    let last_updated = snapshot
        .last_updated
        .map(format_timestamp)
        .unwrap_or_else(|| NOT_UPDATED.to_string());

    let mut html = String::with_capacity(4096);
    html.push_str(concat!(
        "<!DOCTYPE html>\n<html lang=\"ja\">\n<head>\n",
        "<meta charset=\"utf-8\">\n",
        "<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n",
        "<title>声優ニュース</title>\n",
        "<style>body{font-family:sans-serif;max-width:48rem;margin:2rem auto;padding:0 1rem}",
        "li{margin:.6rem 0}.meta{color:#666;font-size:.85rem}</style>\n",
        "</head>\n<body>\n<h1>声優ニュース</h1>\n",
    ));

    let keyword_list = keywords
        .iter()
        .map(|k| escape_html(k))
        .collect::<Vec<_>>()
        .join(" / ");
    let _ = writeln!(html, "<p class=\"meta\">キーワード: {}</p>", keyword_list);
    let _ = writeln!(html, "<p class=\"meta\">最終更新: {}</p>", escape_html(&last_updated));

    if !snapshot.is_populated() {
        html.push_str("<p>ニュースを取得中です。しばらくしてから再読み込みしてください。</p>\n");
    } else if snapshot.items.is_empty() {
        html.push_str("<p>記事が見つかりませんでした。</p>\n");
    } else {
        html.push_str("<ul>\n");
        for item in &snapshot.items {
            let title = if item.title.is_empty() {
                item.link.as_str()
            } else {
                item.title.as_str()
            };

            let mut meta = Vec::new();
            if let Some(source) = &item.source {
                meta.push(escape_html(source));
            }
            if let Some(published_at) = item.published_at {
                meta.push(format_timestamp(published_at));
            }

            let _ = writeln!(
                html,
                "<li><a href=\"{}\" target=\"_blank\" rel=\"noopener noreferrer\">{}</a><br><span class=\"meta\">{}</span></li>",
                escape_html(&item.link),
                escape_html(title),
                meta.join(" · ")
            );
        }
        html.push_str("</ul>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}

/// Escape text for element content and quoted attributes
fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use chrono::TimeZone;
    use newsboard_core::NewsItem;

    use crate::routes::test_support::{get, state_with};

    fn keywords() -> Vec<String> {
        vec!["A".to_string(), "B".to_string()]
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_render_never_updated() {
        let html = render_page(&NewsSnapshot::default(), &keywords());
        assert!(html.contains("最終更新: 更新されていません"));
        assert!(html.contains("ニュースを取得中"));
        assert!(html.contains("キーワード: A / B"));
    }

    #[test]
    fn test_render_updated_but_empty() {
        let snapshot = NewsSnapshot {
            items: vec![],
            last_updated: Some(Utc.with_ymd_and_hms(2024, 5, 6, 7, 8, 9).unwrap()),
        };
        let html = render_page(&snapshot, &keywords());
        assert!(html.contains("最終更新: 2024-05-06 07:08:09 UTC"));
        assert!(html.contains("記事が見つかりませんでした"));
        assert!(!html.contains("ニュースを取得中"));
    }

    #[test]
    fn test_render_items_escaped() {
        let snapshot = NewsSnapshot {
            items: vec![NewsItem {
                title: "<script>alert(1)</script>".to_string(),
                link: "https://news.example.com/?a=1&b=2".to_string(),
                published_at: Some(Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()),
                source: Some("Example News".to_string()),
                keyword: "A".to_string(),
            }],
            last_updated: Some(Utc::now()),
        };
        let html = render_page(&snapshot, &keywords());
        assert!(html.contains("href=\"https://news.example.com/?a=1&amp;b=2\""));
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains("Example News · 2024-01-02 00:00:00 UTC"));
    }

    #[tokio::test]
    async fn test_index_route() {
        let (status, body) = get(state_with(vec![]), "/").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("石見舞菜香 / 東山奈央"));
        assert!(body.contains(NOT_UPDATED));
    }
}
