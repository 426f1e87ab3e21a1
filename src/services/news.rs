// src/services/news.rs
use std::collections::HashSet;

use log::{info, warn};
use scraper::{ElementRef, Html, Selector};

use crate::config::TrackerConfig;
use crate::models::NewsItem;
use crate::session::PageSession;

const NEWS_PATHS: [&str; 3] = ["/news", "/announcements", "/news-announcements"];

const ARTICLE_SELECTOR: &str =
    "article, .news-item, .announcement-item, [class*='news'], [class*='announcement']";
const TITLE_SELECTOR: &str = "h1, h2, h3, h4, a";
const DATE_SELECTOR: &str = "time, [class*='date'], [class*='time']";

/// Home-page fallback rules, applied in order until the minimum count is met.
const HOME_RULES: [&str; 5] = [
    "[class*='news'] a",
    "[class*='announcement'] a",
    "[class*='Notice'] a",
    "section a[href*='news']",
    "section a[href*='announcement']",
];

const ARTICLES_PER_PAGE: usize = 20;
const LINKS_PER_RULE: usize = 15;

/// Scrape news and announcements: dedicated routes first, then news-like
/// links on the home page. Items deduplicate by exact title across the
/// whole run.
pub async fn scrape_news<S: PageSession>(session: &mut S, cfg: &TrackerConfig) -> Vec<NewsItem> {
    let mut news = Vec::new();
    let mut seen = HashSet::new();

    for path in NEWS_PATHS {
        let url = format!("{}{}", cfg.base_url, path);
        if let Err(e) = session.navigate(&url, cfg.nav_timeout_ms / 2).await {
            info!("news: {} unavailable: {}", url, e);
            continue;
        }
        collect_articles(&session.content(), cfg, &mut seen, &mut news);
        if news.len() >= cfg.news_min_count {
            news.truncate(cfg.news_limit);
            return news;
        }
    }

    if let Err(e) = session.navigate(&cfg.base_url, cfg.nav_timeout_ms).await {
        warn!("news: failed to load {}: {}", cfg.base_url, e);
        return news;
    }
    if let Err(e) = session.wait_for_selector("body", cfg.body_timeout_ms).await {
        warn!("news: page body never appeared: {}", e);
        return news;
    }
    collect_home_links(&session.content(), cfg, &mut seen, &mut news);
    news.truncate(cfg.news_limit);
    news
}

fn collect_articles(
    content: &str,
    cfg: &TrackerConfig,
    seen: &mut HashSet<String>,
    news: &mut Vec<NewsItem>,
) {
    let doc = Html::parse_document(content);
    let article_sel = Selector::parse(ARTICLE_SELECTOR).unwrap();
    let title_sel = Selector::parse(TITLE_SELECTOR).unwrap();
    let date_sel = Selector::parse(DATE_SELECTOR).unwrap();
    let link_sel = Selector::parse("a").unwrap();

    for article in doc.select(&article_sel).take(ARTICLES_PER_PAGE) {
        let title = match article.select(&title_sel).next() {
            Some(el) => element_text(&el),
            None => element_text(&article).chars().take(120).collect(),
        };
        if title.is_empty() || !seen.insert(title.clone()) {
            continue;
        }
        let date = article
            .select(&date_sel)
            .next()
            .map(|el| {
                el.value()
                    .attr("datetime")
                    .map(str::to_string)
                    .unwrap_or_else(|| element_text(&el))
            })
            .filter(|d| !d.is_empty());
        let url = article
            .select(&link_sel)
            .next()
            .and_then(|el| el.value().attr("href"))
            .map(|href| absolute_url(&cfg.base_url, href));
        news.push(NewsItem { title, date, url });
    }
}

fn collect_home_links(
    content: &str,
    cfg: &TrackerConfig,
    seen: &mut HashSet<String>,
    news: &mut Vec<NewsItem>,
) {
    let doc = Html::parse_document(content);
    for rule in HOME_RULES {
        let sel = match Selector::parse(rule) {
            Ok(sel) => sel,
            Err(_) => continue,
        };
        for el in doc.select(&sel).take(LINKS_PER_RULE) {
            let title = element_text(&el);
            if title.is_empty() || !seen.insert(title.clone()) {
                continue;
            }
            let url = el
                .value()
                .attr("href")
                .map(|href| absolute_url(&cfg.base_url, href));
            news.push(NewsItem {
                title,
                date: None,
                url,
            });
        }
        if news.len() >= cfg.news_min_count {
            break;
        }
    }
}

fn element_text(el: &ElementRef) -> String {
    crate::dom::normalize_ws(&el.text().collect::<Vec<_>>().join(" "))
}

fn absolute_url(base: &str, href: &str) -> String {
    if href.starts_with('/') {
        format!("{}{}", base, href)
    } else {
        href.to_string()
    }
}
