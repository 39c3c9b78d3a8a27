use crate::{
    client::Fetcher,
    config::{Config, FeedSource},
    entity::Episode,
    parser::{decode_body, extract_episodes, parse_document},
};
use std::error::Error;

/// Fetch every configured show in order and return their newest episodes,
/// newest first. A show that fails to fetch or parse contributes nothing.
pub fn collect_episodes(config: &Config, fetcher: &impl Fetcher) -> Vec<Episode> {
    let mut all = Vec::new();
    for source in &config.sources {
        log::info!("Fetching: {}...", source.name);
        match fetch_show(source, fetcher, config.per_show_limit) {
            Ok(eps) => {
                log::info!("  Got {} episodes", eps.len());
                all.extend(eps);
            }
            Err(e) => log::error!("Error fetching {}: {}", source.url, e),
        }
    }
    log::info!("Total episodes: {}", all.len());
    sort_episodes(&mut all);
    all
}

fn fetch_show(
    source: &FeedSource,
    fetcher: &impl Fetcher,
    limit: usize,
) -> Result<Vec<Episode>, Box<dyn Error>> {
    let body = fetcher.fetch(&source.url)?;
    let text = decode_body(&body)?;
    let doc = parse_document(&text)?;
    Ok(extract_episodes(&doc, limit))
}

/// Newest first. Stable, and episodes with an unparseable date go last.
pub fn sort_episodes(eps: &mut [Episode]) {
    eps.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::FetchResult;
    use crate::util::init_log;
    use simple_error::SimpleError;
    use std::collections::HashMap;

    struct StubFetcher {
        feeds: HashMap<String, String>,
    }

    impl Fetcher for StubFetcher {
        fn fetch(&self, url: &str) -> FetchResult {
            match self.feeds.get(url) {
                Some(body) => Ok(body.clone().into_bytes()),
                None => Err(Box::new(SimpleError::new(format!("404 for {}", url)))),
            }
        }
    }

    fn show_xml(show: &str, dates: &[&str]) -> String {
        let items = dates
            .iter()
            .enumerate()
            .map(|(i, d)| {
                format!(
                    "<item><title>ep {}</title><enclosure url=\"https://cdn.example.com/{}/{}.mp3\"/><pubDate>{}</pubDate></item>",
                    i, show, i, d
                )
            })
            .collect::<String>();
        format!("<rss><channel><title>{}</title>{}</channel></rss>", show, items)
    }

    fn config(names: &[&str]) -> Config {
        Config {
            sources: names
                .iter()
                .map(|n| FeedSource::new(n, &format!("http://stub/{}", n)))
                .collect(),
            ..Default::default()
        }
    }

    #[test]
    fn failing_show_is_skipped() {
        let _ = init_log();
        let mut feeds = HashMap::new();
        feeds.insert(
            "http://stub/a".to_string(),
            show_xml("a", &["Mon, 06 Jan 2025 10:00:00 GMT", "Fri, 03 Jan 2025 10:00:00 GMT"]),
        );
        feeds.insert("http://stub/broken".to_string(), "<html><body>".to_string());
        feeds.insert(
            "http://stub/c".to_string(),
            show_xml("c", &["Sun, 05 Jan 2025 10:00:00 GMT"]),
        );
        let fetcher = StubFetcher { feeds };

        let eps = collect_episodes(&config(&["a", "missing", "broken", "c"]), &fetcher);
        assert_eq!(eps.len(), 3);
        assert_eq!(
            eps.iter().map(|e| e.show.as_str()).collect::<Vec<_>>(),
            vec!["a", "c", "a"]
        );
    }

    #[test]
    fn no_shows_no_episodes() {
        let fetcher = StubFetcher {
            feeds: HashMap::new(),
        };
        assert!(collect_episodes(&config(&["x", "y"]), &fetcher).is_empty());
    }

    #[test]
    fn limit_applies_per_show() {
        let mut feeds = HashMap::new();
        let dates = ["Mon, 06 Jan 2025 10:00:00 GMT"; 5];
        feeds.insert("http://stub/a".to_string(), show_xml("a", &dates));
        feeds.insert("http://stub/b".to_string(), show_xml("b", &dates));
        let fetcher = StubFetcher { feeds };
        let mut cfg = config(&["a", "b"]);
        cfg.per_show_limit = 3;
        assert_eq!(collect_episodes(&cfg, &fetcher).len(), 6);
    }

    fn dated(title: &str, date: &str) -> Episode {
        Episode {
            title: title.to_string(),
            pub_date: date.to_string(),
            timestamp: crate::util::to_timestamp(date),
            ..Default::default()
        }
    }

    #[test]
    fn sort_newest_first() {
        let mut eps = vec![
            dated("first", "Wed, 01 Jan 2025"),
            dated("second", "Thu, 02 Jan 2025"),
        ];
        sort_episodes(&mut eps);
        assert_eq!(eps[0].title, "second");
        assert_eq!(eps[1].title, "first");
    }

    #[test]
    fn sort_ranks_wrong_weekday_by_date() {
        let mut eps = vec![
            dated("older", "Mon, 01 Jan 2024 10:00:00 GMT"),
            dated("newest", "Wed, 02 Jan 2025 10:00:00 GMT"),
        ];
        sort_episodes(&mut eps);
        assert_eq!(
            eps.iter().map(|e| e.title.as_str()).collect::<Vec<_>>(),
            vec!["newest", "older"]
        );
    }

    #[test]
    fn sort_is_chronological_across_formats() {
        let mut eps = vec![
            dated("dec", "Tue, 31 Dec 2024 23:00:00 +0000"),
            dated("undated", ""),
            dated("jan-iso", "2025-01-01T09:00:00Z"),
            dated("junk", "last tuesday"),
            dated("jan-rfc", "Wed, 01 Jan 2025 10:00:00 GMT"),
            dated("dec-tie", "Tue, 31 Dec 2024 23:00:00 GMT"),
        ];
        sort_episodes(&mut eps);
        assert_eq!(
            eps.iter().map(|e| e.title.as_str()).collect::<Vec<_>>(),
            vec!["jan-rfc", "jan-iso", "dec", "dec-tie", "undated", "junk"]
        );
    }
}
