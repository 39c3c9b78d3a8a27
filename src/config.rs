use serde::Deserialize;
use simple_error::SimpleError;
use std::error::Error;
use std::path::Path;

pub const DEFAULT_LIMIT: usize = 2;
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;
pub const DEFAULT_USER_AGENT: &str = "KitPodcastCurator/1.0";

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FeedSource {
    pub name: String,
    pub url: String,
}

impl FeedSource {
    pub fn new(name: &str, url: &str) -> Self {
        FeedSource {
            name: name.to_string(),
            url: url.to_string(),
        }
    }
}

/// Channel-level metadata of the generated feed.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct FeedMeta {
    pub title: String,
    pub description: String,
    pub author: String,
    pub link: String,
    pub feed_url: String,
    pub image: String,
    pub category: String,
    pub language: String,
    pub explicit: bool,
}

impl Default for FeedMeta {
    fn default() -> Self {
        FeedMeta {
            title: "🦊 Kit's Podcast Picks".to_string(),
            description: "Curated podcast episodes for people who love crafted storytelling, \
                investigative journalism, and shows that respect your time. \
                No algorithms. No ads. Just Kit's taste."
                .to_string(),
            author: "Kit (kitattic.com)".to_string(),
            link: "https://github.com/kitattic/podcast-picks".to_string(),
            feed_url: "https://kitattic.github.io/podcast-picks/feed.xml".to_string(),
            image: "https://kitattic.github.io/podcast-picks/artwork.jpg".to_string(),
            category: "Society & Culture".to_string(),
            language: "en-us".to_string(),
            explicit: false,
        }
    }
}

/// Everything one run needs. Built once and only read afterwards.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub meta: FeedMeta,
    pub sources: Vec<FeedSource>,
    pub per_show_limit: usize,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            meta: FeedMeta::default(),
            sources: default_sources(),
            per_show_limit: DEFAULT_LIMIT,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl Config {
    pub fn from_json(raw: &str) -> Result<Self, Box<dyn Error>> {
        let config: Config = serde_json::from_str(raw)?;
        if config.per_show_limit == 0 {
            return Err(Box::new(SimpleError::new("per_show_limit must be at least 1")));
        }
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, Box<dyn Error>> {
        let raw = std::fs::read_to_string(path)?;
        log::debug!("loading config from {}", path.display());
        Config::from_json(&raw)
    }
}

fn default_sources() -> Vec<FeedSource> {
    vec![
        // narrative / investigative
        FeedSource::new("Serial", "https://feeds.simplecast.com/xl36XBC2"),
        FeedSource::new("Darknet Diaries", "https://feeds.megaphone.fm/darknetdiaries"),
        FeedSource::new("Radiolab", "https://feeds.simplecast.com/EmVW7VGp"),
        FeedSource::new("99% Invisible", "https://feeds.simplecast.com/BqbsxVfO"),
        FeedSource::new("Criminal", "https://feeds.megaphone.fm/criminal"),
        FeedSource::new("Heavyweight", "https://feeds.megaphone.fm/heavyweight"),
        FeedSource::new("Reply All", "https://feeds.megaphone.fm/replyall"),
        FeedSource::new(
            "The Lazarus Heist",
            "https://podcasts.files.bbci.co.uk/w13xttx2.rss",
        ),
        // tech / business
        FeedSource::new("Acquired", "https://feeds.megaphone.fm/acquired"),
        FeedSource::new("Lex Fridman", "https://lexfridman.com/feed/podcast/"),
        // storytelling
        FeedSource::new(
            "This American Life",
            "https://www.thisamericanlife.org/podcast/rss.xml",
        ),
        FeedSource::new(
            "Revisionist History",
            "https://feeds.megaphone.fm/revisionisthistory",
        ),
    ]
}
