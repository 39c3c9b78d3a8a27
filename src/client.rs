use crate::config::Config;
use std::error::Error;
use std::io::Read;
use std::time::Duration;

pub type FetchResult = Result<Vec<u8>, Box<dyn Error>>;

/// Source of raw feed bytes.
pub trait Fetcher {
    fn fetch(&self, url: &str) -> FetchResult;
}

pub struct HttpClient {
    agent: ureq::Agent,
}

impl HttpClient {
    pub fn new(timeout: Duration, user_agent: &str) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(timeout)
            .user_agent(user_agent)
            .build();
        HttpClient { agent }
    }

    pub fn from_config(config: &Config) -> Self {
        HttpClient::new(Duration::from_secs(config.timeout_secs), &config.user_agent)
    }
}

impl Fetcher for HttpClient {
    // ureq reports 4xx/5xx as Error::Status, so only 2xx bodies get through
    fn fetch(&self, url: &str) -> FetchResult {
        let resp = self.agent.get(url).call()?;
        log::debug!("{} responded {}", url, resp.status());
        let mut body = Vec::new();
        resp.into_reader().read_to_end(&mut body)?;
        Ok(body)
    }
}
