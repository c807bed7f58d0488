// src/core/net.rs
// Blocking HTTPS GET for the scoring sites, one request at a time.

use std::thread::sleep;
use std::time::{Duration, Instant};

use crate::config::consts::{REQUEST_TIMEOUT_SECS, USER_AGENT};

/// Anything that can turn a URL into a page body.
pub trait Fetch {
    fn get(&mut self, url: &str) -> Result<String, Box<dyn std::error::Error>>;
}

pub struct HttpFetcher {
    client: reqwest::blocking::Client,
    pause: Duration,
    last: Option<Instant>,
}

impl HttpFetcher {
    pub fn new(pause: Duration) -> Result<Self, Box<dyn std::error::Error>> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;
        Ok(Self { client, pause, last: None })
    }

    fn wait_turn(&mut self) {
        if let Some(last) = self.last {
            let since = last.elapsed();
            if since < self.pause {
                sleep(self.pause - since);
            }
        }
        self.last = Some(Instant::now());
    }
}

impl Fetch for HttpFetcher {
    fn get(&mut self, url: &str) -> Result<String, Box<dyn std::error::Error>> {
        self.wait_turn();
        logd!("GET {url}");

        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(format!("HTTP error: {status} {url}").into());
        }
        Ok(resp.text()?)
    }
}

/// Join a site-relative link onto its host.
pub fn absolute_url(host: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        s!(href)
    } else if href.starts_with('/') {
        join!(host.trim_end_matches('/'), href)
    } else {
        join!(host.trim_end_matches('/'), "/", href)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_links_join_host() {
        let host = "https://www.meetscoresonline.com";
        assert_eq!(absolute_url(host, "/results/1"), "https://www.meetscoresonline.com/results/1");
        assert_eq!(absolute_url(host, "results/1"), "https://www.meetscoresonline.com/results/1");
        assert_eq!(absolute_url(host, "https://x.org/a"), "https://x.org/a");
    }
}
