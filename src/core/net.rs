// src/core/net.rs
// Page retrieval. Sessions only see the `Fetch` capability; `HttpFetcher` is
// the production implementation.

use reqwest::blocking::Client;

use crate::config::options::NetOptions;
use crate::error::FetchError;

/// `fetch(url) -> raw document | failure`. Synchronous; timeouts are the
/// implementor's business.
pub trait Fetch {
    fn fetch(&self, url: &str) -> Result<String, FetchError>;
}

/// Closures are fetchers too (handy for fixtures).
impl<F> Fetch for F
where
    F: Fn(&str) -> Result<String, FetchError>,
{
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        self(url)
    }
}

/// Plain blocking HTTP GET. Anything but a 2xx status is a failure.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(opts: &NetOptions) -> reqwest::Result<Self> {
        let client = Client::builder()
            .timeout(opts.timeout)
            .user_agent(opts.user_agent.as_str())
            .build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, FetchError> {
        logd!("GET {url}");
        let resp = self
            .client
            .get(url)
            .send()
            .map_err(|source| FetchError::Transport { url: s!(url), source })?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: s!(url), status: status.as_u16() });
        }

        let body = resp
            .text()
            .map_err(|source| FetchError::Transport { url: s!(url), source })?;
        logd!("GET {url}: {} bytes", body.len());
        Ok(body)
    }
}
