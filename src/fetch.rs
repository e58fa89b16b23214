//! HTTP fetching.
//!
//! Everything that touches the network goes through [`Fetch`], so the
//! pipeline can be driven from memory in tests.

use std::io::Read;
use std::time::Duration;

use crate::{Error, Result};

/// Default `User-Agent` sent with every request.
pub const DEFAULT_USER_AGENT: &str = "github-actions[bot] (+https://github.com/mi1su/subnets_list)";

/// Source of response bodies keyed by URL.
pub trait Fetch {
    /// Open `url` and return its body as a stream.
    ///
    /// Non-success statuses are errors.
    fn fetch(&self, url: &str) -> Result<Box<dyn Read>>;

    /// Fetch `url` and read the whole body as UTF-8.
    fn fetch_text(&self, url: &str) -> Result<String> {
        let mut body = String::new();
        self.fetch(url)?.read_to_string(&mut body)?;
        Ok(body)
    }
}

/// Blocking HTTP fetcher backed by `reqwest`.
pub struct HttpFetcher {
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    /// Create a fetcher with the default user agent and client timeout.
    pub fn new() -> Result<Self> {
        Self::with_options(DEFAULT_USER_AGENT, None)
    }

    /// Create a fetcher with a custom user agent.
    ///
    /// `timeout` of `None` keeps the client's default.
    pub fn with_options(user_agent: &str, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::blocking::Client::builder().user_agent(user_agent);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Fetch for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<Box<dyn Read>> {
        log::debug!("GET {}", url);
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(Box::new(response))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Canned(&'static str);

    impl Fetch for Canned {
        fn fetch(&self, _url: &str) -> Result<Box<dyn Read>> {
            Ok(Box::new(self.0.as_bytes()))
        }
    }

    #[test]
    fn test_fetch_text_default() {
        let body = Canned("1.1.1.0/24\n").fetch_text("http://example.invalid").unwrap();
        assert_eq!(body, "1.1.1.0/24\n");
    }

    #[test]
    fn test_http_fetcher_builds() {
        assert!(HttpFetcher::new().is_ok());
        assert!(HttpFetcher::with_options("test-agent", Some(Duration::from_secs(5))).is_ok());
    }

    #[test]
    fn test_status_error_message() {
        let err = Error::Status {
            url: "https://example.com/ips".to_string(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "unexpected HTTP status 503 from https://example.com/ips"
        );
    }
}
