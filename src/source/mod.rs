//! Provider range sources.

mod json;
mod text;

pub use json::JsonParser;
pub use text::TextParser;

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::fetch::Fetch;
use crate::Result;

/// Body format of a provider feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// JSON document with `prefixes` / `ipv6_prefixes` arrays
    Json,
    /// One token per line
    Text,
}

impl SourceFormat {
    /// Guess the format for a source declared without one.
    ///
    /// `aws` and URLs ending in `.json` are JSON, everything else is text.
    pub fn infer(name: &str, url: &str) -> Self {
        if name == "aws" || url.ends_with(".json") {
            SourceFormat::Json
        } else {
            SourceFormat::Text
        }
    }

    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Json => "json",
            SourceFormat::Text => "text",
        }
    }

    /// Extract raw range strings from a response body.
    pub fn parse(&self, body: &str) -> Result<Vec<String>> {
        match self {
            SourceFormat::Json => JsonParser::parse(body),
            SourceFormat::Text => Ok(TextParser::parse(body)),
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named provider feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub url: String,
    pub format: SourceFormat,
}

impl Source {
    /// Create a source with an explicit format.
    pub fn new(name: impl Into<String>, url: impl Into<String>, format: SourceFormat) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            format,
        }
    }

    /// Create a source whose format is inferred from its name and URL.
    pub fn inferred(name: impl Into<String>, url: impl Into<String>) -> Self {
        let name = name.into();
        let url = url.into();
        let format = SourceFormat::infer(&name, &url);
        Self { name, url, format }
    }

    /// Fetch and parse this source.
    pub fn fetch(&self, fetcher: &dyn Fetch) -> Result<Vec<String>> {
        let body = fetcher.fetch_text(&self.url)?;
        self.format.parse(&body)
    }

    /// Fetch and parse this source, logging failures instead of returning
    /// them.
    ///
    /// Any error yields an empty list.
    pub fn load(&self, fetcher: &dyn Fetch) -> Vec<String> {
        match self.fetch(fetcher) {
            Ok(ranges) => {
                log::debug!("Loaded {} entries from {} ({})", ranges.len(), self.name, self.format);
                ranges
            }
            Err(e) => {
                log::warn!("Could not load {} from {} - {}", self.name, self.url, e);
                Vec::new()
            }
        }
    }
}

/// Built-in provider feeds.
pub fn default_sources() -> Vec<Source> {
    vec![
        Source::new(
            "aws",
            "https://ip-ranges.amazonaws.com/ip-ranges.json",
            SourceFormat::Json,
        ),
        Source::new(
            "cloudflare_v4",
            "https://www.cloudflare.com/ips-v4",
            SourceFormat::Text,
        ),
        Source::new(
            "cloudflare_v6",
            "https://www.cloudflare.com/ips-v6",
            SourceFormat::Text,
        ),
        Source::new(
            "discord_v4",
            "https://iplist.opencck.org/?format=text&data=cidr4&site=discord.gg&site=discord.media",
            SourceFormat::Text,
        ),
        Source::new(
            "discord_v6",
            "https://iplist.opencck.org/?format=text&data=cidr6&site=discord.gg&site=discord.media",
            SourceFormat::Text,
        ),
        Source::new(
            "telegram",
            "https://core.telegram.org/resources/cidr.txt",
            SourceFormat::Text,
        ),
    ]
}
