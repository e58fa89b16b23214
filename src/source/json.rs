//! JSON range feed parser (AWS `ip-ranges.json` layout).

use serde::Deserialize;

use crate::Result;

/// Top-level feed document. Unknown fields are ignored.
#[derive(Debug, Deserialize)]
struct RangeFeed {
    #[serde(default)]
    prefixes: Option<Vec<V4Prefix>>,
    #[serde(default)]
    ipv6_prefixes: Option<Vec<V6Prefix>>,
}

#[derive(Debug, Deserialize)]
struct V4Prefix {
    ip_prefix: String,
}

#[derive(Debug, Deserialize)]
struct V6Prefix {
    ipv6_prefix: String,
}

/// JSON range feed parser.
pub struct JsonParser;

impl JsonParser {
    /// Extract `prefixes[].ip_prefix` followed by `ipv6_prefixes[].ipv6_prefix`.
    ///
    /// Either list may be absent. A body that is not a feed document is an
    /// error.
    pub fn parse(body: &str) -> Result<Vec<String>> {
        let feed: RangeFeed = serde_json::from_str(body)?;
        let v4 = feed.prefixes.unwrap_or_default().into_iter().map(|p| p.ip_prefix);
        let v6 = feed
            .ipv6_prefixes
            .unwrap_or_default()
            .into_iter()
            .map(|p| p.ipv6_prefix);
        Ok(v4.chain(v6).collect())
    }
}
