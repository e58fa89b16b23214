//! Run configuration.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::asn::DEFAULT_ASN_CONFIG;
use crate::bgp::DEFAULT_BGP_TABLE_URL;
use crate::fetch::DEFAULT_USER_AGENT;
use crate::output::{DEFAULT_OUTPUT_DIR, DEFAULT_V4_FILE, DEFAULT_V6_FILE};
use crate::source::{default_sources, Source, SourceFormat};
use crate::{Error, Result};

/// Configuration for one pipeline run.
#[derive(Debug, Clone)]
pub struct Config {
    /// Provider feeds, loaded in order
    pub sources: Vec<Source>,
    /// BGP table snapshot URL
    pub bgp_url: String,
    /// ASN config file; missing file disables the BGP step
    pub asn_config: PathBuf,
    /// Directory the lists are written to
    pub output_dir: PathBuf,
    /// IPv4 list file name inside `output_dir`
    pub v4_file: String,
    /// IPv6 list file name inside `output_dir`
    pub v6_file: String,
    /// `User-Agent` header for all requests
    pub user_agent: String,
    /// Request timeout; `None` keeps the HTTP client default
    pub timeout: Option<Duration>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            bgp_url: DEFAULT_BGP_TABLE_URL.to_string(),
            asn_config: PathBuf::from(DEFAULT_ASN_CONFIG),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            v4_file: DEFAULT_V4_FILE.to_string(),
            v6_file: DEFAULT_V6_FILE.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: None,
        }
    }
}

impl Config {
    /// Create a configuration with the built-in defaults.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sources(mut self, sources: Vec<Source>) -> Self {
        self.sources = sources;
        self
    }

    pub fn with_bgp_url(mut self, url: impl Into<String>) -> Self {
        self.bgp_url = url.into();
        self
    }

    pub fn with_asn_config(mut self, path: impl Into<PathBuf>) -> Self {
        self.asn_config = path.into();
        self
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Full path of the IPv4 list.
    pub fn v4_path(&self) -> PathBuf {
        self.output_dir.join(&self.v4_file)
    }

    /// Full path of the IPv6 list.
    pub fn v6_path(&self) -> PathBuf {
        self.output_dir.join(&self.v6_file)
    }
}

/// YAML list of provider feeds that replaces the built-in sources.
///
/// ```yaml
/// sources:
///   - name: aws
///     url: https://ip-ranges.amazonaws.com/ip-ranges.json
///   - name: fastly
///     url: https://api.fastly.com/public-ip-list
///     format: text
/// ```
///
/// Entries without `format` fall back to [`SourceFormat::infer`].
#[derive(Debug, Deserialize)]
pub struct SourceList {
    #[serde(default)]
    pub sources: Vec<SourceEntry>,
}

/// One entry of a [`SourceList`].
#[derive(Debug, Deserialize)]
pub struct SourceEntry {
    pub name: String,
    pub url: String,
    pub format: Option<SourceFormat>,
}

impl SourceList {
    /// Parse a source list from YAML.
    pub fn parse(yaml: &str) -> Result<Self> {
        let list: Self = serde_yaml::from_str(yaml)?;
        if list.sources.is_empty() {
            return Err(Error::Config("source list is empty".to_string()));
        }
        Ok(list)
    }

    /// Load a source list from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::parse(&content)
    }

    /// Resolve entries into sources.
    pub fn into_sources(self) -> Vec<Source> {
        self.sources
            .into_iter()
            .map(|entry| match entry.format {
                Some(format) => Source::new(entry.name, entry.url, format),
                None => Source::inferred(entry.name, entry.url),
            })
            .collect()
    }
}
