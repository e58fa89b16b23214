//! The fetch, filter, aggregate and write pipeline.

use crate::aggregate::{aggregate_v4, aggregate_v6};
use crate::asn::AsnSet;
use crate::bgp::BgpTableFilter;
use crate::config::Config;
use crate::family::SubnetSets;
use crate::fetch::{Fetch, HttpFetcher};
use crate::output::{write_lists, Summary};
use crate::Result;

/// One run of the subnet list generator.
pub struct Pipeline<F: Fetch> {
    config: Config,
    fetcher: F,
}

impl Pipeline<HttpFetcher> {
    /// Create a pipeline that fetches over HTTP.
    pub fn new(config: Config) -> Result<Self> {
        let fetcher = HttpFetcher::with_options(&config.user_agent, config.timeout)?;
        Ok(Self { config, fetcher })
    }
}

impl<F: Fetch> Pipeline<F> {
    /// Create a pipeline with a custom fetcher.
    pub fn with_fetcher(config: Config, fetcher: F) -> Self {
        Self { config, fetcher }
    }

    /// Load every configured provider source.
    ///
    /// Failing sources contribute nothing.
    pub fn collect_sources(&self, sets: &mut SubnetSets) {
        for source in &self.config.sources {
            sets.extend(source.load(&self.fetcher));
        }
    }

    /// Stream the BGP table for the configured ASNs.
    ///
    /// Skipped when the ASN config is missing or empty. Returns the number
    /// of matched table entries.
    pub fn collect_bgp(&self, sets: &mut SubnetSets) -> Result<usize> {
        let targets = AsnSet::load(&self.config.asn_config)?;
        if targets.is_empty() {
            return Ok(0);
        }

        log::info!("Streaming BGP table for {} ASNs...", targets.len());
        for group in targets.groups() {
            log::debug!("  {}: {}", group.label, group.asns.join(","));
        }
        BgpTableFilter::new(&targets).filter_url(&self.fetcher, &self.config.bgp_url, sets)
    }

    /// Run every stage and write the lists.
    pub fn run(&self) -> Result<Summary> {
        let mut sets = SubnetSets::new();

        log::info!("Loading official CIDR lists...");
        self.collect_sources(&mut sets);
        self.collect_bgp(&mut sets)?;

        log::info!("Collapsing networks...");
        let v4 = aggregate_v4(sets.v4());
        let v6 = aggregate_v6(sets.v6());

        write_lists(&self.config.v4_path(), &self.config.v6_path(), &v4, &v6)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::{Source, SourceFormat};
    use crate::Error;
    use std::collections::HashMap;
    use std::fs;
    use std::io::Read;
    use tempfile::tempdir;

    #[derive(Default)]
    struct MapFetcher {
        bodies: HashMap<String, &'static str>,
    }

    impl MapFetcher {
        fn with(mut self, url: &str, body: &'static str) -> Self {
            self.bodies.insert(url.to_string(), body);
            self
        }
    }

    impl Fetch for MapFetcher {
        fn fetch(&self, url: &str) -> Result<Box<dyn Read>> {
            match self.bodies.get(url) {
                Some(body) => Ok(Box::new(body.as_bytes())),
                None => Err(Error::Status {
                    url: url.to_string(),
                    status: 404,
                }),
            }
        }
    }

    #[test]
    fn test_collect_sources_skips_failures() {
        let config = Config::new().with_sources(vec![
            Source::new("a", "mem://a", SourceFormat::Text),
            Source::new("missing", "mem://missing", SourceFormat::Text),
            Source::new("b", "mem://b.json", SourceFormat::Json),
        ]);
        let fetcher = MapFetcher::default()
            .with("mem://a", "10.0.0.0/24\n10.0.0.0/24\n")
            .with("mem://b.json", r#"{"ipv6_prefixes":[{"ipv6_prefix":"2001:db8::/32"}]}"#);

        let pipeline = Pipeline::with_fetcher(config, fetcher);
        let mut sets = SubnetSets::new();
        pipeline.collect_sources(&mut sets);

        assert_eq!(sets.v4().len(), 1);
        assert_eq!(sets.v6().len(), 1);
    }

    #[test]
    fn test_bgp_skipped_without_asn_config() {
        let dir = tempdir().unwrap();
        let config = Config::new()
            .with_sources(Vec::new())
            .with_asn_config(dir.path().join("none.lst"))
            .with_bgp_url("mem://unreachable");

        let pipeline = Pipeline::with_fetcher(config, MapFetcher::default());
        let mut sets = SubnetSets::new();
        assert_eq!(pipeline.collect_bgp(&mut sets).unwrap(), 0);
    }

    #[test]
    fn test_bgp_skipped_when_asn_config_has_no_targets() {
        let dir = tempdir().unwrap();
        let asn_path = dir.path().join("as.lst");
        fs::write(&asn_path, "# only comments\nlabel: AS\n").unwrap();

        let config = Config::new()
            .with_sources(Vec::new())
            .with_asn_config(&asn_path)
            .with_bgp_url("mem://unreachable")
            .with_output_dir(dir.path().join("out"));

        let pipeline = Pipeline::with_fetcher(config, MapFetcher::default());
        let mut sets = SubnetSets::new();
        assert_eq!(pipeline.collect_bgp(&mut sets).unwrap(), 0);
        assert!(sets.is_empty());

        let summary = pipeline.run().unwrap();
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_bgp_failure_is_fatal() {
        let dir = tempdir().unwrap();
        let asn_path = dir.path().join("as.lst");
        fs::write(&asn_path, "x: 65000\n").unwrap();

        let config = Config::new()
            .with_sources(Vec::new())
            .with_asn_config(&asn_path)
            .with_bgp_url("mem://unreachable")
            .with_output_dir(dir.path().join("out"));

        let pipeline = Pipeline::with_fetcher(config, MapFetcher::default());
        assert!(pipeline.run().is_err());
        assert!(!dir.path().join("out").exists());
    }
}
