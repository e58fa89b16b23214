//! BGP table stream filter.
//!
//! The table is a line-oriented text feed where each line starts with an
//! announced prefix followed by the AS path:
//!
//! ```text
//! 1.1.1.0/24 13335
//! 192.0.2.0/24 AS65000 AS64500
//! ```
//!
//! Only the first AS of the path is matched against the targets.

use std::io::{BufRead, BufReader, Read};

use crate::asn::AsnSet;
use crate::family::SubnetSets;
use crate::fetch::Fetch;
use crate::Result;

/// Default BGP table snapshot feed.
pub const DEFAULT_BGP_TABLE_URL: &str = "https://bgp.tools/table.txt";

/// Filters BGP table lines down to prefixes announced by target ASNs.
pub struct BgpTableFilter<'a> {
    targets: &'a AsnSet,
}

impl<'a> BgpTableFilter<'a> {
    pub fn new(targets: &'a AsnSet) -> Self {
        Self { targets }
    }

    /// Return the prefix field if the line is announced by a target ASN.
    ///
    /// Lines with fewer than two fields yield `None`.
    pub fn match_line<'l>(&self, line: &'l str) -> Option<&'l str> {
        let mut fields = line.split_whitespace();
        let prefix = fields.next()?;
        let origin = fields.next()?;
        if self.targets.contains(strip_as_prefix(origin)) {
            Some(prefix)
        } else {
            None
        }
    }

    /// Stream a table from a reader, adding matched prefixes to `sets`.
    ///
    /// Reads one line at a time. Returns the number of matched lines. Read
    /// errors and invalid UTF-8 abort the stream.
    pub fn filter_reader<R: Read>(&self, reader: R, sets: &mut SubnetSets) -> Result<usize> {
        let mut matched = 0;
        let mut line = String::new();
        let mut reader = BufReader::new(reader);
        loop {
            line.clear();
            if reader.read_line(&mut line)? == 0 {
                break;
            }
            if let Some(prefix) = self.match_line(&line) {
                sets.insert(prefix);
                matched += 1;
            }
        }
        Ok(matched)
    }

    /// Fetch the table from `url` and stream it into `sets`.
    pub fn filter_url(&self, fetcher: &dyn Fetch, url: &str, sets: &mut SubnetSets) -> Result<usize> {
        let body = fetcher.fetch(url)?;
        let matched = self.filter_reader(body, sets)?;
        log::info!("Matched {} BGP table entries from {}", matched, url);
        Ok(matched)
    }
}

/// Strip a leading `AS`/`as` from an AS path token.
fn strip_as_prefix(token: &str) -> &str {
    match token.get(..2) {
        Some(head) if head.eq_ignore_ascii_case("as") => &token[2..],
        _ => token,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn targets(asns: &[&str]) -> AsnSet {
        asns.iter().copied().collect()
    }

    #[test]
    fn test_first_as_only() {
        let line = "192.0.2.0/24 AS65000 AS64500";

        let set = targets(&["65000"]);
        assert_eq!(BgpTableFilter::new(&set).match_line(line), Some("192.0.2.0/24"));

        let set = targets(&["64500"]);
        assert_eq!(BgpTableFilter::new(&set).match_line(line), None);
    }

    #[test]
    fn test_as_prefix_case_insensitive() {
        let set = targets(&["13335"]);
        let filter = BgpTableFilter::new(&set);
        assert_eq!(filter.match_line("1.1.1.0/24 13335"), Some("1.1.1.0/24"));
        assert_eq!(filter.match_line("1.0.0.0/24 as13335"), Some("1.0.0.0/24"));
        assert_eq!(filter.match_line("2606:4700::/32 As13335"), Some("2606:4700::/32"));
    }

    #[test]
    fn test_short_lines_skipped() {
        let set = targets(&["13335"]);
        let filter = BgpTableFilter::new(&set);
        assert_eq!(filter.match_line(""), None);
        assert_eq!(filter.match_line("1.1.1.0/24"), None);
        assert_eq!(filter.match_line("   \t "), None);
    }

    #[test]
    fn test_filter_reader_routes_families() {
        let table = "\
192.0.2.0/24 AS65000 AS64500
198.51.100.0/24 64500
2001:db8::/32 65000
malformed

203.0.113.0/24\t65000
";
        let set = targets(&["65000"]);
        let mut sets = SubnetSets::new();
        let matched = BgpTableFilter::new(&set)
            .filter_reader(table.as_bytes(), &mut sets)
            .unwrap();

        assert_eq!(matched, 3);
        assert!(sets.v4().contains("192.0.2.0/24"));
        assert!(sets.v4().contains("203.0.113.0/24"));
        assert!(!sets.v4().contains("198.51.100.0/24"));
        assert!(sets.v6().contains("2001:db8::/32"));
    }

    #[test]
    fn test_invalid_utf8_is_error() {
        let set = targets(&["1"]);
        let mut sets = SubnetSets::new();
        let data: &[u8] = b"10.0.0.0/8 1\n\xff\xfe 1\n";
        assert!(BgpTableFilter::new(&set).filter_reader(data, &mut sets).is_err());
    }

    #[test]
    fn test_strip_as_prefix() {
        assert_eq!(strip_as_prefix("AS65000"), "65000");
        assert_eq!(strip_as_prefix("65000"), "65000");
        assert_eq!(strip_as_prefix("A"), "A");
        assert_eq!(strip_as_prefix("AS"), "");
    }
}
