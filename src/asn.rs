//! Target ASN configuration.
//!
//! The config file holds one group per line:
//!
//! ```text
//! # comment
//! cloudflare: 13335, 209242
//! hetzner:AS24940
//! ```
//!
//! Lines without a colon, or starting with `#`, are ignored. Every ASN token
//! keeps only its digits.

use ahash::AHashSet;
use std::fs;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::Result;

/// Default location of the ASN config file.
pub const DEFAULT_ASN_CONFIG: &str = "src/as_numbers.lst";

/// One labelled line of the ASN config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsnGroup {
    pub label: String,
    pub asns: Vec<String>,
}

/// Set of ASNs (digit strings) used to filter the BGP table.
#[derive(Debug, Clone, Default)]
pub struct AsnSet {
    asns: AHashSet<String>,
    groups: Vec<AsnGroup>,
}

impl AsnSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the config from a file.
    ///
    /// A missing file is not an error and yields an empty set.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            log::debug!("ASN config {:?} not found, BGP lookup disabled", path);
            return Ok(Self::default());
        }
        let file = fs::File::open(path)?;
        Self::parse(file)
    }

    /// Parse config lines from a reader.
    pub fn parse<R: Read>(reader: R) -> Result<Self> {
        let mut set = Self::new();
        for line in BufReader::new(reader).lines() {
            let line = line?;
            if let Some(group) = parse_line(&line) {
                set.add_group(group);
            }
        }
        Ok(set)
    }

    /// Parse config lines from a string.
    pub fn parse_str(content: &str) -> Self {
        let mut set = Self::new();
        for group in content.lines().filter_map(parse_line) {
            set.add_group(group);
        }
        set
    }

    fn add_group(&mut self, group: AsnGroup) {
        self.asns.extend(group.asns.iter().cloned());
        self.groups.push(group);
    }

    /// Add a single ASN, stripping non-digit characters.
    ///
    /// Returns `false` if nothing numeric was left or it was already present.
    pub fn insert(&mut self, asn: &str) -> bool {
        match normalize_asn(asn) {
            Some(asn) => self.asns.insert(asn),
            None => false,
        }
    }

    /// Check membership of an already-normalized ASN.
    pub fn contains(&self, asn: &str) -> bool {
        self.asns.contains(asn)
    }

    /// Labelled groups in file order.
    pub fn groups(&self) -> &[AsnGroup] {
        &self.groups
    }

    /// Iterate over all ASNs.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.asns.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.asns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.asns.is_empty()
    }
}

impl<'a> FromIterator<&'a str> for AsnSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut set = Self::new();
        for asn in iter {
            set.insert(asn);
        }
        set
    }
}

/// Parse one config line into a group.
///
/// The comment check looks at the raw line, so an indented `#` is not a
/// comment. Only the field between the first and second colon is read.
fn parse_line(line: &str) -> Option<AsnGroup> {
    if !line.contains(':') || line.starts_with('#') {
        return None;
    }
    let mut fields = line.trim().split(':');
    let label = fields.next().unwrap_or_default().trim().to_string();
    let asns = fields
        .next()
        .unwrap_or_default()
        .split(',')
        // Digit-less tokens such as `AS` are dropped rather than kept as "",
        // so a group of them yields no targets and the BGP step is skipped.
        .filter_map(normalize_asn)
        .collect();
    Some(AsnGroup { label, asns })
}

/// Keep only ASCII digits. Empty results are rejected.
fn normalize_asn(token: &str) -> Option<String> {
    let digits: String = token.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        None
    } else {
        Some(digits)
    }
}
