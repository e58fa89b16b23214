//! Address families and the raw per-family string sets.

use ahash::AHashSet;

/// IP address family of a raw network string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AddressFamily {
    V4,
    V6,
}

impl AddressFamily {
    /// Classify a raw string. Anything containing `:` is IPv6.
    pub fn of(raw: &str) -> Self {
        if raw.contains(':') {
            AddressFamily::V6
        } else {
            AddressFamily::V4
        }
    }
}

/// Unvalidated network strings collected during a run, split by family.
///
/// Deduplication is by exact string only: `"10.0.0.0/24"` and
/// `"10.0.0.1/24"` are kept as two entries and only merge during
/// aggregation.
#[derive(Debug, Default, Clone)]
pub struct SubnetSets {
    v4: AHashSet<String>,
    v6: AHashSet<String>,
}

impl SubnetSets {
    /// Create empty sets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a raw string to the set of its family.
    ///
    /// Returns `true` if the string was not already present.
    pub fn insert(&mut self, raw: impl Into<String>) -> bool {
        let raw = raw.into();
        match AddressFamily::of(&raw) {
            AddressFamily::V4 => self.v4.insert(raw),
            AddressFamily::V6 => self.v6.insert(raw),
        }
    }

    /// Raw IPv4 strings.
    pub fn v4(&self) -> &AHashSet<String> {
        &self.v4
    }

    /// Raw IPv6 strings.
    pub fn v6(&self) -> &AHashSet<String> {
        &self.v6
    }

    /// Total number of raw strings across both families.
    pub fn len(&self) -> usize {
        self.v4.len() + self.v6.len()
    }

    /// Check if both sets are empty.
    pub fn is_empty(&self) -> bool {
        self.v4.is_empty() && self.v6.is_empty()
    }
}

impl<S: Into<String>> Extend<S> for SubnetSets {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for item in iter {
            self.insert(item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_family_by_colon() {
        assert_eq!(AddressFamily::of("10.0.0.0/8"), AddressFamily::V4);
        assert_eq!(AddressFamily::of("2001:db8::/32"), AddressFamily::V6);
        assert_eq!(AddressFamily::of("not-an-ip"), AddressFamily::V4);
        assert_eq!(AddressFamily::of("::ffff:1.2.3.4"), AddressFamily::V6);
    }

    #[test]
    fn test_insert_routes_and_dedups() {
        let mut sets = SubnetSets::new();
        assert!(sets.insert("10.0.0.0/24"));
        assert!(!sets.insert("10.0.0.0/24"));
        assert!(sets.insert("10.0.0.1/24"));
        assert!(sets.insert("2001:db8::/32"));

        assert_eq!(sets.v4().len(), 2);
        assert_eq!(sets.v6().len(), 1);
        assert_eq!(sets.len(), 3);
        assert!(sets.v6().contains("2001:db8::/32"));
    }

    #[test]
    fn test_empty() {
        let sets = SubnetSets::new();
        assert!(sets.is_empty());
        assert_eq!(sets.len(), 0);
    }
}
