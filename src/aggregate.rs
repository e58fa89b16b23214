//! CIDR parsing and collapsing.
//!
//! Raw strings are parsed leniently (host bits are masked off, bare
//! addresses become host routes), sorted by address then prefix length, and
//! collapsed into the smallest set of prefixes covering the same space.

use ipnet::{Ipv4Net, Ipv6Net};
use std::fmt;
use std::net::{Ipv4Addr, Ipv6Addr};

/// A single-family network prefix that can take part in collapsing.
///
/// Implemented for [`Ipv4Net`] and [`Ipv6Net`]. The `Ord` impl must order by
/// network address first and prefix length second.
pub trait Network: Copy + Ord + fmt::Display {
    /// Parse a raw string in non-strict mode.
    ///
    /// Returns the normalized network (host bits zeroed), or `None` if the
    /// string is not a network of this family.
    fn parse_lenient(raw: &str) -> Option<Self>;

    /// Merge networks into the minimal covering set.
    fn aggregate_all(nets: &Vec<Self>) -> Vec<Self>;
}

impl Network for Ipv4Net {
    fn parse_lenient(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let net = match raw.split_once('/') {
            None => Ipv4Net::from(raw.parse::<Ipv4Addr>().ok()?),
            Some((addr, len)) => {
                let addr: Ipv4Addr = addr.parse().ok()?;
                let prefix_len = if is_decimal(len) {
                    len.parse::<u8>().ok()?
                } else {
                    v4_mask_to_prefix(len.parse::<Ipv4Addr>().ok()?)?
                };
                Ipv4Net::new(addr, prefix_len).ok()?
            }
        };
        Some(net.trunc())
    }

    fn aggregate_all(nets: &Vec<Self>) -> Vec<Self> {
        Ipv4Net::aggregate(nets)
    }
}

impl Network for Ipv6Net {
    fn parse_lenient(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let net = match raw.split_once('/') {
            None => Ipv6Net::from(raw.parse::<Ipv6Addr>().ok()?),
            Some((addr, len)) => {
                if !is_decimal(len) {
                    return None;
                }
                Ipv6Net::new(addr.parse().ok()?, len.parse().ok()?).ok()?
            }
        };
        Some(net.trunc())
    }

    fn aggregate_all(nets: &Vec<Self>) -> Vec<Self> {
        Ipv6Net::aggregate(nets)
    }
}

fn is_decimal(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Convert a dotted IPv4 netmask (`255.255.255.0`) or hostmask
/// (`0.0.0.255`) to a prefix length.
fn v4_mask_to_prefix(mask: Ipv4Addr) -> Option<u8> {
    let bits = u32::from(mask);
    if bits.leading_ones() + bits.trailing_zeros() == 32 {
        return Some(bits.leading_ones() as u8);
    }
    let inverted = !bits;
    if inverted.leading_ones() + inverted.trailing_zeros() == 32 {
        return Some(inverted.leading_ones() as u8);
    }
    None
}

/// Parse raw strings, silently dropping anything that is not a network of
/// family `N`.
pub fn parse_networks<N, I, S>(raw: I) -> Vec<N>
where
    N: Network,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    raw.into_iter()
        .filter_map(|s| N::parse_lenient(s.as_ref()))
        .collect()
}

/// Collapse networks into the minimal sorted covering set.
///
/// Contained networks are dropped and adjacent blocks are merged wherever
/// they form a single prefix, so four adjacent /24s end up as one /22.
pub fn collapse<N: Network>(mut nets: Vec<N>) -> Vec<N> {
    nets.sort_unstable();
    nets.dedup();
    let mut out = N::aggregate_all(&nets);
    out.sort_unstable();
    out
}

/// Parse and collapse raw strings of family `N`.
pub fn aggregate<N, I, S>(raw: I) -> Vec<N>
where
    N: Network,
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    collapse(parse_networks(raw))
}

/// Aggregate raw IPv4 strings into canonical CIDR strings.
pub fn aggregate_v4<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    aggregate::<Ipv4Net, _, _>(raw)
        .iter()
        .map(ToString::to_string)
        .collect()
}

/// Aggregate raw IPv6 strings into canonical CIDR strings.
pub fn aggregate_v6<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    aggregate::<Ipv6Net, _, _>(raw)
        .iter()
        .map(ToString::to_string)
        .collect()
}
