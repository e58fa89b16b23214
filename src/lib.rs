//! Subnets - collapsed CIDR allowlists from provider feeds and BGP data.
//!
//! This crate gathers the IP ranges published by a set of providers (cloud
//! platforms, CDNs, messaging services), optionally adds every prefix the
//! BGP table attributes to a configured list of ASNs, and writes two
//! minimal, non-overlapping CIDR lists: one for IPv4 and one for IPv6.
//!
//! # Pipeline
//!
//! 1. **Sources**: each provider feed is fetched and parsed as JSON or plain
//!    text. A failing feed is logged and skipped.
//! 2. **BGP**: if an ASN config exists, the BGP table is streamed line by
//!    line and prefixes whose origin AS is a target are kept.
//! 3. **Aggregation**: raw strings are parsed leniently, sorted and
//!    collapsed per address family.
//! 4. **Output**: both lists are written as newline-joined text.
//!
//! # Quick Start
//!
//! ```ignore
//! use subnets::{Config, Pipeline};
//!
//! let pipeline = Pipeline::new(Config::default().with_output_dir("subnets"))?;
//! let summary = pipeline.run()?;
//! println!("Success! {}", summary);
//! ```
//!
//! Aggregation can also be used on its own:
//!
//! ```
//! use subnets::aggregate_v4;
//!
//! let collapsed = aggregate_v4(["10.0.0.0/24", "10.0.1.0/24", "10.0.0.128/25", "junk"]);
//! assert_eq!(collapsed, vec!["10.0.0.0/23"]);
//! ```

mod error;
mod family;
mod pipeline;

pub mod aggregate;
pub mod asn;
pub mod bgp;
pub mod config;
pub mod fetch;
pub mod output;
pub mod source;

// Re-export core types
pub use error::{Error, Result};
pub use family::{AddressFamily, SubnetSets};

pub use aggregate::{aggregate_v4, aggregate_v6, collapse, Network};
pub use asn::{AsnGroup, AsnSet};
pub use bgp::BgpTableFilter;
pub use config::{Config, SourceList};
pub use fetch::{Fetch, HttpFetcher};
pub use output::Summary;
pub use pipeline::Pipeline;
pub use source::{default_sources, Source, SourceFormat};
