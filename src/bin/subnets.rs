//! subnets: build collapsed IPv4/IPv6 CIDR lists from provider feeds and BGP data.

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;
use subnets::{Config, Pipeline, SourceList};

#[derive(Parser)]
#[command(name = "subnets")]
#[command(version = "0.1.0")]
#[command(about = "Aggregate provider and ASN IP ranges into collapsed CIDR lists", long_about = None)]
struct Cli {
    /// Output directory for ipv4.lst and ipv6.lst
    #[arg(short, long, default_value = "subnets")]
    output_dir: PathBuf,

    /// ASN config file (label:asn,asn per line)
    #[arg(short, long, default_value = "src/as_numbers.lst")]
    asn_config: PathBuf,

    /// YAML source list replacing the built-in providers
    #[arg(short, long)]
    sources: Option<PathBuf>,

    /// BGP table snapshot URL
    #[arg(long, default_value = "https://bgp.tools/table.txt")]
    bgp_url: String,

    /// User-Agent header for all requests
    #[arg(long)]
    user_agent: Option<String>,

    /// Request timeout in seconds (HTTP client default when omitted)
    #[arg(long)]
    timeout: Option<u64>,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    if let Err(e) = run(cli) {
        eprintln!("Fatal error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::new()
        .with_output_dir(cli.output_dir)
        .with_asn_config(cli.asn_config)
        .with_bgp_url(cli.bgp_url);

    if let Some(path) = cli.sources {
        config = config.with_sources(SourceList::load(&path)?.into_sources());
    }
    if let Some(user_agent) = cli.user_agent {
        config = config.with_user_agent(user_agent);
    }
    if let Some(secs) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(secs));
    }

    let summary = Pipeline::new(config)?.run()?;
    println!("Success! {}", summary);
    Ok(())
}
