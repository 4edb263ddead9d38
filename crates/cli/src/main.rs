use clap::Parser;
use dns2host_domain::CliOverrides;
use dns2host_infrastructure::StubResolver;
use std::process::ExitCode;
use tracing::{debug, error};

mod bootstrap;

#[derive(Parser)]
#[command(name = "dns2host")]
#[command(version)]
#[command(about = "Resolve host names against an explicit DNS server")]
struct Cli {
    /// Host names (or literal addresses) to resolve
    #[arg(required = true, value_name = "HOST")]
    hosts: Vec<String>,

    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Resolver to query (literal IP address)
    #[arg(short = 's', long, value_name = "SERVER")]
    server: Option<String>,

    /// Per-attempt timeout in seconds (0 disables it)
    #[arg(short = 't', long, value_name = "SECS")]
    timeout: Option<u64>,

    /// Also query AAAA records
    #[arg(long)]
    aaaa: bool,

    /// Retry truncated UDP answers over TCP
    #[arg(long)]
    tcp_fallback: bool,

    /// Search suffix, may be repeated
    #[arg(long = "search", value_name = "SUFFIX")]
    search: Vec<String>,

    /// Dots a name needs before it is tried ahead of the search list
    #[arg(long, value_name = "N")]
    ndots: Option<usize>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        nameserver: cli.server.clone(),
        timeout: cli.timeout,
        ipv6: cli.aaaa,
        tcp_fallback: cli.tcp_fallback,
        search: cli.search.clone(),
        ndots: cli.ndots,
        log_level: cli.log_level.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;
    bootstrap::init_logging(&config);

    debug!(nameserver = %config.nameserver.address, "dns2host v{}", env!("CARGO_PKG_VERSION"));

    let resolver = StubResolver::new(config.resolver.clone());
    let mut failed = false;

    for host in &cli.hosts {
        match resolver.lookup_host(&config.nameserver.address, host).await {
            Ok(addrs) => {
                for addr in addrs {
                    println!("{}\t{}", host, addr);
                }
            }
            Err(e) => {
                error!(host = %host, error = %e, "Lookup failed");
                failed = true;
            }
        }
    }

    Ok(if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
