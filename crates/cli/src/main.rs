use clap::Parser;
use ferrous_dnswire_domain::{CliOverrides, LogFormat, OutputFormat};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

mod bootstrap;
mod di;
mod input;

#[derive(Parser)]
#[command(name = "ferrous-dnswire")]
#[command(version = "0.1.0")]
#[command(about = "Ferrous DNSWire - DNS packet inspector and destination rewriter")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// Hex-encoded packets, one per line (stdin when omitted or '-')
    #[arg(short = 'i', long, value_name = "FILE")]
    input: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Log format (text, json)
    #[arg(long)]
    log_format: Option<LogFormat>,

    /// Observation output format (text, json)
    #[arg(short = 'o', long)]
    output: Option<OutputFormat>,

    /// Redirect IPv4 DNS queries to this resolver
    #[arg(long, value_name = "ADDR")]
    redirect_ipv4: Option<String>,

    /// Redirect IPv6 DNS queries to this resolver
    #[arg(long, value_name = "ADDR")]
    redirect_ipv6: Option<String>,

    /// Write every rewritten packet, hex-encoded, to this file
    #[arg(long, value_name = "FILE")]
    rewritten_out: Option<String>,

    /// Write the default configuration to this file and exit
    #[arg(long, value_name = "FILE")]
    write_default_config: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Some(path) = cli.write_default_config.as_deref() {
        bootstrap::write_default_config(path)?;
        println!("Default configuration written to {}", path);
        return Ok(());
    }

    let cli_overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        log_format: cli.log_format,
        output_format: cli.output,
        redirect_ipv4: cli.redirect_ipv4.clone(),
        redirect_ipv6: cli.redirect_ipv6.clone(),
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting Ferrous DNSWire v{}", env!("CARGO_PKG_VERSION"));

    let services = di::Services::new(&config);
    let mut rewritten_out = match cli.rewritten_out.as_deref() {
        Some(path) => Some(File::create(path).await?),
        None => None,
    };

    let mut lines = input::open(cli.input.as_deref()).await?;
    let mut line_no = 0usize;

    while let Some(line) = lines.next_line().await? {
        line_no += 1;
        let mut packet = match input::parse_hex_line(&line) {
            Ok(Some(packet)) => packet,
            Ok(None) => continue,
            Err(e) => {
                warn!(line = line_no, error = %e, "Skipping malformed input line");
                continue;
            }
        };

        // Rejections are counted and logged by the use case.
        let Ok(outcome) = services.inspect.execute(&mut packet).await else {
            continue;
        };

        if let (true, Some(out)) = (outcome.rewritten, rewritten_out.as_mut()) {
            let mut encoded = hex::encode(&packet);
            encoded.push('\n');
            out.write_all(encoded.as_bytes()).await?;
        }
    }

    services.sink.flush().await?;
    if let Some(out) = rewritten_out.as_mut() {
        out.flush().await?;
    }

    let stats = services.inspect.stats().snapshot();
    info!(
        inspected = stats.inspected,
        decoded = stats.decoded,
        rejected = stats.rejected,
        queries = stats.queries,
        responses = stats.responses,
        redirected = stats.redirected,
        reserved_answers = stats.reserved_answers,
        rejections = ?stats.rejections,
        "Inspection finished"
    );

    Ok(())
}
