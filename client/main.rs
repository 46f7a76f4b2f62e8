// mfetch: fetch one serialized artifact from a TCP peer and report its size
use anyhow::Context;
use clap::Parser;
use modelfetch::{fetch, Endpoint, OpaqueLoader};
use std::net::Ipv4Addr;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mfetch", about = "Receive a serialized artifact over TCP")]
struct Args {
    /// IPv4 address of the serving peer
    #[arg(short = 'a', long, default_value = "127.0.0.1")]
    address: Ipv4Addr,

    /// TCP port of the serving peer
    #[arg(short = 'p', long, default_value_t = 12345)]
    port: u16,

    /// Write the received artifact bytes to this file
    #[arg(short = 'o', long)]
    output: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let endpoint = Endpoint::new(args.address, args.port)
        .with_context(|| format!("bad endpoint {}:{}", args.address, args.port))?;

    info!(%endpoint, "connecting to peer");
    let artifact = fetch(&endpoint, &OpaqueLoader)
        .with_context(|| format!("transfer from {endpoint} failed"))?;

    info!(size = artifact.size(), "artifact received");

    if let Some(path) = args.output {
        std::fs::write(&path, artifact.as_bytes())
            .with_context(|| format!("writing artifact to {}", path.display()))?;
        info!(path = %path.display(), "artifact written");
    }

    Ok(())
}
