// mfetch-serve: serve a file's bytes to each connecting client, then close.
// Test peer for mfetch; the close after the final write is the client's
// only completion signal.
use anyhow::Context;
use clap::Parser;
use std::io::Write;
use std::net::TcpListener;
use std::path::PathBuf;
use std::thread;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "mfetch-serve", about = "Serve an artifact file over TCP")]
struct Args {
    /// Address to listen on
    #[arg(short = 'a', long, default_value = "127.0.0.1")]
    address: String,

    /// Port to listen on
    #[arg(short = 'p', long, default_value_t = 12345)]
    port: u16,

    /// File whose bytes are sent to every client
    #[arg(short = 'f', long)]
    file: PathBuf,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let artifact =
        std::fs::read(&args.file).with_context(|| format!("reading {}", args.file.display()))?;
    info!(size = artifact.len(), file = %args.file.display(), "artifact loaded");

    let addr = format!("{}:{}", args.address, args.port);
    let listener = TcpListener::bind(&addr).with_context(|| format!("binding {addr}"))?;
    info!(%addr, "serving");

    for stream in listener.incoming() {
        let mut stream = match stream {
            Ok(s) => s,
            Err(e) => {
                error!(error = %e, "accept failed");
                continue;
            }
        };
        let peer = stream.peer_addr().ok();
        let bytes = artifact.clone();

        thread::spawn(move || {
            match stream.write_all(&bytes) {
                Ok(()) => info!(peer = ?peer, size = bytes.len(), "artifact sent"),
                Err(e) => error!(peer = ?peer, error = %e, "send failed"),
            }
            // Dropping the stream closes the connection: EOF for the client.
        });
    }

    Ok(())
}
