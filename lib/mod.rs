// modelfetch: pull one serialized artifact from a TCP peer, read-until-EOF
//
// Pipeline: Connector dials the endpoint, StreamCollector drains the
// connection until the peer closes its send side, the connection is
// released, and the complete buffer is handed to an ArtifactLoader.
// Single-threaded, blocking, no retries, no framing.

pub mod loader;

// Re-export the component crates
pub use mfetch_collector::*;
pub use mfetch_core::*;
pub use mfetch_transport::*;

pub use loader::{ArtifactLoader, LoadError, OpaqueLoader, RawArtifact};

use thiserror::Error;
use tracing::{debug, warn};

/// Any terminal failure of a transfer. No recovery, no partial success.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Connect(#[from] ConnectError),
    #[error(transparent)]
    Read(#[from] ReadError),
    #[error(transparent)]
    Load(#[from] LoadError),
}

/// Fetch one artifact from `endpoint`: connect, collect to EOF, load.
pub fn fetch<L: ArtifactLoader>(
    endpoint: &Endpoint,
    loader: &L,
) -> Result<L::Artifact, FetchError> {
    let conn = Connector::new(endpoint.clone()).connect()?;
    debug!(%endpoint, "connected to peer");
    fetch_over(conn, loader)
}

/// Collect and load over an already-established transport.
///
/// The transport is closed on every exit path. A close failure after a
/// complete collection is logged and swallowed (the bytes are already in
/// hand); a close failure on the error path never masks the read error
/// that caused it.
pub fn fetch_over<T: Transport, L: ArtifactLoader>(
    mut transport: T,
    loader: &L,
) -> Result<L::Artifact, FetchError> {
    let mut collector = StreamCollector::new();

    let buffer = match collector.collect(&mut transport) {
        Ok(buffer) => buffer,
        Err(read_err) => {
            if let Err(close_err) = transport.close() {
                warn!(error = %close_err, "teardown failed after read error");
            }
            return Err(read_err.into());
        }
    };
    debug!(bytes = buffer.len(), "transfer complete");

    if let Err(close_err) = transport.close() {
        warn!(error = %close_err, "teardown failed after complete transfer");
    }

    Ok(loader.load(buffer.into_bytes())?)
}
