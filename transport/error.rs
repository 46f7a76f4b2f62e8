// Transport error taxonomy
use mfetch_core::Endpoint;
use nix::errno::Errno;
use thiserror::Error;

/// Connection establishment failed. Never retried; terminal for the call.
#[derive(Debug, Error)]
pub enum ConnectError {
    #[error("socket creation failed: {0}")]
    Socket(#[source] Errno),
    #[error("handshake with {endpoint} failed: {source}")]
    Handshake {
        endpoint: Endpoint,
        #[source]
        source: Errno,
    },
}

/// Releasing the connection failed.
///
/// Non-fatal once a transfer has completed (the data is already out of the
/// socket), but must never mask an earlier read error.
#[derive(Debug, Error)]
#[error("closing connection failed: {0}")]
pub struct CloseError(#[source] pub std::io::Error);
