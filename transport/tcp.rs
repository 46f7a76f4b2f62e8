// TCP connector and connection handle (blocking I/O)
use crate::error::{CloseError, ConnectError};
use crate::traits::Transport;
use mfetch_core::Endpoint;
use nix::sys::socket::{self, sockopt, AddressFamily, SockFlag, SockType, SockaddrIn};
use std::io::{Error, ErrorKind, Read, Result};
use std::net::{Shutdown, TcpStream};
use std::os::fd::AsRawFd;

// Receive buffer hint for large artifact transfers (64KB, best-effort)
const RECV_BUFFER_SIZE: usize = 65536;

/// Dials a fixed [`Endpoint`] and produces exactly one live [`Connection`].
pub struct Connector {
    endpoint: Endpoint,
}

impl Connector {
    pub fn new(endpoint: Endpoint) -> Self {
        Connector { endpoint }
    }

    /// Establish one blocking TCP connection to the configured endpoint.
    ///
    /// Socket allocation and the handshake are reported as distinct
    /// failures. The calling thread blocks until the handshake completes
    /// or fails; a failed attempt is terminal, there are no retries.
    pub fn connect(&self) -> std::result::Result<Connection, ConnectError> {
        let fd = socket::socket(
            AddressFamily::Inet,
            SockType::Stream,
            SockFlag::empty(),
            None,
        )
        .map_err(ConnectError::Socket)?;

        let octets = self.endpoint.host().octets();
        let addr = SockaddrIn::new(
            octets[0],
            octets[1],
            octets[2],
            octets[3],
            self.endpoint.port(),
        );

        socket::connect(fd.as_raw_fd(), &addr).map_err(|e| ConnectError::Handshake {
            endpoint: self.endpoint.clone(),
            source: e,
        })?;

        // Grow the receive buffer for high-throughput transfers
        let _ = socket::setsockopt(&fd, sockopt::RcvBuf, &RECV_BUFFER_SIZE);

        Ok(Connection {
            stream: Some(TcpStream::from(fd)),
        })
    }
}

/// An established, exclusively-owned byte stream to the peer.
/// Receives after `close` fail with `NotConnected`; dropping an open
/// connection releases the socket, so no exit path leaks it.
pub struct Connection {
    stream: Option<TcpStream>,
}

impl Transport for Connection {
    fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
        if let Some(ref mut stream) = self.stream {
            stream.read(buf)
        } else {
            Err(Error::new(ErrorKind::NotConnected, "connection closed"))
        }
    }

    fn close(&mut self) -> std::result::Result<(), CloseError> {
        match self.stream.take() {
            Some(stream) => {
                // Half-close both directions before the fd itself is
                // released by dropping the stream. The peer has usually
                // already closed, so NotConnected is not a failure.
                if let Err(e) = stream.shutdown(Shutdown::Both) {
                    if e.kind() != ErrorKind::NotConnected {
                        return Err(CloseError(e));
                    }
                }
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl Drop for Connection {
    fn drop(&mut self) {
        if let Some(stream) = self.stream.take() {
            let _ = stream.shutdown(Shutdown::Both);
        }
    }
}
