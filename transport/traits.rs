// Transport abstraction - lets the collector run over any byte-stream source
use crate::error::CloseError;
use std::io::Result;

/// A live, exclusively-owned byte-stream source.
///
/// The transfer is unidirectional (peer to client), so the seam is
/// receive-only. A receive of `Ok(0)` means the peer has closed its send
/// side and no further bytes will ever arrive.
pub trait Transport: Send {
    fn receive(&mut self, buf: &mut [u8]) -> Result<usize>;
    fn close(&mut self) -> std::result::Result<(), CloseError>;
}
