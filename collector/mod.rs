// Collector module: drains a transport into a complete, ordered byte buffer
use mfetch_transport::Transport;
use std::io::ErrorKind;
use thiserror::Error;

/// Scratch region size for a single receive call.
pub const CHUNK_SIZE: usize = 1024;

/// A receive on an established connection failed. Terminal: anything
/// accumulated so far is discarded, never handed downstream truncated.
#[derive(Debug, Error)]
#[error("read on connection failed: {0}")]
pub struct ReadError(#[from] pub std::io::Error);

/// Growable, append-only accumulator for the received byte stream.
/// Holds the exact ordered concatenation of every chunk appended so far;
/// growth is amortized geometric since the total size is unknown upfront.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct TransferBuffer {
    bytes: Vec<u8>,
}

impl TransferBuffer {
    pub fn new() -> Self {
        TransferBuffer { bytes: Vec::new() }
    }

    pub fn append(&mut self, chunk: &[u8]) {
        self.bytes.extend_from_slice(chunk);
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Hand the accumulated bytes off to a consumer, ending this buffer's life.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

/// Reads a transport to end-of-stream, accumulating everything it sends.
pub struct StreamCollector {
    chunk: Vec<u8>,
}

impl Default for StreamCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl StreamCollector {
    pub fn new() -> Self {
        StreamCollector {
            chunk: vec![0u8; CHUNK_SIZE],
        }
    }

    /// Drain `transport` into a [`TransferBuffer`].
    ///
    /// Loops on blocking receives: a positive count appends exactly that
    /// many bytes in order, a zero count is the sole completion signal
    /// (the peer closed its send side; there is no length prefix or
    /// sentinel). Interrupted reads are retried; any other error aborts
    /// the transfer and drops the partial buffer. There is no timeout: a
    /// peer that never sends and never closes blocks indefinitely.
    pub fn collect<T: Transport>(
        &mut self,
        transport: &mut T,
    ) -> Result<TransferBuffer, ReadError> {
        let mut buffer = TransferBuffer::new();
        loop {
            match transport.receive(&mut self.chunk) {
                Ok(0) => return Ok(buffer),
                Ok(n) => buffer.append(&self.chunk[..n]),
                Err(ref e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(ReadError(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mfetch_transport::CloseError;
    use std::collections::VecDeque;
    use std::io::{Error, Result};

    // Scripted transport: replays queued chunks, then EOF or a failure.
    struct ScriptedTransport {
        chunks: VecDeque<Vec<u8>>,
        fail_at_end: Option<ErrorKind>,
    }

    impl ScriptedTransport {
        fn sending(payload: &[u8], write_size: usize) -> Self {
            let chunks = payload
                .chunks(write_size.max(1))
                .map(|c| c.to_vec())
                .collect();
            ScriptedTransport {
                chunks,
                fail_at_end: None,
            }
        }

        fn failing_after(payload: &[u8], kind: ErrorKind) -> Self {
            let mut t = Self::sending(payload, CHUNK_SIZE);
            t.fail_at_end = Some(kind);
            t
        }
    }

    impl Transport for ScriptedTransport {
        fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
            match self.chunks.pop_front() {
                Some(mut chunk) => {
                    // A single peer write can span several partial reads.
                    let n = chunk.len().min(buf.len());
                    buf[..n].copy_from_slice(&chunk[..n]);
                    if n < chunk.len() {
                        chunk.drain(..n);
                        self.chunks.push_front(chunk);
                    }
                    Ok(n)
                }
                None => match self.fail_at_end.take() {
                    Some(kind) => Err(Error::new(kind, "scripted failure")),
                    None => Ok(0),
                },
            }
        }

        fn close(&mut self) -> std::result::Result<(), CloseError> {
            Ok(())
        }
    }

    fn payload(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i % 251) as u8).collect()
    }

    #[test]
    fn empty_stream_yields_empty_buffer() {
        let mut transport = ScriptedTransport::sending(&[], 1);
        let buf = StreamCollector::new().collect(&mut transport).unwrap();
        assert!(buf.is_empty());
    }

    #[test]
    fn chunking_does_not_change_contents() {
        let data = payload(12 * 1024);
        for write_size in [1, 1023, CHUNK_SIZE, 4096] {
            let mut transport = ScriptedTransport::sending(&data, write_size);
            let buf = StreamCollector::new().collect(&mut transport).unwrap();
            assert_eq!(buf.as_slice(), data.as_slice(), "write size {write_size}");
        }
    }

    #[test]
    fn bytes_arrive_in_order_without_gaps() {
        let data = payload(37);
        let mut transport = ScriptedTransport {
            chunks: VecDeque::from(vec![
                data[..10].to_vec(),
                data[10..30].to_vec(),
                data[30..].to_vec(),
            ]),
            fail_at_end: None,
        };
        let buf = StreamCollector::new().collect(&mut transport).unwrap();
        assert_eq!(buf.len(), 37);
        assert_eq!(buf.as_slice(), data.as_slice());
    }

    #[test]
    fn read_error_discards_partial_data() {
        let data = payload(4096);
        let mut transport = ScriptedTransport::failing_after(&data, ErrorKind::ConnectionReset);
        let err = StreamCollector::new().collect(&mut transport).unwrap_err();
        assert_eq!(err.0.kind(), ErrorKind::ConnectionReset);
        // The Result carries no buffer at all; nothing partial escapes.
    }

    #[test]
    fn interrupted_reads_are_retried() {
        struct InterruptOnce {
            inner: ScriptedTransport,
            interrupted: bool,
        }
        impl Transport for InterruptOnce {
            fn receive(&mut self, buf: &mut [u8]) -> Result<usize> {
                if !self.interrupted {
                    self.interrupted = true;
                    return Err(Error::new(ErrorKind::Interrupted, "EINTR"));
                }
                self.inner.receive(buf)
            }
            fn close(&mut self) -> std::result::Result<(), CloseError> {
                self.inner.close()
            }
        }

        let data = payload(100);
        let mut transport = InterruptOnce {
            inner: ScriptedTransport::sending(&data, 64),
            interrupted: false,
        };
        let buf = StreamCollector::new().collect(&mut transport).unwrap();
        assert_eq!(buf.as_slice(), data.as_slice());
    }

    #[test]
    fn large_transfer_is_byte_exact() {
        let data = payload(8 * 1024 * 1024);
        let mut transport = ScriptedTransport::sending(&data, CHUNK_SIZE);
        let buf = StreamCollector::new().collect(&mut transport).unwrap();
        assert_eq!(buf.len(), data.len());
        assert_eq!(buf.as_slice(), data.as_slice());
    }
}
