use crate::errors::{ErrorCode, TlvError};
use crate::tlv_err;
use bytes::Bytes;
use std::io::Read;

/// Uniform byte supply for the reader. A TLV is always consumed front to
/// back, so one exact-read primitive is enough for both source kinds.
pub trait Source {
    fn read_exact(&mut self, count: usize) -> Result<Bytes, TlvError>;
}

/// Random-access source over an in-memory buffer.
///
/// Reading advances the position; whatever is left after a TLV has been
/// consumed stays available via `remaining()` / `into_rest()`.
#[derive(Debug, Clone)]
pub struct BufferSource {
    data: Bytes,
    position: usize,
}

impl BufferSource {
    pub fn new(data: impl Into<Bytes>) -> Self {
        BufferSource {
            data: data.into(),
            position: 0,
        }
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn limit(&self) -> usize {
        self.data.len()
    }

    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }

    /// The unconsumed tail of the buffer.
    pub fn into_rest(self) -> Bytes {
        self.data.slice(self.position..)
    }
}

impl Source for BufferSource {
    fn read_exact(&mut self, count: usize) -> Result<Bytes, TlvError> {
        if count > self.remaining() {
            return Err(tlv_err!(
                ErrorCode::BufferUnderflow,
                "attempt to read {} octets with {} remaining",
                count,
                self.remaining()
            ));
        }
        let chunk = self.data.slice(self.position..self.position + count);
        self.position += count;
        Ok(chunk)
    }
}

/// One-shot source over a byte stream. Blocks on the underlying reader;
/// a stream that ends mid-TLV surfaces as `EndOfStream`.
#[derive(Debug)]
pub struct StreamSource<R: Read> {
    inner: R,
}

impl<R: Read> StreamSource<R> {
    pub fn new(inner: R) -> Self {
        StreamSource { inner }
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read> Source for StreamSource<R> {
    fn read_exact(&mut self, count: usize) -> Result<Bytes, TlvError> {
        let mut buffer = vec![0u8; count];
        match self.inner.read_exact(&mut buffer) {
            Ok(()) => Ok(Bytes::from(buffer)),
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => Err(tlv_err!(
                ErrorCode::EndOfStream,
                "stream ended while reading {} octets",
                count
            )),
            Err(e) => Err(tlv_err!(ErrorCode::Io, "read failed: {}", e)),
        }
    }
}
