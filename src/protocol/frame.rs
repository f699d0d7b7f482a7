//! Frame header encoding and the typed frame codec.

use bytes::Bytes;

use super::payload::PayloadCodec;
use crate::error::FrameError;

/// Size of the length prefix in bytes.
pub const HEADER_LEN: usize = 4;

/// Largest body a frame may carry. The length field is read by peers as a
/// signed 32-bit integer, so anything above `i32::MAX` is rejected.
pub const MAX_BODY_LEN: usize = i32::MAX as usize;

/// One length-prefixed unit on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    header: [u8; HEADER_LEN],
    body: Bytes,
}

impl Frame {
    /// Build a frame around `body`, computing its header.
    pub fn new(body: impl Into<Bytes>) -> Result<Self, FrameError> {
        let body = body.into();
        let header = encode_header(body.len())?;
        Ok(Frame { header, body })
    }

    pub fn header(&self) -> &[u8; HEADER_LEN] {
        &self.header
    }

    pub fn body(&self) -> &Bytes {
        &self.body
    }

    /// Total bytes the frame occupies on the wire.
    pub fn wire_len(&self) -> usize {
        HEADER_LEN + self.body.len()
    }

    pub fn into_parts(self) -> ([u8; HEADER_LEN], Bytes) {
        (self.header, self.body)
    }
}

/// Encode a body length as a big-endian header.
pub fn encode_header(len: usize) -> Result<[u8; HEADER_LEN], FrameError> {
    if len > MAX_BODY_LEN {
        return Err(FrameError::FrameTooLarge(len as u64));
    }
    Ok((len as u32).to_be_bytes())
}

/// Decode a big-endian header into a body length.
pub fn decode_header(header: &[u8]) -> Result<usize, FrameError> {
    let bytes: [u8; HEADER_LEN] = header.try_into().map_err(|_| {
        FrameError::Decoding(format!(
            "header must be {} bytes, got {}",
            HEADER_LEN,
            header.len()
        ))
    })?;

    let len = u32::from_be_bytes(bytes) as usize;
    if len > MAX_BODY_LEN {
        return Err(FrameError::FrameTooLarge(len as u64));
    }
    Ok(len)
}

/// Turns messages into frames and frame bodies back into messages,
/// delegating body serialization to the wrapped [`PayloadCodec`].
#[derive(Debug, Clone, Default)]
pub struct FrameCodec<C> {
    codec: C,
}

impl<C> FrameCodec<C> {
    pub fn new(codec: C) -> Self {
        FrameCodec { codec }
    }

    /// Serialize `message` and prefix it with its length.
    pub fn encode<M>(&self, message: &M) -> Result<Frame, FrameError>
    where
        C: PayloadCodec<M>,
    {
        let body = self.codec.encode(message)?;
        Frame::new(body)
    }

    /// Deserialize a frame body.
    pub fn decode<M>(&self, body: &[u8]) -> Result<M, FrameError>
    where
        C: PayloadCodec<M>,
    {
        self.codec.decode(body)
    }
}
