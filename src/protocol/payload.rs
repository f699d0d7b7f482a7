//! Body serialization capability.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::FrameError;

/// Converts a payload of type `M` to and from frame body bytes.
///
/// Framing never inspects the body, so any format works as long as both
/// peers agree on it.
pub trait PayloadCodec<M> {
    /// Serialize `message` into a body.
    fn encode(&self, message: &M) -> Result<Vec<u8>, FrameError>;

    /// Deserialize a body back into a message.
    fn decode(&self, body: &[u8]) -> Result<M, FrameError>;
}

/// Text codec writing the message's fields as TOML key/value pairs in UTF-8.
#[derive(Debug, Clone, Copy, Default)]
pub struct TomlCodec;

impl<M> PayloadCodec<M> for TomlCodec
where
    M: Serialize + DeserializeOwned,
{
    fn encode(&self, message: &M) -> Result<Vec<u8>, FrameError> {
        toml::to_string(message)
            .map(String::into_bytes)
            .map_err(|e| FrameError::Encoding(e.to_string()))
    }

    fn decode(&self, body: &[u8]) -> Result<M, FrameError> {
        let text = std::str::from_utf8(body).map_err(|e| FrameError::Decoding(e.to_string()))?;
        toml::from_str(text).map_err(|e| FrameError::Decoding(e.to_string()))
    }
}
