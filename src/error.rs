//! Error types for framing, the echo path and configuration.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while producing or consuming frames.
#[derive(Error, Debug)]
pub enum FrameError {
    /// The peer closed the stream before the expected bytes arrived.
    #[error("connection lost: received {received} of {expected} bytes")]
    ConnectionLost { expected: usize, received: usize },

    /// The payload codec could not serialize the message.
    #[error("failed to encode payload: {0}")]
    Encoding(String),

    /// The frame body is not a valid payload for the target type.
    #[error("failed to decode payload: {0}")]
    Decoding(String),

    /// Body length does not fit the signed 32-bit length field.
    #[error("frame body of {0} bytes exceeds the maximum frame size")]
    FrameTooLarge(u64),

    /// Transport failure (connect, write, or a read error other than EOF).
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

/// Errors that end an echo session abnormally.
#[derive(Error, Debug)]
pub enum EchoError {
    /// Reset or any other transport failure besides a clean EOF.
    #[error("connection lost: {0}")]
    ConnectionLost(#[from] io::Error),
}

/// Configuration loading errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", .path.display())]
    FileRead { path: PathBuf, source: io::Error },

    #[error("Failed to parse config file '{}': {source}", .path.display())]
    TomlParse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("Invalid address '{0}'")]
    InvalidAddress(String),
}
