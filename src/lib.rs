//! sockets-demo: length-prefixed message framing over TCP.
//!
//! Two programs share this library:
//! - `frame-client` sends one framed [`Message`] and waits for one framed reply
//! - `echo-server` accepts any number of connections and mirrors raw bytes
//!
//! Frames are a 4-byte big-endian length followed by the body. The echo
//! server does not parse frames; it returns whatever it receives, so a
//! client talking to it gets its own frame back.

pub mod client;
pub mod config;
pub mod error;
pub mod logging;
pub mod protocol;
pub mod server;

pub use client::Client;
pub use error::{ConfigError, EchoError, FrameError};
pub use protocol::{Frame, FrameCodec, Message, PayloadCodec, TomlCodec};
pub use server::Server;
