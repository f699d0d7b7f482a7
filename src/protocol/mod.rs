//! Length-prefixed framing protocol.
//!
//! ## Protocol Format
//!
//! Every frame is a fixed 4-byte header followed by the body:
//!
//! ```text
//! +----------------------+---------------------------+
//! | length (u32, BE)     | body (length bytes)       |
//! +----------------------+---------------------------+
//!
//! Example (body "hello"):
//! 00 00 00 05 68 65 6c 6c 6f
//! ```
//!
//! There is no magic number, version field or checksum. The body encoding
//! is pluggable through [`PayloadCodec`]; the default is [`TomlCodec`].
//!
//! - `frame`: header encoding and the typed [`FrameCodec`]
//! - `reader`: exact-byte-count reads over a partial-read stream
//! - `payload`: body serialization capability
//! - `message`: the demo message type

pub mod frame;
pub mod message;
pub mod payload;
pub mod reader;

pub use frame::{decode_header, encode_header, Frame, FrameCodec, HEADER_LEN, MAX_BODY_LEN};
pub use message::Message;
pub use payload::{PayloadCodec, TomlCodec};
pub use reader::read_exact;
