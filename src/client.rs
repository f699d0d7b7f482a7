//! Client session: one framed request, one framed reply.
//!
//! The session connects, sends a single frame, reads a single frame back
//! and then ends. Nothing is retried and there is no reconnection; every
//! failure is terminal and handed to the caller.

use std::net::SocketAddr;
use tokio::io::{AsyncRead, AsyncWrite, AsyncWriteExt};
use tokio::net::{TcpStream, ToSocketAddrs};
use tracing::{debug, info};

use crate::error::FrameError;
use crate::protocol::{decode_header, read_exact, FrameCodec, PayloadCodec, TomlCodec, HEADER_LEN};

/// Encode `message` and write it as one frame: header first, then body.
pub async fn send<W, C, M>(
    stream: &mut W,
    codec: &FrameCodec<C>,
    message: &M,
) -> Result<(), FrameError>
where
    W: AsyncWrite + Unpin + ?Sized,
    C: PayloadCodec<M>,
{
    let frame = codec.encode(message)?;
    stream.write_all(frame.header()).await?;
    stream.write_all(frame.body()).await?;
    stream.flush().await?;
    debug!(bytes = frame.wire_len(), "Frame sent");
    Ok(())
}

/// Read exactly one frame and decode its body.
pub async fn receive<R, C, M>(stream: &mut R, codec: &FrameCodec<C>) -> Result<M, FrameError>
where
    R: AsyncRead + Unpin + ?Sized,
    C: PayloadCodec<M>,
{
    let header = read_exact(stream, HEADER_LEN).await?;
    let body_len = decode_header(&header)?;
    let body = read_exact(stream, body_len).await?;
    debug!(bytes = HEADER_LEN + body_len, "Frame received");
    codec.decode(&body)
}

/// A connected client that performs a single round trip.
pub struct Client<C = TomlCodec> {
    stream: TcpStream,
    peer: SocketAddr,
    codec: FrameCodec<C>,
}

impl Client<TomlCodec> {
    /// Connect using the default text payload codec.
    pub async fn connect(addr: impl ToSocketAddrs) -> Result<Self, FrameError> {
        Self::connect_with_codec(addr, TomlCodec).await
    }
}

impl<C> Client<C> {
    /// Connect using a caller-supplied payload codec.
    pub async fn connect_with_codec(addr: impl ToSocketAddrs, codec: C) -> Result<Self, FrameError> {
        let stream = TcpStream::connect(addr).await?;
        let peer = stream.peer_addr()?;
        info!(peer = %peer, "Connected to server");

        Ok(Client {
            stream,
            peer,
            codec: FrameCodec::new(codec),
        })
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Send `message`, wait for one reply and close the connection.
    ///
    /// Consumes the client: a session carries exactly one round trip.
    pub async fn round_trip<M>(mut self, message: &M) -> Result<M, FrameError>
    where
        C: PayloadCodec<M>,
    {
        send(&mut self.stream, &self.codec, message).await?;
        let reply = receive(&mut self.stream, &self.codec).await?;
        debug!(peer = %self.peer, "Round trip complete");
        Ok(reply)
    }
}
