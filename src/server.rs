//! TCP echo server.
//!
//! Accepts connections forever and mirrors every received byte back to its
//! sender. The echo path is a raw byte mirror: it knows nothing about the
//! frame header and echoes partial frames, junk, or several frames glued
//! together exactly as they arrive.

use crate::config::Config;
use crate::error::EchoError;
use std::io;
use std::net::SocketAddr;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

/// Server instance
pub struct Server {
    listener: TcpListener,
    buffer_size: usize,
}

impl Server {
    /// Bind the listening socket.
    ///
    /// Must be called from within a Tokio runtime. A bind failure is fatal:
    /// a server that cannot listen is not running.
    pub fn bind(config: &Config) -> io::Result<Self> {
        let listener = create_listener(config.listen, config.backlog)?;
        let listener = TcpListener::from_std(listener)?;
        info!(
            address = %listener.local_addr()?,
            backlog = config.backlog,
            "Server online"
        );

        Ok(Server {
            listener,
            buffer_size: config.buffer_size,
        })
    }

    pub fn local_addr(&self) -> io::Result<SocketAddr> {
        self.listener.local_addr()
    }

    /// Accept connections until accepting fails.
    ///
    /// Each connection gets its own detached task. Sessions are never
    /// joined; an error or panic inside one stays inside its task.
    pub async fn run(self) -> io::Result<()> {
        loop {
            let (stream, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(e) => {
                    error!(error = %e, "Failed to accept connection");
                    return Err(e);
                }
            };

            info!(peer = %peer, "Client connected");
            let buffer_size = self.buffer_size;

            tokio::spawn(async move {
                match handle_connection(stream, buffer_size).await {
                    Ok(echoed) => info!(peer = %peer, echoed, "Client disconnected"),
                    Err(e) => warn!(peer = %peer, error = %e, "Connection lost"),
                }
            });
        }
    }
}

/// Echo everything read from `stream` back to it until the peer closes.
///
/// Each chunk is written back in full before the next read is issued.
/// Returns the number of bytes echoed once the peer ends the connection.
/// The stream is closed when it is dropped on return.
pub async fn handle_connection<S>(mut stream: S, buffer_size: usize) -> Result<u64, EchoError>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buffer = vec![0u8; buffer_size];
    let mut echoed = 0u64;

    loop {
        let n = stream.read(&mut buffer).await?;
        if n == 0 {
            debug!(echoed, "Connection closed by client");
            return Ok(echoed);
        }

        stream.write_all(&buffer[..n]).await?;
        echoed += n as u64;
    }
}

fn create_listener(addr: SocketAddr, backlog: i32) -> io::Result<std::net::TcpListener> {
    let socket = socket2::Socket::new(
        match addr {
            SocketAddr::V4(_) => socket2::Domain::IPV4,
            SocketAddr::V6(_) => socket2::Domain::IPV6,
        },
        socket2::Type::STREAM,
        Some(socket2::Protocol::TCP),
    )?;

    socket.set_reuse_address(true)?;
    socket.set_nonblocking(true)?;
    socket.bind(&addr.into())?;
    socket.listen(backlog)?;

    Ok(socket.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::io::Builder;

    fn test_config() -> Config {
        Config {
            listen: "127.0.0.1:0".parse().unwrap(),
            backlog: 16,
            buffer_size: 1024,
            workers: None,
            log_level: "info".to_string(),
        }
    }

    #[tokio::test]
    async fn test_echo_chunks_in_order() {
        let stream = Builder::new()
            .read(b"hello ")
            .write(b"hello ")
            .read(b"world")
            .write(b"world")
            .build();

        let echoed = handle_connection(stream, 1024).await.unwrap();
        assert_eq!(echoed, 11);
    }

    #[tokio::test]
    async fn test_chunk_larger_than_buffer() {
        let stream = Builder::new()
            .read(b"abcdefgh")
            .write(b"abc")
            .write(b"def")
            .write(b"gh")
            .build();

        let echoed = handle_connection(stream, 3).await.unwrap();
        assert_eq!(echoed, 8);
    }

    #[tokio::test]
    async fn test_immediate_close_echoes_nothing() {
        let stream = Builder::new().build();
        assert_eq!(handle_connection(stream, 1024).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_reset_is_connection_lost() {
        let stream = Builder::new()
            .read(b"ping")
            .write(b"ping")
            .read_error(io::Error::new(io::ErrorKind::ConnectionReset, "reset"))
            .build();

        match handle_connection(stream, 1024).await {
            Err(EchoError::ConnectionLost(e)) => {
                assert_eq!(e.kind(), io::ErrorKind::ConnectionReset)
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_bind_ephemeral_port() {
        let server = Server::bind(&test_config()).unwrap();
        let addr = server.local_addr().unwrap();
        assert!(addr.ip().is_loopback());
        assert_ne!(addr.port(), 0);
    }

    #[tokio::test]
    async fn test_bind_in_use_fails() {
        let first = Server::bind(&test_config()).unwrap();
        let mut config = test_config();
        config.listen = first.local_addr().unwrap();

        // Address reuse does not allow two listeners on the same port.
        assert!(Server::bind(&config).is_err());
    }
}
