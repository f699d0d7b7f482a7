//! Exact-byte-count reads.

use bytes::BytesMut;
use tokio::io::{AsyncRead, AsyncReadExt};

use crate::error::FrameError;

/// Read exactly `n` bytes from `stream`.
///
/// Partial reads are accumulated until the buffer is full. A zero-byte read
/// before that point means the peer is gone and fails with
/// [`FrameError::ConnectionLost`]; it is never retried. There is no timeout:
/// a peer that stays connected but stops sending blocks the caller.
pub async fn read_exact<R>(stream: &mut R, n: usize) -> Result<BytesMut, FrameError>
where
    R: AsyncRead + Unpin + ?Sized,
{
    let mut buffer = BytesMut::zeroed(n);
    let mut filled = 0;

    while filled < n {
        let received = stream.read(&mut buffer[filled..]).await?;
        if received == 0 {
            return Err(FrameError::ConnectionLost {
                expected: n,
                received: filled,
            });
        }
        filled += received;
    }

    Ok(buffer)
}
