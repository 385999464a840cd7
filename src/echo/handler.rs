//! Echo handler for a single accepted stream.

use bytes::{Bytes, BytesMut};
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

/// Read one chunk from `stream` and write it straight back.
///
/// Returns `None` when the peer closed before sending anything. The stream
/// is shut down for writing after the echo; the caller drops it to close.
pub async fn echo_once<S>(stream: &mut S, chunk_size: usize) -> std::io::Result<Option<Bytes>>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buffer = BytesMut::zeroed(chunk_size);

    let n = stream.read(&mut buffer[..]).await?;
    if n == 0 {
        debug!("Peer closed before sending data");
        return Ok(None);
    }
    buffer.truncate(n);

    info!(
        bytes = n,
        message = %String::from_utf8_lossy(&buffer),
        "Message received"
    );

    stream.write_all(&buffer).await?;
    stream.flush().await?;
    stream.shutdown().await?;

    Ok(Some(buffer.freeze()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::io::Builder;

    #[tokio::test]
    async fn test_echoes_payload() {
        let mut stream = Builder::new().read(b"hello").write(b"hello").build();

        let echoed = echo_once(&mut stream, 1024).await.unwrap();
        assert_eq!(echoed.as_deref(), Some(&b"hello"[..]));
    }

    #[tokio::test]
    async fn test_echoes_binary_payload() {
        let payload = [0u8, 159, 146, 150, 255, b'\r', b'\n'];
        let mut stream = Builder::new().read(&payload).write(&payload).build();

        let echoed = echo_once(&mut stream, 1024).await.unwrap();
        assert_eq!(echoed.as_deref(), Some(&payload[..]));
    }

    #[tokio::test]
    async fn test_chunk_fills_exactly() {
        let mut stream = Builder::new().read(b"abcd").write(b"abcd").build();

        let echoed = echo_once(&mut stream, 4).await.unwrap();
        assert_eq!(echoed.as_deref(), Some(&b"abcd"[..]));
    }

    #[tokio::test]
    async fn test_peer_closed_without_data() {
        let mut stream = Builder::new().build();

        let echoed = echo_once(&mut stream, 1024).await.unwrap();
        assert!(echoed.is_none());
    }

    #[tokio::test]
    async fn test_read_error_propagates() {
        let mut stream = Builder::new()
            .read_error(std::io::Error::new(
                std::io::ErrorKind::ConnectionReset,
                "reset",
            ))
            .build();

        let err = echo_once(&mut stream, 1024).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::ConnectionReset);
    }
}
