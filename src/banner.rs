//! Banner grabbing for TCP connections.
//!
//! Reads whatever a service sends on its own right after the handshake.
//! Nothing is written to the peer, so services that wait for the client
//! to speak first yield an empty banner once the read timeout expires.

use crate::error::{ScanError, ScanResult};
use std::time::Duration;
use tokio::io::AsyncReadExt;
use tokio::net::TcpStream;
use tokio::time::timeout;
use tracing::trace;

/// Default maximum bytes to read for a banner.
pub const MAX_BANNER_SIZE: usize = 1024;

/// Upper bound on a single banner read, whatever the caller asks for.
pub const BANNER_BYTES_LIMIT: usize = 64 * 1024;

/// Default timeout for the banner read, distinct from the connect timeout.
pub const BANNER_TIMEOUT: Duration = Duration::from_secs(1);

/// Read a banner from an open stream.
///
/// Performs one bounded read of at most `max_bytes` (clamped to
/// [`BANNER_BYTES_LIMIT`]). Read errors, timeouts
/// and an immediate EOF all produce an empty string.
pub async fn read_banner(stream: &mut TcpStream, read_timeout: Duration, max_bytes: usize) -> String {
    let mut buffer = vec![0u8; max_bytes.clamp(1, BANNER_BYTES_LIMIT)];

    match read_once(stream, &mut buffer, read_timeout).await {
        Ok(n) => decode_banner(&buffer[..n]),
        Err(e) => {
            trace!(error = %e, "no banner");
            String::new()
        }
    }
}

async fn read_once(
    stream: &mut TcpStream,
    buffer: &mut [u8],
    read_timeout: Duration,
) -> ScanResult<usize> {
    match timeout(read_timeout, stream.read(buffer)).await {
        Ok(Ok(n)) => Ok(n),
        Ok(Err(e)) => Err(ScanError::Io(e)),
        Err(_) => Err(ScanError::Timeout),
    }
}

/// Decode banner bytes as UTF-8, dropping invalid sequences, and trim
/// surrounding whitespace.
pub fn decode_banner(data: &[u8]) -> String {
    let text: String = data.utf8_chunks().map(|chunk| chunk.valid()).collect();
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;
    use tokio::net::TcpListener;

    #[test]
    fn test_decode_trims() {
        assert_eq!(decode_banner(b"SSH-2.0-OpenSSH_8.9\r\n"), "SSH-2.0-OpenSSH_8.9");
        assert_eq!(decode_banner(b"  \n\t"), "");
    }

    #[test]
    fn test_decode_drops_invalid_utf8() {
        assert_eq!(decode_banner(b"\xffHello\xfe World\xc3"), "Hello World");
        assert_eq!(decode_banner("caf\u{e9}".as_bytes()), "caf\u{e9}");
    }

    #[tokio::test]
    async fn test_read_banner_from_greeting_service() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            sock.write_all(b"220 ready\r\n").await.unwrap();
        });

        let mut stream = TcpStream::connect(addr).await.unwrap();
        let banner = read_banner(&mut stream, Duration::from_secs(2), MAX_BANNER_SIZE).await;
        assert_eq!(banner, "220 ready");
    }

    #[tokio::test]
    async fn test_read_banner_respects_byte_cap() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            sock.write_all(b"abcdefghij").await.unwrap();
        });

        let mut stream = TcpStream::connect(addr).await.unwrap();
        let banner = read_banner(&mut stream, Duration::from_secs(2), 4).await;
        assert!(banner.len() <= 4);
        assert!("abcd".starts_with(&banner));
    }

    #[tokio::test]
    async fn test_oversized_cap_is_clamped() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (mut sock, _) = listener.accept().await.unwrap();
            sock.write_all(b"+OK hello\r\n").await.unwrap();
        });

        let mut stream = TcpStream::connect(addr).await.unwrap();
        let banner = read_banner(&mut stream, Duration::from_secs(2), usize::MAX).await;
        assert_eq!(banner, "+OK hello");
    }

    #[tokio::test]
    async fn test_read_banner_times_out_on_silent_service() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let server = tokio::spawn(async move {
            let (sock, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(2)).await;
            drop(sock);
        });

        let mut stream = TcpStream::connect(addr).await.unwrap();
        let banner = read_banner(&mut stream, Duration::from_millis(100), MAX_BANNER_SIZE).await;
        assert_eq!(banner, "");
        server.abort();
    }
}
