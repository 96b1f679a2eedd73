//! Liveness check behind the binary's `--health-check` flag.
//!
//! Talks plain HTTP/1.1 over a TCP socket so it works in minimal container
//! images without curl. Only the status line of `GET /health` is inspected.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

const CHECK_TIMEOUT: Duration = Duration::from_secs(3);
const MAX_STATUS_LINE: usize = 1024;

#[derive(Debug, thiserror::Error)]
pub enum HealthCheckError {
    #[error("cannot reach {addr}: {source}")]
    Connect {
        addr: String,
        source: std::io::Error,
    },

    #[error("health request failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("no response within {0:?}")]
    Timeout(Duration),

    #[error("unhealthy response: {0}")]
    Unhealthy(String),
}

/// `GET /health` on `addr` (`host:port`) and require a 200 status line.
pub async fn check(addr: &str) -> Result<(), HealthCheckError> {
    tokio::time::timeout(CHECK_TIMEOUT, exchange(addr))
        .await
        .map_err(|_| HealthCheckError::Timeout(CHECK_TIMEOUT))?
}

async fn exchange(addr: &str) -> Result<(), HealthCheckError> {
    let mut stream = TcpStream::connect(addr)
        .await
        .map_err(|source| HealthCheckError::Connect {
            addr: addr.to_string(),
            source,
        })?;

    let request = format!("GET /health HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n\r\n");
    stream.write_all(request.as_bytes()).await?;

    let status_line = read_status_line(&mut stream).await?;
    if is_ok_status(&status_line) {
        Ok(())
    } else {
        Err(HealthCheckError::Unhealthy(status_line))
    }
}

async fn read_status_line(stream: &mut TcpStream) -> Result<String, HealthCheckError> {
    let mut buf = Vec::with_capacity(128);
    let mut chunk = [0u8; 256];
    while buf.len() < MAX_STATUS_LINE && !buf.windows(2).any(|w| w == b"\r\n") {
        let n = stream.read(&mut chunk).await?;
        if n == 0 {
            break;
        }
        buf.extend_from_slice(&chunk[..n]);
    }
    let text = String::from_utf8_lossy(&buf);
    Ok(text.lines().next().unwrap_or("").to_string())
}

/// `HTTP/1.x 200 ...`
fn is_ok_status(line: &str) -> bool {
    let mut parts = line.split_whitespace();
    matches!(
        (parts.next(), parts.next()),
        (Some(version), Some("200")) if version.starts_with("HTTP/1.")
    )
}
