//! Liveness probe for the secondary (Memcached) cache.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

use crate::error::CacheError;

/// Probes a Memcached server with the text protocol `version` command.
///
/// The gateway holds no data in Memcached itself; it only reports whether
/// the secondary cache shared with the menu service is reachable.
#[derive(Debug, Clone)]
pub struct MemcachedProbe {
    addr: String,
}

impl MemcachedProbe {
    /// `addr` is `host:port`.
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Sends `version` and expects a `VERSION <x>` reply line.
    pub async fn ping(&self) -> Result<String, CacheError> {
        let stream = TcpStream::connect(&self.addr)
            .await
            .map_err(|e| CacheError::unavailable(format!("{}: {}", self.addr, e)))?;

        let (reader, mut writer) = stream.into_split();
        writer.write_all(b"version\r\n").await?;
        writer.flush().await?;

        let mut line = String::new();
        BufReader::new(reader).read_line(&mut line).await?;

        parse_version(&line)
    }
}

fn parse_version(line: &str) -> Result<String, CacheError> {
    line.trim_end()
        .strip_prefix("VERSION ")
        .map(str::to_string)
        .ok_or_else(|| CacheError::UnexpectedReply(line.trim_end().to_string()))
}
