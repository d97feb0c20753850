// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Memcached store using the text protocol.
//!
//! Each operation opens its own connection, so concurrent requests never
//! share protocol state.

use super::{CacheStore, StoreError};
use std::time::Duration;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, AsyncWriteExt, BufReader};
use tokio::net::TcpStream;

/// Memcached limits keys to 250 bytes.
const MAX_KEY_LENGTH: usize = 250;

/// Relative expiry times above 30 days are read as Unix timestamps.
const MAX_RELATIVE_EXPIRY_SECS: u64 = 30 * 24 * 60 * 60;

/// Memcached client for a single server.
#[derive(Debug, Clone)]
pub struct MemcacheStore {
    addr: String,
}

impl MemcacheStore {
    /// Create a client for `host:port` (e.g. "127.0.0.1:11211").
    pub fn new(addr: impl Into<String>) -> Self {
        Self { addr: addr.into() }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    async fn connect(&self) -> Result<BufReader<TcpStream>, StoreError> {
        let stream = TcpStream::connect(&self.addr).await?;
        Ok(BufReader::new(stream))
    }
}

fn validate_key(key: &str) -> Result<(), StoreError> {
    if key.is_empty()
        || key.len() > MAX_KEY_LENGTH
        || key.bytes().any(|b| b.is_ascii_whitespace() || b.is_ascii_control())
    {
        return Err(StoreError::InvalidKey(key.to_string()));
    }
    Ok(())
}

async fn read_line(conn: &mut BufReader<TcpStream>) -> Result<String, StoreError> {
    let mut line = String::new();
    let n = conn.read_line(&mut line).await?;
    if n == 0 {
        return Err(StoreError::Protocol("connection closed".to_string()));
    }
    Ok(line.trim_end_matches("\r\n").to_string())
}

fn server_error(line: &str) -> StoreError {
    StoreError::Protocol(format!("unexpected reply: {}", line))
}

impl CacheStore for MemcacheStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        validate_key(key)?;
        let mut conn = self.connect().await?;
        conn.get_mut()
            .write_all(format!("get {}\r\n", key).as_bytes())
            .await?;

        let header = read_line(&mut conn).await?;
        if header == "END" {
            return Ok(None);
        }

        // VALUE <key> <flags> <bytes>
        let mut parts = header.split(' ');
        if parts.next() != Some("VALUE") {
            return Err(server_error(&header));
        }
        let len: usize = parts
            .nth(2)
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| server_error(&header))?;

        let mut data = vec![0u8; len + 2];
        conn.read_exact(&mut data).await?;
        if !data.ends_with(b"\r\n") {
            return Err(StoreError::Protocol("value not terminated".to_string()));
        }
        data.truncate(len);

        let trailer = read_line(&mut conn).await?;
        if trailer != "END" {
            return Err(server_error(&trailer));
        }

        Ok(Some(data))
    }

    async fn set(&self, key: &str, value: &[u8], ttl: Duration) -> Result<(), StoreError> {
        validate_key(key)?;
        let exptime = ttl.as_secs().min(MAX_RELATIVE_EXPIRY_SECS);

        let mut request = format!("set {} 0 {} {}\r\n", key, exptime, value.len()).into_bytes();
        request.extend_from_slice(value);
        request.extend_from_slice(b"\r\n");

        let mut conn = self.connect().await?;
        conn.get_mut().write_all(&request).await?;

        let reply = read_line(&mut conn).await?;
        if reply != "STORED" {
            return Err(server_error(&reply));
        }
        Ok(())
    }
}
