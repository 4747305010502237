/*
 * connection.rs
 * Copyright (C) 2026 Chris Burdess
 *
 * This file is part of Tempmail, a disposable mailbox client.
 *
 * Tempmail is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * Tempmail is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with Tempmail.  If not, see <http://www.gnu.org/licenses/>.
 */

//! HTTP connection: one stream (TLS in production), one request in flight,
//! drives the response assembler with bounded reads.
//!
//! `close` consumes the connection, so nothing can be written to or read from
//! a closed stream. Dropping the connection without `close` still releases
//! the socket; it only skips the TLS close_notify.

use std::time::Duration;

use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::time::timeout;
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::net::TlsStream;
use crate::protocol::http::h1::ResponseAssembler;
use crate::protocol::http::request::Request;
use crate::protocol::http::response::RawResponse;

/// Connection over implicit TLS, as returned by `HttpClient::connect`.
pub type TlsConnection = HttpConnection<TlsStream>;

/// HTTP/1.1 connection: holds the stream and the read limits.
pub struct HttpConnection<S> {
    stream: S,
    host: String,
    port: u16,
    read_timeout: Duration,
    chunk_size: usize,
}

impl<S> HttpConnection<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Wrap an already-connected stream. `chunk_size` is the most read per receive (at least 1).
    pub fn new(
        stream: S,
        host: impl Into<String>,
        port: u16,
        read_timeout: Duration,
        chunk_size: usize,
    ) -> Self {
        Self {
            stream,
            host: host.into(),
            port,
            read_timeout,
            chunk_size: chunk_size.max(1),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Write all of `bytes` and flush.
    pub async fn send(&mut self, bytes: &[u8]) -> Result<()> {
        self.stream.write_all(bytes).await?;
        self.stream.flush().await?;
        Ok(())
    }

    /// One read of at most `chunk_size` bytes. `None` means the peer closed
    /// the stream; `Error::Timeout` means nothing arrived in time.
    pub async fn receive_chunk(&mut self) -> Result<Option<Bytes>> {
        let mut tmp = vec![0u8; self.chunk_size];
        let n = match timeout(self.read_timeout, self.stream.read(&mut tmp)).await {
            Ok(read) => read?,
            Err(_) => return Err(Error::Timeout(self.read_timeout)),
        };
        if n == 0 {
            return Ok(None);
        }
        tmp.truncate(n);
        Ok(Some(Bytes::from(tmp)))
    }

    /// Send the request and read until the response is complete, the peer
    /// closes, or a read times out. Only send/receive failures are errors;
    /// timeout and early close return what was assembled.
    pub async fn exchange(&mut self, request: &Request) -> Result<RawResponse> {
        self.send(&request.to_bytes()).await?;

        let mut assembler = ResponseAssembler::new();
        while !assembler.state().is_terminal() {
            match self.receive_chunk().await {
                Ok(Some(chunk)) => {
                    assembler.receive(&chunk);
                }
                Ok(None) => {
                    assembler.peer_closed();
                }
                Err(Error::Timeout(after)) => {
                    warn!(
                        path = request.path(),
                        buffered = assembler.buffered(),
                        "timeout after {:?} while reading response",
                        after
                    );
                    assembler.timed_out();
                }
                Err(e) => return Err(e),
            }
        }

        let response = assembler.finish();
        debug!(
            method = request.method().as_str(),
            path = request.path(),
            state = ?response.state(),
            status = ?response.status(),
            body_len = response.body().len(),
            "response assembled"
        );
        Ok(response)
    }

    /// Shut the stream down (TLS close_notify, then the socket). Failures are
    /// logged and ignored; the socket is released either way.
    pub async fn close(mut self) {
        if let Err(e) = self.stream.shutdown().await {
            debug!(host = %self.host, port = self.port, "shutdown failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::http::h1::AssemblyState;
    use tokio::io::{duplex, DuplexStream};

    const HOST: &str = "api.internal.temp-mail.io";

    fn connection(stream: DuplexStream, chunk_size: usize) -> HttpConnection<DuplexStream> {
        HttpConnection::new(stream, HOST, 443, Duration::from_millis(200), chunk_size)
    }

    async fn read_request(server: &mut DuplexStream) -> Vec<u8> {
        let mut seen = Vec::new();
        let mut byte = [0u8; 1];
        while !seen.ends_with(b"\r\n\r\n") {
            server.read_exact(&mut byte).await.unwrap();
            seen.push(byte[0]);
        }
        seen
    }

    #[tokio::test]
    async fn exchange_assembles_response_read_in_small_chunks() {
        let (client, mut server) = duplex(4096);
        server
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 11\r\n\r\nhello world")
            .await
            .unwrap();

        let mut conn = connection(client, 5);
        let request = Request::create_mailbox(HOST);
        let response = conn.exchange(&request).await.unwrap();

        assert!(response.is_complete());
        assert_eq!(response.body(), b"hello world");
        assert_eq!(response.status(), Some(200));
        assert_eq!(read_request(&mut server).await, request.to_bytes());
    }

    #[tokio::test]
    async fn keep_alive_serves_two_exchanges() {
        let (client, mut server) = duplex(4096);
        server
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\nabHTTP/1.1 200 OK\r\nContent-Length: 2\r\n\r\ncd")
            .await
            .unwrap();

        // Chunk size of one keeps the second response out of the first read.
        let mut conn = connection(client, 1);
        let first = conn.exchange(&Request::create_mailbox(HOST)).await.unwrap();
        let second = conn
            .exchange(&Request::list_messages("a@b.io", HOST))
            .await
            .unwrap();
        assert_eq!(first.body(), b"ab");
        assert_eq!(second.body(), b"cd");
    }

    #[tokio::test]
    async fn stalled_body_returns_partial_after_timeout() {
        let (client, mut server) = duplex(4096);
        server
            .write_all(b"HTTP/1.1 200 OK\r\nContent-Length: 10\r\n\r\nabc")
            .await
            .unwrap();

        let mut conn = connection(client, 64);
        let response = conn.exchange(&Request::create_mailbox(HOST)).await.unwrap();
        assert_eq!(response.state(), AssemblyState::TimedOut);
        assert_eq!(response.body(), b"abc");
        drop(server);
    }

    #[tokio::test]
    async fn peer_close_without_data_is_empty() {
        let (client, server) = duplex(4096);
        let mut conn = connection(client, 64);
        let mut server = server;
        let reader = tokio::spawn(async move {
            read_request(&mut server).await;
            drop(server);
        });
        let response = conn.exchange(&Request::create_mailbox(HOST)).await.unwrap();
        reader.await.unwrap();
        assert!(response.is_empty());
        assert_eq!(response.state(), AssemblyState::ClosedByPeer);
    }

    #[tokio::test]
    async fn receive_chunk_times_out() {
        let (client, _server) = duplex(4096);
        let mut conn = connection(client, 64);
        let err = conn.receive_chunk().await.unwrap_err();
        assert!(matches!(err, Error::Timeout(d) if d == Duration::from_millis(200)));
    }

    #[tokio::test]
    async fn send_on_broken_stream_is_transport_error() {
        let (client, server) = duplex(4096);
        drop(server);
        let mut conn = connection(client, 64);
        let err = conn.send(b"GET / HTTP/1.1\r\n\r\n").await.unwrap_err();
        assert!(matches!(err, Error::Transport(_)));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn close_signals_eof_to_peer() {
        let (client, mut server) = duplex(4096);
        let conn = connection(client, 64);
        conn.close().await;
        let mut buf = [0u8; 8];
        assert_eq!(server.read(&mut buf).await.unwrap(), 0);
    }
}
