/*
 * session.rs
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

//! Mailbox session: one connection, one mailbox, any number of polls.
//!
//! The mailbox is created while the session is constructed, so a
//! `MailboxSession` always has an address. Requests reuse the connection
//! (keep-alive) and run strictly one after another.

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncWrite};
use tracing::{debug, info};

use crate::config::TransportConfig;
use crate::error::{Error, Result};
use crate::net::TlsStream;
use crate::protocol::http::{HttpClient, HttpConnection, RawResponse, Request};
use crate::protocol::tempmail::extract::{extract_email, extract_message};
use crate::protocol::tempmail::poll::MessageSource;
use crate::protocol::tempmail::types::{Mailbox, Message};

/// Session with the mailbox service.
pub struct MailboxSession<S> {
    connection: HttpConnection<S>,
    mailbox: Mailbox,
}

impl MailboxSession<TlsStream> {
    /// Connect over TLS and create the mailbox. Connect, empty-response,
    /// status and extraction failures are returned as is.
    pub async fn open(config: &TransportConfig) -> Result<Self> {
        let connection = HttpClient::connect(config).await?;
        Self::with_connection(connection).await
    }
}

impl<S> MailboxSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    /// Create the mailbox over an established connection. On failure the
    /// connection is closed before the error is returned.
    pub async fn with_connection(mut connection: HttpConnection<S>) -> Result<Self> {
        match create_mailbox(&mut connection).await {
            Ok(mailbox) => {
                info!(address = mailbox.address(), "mailbox created");
                Ok(Self { connection, mailbox })
            }
            Err(e) => {
                connection.close().await;
                Err(e)
            }
        }
    }

    pub fn mailbox(&self) -> &Mailbox {
        &self.mailbox
    }

    pub fn address(&self) -> &str {
        self.mailbox.address()
    }

    /// Ask the service for the mailbox's messages and extract the first one.
    ///
    /// An empty response or a body without a message is `Ok(None)`. Transport
    /// and status failures are returned for the caller to report; the session
    /// stays usable.
    pub async fn fetch_newest_message(&mut self) -> Result<Option<Message>> {
        let request = Request::list_messages(self.mailbox.address(), self.connection.host());
        let response = self.connection.exchange(&request).await?;
        if response.is_empty() {
            debug!("empty response to poll");
            return Ok(None);
        }
        check_status(&response)?;
        Ok(extract_message(&response.body_text()).map(Message::new))
    }

    /// Close the connection. Consumes the session.
    pub async fn close(self) {
        debug!(address = self.mailbox.address(), "closing session");
        self.connection.close().await;
    }
}

#[async_trait]
impl<S> MessageSource for MailboxSession<S>
where
    S: AsyncRead + AsyncWrite + Unpin + Send,
{
    async fn fetch_newest_message(&mut self) -> Result<Option<Message>> {
        MailboxSession::fetch_newest_message(self).await
    }
}

async fn create_mailbox<S>(connection: &mut HttpConnection<S>) -> Result<Mailbox>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let request = Request::create_mailbox(connection.host());
    let response = connection.exchange(&request).await?;
    if response.is_empty() {
        return Err(Error::EmptyResponse);
    }
    check_status(&response)?;
    let address = extract_email(&response.body_text())?;
    Ok(Mailbox::new(address))
}

/// Reject a non-2xx status line. A response without a parseable status line passes.
fn check_status(response: &RawResponse) -> Result<()> {
    match response.status() {
        Some(code) if !(200..300).contains(&code) => Err(Error::Status { code }),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::io::{duplex, AsyncWriteExt, DuplexStream};

    const HOST: &str = "api.internal.temp-mail.io";

    fn ok(body: &str) -> Vec<u8> {
        format!(
            "HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: {}\r\n\r\n{}",
            body.len(),
            body
        )
        .into_bytes()
    }

    async fn connection_with(responses: &[Vec<u8>]) -> (HttpConnection<DuplexStream>, DuplexStream) {
        let (client, mut server) = duplex(16 * 1024);
        for response in responses {
            server.write_all(response).await.unwrap();
        }
        // One byte per read so each exchange stops at its own Content-Length.
        let conn = HttpConnection::new(client, HOST, 443, Duration::from_millis(200), 1);
        (conn, server)
    }

    #[tokio::test]
    async fn creates_mailbox_then_polls() {
        let (conn, _server) = connection_with(&[
            ok(r#"{"email":"abc123@mail.example.com","token":"t"}"#),
            ok("[]"),
            ok(r#"[{"from":"a@b.io","text":"Hi\nthere","body":"<p>Hi</p>"}]"#),
        ])
        .await;

        let before = chrono::Utc::now();
        let mut session = MailboxSession::with_connection(conn).await.unwrap();
        assert_eq!(session.address(), "abc123@mail.example.com");
        assert_eq!(session.mailbox().address(), session.address());
        assert!(session.mailbox().created_at() >= before);
        assert_eq!(session.fetch_newest_message().await.unwrap(), None);
        assert_eq!(
            session.fetch_newest_message().await.unwrap(),
            Some(Message::new("Hi\nthere"))
        );
        session.close().await;
    }

    #[tokio::test]
    async fn creation_without_email_fails() {
        let (conn, _server) = connection_with(&[ok(r#"{"error":"busy"}"#)]).await;
        let err = match MailboxSession::with_connection(conn).await {
            Ok(_) => panic!("session created without an address"),
            Err(e) => e,
        };
        assert!(matches!(err, Error::Extraction(_)));
    }

    #[tokio::test]
    async fn creation_with_closed_peer_is_empty_response() {
        let (conn, server) = connection_with(&[]).await;
        drop(server);
        let err = match MailboxSession::with_connection(conn).await {
            Ok(_) => panic!("session created from nothing"),
            Err(e) => e,
        };
        // The request write fails or the read sees EOF, depending on timing.
        assert!(matches!(err, Error::EmptyResponse | Error::Transport(_)));
    }

    #[tokio::test]
    async fn creation_rejects_error_status() {
        let (conn, _server) = connection_with(&[
            b"HTTP/1.1 429 Too Many Requests\r\nContent-Length: 29\r\n\r\n{\"email\":\"x@mail.example.io\"}".to_vec(),
        ])
        .await;
        let err = match MailboxSession::with_connection(conn).await {
            Ok(_) => panic!("session created from an error response"),
            Err(e) => e,
        };
        assert!(matches!(err, Error::Status { code: 429 }));
    }

    #[tokio::test]
    async fn poll_error_status_is_recoverable() {
        let (conn, _server) = connection_with(&[
            ok(r#"{"email":"abc123@mail.example.com"}"#),
            b"HTTP/1.1 502 Bad Gateway\r\nContent-Length: 0\r\n\r\n".to_vec(),
        ])
        .await;
        let mut session = MailboxSession::with_connection(conn).await.unwrap();
        let err = session.fetch_newest_message().await.unwrap_err();
        assert!(matches!(err, Error::Status { code: 502 }));
        assert!(err.is_recoverable());
    }

    #[tokio::test]
    async fn poll_after_peer_close_is_absent_or_transport_error() {
        let (conn, server) = connection_with(&[ok(r#"{"email":"abc123@mail.example.com"}"#)]).await;
        let mut session = MailboxSession::with_connection(conn).await.unwrap();
        drop(server);
        match session.fetch_newest_message().await {
            Ok(None) => {}
            Err(e) => assert!(e.is_recoverable()),
            Ok(Some(m)) => panic!("unexpected message {:?}", m),
        }
    }
}
