/*
 * error.rs
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

//! Error type shared by the transport, the session and the poller.
//!
//! Connect, empty-response and extraction failures are fatal while the mailbox
//! is being created. Transport and status failures seen while polling are
//! recoverable: the poller reports them and moves on to the next attempt.
//! `Timeout` never leaves `HttpConnection::exchange`; it only ends assembly.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Errors produced by the tempmail core.
#[derive(Error, Debug)]
pub enum Error {
    /// DNS lookup, TCP connect or TLS handshake failed.
    #[error("cannot connect to {host}:{port}: {source}")]
    Connect {
        host: String,
        port: u16,
        #[source]
        source: io::Error,
    },

    /// Send or receive failed on an established connection.
    #[error("transport error: {0}")]
    Transport(#[from] io::Error),

    /// No bytes arrived within the read timeout.
    #[error("no data received within {0:?}")]
    Timeout(Duration),

    /// The server sent nothing back for a request that requires an answer.
    #[error("empty response from server")]
    EmptyResponse,

    /// The status line carried a non-2xx code.
    #[error("HTTP error: {code}")]
    Status { code: u16 },

    /// A mandatory field was not found in the response.
    #[error("{0}")]
    Extraction(String),

    /// The TLS client configuration could not be built.
    #[error("TLS configuration error: {0}")]
    Tls(#[from] rustls::Error),
}

impl Error {
    /// True for failures the poller can survive by trying again later.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Error::Transport(_) | Error::Timeout(_) | Error::Status { .. }
        )
    }
}

/// Result type for tempmail operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn polling_failures_are_recoverable() {
        let reset = Error::Transport(io::Error::new(io::ErrorKind::ConnectionReset, "reset"));
        assert!(reset.is_recoverable());
        assert!(Error::Status { code: 502 }.is_recoverable());
    }

    #[test]
    fn creation_failures_are_fatal() {
        let refused = Error::Connect {
            host: "example.com".to_string(),
            port: 443,
            source: io::Error::new(io::ErrorKind::ConnectionRefused, "refused"),
        };
        assert!(!refused.is_recoverable());
        assert!(!Error::EmptyResponse.is_recoverable());
        assert!(!Error::Extraction("no email found".to_string()).is_recoverable());
        assert_eq!(
            Error::Extraction("no email found".to_string()).to_string(),
            "no email found"
        );
    }
}
