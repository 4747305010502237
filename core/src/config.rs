/*
 * config.rs
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

//! Runtime settings for the transport and the poller.
//!
//! The core reads no files and no environment variables: callers build these
//! values (the CLI does it from its flags) and pass them in.

use std::time::Duration;

/// Host of the disposable mailbox service.
pub const DEFAULT_HOST: &str = "api.internal.temp-mail.io";
/// HTTPS port.
pub const DEFAULT_PORT: u16 = 443;
/// Bound on every single read from the socket.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);
/// Bound on the TCP connect, and separately on the TLS handshake.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
/// Size of each read while assembling a response.
pub const DEFAULT_CHUNK_SIZE: usize = 1024;
/// Number of polls before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;
/// Pause between two polls.
pub const DEFAULT_POLL_DELAY: Duration = Duration::from_secs(1);

/// Connection settings for one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    pub host: String,
    pub port: u16,
    pub read_timeout: Duration,
    pub connect_timeout: Duration,
    pub chunk_size: usize,
    /// Validate the server certificate chain and host name. When false any
    /// certificate is accepted; the service has historically been reached
    /// that way.
    pub verify_peer: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            chunk_size: DEFAULT_CHUNK_SIZE,
            verify_peer: true,
        }
    }
}

impl TransportConfig {
    /// Settings for an arbitrary host and port, other values defaulted.
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    pub fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    pub fn with_verify_peer(mut self, verify: bool) -> Self {
        self.verify_peer = verify;
        self
    }
}

/// Retry budget for `poll_until_message`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    pub max_attempts: u32,
    pub delay: Duration,
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            delay: DEFAULT_POLL_DELAY,
        }
    }
}

impl PollConfig {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts, delay }
    }
}
