/*
 * lib.rs
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

//! Core of the tempmail client: provision a disposable mailbox over HTTPS and
//! poll it until a message arrives.
//!
//! # Overview
//! - `net`: TLS client configuration (verifying or trust-anything) and connect.
//! - `protocol::http`: hand-built HTTP/1.1 requests and a response assembler
//!   that stops reading once the declared `Content-Length` has arrived.
//! - `protocol::tempmail`: field extraction, `MailboxSession` (one keep-alive
//!   connection per mailbox) and the fixed-delay poller.
//!
//! The core never prints. Per-attempt poll failures go to a `PollObserver`;
//! everything else is logged with `tracing` and returned as `Error`.
//!
//! # Example
//! ```no_run
//! use tempmail_core::{poll_until_message, LogObserver, MailboxSession, PollConfig, TransportConfig};
//!
//! # async fn run() -> tempmail_core::Result<()> {
//! let mut session = MailboxSession::open(&TransportConfig::default()).await?;
//! println!("email: {}", session.address());
//! let message = poll_until_message(&mut session, &PollConfig::default(), &mut LogObserver).await;
//! session.close().await;
//! match message {
//!     Some(m) => println!("{}", m),
//!     None => println!("Timeout: no messages received"),
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod net;
pub mod protocol;

pub use config::{PollConfig, TransportConfig};
pub use error::{Error, Result};
pub use protocol::http::{HttpClient, HttpConnection, RawResponse, Request};
pub use protocol::tempmail::{
    poll_until_message, LogObserver, MailboxSession, Message, MessageSource, Mailbox, PollObserver,
};
