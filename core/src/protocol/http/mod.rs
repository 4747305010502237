/*
 * mod.rs
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

//! HTTP client: the HTTP/1.1 subset the mailbox service needs.
//!
//! Design:
//! - Requests are a request line, `Host` and `Connection: keep-alive`; never a body.
//! - Responses are assembled by a push state machine (`h1::ResponseAssembler`)
//!   fed with bounded reads. Completion is the declared `Content-Length`, or
//!   EOF when none is declared. No chunked transfer-encoding, no redirects.
//! - Buffers: `bytes` crate (BytesMut while assembling, Bytes for the result).
//! - TLS only, one connection per session, one request in flight.

mod request;
mod response;

pub mod h1;

pub use h1::{AssemblyState, ResponseAssembler};
pub use request::{build, Method, Request, API_PREFIX};
pub use response::RawResponse;

pub mod client;
pub mod connection;

pub use client::HttpClient;
pub use connection::{HttpConnection, TlsConnection};
