/*
 * assembler.rs
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

//! HTTP/1.1 response assembler: push bytes in as they arrive, learn when the
//! response is complete.
//!
//! The header block ends at the first CRLFCRLF. If it declares a
//! `Content-Length`, the response is complete as soon as that many body bytes
//! are buffered, which lets a keep-alive connection be reused without waiting
//! for the server to close. Without a declared length only EOF completes it.
//! Timeout and early EOF end assembly with whatever was buffered.

use bytes::{Bytes, BytesMut};

use crate::protocol::http::response::RawResponse;

const TERMINATOR: &[u8] = b"\r\n\r\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssemblyState {
    AwaitingHeaderTerminator,
    AwaitingFullBody,
    Complete,
    TimedOut,
    ClosedByPeer,
}

impl AssemblyState {
    /// No more bytes will be accepted in a terminal state.
    pub fn is_terminal(self) -> bool {
        !matches!(
            self,
            AssemblyState::AwaitingHeaderTerminator | AssemblyState::AwaitingFullBody
        )
    }
}

/// Push assembler for one HTTP/1.1 response. Feed chunks via `receive`, report
/// EOF via `peer_closed` and read timeouts via `timed_out`, then `finish`.
#[derive(Debug)]
pub struct ResponseAssembler {
    state: AssemblyState,
    buf: BytesMut,
    /// Offset of the first body byte, once the terminator has been seen.
    body_start: Option<usize>,
    declared_length: Option<usize>,
    /// Where the next terminator search starts.
    scan_from: usize,
}

impl ResponseAssembler {
    pub fn new() -> Self {
        Self {
            state: AssemblyState::AwaitingHeaderTerminator,
            buf: BytesMut::with_capacity(4096),
            body_start: None,
            declared_length: None,
            scan_from: 0,
        }
    }

    pub fn state(&self) -> AssemblyState {
        self.state
    }

    /// Bytes accumulated so far, header included.
    pub fn buffered(&self) -> usize {
        self.buf.len()
    }

    /// Append a chunk and advance the state machine.
    pub fn receive(&mut self, chunk: &[u8]) -> AssemblyState {
        if self.state.is_terminal() {
            return self.state;
        }
        self.buf.extend_from_slice(chunk);

        if self.state == AssemblyState::AwaitingHeaderTerminator {
            match find_terminator(&self.buf, self.scan_from) {
                Some(pos) => {
                    self.body_start = Some(pos + TERMINATOR.len());
                    self.declared_length = content_length(&self.buf[..pos]);
                    self.state = AssemblyState::AwaitingFullBody;
                }
                None => {
                    // A terminator split across chunks starts at most 3 bytes back.
                    self.scan_from = self.buf.len().saturating_sub(TERMINATOR.len() - 1);
                    return self.state;
                }
            }
        }

        if let (Some(start), Some(len)) = (self.body_start, self.declared_length) {
            if self.buf.len() - start >= len {
                self.state = AssemblyState::Complete;
            }
        }
        self.state
    }

    /// The peer closed the connection (read returned 0).
    pub fn peer_closed(&mut self) -> AssemblyState {
        if !self.state.is_terminal() {
            self.state = if self.body_start.is_some() && self.declared_length.is_none() {
                AssemblyState::Complete
            } else {
                AssemblyState::ClosedByPeer
            };
        }
        self.state
    }

    /// No data arrived within the read timeout.
    pub fn timed_out(&mut self) -> AssemblyState {
        if !self.state.is_terminal() {
            self.state = AssemblyState::TimedOut;
        }
        self.state
    }

    /// Split the buffer on the first CRLFCRLF. Without a terminator everything is header.
    pub fn finish(self) -> RawResponse {
        let mut buf = self.buf;
        let (header, body) = match self.body_start {
            Some(start) => {
                let mut header = buf.split_to(start);
                header.truncate(start - TERMINATOR.len());
                (header.freeze(), buf.freeze())
            }
            None => (buf.freeze(), Bytes::new()),
        };
        RawResponse::new(header, body, self.declared_length, self.state)
    }
}

impl Default for ResponseAssembler {
    fn default() -> Self {
        Self::new()
    }
}

fn find_terminator(buf: &[u8], from: usize) -> Option<usize> {
    buf.get(from..)?
        .windows(TERMINATOR.len())
        .position(|w| w == TERMINATOR)
        .map(|i| from + i)
}

/// Declared body length from a header block (status line included). The
/// field name is matched case-insensitively; an unparseable value counts as
/// absent.
fn content_length(header: &[u8]) -> Option<usize> {
    let text = String::from_utf8_lossy(header);
    text.split("\r\n").skip(1).find_map(|line| {
        let (name, value) = line.split_once(':')?;
        if name.trim().eq_ignore_ascii_case("content-length") {
            value.trim().parse::<usize>().ok()
        } else {
            None
        }
    })
}
