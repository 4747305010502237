/*
 * response.rs
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

//! Assembled HTTP response: header block and body as received, split on the first CRLFCRLF.

use std::borrow::Cow;

use bytes::Bytes;

use crate::protocol::http::h1::AssemblyState;

/// Raw response produced by `ResponseAssembler::finish`.
///
/// May be partial: check `is_complete()` or `state()`. The header block
/// excludes the terminating blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    header: Bytes,
    body: Bytes,
    declared_length: Option<usize>,
    state: AssemblyState,
}

impl RawResponse {
    pub(crate) fn new(
        header: Bytes,
        body: Bytes,
        declared_length: Option<usize>,
        state: AssemblyState,
    ) -> Self {
        Self {
            header,
            body,
            declared_length,
            state,
        }
    }

    pub fn header(&self) -> &[u8] {
        &self.header
    }

    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Value of `Content-Length`, if the header block declared one.
    pub fn declared_length(&self) -> Option<usize> {
        self.declared_length
    }

    /// Assembly state the response ended in.
    pub fn state(&self) -> AssemblyState {
        self.state
    }

    pub fn is_complete(&self) -> bool {
        self.state == AssemblyState::Complete
    }

    /// True when the server sent nothing at all.
    pub fn is_empty(&self) -> bool {
        self.header.is_empty() && self.body.is_empty()
    }

    /// Status code from the status line (`HTTP/1.1 200 OK`), if one was received.
    pub fn status(&self) -> Option<u16> {
        let line_end = self
            .header
            .windows(2)
            .position(|w| w == b"\r\n")
            .unwrap_or(self.header.len());
        let line = std::str::from_utf8(&self.header[..line_end]).ok()?;
        let mut parts = line.splitn(3, ' ');
        if !parts.next()?.starts_with("HTTP/") {
            return None;
        }
        parts.next()?.parse::<u16>().ok()
    }

    /// Body decoded as UTF-8; invalid sequences become U+FFFD.
    pub fn body_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.body)
    }
}
