/*
 * request.rs
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

//! HTTP request: method, path under the mailbox API prefix, Host header.
//!
//! Requests never carry a body, so the wire form is the request line, `Host`,
//! `Connection: keep-alive` and the blank line.

/// Path prefix of every mailbox API resource.
pub const API_PREFIX: &str = "/api/v3/email/";

/// HTTP request method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

/// Immutable request for one mailbox API resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    method: Method,
    path: String,
    host: String,
}

impl Request {
    /// Leading slashes of `resource` are stripped before it is appended to the prefix.
    pub fn new(method: Method, resource: &str, host: &str) -> Self {
        Self {
            method,
            path: format!("{}{}", API_PREFIX, resource.trim_start_matches('/')),
            host: host.to_string(),
        }
    }

    /// `POST new`: ask the service for a fresh mailbox.
    pub fn create_mailbox(host: &str) -> Self {
        Self::new(Method::Post, "new", host)
    }

    /// `GET <address>/messages`: list what the mailbox has received.
    pub fn list_messages(address: &str, host: &str) -> Self {
        Self::new(Method::Get, &format!("{}/messages", address), host)
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    /// Serialize to the exact bytes written on the wire.
    pub fn to_bytes(&self) -> Vec<u8> {
        format!(
            "{} {} HTTP/1.1\r\nHost: {}\r\nConnection: keep-alive\r\n\r\n",
            self.method.as_str(),
            self.path,
            self.host
        )
        .into_bytes()
    }
}

/// Build the wire form of a request in one call.
pub fn build(method: Method, resource: &str, host: &str) -> Vec<u8> {
    Request::new(method, resource, host).to_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOST: &str = "api.internal.temp-mail.io";

    #[test]
    fn create_mailbox_wire_form() {
        let bytes = Request::create_mailbox(HOST).to_bytes();
        assert_eq!(
            bytes,
            b"POST /api/v3/email/new HTTP/1.1\r\n\
              Host: api.internal.temp-mail.io\r\n\
              Connection: keep-alive\r\n\r\n"
                .to_vec()
        );
    }

    #[test]
    fn list_messages_wire_form() {
        let bytes = Request::list_messages("abc123@mail.example.com", HOST).to_bytes();
        let text = String::from_utf8(bytes).unwrap();
        assert!(text.starts_with("GET /api/v3/email/abc123@mail.example.com/messages HTTP/1.1\r\n"));
    }

    #[test]
    fn leading_slashes_are_stripped() {
        let req = Request::new(Method::Get, "///x/messages", HOST);
        assert_eq!(req.path(), "/api/v3/email/x/messages");
    }

    #[test]
    fn request_line_parses_back_and_has_no_body() {
        let cases = [
            (Method::Get, "a@b.io/messages"),
            (Method::Post, "/new"),
            (Method::Get, ""),
        ];
        for (method, resource) in cases {
            let bytes = build(method, resource, "h.example");
            assert!(bytes.ends_with(b"\r\n\r\n"));
            let text = std::str::from_utf8(&bytes).unwrap();
            // The only blank line is the terminator.
            assert_eq!(text.find("\r\n\r\n"), Some(text.len() - 4));
            let first = text.split("\r\n").next().unwrap();
            let parts: Vec<&str> = first.split(' ').collect();
            assert_eq!(parts.len(), 3);
            assert_eq!(parts[0], method.as_str());
            assert_eq!(
                parts[1],
                format!("{}{}", API_PREFIX, resource.trim_start_matches('/'))
            );
            assert_eq!(parts[2], "HTTP/1.1");
        }
    }

    #[test]
    fn build_is_deterministic() {
        assert_eq!(
            build(Method::Post, "new", HOST),
            build(Method::Post, "new", HOST)
        );
    }
}
