/*
 * client.rs
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

//! HTTP client: connect to a host over TLS, then use the connection to exchange requests.

use tracing::info;

use crate::config::TransportConfig;
use crate::error::{Error, Result};
use crate::net::{connect_tls, tls_client_config};
use crate::protocol::http::connection::{HttpConnection, TlsConnection};

/// HTTP client. Create a connection with `HttpClient::connect(&config)`.
pub struct HttpClient;

impl HttpClient {
    /// Connect to `config.host:config.port` and complete the TLS handshake.
    /// DNS, TCP and handshake failures all surface as `Error::Connect`.
    pub async fn connect(config: &TransportConfig) -> Result<TlsConnection> {
        let tls_config = tls_client_config(config.verify_peer)?;
        let stream = connect_tls(
            &config.host,
            config.port,
            tls_config,
            config.connect_timeout,
        )
        .await
        .map_err(|source| Error::Connect {
            host: config.host.clone(),
            port: config.port,
            source,
        })?;
        info!(
            host = %config.host,
            port = config.port,
            verify_peer = config.verify_peer,
            "connected"
        );
        Ok(HttpConnection::new(
            stream,
            config.host.clone(),
            config.port,
            config.read_timeout,
            config.chunk_size,
        ))
    }
}
