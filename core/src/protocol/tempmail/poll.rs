/*
 * poll.rs
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

//! Polling loop: ask for the newest message until one arrives or the attempt
//! budget runs out.
//!
//! Errors from a single attempt are handed to a `PollObserver` and the loop
//! carries on; running out of attempts returns `None`, which callers report
//! as a normal timeout. The delay is fixed, not exponential.

use async_trait::async_trait;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::config::PollConfig;
use crate::error::{Error, Result};
use crate::protocol::tempmail::types::Message;

/// Something that can be asked for the newest message. `Ok(None)` means no
/// message yet; `Err` is a failed attempt the poller may retry.
#[async_trait]
pub trait MessageSource {
    async fn fetch_newest_message(&mut self) -> Result<Option<Message>>;
}

/// Receives per-attempt events from `poll_until_message`.
pub trait PollObserver {
    /// An attempt failed; the loop continues.
    fn attempt_failed(&mut self, attempt: u32, error: &Error);

    /// An attempt completed without a message.
    fn attempt_empty(&mut self, _attempt: u32) {}
}

/// Observer that logs through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl PollObserver for LogObserver {
    fn attempt_failed(&mut self, attempt: u32, error: &Error) {
        warn!(attempt, "error retrieving messages: {}", error);
    }

    fn attempt_empty(&mut self, attempt: u32) {
        debug!(attempt, "no message yet");
    }
}

/// Poll `source` up to `config.max_attempts` times, sleeping `config.delay`
/// between attempts. Returns the first message seen, or `None` once the
/// budget is spent.
pub async fn poll_until_message<M, O>(
    source: &mut M,
    config: &PollConfig,
    observer: &mut O,
) -> Option<Message>
where
    M: MessageSource + ?Sized,
    O: PollObserver + ?Sized,
{
    for attempt in 1..=config.max_attempts {
        match source.fetch_newest_message().await {
            Ok(Some(message)) => {
                info!(attempt, "message received");
                return Some(message);
            }
            Ok(None) => observer.attempt_empty(attempt),
            Err(e) => observer.attempt_failed(attempt, &e),
        }
        if attempt < config.max_attempts && !config.delay.is_zero() {
            sleep(config.delay).await;
        }
    }
    info!(attempts = config.max_attempts, "no message within the attempt budget");
    None
}
