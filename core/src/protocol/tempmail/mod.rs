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

//! Disposable mailbox service: create an address, poll it for a message.
//!
//! `MailboxSession` owns the TLS connection and the mailbox;
//! `poll_until_message` drives any `MessageSource` with a fixed retry budget.

pub mod extract;
pub mod poll;
pub mod session;
pub mod types;

pub use extract::{extract_email, extract_message};
pub use poll::{poll_until_message, LogObserver, MessageSource, PollObserver};
pub use session::MailboxSession;
pub use types::{Mailbox, Message};
