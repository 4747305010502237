/*
 * main.rs
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

//! tempmail: create a disposable mailbox, print its address, wait for the
//! first message and print it.
//!
//! Ctrl-C at any point closes the connection and exits with status 0.

use std::process::ExitCode;
use std::time::Duration;

use tempmail_core::{poll_until_message, LogObserver, MailboxSession, PollConfig, TransportConfig};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

const USAGE: &str = "usage: tempmail [--insecure] [--attempts N] [--delay SECS] [--timeout SECS] [--quiet]";

#[derive(Debug, PartialEq)]
struct Options {
    transport: TransportConfig,
    poll: PollConfig,
    quiet: bool,
}

#[derive(Debug, PartialEq)]
enum Command {
    Run(Options),
    Help,
}

fn parse_args<I>(args: I) -> Result<Command, String>
where
    I: IntoIterator<Item = String>,
{
    let mut options = Options {
        transport: TransportConfig::default(),
        poll: PollConfig::default(),
        quiet: false,
    };
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "-k" | "--insecure" => options.transport.verify_peer = false,
            "-q" | "--quiet" => options.quiet = true,
            "--attempts" => options.poll.max_attempts = number(&arg, args.next())?,
            "--delay" => options.poll.delay = Duration::from_secs(number(&arg, args.next())?),
            "--timeout" => {
                options.transport.read_timeout = Duration::from_secs(number(&arg, args.next())?)
            }
            other => return Err(format!("unknown argument: {}", other)),
        }
    }
    Ok(Command::Run(options))
}

fn number<T: std::str::FromStr>(flag: &str, value: Option<String>) -> Result<T, String> {
    let value = value.ok_or_else(|| format!("{} needs a value", flag))?;
    value
        .parse()
        .map_err(|_| format!("{}: not a number: {}", flag, value))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return ExitCode::SUCCESS;
        }
        Err(msg) => {
            eprintln!("{}\n{}", msg, USAGE);
            return ExitCode::from(2);
        }
    };
    init_tracing();

    // Interrupted while connecting: dropping the half-built session releases the socket.
    let mut session = tokio::select! {
        opened = MailboxSession::open(&options.transport) => match opened {
            Ok(session) => session,
            Err(e) => {
                debug!(error = ?e, "mailbox creation failed");
                eprintln!("Error: {}", e);
                return ExitCode::FAILURE;
            }
        },
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted while creating mailbox");
            return ExitCode::SUCCESS;
        }
    };
    if !options.quiet {
        println!("email: {}", session.address());
    }

    let mut observer = LogObserver;
    let outcome = tokio::select! {
        message = poll_until_message(&mut session, &options.poll, &mut observer) => Some(message),
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted while polling");
            None
        }
    };
    session.close().await;

    if let Some(message) = outcome {
        match message {
            Some(message) => println!("{}", message),
            None => println!("Timeout: no messages received"),
        }
    }
    ExitCode::SUCCESS
}
