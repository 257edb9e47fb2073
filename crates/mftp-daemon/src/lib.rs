#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `mftp-daemon` is the server half of the mftp file transfer protocol: a
//! [`listener`] that binds the fixed control port and spawns one thread per
//! accepted connection, and a [`connection::Connection`] that runs that
//! connection's command loop to completion.
//!
//! # Design
//!
//! Concurrency is thread-per-connection rather than the original
//! implementation's fork-per-connection: each connection's working
//! directory is therefore tracked as in-memory state
//! ([`connection::Connection::cwd`]) instead of a process-global `chdir(2)`
//! call, so concurrent connections' `rcd` commands cannot interfere with
//! one another.
//!
//! # Invariants
//!
//! - Exactly one response line crosses the control socket per command line
//!   received, except when the data handshake's listener accept fails
//!   after the handshake's own ack has already been sent (there is no
//!   third line left to send; the failure is only logged).
//! - A data handle installed by `D` is consumed by the very next
//!   data-bearing command, whether that succeeds or fails; a second
//!   data-bearing command with no intervening `D` reports the same
//!   "no data connection" error as the first command would have without
//!   any `D` at all.
//!
//! # Errors
//!
//! Per-command failures are reported to the client as `E` response lines;
//! they never terminate the connection. Only a read error or EOF on the
//! control socket itself ends [`connection::Connection::serve`].

pub mod cli;
pub mod connection;
pub mod listener;

pub use connection::Connection;
pub use listener::{bind_control_listener, run, serve_forever};
