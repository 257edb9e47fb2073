#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `mftp-client` is the command dispatcher: it owns the control
//! socket, parses lines typed at the [`mftp_proto::config::PROMPT`], and
//! drives one of three control-flow templates per command —
//! [`dispatch::Dispatcher::run_local`]-style local execution (`cd`, `ls`),
//! a single control-line round trip for `exit`/`rcd`, or the full `D`
//! handshake → data socket → data-bearing command sequence for
//! `rls`/`get`/`show`/`put`.
//!
//! # Design
//!
//! [`run::run`] is the thin entry point `bin/mftp` calls: parse arguments,
//! connect the control socket, hand off to the interactive loop. Everything
//! below that — [`dispatch::Dispatcher`] — is generic over the control
//! channel type so it can be driven in tests against an in-memory mock
//! instead of a real [`std::net::TcpStream`].
//!
//! # Errors
//!
//! Every dispatch failure is reported to the user (with the "Error:" or
//! "Server error:" framing a relayed diagnostic needs) and returns the client to the
//! prompt; nothing here panics on a protocol or I/O failure, and nothing is
//! retried automatically.

pub mod cli;
pub mod dispatch;
pub mod run;

pub use dispatch::{Dispatcher, ExecOutcome};
pub use run::run;
