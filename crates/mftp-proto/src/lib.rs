#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `mftp-proto` is the wire protocol shared by the `mftp` client and the
//! `mftpd` daemon: the [`catalog`] of the nine command kinds, the line
//! [`codec`] that encodes and parses control-channel traffic, and the
//! handful of protocol-wide [`config`] constants (port, backlog, line
//! length, prompt, and the `ls`/`more` argument vectors).
//!
//! # Design
//!
//! The crate is deliberately byte-oriented rather than socket-oriented: it
//! never touches a `TcpStream`. Callers (`mftp-client`, `mftp-daemon`) own
//! the I/O and hand this crate already-framed lines (with the terminating
//! `\n` stripped) to parse, or ask it to produce a line to write.
//! Separating framing from transport keeps the parser and the encoder
//! exhaustively unit-testable without a socket in sight.
//!
//! # Invariants
//!
//! - [`catalog::code_for_kind`] and [`catalog::kind_for_code`] are inverse
//!   for every wire code in `{Q, C, L, G, P, D}`.
//! - [`codec::encode_command`] never produces a line longer than
//!   [`config::MAX_LINE`] bytes; it errors instead of truncating.
//! - [`codec::parse_user_line`] rejects a line whenever the catalog's
//!   argument-required bit disagrees with whether trailing text was
//!   present, in addition to rejecting unknown names.
//!
//! # Errors
//!
//! All fallible functions in this crate return [`codec::ProtoError`], which
//! implements [`std::error::Error`] via `thiserror`.

pub mod catalog;
pub mod codec;
pub mod config;

pub use catalog::{CatalogEntry, CommandKind, TransportClass};
pub use codec::{ParsedCommand, ProtoError, Response};
