#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `mftp-core` holds the one error type ([`error::MftpError`]) shared by
//! `mftp-client` and `mftp-daemon`, tagged with one of five error
//! categories (protocol violation, system error, user error,
//! server-reported error, or fatal startup failure).
//!
//! # Design
//!
//! Keeping this in its own crate (rather than duplicating an error enum in
//! both `mftp-client` and `mftp-daemon`) means the dispatcher and the
//! daemon loop report failures through the same shape, which is what lets
//! `mftp-proto::ProtoError` convert into it with a single `impl From`.
//!
//! # Errors
//!
//! [`error::MftpError::text`] returns the bare diagnostic, with no
//! "Error:"/"Server error:" framing — that framing is the caller's
//! responsibility, since the same error can be reported differently
//! depending on whether it originated locally or was relayed from a peer.

pub mod error;

pub use error::{exit_code_from, ErrorKind, MftpError, Result};
