#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `mftp-logging` wires the `-d`/`--debug` flag shared by `mftp` and `mftpd`
//! to a [`tracing`] subscriber: a single process-wide toggle, checked once
//! at startup, between a quiet `warn` filter and a verbose `debug` filter.
//! [`init`] replaces a hand-rolled `printf`-gated debug flag with an
//! injected [`tracing_subscriber::EnvFilter`].
//!
//! # Design
//!
//! There is exactly one toggle: debug logging on or off. It is set once,
//! before the control listener binds or the client connects, and never
//! changes afterward — the same guarantee the original's unsynchronized
//! global gave it, since nothing reads or writes it concurrently.

use tracing_subscriber::EnvFilter;

/// Installs the process-wide [`tracing`] subscriber.
///
/// `debug` selects between two fixed filters: `warn` (quiet — only
/// protocol-level problems worth surfacing) and `debug` (the `-d` flag's
/// verbose diagnostics). Safe to call more than once (e.g. from multiple
/// integration tests in the same process): a subscriber already installed
/// by an earlier call is left in place rather than causing a panic.
pub fn init(debug: bool) {
    let directive = if debug { "debug" } else { "warn" };
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
