//! Shared error type threaded through both the client dispatcher and the
//! daemon's per-connection loop.

use std::fmt;
use std::io;

/// Which of five error categories a failure belongs to.
///
/// The category never changes *whether* the session continues (only a
/// [`ErrorKind::Fatal`] ever terminates the process) — it only changes how
/// the message is framed for the user.
#[derive(Debug)]
pub enum ErrorKind {
    /// Invalid wire code, missing expected payload, unexpected EOF.
    Protocol(String),
    /// A socket/file/process call failed; carries the OS's own message.
    System(io::Error),
    /// A local, pre-network user mistake (unrecognized command, bad `put`
    /// path).
    User(String),
    /// A diagnostic the *peer* sent back (an `E` response, daemon side: an
    /// `ERR`-worthy local failure it is about to report to the client).
    Remote(String),
    /// The server port could not be bound, or the client could not
    /// connect; the process is about to exit.
    Fatal(String),
}

/// An error surfaced by the client or the daemon.
#[derive(Debug)]
pub struct MftpError {
    kind: ErrorKind,
}

impl MftpError {
    /// Builds a [`ErrorKind::Protocol`] error.
    pub fn protocol(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Protocol(message.into()) }
    }

    /// Builds a [`ErrorKind::User`] error.
    pub fn user(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::User(message.into()) }
    }

    /// Builds a [`ErrorKind::Remote`] error.
    pub fn remote(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Remote(message.into()) }
    }

    /// Builds a [`ErrorKind::Fatal`] error.
    pub fn fatal(message: impl Into<String>) -> Self {
        Self { kind: ErrorKind::Fatal(message.into()) }
    }

    /// Returns the error's category.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// The bare diagnostic text, with no "Error:"/"Server error:" framing.
    #[must_use]
    pub fn text(&self) -> String {
        match &self.kind {
            ErrorKind::Protocol(m) | ErrorKind::User(m) | ErrorKind::Remote(m) | ErrorKind::Fatal(m) => m.clone(),
            ErrorKind::System(e) => e.to_string(),
        }
    }

    /// The process exit code this error implies if it is fatal.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        1
    }
}

impl fmt::Display for MftpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text())
    }
}

impl std::error::Error for MftpError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            ErrorKind::System(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MftpError {
    fn from(err: io::Error) -> Self {
        Self { kind: ErrorKind::System(err) }
    }
}

impl From<mftp_proto::ProtoError> for MftpError {
    fn from(err: mftp_proto::ProtoError) -> Self {
        Self::protocol(err.to_string())
    }
}

/// Alias for results carrying an [`MftpError`].
pub type Result<T> = std::result::Result<T, MftpError>;

/// Maps a top-level result to the process exit code convention: `0` on
/// success, `1` on any startup/argument/fatal error.
#[must_use]
pub fn exit_code_from(result: &Result<()>) -> std::process::ExitCode {
    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(_) => std::process::ExitCode::FAILURE,
    }
}
