//! Protocol-wide constants shared by the client and the daemon.
//!
//! A fixed control port, a small listen backlog, a line-length cap derived
//! from `BUFSIZ`, and the client's prompt string.

/// TCP port the daemon listens on for control connections.
pub const CONTROL_PORT: u16 = 49999;

/// Listen backlog for both the control listener and the per-command
/// ephemeral data listener.
pub const BACKLOG: i32 = 4;

/// Maximum control-line length, including the terminating `\n`.
pub const MAX_LINE: usize = 8192;

/// Prompt string the client prints before reading a command.
pub const PROMPT: &str = "mftp$ ";

/// Argument vector used to list a directory for `ls`/`rls`.
pub const LS_CMD: &[&str] = &["ls", "-l"];

/// Argument vector used to page output for `ls`/`rls`/`show`.
pub const PAGER_CMD: &[&str] = &["more", "-20"];
