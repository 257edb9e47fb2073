//! Spawning a subprocess whose output is redirected to a data connection,
//! used for `rls`'s `ls -l`.

use std::io;
use std::net::TcpStream;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

/// Runs `args[0] args[1..]` in `cwd` with both stdout and stderr redirected
/// to `handle`, mirroring the original's `exec_to_fd`.
///
/// Consumes clones of `handle`'s underlying socket rather than `handle`
/// itself, so the caller keeps the connection to close once the child
/// exits.
pub fn exec_to_handle(handle: &TcpStream, args: &[&str], cwd: &Path) -> io::Result<ExitStatus> {
    let [program, rest @ ..] = args else {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty command"));
    };

    let stdout = handle.try_clone()?;
    let stderr = handle.try_clone()?;

    tracing::debug!(program, cwd = %cwd.display(), "spawning subprocess for rls");

    Command::new(program)
        .args(rest)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::from(stdout))
        .stderr(Stdio::from(stderr))
        .status()
}
