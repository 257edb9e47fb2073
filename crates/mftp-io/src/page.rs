//! Paging helpers: `page_command` drives a local listing (`ls`) straight
//! into `more -20`; `page_stream` pages an already-open byte source (the
//! data socket, for `rls`/`show`) the same way.
//!
//! Both spawn the pager as its own child so a user quitting `more` early
//! only breaks the pipe between the pager and its feeder, never the
//! caller: for `page_command` the feeder is a second child process (the
//! listing command itself); for `page_stream` it is a helper thread
//! copying the source into the pager's stdin. Either way a `BrokenPipe`
//! from the feeding side is swallowed rather than propagated, matching the
//! original's two-process design, where the parent was shielded from
//! `SIGPIPE` by delegating the write to a disposable child.

use crate::copy::copy_stream;
use mftp_proto::config::PAGER_CMD;
use std::io::{self, Read};
use std::process::{Command, Stdio};

/// Runs `args` with its stdout piped into `more -20`, both inheriting the
/// terminal otherwise. Used for the client's local `ls`.
///
/// Returns `true` if both the listing command and the pager exited
/// successfully.
pub fn page_command(args: &[&str], cwd: &std::path::Path) -> io::Result<bool> {
    let [program, rest @ ..] = args else {
        return Err(io::Error::new(io::ErrorKind::InvalidInput, "empty command"));
    };

    let mut pager = Command::new(PAGER_CMD[0]).args(&PAGER_CMD[1..]).stdin(Stdio::piped()).spawn()?;
    let pager_stdin = pager.stdin.take().expect("stdin was piped");

    let mut source = Command::new(program)
        .args(rest)
        .current_dir(cwd)
        .stdout(Stdio::from(pager_stdin))
        .spawn()?;

    let source_status = source.wait()?;
    let pager_status = pager.wait()?;
    Ok(source_status.success() && pager_status.success())
}

/// Pages `src` through `more -20`, feeding it from a helper thread so a
/// broken pipe (the user quit the pager) doesn't surface as an error to
/// the caller.
///
/// Returns `true` if the pager exited successfully.
pub fn page_stream<R>(mut src: R) -> io::Result<bool>
where
    R: Read + Send + 'static,
{
    let mut pager = Command::new(PAGER_CMD[0]).args(&PAGER_CMD[1..]).stdin(Stdio::piped()).spawn()?;
    let mut pager_stdin = pager.stdin.take().expect("stdin was piped");

    let feeder = std::thread::spawn(move || -> io::Result<()> {
        match copy_stream(&mut src, &mut pager_stdin) {
            Ok(_) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
            Err(e) => Err(e),
        }
    });

    let pager_status = pager.wait()?;
    match feeder.join() {
        Ok(result) => result?,
        Err(_) => return Err(io::Error::other("pager feed thread panicked")),
    }
    Ok(pager_status.success())
}
