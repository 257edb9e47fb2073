#![deny(unsafe_code)]

use std::env;
use std::io::{self, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    run_with(env::args_os(), &mut stdout, &mut stderr)
}

fn run_with<Out, Err>(
    args: impl IntoIterator<Item = std::ffi::OsString>,
    stdout: &mut Out,
    stderr: &mut Err,
) -> ExitCode
where
    Out: Write,
    Err: Write,
{
    mftp_daemon::run(args, stdout, stderr)
}
