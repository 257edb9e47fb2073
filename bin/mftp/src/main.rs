#![deny(unsafe_code)]

use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::{env, io::BufReader};

fn main() -> ExitCode {
    let stdin = io::stdin();
    let mut stdin = BufReader::new(stdin.lock());
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    run_with(env::args_os(), &mut stdin, &mut stdout, &mut stderr)
}

fn run_with<R, Out, Err>(
    args: impl IntoIterator<Item = std::ffi::OsString>,
    stdin: &mut R,
    stdout: &mut Out,
    stderr: &mut Err,
) -> ExitCode
where
    R: BufRead,
    Out: Write,
    Err: Write,
{
    mftp_client::run(args, stdin, stdout, stderr)
}
