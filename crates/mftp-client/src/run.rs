//! The client binary's entry point: argument parsing, connecting the
//! control socket, and the interactive read-dispatch-prompt loop.

use std::ffi::OsString;
use std::io::{BufRead, Read, Write};
use std::net::TcpStream;
use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;
use crate::dispatch::{Dispatcher, ExecOutcome};

/// Parses arguments, connects to `HOSTNAME`, and runs the interactive
/// prompt until `exit` or EOF on `stdin`.
///
/// The CLI surface and exit codes: `0` on an orderly `exit`
/// or EOF, `1` on a parse error or a failed connection, matching
/// [`clap`]'s `--help` (exit `0`, usage on `stdout`) against every other
/// parse failure (exit `1`, usage on `stderr`).
pub fn run<I, R, Out, Err>(args: I, stdin: &mut R, stdout: &mut Out, stderr: &mut Err) -> ExitCode
where
    I: IntoIterator,
    I::Item: Into<OsString> + Clone,
    R: BufRead,
    Out: Write,
    Err: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => return report_clap_error(&e, stdout, stderr),
    };

    mftp_logging::init(cli.debug);

    let control = match TcpStream::connect((cli.hostname.as_str(), mftp_proto::config::CONTROL_PORT)) {
        Ok(stream) => stream,
        Err(e) => {
            let _ = writeln!(stderr, "mftp: could not connect to {}: {e}", cli.hostname);
            return ExitCode::FAILURE;
        }
    };

    interactive_loop(control, &cli.hostname, stdin, stdout)
}

fn interactive_loop<C, R, Out>(control: C, host: &str, stdin: &mut R, stdout: &mut Out) -> ExitCode
where
    C: Read + Write,
    R: BufRead,
    Out: Write,
{
    let mut dispatcher = Dispatcher::new(control, host);
    let mut line = String::new();

    loop {
        let _ = write!(stdout, "{}", mftp_proto::config::PROMPT);
        let _ = stdout.flush();

        line.clear();
        match stdin.read_line(&mut line) {
            Ok(0) => return ExitCode::SUCCESS,
            Ok(_) => {}
            Err(_) => return ExitCode::FAILURE,
        }

        let trimmed = line.trim_end_matches(['\n', '\r']);
        if trimmed.is_empty() {
            continue;
        }

        match dispatcher.run_line(trimmed, stdout) {
            ExecOutcome::Continue => {}
            ExecOutcome::Exit => return ExitCode::SUCCESS,
        }
    }
}

fn report_clap_error(err: &clap::Error, stdout: &mut impl Write, stderr: &mut impl Write) -> ExitCode {
    use clap::error::ErrorKind;
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => {
            let _ = write!(stdout, "{err}");
            ExitCode::SUCCESS
        }
        _ => {
            let _ = write!(stderr, "{err}");
            ExitCode::FAILURE
        }
    }
}
