//! The command dispatcher: parses user lines and drives one of three
//! three control-flow templates (local-only, remote-no-data,
//! remote-with-data) per command.

use std::io::{self, Read, Write};
use std::net::TcpStream;
use std::path::Path;

use mftp_core::{MftpError, Result};
use mftp_io::{copy_stream, create_exclusive, page_command, page_stream, read_line_str, write_all_counted};
use mftp_proto::catalog::{self, TransportClass};
use mftp_proto::codec::{encode_command, parse_response_line, parse_user_line, Response};
use mftp_proto::config::{LS_CMD, MAX_LINE};
use mftp_proto::CommandKind;

/// What the interactive loop should do after a line has been dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecOutcome {
    /// Keep prompting for the next line.
    Continue,
    /// The client ran `exit` successfully; the session is over.
    Exit,
}

/// A control-channel response with its borrowed text copied out, so it can
/// outlive the line buffer that produced it.
enum OwnedResponse {
    Ack(Option<String>),
    Err(String),
}

/// Drives the client's side of the protocol over one control connection.
///
/// Generic over the control channel so the dispatch logic (banner text,
/// control-flow templates, error framing) can be unit-tested against an
/// in-memory mock without a real socket; the data connection this opens for
/// `rls`/`get`/`show`/`put` is always a real [`TcpStream`] to `host`, since a
/// second connection is the one part of this type that is inherently
/// network I/O.
pub struct Dispatcher<'h, C> {
    control: C,
    host: &'h str,
}

impl<'h, C: Read + Write> Dispatcher<'h, C> {
    /// Builds a dispatcher around an already-connected control channel.
    pub fn new(control: C, host: &'h str) -> Self {
        Self { control, host }
    }

    /// Parses and executes one line typed at the prompt.
    ///
    /// Prints all user-facing output (banners, diagnostics) to `out`.
    pub fn run_line(&mut self, line: &str, out: &mut impl Write) -> ExecOutcome {
        match parse_user_line(line) {
            Ok(parsed) => self.run_command(parsed.kind, parsed.arg, out),
            Err(err) => {
                let _ = writeln!(out, "{err}");
                ExecOutcome::Continue
            }
        }
    }

    fn run_command(&mut self, kind: CommandKind, arg: Option<&str>, out: &mut impl Write) -> ExecOutcome {
        let entry = catalog::entry(kind);
        print_running_banner(out, entry.name.unwrap_or("data"), arg);

        let result = match entry.class {
            TransportClass::Local => self.run_local(kind, arg, out),
            TransportClass::RemoteNoData => self.run_remote_no_data(kind, arg, out),
            TransportClass::RemoteWithData => self.run_remote_with_data(kind, arg, out),
            TransportClass::Handshake => unreachable!("`D` is never typed by a user"),
        };

        let success = result.is_ok();
        print_finished_banner(out, success);

        if success && kind == CommandKind::Exit {
            ExecOutcome::Exit
        } else {
            ExecOutcome::Continue
        }
    }

    fn run_local(&mut self, kind: CommandKind, arg: Option<&str>, out: &mut impl Write) -> Result<()> {
        match kind {
            CommandKind::Cd => {
                let arg = arg.expect("catalog requires Cd to carry an argument");
                std::env::set_current_dir(arg).map_err(|e| report_local_error(out, e))
            }
            CommandKind::Ls => {
                let cwd = std::env::current_dir().map_err(|e| report_local_error(out, e))?;
                let ok = page_command(LS_CMD, &cwd).map_err(|e| report_local_error(out, e))?;
                if ok {
                    Ok(())
                } else {
                    Err(report_user_error(out, "ls exited with a non-zero status"))
                }
            }
            _ => unreachable!("only Cd and Ls are classified Local"),
        }
    }

    fn run_remote_no_data(&mut self, kind: CommandKind, arg: Option<&str>, out: &mut impl Write) -> Result<()> {
        self.send_command(kind, arg, out)?;
        match self.read_response(out)? {
            OwnedResponse::Ack(_) => Ok(()),
            OwnedResponse::Err(text) => Err(MftpError::remote(text)),
        }
    }

    fn run_remote_with_data(&mut self, kind: CommandKind, arg: Option<&str>, out: &mut impl Write) -> Result<()> {
        if kind == CommandKind::Put {
            check_readable_regular_file(out, arg.expect("catalog requires Put to carry an argument"))?;
        }

        self.send_command(CommandKind::Data, None, out)?;
        let port = match self.read_response(out)? {
            OwnedResponse::Ack(Some(payload)) => payload
                .parse::<u16>()
                .map_err(|_| report_protocol_error(out, "malformed data port in handshake response"))?,
            OwnedResponse::Ack(None) => {
                return Err(report_protocol_error(out, "data handshake ack carried no port"))
            }
            OwnedResponse::Err(text) => return Err(MftpError::remote(text)),
        };

        let mut data = TcpStream::connect((self.host, port)).map_err(|e| report_local_error(out, e))?;
        tracing::debug!(host = self.host, port, "data connection established");

        self.send_command(kind, arg, out)?;

        match kind {
            CommandKind::Rls | CommandKind::Show => {
                let ok = page_stream(data).map_err(|e| report_local_error(out, e))?;
                if !ok {
                    let _ = writeln!(out, "Error: pager exited with a non-zero status");
                }
                match self.read_response(out)? {
                    OwnedResponse::Ack(_) => Ok(()),
                    OwnedResponse::Err(text) => Err(MftpError::remote(text)),
                }
            }
            CommandKind::Get => {
                let arg = arg.expect("catalog requires Get to carry an argument");
                let name = Path::new(arg)
                    .file_name()
                    .ok_or_else(|| report_user_error(out, format!("\"{arg}\" has no file name component")))?;
                let dest = Path::new(name);
                let mut file = create_exclusive(dest).map_err(|e| report_local_error(out, e))?;
                copy_stream(&mut data, &mut file).map_err(|e| report_local_error(out, e))?;
                match self.read_response(out)? {
                    OwnedResponse::Ack(_) => Ok(()),
                    OwnedResponse::Err(text) => {
                        // The response arrives after the data stream's EOF (the
                        // response-timing rule), so a server-side failure still
                        // leaves an empty file behind; remove it rather than
                        // report success-shaped leftovers for a failed get.
                        drop(file);
                        let _ = std::fs::remove_file(dest);
                        Err(MftpError::remote(text))
                    }
                }
            }
            CommandKind::Put => match self.read_response(out)? {
                OwnedResponse::Err(text) => Err(MftpError::remote(text)),
                OwnedResponse::Ack(_) => {
                    let arg = arg.expect("catalog requires Put to carry an argument");
                    let mut file = std::fs::File::open(arg).map_err(|e| report_local_error(out, e))?;
                    copy_stream(&mut file, &mut data).map_err(|e| report_local_error(out, e))?;
                    Ok(())
                }
            },
            _ => unreachable!("only Rls/Show/Get/Put are classified RemoteWithData"),
        }
    }

    fn send_command(&mut self, kind: CommandKind, arg: Option<&str>, out: &mut impl Write) -> Result<()> {
        let line = encode_command(kind, arg).map_err(|e| report_protocol_error(out, e.to_string()))?;
        let written = write_all_counted(&mut self.control, line.as_bytes()).map_err(|e| report_local_error(out, e))?;
        if written != line.len() {
            return Err(report_protocol_error(out, "connection closed while sending command"));
        }
        Ok(())
    }

    fn read_response(&mut self, out: &mut impl Write) -> Result<OwnedResponse> {
        let mut buf = [0u8; MAX_LINE];
        let line = read_line_str(&mut self.control, &mut buf).map_err(|e| report_local_error(out, e))?;
        let Some(line) = line else {
            return Err(report_protocol_error(out, "unexpected EOF"));
        };
        match parse_response_line(line) {
            Ok(Response::Ack(payload)) => Ok(OwnedResponse::Ack(payload.map(str::to_owned))),
            Ok(Response::Err(text)) => {
                let _ = writeln!(out, "Server error: {text}");
                Ok(OwnedResponse::Err(text.to_owned()))
            }
            Err(e) => Err(report_protocol_error(out, e.to_string())),
        }
    }
}

fn check_readable_regular_file(out: &mut impl Write, arg: &str) -> Result<()> {
    let is_regular_and_readable = std::fs::metadata(arg).is_ok_and(|m| m.is_file()) && std::fs::File::open(arg).is_ok();
    if is_regular_and_readable {
        Ok(())
    } else {
        Err(report_user_error(out, format!("put: \"{arg}\" is not a readable regular file")))
    }
}

fn report_local_error(out: &mut impl Write, err: io::Error) -> MftpError {
    let _ = writeln!(out, "Error: {err}");
    MftpError::from(err)
}

fn report_user_error(out: &mut impl Write, message: impl Into<String>) -> MftpError {
    let message = message.into();
    let _ = writeln!(out, "Error: {message}");
    MftpError::user(message)
}

fn report_protocol_error(out: &mut impl Write, message: impl Into<String>) -> MftpError {
    let message = message.into();
    let _ = writeln!(out, "Error: {message}");
    MftpError::protocol(message)
}

fn print_running_banner(out: &mut impl Write, name: &str, arg: Option<&str>) {
    match arg {
        Some(arg) => {
            let _ = writeln!(out, "Running \"{name}\" with argument \"{arg}\"");
        }
        None => {
            let _ = writeln!(out, "Running \"{name}\"");
        }
    }
}

fn print_finished_banner(out: &mut impl Write, success: bool) {
    let status = i32::from(!success);
    let adverb = if success { "successfully" } else { "unsuccessfully" };
    let _ = writeln!(out, "Command finished {adverb} (status = {status})");
}
