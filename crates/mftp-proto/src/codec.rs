//! Encoding of outbound command/response lines and parsing of inbound ones.
//!
//! Every function here operates on a line that has already had its
//! terminating `\n` stripped by the I/O layer (see `mftp-io::read_line`);
//! none of the encoders or parsers in this module touch a socket directly.

use crate::catalog::{code_for_kind, kind_for_code, kind_for_name, CommandKind};
use crate::config::MAX_LINE;
use thiserror::Error;

/// Failures that can occur while encoding or parsing a protocol line.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtoError {
    /// The encoded line would exceed [`MAX_LINE`] bytes.
    #[error("encoded line exceeds the {MAX_LINE}-byte control line limit")]
    LineTooLong,
    /// `encode_command` was asked to encode a purely local command kind.
    #[error("{0:?} has no wire code; it never leaves the client")]
    NotRemote(CommandKind),
    /// The input line was empty.
    #[error("empty command line")]
    Empty,
    /// The user line did not match any catalog entry, or its argument
    /// presence disagreed with the catalog's requirement.
    #[error("Unrecognized command: \"{0}\"")]
    UnknownCommand(String),
    /// The first byte of a control line did not match any wire code.
    #[error("unrecognized command")]
    UnknownCode,
    /// A response line started with neither `A` nor `E`.
    #[error("malformed response line")]
    MalformedResponse,
}

/// A command parsed from either a user-typed line or a control line.
///
/// `arg` borrows from the line buffer that produced it, mirroring the
/// invariant that the argument text is only
/// valid as long as the buffer that holds it: copy it out (`to_owned`) if
/// it must outlive the next read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedCommand<'a> {
    /// Which command this is.
    pub kind: CommandKind,
    /// The argument text, if the line carried one.
    pub arg: Option<&'a str>,
}

/// A response parsed from a control line, client side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Response<'a> {
    /// `A[payload]` — the only payload in use is the `D` handshake's port.
    Ack(Option<&'a str>),
    /// `E<message>` — a free-form diagnostic.
    Err(&'a str),
}

/// Encodes an outbound command line: `<code>[<arg>]\n`.
///
/// Returns [`ProtoError::NotRemote`] for command kinds with no wire code
/// (`Cd`, `Ls`), and [`ProtoError::LineTooLong`] if the result would not
/// fit within [`MAX_LINE`] bytes.
pub fn encode_command(kind: CommandKind, arg: Option<&str>) -> Result<String, ProtoError> {
    let code = code_for_kind(kind).ok_or(ProtoError::NotRemote(kind))?;
    let mut line = String::with_capacity(2 + arg.map_or(0, str::len));
    line.push(code as char);
    if let Some(arg) = arg {
        line.push_str(arg);
    }
    line.push('\n');
    if line.len() > MAX_LINE {
        return Err(ProtoError::LineTooLong);
    }
    Ok(line)
}

/// Encodes an acknowledgement line: `A[<payload>]\n`.
#[must_use]
pub fn encode_ack(payload: Option<&str>) -> String {
    format!("A{}\n", payload.unwrap_or(""))
}

/// Encodes an error line: `E<message>\n`.
#[must_use]
pub fn encode_err(message: &str) -> String {
    format!("E{message}\n")
}

/// Parses a line typed by the client's user into a command.
///
/// Splits on the first run of whitespace; the name before it is looked up
/// in the catalog, and everything after the whitespace (with no further
/// trimming) becomes the argument. Rejects with [`ProtoError::UnknownCommand`]
/// both for names absent from the catalog and for names whose
/// argument-required bit disagrees with whether trailing text was present.
pub fn parse_user_line(line: &str) -> Result<ParsedCommand<'_>, ProtoError> {
    let line = line.trim_end_matches(['\n', '\r']);
    if line.is_empty() {
        return Err(ProtoError::Empty);
    }

    let split_at = line.find(char::is_whitespace).unwrap_or(line.len());
    let name = &line[..split_at];
    let rest = line[split_at..].trim_start();
    let arg = if rest.is_empty() { None } else { Some(rest) };

    let kind = kind_for_name(name).ok_or_else(|| ProtoError::UnknownCommand(line.to_owned()))?;
    let arg_required = crate::catalog::entry(kind).arg_required;
    if arg_required != arg.is_some() {
        return Err(ProtoError::UnknownCommand(line.to_owned()));
    }

    Ok(ParsedCommand { kind, arg })
}

/// Parses a control line, daemon side: the first byte is the wire code,
/// everything after it (up to the stripped `\n`) is the argument.
///
/// Unlike [`parse_user_line`], this does not validate argument presence
/// against the catalog — that is per-command policy enforced by the
/// daemon's dispatch, not the codec.
pub fn parse_control_line(line: &str) -> Result<ParsedCommand<'_>, ProtoError> {
    let mut bytes = line.bytes();
    let code = bytes.next().ok_or(ProtoError::Empty)?;
    let kind = kind_for_code(code).ok_or(ProtoError::UnknownCode)?;
    let rest = &line[1..];
    let arg = if rest.is_empty() { None } else { Some(rest) };
    Ok(ParsedCommand { kind, arg })
}

/// Parses a response line, client side.
pub fn parse_response_line(line: &str) -> Result<Response<'_>, ProtoError> {
    let mut chars = line.char_indices();
    let (_, tag) = chars.next().ok_or(ProtoError::Empty)?;
    let rest = &line[tag.len_utf8()..];
    match tag {
        'A' => Ok(Response::Ack(if rest.is_empty() { None } else { Some(rest) })),
        'E' => Ok(Response::Err(rest)),
        _ => Err(ProtoError::MalformedResponse),
    }
}
