//! The command catalog: the static table associating each [`CommandKind`]
//! with its user-facing name, argument requirement, transport class, and
//! wire code.

/// Identity of a command recognized anywhere in the protocol.
///
/// `Data` is never typed by a user; it is the wire-level handshake the
/// dispatcher sends on the client's behalf before every data-bearing
/// command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandKind {
    /// Terminate the session.
    Exit,
    /// Change the client's own working directory.
    Cd,
    /// Change the daemon's working directory for this connection.
    Rcd,
    /// List the client's own working directory, paged locally.
    Ls,
    /// List the daemon's working directory, streamed and paged locally.
    Rls,
    /// Fetch a remote file into a local file of the same basename.
    Get,
    /// Fetch a remote file and page it to the terminal instead of saving it.
    Show,
    /// Upload a local file to the daemon's working directory.
    Put,
    /// Establish the ephemeral data connection for the next data-bearing command.
    Data,
}

/// Where a command executes and whether it needs a data connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportClass {
    /// Handled entirely on the client; no bytes cross the control socket.
    Local,
    /// Sent to the daemon; a single control-line round trip, no data socket.
    RemoteNoData,
    /// Sent to the daemon; requires a `D` handshake and a data socket.
    RemoteWithData,
    /// The `D` handshake itself.
    Handshake,
}

/// One row of the command catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// The command kind this row describes.
    pub kind: CommandKind,
    /// The name a user types at the client prompt, if any.
    pub name: Option<&'static str>,
    /// Whether the command requires a trailing argument.
    pub arg_required: bool,
    /// The transport class, selecting the dispatcher's control-flow template.
    pub class: TransportClass,
    /// The one-byte wire code sent on the control channel, if any.
    ///
    /// `Show` shares `Get`'s wire code (`G`): the daemon performs the
    /// identical action (stream a named file to the data socket) for both;
    /// only the client's disposition of the received bytes differs.
    pub code: Option<u8>,
}

use CommandKind::{Cd, Data, Exit, Get, Ls, Put, Rcd, Rls, Show};
use TransportClass::{Handshake, Local, RemoteNoData, RemoteWithData};

/// The full command catalog, indexed in [`CommandKind`] declaration order.
pub const CATALOG: [CatalogEntry; 9] = [
    CatalogEntry { kind: Exit, name: Some("exit"), arg_required: false, class: RemoteNoData, code: Some(b'Q') },
    CatalogEntry { kind: Cd, name: Some("cd"), arg_required: true, class: Local, code: None },
    CatalogEntry { kind: Rcd, name: Some("rcd"), arg_required: true, class: RemoteNoData, code: Some(b'C') },
    CatalogEntry { kind: Ls, name: Some("ls"), arg_required: false, class: Local, code: None },
    CatalogEntry { kind: Rls, name: Some("rls"), arg_required: false, class: RemoteWithData, code: Some(b'L') },
    CatalogEntry { kind: Get, name: Some("get"), arg_required: true, class: RemoteWithData, code: Some(b'G') },
    CatalogEntry { kind: Show, name: Some("show"), arg_required: true, class: RemoteWithData, code: Some(b'G') },
    CatalogEntry { kind: Put, name: Some("put"), arg_required: true, class: RemoteWithData, code: Some(b'P') },
    CatalogEntry { kind: Data, name: None, arg_required: false, class: Handshake, code: Some(b'D') },
];

/// Looks up the catalog row for a given kind.
#[must_use]
pub fn entry(kind: CommandKind) -> &'static CatalogEntry {
    CATALOG
        .iter()
        .find(|row| row.kind == kind)
        .expect("CATALOG covers every CommandKind variant")
}

/// Returns the wire code for a command kind, or `None` for purely local kinds.
#[must_use]
pub fn code_for_kind(kind: CommandKind) -> Option<u8> {
    entry(kind).code
}

/// Reverse lookup from a wire code to a command kind.
///
/// `b'G'` resolves to [`CommandKind::Get`] since the daemon never needs to
/// distinguish `get` from `show` — both execute the identical "stream a
/// named file" action; the client alone decides the disposition of the
/// bytes it reads back.
#[must_use]
pub fn kind_for_code(code: u8) -> Option<CommandKind> {
    CATALOG.iter().find(|row| row.code == Some(code)).map(|row| row.kind)
}

/// Looks up a command kind by the name a user types at the prompt.
///
/// Returns `None` for names with no catalog entry, and for [`CommandKind::Data`],
/// which has no user-facing name.
#[must_use]
pub fn kind_for_name(name: &str) -> Option<CommandKind> {
    CATALOG.iter().find(|row| row.name == Some(name)).map(|row| row.kind)
}
