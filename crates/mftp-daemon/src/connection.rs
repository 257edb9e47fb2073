//! The per-connection state machine: one [`Connection`] per accepted
//! control socket, looping read → decode → execute → respond until `Q`,
//! EOF, or a read error.

use std::io::{self, Read, Write};
use std::net::{Shutdown, TcpListener, TcpStream};
use std::path::{Path, PathBuf};

use mftp_io::{copy_stream, create_exclusive, exec_to_handle, read_line, write_all_counted};
use mftp_proto::codec::{encode_ack, encode_err, parse_control_line, ProtoError};
use mftp_proto::config::{BACKLOG, LS_CMD, MAX_LINE};
use mftp_proto::CommandKind;
use socket2::{Domain, Protocol, Socket, Type};

/// Text sent back for a data-bearing command issued with no data handle
/// installed.
const NO_DATA_CONNECTION: &str = "Data connection not established.";

/// Text sent back for a control line whose first byte is not a wire code.
const UNRECOGNIZED_COMMAND: &str = "Unrecognized command";

/// One client's control connection and its in-memory session state.
///
/// Generic over the control channel so the dispatch logic can be driven in
/// tests against an in-memory mock; the data handle is always a real
/// [`TcpStream`], since accepting the ephemeral data connection is
/// inherently real network I/O (see [`Connection::handle_data_handshake`]).
///
/// `cwd` is tracked here rather than via `chdir(2)`: `chdir` is
/// process-global and one daemon process serves every connection on its own
/// thread (see `DESIGN.md`'s resolution of the `RCD` open question), so a
/// real `chdir` would let one client's `rcd` race another's relative paths.
pub struct Connection<C> {
    control: C,
    cwd: PathBuf,
    data: Option<TcpStream>,
}

impl<C: Read + Write> Connection<C> {
    /// Builds a connection starting in `cwd` (the daemon's own working
    /// directory at startup, inherited independently by every connection).
    pub fn new(control: C, cwd: PathBuf) -> Self {
        Self { control, cwd, data: None }
    }

    /// Returns the connection's current working directory.
    #[must_use]
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Returns whether a data handle is currently installed.
    #[must_use]
    pub fn has_data_handle(&self) -> bool {
        self.data.is_some()
    }

    /// Runs the control loop until `Q`, EOF, or an unrecoverable read error.
    pub fn serve(&mut self) {
        let mut buf = [0u8; MAX_LINE];
        loop {
            let line = match read_line(&mut self.control, &mut buf) {
                Ok(0) => return,
                Ok(n) => {
                    let end = if buf[n - 1] == 0 { n - 1 } else { n };
                    match std::str::from_utf8(&buf[..end]) {
                        Ok(s) => s,
                        Err(_) => {
                            self.send_err("control line was not valid UTF-8");
                            continue;
                        }
                    }
                }
                Err(e) => {
                    tracing::debug!(error = %e, "control read failed; closing connection");
                    return;
                }
            };

            match parse_control_line(line) {
                Ok(parsed) => {
                    if !self.dispatch(parsed.kind, parsed.arg) {
                        return;
                    }
                }
                Err(ProtoError::Empty | ProtoError::UnknownCode) => {
                    self.send_err(UNRECOGNIZED_COMMAND);
                }
                Err(e) => self.send_err(&e.to_string()),
            }
        }
    }

    /// Executes one already-decoded command. Returns `false` when the
    /// connection should close (`exit`).
    fn dispatch(&mut self, kind: CommandKind, arg: Option<&str>) -> bool {
        match kind {
            CommandKind::Exit => {
                self.send_ack(None);
                false
            }
            CommandKind::Rcd => {
                match self.change_directory(arg.unwrap_or("")) {
                    Ok(()) => self.send_ack(None),
                    Err(e) => self.send_err(&e.to_string()),
                }
                true
            }
            CommandKind::Data => {
                self.handle_data_handshake();
                true
            }
            CommandKind::Rls => {
                self.handle_rls();
                true
            }
            CommandKind::Get | CommandKind::Show => {
                self.handle_fetch(arg);
                true
            }
            CommandKind::Put => {
                self.handle_put(arg);
                true
            }
            CommandKind::Cd | CommandKind::Ls => {
                unreachable!("Cd/Ls have no wire code and never cross the control socket")
            }
        }
    }

    fn change_directory(&mut self, arg: &str) -> io::Result<()> {
        let candidate = self.resolve(arg);
        let meta = std::fs::metadata(&candidate)?;
        if !meta.is_dir() {
            return Err(io::Error::new(io::ErrorKind::NotADirectory, "not a directory"));
        }
        self.cwd = candidate.canonicalize()?;
        Ok(())
    }

    fn handle_data_handshake(&mut self) {
        match bind_ephemeral_listener() {
            Ok((listener, port)) => {
                self.send_ack(Some(&port.to_string()));
                match listener.accept() {
                    Ok((stream, _)) => self.data = Some(stream),
                    Err(e) => {
                        tracing::debug!(error = %e, "failed to accept the data connection");
                    }
                }
            }
            Err(e) => self.send_err(&e.to_string()),
        }
    }

    fn handle_rls(&mut self) {
        let Some(data) = self.data.take() else {
            self.send_err(NO_DATA_CONNECTION);
            return;
        };
        match exec_to_handle(&data, LS_CMD, &self.cwd) {
            Ok(status) if status.success() => self.send_ack(None),
            Ok(status) => self.send_err(&format!("ls exited with {status}")),
            Err(e) => self.send_err(&e.to_string()),
        }
        let _ = data.shutdown(Shutdown::Both);
    }

    fn handle_fetch(&mut self, arg: Option<&str>) {
        let Some(mut data) = self.data.take() else {
            self.send_err(NO_DATA_CONNECTION);
            return;
        };
        let outcome = (|| -> io::Result<()> {
            let arg = arg.ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "missing file name"))?;
            let mut file = std::fs::File::open(self.resolve(arg))?;
            copy_stream(&mut file, &mut data)?;
            Ok(())
        })();
        match outcome {
            Ok(()) => self.send_ack(None),
            Err(e) => self.send_err(&e.to_string()),
        }
        let _ = data.shutdown(Shutdown::Both);
    }

    fn handle_put(&mut self, arg: Option<&str>) {
        let Some(mut data) = self.data.take() else {
            self.send_err(NO_DATA_CONNECTION);
            return;
        };

        let destination = arg
            .and_then(|arg| Path::new(arg).file_name())
            .map(|name| self.cwd.join(name));

        let Some(destination) = destination else {
            self.send_err("missing file name");
            let _ = data.shutdown(Shutdown::Both);
            return;
        };

        match create_exclusive(&destination) {
            Ok(mut file) => {
                // The ack is sent *before* reading so the client knows it
                // may start writing.
                self.send_ack(None);
                if let Err(e) = copy_stream(&mut data, &mut file) {
                    tracing::debug!(error = %e, "put transfer failed after ack");
                }
            }
            Err(e) => self.send_err(&e.to_string()),
        }
        let _ = data.shutdown(Shutdown::Both);
    }

    fn resolve(&self, arg: &str) -> PathBuf {
        let candidate = Path::new(arg);
        if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.cwd.join(candidate)
        }
    }

    fn send_ack(&mut self, payload: Option<&str>) {
        let line = encode_ack(payload);
        let _ = write_all_counted(&mut self.control, line.as_bytes());
    }

    fn send_err(&mut self, message: &str) {
        let line = encode_err(message);
        let _ = write_all_counted(&mut self.control, line.as_bytes());
    }
}

/// Binds an ephemeral (`port 0`) listener for a `D` handshake, with
/// `SO_REUSEADDR` set like every other socket this daemon creates.
fn bind_ephemeral_listener() -> io::Result<(TcpListener, u16)> {
    let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    let addr: std::net::SocketAddr = "0.0.0.0:0".parse().expect("valid socket address");
    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;
    let listener: TcpListener = socket.into();
    let port = listener.local_addr()?.port();
    Ok((listener, port))
}
