//! The control listener: binds the fixed control port and spawns one
//! thread per accepted connection.

use std::io::Write;
use std::net::TcpListener;
use std::process::ExitCode;

use crate::cli::Cli;
use crate::connection::Connection;
use clap::Parser;
use mftp_proto::config::{BACKLOG, CONTROL_PORT};
use socket2::{Domain, Protocol, Socket, Type};

/// Binds the control listener on [`CONTROL_PORT`], with `SO_REUSEADDR` set
/// so a restarted daemon does not have to wait out `TIME_WAIT`.
pub fn bind_control_listener() -> std::io::Result<TcpListener> {
    let socket = Socket::new(Domain::IPV4, Type::STREAM, Some(Protocol::TCP))?;
    socket.set_reuse_address(true)?;
    let addr: std::net::SocketAddr = (std::net::Ipv4Addr::UNSPECIFIED, CONTROL_PORT).into();
    socket.bind(&addr.into())?;
    socket.listen(BACKLOG)?;
    Ok(socket.into())
}

/// Accepts connections forever, handing each one to its own thread.
///
/// A transient per-connection accept error is logged and does not bring
/// down the listener: a fork-per-connection server might give up after a
/// resource-exhaustion failure, but a thread-per-connection one has no
/// equivalent mode worth terminating over.
pub fn serve_forever(listener: TcpListener) -> ! {
    let cwd = std::env::current_dir().unwrap_or_else(|_| std::path::PathBuf::from("/"));
    loop {
        match listener.accept() {
            Ok((stream, peer)) => {
                let cwd = cwd.clone();
                tracing::debug!(%peer, "accepted connection");
                std::thread::spawn(move || {
                    Connection::new(stream, cwd).serve();
                });
            }
            Err(e) => {
                tracing::debug!(error = %e, "failed to accept a connection");
            }
        }
    }
}

/// Parses arguments, initializes logging, binds the control listener, and
/// serves forever. Returns only on a startup failure.
pub fn run<I, Out, Err>(args: I, stdout: &mut Out, stderr: &mut Err) -> ExitCode
where
    I: IntoIterator,
    I::Item: Into<std::ffi::OsString> + Clone,
    Out: Write,
    Err: Write,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(e) => return report_clap_error(&e, stdout, stderr),
    };

    mftp_logging::init(cli.debug);

    let listener = match bind_control_listener() {
        Ok(listener) => listener,
        Err(e) => {
            let _ = writeln!(stderr, "mftpd: could not bind port {CONTROL_PORT}: {e}");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(port = CONTROL_PORT, "mftpd listening");
    serve_forever(listener);
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
