//! End-to-end tests that drive a real [`mftp_daemon::Connection`] and a real
//! [`mftp_client::Dispatcher`] against each other over actual TCP sockets —
//! the control listener bound to an ephemeral port rather than the fixed
//! [`mftp_proto::config::CONTROL_PORT`], so these tests can run in parallel
//! with everything else in the workspace.
//!
//! Each scenario here mirrors one of the end-to-end walkthroughs: a `get`
//! round trip, a `put` round trip, a remote directory change, a server-side
//! error surfacing back to the client, and an orderly `exit`.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::path::PathBuf;
use std::thread;

use mftp_client::Dispatcher;
use mftp_daemon::Connection;
use serial_test::serial;

/// Binds an ephemeral control listener and spawns the daemon side of one
/// connection on its own thread, rooted at `cwd`.
fn spawn_daemon(cwd: PathBuf) -> (std::net::SocketAddr, thread::JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral control listener");
    let addr = listener.local_addr().expect("listener has a local address");
    let handle = thread::spawn(move || {
        let (stream, _peer) = listener.accept().expect("accept the test client");
        Connection::new(stream, cwd).serve();
    });
    (addr, handle)
}

fn connect_client(addr: std::net::SocketAddr) -> Dispatcher<'static, TcpStream> {
    let control = TcpStream::connect(addr).expect("connect control socket");
    Dispatcher::new(control, "127.0.0.1")
}

#[test]
#[serial]
fn get_round_trips_the_exact_bytes_into_a_local_file() {
    let server_dir = tempfile::tempdir().unwrap();
    std::fs::write(server_dir.path().join("hello.txt"), b"hello\n").unwrap();

    let (addr, daemon) = spawn_daemon(server_dir.path().to_path_buf());
    let mut dispatcher = connect_client(addr);

    let client_dir = tempfile::tempdir().unwrap();
    let prev = std::env::current_dir().unwrap();
    std::env::set_current_dir(client_dir.path()).unwrap();

    let mut out = Vec::new();
    dispatcher.run_line("get hello.txt", &mut out);
    dispatcher.run_line("exit", &mut out);

    std::env::set_current_dir(prev).unwrap();
    daemon.join().unwrap();

    let fetched = std::fs::read(client_dir.path().join("hello.txt")).unwrap();
    assert_eq!(fetched, b"hello\n");
    let rendered = String::from_utf8(out).unwrap();
    assert!(rendered.contains("successfully"), "{rendered}");
}

#[test]
fn put_round_trips_the_exact_bytes_into_the_remote_directory() {
    let server_dir = tempfile::tempdir().unwrap();
    let (addr, daemon) = spawn_daemon(server_dir.path().to_path_buf());
    let mut dispatcher = connect_client(addr);

    let client_dir = tempfile::tempdir().unwrap();
    let source = client_dir.path().join("upload.txt");
    std::fs::write(&source, b"payload\n").unwrap();

    let mut out = Vec::new();
    dispatcher.run_line(&format!("put {}", source.display()), &mut out);
    dispatcher.run_line("exit", &mut out);
    daemon.join().unwrap();

    let uploaded = std::fs::read(server_dir.path().join("upload.txt")).unwrap();
    assert_eq!(uploaded, b"payload\n");
}

#[test]
fn put_of_an_existing_remote_file_is_reported_as_a_server_error() {
    let server_dir = tempfile::tempdir().unwrap();
    std::fs::write(server_dir.path().join("upload.txt"), b"already here").unwrap();
    let (addr, daemon) = spawn_daemon(server_dir.path().to_path_buf());
    let mut dispatcher = connect_client(addr);

    let client_dir = tempfile::tempdir().unwrap();
    let source = client_dir.path().join("upload.txt");
    std::fs::write(&source, b"new payload").unwrap();

    let mut out = Vec::new();
    dispatcher.run_line(&format!("put {}", source.display()), &mut out);
    dispatcher.run_line("exit", &mut out);
    daemon.join().unwrap();

    assert_eq!(std::fs::read(server_dir.path().join("upload.txt")).unwrap(), b"already here");
    let rendered = String::from_utf8(out).unwrap();
    assert!(rendered.contains("Server error"), "{rendered}");
    assert!(rendered.contains("unsuccessfully"), "{rendered}");
}

#[test]
#[serial]
fn rcd_changes_the_remote_working_directory_for_subsequent_commands() {
    let server_dir = tempfile::tempdir().unwrap();
    let nested = server_dir.path().join("nested");
    std::fs::create_dir(&nested).unwrap();
    std::fs::write(nested.join("inside.txt"), b"nested bytes\n").unwrap();

    let (addr, daemon) = spawn_daemon(server_dir.path().to_path_buf());
    let mut dispatcher = connect_client(addr);

    let client_dir = tempfile::tempdir().unwrap();
    let prev = std::env::current_dir().unwrap();
    std::env::set_current_dir(client_dir.path()).unwrap();

    let mut out = Vec::new();
    dispatcher.run_line("rcd nested", &mut out);
    dispatcher.run_line("get inside.txt", &mut out);
    dispatcher.run_line("exit", &mut out);

    std::env::set_current_dir(prev).unwrap();
    daemon.join().unwrap();

    let fetched = std::fs::read(client_dir.path().join("inside.txt")).unwrap();
    assert_eq!(fetched, b"nested bytes\n");
}

#[test]
#[serial]
fn get_of_a_missing_remote_file_surfaces_the_servers_error_text() {
    let server_dir = tempfile::tempdir().unwrap();
    let (addr, daemon) = spawn_daemon(server_dir.path().to_path_buf());
    let mut dispatcher = connect_client(addr);

    let client_dir = tempfile::tempdir().unwrap();
    let prev = std::env::current_dir().unwrap();
    std::env::set_current_dir(client_dir.path()).unwrap();

    let mut out = Vec::new();
    dispatcher.run_line("get nope.txt", &mut out);
    dispatcher.run_line("exit", &mut out);

    std::env::set_current_dir(prev).unwrap();
    daemon.join().unwrap();

    assert!(!client_dir.path().join("nope.txt").exists());
    let rendered = String::from_utf8(out).unwrap();
    assert!(rendered.contains("Server error:"), "{rendered}");
    assert!(rendered.contains("unsuccessfully"), "{rendered}");
}

#[test]
fn unrecognized_command_never_touches_the_network() {
    let server_dir = tempfile::tempdir().unwrap();
    let (addr, daemon) = spawn_daemon(server_dir.path().to_path_buf());
    let mut dispatcher = connect_client(addr);

    let mut out = Vec::new();
    dispatcher.run_line("frobnicate everything", &mut out);
    dispatcher.run_line("exit", &mut out);
    daemon.join().unwrap();

    let rendered = String::from_utf8(out).unwrap();
    assert!(rendered.contains("Unrecognized command: \"frobnicate everything\""), "{rendered}");
}

#[test]
fn exit_terminates_the_client_loop_and_the_daemon_connection() {
    let server_dir = tempfile::tempdir().unwrap();
    let (addr, daemon) = spawn_daemon(server_dir.path().to_path_buf());
    let mut dispatcher = connect_client(addr);

    let mut out = Vec::new();
    let outcome = dispatcher.run_line("exit", &mut out);
    daemon.join().unwrap();

    assert_eq!(outcome, mftp_client::ExecOutcome::Exit);
    let rendered = String::from_utf8(out).unwrap();
    assert!(rendered.contains("Running \"exit\""), "{rendered}");
    assert!(rendered.contains("successfully"), "{rendered}");
}

#[test]
fn data_handle_survives_an_intervening_rcd_between_handshake_and_transfer() {
    // D installs the data handle; an intervening RCD must not clear it, so a
    // data-bearing command issued right after still finds it installed. This
    // drives it end to end instead of only through mftp-daemon's own mocked
    // unit test, confirming the client's handshake and the daemon's RCD
    // handling really do interleave the way the protocol requires.
    let server_dir = tempfile::tempdir().unwrap();
    std::fs::write(server_dir.path().join("hello.txt"), b"hi\n").unwrap();
    let (addr, daemon) = spawn_daemon(server_dir.path().to_path_buf());

    let mut control = TcpStream::connect(addr).unwrap();
    let mut buf = [0u8; 512];

    control.write_all(b"D\n").unwrap();
    let n = control.read(&mut buf).unwrap();
    assert_eq!(buf[0], b'A');
    let port = std::str::from_utf8(&buf[1..n - 1]).unwrap().parse::<u16>().unwrap();

    // Completing the handshake (the daemon's accept() is blocking) before
    // sending anything else, matching the protocol's required ordering.
    let mut data = TcpStream::connect(("127.0.0.1", port)).unwrap();

    // An RCD to the daemon's own starting directory (a no-op change) must
    // not clear the handle the handshake above just installed.
    let rcd_target = server_dir.path().display().to_string();
    control.write_all(format!("C{rcd_target}\n").as_bytes()).unwrap();
    let n = control.read(&mut buf).unwrap();
    assert_eq!(buf[0], b'A', "{:?}", &buf[..n]);

    control.write_all(b"Ghello.txt\n").unwrap();
    let mut received = Vec::new();
    data.read_to_end(&mut received).unwrap();
    assert_eq!(received, b"hi\n");

    let n = control.read(&mut buf).unwrap();
    assert_eq!(buf[0], b'A', "transfer should still ack despite the intervening rcd: {:?}", &buf[..n]);

    control.write_all(b"Q\n").unwrap();
    daemon.join().unwrap();
}
