#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `mftp-io` is the set of byte-level I/O primitives the mftp protocol is
//! built on: a byte-at-a-time line reader ([`line::read_line`]), a
//! full-buffer writer that loops over short writes
//! ([`write::write_all_counted`]), a chunked streaming copy
//! ([`copy::copy_stream`]), and the two subprocess helpers the client and
//! daemon use to run `ls -l` and page output through `more -20`
//! ([`exec::exec_to_handle`], [`page::page_command`], [`page::page_stream`]),
//! and the exclusive-create helper `get`/`put` both rely on
//! ([`fs::create_exclusive`]).
//!
//! # Design
//!
//! None of these helpers know anything about the mftp wire format — they
//! operate on any [`std::io::Read`]/[`std::io::Write`], which is what lets
//! the control-line codec in `mftp-proto` stay byte-oriented rather than
//! socket-oriented (see that crate's docs) and still share this crate's
//! reader underneath.
//!
//! # Invariants
//!
//! - [`line::read_line`] never writes past the end of the caller's buffer.
//! - [`write::write_all_counted`] either writes every byte of its input
//!   exactly once or reports a short write; it never silently drops bytes.
//! - [`copy::copy_stream`] is byte-identical between source and
//!   destination for any source that terminates with EOF.
//!
//! # Errors
//!
//! Every function here returns [`std::io::Result`]; none of them panic on
//! I/O failure.

pub mod copy;
pub mod exec;
pub mod fs;
pub mod line;
pub mod page;
pub mod write;

pub use copy::copy_stream;
pub use exec::exec_to_handle;
pub use fs::create_exclusive;
pub use line::{read_line, read_line_str};
pub use page::{page_command, page_stream};
pub use write::write_all_counted;
