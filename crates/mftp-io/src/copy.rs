//! Streaming copy used for every bulk data transfer (`get`, `put`, `rls`).

use crate::write::write_all_counted;
use std::io::{self, Read, Write};

/// One byte less than glibc's `BUFSIZ` chunk size.
const CHUNK: usize = 8191;

/// Copies `src` into `dst` until EOF, `CHUNK`-byte read at a time, looping
/// each chunk through [`write_all_counted`] so a short write never drops
/// bytes silently.
///
/// Returns the total number of bytes copied on success.
pub fn copy_stream(src: &mut impl Read, dst: &mut impl Write) -> io::Result<u64> {
    let mut buf = [0u8; CHUNK];
    let mut total = 0u64;
    loop {
        let n = match src.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };

        let written = write_all_counted(dst, &buf[..n])?;
        if written != n {
            return Err(io::Error::new(
                io::ErrorKind::WriteZero,
                "peer stopped accepting data mid-transfer",
            ));
        }
        total += n as u64;
    }
    Ok(total)
}
