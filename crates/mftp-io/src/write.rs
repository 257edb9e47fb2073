//! The full-buffer writer: loop over short writes until the buffer is
//! exhausted, a zero-length write is observed, or an error occurs.

use std::io::{self, Write};

/// Writes all of `buf` to `writer`, looping over short writes.
///
/// Returns the total number of bytes written. Callers must compare the
/// result against `buf.len()`: a return value that is too small signals a
/// peer that stopped accepting data (a zero-length write), not an error.
pub fn write_all_counted(writer: &mut impl Write, mut buf: &[u8]) -> io::Result<usize> {
    let mut total = 0usize;
    while !buf.is_empty() {
        match writer.write(buf) {
            Ok(0) => return Ok(total),
            Ok(n) => {
                total += n;
                buf = &buf[n..];
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(total)
}
