//! Byte-at-a-time line reading.
//!
//! Reading one byte per syscall looks wasteful, but it buys something the
//! protocol actually needs: the reader never holds back bytes the caller
//! hasn't asked for, so the same file handle can be handed to a streaming
//! copy immediately afterward without losing or duplicating data. The
//! control socket never needs that in practice, but the data socket's
//! binary payload does share this code path conceptually, and the
//! symmetry is worth keeping.

use std::io::{self, Read};

/// Reads a line from `reader` into `buf`, stopping at the first of:
///
/// - EOF — returns the number of bytes read so far (possibly zero);
/// - a `\n` byte — it is overwritten with `0` and the count returned
///   *includes* that position;
/// - `buf.len() - 1` bytes read without a terminator — `buf[buf.len() - 1]`
///   is set to `0` and `buf.len() - 1` is returned;
/// - an I/O error — propagated to the caller.
///
/// `buf` must have a length of at least 1. Bytes beyond the returned count
/// are left untouched and must not be read by the caller.
pub fn read_line(reader: &mut impl Read, buf: &mut [u8]) -> io::Result<usize> {
    let cap = buf.len();
    if cap == 0 {
        return Ok(0);
    }

    let mut filled = 0usize;
    let mut byte = [0u8; 1];
    while filled < cap - 1 {
        match reader.read(&mut byte) {
            Ok(0) => return Ok(filled),
            Ok(_) => {
                if byte[0] == b'\n' {
                    buf[filled] = 0;
                    return Ok(filled + 1);
                }
                buf[filled] = byte[0];
                filled += 1;
            }
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    buf[cap - 1] = 0;
    Ok(cap - 1)
}

/// Convenience wrapper around [`read_line`] that returns the line as a
/// `&str` (without the terminator), or `None` at EOF.
pub fn read_line_str<'b>(reader: &mut impl Read, buf: &'b mut [u8]) -> io::Result<Option<&'b str>> {
    let n = read_line(reader, buf)?;
    if n == 0 {
        return Ok(None);
    }
    let end = if buf[n - 1] == 0 { n - 1 } else { n };
    std::str::from_utf8(&buf[..end])
        .map(Some)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn stops_at_newline_and_nul_terminates() {
        let mut src = Cursor::new(b"hello\nworld".to_vec());
        let mut buf = [0xFFu8; 16];
        let n = read_line(&mut src, &mut buf).unwrap();
        assert_eq!(n, 6); // "hello" + terminator position
        assert_eq!(&buf[..5], b"hello");
        assert_eq!(buf[5], 0);
    }

    #[test]
    fn stops_at_eof_with_no_newline() {
        let mut src = Cursor::new(b"partial".to_vec());
        let mut buf = [0u8; 16];
        let n = read_line(&mut src, &mut buf).unwrap();
        assert_eq!(n, 7);
        assert_eq!(&buf[..7], b"partial");
    }

    #[test]
    fn returns_zero_on_immediate_eof() {
        let mut src = Cursor::new(Vec::new());
        let mut buf = [0u8; 16];
        assert_eq!(read_line(&mut src, &mut buf).unwrap(), 0);
    }

    #[test]
    fn truncates_at_capacity_and_terminates_at_n_minus_one() {
        let mut src = Cursor::new(b"abcdefgh".to_vec());
        let mut buf = [0xAAu8; 4];
        let n = read_line(&mut src, &mut buf).unwrap();
        assert_eq!(n, 3);
        assert_eq!(&buf[..3], b"abc");
        assert_eq!(buf[3], 0);
    }

    #[test]
    fn never_writes_past_the_buffer() {
        let mut src = Cursor::new(vec![b'x'; 1000]);
        let mut buf = [0u8; 8];
        let n = read_line(&mut src, &mut buf).unwrap();
        assert!(n <= buf.len());
    }

    #[test]
    fn read_line_str_strips_terminator() {
        let mut src = Cursor::new(b"Ghello.txt\n".to_vec());
        let mut buf = [0u8; 64];
        let line = read_line_str(&mut src, &mut buf).unwrap().unwrap();
        assert_eq!(line, "Ghello.txt");
    }
}
