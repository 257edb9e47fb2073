//! The exclusive-create helper shared by `get` (client) and `put` (daemon):
//! both write into a freshly named file and must fail rather than overwrite
//! an existing one.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;

/// Default permission bits for files created by `get`/`put`, matching the
/// an exclusive, not-truncating file creation call.
const CREATE_MODE: u32 = 0o666;

/// Opens `path` for writing, failing if it already exists.
///
/// On Unix the file is created with mode `0666` (subject to the process
/// umask), matching the original's exclusive-create call; on other
/// platforms the mode has no equivalent and is not applied.
pub fn create_exclusive(path: &Path) -> io::Result<File> {
    let mut opts = OpenOptions::new();
    opts.write(true).create_new(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(CREATE_MODE);
    }
    opts.open(path)
}
