//! The client's command-line surface: `mftp [-d] [-h] HOSTNAME`.

use clap::Parser;

/// Arguments accepted by the `mftp` binary.
#[derive(Parser, Debug)]
#[command(
    name = "mftp",
    about = "Minimal line-oriented file transfer client",
    disable_version_flag = true
)]
pub struct Cli {
    /// Enable diagnostic logging.
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Host running `mftpd`.
    pub hostname: String,
}
