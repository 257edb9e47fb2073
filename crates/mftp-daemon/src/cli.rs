//! The daemon's command-line surface: `mftpd [-d] [-h]`.

use clap::Parser;

/// Arguments accepted by the `mftpd` binary.
#[derive(Parser, Debug)]
#[command(
    name = "mftpd",
    about = "Minimal line-oriented file transfer daemon",
    disable_version_flag = true
)]
pub struct Cli {
    /// Enable diagnostic logging.
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_debug_flag() {
        let cli = Cli::try_parse_from(["mftpd", "-d"]).unwrap();
        assert!(cli.debug);
    }

    #[test]
    fn takes_no_positional_arguments() {
        assert!(Cli::try_parse_from(["mftpd", "extra"]).is_err());
    }

    #[test]
    fn rejects_unknown_flags() {
        assert!(Cli::try_parse_from(["mftpd", "--bogus"]).is_err());
    }
}
