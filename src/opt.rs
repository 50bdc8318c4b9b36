use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[clap(version, about)]
pub struct Options {
    /// Logging verbosity (-v debug, -vv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(flatten)]
    pub serve: crate::vanity::opt::Options,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Options::command().debug_assert();
    }

    #[test]
    fn positional_args_and_defaults() {
        use crate::vanity::request::{KeyMode, Scheme};

        let options = Options::try_parse_from(["vanityd", "imports.csv", "127.0.0.1:8080"]).unwrap();
        assert_eq!(options.verbose, 0);
        assert_eq!(options.serve.config.to_str(), Some("imports.csv"));
        assert_eq!(options.serve.listen.port(), 8080);
        assert_eq!(options.serve.key_mode, KeyMode::HostPath);
        assert_eq!(options.serve.scheme, Scheme::Https);
        assert_eq!(options.serve.max_age, 300);
        assert!(!options.serve.reject_duplicates);

        let options = Options::try_parse_from([
            "vanityd",
            "-vv",
            "--key-mode",
            "path",
            "--scheme",
            "http",
            "--reject-duplicates",
            "imports.csv",
            "[::1]:80",
        ])
        .unwrap();
        assert_eq!(options.verbose, 2);
        assert_eq!(options.serve.key_mode, KeyMode::Path);
        assert_eq!(options.serve.scheme, Scheme::Http);
        assert!(options.serve.reject_duplicates);
    }

    #[test]
    fn missing_listen_address_is_an_error() {
        assert!(Options::try_parse_from(["vanityd", "imports.csv"]).is_err());
    }
}
