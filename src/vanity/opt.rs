use crate::vanity::request::{KeyMode, Scheme};
use clap::Args;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Serve go-import metadata for vanity import paths
#[derive(Args, Debug)]
#[group(id = "serve")]
pub struct Options {
    #[arg(
        help = "Import list to serve (--help for more)",
        long_help = r"Import list to serve:
    - one `import path,vcs,repo root` record per line, comma separated
    - re-read whenever its modification time changes
Examples:
    - example.org/tool,git,https://github.com/example/tool
    - example.org/lib,hg,https://hg.example.org/lib"
    )]
    pub config: PathBuf,

    #[arg(
        help = "Socket address to listen on (--help for more)",
        long_help = r"Socket address to listen on:
    - incoming http connections are received on this socket
Examples:
    - 127.0.0.1:3000
    - 0.0.0.0:80
    - [2001:db8::1]:8080"
    )]
    pub listen: SocketAddr,

    /// What part of the request is matched against import paths
    #[arg(long, value_enum, default_value_t = KeyMode::HostPath)]
    pub key_mode: KeyMode,

    /// Scheme assumed for requests that don't carry one
    #[arg(long, value_enum, default_value_t = Scheme::Https)]
    pub scheme: Scheme,

    /// Take the request scheme from X-Forwarded-Proto, when a TLS proxy sits in front
    #[arg(long)]
    pub trust_forwarded_proto: bool,

    /// Documentation site that browsers are redirected to
    #[arg(long, default_value = "https://pkg.go.dev")]
    pub doc_url: String,

    /// Cache-Control max-age for go-import responses, in seconds
    #[arg(long, default_value_t = 300)]
    pub max_age: u64,

    /// Fail to load an import list that names the same import path twice
    #[arg(long)]
    pub reject_duplicates: bool,
}
