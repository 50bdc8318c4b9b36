use clap::ValueEnum;
use hyper::header::{HOST, HeaderName};
use hyper::{Method, Request};
use percent_encoding::percent_decode_str;
use std::borrow::Cow;
use std::time::Duration;

#[allow(clippy::declare_interior_mutable_const)]
const X_FORWARDED_PROTO: HeaderName = HeaderName::from_static("x-forwarded-proto");

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum KeyMode {
    /// Look up `host` + `path`, e.g. `example.org/tool/cmd`
    HostPath,
    /// Look up the path alone, without its leading slash, e.g. `tool/cmd`
    Path,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    fn parse(s: &str) -> Option<Self> {
        if s.eq_ignore_ascii_case("http") {
            Some(Scheme::Http)
        } else if s.eq_ignore_ascii_case("https") {
            Some(Scheme::Https)
        } else {
            None
        }
    }
}

#[derive(Clone, Debug)]
pub struct Settings {
    pub key_mode: KeyMode,
    /// Scheme assumed when neither the request line nor a trusted proxy says otherwise.
    pub default_scheme: Scheme,
    pub trust_forwarded_proto: bool,
    pub doc_url: String,
    pub max_age: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            key_mode: KeyMode::HostPath,
            default_scheme: Scheme::Https,
            trust_forwarded_proto: false,
            doc_url: "https://pkg.go.dev".to_string(),
            max_age: Duration::from_secs(300),
        }
    }
}

/// The parts of a request that routing looks at.
#[derive(Debug)]
pub struct Inbound<'a> {
    pub scheme: Scheme,
    pub method: &'a Method,
    pub host: &'a str,
    /// Percent-decoded.
    pub path: Cow<'a, str>,
    /// As sent, still percent-encoded.
    pub raw_path: &'a str,
    pub path_and_query: &'a str,
    pub go_get: bool,
}

impl<'a> Inbound<'a> {
    pub fn from_request<B>(req: &'a Request<B>, settings: &Settings) -> Self {
        let uri = req.uri();

        let forwarded = settings
            .trust_forwarded_proto
            .then(|| req.headers().get(X_FORWARDED_PROTO))
            .flatten()
            .and_then(|h| h.to_str().ok())
            .and_then(|h| h.split(',').next())
            .and_then(|h| Scheme::parse(h.trim()));

        // a trusted proxy knows the client's transport better than our request line does
        let scheme = match (forwarded, uri.scheme_str()) {
            (Some(scheme), _) => scheme,
            // absolute-form request line; only an explicit "http" is plain
            (None, Some(s)) => match Scheme::parse(s) {
                Some(Scheme::Http) => Scheme::Http,
                _ => Scheme::Https,
            },
            (None, None) => settings.default_scheme,
        };

        let host = req
            .headers()
            .get(HOST)
            .and_then(|h| h.to_str().ok())
            .or_else(|| uri.authority().map(|a| a.as_str()))
            .unwrap_or("");

        let go_get = uri
            .query()
            .and_then(|q| url::form_urlencoded::parse(q.as_bytes()).find(|(k, _)| k == "go-get"))
            .is_some_and(|(_, v)| v == "1");

        Self {
            scheme,
            method: req.method(),
            host,
            path: percent_decode_str(uri.path()).decode_utf8_lossy(),
            raw_path: uri.path(),
            path_and_query: uri.path_and_query().map_or(uri.path(), |pq| pq.as_str()),
            go_get,
        }
    }

    pub fn host_path(&self) -> String {
        format!("{}{}", self.host, self.path)
    }

    /// The string looked up in the route table.
    pub fn key(&self, mode: KeyMode) -> Cow<'_, str> {
        match mode {
            KeyMode::HostPath => Cow::Owned(self.host_path()),
            KeyMode::Path => Cow::Borrowed(self.path.strip_prefix('/').unwrap_or(&self.path)),
        }
    }
}
