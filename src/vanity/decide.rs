use crate::vanity::record::PackageRecord;
use crate::vanity::request::{Inbound, Scheme, Settings};
use hyper::Method;

/// What to answer for a request that resolved to `record`.
#[derive(Debug, PartialEq, Eq)]
pub enum Decision<'r> {
    /// 301 to the same URL over https.
    Upgrade { location: String },
    MethodNotAllowed,
    /// Resolved record doesn't actually contain the requested path.
    NotFound,
    /// 307 for browsers, to the documentation viewer.
    Documentation { location: String },
    /// 200 with the go-import document.
    Metadata(&'r PackageRecord),
}

/// Rules are checked in order and the first one that applies wins.
pub fn decide<'r>(record: &'r PackageRecord, req: &Inbound<'_>, settings: &Settings) -> Decision<'r> {
    if req.scheme == Scheme::Http {
        return Decision::Upgrade {
            location: format!("https://{}{}", req.host, req.path_and_query),
        };
    }

    if *req.method != Method::GET {
        return Decision::MethodNotAllowed;
    }

    let key = req.key(settings.key_mode);
    if !contains(&record.import_path, &key) {
        return Decision::NotFound;
    }

    if !req.go_get {
        return Decision::Documentation {
            location: format!(
                "{}/{}{}",
                settings.doc_url.trim_end_matches('/'),
                req.host,
                req.raw_path
            ),
        };
    }

    Decision::Metadata(record)
}

/// `key` is `import_path` itself or lies beneath it.
fn contains(import_path: &str, key: &str) -> bool {
    let key = key.strip_suffix('/').unwrap_or(key);
    match key.strip_prefix(import_path) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vanity::request::KeyMode;
    use hyper::Request;
    use hyper::header::HOST;

    fn record() -> PackageRecord {
        PackageRecord {
            import_path: "host/pkg".to_string(),
            vcs: "git".to_string(),
            repo_root: "example.com/org/pkg".to_string(),
        }
    }

    fn decide_for<'r>(
        method: Method,
        uri: &str,
        settings: &Settings,
        record: &'r PackageRecord,
    ) -> Decision<'r> {
        let req = Request::builder()
            .method(method)
            .uri(uri)
            .header(HOST, "host")
            .body(())
            .unwrap();
        decide(record, &Inbound::from_request(&req, settings), settings)
    }

    #[test]
    fn upgrade_precedes_everything() {
        let r = record();
        let d = decide_for(Method::GET, "http://host/pkg?go-get=1", &Settings::default(), &r);
        assert_eq!(
            d,
            Decision::Upgrade {
                location: "https://host/pkg?go-get=1".to_string()
            }
        );
        let d = decide_for(Method::POST, "http://host/elsewhere", &Settings::default(), &r);
        assert!(matches!(d, Decision::Upgrade { .. }));
    }

    #[test]
    fn only_get_allowed() {
        let r = record();
        for method in [
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::HEAD,
            Method::OPTIONS,
            Method::TRACE,
        ] {
            for uri in ["/pkg?go-get=1", "/pkg"] {
                let d = decide_for(method.clone(), uri, &Settings::default(), &r);
                assert_eq!(d, Decision::MethodNotAllowed, "{} {}", method, uri);
            }
        }
    }

    #[test]
    fn tool_gets_metadata() {
        let r = record();
        for uri in ["/pkg?go-get=1", "/pkg/?go-get=1", "/pkg/cmd/tool?go-get=1"] {
            let d = decide_for(Method::GET, uri, &Settings::default(), &r);
            assert_eq!(d, Decision::Metadata(&r), "{}", uri);
        }
    }

    #[test]
    fn browser_gets_documentation() {
        let r = record();
        let d = decide_for(Method::GET, "/pkg/sub", &Settings::default(), &r);
        assert_eq!(
            d,
            Decision::Documentation {
                location: "https://pkg.go.dev/host/pkg/sub".to_string()
            }
        );

        let settings = Settings {
            doc_url: "https://godoc.org/".to_string(),
            ..Settings::default()
        };
        let d = decide_for(Method::GET, "/pkg?go-get=0", &settings, &r);
        assert_eq!(
            d,
            Decision::Documentation {
                location: "https://godoc.org/host/pkg".to_string()
            }
        );
    }

    #[test]
    fn encoded_path_matches_and_stays_encoded_in_docs_link() {
        let r = record();
        assert_eq!(
            decide_for(Method::GET, "/pk%67/sub?go-get=1", &Settings::default(), &r),
            Decision::Metadata(&r)
        );
        assert_eq!(
            decide_for(Method::GET, "/pk%67/a%20b", &Settings::default(), &r),
            Decision::Documentation {
                location: "https://pkg.go.dev/host/pk%67/a%20b".to_string()
            }
        );
    }

    #[test]
    fn outside_namespace_is_not_found() {
        let r = record();
        for uri in ["/", "/pkgextra?go-get=1", "/other/pkg"] {
            let d = decide_for(Method::GET, uri, &Settings::default(), &r);
            assert_eq!(d, Decision::NotFound, "{}", uri);
        }
    }

    #[test]
    fn path_mode_checks_path_only() {
        let r = PackageRecord {
            import_path: "pkg".to_string(),
            ..record()
        };
        let settings = Settings {
            key_mode: KeyMode::Path,
            ..Settings::default()
        };
        assert_eq!(
            decide_for(Method::GET, "/pkg/cmd?go-get=1", &settings, &r),
            Decision::Metadata(&r)
        );
        assert_eq!(
            decide_for(Method::GET, "/pkgs?go-get=1", &settings, &r),
            Decision::NotFound
        );
    }

    #[test]
    fn containment() {
        assert!(contains("a/b", "a/b"));
        assert!(contains("a/b", "a/b/"));
        assert!(contains("a/b", "a/b/c"));
        assert!(!contains("a/b", "a/bc"));
        assert!(!contains("a/b", "a"));
        assert!(!contains("foo", "foobar"));
    }
}
