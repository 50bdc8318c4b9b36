use crate::vanity::err::RenderError;
use crate::vanity::record::PackageRecord;

/// Render the document the go tool reads to find `record`'s repository.
pub fn go_import(record: &PackageRecord) -> Result<String, RenderError> {
    // The meta content is a space-separated triple, so no field may contain whitespace.
    for (field, value) in [
        ("import path", &record.import_path),
        ("vcs", &record.vcs),
        ("repo root", &record.repo_root),
    ] {
        if value.is_empty() || value.chars().any(|c| c.is_whitespace() || c.is_control()) {
            return Err(RenderError::InvalidField {
                import_path: record.import_path.clone(),
                field,
                value: value.clone(),
            });
        }
    }

    Ok(format!(
        concat!(
            "<!DOCTYPE html>\n",
            "<html>\n",
            "<head>\n",
            "<meta http-equiv=\"Content-Type\" content=\"text/html; charset=utf-8\"/>\n",
            "<meta name=\"go-import\" content=\"{import_path} {vcs} {repo_root}\">\n",
            "</head>\n",
            "</html>\n",
        ),
        import_path = escape(&record.import_path),
        vcs = escape(&record.vcs),
        repo_root = escape(&record.repo_root),
    ))
}

pub(crate) fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&#34;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(import_path: &str, vcs: &str, repo_root: &str) -> PackageRecord {
        PackageRecord {
            import_path: import_path.to_string(),
            vcs: vcs.to_string(),
            repo_root: repo_root.to_string(),
        }
    }

    #[test]
    fn meta_tag() {
        let html = go_import(&record("host/pkg", "git", "example.com/org/pkg")).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains(r#"<meta name="go-import" content="host/pkg git example.com/org/pkg">"#));
    }

    #[test]
    fn escapes_markup() {
        let html = go_import(&record("host/pkg", "git", "https://x.test/?a=1&b=\"2\"")).unwrap();
        assert!(html.contains("https://x.test/?a=1&amp;b=&#34;2&#34;"), "{}", html);
    }

    #[test]
    fn whitespace_is_unrenderable() {
        let err = go_import(&record("host/pkg", "git", "https://x.test/a b")).unwrap_err();
        let RenderError::InvalidField { field, .. } = err;
        assert_eq!(field, "repo root");
        assert!(go_import(&record("host/pkg", "", "https://x.test/a")).is_err());
    }
}
