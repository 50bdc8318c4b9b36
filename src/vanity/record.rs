use crate::vanity::err::ConfigError;

/// One line of the import list: a vanity import path and where its code really lives.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackageRecord {
    pub import_path: String,
    pub vcs: String,
    pub repo_root: String,
}

/// Decode the import list. Each record is `import path, vcs, repo root`; extra fields are ignored.
///
/// Any bad record rejects the whole list.
pub fn decode(bytes: &[u8]) -> Result<Vec<PackageRecord>, ConfigError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(bytes);

    let mut records = Vec::new();
    for rec in reader.records() {
        let rec = rec?;
        let line = rec.position().map_or(0, |p| p.line());
        let (import_path, vcs, repo_root) = match (rec.get(0), rec.get(1), rec.get(2)) {
            (Some(import_path), Some(vcs), Some(repo_root)) => (import_path, vcs, repo_root),
            _ => {
                return Err(ConfigError::Malformed {
                    line,
                    reason: format!("need at least three fields, got {}", rec.len()),
                });
            }
        };
        if import_path.is_empty() {
            return Err(ConfigError::Malformed {
                line,
                reason: "empty import path".to_string(),
            });
        }
        if import_path.ends_with('/') {
            return Err(ConfigError::Malformed {
                line,
                reason: format!("import path {:?} has a trailing slash", import_path),
            });
        }
        // go-import content is "import vcs root" split on spaces
        for (field, value) in [("import path", import_path), ("vcs", vcs), ("repo root", repo_root)] {
            if value.is_empty() {
                return Err(ConfigError::Malformed {
                    line,
                    reason: format!("empty {} for {:?}", field, import_path),
                });
            }
            if value.chars().any(|c| c.is_whitespace() || c.is_control()) {
                return Err(ConfigError::Malformed {
                    line,
                    reason: format!("{} {:?} contains whitespace", field, value),
                });
            }
        }
        records.push(PackageRecord {
            import_path: import_path.to_string(),
            vcs: vcs.to_string(),
            repo_root: repo_root.to_string(),
        });
    }

    Ok(records)
}
