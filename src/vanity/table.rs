use crate::vanity::err::ConfigError;
use crate::vanity::record::PackageRecord;
use std::collections::HashMap;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Duplicates {
    /// A repeated import path replaces the earlier record.
    #[default]
    LastWins,
    Reject,
}

/// Immutable map from import path to its record. Rebuilt, never mutated, on reload.
#[derive(Debug, Default)]
pub struct RouteTable {
    imports: HashMap<String, PackageRecord>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct Resolved<'a> {
    pub record: &'a PackageRecord,
    /// Number of trailing segments stripped from the request key before the match.
    pub peeled: usize,
}

impl RouteTable {
    pub fn build(
        records: impl IntoIterator<Item = PackageRecord>,
        duplicates: Duplicates,
    ) -> Result<Self, ConfigError> {
        let mut imports = HashMap::new();
        for record in records {
            if duplicates == Duplicates::Reject && imports.contains_key(&record.import_path) {
                return Err(ConfigError::DuplicateImportPath(record.import_path));
            }
            imports.insert(record.import_path.clone(), record);
        }
        Ok(Self { imports })
    }

    pub fn len(&self) -> usize {
        self.imports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.imports.is_empty()
    }

    #[cfg(test)]
    pub fn get(&self, import_path: &str) -> Option<&PackageRecord> {
        self.imports.get(import_path)
    }

    /// Find the longest configured import path that is a segment-prefix of `key`.
    ///
    /// Candidates are `key` itself, then `key` cut at each `/` from the right, so the walk
    /// runs at most once per segment.
    pub fn resolve(&self, key: &str) -> Option<Resolved<'_>> {
        let cuts = key.rmatch_indices('/').map(|(i, _)| i);
        std::iter::once(key.len())
            .chain(cuts)
            .map(|end| &key[..end])
            .filter(|candidate| !candidate.is_empty())
            .enumerate()
            .find_map(|(peeled, candidate)| {
                self.imports
                    .get(candidate)
                    .map(|record| Resolved { record, peeled })
            })
    }
}
