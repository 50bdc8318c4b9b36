use crate::vanity::err::ConfigError;
use crate::vanity::record;
use crate::vanity::table::{Duplicates, RouteTable};
use arc_swap::ArcSwapOption;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

/// A route table together with the modification time of the file it was built from.
#[derive(Debug)]
pub struct Snapshot {
    pub table: RouteTable,
    pub modified: SystemTime,
}

/// Serves the current route table, rebuilding it first if the config file has changed.
///
/// Snapshots are swapped whole and never mutated, so a request keeps a consistent table
/// for as long as it holds the `Arc`, whatever other requests load in the meantime.
/// Concurrent requests may both decide to reload; that only costs duplicate I/O.
pub struct ReloadGate {
    path: PathBuf,
    duplicates: Duplicates,
    current: ArcSwapOption<Snapshot>,
    /// Modification time of the last version of the file that failed to load.
    rejected: ArcSwapOption<SystemTime>,
}

impl ReloadGate {
    pub fn new(path: impl Into<PathBuf>, duplicates: Duplicates) -> Self {
        Self {
            path: path.into(),
            duplicates,
            current: ArcSwapOption::empty(),
            rejected: ArcSwapOption::empty(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn current(&self) -> Result<Arc<Snapshot>, ConfigError> {
        let modified = tokio::fs::metadata(&self.path)
            .await
            .and_then(|m| m.modified())
            .map_err(|e| ConfigError::io(&self.path, e))?;

        let cached = self.current.load_full();
        if let Some(snapshot) = &cached {
            if modified <= snapshot.modified {
                log::trace!("{} unchanged", self.path.display());
                return Ok(Arc::clone(snapshot));
            }
            if self.rejected.load().as_deref() == Some(&modified) {
                log::trace!("{} still invalid, keeping last good table", self.path.display());
                return Ok(Arc::clone(snapshot));
            }
        }

        match self.load(modified).await {
            Ok(loaded) => {
                let loaded = Arc::new(loaded);
                let previous = self.current.rcu(|current| match current {
                    // a racing reload already installed something at least as new
                    Some(current) if current.modified >= loaded.modified => Some(Arc::clone(current)),
                    _ => Some(Arc::clone(&loaded)),
                });
                self.rejected.store(None);
                match previous {
                    Some(previous) if previous.modified >= loaded.modified => Ok(previous),
                    _ => {
                        log::info!(
                            "Loaded {} imports from {}",
                            loaded.table.len(),
                            self.path.display()
                        );
                        Ok(loaded)
                    }
                }
            }
            Err(e) => {
                log::warn!("Failed to load {}: {}", self.path.display(), e);
                self.rejected.store(Some(Arc::new(modified)));
                Err(e)
            }
        }
    }

    async fn load(&self, modified: SystemTime) -> Result<Snapshot, ConfigError> {
        let bytes = tokio::fs::read(&self.path)
            .await
            .map_err(|e| ConfigError::io(&self.path, e))?;
        let records = record::decode(&bytes)?;
        let table = RouteTable::build(records, self.duplicates)?;
        Ok(Snapshot { table, modified })
    }
}
