use std::{fs, io, path::PathBuf};

use log::debug;

use crate::{
    error::{RateError, Result},
    year_table::YearTable,
};

/// Per-year cache of the bank's archive tables, one `<year>.csv` per year.
#[derive(Debug, Clone)]
pub struct FileTableStore {
    dir: PathBuf,
}

impl FileTableStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn path_for(&self, year: i32) -> PathBuf {
        self.dir.join(format!("{year}.csv"))
    }

    /// Loads the cached table. Only a missing file is reported as
    /// [`RateError::NotFound`]; a file that exists but does not parse is
    /// [`RateError::CorruptCache`].
    pub fn load(&self, year: i32) -> Result<YearTable> {
        let path = self.path_for(year);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No cached table at {}", path.display());
                return Err(RateError::NotFound { year });
            }
            Err(e) => return Err(e.into()),
        };

        YearTable::parse(year, &bytes).map_err(|e| RateError::CorruptCache {
            path: path.clone(),
            reason: e.to_string(),
        })
    }

    /// Replaces the whole cached table for `year`. The bytes land in a
    /// temporary file first so an interrupted write never looks like a hit.
    pub fn save(&self, year: i32, bytes: &[u8]) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(year);
        let tmp = self.dir.join(format!("{year}.csv.tmp"));

        fs::write(&tmp, bytes)?;
        fs::rename(&tmp, &path)?;
        debug!("Saved {} bytes to {}", bytes.len(), path.display());

        Ok(())
    }
}
