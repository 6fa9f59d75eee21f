use std::{
    ffi::OsString,
    fs::{self, File},
    io::{self, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::debug;
use thiserror::Error;

use crate::sensors::Reading;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("could not write {path}: {source}")]
    Write { path: PathBuf, source: io::Error },
    #[error("could not sync {path}: {source}")]
    Sync { path: PathBuf, source: io::Error },
    #[error("could not rename {from} to {to}: {source}")]
    Rename { from: PathBuf, to: PathBuf, source: io::Error },
    #[error("could not remove {path}: {source}")]
    Remove { path: PathBuf, source: io::Error },
}

/// Writes the latest reading to a single file, replacing its whole content every time
pub struct Publisher {
    path: PathBuf,
    atomic: bool,
}

impl Publisher {
    /// Publisher that truncates and rewrites `path` in place
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), atomic: false }
    }

    /// Publisher that writes a sibling temporary file and renames it over `path`, so
    /// readers never observe a partially written value
    pub fn atomic(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into(), atomic: true }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn temporary_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(OsString::from).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }

    /// Writes `reading` as a decimal string with no trailing newline, then flushes it
    /// all the way down to storage
    pub fn publish(&self, reading: &Reading) -> Result<(), PublishError> {
        if self.atomic {
            let temporary = self.temporary_path();
            write_durably(&temporary, reading)?;
            fs::rename(&temporary, &self.path).map_err(|source| PublishError::Rename {
                from: temporary.clone(),
                to: self.path.clone(),
                source,
            })?;
        } else {
            write_durably(&self.path, reading)?;
        }
        debug!("published {reading} to {}", self.path.display());
        Ok(())
    }

    /// Deletes the published file. A file that does not exist counts as removed.
    pub fn remove(&self) -> Result<(), PublishError> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(PublishError::Remove { path: self.path.clone(), source }),
        }
    }
}

fn write_durably(path: &Path, reading: &Reading) -> Result<(), PublishError> {
    let write_err = |source| PublishError::Write { path: path.to_path_buf(), source };

    let file = File::create(path).map_err(write_err)?;
    let mut writer = BufWriter::new(file);
    write!(writer, "{reading}").map_err(write_err)?;
    let file = writer.into_inner().map_err(|err| write_err(err.into_error()))?;
    file.sync_all().map_err(|source| PublishError::Sync { path: path.to_path_buf(), source })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overwrites_the_whole_content() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = Publisher::new(dir.path().join("distance"));

        publisher.publish(&Reading::centimeters(123.45).unwrap()).unwrap();
        publisher.publish(&Reading::Whole(7)).unwrap();

        assert_eq!(fs::read_to_string(publisher.path()).unwrap(), "7");
    }

    #[test]
    fn atomic_mode_leaves_no_temporary_file() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = Publisher::atomic(dir.path().join("distance"));

        publisher.publish(&Reading::centimeters(17.15).unwrap()).unwrap();

        assert_eq!(fs::read_to_string(publisher.path()).unwrap(), "17.15");
        assert!(!publisher.temporary_path().exists());
        assert_eq!(publisher.temporary_path(), dir.path().join("distance.tmp"));
    }

    #[test]
    fn removing_a_missing_file_is_fine() {
        let dir = tempfile::tempdir().unwrap();
        let publisher = Publisher::new(dir.path().join("distance"));

        publisher.remove().unwrap();
        publisher.publish(&Reading::Whole(3)).unwrap();
        publisher.remove().unwrap();
        assert!(!publisher.path().exists());
    }

    #[test]
    fn unwritable_path_reports_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("distance");
        let publisher = Publisher::new(&path);

        match publisher.publish(&Reading::Whole(1)) {
            Err(PublishError::Write { path: failed, .. }) => assert_eq!(failed, path),
            other => panic!("unexpected result {other:?}"),
        }
    }
}
