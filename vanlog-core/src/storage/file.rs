//! Filesystem-backed volume (requires `std`)
//!
//! Maps the volume abstraction onto a directory: `init` creates the data
//! directory, `open_append` opens `O_APPEND` handles that close on drop.
//! This is what a Raspberry-Pi-class logger or the host demo runs on.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

use log::warn;

use super::{AppendFile, Volume};
use crate::errors::{StorageError, StorageResult};

/// Volume rooted at a directory on the host filesystem.
#[derive(Debug, Clone)]
pub struct FsVolume {
    root: PathBuf,
}

impl FsVolume {
    /// Volume that stores its files under `root`. The directory does not
    /// need to exist yet; `init` creates it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Directory this volume writes into.
    pub fn root(&self) -> &std::path::Path {
        &self.root
    }
}

impl Volume for FsVolume {
    type File<'a>
        = FsFile
    where
        Self: 'a;

    fn init(&mut self) -> StorageResult<()> {
        fs::create_dir_all(&self.root).map_err(|e| {
            warn!("creating {:?} failed: {}", self.root, e);
            StorageError::Init {
                reason: "data directory unavailable",
            }
        })
    }

    fn open_append(&mut self, name: &str) -> StorageResult<FsFile> {
        let path = self.root.join(name);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                warn!("opening {:?} failed: {}", path, e);
                StorageError::Open
            })?;
        Ok(FsFile { file })
    }
}

/// Append handle onto a real file. Closes on drop.
#[derive(Debug)]
pub struct FsFile {
    file: File,
}

impl AppendFile for FsFile {
    fn len(&self) -> u64 {
        // An unstatable-but-open file reads as empty; worst case the header
        // is written twice, which beats refusing to log at all.
        self.file.metadata().map(|m| m.len()).unwrap_or_default()
    }

    fn write_line(&mut self, line: &str) -> StorageResult<()> {
        let write = |f: &mut File| -> std::io::Result<()> {
            f.write_all(line.as_bytes())?;
            f.write_all(b"\n")
        };
        write(&mut self.file).map_err(|e| {
            warn!("append failed: {}", e);
            StorageError::Write
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn init_creates_the_data_directory() {
        let dir = tempdir().unwrap();
        let root = dir.path().join("nested").join("data");
        let mut volume = FsVolume::new(&root);

        volume.init().unwrap();
        assert!(root.is_dir());
    }

    #[test]
    fn appends_accumulate_across_handles() {
        let dir = tempdir().unwrap();
        let mut volume = FsVolume::new(dir.path());
        volume.init().unwrap();

        {
            let mut file = volume.open_append("log.txt").unwrap();
            assert!(file.is_empty());
            file.write_line("first").unwrap();
        }
        {
            let mut file = volume.open_append("log.txt").unwrap();
            assert_eq!(file.len(), 6);
            file.write_line("second").unwrap();
        }

        let contents = fs::read_to_string(dir.path().join("log.txt")).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn open_fails_on_missing_root() {
        let dir = tempdir().unwrap();
        let gone = dir.path().join("not-created");
        let mut volume = FsVolume::new(&gone);

        // init never called, directory absent
        assert_eq!(
            volume.open_append("log.txt").err(),
            Some(StorageError::Open)
        );
    }
}
