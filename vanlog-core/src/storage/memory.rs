//! Memory-backed volume for testing and simulation
//!
//! Useful for:
//! - Unit testing the storage manager and acquisition loop
//! - Running the engine on targets with no filesystem
//! - Injecting storage faults (failed init, failed open)
//!
//! Capacities are fixed (`heapless`), in keeping with the no-allocation rule:
//! up to [`MAX_FILES`] files of [`FILE_CAPACITY`] bytes each.

use heapless::{FnvIndexMap, String, Vec};

use super::{AppendFile, Volume};
use crate::errors::{StorageError, StorageResult};

/// Maximum number of distinct files a volume can hold. Power of two, as
/// `FnvIndexMap` requires.
pub const MAX_FILES: usize = 4;

/// Maximum size of one in-memory file in bytes.
pub const FILE_CAPACITY: usize = 8192;

/// Longest file name the volume accepts.
pub const MAX_NAME_LEN: usize = 32;

/// In-memory storage volume.
///
/// ## Example
///
/// ```
/// use vanlog_core::storage::{MemoryVolume, Volume, AppendFile};
///
/// let mut volume = MemoryVolume::new();
/// volume.init().unwrap();
///
/// let mut file = volume.open_append("log.txt").unwrap();
/// file.write_line("hello").unwrap();
/// drop(file);
///
/// assert_eq!(volume.contents("log.txt"), Some(&b"hello\n"[..]));
/// ```
#[derive(Debug, Default)]
pub struct MemoryVolume {
    files: FnvIndexMap<String<MAX_NAME_LEN>, Vec<u8, FILE_CAPACITY>, MAX_FILES>,
    fail_init: bool,
    fail_open: bool,
}

impl MemoryVolume {
    /// Empty volume that initializes successfully.
    pub fn new() -> Self {
        Self::default()
    }

    /// Volume whose `init` fails, for degraded-path tests.
    pub fn failing_init(mut self) -> Self {
        self.fail_init = true;
        self
    }

    /// Make subsequent `open_append` calls fail (or succeed again). Lets
    /// tests fault the media mid-run, like a card pulled from its slot.
    pub fn set_fail_open(&mut self, fail: bool) {
        self.fail_open = fail;
    }

    /// Raw bytes of `name`, or `None` if it was never created.
    pub fn contents(&self, name: &str) -> Option<&[u8]> {
        let key = String::try_from(name).ok()?;
        self.files.get(&key).map(|buf| buf.as_slice())
    }
}

impl Volume for MemoryVolume {
    type File<'a>
        = MemoryFile<'a>
    where
        Self: 'a;

    fn init(&mut self) -> StorageResult<()> {
        if self.fail_init {
            return Err(StorageError::Init {
                reason: "simulated device failure",
            });
        }
        Ok(())
    }

    fn open_append(&mut self, name: &str) -> StorageResult<MemoryFile<'_>> {
        if self.fail_open {
            return Err(StorageError::Open);
        }

        let key = String::try_from(name).map_err(|_| StorageError::Open)?;
        if !self.files.contains_key(&key) {
            self.files
                .insert(key.clone(), Vec::new())
                .map_err(|_| StorageError::Open)?;
        }
        // Just inserted if absent, so the lookup cannot miss.
        let buf = self.files.get_mut(&key).ok_or(StorageError::Open)?;
        Ok(MemoryFile { buf })
    }
}

/// Append handle into a [`MemoryVolume`] file.
#[derive(Debug)]
pub struct MemoryFile<'a> {
    buf: &'a mut Vec<u8, FILE_CAPACITY>,
}

impl AppendFile for MemoryFile<'_> {
    fn len(&self) -> u64 {
        self.buf.len() as u64
    }

    fn write_line(&mut self, line: &str) -> StorageResult<()> {
        self.buf
            .extend_from_slice(line.as_bytes())
            .map_err(|_| StorageError::Write)?;
        self.buf.push(b'\n').map_err(|_| StorageError::Write)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_and_reopen() {
        let mut volume = MemoryVolume::new();
        volume.init().unwrap();

        {
            let mut file = volume.open_append("a.txt").unwrap();
            assert!(file.is_empty());
            file.write_line("one").unwrap();
        }
        {
            let mut file = volume.open_append("a.txt").unwrap();
            assert_eq!(file.len(), 4);
            file.write_line("two").unwrap();
        }

        assert_eq!(volume.contents("a.txt"), Some(&b"one\ntwo\n"[..]));
    }

    #[test]
    fn files_are_independent() {
        let mut volume = MemoryVolume::new();
        volume.open_append("a.txt").unwrap().write_line("a").unwrap();
        volume.open_append("b.txt").unwrap().write_line("b").unwrap();

        assert_eq!(volume.contents("a.txt"), Some(&b"a\n"[..]));
        assert_eq!(volume.contents("b.txt"), Some(&b"b\n"[..]));
    }

    #[test]
    fn fault_injection() {
        let mut volume = MemoryVolume::new().failing_init();
        assert!(volume.init().is_err());

        let mut volume = MemoryVolume::new();
        volume.set_fail_open(true);
        assert_eq!(volume.open_append("a.txt").err(), Some(StorageError::Open));

        volume.set_fail_open(false);
        assert!(volume.open_append("a.txt").is_ok());
    }

    #[test]
    fn overlong_name_is_an_open_error() {
        let mut volume = MemoryVolume::new();
        let name = "a-name-well-beyond-the-thirty-two-byte-limit.txt";
        assert_eq!(volume.open_append(name).err(), Some(StorageError::Open));
    }

    #[test]
    fn full_file_is_a_write_error() {
        let mut volume = MemoryVolume::new();
        let mut file = volume.open_append("a.txt").unwrap();

        // One byte short of capacity; the newline no longer fits.
        let big = [b'x'; FILE_CAPACITY - 1];
        let line = core::str::from_utf8(&big).unwrap();
        assert_eq!(file.write_line(line).err(), Some(StorageError::Write));
    }
}
