//! Storage Manager - append-only persistence for data records
//!
//! This module owns the data file and the failure policy around it.
//!
//! ## Module Organization
//!
//! - Core traits and the manager (this file)
//! - `memory` - in-memory volume for tests and simulation
//! - `file` - filesystem-backed volume (requires `std`)
//!
//! ## Failure Policy
//!
//! Storage is the degraded-continue class of the error taxonomy. If the
//! device fails to initialize the manager keeps running with logging
//! disabled; if a single open or write fails the line is dropped. Nothing is
//! retried and no error reaches the acquisition loop - the logger accepts
//! silent data loss over halting, because a van parked for a month with a
//! wedged process records nothing at all.
//!
//! ## Crash Safety
//!
//! The file is opened and closed around every write rather than held across
//! intervals, so a power cut between writes loses at most the in-flight
//! record. File handles release on drop on every exit path, including the
//! branch where a header turns out not to be needed.

use log::{debug, info, warn};

use crate::errors::StorageResult;

#[cfg(feature = "std")]
pub mod file;
pub mod memory;

#[cfg(feature = "std")]
pub use file::FsVolume;
pub use memory::MemoryVolume;

/// An open, append-positioned file. Closes when dropped.
pub trait AppendFile {
    /// Current size in bytes.
    fn len(&self) -> u64;

    /// True if the file holds no data yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Append `line` followed by a newline terminator.
    fn write_line(&mut self, line: &str) -> StorageResult<()>;
}

/// A storage device that can open named files for append.
///
/// The volume stands in for the SD-card driver: bring up the bus once, then
/// hand out short-lived append handles. Implementations decide what `init`
/// means (SPI bus + card handshake, directory creation, nothing at all).
pub trait Volume {
    /// Handle type returned by [`open_append`](Self::open_append).
    type File<'a>: AppendFile
    where
        Self: 'a;

    /// Bring up the device. Called once at startup.
    fn init(&mut self) -> StorageResult<()>;

    /// Open `name` for append, creating it if necessary.
    fn open_append(&mut self, name: &str) -> StorageResult<Self::File<'_>>;
}

/// Owns the data file name and the degraded-state bookkeeping.
///
/// All file access in the system goes through this type; nothing else holds
/// a handle, so access is serialized by construction.
pub struct StorageManager<V: Volume> {
    volume: V,
    filename: &'static str,
    degraded: bool,
}

impl<V: Volume> StorageManager<V> {
    /// Create a manager for `filename` on `volume`. No device access until
    /// [`init`](Self::init).
    pub fn new(volume: V, filename: &'static str) -> Self {
        Self {
            volume,
            filename,
            degraded: false,
        }
    }

    /// Bring up the storage device.
    ///
    /// Failure is logged and non-fatal: the manager enters a degraded state
    /// in which every subsequent write is silently dropped. The rest of the
    /// system keeps running without persistence.
    pub fn init(&mut self) {
        match self.volume.init() {
            Ok(()) => {
                info!("storage started successfully");
                self.degraded = false;
            }
            Err(e) => {
                warn!("failed to start storage, logging disabled: {}", e);
                self.degraded = true;
            }
        }
    }

    /// Whether initialization failed and writes are being dropped.
    pub fn is_degraded(&self) -> bool {
        self.degraded
    }

    /// Write `header` as the first line if the data file is empty.
    ///
    /// Idempotent: on a non-empty file this opens, checks, and closes
    /// without writing. The header text is echoed to the console either way
    /// so an operator watching the serial line sees the column layout.
    pub fn ensure_header(&mut self, header: &str) {
        if !self.degraded {
            match self.volume.open_append(self.filename) {
                Ok(mut file) => {
                    if file.is_empty() {
                        info!("header added to file");
                        if let Err(e) = file.write_line(header) {
                            debug!("header write dropped: {}", e);
                        }
                    }
                }
                Err(e) => debug!("header skipped: {}", e),
            }
        }
        info!("{}", header);
    }

    /// Append one line to the data file.
    ///
    /// Open or write failures drop the line without surfacing an error -
    /// the observable effect is simply that nothing was persisted.
    pub fn append_line(&mut self, line: &str) {
        if self.degraded {
            return;
        }
        match self.volume.open_append(self.filename) {
            Ok(mut file) => {
                if let Err(e) = file.write_line(line) {
                    debug!("append dropped: {}", e);
                }
            }
            Err(e) => debug!("append skipped: {}", e),
        }
    }

    /// Access the underlying volume (tests inspect written bytes this way).
    pub fn volume(&self) -> &V {
        &self.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use memory::MemoryVolume;

    #[test]
    fn header_written_once() {
        let mut storage = StorageManager::new(MemoryVolume::new(), "data.txt");
        storage.init();

        storage.ensure_header("t\tH");
        storage.ensure_header("t\tH");

        assert_eq!(storage.volume().contents("data.txt"), Some(&b"t\tH\n"[..]));
    }

    #[test]
    fn header_skipped_on_nonempty_file() {
        let mut storage = StorageManager::new(MemoryVolume::new(), "data.txt");
        storage.init();

        storage.append_line("1/1/2026 0:0:0\t40\t20\t21");
        storage.ensure_header("t\tH");

        let contents = storage.volume().contents("data.txt").unwrap();
        assert_eq!(contents, b"1/1/2026 0:0:0\t40\t20\t21\n");
    }

    #[test]
    fn append_preserves_call_order() {
        let mut storage = StorageManager::new(MemoryVolume::new(), "data.txt");
        storage.init();

        storage.append_line("first");
        storage.append_line("second");
        storage.append_line("third");

        assert_eq!(
            storage.volume().contents("data.txt"),
            Some(&b"first\nsecond\nthird\n"[..])
        );
    }

    #[test]
    fn failed_init_degrades_silently() {
        let mut storage = StorageManager::new(MemoryVolume::new().failing_init(), "data.txt");
        storage.init();

        assert!(storage.is_degraded());
        storage.ensure_header("t\tH");
        storage.append_line("a line");

        // Nothing persisted, nothing panicked.
        assert_eq!(storage.volume().contents("data.txt"), None);
    }

    #[test]
    fn failed_open_drops_the_line() {
        let mut volume = MemoryVolume::new();
        volume.set_fail_open(true);
        let mut storage = StorageManager::new(volume, "data.txt");
        storage.init();

        storage.append_line("lost");
        assert_eq!(storage.volume().contents("data.txt"), None);
    }
}
