//! Error Types for the Acquisition Engine
//!
//! ## Design Philosophy
//!
//! The error system follows the same rules as the rest of the crate:
//!
//! 1. **Small Size**: Variants carry at most a `&'static str` reason, so
//!    errors stay a couple of words wide and implement `Copy`.
//!
//! 2. **No Heap Allocation**: No `String`, no boxed sources. Detail that
//!    needs formatting (an `io::Error`, say) is logged at the site where it
//!    occurred and collapsed into a static reason here.
//!
//! 3. **Taxonomy Over Variety**: The logger has exactly one fatal condition
//!    (the RTC is missing) and a handful of degraded-continue conditions
//!    (storage faults). The types mirror that split rather than modeling
//!    every syscall that can fail.
//!
//! ## Propagation Policy
//!
//! - [`ClockError`] is the fatal class: it escapes `AcquisitionLoop::start`
//!   and the process is expected to exit nonzero. Nothing else does.
//! - [`StorageError`] never crosses the storage manager boundary. The manager
//!   absorbs it, logs, and drops the write - by design the logger tolerates a
//!   flaky card by losing data, not by crashing.

use thiserror_no_std::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Fatal clock errors.
///
/// All records depend on RTC timestamps, so a clock that cannot be brought
/// up makes the whole system pointless. This is the one unrecoverable
/// condition in the design.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockError {
    /// The RTC did not respond on its bus at startup.
    #[error("couldn't find RTC")]
    NotDetected,
}

/// Storage faults - absorbed by the storage manager, never fatal.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageError {
    /// The storage device or bus failed to initialize.
    #[error("storage init failed: {reason}")]
    Init {
        /// What went wrong during bring-up.
        reason: &'static str,
    },

    /// The data file could not be opened for append.
    #[error("open for append failed")]
    Open,

    /// An append write failed (media full, removed, or faulted).
    #[error("append write failed")]
    Write,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ClockError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::NotDetected => defmt::write!(fmt, "couldn't find RTC"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for StorageError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Init { reason } => defmt::write!(fmt, "storage init failed: {}", reason),
            Self::Open => defmt::write!(fmt, "open for append failed"),
            Self::Write => defmt::write!(fmt, "append write failed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_are_copy_and_comparable() {
        let a = StorageError::Init { reason: "no card" };
        let b = a;
        assert_eq!(a, b);
        assert_ne!(StorageError::Open, StorageError::Write);
    }

    #[cfg(feature = "std")]
    #[test]
    fn error_display() {
        assert_eq!(format!("{}", ClockError::NotDetected), "couldn't find RTC");
        let e = StorageError::Init { reason: "no card" };
        assert_eq!(format!("{e}"), "storage init failed: no card");
    }
}
