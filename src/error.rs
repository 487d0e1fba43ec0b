use std::error::Error;
use std::fmt;

/// Startup/stream-level error kinds (spec.md §7). Invariant violations
/// (misaligned buffers, wrong block length, out-of-range PRN id) are
/// programmer errors and fail fast via `assert!`/`panic!` instead.
#[derive(Debug)]
pub enum AcqError {
    /// `Fs <= 0`, `Fcode <= 0`, or the computed block size `N <= 0`.
    Configuration(String),
    /// The input file could not be opened.
    IoOpen(String),
    /// Fewer than `2*N` bytes were available to fill a block.
    ShortRead { wanted: usize, got: usize },
    /// Any other I/O failure encountered while streaming blocks.
    Io(String),
}

impl fmt::Display for AcqError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AcqError::Configuration(msg) => write!(f, "configuration error: {msg}"),
            AcqError::IoOpen(msg) => write!(f, "failed to open input: {msg}"),
            AcqError::ShortRead { wanted, got } => {
                write!(f, "short read: wanted {wanted} bytes, got {got}")
            }
            AcqError::Io(msg) => write!(f, "I/O error: {msg}"),
        }
    }
}

impl Error for AcqError {}

pub type AcqResult<T> = Result<T, Box<dyn Error>>;
