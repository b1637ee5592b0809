//! Where finished records go.
//!
//! A sink receives one rendered line at a time, without the trailing newline, and is
//! responsible for terminating it. Every render in the process may call the active
//! sink concurrently, hence the `Send + Sync` bound and per-line locking in the
//! built-in implementations.

mod file;
mod memory;
mod stream;

pub use file::FileSink;
pub use memory::MemorySink;
pub use stream::{StderrSink, StdoutSink, WriterSink};

/// Destination for rendered records.
pub trait Sink: Send + Sync {
    /// Writes `line` followed by a newline as one unit.
    ///
    /// # Errors
    /// I/O errors from the underlying stream or file.
    fn write_line(&self, line: &str) -> Result<(), crate::Error>;

    /// Pushes out anything the sink buffers.
    ///
    /// # Errors
    /// I/O errors from the underlying stream or file.
    fn flush(&self) -> Result<(), crate::Error> {
        Ok(())
    }
}
