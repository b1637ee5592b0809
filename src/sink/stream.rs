//! Standard streams and arbitrary writers.

use super::Sink;
use std::io::{self, Write};
use std::sync::{Mutex, PoisonError};

/// The default sink.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl Sink for StderrSink {
    fn write_line(&self, line: &str) -> Result<(), crate::Error> {
        let mut err = io::stderr().lock();
        writeln!(err, "{line}")?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        io::stderr().flush()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl Sink for StdoutSink {
    fn write_line(&self, line: &str) -> Result<(), crate::Error> {
        let mut out = io::stdout().lock();
        writeln!(out, "{line}")?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        io::stdout().flush()?;
        Ok(())
    }
}

/// Wraps any `Write` behind a mutex so concurrent records never interleave.
#[derive(Debug, Default)]
pub struct WriterSink<W> {
    inner: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    #[must_use]
    pub const fn new(writer: W) -> Self {
        Self {
            inner: Mutex::new(writer),
        }
    }

    /// Hands back the wrapped writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.inner.into_inner().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<W: Write + Send> Sink for WriterSink<W> {
    fn write_line(&self, line: &str) -> Result<(), crate::Error> {
        let mut buf = String::with_capacity(line.len() + 1);
        buf.push_str(line);
        buf.push('\n');
        let mut writer = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        writer.write_all(buf.as_bytes())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), crate::Error> {
        let mut writer = self.inner.lock().unwrap_or_else(PoisonError::into_inner);
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writer_sink_terminates_lines() {
        let sink = WriterSink::new(Vec::new());
        sink.write_line("{}").unwrap();
        sink.write_line(r#"{"a":1}"#).unwrap();
        let bytes = sink.into_inner();
        assert_eq!(String::from_utf8(bytes).unwrap(), "{}\n{\"a\":1}\n");
    }

    #[test]
    fn writer_sink_reports_io_failure() {
        struct Broken;
        impl Write for Broken {
            fn write(&mut self, _: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }
            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let sink = WriterSink::new(Broken);
        let err = sink.write_line("{}").unwrap_err();
        assert!(matches!(err, crate::Error::Io(e) if e.kind() == io::ErrorKind::BrokenPipe));
    }
}
