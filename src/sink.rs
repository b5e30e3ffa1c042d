// src/sink.rs

//! Line sinks receiving the canonical output
//!
//! The preamble engine never formats whole documents itself. It hands each
//! finished line to a [`LineSink`] and calls [`LineSink::flush`] once every
//! time a paragraph closes.

use crate::error::Result;
use std::io::Write;

/// Destination for output lines
pub trait LineSink {
    /// Append one line (without trailing newline)
    fn append(&mut self, line: &str);

    /// Finalize everything appended since the last flush
    fn flush(&mut self) -> Result<()>;
}

/// In-memory sink; flushing is a no-op
impl LineSink for Vec<String> {
    fn append(&mut self, line: &str) {
        self.push(line.to_string());
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

impl<S: LineSink + ?Sized> LineSink for &mut S {
    fn append(&mut self, line: &str) {
        (**self).append(line);
    }

    fn flush(&mut self) -> Result<()> {
        (**self).flush()
    }
}

/// Sink that buffers lines and writes them out on flush
pub struct WriterSink<W: Write> {
    writer: W,
    pending: Vec<String>,
    written: usize,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pending: Vec::new(),
            written: 0,
        }
    }

    /// Number of lines written to the underlying writer so far
    pub fn lines_written(&self) -> usize {
        self.written
    }

    /// Recover the writer; lines not yet flushed are discarded
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> LineSink for WriterSink<W> {
    fn append(&mut self, line: &str) {
        self.pending.push(line.to_string());
    }

    fn flush(&mut self) -> Result<()> {
        for line in self.pending.drain(..) {
            writeln!(self.writer, "{}", line)?;
            self.written += 1;
        }
        self.writer.flush()?;
        Ok(())
    }
}
