//! Destinations that reported messages are written to.
//!
//! A [`TextSink`] is the only capability the policies need from an output
//! destination: accept a string and report how many bytes were written.
//! Every [`io::Write`] type that is [`Send`] is a sink already, so
//! [`std::io::Stderr`], [`std::fs::File`] and `Vec<u8>` all work out of the
//! box.
//!
//! ```rust
//! use errpolicy::{Config, sink::MemorySink};
//!
//! let buffer = MemorySink::new();
//! let policy = Config::new().sink(buffer.clone()).show_location(false).build();
//!
//! policy.log(Some("disk full"));
//! assert_eq!(buffer.contents(), "disk full\n");
//! ```

use std::{
    fmt, io,
    sync::{Arc, Mutex, PoisonError},
};

/// A destination capable of accepting text.
///
/// Implemented for every [`io::Write`] + [`Send`] type. Implement it directly
/// for destinations that deal in text rather than bytes.
pub trait TextSink: Send {
    /// Writes `text` in full, returning the number of bytes written.
    fn write_text(&mut self, text: &str) -> io::Result<usize>;
}

impl<W> TextSink for W
where
    W: io::Write + Send,
{
    fn write_text(&mut self, text: &str) -> io::Result<usize> {
        self.write_all(text.as_bytes())?;
        self.flush()?;
        Ok(text.len())
    }
}

/// An in-memory sink whose clones share one buffer.
///
/// Hand one clone to a [`Config`](crate::Config) and keep another to read
/// back what was written.
#[derive(Clone, Default)]
pub struct MemorySink {
    buffer: Arc<Mutex<Vec<u8>>>,
}

impl MemorySink {
    /// Creates an empty buffer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns everything written so far.
    pub fn contents(&self) -> String {
        let buffer = self.buffer.lock().unwrap_or_else(PoisonError::into_inner);
        String::from_utf8_lossy(&buffer).into_owned()
    }

    /// Returns `true` if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
    }

    /// Discards everything written so far.
    pub fn clear(&self) {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl io::Write for MemorySink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl fmt::Debug for MemorySink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemorySink")
            .field("contents", &self.contents())
            .finish()
    }
}
