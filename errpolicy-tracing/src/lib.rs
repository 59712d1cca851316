#![deny(
    missing_docs,
    unsafe_code,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]

//! Tracing output for errpolicy.
//!
//! This crate provides [`TracingSink`], an output sink that turns every
//! message written by an [`errpolicy::Policy`] into a `tracing` event. Use
//! it when warnings should end up wherever the rest of your logs go instead
//! of on stderr.
//!
//! # Quick Start
//!
//! ```
//! use errpolicy::Config;
//! use errpolicy_tracing::TracingSink;
//!
//! // 1. Set up tracing as usual
//! tracing_subscriber::fmt().init();
//!
//! // 2. Send errpolicy output to tracing
//! Config::new()
//!     .sink(TracingSink::new())
//!     .install()
//!     .expect("failed to install policy");
//!
//! // 3. Warnings are now tracing events
//! errpolicy::warn(Some("disk full"));
//! ```
//!
//! Output:
//! ```text
//! 2026-01-01T00:00:00.000000Z  WARN errpolicy: main.rs:14: disk full
//! ```
//!
//! Events are emitted under the `errpolicy` target, so they can be filtered
//! like any other target.

use std::io;

use errpolicy::sink::TextSink;
use tracing::Level;

/// The target every event is emitted under.
pub const TARGET: &str = "errpolicy";

/// Sink that emits each written message as a `tracing` event.
///
/// The trailing newline errpolicy adds to every message is stripped. Writing
/// never fails, whether or not a subscriber is listening.
///
/// # Examples
///
/// ```
/// use errpolicy::Config;
/// use errpolicy_tracing::TracingSink;
/// use tracing::Level;
///
/// // Route debug notes to tracing at DEBUG level, warnings at WARN
/// let policy = Config::new()
///     .sink(TracingSink::new())
///     .debug_sink(TracingSink::with_level(Level::DEBUG))
///     .build();
///
/// policy.debug("cache warmed");
/// ```
#[derive(Copy, Clone, Debug)]
pub struct TracingSink {
    level: Level,
}

impl TracingSink {
    /// Creates a sink emitting events at `WARN` level.
    pub fn new() -> Self {
        Self::with_level(Level::WARN)
    }

    /// Creates a sink emitting events at the given level.
    pub fn with_level(level: Level) -> Self {
        Self { level }
    }

    /// Returns the level events are emitted at.
    pub fn level(&self) -> Level {
        self.level
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl TextSink for TracingSink {
    fn write_text(&mut self, text: &str) -> io::Result<usize> {
        let message = text.strip_suffix('\n').unwrap_or(text);

        // Event levels must be known statically.
        if self.level == Level::ERROR {
            tracing::error!(target: TARGET, "{message}");
        } else if self.level == Level::WARN {
            tracing::warn!(target: TARGET, "{message}");
        } else if self.level == Level::INFO {
            tracing::info!(target: TARGET, "{message}");
        } else if self.level == Level::DEBUG {
            tracing::debug!(target: TARGET, "{message}");
        } else {
            tracing::trace!(target: TARGET, "{message}");
        }

        Ok(text.len())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{Arc, Mutex, PoisonError},
    };

    use errpolicy::Config;
    use tracing::Level;
    use tracing_subscriber::fmt::MakeWriter;

    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("disk full")]
    struct DiskFull;

    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn contents(&self) -> String {
            let buffer = self.0.lock().unwrap_or_else(PoisonError::into_inner);
            String::from_utf8_lossy(&buffer).into_owned()
        }
    }

    impl io::Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl<'a> MakeWriter<'a> for Captured {
        type Writer = Captured;

        fn make_writer(&'a self) -> Self::Writer {
            self.clone()
        }
    }

    fn with_subscriber(max_level: Level, f: impl FnOnce()) -> String {
        let captured = Captured::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(captured.clone())
            .with_max_level(max_level)
            .with_ansi(false)
            .without_time()
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        captured.contents()
    }

    #[test]
    fn test_warn_becomes_event() {
        let output = with_subscriber(Level::TRACE, || {
            let policy = Config::new()
                .sink(TracingSink::new())
                .show_location(false)
                .build();
            assert!(!policy.warn(Some(DiskFull)));
        });

        assert_eq!(output.trim(), "WARN errpolicy: disk full");
    }

    #[test]
    fn test_location_prefix_survives() {
        let output = with_subscriber(Level::TRACE, || {
            let policy = Config::new().sink(TracingSink::new()).build();
            policy.todo("stream large payloads");
        });

        assert!(output.trim_start().starts_with("WARN errpolicy: lib.rs:"));
        assert!(output.ends_with(": TODO: stream large payloads\n"));
    }

    #[test]
    fn test_level_is_respected() {
        let output = with_subscriber(Level::INFO, || {
            let policy = Config::new()
                .sink(TracingSink::with_level(Level::ERROR))
                .debug_sink(TracingSink::with_level(Level::DEBUG))
                .show_location(false)
                .build();
            policy.log(Some(DiskFull));
            policy.debug("filtered out");
        });

        assert_eq!(output.trim(), "ERROR errpolicy: disk full");
    }

    #[test]
    fn test_write_without_subscriber_succeeds() {
        let mut sink = TracingSink::default();
        assert_eq!(sink.level(), Level::WARN);
        assert_eq!(sink.write_text("nobody listens\n").unwrap(), 15);
    }
}
