//! Test-failure reporting.
//!
//! [`Policy::test`](crate::Policy::test) only needs one capability from a
//! test harness: record a value as a failure. [`FailureReporter`] is that
//! capability, so callers are not tied to one concrete harness type.

use std::fmt;

/// Records a value as a test failure.
///
/// Implemented for every `FnMut(E)` closure.
///
/// # Examples
///
/// ```rust
/// use errpolicy::{FailureReporter, test};
///
/// let mut failures: Vec<String> = Vec::new();
/// test(Err::<(), _>("bad checksum".to_string()), &mut |err: String| failures.push(err));
/// test(Ok::<(), String>(()), &mut |err: String| failures.push(err));
///
/// assert_eq!(failures, ["bad checksum"]);
/// ```
pub trait FailureReporter<E> {
    /// Records `err` as a failure.
    fn error(&mut self, err: E);
}

impl<E, F> FailureReporter<E> for F
where
    F: FnMut(E),
{
    fn error(&mut self, err: E) {
        self(err)
    }
}

/// A reporter that fails the current Rust test by panicking with the
/// error's message.
#[derive(Copy, Clone, Debug, Default)]
pub struct PanicReporter;

impl<E: fmt::Display> FailureReporter<E> for PanicReporter {
    #[track_caller]
    fn error(&mut self, err: E) {
        panic!("test failure: {err}")
    }
}
