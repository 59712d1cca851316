#![deny(
    missing_docs,
    unsafe_code,
    rustdoc::invalid_rust_codeblocks,
    rustdoc::broken_intra_doc_links,
    missing_copy_implementations,
    unused_doc_comments
)]
// Make docs.rs generate better docs
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Small, opinionated policies for what to do with an error you are not going
//! to handle.
//!
//! ## Overview
//!
//! Not every error deserves a recovery path. During development, and in
//! plenty of tools afterwards, the interesting question is only whether an
//! error should be ignored, written down, or allowed to take the process
//! down. This crate answers that question with a handful of operations over
//! a possibly-absent error:
//!
//! - [`panic()`]: panic with the error as payload.
//! - [`warn()`]: write the error to the sink, or panic if that is impossible or
//!   panic-on-warn is set.
//! - [`log()`]: write the error to the sink if there is one; never panic.
//! - [`check()`]: only report whether there was an error.
//! - [`test()`]: hand the error to a test harness as a failure.
//! - [`issue()`], [`todo()`] and [`deprecated()`]: warn with a
//!   [`DocumentationError`] that marks unfinished or outdated code.
//! - [`debug()`]: write a note to the debug sink, when one is configured.
//!
//! Every operation accepts an [`Outcome`], which covers both `Option<E>` and
//! `Result<T, E>`. The absence of an error is always success.
//!
//! ## Quick Example
//!
//! ```
//! use errpolicy::{Config, sink::MemorySink};
//!
//! let buffer = MemorySink::new();
//! let policy = Config::new().sink(buffer.clone()).build();
//!
//! let port = "70000".parse::<u16>();
//! if !policy.warn(&port) {
//!     // The error has been written, carry on with a default.
//! }
//! assert!(buffer.contents().ends_with("number too large to fit in target type\n"));
//! ```
//!
//! ## Output
//!
//! Written messages are the error's [`Display`](std::fmt::Display) output,
//! terminated by a newline and prefixed with the `file:line: ` of the code
//! that called the operation:
//!
//! ```text
//! loader.rs:42: disk full
//! ```
//!
//! The location is captured at compile time through `#[track_caller]`.
//!
//! ## Configuration
//!
//! A [`Policy`] is built from a [`Config`], which holds the output sink
//! (stderr unless changed), the panic-on-warn switch, the location switch and
//! the debug sink. The free functions use the process-wide policy returned
//! by [`global()`], created from [`Config::from_env`] on first use. See the
//! [`config`] module for the `ERRPOLICY` environment variable.
//!
//! ## Panics
//!
//! The panics raised by [`panic()`], [`warn()`] and friends are the point of
//! those operations: they carry the original error as payload via
//! [`std::panic::panic_any`] and are meant to be unrecoverable at this
//! layer. A failing sink write always panics with the
//! [`std::io::Error`] as payload, since there is nowhere else to report it.

mod macros;

pub mod config;
pub mod documentation;
mod global;
pub mod location;
mod outcome;
mod policy;
pub mod prelude;
mod reporter;
pub mod sink;

use std::fmt;

pub use self::{
    config::{Config, PolicyAlreadyInstalledError},
    documentation::{DocumentationError, DocumentationKind},
    global::global,
    outcome::Outcome,
    policy::Policy,
    reporter::{FailureReporter, PanicReporter},
};

/// Panics with the error as payload if there is one, using the global
/// policy.
///
/// See [`Policy::panic`].
#[track_caller]
pub fn panic<O>(outcome: O)
where
    O: Outcome,
    O::Error: Send + 'static,
{
    global().panic(outcome)
}

/// Writes the error with the global policy, or panics trying.
///
/// See [`Policy::warn`].
#[track_caller]
pub fn warn<O>(outcome: O) -> bool
where
    O: Outcome,
    O::Error: fmt::Display + Send + 'static,
{
    global().warn(outcome)
}

/// Writes the error with the global policy if it has a sink.
///
/// See [`Policy::log`].
#[track_caller]
pub fn log<O>(outcome: O) -> bool
where
    O: Outcome,
    O::Error: fmt::Display,
{
    global().log(outcome)
}

/// Returns `true` if there was no error.
///
/// See [`Policy::check`].
#[inline]
pub fn check<O: Outcome>(outcome: O) -> bool {
    global().check(outcome)
}

/// Hands the error, if any, to a test harness as a failure.
///
/// See [`Policy::test`].
#[track_caller]
pub fn test<O, R>(outcome: O, reporter: &mut R)
where
    O: Outcome,
    R: FailureReporter<O::Error> + ?Sized,
{
    global().test(outcome, reporter)
}

/// Warns with a free-form [`DocumentationError`] using the global policy.
///
/// See also the [`issue!`] macro.
#[track_caller]
pub fn issue(message: impl fmt::Display) {
    global().issue(message)
}

/// Warns with a `TODO: ` [`DocumentationError`] using the global policy.
#[track_caller]
pub fn todo(message: impl fmt::Display) {
    global().todo(message)
}

/// Warns with a `Deprecated: ` [`DocumentationError`] using the global
/// policy.
#[track_caller]
pub fn deprecated(message: impl fmt::Display) {
    global().deprecated(message)
}

/// Writes a note to the global debug sink, if debug output is enabled.
#[track_caller]
pub fn debug(message: impl fmt::Display) {
    global().debug(message)
}

#[doc(hidden)]
pub mod __private {
    #[doc(hidden)]
    pub use core::format_args;
}
