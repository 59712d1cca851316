use std::{
    cell::RefCell,
    fmt::{self, Write as _},
    io,
    panic::panic_any,
    sync::{
        Mutex, MutexGuard, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};

use crate::{
    documentation::DocumentationError, location::CallerLocation, outcome::Outcome,
    reporter::FailureReporter, sink::TextSink,
};

type SinkSlot = Mutex<Option<Box<dyn TextSink>>>;

thread_local! {
    // Addresses of the sink slots this thread is currently writing to.
    static WRITING: RefCell<Vec<usize>> = const { RefCell::new(Vec::new()) };
}

/// A set of error reporting policies sharing one configuration.
///
/// Every operation takes an [`Outcome`], usually an `Option<E>` or a
/// `Result<T, E>`, and treats the absence of an error as success. What
/// happens to a present error depends on the operation:
///
/// | Operation  | Sink set                 | No sink        | Panic on warn |
/// |------------|--------------------------|----------------|---------------|
/// | [`panic`]  | panics                   | panics         | panics        |
/// | [`warn`]   | writes, returns `false`  | panics         | panics        |
/// | [`log`]    | writes, returns `false`  | returns `false`| not affected  |
/// | [`check`]  | returns `false`          | returns `false`| not affected  |
///
/// Panics carry the original error as their payload, so an enclosing
/// [`std::panic::catch_unwind`] can downcast it back. A failing sink write
/// always panics with the [`std::io::Error`] as payload, whatever the
/// operation. The same goes for an error whose `Display` impl fails, and for
/// a sink that reports through the policy it is writing for: the nested
/// write panics with an [`io::ErrorKind::Deadlock`] error instead of
/// blocking forever.
///
/// Build one from a [`Config`](crate::Config), or use the process-wide
/// policy behind [`global()`](crate::global()).
///
/// [`panic`]: Policy::panic
/// [`warn`]: Policy::warn
/// [`log`]: Policy::log
/// [`check`]: Policy::check
pub struct Policy {
    pub(crate) sink: SinkSlot,
    pub(crate) debug_sink: SinkSlot,
    pub(crate) panic_on_warn: AtomicBool,
    pub(crate) show_location: AtomicBool,
    pub(crate) debug_show_location: AtomicBool,
}

impl Policy {
    /// Panics with the error as payload if there is one.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use errpolicy::Config;
    ///
    /// let policy = Config::new().build();
    /// policy.panic(Ok::<(), std::io::Error>(()));
    ///
    /// let caught = std::panic::catch_unwind(|| policy.panic(Some("fatal")));
    /// assert_eq!(*caught.unwrap_err().downcast::<&str>().unwrap(), "fatal");
    /// ```
    #[track_caller]
    pub fn panic<O>(&self, outcome: O)
    where
        O: Outcome,
        O::Error: Send + 'static,
    {
        if let Some(err) = outcome.into_error() {
            panic_any(err)
        }
    }

    /// Writes the error to the sink, or panics trying.
    ///
    /// Returns `true` if there was no error. With panic-on-warn set, or
    /// without a sink, a present error panics with the error as payload.
    #[track_caller]
    pub fn warn<O>(&self, outcome: O) -> bool
    where
        O: Outcome,
        O::Error: fmt::Display + Send + 'static,
    {
        let Some(err) = outcome.into_error() else {
            return true;
        };

        if self.panic_on_warn() {
            panic_any(err)
        }

        let location = self.show_location().then_some(CallerLocation::caller());
        if !self.emit(&self.sink, &err, location) {
            panic_any(err)
        }

        false
    }

    /// Writes the error to the sink if there is one.
    ///
    /// Returns `true` if there was no error. Unlike [`warn`](Self::warn) this
    /// never escalates: without a sink the error is dropped.
    #[track_caller]
    pub fn log<O>(&self, outcome: O) -> bool
    where
        O: Outcome,
        O::Error: fmt::Display,
    {
        match outcome.into_error() {
            None => true,
            Some(err) => {
                let location = self.show_location().then_some(CallerLocation::caller());
                self.emit(&self.sink, &err, location);
                false
            }
        }
    }

    /// Returns `true` if there was no error. Never writes or panics.
    #[inline]
    pub fn check<O: Outcome>(&self, outcome: O) -> bool {
        outcome.is_success()
    }

    /// Hands the error, if any, to a test harness as a failure.
    #[track_caller]
    pub fn test<O, R>(&self, outcome: O, reporter: &mut R)
    where
        O: Outcome,
        R: FailureReporter<O::Error> + ?Sized,
    {
        if let Some(err) = outcome.into_error() {
            reporter.error(err);
        }
    }

    /// Warns with a free-form [`DocumentationError`].
    #[track_caller]
    pub fn issue(&self, message: impl fmt::Display) {
        self.warn(Some(DocumentationError::issue(message)));
    }

    /// Warns with a `TODO: ` [`DocumentationError`].
    #[track_caller]
    pub fn todo(&self, message: impl fmt::Display) {
        self.warn(Some(DocumentationError::todo(message)));
    }

    /// Warns with a `Deprecated: ` [`DocumentationError`].
    #[track_caller]
    pub fn deprecated(&self, message: impl fmt::Display) {
        self.warn(Some(DocumentationError::deprecated(message)));
    }

    /// Writes a message to the debug sink, if debug output is enabled.
    #[track_caller]
    pub fn debug(&self, message: impl fmt::Display) {
        let location = self
            .debug_show_location()
            .then_some(CallerLocation::caller());
        self.emit(&self.debug_sink, &message, location);
    }

    /// Returns whether [`warn`](Self::warn) escalates to a panic.
    pub fn panic_on_warn(&self) -> bool {
        self.panic_on_warn.load(Ordering::Relaxed)
    }

    /// Sets whether [`warn`](Self::warn) escalates to a panic.
    pub fn set_panic_on_warn(&self, panic_on_warn: bool) {
        self.panic_on_warn.store(panic_on_warn, Ordering::Relaxed);
    }

    /// Returns whether written messages are prefixed with `file:line: `.
    pub fn show_location(&self) -> bool {
        self.show_location.load(Ordering::Relaxed)
    }

    /// Sets whether written messages are prefixed with `file:line: `.
    pub fn set_show_location(&self, show_location: bool) {
        self.show_location.store(show_location, Ordering::Relaxed);
    }

    /// Returns whether debug notes are prefixed with `file:line: `.
    pub fn debug_show_location(&self) -> bool {
        self.debug_show_location.load(Ordering::Relaxed)
    }

    /// Sets whether debug notes are prefixed with `file:line: `.
    pub fn set_debug_show_location(&self, show_location: bool) {
        self.debug_show_location.store(show_location, Ordering::Relaxed);
    }

    /// Returns `true` if an output sink is set.
    pub fn has_sink(&self) -> bool {
        lock(&self.sink).is_some()
    }

    /// Replaces the output sink, returning the previous one.
    pub fn set_sink(&self, sink: Option<Box<dyn TextSink>>) -> Option<Box<dyn TextSink>> {
        std::mem::replace(&mut *lock(&self.sink), sink)
    }

    /// Returns `true` if debug output is enabled.
    pub fn debug_enabled(&self) -> bool {
        lock(&self.debug_sink).is_some()
    }

    /// Replaces the debug sink, returning the previous one. `None` disables
    /// debug output.
    pub fn set_debug_sink(&self, sink: Option<Box<dyn TextSink>>) -> Option<Box<dyn TextSink>> {
        std::mem::replace(&mut *lock(&self.debug_sink), sink)
    }

    /// Writes one message to `slot`. Returns `false` if the slot is empty.
    fn emit(
        &self,
        slot: &SinkSlot,
        message: &dyn fmt::Display,
        location: Option<CallerLocation>,
    ) -> bool {
        // Formatting runs user code, so it happens before the slot is locked.
        let text = format_message(message, location);

        // The guards must be gone before a write failure panics.
        let result = match WritingGuard::enter(slot) {
            None => Err(io::Error::new(
                io::ErrorKind::Deadlock,
                "sink reported through the policy it is writing for",
            )),
            Some(_writing) => {
                let mut sink = lock(slot);
                let Some(sink) = sink.as_mut() else {
                    return false;
                };
                text.and_then(|text| sink.write_text(&text))
            }
        };

        if let Err(write_error) = result {
            panic_any(write_error)
        }
        true
    }
}

impl fmt::Debug for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Policy")
            .field("has_sink", &self.has_sink())
            .field("debug_enabled", &self.debug_enabled())
            .field("panic_on_warn", &self.panic_on_warn())
            .field("show_location", &self.show_location())
            .field("debug_show_location", &self.debug_show_location())
            .finish()
    }
}

fn format_message(
    message: &dyn fmt::Display,
    location: Option<CallerLocation>,
) -> io::Result<String> {
    let mut text = String::new();
    if let Some(location) = location {
        write!(text, "{location}").map_err(io::Error::other)?;
    }
    write!(text, "{message}").map_err(io::Error::other)?;
    if !text.ends_with('\n') {
        text.push('\n');
    }
    Ok(text)
}

/// Marks a sink slot as being written to by the current thread.
///
/// The slot mutex is not reentrant, so a second write to the same slot from
/// inside its sink has to be refused rather than locked.
struct WritingGuard {
    address: usize,
}

impl WritingGuard {
    fn enter(slot: &SinkSlot) -> Option<Self> {
        let address = std::ptr::from_ref(slot) as usize;
        WRITING.with_borrow_mut(|writing| {
            if writing.contains(&address) {
                return None;
            }
            writing.push(address);
            Some(Self { address })
        })
    }
}

impl Drop for WritingGuard {
    fn drop(&mut self) {
        WRITING.with_borrow_mut(|writing| {
            if let Some(index) = writing.iter().rposition(|&a| a == self.address) {
                writing.remove(index);
            }
        });
    }
}

fn lock(slot: &SinkSlot) -> MutexGuard<'_, Option<Box<dyn TextSink>>> {
    slot.lock().unwrap_or_else(PoisonError::into_inner)
}
