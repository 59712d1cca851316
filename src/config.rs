//! Configuration for building a [`Policy`].
//!
//! A [`Config`] collects the output sink, the panic-on-warn switch, the
//! location prefix switches and the debug sink. It can either be turned into a
//! standalone [`Policy`] with [`Config::build`], or installed as the
//! process-wide policy used by the free functions with [`Config::install`].
//!
//! # Environment Variables
//!
//! [`Config::from_env`] starts from [`Config::new`] and then applies
//! `ERRPOLICY`, a comma-separated list of options (case-insensitive):
//!
//! - `panic-on-warn` - Escalate every warning to a panic
//! - `no-location` - Do not prefix messages or debug notes with `file:line: `
//! - `debug` - Enable debug output on stdout
//! - `silent` - Start without an output sink
//!
//! Unknown options are ignored.

use std::{
    ffi::OsStr,
    fmt, io,
    sync::{OnceLock, atomic::AtomicBool},
};

use crate::{global, policy::Policy, sink::TextSink};

/// Builder for a [`Policy`].
///
/// # Examples
///
/// ```rust
/// use errpolicy::{Config, sink::MemorySink};
///
/// let buffer = MemorySink::new();
/// let policy = Config::new()
///     .sink(buffer.clone())
///     .show_location(false)
///     .build();
///
/// assert!(!policy.warn(Some("disk full")));
/// assert_eq!(buffer.contents(), "disk full\n");
/// ```
pub struct Config {
    pub(crate) sink: Option<Box<dyn TextSink>>,
    pub(crate) debug_sink: Option<Box<dyn TextSink>>,
    pub(crate) panic_on_warn: bool,
    pub(crate) show_location: bool,
    pub(crate) debug_show_location: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates the default configuration: output to stderr, no panic on
    /// warn, location prefixes on and debug output off.
    pub fn new() -> Self {
        Self {
            sink: Some(Box::new(io::stderr())),
            debug_sink: None,
            panic_on_warn: false,
            show_location: true,
            debug_show_location: true,
        }
    }

    /// Creates the default configuration adjusted by the `ERRPOLICY`
    /// environment variable.
    ///
    /// The variable is read once per process.
    pub fn from_env() -> Self {
        EnvOptions::get().apply(Self::new())
    }

    /// Sets the sink that warnings and logged errors are written to.
    pub fn sink(mut self, sink: impl TextSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    /// Removes the output sink.
    ///
    /// Without a sink, [`Policy::warn`] panics and [`Policy::log`] only
    /// returns `false`.
    pub fn without_sink(mut self) -> Self {
        self.sink = None;
        self
    }

    /// Sets whether [`Policy::warn`] escalates to a panic.
    pub fn panic_on_warn(mut self, panic_on_warn: bool) -> Self {
        self.panic_on_warn = panic_on_warn;
        self
    }

    /// Sets whether written messages are prefixed with `file:line: `.
    pub fn show_location(mut self, show_location: bool) -> Self {
        self.show_location = show_location;
        self
    }

    /// Sets whether debug notes are prefixed with `file:line: `.
    ///
    /// Independent of [`show_location`](Self::show_location).
    pub fn debug_show_location(mut self, show_location: bool) -> Self {
        self.debug_show_location = show_location;
        self
    }

    /// Enables [`Policy::debug`] output to the given sink.
    pub fn debug_sink(mut self, sink: impl TextSink + 'static) -> Self {
        self.debug_sink = Some(Box::new(sink));
        self
    }

    /// Builds a standalone policy.
    pub fn build(self) -> Policy {
        Policy {
            sink: self.sink.into(),
            debug_sink: self.debug_sink.into(),
            panic_on_warn: AtomicBool::new(self.panic_on_warn),
            show_location: AtomicBool::new(self.show_location),
            debug_show_location: AtomicBool::new(self.debug_show_location),
        }
    }

    /// Installs this configuration as the process-wide policy.
    ///
    /// This only succeeds before the global policy has been used or
    /// installed. Afterwards, adjust it through the setters on
    /// [`global()`](crate::global()) instead.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use errpolicy::Config;
    ///
    /// Config::new().panic_on_warn(true).install().expect("policy already installed");
    /// assert!(errpolicy::global().panic_on_warn());
    ///
    /// // The global policy exists now, so a second install fails.
    /// assert!(Config::new().install().is_err());
    /// ```
    pub fn install(self) -> Result<(), PolicyAlreadyInstalledError> {
        global::install(self.build()).map_err(PolicyAlreadyInstalledError)
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("has_sink", &self.sink.is_some())
            .field("has_debug_sink", &self.debug_sink.is_some())
            .field("panic_on_warn", &self.panic_on_warn)
            .field("show_location", &self.show_location)
            .field("debug_show_location", &self.debug_show_location)
            .finish()
    }
}

/// Error returned when installing a policy after the process-wide policy
/// already exists.
///
/// Contains the policy that was built from the rejected configuration.
pub struct PolicyAlreadyInstalledError(pub Policy);

impl fmt::Debug for PolicyAlreadyInstalledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PolicyAlreadyInstalledError").finish()
    }
}

impl fmt::Display for PolicyAlreadyInstalledError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "the global error policy is already installed")
    }
}

impl std::error::Error for PolicyAlreadyInstalledError {}

#[derive(Debug, Default, PartialEq, Eq)]
struct EnvOptions {
    panic_on_warn: bool,
    hide_location: bool,
    debug: bool,
    silent: bool,
}

impl EnvOptions {
    fn get() -> &'static Self {
        static ERRPOLICY_FLAGS: OnceLock<EnvOptions> = OnceLock::new();

        ERRPOLICY_FLAGS.get_or_init(|| Self::parse(std::env::var_os("ERRPOLICY").as_deref()))
    }

    fn parse(var: Option<&OsStr>) -> Self {
        let mut options = Self::default();

        if let Some(var) = var {
            for v in var.to_string_lossy().split(',') {
                let v = v.trim();
                if v.eq_ignore_ascii_case("panic-on-warn") {
                    options.panic_on_warn = true;
                } else if v.eq_ignore_ascii_case("no-location") {
                    options.hide_location = true;
                } else if v.eq_ignore_ascii_case("debug") {
                    options.debug = true;
                } else if v.eq_ignore_ascii_case("silent") {
                    options.silent = true;
                }
            }
        }

        options
    }

    fn apply(&self, mut config: Config) -> Config {
        config.panic_on_warn |= self.panic_on_warn;
        config.show_location &= !self.hide_location;
        config.debug_show_location &= !self.hide_location;
        if self.debug {
            config = config.debug_sink(io::stdout());
        }
        if self.silent {
            config = config.without_sink();
        }
        config
    }
}
