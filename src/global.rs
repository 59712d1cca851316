use std::sync::OnceLock;

use crate::{config::Config, policy::Policy};

static GLOBAL: OnceLock<Policy> = OnceLock::new();

/// Returns the process-wide policy used by the free functions.
///
/// The policy is created from [`Config::from_env`] on first use, unless a
/// configuration was installed earlier with [`Config::install`]. Its
/// settings can be changed at any time through the setters on [`Policy`].
///
/// # Examples
///
/// ```rust
/// use errpolicy::sink::MemorySink;
///
/// let buffer = MemorySink::new();
/// let previous = errpolicy::global().set_sink(Some(Box::new(buffer.clone())));
///
/// errpolicy::log(Some("disk full"));
/// assert!(buffer.contents().ends_with("disk full\n"));
///
/// errpolicy::global().set_sink(previous);
/// ```
pub fn global() -> &'static Policy {
    GLOBAL.get_or_init(|| Config::from_env().build())
}

pub(crate) fn install(policy: Policy) -> Result<(), Policy> {
    GLOBAL.set(policy)
}
