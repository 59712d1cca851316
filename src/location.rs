//! Caller location prefixes for written messages.
//!
//! Locations are captured at compile time through `#[track_caller]` and
//! [`std::panic::Location::caller()`], so the public operations hand the
//! location of *their* caller down to the write path.

use std::{fmt, panic::Location};

/// The source position a message was reported from, shortened to the file
/// name.
///
/// Displays as `file:line: `, ready to be prepended to a message.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct CallerLocation {
    /// The final path segment of the source file.
    pub file: &'static str,
    /// The line number of the call.
    pub line: u32,
}

impl CallerLocation {
    /// Captures the location of the caller.
    ///
    /// Inside a `#[track_caller]` function this is the location of whoever
    /// called that function.
    #[track_caller]
    #[must_use]
    pub fn caller() -> Self {
        Self::from_location(Location::caller())
    }

    /// Shortens a [`Location`] to its file name and line.
    #[must_use]
    pub fn from_location(location: &'static Location<'static>) -> Self {
        Self {
            file: file_name(location.file()),
            line: location.line(),
        }
    }
}

impl fmt::Display for CallerLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: ", self.file, self.line)
    }
}

/// Strips every directory component, for either separator style.
fn file_name(path: &str) -> &str {
    match path.rfind(['/', '\\']) {
        Some(index) => &path[index + 1..],
        None => path,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_name_trimming() {
        assert_eq!(file_name("src/policy.rs"), "policy.rs");
        assert_eq!(file_name("/home/user/project/src/main.rs"), "main.rs");
        assert_eq!(file_name(r"C:\project\src\lib.rs"), "lib.rs");
        assert_eq!(file_name("lib.rs"), "lib.rs");
        assert_eq!(file_name("trailing/"), "");
    }

    #[track_caller]
    fn reported_from() -> CallerLocation {
        CallerLocation::caller()
    }

    #[test]
    fn test_caller_is_tracked_through_wrappers() {
        let line = line!() + 1;
        let location = reported_from();
        assert_eq!(location.file, "location.rs");
        assert_eq!(location.line, line);
        assert_eq!(location.to_string(), format!("location.rs:{line}: "));
    }
}
