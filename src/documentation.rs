//! Errors that carry developer notes instead of failures.
//!
//! A [`DocumentationError`] marks a code path as incomplete, deprecated or
//! otherwise worth a note during development. It is reported through
//! [`Policy::warn`](crate::Policy::warn) like any other error, so the same
//! sink and panic-on-warn settings apply.
//!
//! ```rust
//! use errpolicy::{Config, sink::MemorySink};
//!
//! let buffer = MemorySink::new();
//! let policy = Config::new().sink(buffer.clone()).show_location(false).build();
//!
//! policy.todo("support compressed archives");
//! assert_eq!(buffer.contents(), "TODO: support compressed archives\n");
//! ```

use std::fmt;

/// The kind of note a [`DocumentationError`] carries.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DocumentationKind {
    /// A free-form note about code under active development.
    Issue,
    /// Functionality that is not finished yet.
    Todo,
    /// Code that should no longer be used.
    Deprecated,
}

impl DocumentationKind {
    /// The text placed in front of the message.
    pub const fn prefix(self) -> &'static str {
        match self {
            DocumentationKind::Issue => "",
            DocumentationKind::Todo => "TODO: ",
            DocumentationKind::Deprecated => "Deprecated: ",
        }
    }
}

/// An error whose only purpose is to carry a developer-facing note.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentationError {
    kind: DocumentationKind,
    message: String,
}

impl DocumentationError {
    /// Creates a note of the given kind from anything displayable.
    pub fn new(kind: DocumentationKind, message: impl fmt::Display) -> Self {
        Self {
            kind,
            message: message.to_string(),
        }
    }

    /// Creates a free-form note.
    pub fn issue(message: impl fmt::Display) -> Self {
        Self::new(DocumentationKind::Issue, message)
    }

    /// Creates a note about unfinished functionality.
    pub fn todo(message: impl fmt::Display) -> Self {
        Self::new(DocumentationKind::Todo, message)
    }

    /// Creates a note about deprecated code.
    pub fn deprecated(message: impl fmt::Display) -> Self {
        Self::new(DocumentationKind::Deprecated, message)
    }

    /// Returns the kind of note.
    pub fn kind(&self) -> DocumentationKind {
        self.kind
    }

    /// Returns the message without the kind prefix.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for DocumentationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.prefix(), self.message)
    }
}

impl std::error::Error for DocumentationError {}
