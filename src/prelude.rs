//! Commonly used items for convenient importing.
//!
//! ```rust
//! use errpolicy::prelude::*;
//!
//! let policy = Config::new().without_sink().build();
//! assert!(policy.check(None::<DocumentationError>));
//! assert!(!policy.log(Some(DocumentationError::todo("caching"))));
//! ```

pub use crate::{
    Config, DocumentationError, FailureReporter, Outcome, Policy, issue, sink::TextSink,
};
