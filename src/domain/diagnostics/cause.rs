// SPDX-License-Identifier: MPL-2.0
//! Failure causes reported by the image pipeline.
//!
//! A [`Cause`] is the error value a pipeline stage hands over together with
//! its event: a [`CauseKind`] used for classification plus the raw message.

use std::fmt;

/// Classification of a pipeline failure.
///
/// Only the kinds that change reporting behavior get their own variant;
/// everything else is carried as [`CauseKind::Other`] with its type name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CauseKind {
    /// The allocator could not satisfy a request.
    OutOfMemory,
    /// A native library or symbol could not be resolved at load time.
    LinkResolution,
    /// Static initialization of a native-backed component failed.
    StaticInit,
    /// The disk cache directory could not be created.
    UnableCreateDir,
    /// A file inside the disk cache could not be created.
    UnableCreateFile,
    /// An argument violated a contract (e.g. an inconsistent comparator).
    IllegalArgument,
    /// Any other failure, identified by its type name.
    Other(String),
}

impl CauseKind {
    /// Short type name used in report headers.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            CauseKind::OutOfMemory => "OutOfMemory",
            CauseKind::LinkResolution => "LinkResolution",
            CauseKind::StaticInit => "StaticInit",
            CauseKind::UnableCreateDir => "UnableCreateDir",
            CauseKind::UnableCreateFile => "UnableCreateFile",
            CauseKind::IllegalArgument => "IllegalArgument",
            CauseKind::Other(name) => name,
        }
    }

    /// True for failures meaning a native capability is absent on this
    /// device. Retrying cannot fix these within the process lifetime.
    #[must_use]
    pub fn is_missing_native_capability(&self) -> bool {
        matches!(self, CauseKind::LinkResolution | CauseKind::StaticInit)
    }

    #[must_use]
    pub fn is_out_of_memory(&self) -> bool {
        matches!(self, CauseKind::OutOfMemory)
    }
}

impl fmt::Display for CauseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// An error value attached to a pipeline event.
///
/// # Example
///
/// ```
/// use sketch_monitor::domain::diagnostics::{Cause, CauseKind};
///
/// let cause = Cause::new(CauseKind::OutOfMemory, "heap exhausted");
/// assert_eq!(cause.to_string(), "OutOfMemory: heap exhausted");
/// assert!(cause.kind().is_out_of_memory());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cause {
    kind: CauseKind,
    message: Option<String>,
}

impl Cause {
    /// Creates a cause with a message.
    #[must_use]
    pub fn new(kind: CauseKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: Some(message.into()),
        }
    }

    /// Creates a cause without a message.
    #[must_use]
    pub fn without_message(kind: CauseKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }

    /// Shorthand for [`CauseKind::Other`].
    #[must_use]
    pub fn other(type_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(CauseKind::Other(type_name.into()), message)
    }

    #[must_use]
    pub fn kind(&self) -> &CauseKind {
        &self.kind
    }

    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.message {
            Some(message) => write!(f, "{}: {}", self.kind, message),
            None => write!(f, "{}", self.kind),
        }
    }
}

impl std::error::Error for Cause {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_native_capability_kinds() {
        assert!(CauseKind::LinkResolution.is_missing_native_capability());
        assert!(CauseKind::StaticInit.is_missing_native_capability());
        assert!(!CauseKind::OutOfMemory.is_missing_native_capability());
        assert!(!CauseKind::Other("IoError".into()).is_missing_native_capability());
    }

    #[test]
    fn other_kind_uses_its_type_name() {
        let kind = CauseKind::Other("DecodeError".into());
        assert_eq!(kind.name(), "DecodeError");
        assert_eq!(kind.to_string(), "DecodeError");
    }

    #[test]
    fn display_without_message_is_kind_only() {
        let cause = Cause::without_message(CauseKind::IllegalArgument);
        assert_eq!(cause.to_string(), "IllegalArgument");
        assert!(cause.message().is_none());
    }

    #[test]
    fn other_shorthand_builds_other_kind() {
        let cause = Cause::other("IoError", "disk full");
        assert_eq!(cause.kind(), &CauseKind::Other("IoError".into()));
        assert_eq!(cause.message(), Some("disk full"));
    }

    #[test]
    fn cause_is_a_std_error() {
        let cause = Cause::new(CauseKind::UnableCreateDir, "read-only fs");
        let err: &dyn std::error::Error = &cause;
        assert_eq!(err.to_string(), "UnableCreateDir: read-only fs");
    }
}
