// SPDX-License-Identifier: MPL-2.0
//! Formatted diagnostic reports.

use thiserror::Error;

use crate::domain::diagnostics::Cause;

/// A formatted, self-contained report and the failure that triggered it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticReport {
    message: String,
    cause: Option<Cause>,
}

impl DiagnosticReport {
    #[must_use]
    pub fn new(message: impl Into<String>, cause: Option<Cause>) -> Self {
        Self {
            message: message.into(),
            cause,
        }
    }

    /// Multi-line message: header first, then one `label: value` per line.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    #[must_use]
    pub fn cause(&self) -> Option<&Cause> {
        self.cause.as_ref()
    }

    /// Header line, i.e. the first line of the message.
    #[must_use]
    pub fn header(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    #[must_use]
    pub fn into_parts(self) -> (String, Option<Cause>) {
        (self.message, self.cause)
    }

    /// Error value for sinks that expect one per report.
    ///
    /// Informational events have no cause; the returned error then stands
    /// on its own with the message as its description.
    #[must_use]
    pub fn into_error(self) -> ReportError {
        ReportError {
            message: self.message,
            cause: self.cause,
        }
    }
}

/// A report wrapped as a [`std::error::Error`], with the pipeline cause as
/// its source.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct ReportError {
    message: String,
    #[source]
    cause: Option<Cause>,
}

impl ReportError {
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error as _;

    use super::*;
    use crate::domain::diagnostics::CauseKind;

    #[test]
    fn header_is_first_line() {
        let report = DiagnosticReport::new("Sketch - X - Y\nexceptionMessage: m", None);
        assert_eq!(report.header(), "Sketch - X - Y");
    }

    #[test]
    fn empty_message_has_empty_header() {
        assert_eq!(DiagnosticReport::new("", None).header(), "");
    }

    #[test]
    fn error_keeps_cause_as_source() {
        let cause = Cause::new(CauseKind::OutOfMemory, "heap exhausted");
        let error = DiagnosticReport::new("Sketch - ProcessImageFailed", Some(cause)).into_error();

        assert_eq!(error.to_string(), "Sketch - ProcessImageFailed");
        let source = error.source().expect("cause is the source");
        assert_eq!(source.to_string(), "OutOfMemory: heap exhausted");
    }

    #[test]
    fn synthesized_error_has_no_source() {
        let error = DiagnosticReport::new("Sketch - InBitmapException", None).into_error();
        assert!(error.source().is_none());
        assert_eq!(error.message(), "Sketch - InBitmapException");
    }

    #[test]
    fn into_parts_returns_both_halves() {
        let cause = Cause::without_message(CauseKind::UnableCreateDir);
        let (message, cause_back) =
            DiagnosticReport::new("m", Some(cause.clone())).into_parts();
        assert_eq!(message, "m");
        assert_eq!(cause_back, Some(cause));
    }
}
