//! Error adapter for converting SheetcutError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI. Job errors carry
//! the job source and, when known, the span of the offending input, so they
//! are rendered with a source snippet.

use std::{error::Error as _, fmt, ops::Range};

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan, SourceSpan};

use sheetcut::SheetcutError;

/// Adapter for an invalid job file.
pub struct JobAdapter<'a> {
    message: &'a str,
    span: Option<&'a Range<usize>>,
    src: &'a str,
}

impl<'a> JobAdapter<'a> {
    /// Create a new job adapter.
    pub fn new(message: &'a str, span: Option<&'a Range<usize>>, src: &'a str) -> Self {
        Self { message, span, src }
    }
}

impl fmt::Debug for JobAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JobAdapter")
            .field("message", &self.message)
            .field("span", &self.span)
            .finish()
    }
}

impl fmt::Display for JobAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid job: {}", self.message)
    }
}

impl std::error::Error for JobAdapter<'_> {}

impl MietteDiagnostic for JobAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new("sheetcut::job"))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(
            "a job holds a [sheet] table, [[elements]] with unique ids, and optional [[placements]]",
        ))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&self.src as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let span = self.span?;
        let label = LabeledSpan::new_primary_with_span(Some("here".to_string()), span_to_miette(span));
        Some(Box::new(std::iter::once(label)))
    }
}

/// Adapter for [`SheetcutError`] variants without source information.
pub struct ErrorAdapter<'a>(pub &'a SheetcutError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            SheetcutError::Io(_) => "sheetcut::io",
            SheetcutError::Config(_) => "sheetcut::config",
            SheetcutError::Job { .. } => "sheetcut::job",
            SheetcutError::Optimizer(_) => "sheetcut::optimizer",
            SheetcutError::Export(_) => "sheetcut::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            SheetcutError::Optimizer(_) => "check that the optimizer service is running and reachable",
            SheetcutError::Config(_) => "colors accept CSS syntax, e.g. \"#90caf9\" or \"white\"",
            _ => return None,
        };
        Some(Box::new(help))
    }
}

/// A reportable error that can be rendered by miette.
#[derive(Debug)]
pub enum Reportable<'a> {
    /// A job error with its source.
    Job(JobAdapter<'a>),
    /// A simple error without source location.
    Error(ErrorAdapter<'a>),
}

impl fmt::Display for Reportable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reportable::Job(j) => fmt::Display::fmt(j, f),
            Reportable::Error(e) => fmt::Display::fmt(e, f),
        }
    }
}

impl std::error::Error for Reportable<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Reportable::Job(_) => None,
            Reportable::Error(e) => e.source(),
        }
    }
}

impl MietteDiagnostic for Reportable<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Job(j) => j.code(),
            Reportable::Error(e) => e.code(),
        }
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        match self {
            Reportable::Job(j) => j.help(),
            Reportable::Error(e) => e.help(),
        }
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        match self {
            Reportable::Job(j) => j.source_code(),
            Reportable::Error(e) => e.source_code(),
        }
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        match self {
            Reportable::Job(j) => j.labels(),
            Reportable::Error(e) => e.labels(),
        }
    }
}

fn span_to_miette(span: &Range<usize>) -> SourceSpan {
    SourceSpan::new(span.start.into(), span.len())
}

/// Convert a [`SheetcutError`] into a reportable error.
pub fn to_reportable(err: &SheetcutError) -> Reportable<'_> {
    match err {
        SheetcutError::Job { message, span, src } => {
            Reportable::Job(JobAdapter::new(message, span.as_ref(), src))
        }
        _ => Reportable::Error(ErrorAdapter(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_job_error_has_label() {
        let err = SheetcutError::new_job_error("duplicate element id 2", Some(4..10), "id\n  id = 2");

        let reportable = to_reportable(&err);

        assert_eq!(reportable.to_string(), "Invalid job: duplicate element id 2");
        assert_eq!(reportable.code().unwrap().to_string(), "sheetcut::job");
        let labels: Vec<_> = reportable.labels().unwrap().collect();
        assert_eq!(labels.len(), 1);
        assert_eq!(labels[0].offset(), 4);
        assert_eq!(labels[0].len(), 6);
        assert!(labels[0].primary());
    }

    #[test]
    fn test_job_error_without_span_has_no_labels() {
        let err = SheetcutError::new_job_error("bad", None, "");

        assert!(to_reportable(&err).labels().is_none());
    }

    #[test]
    fn test_non_job_error() {
        let err = SheetcutError::Optimizer("Optimization failed".to_string());

        match to_reportable(&err) {
            Reportable::Error(e) => {
                assert_eq!(e.to_string(), "Optimizer error: Optimization failed");
                assert_eq!(e.code().unwrap().to_string(), "sheetcut::optimizer");
                assert!(e.help().is_some());
            }
            Reportable::Job(_) => panic!("Expected Error"),
        }
    }
}
