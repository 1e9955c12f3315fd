//! Seqcall Error Handling
//!
//! One error type for every failure the call protocol can report. The argument
//! string that caused a failure travels with the error so `miette` can point at it.

use miette::{Diagnostic, LabeledSpan, NamedSource, SourceSpan};
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

use crate::argument::IndexPolicy;

// ============================================================================
// SOURCE CONTEXT - Error reporting infrastructure
// ============================================================================

/// Names and holds the text an error is reported against: a call argument,
/// a script file, or a config file.
#[derive(Debug, Clone)]
pub struct SourceContext {
    pub name: String,
    pub content: String,
}

impl SourceContext {
    pub fn new(name: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }

    /// The raw call argument as its own source.
    pub fn argument(content: impl Into<String>) -> Self {
        Self::new("argument", content)
    }

    pub fn to_named_source(&self) -> Arc<NamedSource<String>> {
        Arc::new(NamedSource::new(self.name.clone(), self.content.clone()))
    }

    /// Span covering the whole content; zero-length content still gets a caret.
    pub fn full_span(&self) -> SourceSpan {
        SourceSpan::from(0..self.content.len())
    }
}

impl Default for SourceContext {
    fn default() -> Self {
        Self::argument("")
    }
}

/// The single error type.
#[derive(Debug)]
pub struct SeqError {
    /// What went wrong
    pub kind: ErrorKind,
    /// Where it happened
    pub source_info: SourceInfo,
    /// How to help
    pub diagnostic_info: DiagnosticInfo,
}

/// Every failure the crate reports.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ErrorKind {
    // Decode errors - the argument string could not be turned into an operation
    #[error("invalid index '{token}' for length {length} ({policy} policy)")]
    InvalidIndex {
        token: String,
        length: usize,
        policy: IndexPolicy,
    },
    #[error("cannot decode arguments for {operation}: expected {expected}, got {found}")]
    Decode {
        operation: String,
        expected: String,
        found: usize,
    },
    #[error("delimiter must be one character other than a quote or backslash, got '{value}'")]
    InvalidDelimiter { value: String },

    // Container errors - the call reached a container that refused it
    #[error("{type_name} has no member '{member}'")]
    UnknownMember { type_name: String, member: String },
    #[error("{operation} on an empty container")]
    EmptyContainer { operation: String },

    // Session errors
    #[error("unknown container kind '{kind}'")]
    UnknownKind { kind: String },
    #[error("no instance named '{name}'")]
    UnknownInstance { name: String },
    #[error("an instance named '{name}' already exists")]
    DuplicateInstance { name: String },

    // Script errors
    #[error("malformed statement: {message}")]
    Script { message: String },
    #[error("expected {expected}, got {actual}")]
    Assertion { expected: String, actual: String },

    // Environment errors
    #[error("configuration error: {message}")]
    Config { message: String },
    #[error("i/o error: {message}")]
    Io { message: String },
}

/// Where an error was found.
#[derive(Debug, Clone)]
pub struct SourceInfo {
    pub source: Arc<NamedSource<String>>,
    pub primary_span: SourceSpan,
    pub phase: String,
}

/// Diagnostic enhancement data
#[derive(Debug, Clone)]
pub struct DiagnosticInfo {
    pub help: Option<String>,
    pub error_code: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Decode,
    Container,
    Script,
    Environment,
}

impl ErrorKind {
    /// Get the error category for test assertions
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidIndex { .. } | Self::Decode { .. } | Self::InvalidDelimiter { .. } => {
                ErrorCategory::Decode
            }

            Self::UnknownMember { .. }
            | Self::EmptyContainer { .. }
            | Self::UnknownKind { .. }
            | Self::UnknownInstance { .. }
            | Self::DuplicateInstance { .. } => ErrorCategory::Container,

            Self::Script { .. } | Self::Assertion { .. } => ErrorCategory::Script,

            Self::Config { .. } | Self::Io { .. } => ErrorCategory::Environment,
        }
    }

    pub const fn code_suffix(&self) -> &'static str {
        match self {
            Self::InvalidIndex { .. } => "invalid_index",
            Self::Decode { .. } => "decode",
            Self::InvalidDelimiter { .. } => "invalid_delimiter",
            Self::UnknownMember { .. } => "unknown_member",
            Self::EmptyContainer { .. } => "empty_container",
            Self::UnknownKind { .. } => "unknown_kind",
            Self::UnknownInstance { .. } => "unknown_instance",
            Self::DuplicateInstance { .. } => "duplicate_instance",
            Self::Script { .. } => "script",
            Self::Assertion { .. } => "assertion",
            Self::Config { .. } => "config",
            Self::Io { .. } => "io",
        }
    }

    fn default_help(&self) -> Option<String> {
        match self {
            Self::InvalidIndex { policy, length, .. } => Some(match policy {
                IndexPolicy::Element => format!(
                    "use a position in 0..{length}, or a negative offset down to -{length}"
                ),
                IndexPolicy::Position => format!(
                    "use a position in 0..={length}, or a negative offset down to -{length}"
                ),
            }),
            Self::Decode { .. } => {
                Some("separate values with ',' and quote values that contain one".into())
            }
            _ => None,
        }
    }
}

impl SeqError {
    /// Builds an error against `source`, highlighting `span`.
    pub fn new(kind: ErrorKind, source: &SourceContext, span: SourceSpan, phase: &str) -> Self {
        let help = kind.default_help();
        let error_code = format!("seqcall::{}::{}", phase, kind.code_suffix());
        Self {
            kind,
            source_info: SourceInfo {
                source: source.to_named_source(),
                primary_span: span,
                phase: phase.into(),
            },
            diagnostic_info: DiagnosticInfo { help, error_code },
        }
    }

    /// Builds an error reported against a raw call argument.
    pub fn in_argument(kind: ErrorKind, argument: &str) -> Self {
        let source = SourceContext::argument(argument);
        let span = source.full_span();
        Self::new(kind, &source, span, "decode")
    }

    /// Builds an error that has no meaningful source text.
    pub fn unsourced(kind: ErrorKind, phase: &str) -> Self {
        Self::new(kind, &SourceContext::default(), unspanned(), phase)
    }

    pub fn with_help(mut self, help: impl Into<String>) -> Self {
        self.diagnostic_info.help = Some(help.into());
        self
    }

    pub fn category(&self) -> ErrorCategory {
        self.kind.category()
    }

    fn primary_label(&self) -> String {
        match &self.kind {
            ErrorKind::InvalidIndex { .. } => "not a valid index".into(),
            ErrorKind::Decode { .. } => "wrong number of values".into(),
            ErrorKind::InvalidDelimiter { .. } => "invalid delimiter".into(),
            ErrorKind::UnknownMember { .. } => "unknown member".into(),
            ErrorKind::EmptyContainer { .. } => "container is empty".into(),
            ErrorKind::UnknownKind { .. } => "unknown kind".into(),
            ErrorKind::UnknownInstance { .. } => "unknown instance".into(),
            ErrorKind::DuplicateInstance { .. } => "already defined".into(),
            ErrorKind::Script { .. } => "malformed statement".into(),
            ErrorKind::Assertion { .. } => "assertion failed here".into(),
            ErrorKind::Config { .. } => "invalid configuration".into(),
            ErrorKind::Io { .. } => "i/o failure".into(),
        }
    }
}

impl std::error::Error for SeqError {}

impl fmt::Display for SeqError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.kind, f)
    }
}

impl Diagnostic for SeqError {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        Some(Box::new(&self.diagnostic_info.error_code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        self.diagnostic_info
            .help
            .as_ref()
            .map(|h| Box::new(h) as Box<dyn fmt::Display>)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        let labels = vec![LabeledSpan::new_with_span(
            Some(self.primary_label()),
            self.source_info.primary_span,
        )];
        Some(Box::new(labels.into_iter()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        Some(&*self.source_info.source)
    }
}

impl From<std::io::Error> for SeqError {
    fn from(e: std::io::Error) -> Self {
        SeqError::unsourced(
            ErrorKind::Io {
                message: e.to_string(),
            },
            "io",
        )
    }
}

/// Context-aware error creation: anything that owns source text can report
/// errors against it.
pub trait ErrorReporting {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> SeqError;

    fn script_error(&self, message: &str, span: SourceSpan) -> SeqError {
        self.report(
            ErrorKind::Script {
                message: message.into(),
            },
            span,
        )
    }

    fn assertion_failure(&self, expected: &str, actual: &str, span: SourceSpan) -> SeqError {
        self.report(
            ErrorKind::Assertion {
                expected: expected.into(),
                actual: actual.into(),
            },
            span,
        )
    }
}

/// Reports errors against one named source during one phase.
pub struct ReportingContext {
    pub source: SourceContext,
    pub phase: String,
}

impl ReportingContext {
    pub fn new(source: SourceContext, phase: impl Into<String>) -> Self {
        Self {
            source,
            phase: phase.into(),
        }
    }
}

impl ErrorReporting for ReportingContext {
    fn report(&self, kind: ErrorKind, span: SourceSpan) -> SeqError {
        SeqError::new(kind, &self.source, span, &self.phase)
    }
}

/// Placeholder span for errors not tied to a source location.
pub fn unspanned() -> SourceSpan {
    SourceSpan::from(0..0)
}

/// Prints a SeqError with full miette diagnostics.
pub fn print_error(error: SeqError) {
    use miette::Report;
    let report = Report::new(error);
    eprintln!("{report:?}");
}
