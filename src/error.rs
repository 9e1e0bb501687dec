//! Error types for the component compiler.
//!
//! Every user-input error is attributed to the component file it came from
//! (and the source line when the tokenizer reported one). Errors abort the
//! whole run; nothing is downgraded to a warning.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CompileError>;

/// Why a ref identifier was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisallowedReason {
    Keyword,
    Internal,
    NotIdentifier,
}

impl fmt::Display for DisallowedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisallowedReason::Keyword => f.write_str("TypeScript keyword"),
            DisallowedReason::Internal => f.write_str("reserved for internal use"),
            DisallowedReason::NotIdentifier => f.write_str("not an identifier"),
        }
    }
}

/// `path:line` prefix used by every attributable error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: PathBuf,
    pub line: Option<u64>,
}

impl Location {
    pub fn new(path: impl Into<PathBuf>, line: Option<u64>) -> Self {
        Self {
            path: path.into(),
            line,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "{}:{}", self.path.display(), line),
            None => write!(f, "{}", self.path.display()),
        }
    }
}

#[derive(Debug, Error)]
pub enum CompileError {
    #[error("{at}: cycle in include paths ({})", .cycle.join(" -> "))]
    IncludeCycle { at: Location, cycle: Vec<String> },

    #[error("{at}: missing required \"path\" attribute in <include>")]
    MissingPathAttribute { at: Location },

    #[error("{at}: <include> specifies invalid attribute {attribute:?}")]
    InvalidIncludeAttribute { at: Location, attribute: String },

    #[error("{at}: ref name {name:?} disallowed ({reason})")]
    DisallowedRefName {
        at: Location,
        name: String,
        reason: DisallowedReason,
    },

    #[error("{at}: ref name {name:?} present multiple times (previous occurrence in <{previous_tag}>)")]
    DuplicateRefName {
        at: Location,
        name: String,
        previous_tag: String,
    },

    #[error("{at}: cannot find <style> text")]
    MissingStyleBody { at: Location },

    #[error("{}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{at}: {message}")]
    Tokenizer { at: Location, message: String },

    #[error("{at}: unexpected </{tag}> with no open element")]
    UnexpectedEndTag { at: Location, tag: String },

    #[error("{at}: </{found}> does not close <{expected}>")]
    MismatchedEndTag {
        at: Location,
        expected: String,
        found: String,
    },

    #[error("{at}: <{tag}> is never closed")]
    UnclosedElement { at: Location, tag: String },

    #[error("{at}: <include> cannot have content")]
    ContentInsideInclude { at: Location },

    #[error("{at}: component name {name:?} is not a valid identifier")]
    InvalidComponentName { at: Location, name: String },

    #[error("package name {name:?} is not a valid identifier")]
    InvalidPackageName { name: String },

    /// The generator produced source the formatter could not parse. This is a
    /// compiler defect, never a problem with the input.
    #[error("internal error: generated source failed to format: {}", .diagnostics.join("; "))]
    Formatter { diagnostics: Vec<String> },
}

impl CompileError {
    pub fn code(&self) -> &'static str {
        match self {
            CompileError::IncludeCycle { .. } => "VF-ERR-INCLUDE-CYCLE",
            CompileError::MissingPathAttribute { .. } => "VF-ERR-INCLUDE-PATH",
            CompileError::InvalidIncludeAttribute { .. } => "VF-ERR-INCLUDE-ATTR",
            CompileError::DisallowedRefName { .. } => "VF-ERR-REF-DISALLOWED",
            CompileError::DuplicateRefName { .. } => "VF-ERR-REF-DUPLICATE",
            CompileError::MissingStyleBody { .. } => "VF-ERR-STYLE-BODY",
            CompileError::FileOpen { .. } => "VF-ERR-IO",
            CompileError::Tokenizer { .. } => "VF-ERR-TOKENIZER",
            CompileError::UnexpectedEndTag { .. } => "VF-ERR-END-TAG",
            CompileError::MismatchedEndTag { .. } => "VF-ERR-END-TAG-MISMATCH",
            CompileError::UnclosedElement { .. } => "VF-ERR-UNCLOSED",
            CompileError::ContentInsideInclude { .. } => "VF-ERR-INCLUDE-CONTENT",
            CompileError::InvalidComponentName { .. } => "VF-ERR-COMPONENT-NAME",
            CompileError::InvalidPackageName { .. } => "VF-ERR-PACKAGE-NAME",
            CompileError::Formatter { .. } => "VF-INTERNAL-FORMAT",
        }
    }

    /// True for errors caused by the compiler itself rather than its input.
    pub fn is_internal(&self) -> bool {
        matches!(self, CompileError::Formatter { .. })
    }
}
