//! Error reporting for the pyts rewriter
//!
//! Every failure is fatal to the current invocation: a pass either succeeds
//! against its structural assumptions or the whole transformation aborts.
//! Errors are categorized and coded so the shell can report them uniformly.
//!
//! ## Error Code Format
//!
//! `PYTSxxx` where:
//! - `000-099`: Structural errors (bracket nesting, generic arity, loop headers)
//! - `100-199`: Assumption violations (input outside the supported subset)

use std::fmt;
use thiserror::Error;

//=============================================================================
// ERROR CATEGORIES
//=============================================================================

/// Error category for classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Malformed structure in the input text (PYTS000-099)
    Structural,
    /// Well-formed input that breaks a documented rewriting assumption (PYTS100-199)
    AssumptionViolation,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorCategory::Structural => write!(f, "structural"),
            ErrorCategory::AssumptionViolation => write!(f, "assumption"),
        }
    }
}

//=============================================================================
// ERROR CODES
//=============================================================================

/// Stable error codes for pyts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    UnmatchedBracket,
    NoBracketFound,
    ArityMismatch,
    MalformedMembership,
    TrailingContent,
    MissingKeywordType,
    MultipleInheritance,
    UnsupportedParameter,
    UnsupportedClassArgument,
    UnsupportedElse,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::UnmatchedBracket => "PYTS001",
            ErrorCode::NoBracketFound => "PYTS002",
            ErrorCode::ArityMismatch => "PYTS003",
            ErrorCode::MalformedMembership => "PYTS004",
            ErrorCode::TrailingContent => "PYTS101",
            ErrorCode::MissingKeywordType => "PYTS102",
            ErrorCode::MultipleInheritance => "PYTS103",
            ErrorCode::UnsupportedParameter => "PYTS104",
            ErrorCode::UnsupportedClassArgument => "PYTS105",
            ErrorCode::UnsupportedElse => "PYTS106",
        }
    }

    pub fn category(&self) -> ErrorCategory {
        match self {
            ErrorCode::UnmatchedBracket
            | ErrorCode::NoBracketFound
            | ErrorCode::ArityMismatch
            | ErrorCode::MalformedMembership => ErrorCategory::Structural,
            ErrorCode::TrailingContent
            | ErrorCode::MissingKeywordType
            | ErrorCode::MultipleInheritance
            | ErrorCode::UnsupportedParameter
            | ErrorCode::UnsupportedClassArgument
            | ErrorCode::UnsupportedElse => ErrorCategory::AssumptionViolation,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//=============================================================================
// TRANSPILE ERROR
//=============================================================================

/// Fatal error raised by any rewriting pass
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TranspileError {
    #[error("unmatched opening bracket at byte {index} in `{text}`")]
    UnmatchedBracket { text: String, index: usize },

    #[error("no opening bracket found in `{text}`")]
    NoBracketFound { text: String },

    #[error("closing bracket is not the final character of `{text}`")]
    TrailingContent { text: String },

    #[error("`{construct}` expects {expected} type argument(s), got {found} in `{text}`")]
    ArityMismatch {
        construct: &'static str,
        expected: usize,
        found: usize,
        text: String,
    },

    #[error("loop header `{condition}` must split into exactly two parts at ` in `, got {parts}")]
    MalformedMembership { condition: String, parts: usize },

    #[error("keyword-only parameter `{name}` has no type annotation")]
    MissingKeywordType { name: String },

    #[error("class `{class}` lists several base classes ({bases}); only single inheritance is supported")]
    MultipleInheritance { class: String, bases: String },

    #[error("parameter `{param}` has no equivalent in the target signature")]
    UnsupportedParameter { param: String },

    #[error("class `{class}` passes keyword argument `{argument}` in its header")]
    UnsupportedClassArgument { class: String, argument: String },

    #[error("`else` after a `{after}` block has no equivalent in the target")]
    UnsupportedElse { after: String },
}

impl TranspileError {
    pub fn code(&self) -> ErrorCode {
        match self {
            TranspileError::UnmatchedBracket { .. } => ErrorCode::UnmatchedBracket,
            TranspileError::NoBracketFound { .. } => ErrorCode::NoBracketFound,
            TranspileError::TrailingContent { .. } => ErrorCode::TrailingContent,
            TranspileError::ArityMismatch { .. } => ErrorCode::ArityMismatch,
            TranspileError::MalformedMembership { .. } => ErrorCode::MalformedMembership,
            TranspileError::MissingKeywordType { .. } => ErrorCode::MissingKeywordType,
            TranspileError::MultipleInheritance { .. } => ErrorCode::MultipleInheritance,
            TranspileError::UnsupportedParameter { .. } => ErrorCode::UnsupportedParameter,
            TranspileError::UnsupportedClassArgument { .. } => {
                ErrorCode::UnsupportedClassArgument
            }
            TranspileError::UnsupportedElse { .. } => ErrorCode::UnsupportedElse,
        }
    }

    pub fn category(&self) -> ErrorCategory {
        self.code().category()
    }

    /// One-line report: `error[PYTS003][structural]: ...`
    pub fn report(&self) -> String {
        format!("error[{}][{}]: {}", self.code(), self.category(), self)
    }
}

pub type Result<T> = std::result::Result<T, TranspileError>;
