//! Errors that can end a parse.

use std::fmt;

use serde::Serialize;

/// Where a parse got stuck.
///
/// `furthest` is the largest byte offset at which any primitive was tried
/// and failed. `expected` lists what those primitives wanted there, in the
/// order they were first tried.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Failure {
    pub furthest: usize,
    pub expected: Vec<String>,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.expected.as_slice() {
            [] => write!(f, "unexpected input at byte {}", self.furthest),
            [only] => write!(f, "expected {only} at byte {}", self.furthest),
            [init @ .., last] => write!(
                f,
                "expected {} or {last} at byte {}",
                init.join(", "),
                self.furthest
            ),
        }
    }
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    /// The root rule did not match.
    #[error("no match: {0}")]
    NoMatch(Failure),

    /// The root rule matched a prefix but input remains.
    #[error("input not fully consumed after byte {consumed}: {failure}")]
    Incomplete { consumed: usize, failure: Failure },

    /// Execution fuel exhausted (too many rule applications).
    #[error("parse execution limit exceeded ({0} rule applications)")]
    ExecFuelExhausted(u32),

    /// Rule applications nested deeper than the recursion limit.
    #[error("parse recursion limit exceeded (depth {0})")]
    RecursionLimitExceeded(u32),
}

impl ParseError {
    pub fn failure(&self) -> Option<&Failure> {
        match self {
            ParseError::NoMatch(failure) | ParseError::Incomplete { failure, .. } => Some(failure),
            ParseError::ExecFuelExhausted(_) | ParseError::RecursionLimitExceeded(_) => None,
        }
    }

    /// Furthest byte offset reached, when the parse ran to completion.
    pub fn furthest(&self) -> Option<usize> {
        self.failure().map(|f| f.furthest)
    }
}
