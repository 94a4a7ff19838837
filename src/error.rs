//! Error channels.
//!
//! A value failing to conform is a [`MatchError`]: expected, recoverable, and
//! always located by a path. A malformed pattern is a [`BadPatternError`]: a
//! programmer fault that is never path-annotated or reformatted. Faults raised
//! by user predicates travel as `anyhow::Error` and are never swallowed.
use thiserror::Error;

use crate::pattern::Pattern;
use crate::value::Value;

/// A value did not match its pattern.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Match error: {message}")]
pub struct MatchError {
    pub message: String,
    /// Location of the offending sub-value, e.g. `vals[3].entity.created`.
    /// Empty when the top-level value itself failed.
    pub path: String,
}

impl MatchError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into(), path: String::new() }
    }
}

/// The pattern itself is malformed.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum BadPatternError {
    #[error("Bad pattern: OneOf requires at least one choice")]
    EmptyOneOf,
    #[error("Bad pattern: arrays must have one type in them, found {len}")]
    ArrayPatternArity { len: usize },
    #[error("Bad pattern: unknown pattern type {found}")]
    UnknownPattern { found: String },
}

/// What a `Where` predicate may raise instead of answering.
#[derive(Error, Debug)]
pub enum PredicateError {
    /// Fail the match with a custom message. Takes priority over the generic
    /// `Where` mismatch.
    #[error(transparent)]
    Mismatch(#[from] MatchError),
    /// A genuine fault. Aborts `OneOf` backtracking and escapes `test`.
    #[error(transparent)]
    Fault(#[from] anyhow::Error),
}

/// Everything `check` can report.
#[derive(Error, Debug)]
pub enum CheckError {
    #[error(transparent)]
    Match(#[from] MatchError),
    #[error(transparent)]
    BadPattern(#[from] BadPatternError),
    #[error(transparent)]
    Fault(anyhow::Error),
}

impl CheckError {
    pub fn is_match_error(&self) -> bool {
        matches!(self, CheckError::Match(_))
    }

    pub fn as_match_error(&self) -> Option<&MatchError> {
        match self {
            CheckError::Match(e) => Some(e),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Did not check() all arguments during {description}")]
pub struct UncheckedArgumentsError {
    pub description: String,
}

// ————————————————————————————————————————————————————————————————————————————
// INTERNAL FAILURE ACCUMULATOR
// ————————————————————————————————————————————————————————————————————————————

/// How a mismatch will be described once it reaches the outer boundary.
#[derive(Debug)]
pub(crate) enum Detail<'p, 'v> {
    /// Unformatted: rendered from the pattern (and value, if retained) only if
    /// somebody actually asks for a message.
    Raw { pattern: &'p Pattern, value: Option<&'v Value> },
    /// Already a message (unknown/missing key, predicate-raised).
    Message(String),
}

#[derive(Debug)]
pub(crate) struct Mismatch<'p, 'v> {
    pub path: String,
    pub detail: Detail<'p, 'v>,
}

impl<'p, 'v> Mismatch<'p, 'v> {
    pub fn raw(pattern: &'p Pattern, value: &'v Value) -> Self {
        Self { path: String::new(), detail: Detail::Raw { pattern, value: Some(value) } }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self { path: String::new(), detail: Detail::Message(message.into()) }
    }
}

/// Result channel of the recursive matcher.
#[derive(Debug)]
pub(crate) enum Failure<'p, 'v> {
    Mismatch(Mismatch<'p, 'v>),
    BadPattern(BadPatternError),
    Fault(anyhow::Error),
}

impl<'p, 'v> Failure<'p, 'v> {
    pub fn raw(pattern: &'p Pattern, value: &'v Value) -> Self {
        Failure::Mismatch(Mismatch::raw(pattern, value))
    }

    pub fn message(message: impl Into<String>) -> Self {
        Failure::Mismatch(Mismatch::message(message))
    }

    /// Prepends one key/index segment as the failure unwinds through it.
    /// Only mismatches carry a path; other failures pass through untouched.
    pub fn under(self, key: crate::path::Key<'_>) -> Self {
        match self {
            Failure::Mismatch(mut m) => {
                m.path = crate::path::prepend_path(key, &m.path);
                Failure::Mismatch(m)
            }
            other => other,
        }
    }
}

impl From<BadPatternError> for Failure<'_, '_> {
    fn from(e: BadPatternError) -> Self {
        Failure::BadPattern(e)
    }
}

impl From<PredicateError> for Failure<'_, '_> {
    fn from(e: PredicateError) -> Self {
        match e {
            PredicateError::Mismatch(m) => Failure::Mismatch(Mismatch {
                path: m.path,
                detail: Detail::Message(m.message),
            }),
            PredicateError::Fault(f) => Failure::Fault(f),
        }
    }
}
