//! Public entry points: `check`, `test`, `customize`.
//!
//! The matcher only produces structured failures. Turning one into a message
//! happens here, exactly once, through the checker's formatting hooks.
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use tracing::debug;

use crate::error::{CheckError, Detail, Failure, MatchError, Mismatch};
use crate::format;
use crate::matcher::check_subtree;
use crate::pattern::Pattern;
use crate::value::Value;

pub type FormatPatternFn = dyn Fn(&Pattern) -> String + Send + Sync;
pub type FormatMismatchFn = dyn Fn(&str, Option<&str>) -> String + Send + Sync;
pub type FormatMismatchForPathFn = dyn Fn(&str, &str, Option<&str>) -> String + Send + Sync;

static DEFAULT_CHECKER: Lazy<Checker> = Lazy::new(Checker::default);

// ————————————————————————————————————————————————————————————————————————————
// OPTIONS
// ————————————————————————————————————————————————————————————————————————————

/// Formatting hooks for [`customize`]. Any hook left unset falls back to the
/// built-in one from [`crate::format`].
#[derive(Clone, Default)]
pub struct CheckOptions {
    format_pattern: Option<Arc<FormatPatternFn>>,
    format_mismatch: Option<Arc<FormatMismatchFn>>,
    format_mismatch_for_path: Option<Arc<FormatMismatchForPathFn>>,
}

impl CheckOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn format_pattern<F>(mut self, f: F) -> Self
    where
        F: Fn(&Pattern) -> String + Send + Sync + 'static,
    {
        self.format_pattern = Some(Arc::new(f));
        self
    }

    pub fn format_mismatch<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, Option<&str>) -> String + Send + Sync + 'static,
    {
        self.format_mismatch = Some(Arc::new(f));
        self
    }

    /// `f(path, expected, actual)`
    pub fn format_mismatch_for_path<F>(mut self, f: F) -> Self
    where
        F: Fn(&str, &str, Option<&str>) -> String + Send + Sync + 'static,
    {
        self.format_mismatch_for_path = Some(Arc::new(f));
        self
    }
}

impl fmt::Debug for CheckOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CheckOptions")
            .field("format_pattern", &self.format_pattern.is_some())
            .field("format_mismatch", &self.format_mismatch.is_some())
            .field("format_mismatch_for_path", &self.format_mismatch_for_path.is_some())
            .finish()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// CHECKER
// ————————————————————————————————————————————————————————————————————————————

/// A `check` bound to a set of formatting hooks. Cheap to clone and safe to
/// share between threads.
#[derive(Clone)]
pub struct Checker {
    format_pattern: Arc<FormatPatternFn>,
    format_mismatch: Arc<FormatMismatchFn>,
    format_mismatch_for_path: Arc<FormatMismatchForPathFn>,
}

/// Builds an independent checker; omitted hooks use the built-in formatters.
pub fn customize(options: CheckOptions) -> Checker {
    Checker {
        format_pattern: match options.format_pattern {
            Some(f) => f,
            None => Arc::new(format::format_pattern),
        },
        format_mismatch: match options.format_mismatch {
            Some(f) => f,
            None => Arc::new(format::format_mismatch),
        },
        format_mismatch_for_path: match options.format_mismatch_for_path {
            Some(f) => f,
            None => Arc::new(format::format_mismatch_for_path),
        },
    }
}

impl Default for Checker {
    fn default() -> Self {
        customize(CheckOptions::default())
    }
}

impl fmt::Debug for Checker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checker").finish_non_exhaustive()
    }
}

impl Checker {
    /// `Ok(())` if `value` matches; otherwise a formatted [`MatchError`], or
    /// the bad-pattern / predicate fault unchanged.
    pub fn check(&self, value: &Value, pattern: &Pattern) -> Result<(), CheckError> {
        match check_subtree(value, pattern) {
            Ok(()) => Ok(()),
            Err(Failure::Mismatch(m)) => {
                let err = self.render(m);
                debug!(path = %err.path, message = %err.message, "value did not match pattern");
                Err(CheckError::Match(err))
            }
            Err(Failure::BadPattern(e)) => Err(CheckError::BadPattern(e)),
            Err(Failure::Fault(e)) => Err(CheckError::Fault(e)),
        }
    }

    /// Predicate form: never builds a message. Bad patterns and predicate
    /// faults are still errors.
    pub fn test(&self, value: &Value, pattern: &Pattern) -> Result<bool, CheckError> {
        match check_subtree(value, pattern) {
            Ok(()) => Ok(true),
            Err(Failure::Mismatch(_)) => Ok(false),
            Err(Failure::BadPattern(e)) => Err(CheckError::BadPattern(e)),
            Err(Failure::Fault(e)) => Err(CheckError::Fault(e)),
        }
    }

    /// Consumes the raw `(pattern, value)` pair into the final message.
    fn render(&self, m: Mismatch<'_, '_>) -> MatchError {
        let Mismatch { path, detail } = m;
        let message = match detail {
            Detail::Raw { pattern, value } => {
                let expected = (self.format_pattern)(pattern);
                let actual = value.map(format::describe_value);
                if path.is_empty() {
                    (self.format_mismatch)(&expected, actual.as_deref())
                } else {
                    (self.format_mismatch_for_path)(&path, &expected, actual.as_deref())
                }
            }
            Detail::Message(message) if path.is_empty() => message,
            Detail::Message(message) => format!("{message} in field {path}"),
        };
        MatchError { message, path }
    }
}

/// The process-wide checker with built-in formatting.
pub fn default_checker() -> &'static Checker {
    &DEFAULT_CHECKER
}

pub fn check(value: &Value, pattern: &Pattern) -> Result<(), CheckError> {
    DEFAULT_CHECKER.check(value, pattern)
}

pub fn test(value: &Value, pattern: &Pattern) -> Result<bool, CheckError> {
    DEFAULT_CHECKER.test(value, pattern)
}

// ------------------------------- Tests ------------------------------------ //
