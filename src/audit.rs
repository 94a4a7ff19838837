//! Bookkeeping for "every RPC argument was validated".
//!
//! Wrap a call's positional arguments in an [`ArgumentChecker`], validate
//! them through it, then ask it whether anything was left unchecked.
use tracing::debug;

use crate::checker::{default_checker, Checker};
use crate::error::{CheckError, UncheckedArgumentsError};
use crate::pattern::Pattern;
use crate::value::Value;

static UNDEFINED: Value = Value::Undefined;

#[derive(Debug)]
pub struct ArgumentChecker<'a> {
    args: &'a [Value],
    checked: Vec<bool>,
    description: String,
    checker: &'a Checker,
}

impl<'a> ArgumentChecker<'a> {
    pub fn new(args: &'a [Value], description: impl Into<String>) -> Self {
        Self::with_checker(args, description, default_checker())
    }

    pub fn with_checker(args: &'a [Value], description: impl Into<String>, checker: &'a Checker) -> Self {
        Self {
            args,
            checked: vec![false; args.len()],
            description: description.into(),
            checker,
        }
    }

    /// Checks one argument. It counts as checked whether or not it matched.
    /// Positions past the end check `undefined`.
    pub fn check(&mut self, index: usize, pattern: &Pattern) -> Result<(), CheckError> {
        if let Some(seen) = self.checked.get_mut(index) {
            *seen = true;
        }
        let value = self.args.get(index).unwrap_or(&UNDEFINED);
        self.checker.check(value, pattern)
    }

    /// Checks the whole bundle at once, e.g. against `[String]`.
    pub fn check_all(&mut self, pattern: &Pattern) -> Result<(), CheckError> {
        self.checked.fill(true);
        let bundle = Value::Arguments(self.args.to_vec());
        self.checker.check(&bundle, pattern)
    }

    pub fn unchecked(&self) -> impl Iterator<Item = usize> + '_ {
        // trailing undefined arguments never need checking
        let meaningful = self.args.iter().rposition(|v| !v.is_undefined()).map_or(0, |i| i + 1);
        (0..meaningful).filter(move |&i| !self.checked[i])
    }

    pub fn throw_unless_all_arguments_have_been_checked(&self) -> Result<(), UncheckedArgumentsError> {
        let missing: Vec<usize> = self.unchecked().collect();
        if missing.is_empty() {
            return Ok(());
        }
        debug!(description = %self.description, unchecked = ?missing, "arguments left unchecked");
        Err(UncheckedArgumentsError { description: self.description.clone() })
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checker::{customize, CheckOptions};
    use crate::pattern::{array_of, optional, Kind};

    fn args() -> Vec<Value> {
        vec![Value::from("id-1"), Value::from(3), Value::Undefined]
    }

    #[test]
    fn all_checked_passes() {
        let args = args();
        let mut audit = ArgumentChecker::new(&args, "method 'rename'");
        audit.check(0, &Pattern::from(Kind::String)).unwrap();
        audit.check(1, &Pattern::Integer).unwrap();
        assert!(audit.throw_unless_all_arguments_have_been_checked().is_ok());
    }

    #[test]
    fn unchecked_argument_is_reported() {
        let args = args();
        let mut audit = ArgumentChecker::new(&args, "method 'rename'");
        audit.check(0, &Pattern::from(Kind::String)).unwrap();
        assert_eq!(audit.unchecked().collect::<Vec<_>>(), [1]);
        let err = audit.throw_unless_all_arguments_have_been_checked().unwrap_err();
        assert_eq!(err.to_string(), "Did not check() all arguments during method 'rename'");
    }

    #[test]
    fn failed_checks_still_count() {
        let args = args();
        let mut audit = ArgumentChecker::new(&args, "m");
        assert!(audit.check(0, &Pattern::Integer).is_err());
        assert!(audit.check(1, &Pattern::Integer).is_ok());
        assert!(audit.check(5, &optional(Kind::String)).is_ok());
        assert!(audit.throw_unless_all_arguments_have_been_checked().is_ok());
    }

    #[test]
    fn check_all_covers_the_bundle() {
        let args = vec![Value::from("a"), Value::from("b")];
        let custom = customize(CheckOptions::new().format_mismatch_for_path(|p, e, _| format!("{p} needs {e}")));
        let mut audit = ArgumentChecker::with_checker(&args, "m", &custom);
        audit.check_all(&array_of(Kind::String)).unwrap();
        assert!(audit.throw_unless_all_arguments_have_been_checked().is_ok());

        let bad = vec![Value::from("a"), Value::from(1)];
        let mut audit = ArgumentChecker::with_checker(&bad, "m", &custom);
        let err = audit.check_all(&array_of(Kind::String)).unwrap_err();
        assert_eq!(err.as_match_error().unwrap().message, "[1] needs string");
    }
}
