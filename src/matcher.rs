//! Recursive structural matcher.
//!
//! Walks a value and a pattern together in a single pass. Success returns
//! nothing; failure returns a [`Failure`] that still holds the raw
//! `(pattern, value)` pair, so no message text is built for mismatches that a
//! `OneOf` backtracks over or that `test` throws away.
//!
//! Rules are tried in a fixed order and the first applicable one wins. The
//! order is part of the contract, so the arms below are kept in it.
pub mod array;
pub mod object;

use tracing::{trace, warn};

use crate::error::{BadPatternError, Failure};
use crate::pattern::{Kind, Pattern};
use crate::value::Value;

use object::UnknownKeys;

// ------------------------------- Policy ---------------------------------- //

/// Numbers accepted by `Integer` must be integral and inside this range.
const INT32_MIN: f64 = -2_147_483_648.0;
const INT32_MAX: f64 = 2_147_483_647.0;

static UNDEFINED: Pattern = Pattern::TypeOf(Kind::Undefined);
static NULL: Pattern = Pattern::NullLiteral;

pub(crate) type MatchResult<'p, 'v> = Result<(), Failure<'p, 'v>>;

// ------------------------------- Dispatch -------------------------------- //

pub(crate) fn check_subtree<'p, 'v>(value: &'v Value, pattern: &'p Pattern) -> MatchResult<'p, 'v> {
    match pattern {
        Pattern::Any => Ok(()),

        Pattern::TypeOf(kind) => expect(Kind::of(value) == Some(*kind), pattern, value),

        Pattern::NullLiteral => expect(value.is_null(), pattern, value),

        Pattern::Literal(lit) => check_literal(value, lit, pattern),

        Pattern::Integer => expect(value.as_f64().is_some_and(is_int32), pattern, value),

        Pattern::Object => object::check_object(value, pattern, None, UnknownKeys::Allowed),

        Pattern::ArrayOf(element) => array::check_array(value, element, pattern),
        Pattern::Sequence(elements) => match elements.as_slice() {
            [element] => array::check_array(value, element, pattern),
            _ => Err(bad_pattern(BadPatternError::ArrayPatternArity { len: elements.len() })),
        },

        // a predicate-raised mismatch or fault propagates as-is
        Pattern::Where(w) => expect(w.call(value)?, pattern, value),

        Pattern::Optional(inner) => check_one_of(value, [&UNDEFINED, &**inner], pattern),
        Pattern::Maybe(inner) => check_one_of(value, [&UNDEFINED, &NULL, &**inner], pattern),
        Pattern::OneOf(choices) => {
            if choices.is_empty() {
                return Err(bad_pattern(BadPatternError::EmptyOneOf));
            }
            check_one_of(value, choices, pattern)
        }

        Pattern::Constructor(class) => {
            let is_instance = matches!(value, Value::Instance(i) if i.is_instance_of(class));
            expect(is_instance, pattern, value)
        }

        Pattern::ObjectIncluding(fields) => {
            object::check_object(value, pattern, Some(fields), UnknownKeys::Allowed)
        }
        Pattern::ObjectWithValues(each) => {
            object::check_object(value, pattern, None, UnknownKeys::Checked(each))
        }
        Pattern::ObjectShape(fields) => {
            object::check_object(value, pattern, Some(fields), UnknownKeys::Rejected)
        }
    }
}

// ------------------------------- Helpers --------------------------------- //

fn expect<'p, 'v>(matched: bool, pattern: &'p Pattern, value: &'v Value) -> MatchResult<'p, 'v> {
    if matched { Ok(()) } else { Err(Failure::raw(pattern, value)) }
}

fn bad_pattern<'p, 'v>(err: BadPatternError) -> Failure<'p, 'v> {
    warn!(error = %err, "malformed pattern");
    Failure::BadPattern(err)
}

pub(crate) fn is_int32(n: f64) -> bool {
    n.fract() == 0.0 && (INT32_MIN..=INT32_MAX).contains(&n)
}

/// Strict equality against a string/number/boolean literal. `NaN` never
/// equals itself. Any other literal is not a pattern we know.
fn check_literal<'p, 'v>(value: &'v Value, lit: &'p Value, pattern: &'p Pattern) -> MatchResult<'p, 'v> {
    let matched = match (lit, value) {
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => a == b,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(_) | Value::Number(_) | Value::Bool(_), _) => false,
        (other, _) => {
            return Err(bad_pattern(BadPatternError::UnknownPattern {
                found: format!("literal {}", crate::format::describe_value(other)),
            }));
        }
    };
    expect(matched, pattern, value)
}

/// First matching choice wins. Mismatches are discarded; anything else aborts
/// the search. When every choice fails, the whole `original` is reported.
fn check_one_of<'p, 'v, I>(value: &'v Value, choices: I, original: &'p Pattern) -> MatchResult<'p, 'v>
where
    I: IntoIterator<Item = &'p Pattern>,
{
    for (i, choice) in choices.into_iter().enumerate() {
        match check_subtree(value, choice) {
            Ok(()) => return Ok(()),
            Err(Failure::Mismatch(m)) => {
                trace!(choice = i, path = %m.path, "choice rejected");
            }
            Err(other) => return Err(other),
        }
    }
    Err(Failure::raw(original, value))
}

// ------------------------------- Tests ------------------------------------ //
