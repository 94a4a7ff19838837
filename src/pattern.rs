//! Pattern descriptors.
//!
//! A closed sum type: the matcher dispatches on the variant tag, never on
//! identity comparison against sentinel values. Patterns are immutable once
//! built and cheap to share (`Clone + Send + Sync`), so one pattern may back
//! any number of concurrent checks.
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;

use crate::error::{BadPatternError, PredicateError};
use crate::value::{Class, Value};

/// Field name → pattern, in declaration order.
pub type Fields = IndexMap<String, Pattern>;

/// Default diagnostic name of an unnamed `Where`.
pub const DEFAULT_WHERE_NAME: &str = "predicate";

#[derive(Debug, Clone)]
pub enum Pattern {
    Any,
    /// Primitive runtime kind; also what the bare kind markers mean.
    TypeOf(Kind),
    NullLiteral,
    /// Only string, number and boolean literals are meaningful.
    Literal(Value),
    /// Signed 32-bit integral number.
    Integer,
    /// "any object" marker: `ObjectIncluding({})`.
    Object,
    ArrayOf(Box<Pattern>),
    /// Sequence literal used as a pattern; legal only with exactly one element.
    Sequence(Vec<Pattern>),
    Where(Where),
    /// `OneOf(undefined, inner)`; as an object field, the key may be absent.
    Optional(Box<Pattern>),
    /// `OneOf(undefined, null, inner)`; as an object field, the key may be absent.
    Maybe(Box<Pattern>),
    OneOf(Vec<Pattern>),
    Constructor(Arc<Class>),
    ObjectIncluding(Fields),
    ObjectWithValues(Box<Pattern>),
    ObjectShape(Fields),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    String,
    Number,
    Boolean,
    Undefined,
    Function,
}

impl Kind {
    pub fn name(self) -> &'static str {
        match self {
            Kind::String => "string",
            Kind::Number => "number",
            Kind::Boolean => "boolean",
            Kind::Undefined => "undefined",
            Kind::Function => "function",
        }
    }

    /// Exact runtime kind of `value`, if it is one of the primitive kinds.
    pub fn of(value: &Value) -> Option<Kind> {
        match value {
            Value::String(_) => Some(Kind::String),
            Value::Number(_) => Some(Kind::Number),
            Value::Bool(_) => Some(Kind::Boolean),
            Value::Undefined => Some(Kind::Undefined),
            Value::Function(_) => Some(Kind::Function),
            _ => None,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// WHERE
// ————————————————————————————————————————————————————————————————————————————

pub type Predicate = dyn Fn(&Value) -> Result<bool, PredicateError> + Send + Sync;

#[derive(Clone)]
pub struct Where {
    predicate: Arc<Predicate>,
    name: String,
}

impl Where {
    pub fn new<F>(name: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&Value) -> Result<bool, PredicateError> + Send + Sync + 'static,
    {
        Self { predicate: Arc::new(predicate), name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, value: &Value) -> Result<bool, PredicateError> {
        (self.predicate)(value)
    }
}

impl fmt::Debug for Where {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Where").field("name", &self.name).finish_non_exhaustive()
    }
}

// ————————————————————————————————————————————————————————————————————————————
// FACTORIES
// ————————————————————————————————————————————————————————————————————————————

pub fn optional(inner: impl Into<Pattern>) -> Pattern {
    Pattern::Optional(Box::new(inner.into()))
}

pub fn maybe(inner: impl Into<Pattern>) -> Pattern {
    Pattern::Maybe(Box::new(inner.into()))
}

/// Fails with [`BadPatternError::EmptyOneOf`] when given no choices.
pub fn one_of<I>(choices: I) -> Result<Pattern, BadPatternError>
where
    I: IntoIterator,
    I::Item: Into<Pattern>,
{
    let choices: Vec<Pattern> = choices.into_iter().map(Into::into).collect();
    if choices.is_empty() {
        return Err(BadPatternError::EmptyOneOf);
    }
    Ok(Pattern::OneOf(choices))
}

pub fn where_fn<F>(predicate: F) -> Pattern
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    where_named(DEFAULT_WHERE_NAME, predicate)
}

pub fn where_named<F>(name: impl Into<String>, predicate: F) -> Pattern
where
    F: Fn(&Value) -> bool + Send + Sync + 'static,
{
    Pattern::Where(Where::new(name, move |v: &Value| Ok(predicate(v))))
}

/// A predicate that may fail with its own [`MatchError`](crate::MatchError)
/// message, or with a genuine fault.
pub fn where_try<F>(name: Option<&str>, predicate: F) -> Pattern
where
    F: Fn(&Value) -> Result<bool, PredicateError> + Send + Sync + 'static,
{
    Pattern::Where(Where::new(name.unwrap_or(DEFAULT_WHERE_NAME), predicate))
}

pub fn array_of(element: impl Into<Pattern>) -> Pattern {
    Pattern::ArrayOf(Box::new(element.into()))
}

pub fn object_including<I, K>(fields: I) -> Pattern
where
    I: IntoIterator<Item = (K, Pattern)>,
    K: Into<String>,
{
    Pattern::ObjectIncluding(collect_fields(fields))
}

pub fn object_shape<I, K>(fields: I) -> Pattern
where
    I: IntoIterator<Item = (K, Pattern)>,
    K: Into<String>,
{
    Pattern::ObjectShape(collect_fields(fields))
}

pub fn object_with_values(value_pattern: impl Into<Pattern>) -> Pattern {
    Pattern::ObjectWithValues(Box::new(value_pattern.into()))
}

pub fn literal(value: impl Into<Value>) -> Pattern {
    Pattern::Literal(value.into())
}

pub fn instance_of(class: &Arc<Class>) -> Pattern {
    Pattern::Constructor(Arc::clone(class))
}

fn collect_fields<I, K>(fields: I) -> Fields
where
    I: IntoIterator<Item = (K, Pattern)>,
    K: Into<String>,
{
    fields.into_iter().map(|(k, p)| (k.into(), p)).collect()
}

impl Pattern {
    /// For field patterns whose key may be absent: the pattern a present
    /// value must satisfy.
    pub(crate) fn optional_field_inner(&self) -> Option<&Pattern> {
        match self {
            Pattern::Optional(inner) => Some(inner),
            // a present Maybe field may still be null
            Pattern::Maybe(_) => Some(self),
            _ => None,
        }
    }
}

// ————————————————————————————————————————————————————————————————————————————
// SHORTHAND
// ————————————————————————————————————————————————————————————————————————————

impl From<Kind> for Pattern {
    fn from(k: Kind) -> Self { Pattern::TypeOf(k) }
}

impl From<Vec<Pattern>> for Pattern {
    fn from(xs: Vec<Pattern>) -> Self { Pattern::Sequence(xs) }
}

impl From<Fields> for Pattern {
    fn from(fields: Fields) -> Self { Pattern::ObjectShape(fields) }
}

impl From<Arc<Class>> for Pattern {
    fn from(class: Arc<Class>) -> Self { Pattern::Constructor(class) }
}

impl From<&Arc<Class>> for Pattern {
    fn from(class: &Arc<Class>) -> Self { Pattern::Constructor(Arc::clone(class)) }
}

impl From<Where> for Pattern {
    fn from(w: Where) -> Self { Pattern::Where(w) }
}

impl From<&str> for Pattern {
    fn from(s: &str) -> Self { Pattern::Literal(Value::from(s)) }
}

impl From<String> for Pattern {
    fn from(s: String) -> Self { Pattern::Literal(Value::String(s)) }
}

impl From<f64> for Pattern {
    fn from(n: f64) -> Self { Pattern::Literal(Value::Number(n)) }
}

impl From<i32> for Pattern {
    fn from(n: i32) -> Self { Pattern::Literal(Value::from(n)) }
}

impl From<bool> for Pattern {
    fn from(b: bool) -> Self { Pattern::Literal(Value::Bool(b)) }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_of_rejects_empty_choices() {
        let none: Vec<Pattern> = Vec::new();
        assert_eq!(one_of(none).unwrap_err(), BadPatternError::EmptyOneOf);
        assert!(matches!(one_of([Kind::String]).unwrap(), Pattern::OneOf(cs) if cs.len() == 1));
    }

    #[test]
    fn shorthand_conversions() {
        assert!(matches!(Pattern::from(Kind::Number), Pattern::TypeOf(Kind::Number)));
        assert!(matches!(Pattern::from(vec![Pattern::Any]), Pattern::Sequence(xs) if xs.len() == 1));
        assert!(matches!(Pattern::from("ok"), Pattern::Literal(Value::String(s)) if s == "ok"));

        let user = Class::new("User");
        assert!(matches!(Pattern::from(&user), Pattern::Constructor(c) if c.name() == "User"));

        let shape = object_shape([("a", Pattern::from(Kind::Number))]);
        assert!(matches!(shape, Pattern::ObjectShape(f) if f.contains_key("a")));
    }

    #[test]
    fn unnamed_where_gets_default_name() {
        let Pattern::Where(w) = where_fn(|v| v.is_null()) else { panic!("expected Where") };
        assert_eq!(w.name(), DEFAULT_WHERE_NAME);
        assert!(w.call(&Value::Null).unwrap());

        let Pattern::Where(w) = where_try(Some("even"), |_| Ok(false)) else { panic!("expected Where") };
        assert_eq!(w.name(), "even");
    }

    #[test]
    fn patterns_are_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Pattern>();
    }
}
