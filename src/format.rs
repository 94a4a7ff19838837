//! Built-in descriptions of patterns, values and mismatches.
//!
//! These are the defaults behind the three formatting hooks a
//! [`Checker`](crate::Checker) can be customized with.
use std::fmt;

use crate::pattern::{Fields, Pattern};
use crate::value::Value;

pub fn format_pattern(pattern: &Pattern) -> String {
    match pattern {
        Pattern::Any => "any".to_string(),
        Pattern::TypeOf(kind) => kind.name().to_string(),
        Pattern::NullLiteral => "null".to_string(),
        Pattern::Literal(lit) => describe_value(lit),
        Pattern::Integer => "integer".to_string(),
        Pattern::Object => "Object".to_string(),
        Pattern::ArrayOf(element) => format!("Array<{}>", format_pattern(element)),
        Pattern::Sequence(elements) => match elements.as_slice() {
            [element] => format!("Array<{}>", format_pattern(element)),
            _ => format!("[{}]", join(elements.iter().map(format_pattern), ", ")),
        },
        Pattern::Where(w) => w.name().to_string(),
        Pattern::Optional(inner) => format!("?{}", format_pattern(inner)),
        Pattern::Maybe(inner) => format!("Maybe<{}>", format_pattern(inner)),
        Pattern::OneOf(choices) => join(choices.iter().map(format_pattern), " | "),
        Pattern::Constructor(class) => class.name().to_string(),
        Pattern::ObjectIncluding(fields) => {
            let mut out = String::from("{");
            for field in format_fields(fields) {
                out.push_str(&field);
                out.push_str(", ");
            }
            out.push_str("...}");
            out
        }
        Pattern::ObjectWithValues(each) => format!("{{[key: any]: {}}}", format_pattern(each)),
        Pattern::ObjectShape(fields) if fields.is_empty() => "{| |}".to_string(),
        Pattern::ObjectShape(fields) => format!("{{| {} |}}", join(format_fields(fields), ", ")),
    }
}

fn format_fields(fields: &Fields) -> impl Iterator<Item = String> + '_ {
    fields.iter().map(|(k, p)| format!("{k}: {}", format_pattern(p)))
}

fn join(parts: impl Iterator<Item = String>, sep: &str) -> String {
    parts.collect::<Vec<_>>().join(sep)
}

/// Short rendering of an offending value.
pub fn describe_value(value: &Value) -> String {
    match value {
        Value::Undefined => "undefined".to_string(),
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(*n),
        Value::String(_) | Value::Array(_) | Value::Object(_) => to_json(value),
        Value::Arguments(_) => format!("arguments {}", to_json(value)),
        Value::Instance(i) => format!("instance of {}", i.class().name()),
        Value::Function(f) => format!("function {}", f.name),
    }
}

fn to_json(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| "<unprintable>".to_string())
}

fn format_number(n: f64) -> String {
    if n.is_infinite() {
        return if n > 0.0 { "Infinity".to_string() } else { "-Infinity".to_string() };
    }
    // Display already drops the `.0` of integral values and prints NaN
    n.to_string()
}

pub fn format_mismatch(expected: &str, actual: Option<&str>) -> String {
    match actual {
        Some(actual) => format!("Expected {expected}, got {actual}"),
        None => format!("Expected {expected}"),
    }
}

pub fn format_mismatch_for_path(path: &str, expected: &str, actual: Option<&str>) -> String {
    format!("{} in field {path}", format_mismatch(expected, actual))
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_pattern(self))
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::*;
    use crate::value::{Class, Function, Instance};
    use serde_json::json;

    #[test]
    fn renders_every_variant() {
        let user = Class::new("User");
        let cases: Vec<(Pattern, &str)> = vec![
            (Pattern::Any, "any"),
            (Pattern::from(Kind::String), "string"),
            (Pattern::NullLiteral, "null"),
            (Pattern::from("on"), r#""on""#),
            (Pattern::from(3), "3"),
            (Pattern::from(2.5), "2.5"),
            (Pattern::from(true), "true"),
            (Pattern::Integer, "integer"),
            (Pattern::Object, "Object"),
            (array_of(Kind::Number), "Array<number>"),
            (Pattern::from(vec![Pattern::Integer]), "Array<integer>"),
            (where_named("even", |_| true), "even"),
            (optional(Kind::String), "?string"),
            (maybe(Kind::Number), "Maybe<number>"),
            (one_of([Kind::String, Kind::Number]).unwrap(), "string | number"),
            (instance_of(&user), "User"),
            (object_including([("a", Pattern::from(Kind::Number))]), "{a: number, ...}"),
            (object_including(Vec::<(String, Pattern)>::new()), "{...}"),
            (object_with_values(Kind::Number), "{[key: any]: number}"),
            (
                object_shape([("a", Pattern::from(Kind::Number)), ("b", optional(Kind::String))]),
                "{| a: number, b: ?string |}",
            ),
            (object_shape(Vec::<(String, Pattern)>::new()), "{| |}"),
        ];
        for (pattern, expected) in cases {
            assert_eq!(format_pattern(&pattern), expected);
            assert_eq!(pattern.to_string(), expected);
        }
    }

    #[test]
    fn describes_values() {
        let user = Class::new("User");
        assert_eq!(describe_value(&Value::Undefined), "undefined");
        assert_eq!(describe_value(&Value::from(5)), "5");
        assert_eq!(describe_value(&Value::from(5.5)), "5.5");
        assert_eq!(describe_value(&Value::Number(f64::NAN)), "NaN");
        assert_eq!(describe_value(&Value::Number(f64::NEG_INFINITY)), "-Infinity");
        assert_eq!(describe_value(&Value::from("a\"b")), r#""a\"b""#);
        assert_eq!(describe_value(&Value::from(json!({"a": [1, null]}))), r#"{"a":[1,null]}"#);
        assert_eq!(describe_value(&Value::Arguments(vec![Value::from(1)])), "arguments [1]");
        assert_eq!(describe_value(&Value::Instance(Instance::new(&user))), "instance of User");
        assert_eq!(describe_value(&Value::Function(Function::new("cb"))), "function cb");
    }

    #[test]
    fn mismatch_messages() {
        assert_eq!(format_mismatch("number", Some(r#""s""#)), r#"Expected number, got "s""#);
        assert_eq!(format_mismatch("number", None), "Expected number");
        assert_eq!(
            format_mismatch_for_path("a.b", "number", Some("true")),
            "Expected number, got true in field a.b"
        );
    }
}
