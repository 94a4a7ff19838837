//! Human-readable locations such as `vals[3].entity.created`.
//!
//! Paths are built outside-in: the innermost frame fails with an empty path
//! and every enclosing frame that descended through a key or index prepends
//! its segment while the failure unwinds.
use once_cell::sync::Lazy;
use regex::Regex;

static IDENTIFIER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_$][A-Za-z0-9_$]*$").expect("identifier regex is valid")
});

static NUMERIC: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("numeric regex is valid"));

/// Words that cannot appear as a bare dotted segment.
const RESERVED_WORDS: &[&str] = &[
    "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "enum", "export", "extends", "false",
    "finally", "for", "function", "if", "implements", "import", "in",
    "instanceof", "interface", "let", "new", "null", "package", "private",
    "protected", "public", "return", "static", "super", "switch", "this",
    "throw", "true", "try", "typeof", "var", "void", "while", "with", "yield",
];

/// One step of descent: an array position or an object key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key<'a> {
    Index(usize),
    Name(&'a str),
}

impl From<usize> for Key<'_> {
    fn from(i: usize) -> Self {
        Key::Index(i)
    }
}

impl<'a> From<&'a str> for Key<'a> {
    fn from(s: &'a str) -> Self {
        Key::Name(s)
    }
}

pub fn is_reserved_word(s: &str) -> bool {
    RESERVED_WORDS.contains(&s)
}

pub fn is_identifier(s: &str) -> bool {
    IDENTIFIER.is_match(s)
}

/// Renders a single segment on its own: `[3]`, `["do"]`, `name`.
pub fn render_key(key: Key<'_>) -> String {
    match key {
        Key::Index(i) => format!("[{i}]"),
        Key::Name(s) if NUMERIC.is_match(s) => format!("[{s}]"),
        Key::Name(s) if !is_identifier(s) || is_reserved_word(s) => {
            // serde_json gives us a properly escaped, double-quoted literal
            let quoted = serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\""));
            format!("[{quoted}]")
        }
        Key::Name(s) => s.to_string(),
    }
}

/// Prepends `key` to an already-built path. Bracketed tails are concatenated
/// directly; anything else is joined with a dot.
pub fn prepend_path<'a>(key: impl Into<Key<'a>>, base: &str) -> String {
    let segment = render_key(key.into());
    if !base.is_empty() && !base.starts_with('[') {
        format!("{segment}.{base}")
    } else {
        format!("{segment}{base}")
    }
}

// ------------------------------- Tests ------------------------------------ //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn segment_rendering() {
        assert_eq!(render_key(Key::Name("name")), "name");
        assert_eq!(render_key(Key::Name("3")), "[3]");
        assert_eq!(render_key(Key::Index(7)), "[7]");
        assert_eq!(render_key(Key::Name("do")), r#"["do"]"#);
        assert_eq!(render_key(Key::Name("foo-bar")), r#"["foo-bar"]"#);
        assert_eq!(render_key(Key::Name("")), r#"[""]"#);
        assert_eq!(render_key(Key::Name("say \"hi\"")), r#"["say \"hi\""]"#);
        assert_eq!(render_key(Key::Name("$id")), "$id");
    }

    #[test]
    fn builds_paths_outside_in() {
        // innermost first, the way a failure unwinds
        let p = prepend_path("created", "");
        let p = prepend_path("entity", &p);
        let p = prepend_path(3usize, &p);
        let p = prepend_path("vals", &p);
        assert_eq!(p, "vals[3].entity.created");
    }

    #[test]
    fn bracketed_heads_join_without_dot() {
        assert_eq!(prepend_path("a", "[0]"), "a[0]");
        assert_eq!(prepend_path(0usize, "a"), "[0].a");
        assert_eq!(prepend_path("class", "x"), r#"["class"].x"#);
        assert_eq!(prepend_path("outer", r#"["do"]"#), r#"outer["do"]"#);
    }
}
