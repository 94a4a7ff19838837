use indexmap::IndexMap;

use super::{check_subtree, MatchResult};
use crate::error::Failure;
use crate::path::Key;
use crate::pattern::{Fields, Pattern};
use crate::value::Value;

/// What to do with a key that no field pattern names.
#[derive(Debug, Clone, Copy)]
pub(crate) enum UnknownKeys<'p> {
    Rejected,
    Allowed,
    /// Allowed, but its value must match this pattern.
    Checked(&'p Pattern),
}

/// Plain-object shape check shared by every object-like pattern.
///
/// Fields split into required (claimed and removed as they are seen) and
/// optional (checked against their inner pattern, never removed). A required
/// field left unclaimed is reported at this object's path.
pub(crate) fn check_object<'p, 'v>(
    value: &'v Value,
    original: &'p Pattern,
    fields: Option<&'p Fields>,
    unknown: UnknownKeys<'p>,
) -> MatchResult<'p, 'v> {
    let Some(map) = value.as_plain_object() else {
        return Err(Failure::raw(original, value));
    };

    let mut required: IndexMap<&'p str, &'p Pattern> = IndexMap::new();
    let mut optional: IndexMap<&'p str, &'p Pattern> = IndexMap::new();
    for (name, pattern) in fields.into_iter().flatten() {
        match pattern.optional_field_inner() {
            Some(inner) => optional.insert(name.as_str(), inner),
            None => required.insert(name.as_str(), pattern),
        };
    }

    for (key, sub) in map {
        let key = key.as_str();
        let pattern = match required.shift_remove(key) {
            Some(p) => p,
            None => match (optional.get(key), unknown) {
                (Some(p), _) => *p,
                (None, UnknownKeys::Checked(p)) => p,
                (None, UnknownKeys::Allowed) => continue,
                (None, UnknownKeys::Rejected) => {
                    return Err(Failure::message("Unknown key").under(Key::Name(key)));
                }
            },
        };
        check_subtree(sub, pattern).map_err(|f| f.under(Key::Name(key)))?;
    }

    if let Some((name, _)) = required.first() {
        return Err(Failure::message(format!("Missing key '{name}'")));
    }
    Ok(())
}
