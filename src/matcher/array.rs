use super::{check_subtree, MatchResult};
use crate::error::Failure;
use crate::path::Key;
use crate::pattern::Pattern;
use crate::value::Value;

/// Every element of a proper array or argument bundle must match `element`.
/// A failing element gets its index prepended to the path.
pub(crate) fn check_array<'p, 'v>(
    value: &'v Value,
    element: &'p Pattern,
    original: &'p Pattern,
) -> MatchResult<'p, 'v> {
    let Some(items) = value.as_sequence() else {
        return Err(Failure::raw(original, value));
    };
    for (i, item) in items.iter().enumerate() {
        check_subtree(item, element).map_err(|f| f.under(Key::Index(i)))?;
    }
    Ok(())
}
