//! Runtime structural matching of dynamic values against declarative patterns.
//!
//! Meant for trust boundaries (RPC and function arguments) where static types
//! are missing or not enough:
//!
//! ```ignore
//! use shape_check::{check, object_shape, optional, array_of, Kind, Pattern, Value};
//!
//! let pattern = object_shape([
//!     ("name", Pattern::from(Kind::String)),
//!     ("tags", optional(array_of(Kind::String))),
//! ]);
//! let value = Value::from(serde_json::json!({"name": "a", "tags": ["x", 1]}));
//! let err = check(&value, &pattern).unwrap_err();
//! // Match error: Expected string, got 1 in field tags[1]
//! ```
//!
//! Pipeline: `checker` (public API) → `matcher` (recursive descent producing
//! structured failures, path prepended per frame via `path`) → `format`
//! (message built once, at the outer boundary, through pluggable hooks).
pub mod audit;
pub mod checker;
pub mod error;
pub mod format;
mod matcher;
pub mod path;
pub mod pattern;
pub mod value;

pub use audit::ArgumentChecker;
pub use checker::{check, customize, default_checker, test, CheckOptions, Checker};
pub use error::{BadPatternError, CheckError, MatchError, PredicateError, UncheckedArgumentsError};
pub use pattern::{
    array_of, instance_of, literal, maybe, object_including, object_shape, object_with_values,
    one_of, optional, where_fn, where_named, where_try, Fields, Kind, Pattern, Where,
};
pub use value::{Class, Function, Instance, Map, Value};
