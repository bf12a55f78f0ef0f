//! Shallow equality over dynamic values.
//!
//! Two values are shallowly equal when they are the same value, or when both
//! are objects with the same own enumerable keys whose values are pairwise
//! the same. A customizer may override the decision for the top-level pair
//! and for every key pair.

pub mod errors;
pub mod context;
pub mod engine;
pub mod functions; // customizer plugins
pub mod json;
pub mod logging;
pub mod value;
mod comparison;

pub use engine::{
    shallow_equal, shallow_equal_by, shallow_equal_in, shallow_equal_with, try_shallow_equal_by,
};

pub use comparison::{same_value, same_value_number};
pub use context::{Bound, CompareOptions};
pub use errors::{EvalError, Result};
pub use functions::{Call, Customizer};
pub use json::{from_json, parse_json};
pub use value::{Function, Object, ObjectKind, PropertyKey, Symbol, Value};
