use crate::comparison::same_value;
use crate::context::Bound;
use crate::functions::Customizer;
use crate::value::Value;
use std::convert::Infallible;
use tracing::trace;

/// =========================
/// Public API
/// =========================

/// Shallow equality with no customizer: identity, or same own enumerable keys
/// holding identical values.
pub fn shallow_equal(a: &Value, b: &Value) -> bool {
    infallible(evaluate(a, b, None::<NoCustomizer>))
}

/// Shallow equality consulting `compare` for the top-level pair (key `None`)
/// and then for each key pair. `None` from `compare` falls back to identity.
pub fn shallow_equal_by<F>(a: &Value, b: &Value, mut compare: F) -> bool
where
    F: FnMut(&Value, &Value, Option<&str>) -> Option<bool>,
{
    infallible(evaluate(
        a,
        b,
        Some(|x: &Value, y: &Value, key: Option<&str>| Ok(compare(x, y, key))),
    ))
}

/// Like [`shallow_equal_by`], for anything implementing [`Customizer`],
/// trait objects included.
pub fn shallow_equal_with<C>(a: &Value, b: &Value, customizer: &mut C) -> bool
where
    C: Customizer + ?Sized,
{
    infallible(evaluate(
        a,
        b,
        Some(|x: &Value, y: &Value, key: Option<&str>| Ok(customizer.customize(x, y, key))),
    ))
}

/// Like [`shallow_equal_by`], with `context` handed to `compare` as its
/// receiver on every call.
pub fn shallow_equal_in<Ctx, F>(a: &Value, b: &Value, compare: F, context: &Ctx) -> bool
where
    Ctx: ?Sized,
    F: FnMut(&Ctx, &Value, &Value, Option<&str>) -> Option<bool>,
{
    shallow_equal_with(a, b, &mut Bound::new(context, compare))
}

/// Fallible customizer: the first `Err` stops the comparison and is returned
/// to the caller as is.
pub fn try_shallow_equal_by<F, E>(a: &Value, b: &Value, compare: F) -> Result<bool, E>
where
    F: FnMut(&Value, &Value, Option<&str>) -> Result<Option<bool>, E>,
{
    evaluate(a, b, Some(compare))
}

/// =========================
/// Internal engine
/// =========================

type NoCustomizer = fn(&Value, &Value, Option<&str>) -> Result<Option<bool>, Infallible>;

fn infallible(result: Result<bool, Infallible>) -> bool {
    match result {
        Ok(equal) => equal,
        Err(never) => match never {},
    }
}

fn evaluate<F, E>(a: &Value, b: &Value, mut compare: Option<F>) -> Result<bool, E>
where
    F: FnMut(&Value, &Value, Option<&str>) -> Result<Option<bool>, E>,
{
    if let Some(f) = compare.as_mut() {
        if let Some(verdict) = f(a, b, None)? {
            trace!(verdict, "customizer ruled on the top-level pair");
            return Ok(verdict);
        }
    }

    if same_value(a, b) {
        return Ok(true);
    }

    let (Value::Object(obj_a), Value::Object(obj_b)) = (a, b) else {
        trace!(left = %a, right = %b, "not both objects");
        return Ok(false);
    };

    // Keys and values are copied out so no borrow is held while the
    // customizer runs.
    let keys_a = obj_a.own_enumerable_keys();
    let len_b = obj_b.own_enumerable_keys().len();
    if keys_a.len() != len_b {
        trace!(left = keys_a.len(), right = len_b, "key counts differ");
        return Ok(false);
    }

    for key in &keys_a {
        if !obj_b.has_own(key) {
            trace!(key = key.as_str(), "key missing on the right");
            return Ok(false);
        }

        let value_a = obj_a.get_own(key).unwrap_or(Value::Null);
        let value_b = obj_b.get_own(key).unwrap_or(Value::Null);

        let verdict = match compare.as_mut() {
            Some(f) => f(&value_a, &value_b, Some(key))?,
            None => None,
        };
        if !verdict.unwrap_or_else(|| same_value(&value_a, &value_b)) {
            trace!(key = key.as_str(), ruled = verdict.is_some(), "values differ");
            return Ok(false);
        }
    }

    Ok(true)
}
