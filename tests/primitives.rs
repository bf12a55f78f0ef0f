use shallowequal::{shallow_equal, Function, Object, Symbol, Value};

fn eq(a: impl Into<Value>, b: impl Into<Value>) -> bool {
    shallow_equal(&a.into(), &b.into())
}

#[test]
fn test_identical_primitives() {
    assert!(eq("hello", "hello"));
    assert!(eq("", ""));
    assert!(eq(42, 42));
    assert!(eq(0, 0));
    assert!(eq(-1, -1));
    assert!(eq(3.14, 3.14));
    assert!(eq(true, true));
    assert!(eq(false, false));
    assert!(shallow_equal(&Value::BigInt(9007199254740991), &Value::BigInt(9007199254740991)));
}

#[test]
fn test_different_primitives() {
    assert!(!eq("hello", "world"));
    assert!(!eq("hello", "Hello"));
    assert!(!eq(1, 2));
    assert!(!eq(0, 1));
    assert!(!eq(true, false));
    assert!(!shallow_equal(&Value::BigInt(123), &Value::BigInt(456)));
}

#[test]
fn test_nan_and_signed_zero() {
    assert!(eq(f64::NAN, f64::NAN));
    assert!(!eq(0.0, -0.0));
    assert!(!eq(-0.0, 0.0));
    assert!(eq(f64::INFINITY, f64::INFINITY));
    assert!(eq(f64::NEG_INFINITY, f64::NEG_INFINITY));
    assert!(!eq(f64::INFINITY, f64::NEG_INFINITY));
}

#[test]
fn test_symbols_by_identity() {
    let sym = Symbol::new("test");
    assert!(eq(sym.clone(), sym));
    assert!(!eq(Symbol::new("test"), Symbol::new("test")));
}

#[test]
fn test_functions_by_identity() {
    let f = Function::new("f");
    assert!(eq(f.clone(), f));
    // functions never reach the key walk
    assert!(!eq(Function::new("noop"), Function::new("noop")));
}

#[test]
fn test_null_sentinel() {
    assert!(shallow_equal(&Value::Null, &Value::Null));
    assert!(!shallow_equal(&Value::Null, &Object::new().into()));
    assert!(!shallow_equal(&Object::new().into(), &Value::Null));
}

#[test]
fn test_primitive_vs_object() {
    assert!(!eq(1, Object::new()));
    assert!(!eq(Object::new(), 1));
    assert!(!eq("string", Object::new()));
    assert!(!eq(Object::new(), "string"));
}
