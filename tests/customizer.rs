use pretty_assertions::assert_eq;
use shallowequal::functions::builtins::{Chain, IgnoreKeys, Recorder, Tolerance, Truthy};
use shallowequal::{
    same_value, shallow_equal, shallow_equal_by, shallow_equal_in, shallow_equal_with, Customizer,
    Object, Value,
};

fn obj<const N: usize>(entries: [(&str, Value); N]) -> Value {
    Object::from_entries(entries).into()
}

#[test]
fn test_customizer_arguments_for_mutually_referential_objects() {
    let arry: Value = Object::array([1, 2]).into();
    let object1 = Object::from_entries([("a", arry.clone()), ("b", Value::Null)]);
    let object2 = Object::from_entries([("a", arry), ("b", Value::Null)]);
    object1.set("b", object2.clone());
    object2.set("b", object1.clone());

    let (v1, v2) = (Value::from(object1.clone()), Value::from(object2.clone()));
    let mut recorder = Recorder::new();
    shallow_equal_with(&v1, &v2, &mut recorder);

    let expected = [
        (v1.clone(), v2.clone(), None),
        (object1.get_own("a").unwrap(), object2.get_own("a").unwrap(), Some("a")),
        (object1.get_own("b").unwrap(), object2.get_own("b").unwrap(), Some("b")),
    ];
    assert_eq!(recorder.calls.len(), expected.len());
    for (call, (a, b, key)) in recorder.calls.iter().zip(expected.iter()) {
        assert!(same_value(&call.a, a));
        assert!(same_value(&call.b, b));
        assert_eq!(call.key.as_deref(), *key);
    }

    object1.remove("b");
    object2.remove("b");
}

#[test]
fn test_bound_receiver() {
    let receiver = Object::from_entries([("a", 1), ("b", 1)]);
    let actual = shallow_equal_in(
        &"a".into(),
        &"b".into(),
        |this: &Object, a, b, _| match (a, b) {
            (Value::String(a), Value::String(b)) => {
                let (x, y) = (this.get(a), this.get(b));
                Some(matches!((x, y), (Some(x), Some(y)) if same_value(&x, &y)))
            }
            _ => None,
        },
        &receiver,
    );
    assert!(actual);
}

#[test]
fn test_no_opinion_falls_back_to_identity() {
    let noop = |_: &Value, _: &Value, _: Option<&str>| None;
    assert!(shallow_equal_by(&"a".into(), &"a".into(), noop));
    let arr = || Value::from(Object::array(["a"]));
    assert!(shallow_equal_by(&arr(), &arr(), noop));
    assert!(shallow_equal_by(&obj([("0", "a".into())]), &obj([("0", "a".into())]), noop));
    assert!(!shallow_equal_by(&obj([("0", "a".into())]), &obj([("0", "b".into())]), noop));
}

#[test]
fn test_customizer_true_overrides() {
    let strings_equal = |a: &Value, _: &Value, _: Option<&str>| {
        matches!(a, Value::String(_)).then_some(true)
    };
    assert!(shallow_equal_by(&"a".into(), &"b".into(), strings_equal));
    let arr = |s: &str| Value::from(Object::array([s]));
    assert!(shallow_equal_by(&arr("a"), &arr("b"), strings_equal));
    assert!(shallow_equal_by(&obj([("0", "a".into())]), &obj([("0", "b".into())]), strings_equal));
}

#[test]
fn test_customizer_false_overrides() {
    let strings_differ = |a: &Value, _: &Value, _: Option<&str>| {
        matches!(a, Value::String(_)).then_some(false)
    };
    assert!(!shallow_equal_by(&"a".into(), &"a".into(), strings_differ));
    let arr = || Value::from(Object::array(["a"]));
    assert!(!shallow_equal_by(&arr(), &arr(), strings_differ));
    assert!(!shallow_equal_by(&obj([("0", "a".into())]), &obj([("0", "a".into())]), strings_differ));
}

#[test]
fn test_non_boolean_customizer_results_are_coerced() {
    let mut says_c = Truthy(|_: &Value, _: &Value, _: Option<&str>| Some(Value::from("c")));
    assert!(shallow_equal_with(&"a".into(), &"b".into(), &mut says_c));

    let falsey = [
        Value::from(""),
        Value::from(0),
        Value::Bool(false),
        Value::from(f64::NAN),
        Value::Null,
    ];
    let actual: Vec<bool> = falsey
        .iter()
        .map(|v| {
            let v = v.clone();
            let mut c = Truthy(move |_: &Value, _: &Value, _: Option<&str>| Some(v.clone()));
            shallow_equal_with(&"a".into(), &"a".into(), &mut c)
        })
        .collect();
    assert_eq!(actual, vec![false; falsey.len()]);
}

#[test]
fn test_non_boolean_key_results_only_reject_on_false() {
    let a = obj([("a", 1.into())]);
    let b = obj([("a", 2.into())]);
    let falsy_but_not_false = [Value::from(0), Value::from(""), Value::from(f64::NAN), Value::Null];
    for v in falsy_but_not_false {
        let mut c = Truthy(move |_: &Value, _: &Value, key: Option<&str>| key.map(|_| v.clone()));
        assert!(shallow_equal_with(&a, &b, &mut c));
    }

    let mut rejects = Truthy(|_: &Value, _: &Value, key: Option<&str>| key.map(|_| Value::Bool(false)));
    assert!(!shallow_equal_with(&a, &a.clone(), &mut rejects));
}

#[test]
fn test_customizer_sees_root_first() {
    let mut calls = Vec::new();
    shallow_equal_by(
        &obj([("a", 1.into()), ("b", 2.into())]),
        &obj([("a", 1.into()), ("b", 2.into())]),
        |_, _, key| {
            calls.push(key.unwrap_or("root").to_owned());
            None
        },
    );
    assert_eq!(calls, vec!["root", "a", "b"]);
}

#[test]
fn test_top_level_opinion_short_circuits() {
    for verdict in [true, false] {
        let mut calls = Vec::new();
        let result = shallow_equal_by(
            &obj([("a", 1.into())]),
            &obj([("a", Value::from(if verdict { 2 } else { 1 }))]),
            |_, _, key| {
                calls.push(key.unwrap_or("root").to_owned());
                key.is_none().then_some(verdict)
            },
        );
        assert_eq!(result, verdict);
        assert_eq!(calls, vec!["root"]);
    }
}

#[test]
fn test_top_level_opinion_beats_identity() {
    let same: Value = 1.into();
    assert!(!shallow_equal_by(&same, &same, |_, _, _| Some(false)));
}

#[test]
fn test_tolerance_without_context() {
    let mut tol = Tolerance { epsilon: 0.01 };
    assert!(shallow_equal_with(&obj([("a", 1.001.into())]), &obj([("a", 1.002.into())]), &mut tol));
    assert!(!shallow_equal_with(&obj([("a", 1.0.into())]), &obj([("a", 2.0.into())]), &mut tol));
}

#[test]
fn test_customizer_can_look_one_level_deeper() {
    let nested_equal = |a: &Value, b: &Value, key: Option<&str>| match (a, b, key) {
        (Value::Object(_), Value::Object(_), Some(_)) => Some(shallow_equal(a, b)),
        _ => None,
    };
    let a = obj([("a", obj([("b", 1.into())]))]);
    let b = obj([("a", obj([("b", 1.into())]))]);
    let c = obj([("a", obj([("b", 2.into())]))]);
    assert!(shallow_equal_by(&a, &b, nested_equal));
    assert!(!shallow_equal_by(&a, &c, nested_equal));
}

#[test]
fn test_ignoring_circular_key() {
    let a = Object::from_entries([("a", 1)]);
    let b = Object::from_entries([("a", 1)]);
    a.set("self", a.clone());
    b.set("self", b.clone());
    let (va, vb) = (Value::from(a.clone()), Value::from(b.clone()));

    assert!(!shallow_equal(&va, &vb));
    assert!(shallow_equal_with(&va, &vb, &mut IgnoreKeys::new(["self"])));

    a.remove("self");
    b.remove("self");
}

#[test]
fn test_chain_as_trait_object() {
    let mut chain = Chain::new()
        .with(IgnoreKeys::new(["updated_at"]))
        .with(Tolerance { epsilon: 0.5 });
    let dyn_chain: &mut dyn Customizer = &mut chain;
    let a = obj([("updated_at", 1.into()), ("score", 10.0.into()), ("name", "x".into())]);
    let b = obj([("updated_at", 2.into()), ("score", 10.4.into()), ("name", "x".into())]);
    assert!(shallow_equal_with(&a, &b, dyn_chain));
}
