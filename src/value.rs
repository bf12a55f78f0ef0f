use indexmap::IndexMap;
use itertools::{Either, Itertools};
use std::cell::RefCell;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// A dynamically typed value with host object semantics: primitives compare by
/// value, while symbols, functions and objects are handles compared by identity.
#[derive(Clone)]
pub enum Value {
    /// The single nullish sentinel. There is no separate "undefined".
    Null,
    Bool(bool),
    Number(f64),
    BigInt(i128),
    String(Rc<str>),
    Symbol(Symbol),
    Function(Function),
    Object(Object),
}

impl Value {
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into())
    }

    /// Only objects pass the type gate. Functions do not.
    pub fn is_object_like(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Host truthiness: null, false, 0, -0, NaN, 0n and "" are falsy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0 && !n.is_nan(),
            Value::BigInt(i) => *i != 0,
            Value::String(s) => !s.is_empty(),
            Value::Symbol(_) | Value::Function(_) | Value::Object(_) => true,
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(f64::from(n))
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<Object> for Value {
    fn from(o: Object) -> Self {
        Value::Object(o)
    }
}

impl From<Symbol> for Value {
    fn from(s: Symbol) -> Self {
        Value::Symbol(s)
    }
}

impl From<Function> for Value {
    fn from(f: Function) -> Self {
        Value::Function(f)
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

// Objects render their keys only, so cyclic graphs print fine.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) if n.is_nan() => f.write_str("NaN"),
            Value::Number(n) if *n == 0.0 && n.is_sign_negative() => f.write_str("-0"),
            Value::Number(n) if n.is_infinite() => {
                f.write_str(if *n > 0.0 { "Infinity" } else { "-Infinity" })
            }
            Value::Number(n) => write!(f, "{n}"),
            Value::BigInt(i) => write!(f, "{i}n"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Symbol(s) => write!(f, "{s:?}"),
            Value::Function(func) => write!(f, "{func:?}"),
            Value::Object(o) => write!(f, "{o:?}"),
        }
    }
}

/// A unique symbol. Two symbols with the same description are still distinct.
#[derive(Clone)]
pub struct Symbol(Rc<Option<String>>);

impl Symbol {
    pub fn new(description: impl Into<String>) -> Self {
        Symbol(Rc::new(Some(description.into())))
    }

    pub fn anonymous() -> Self {
        Symbol(Rc::new(None))
    }

    pub fn description(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn ptr_eq(&self, other: &Symbol) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        Rc::as_ptr(&self.0).hash(state);
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self.description().unwrap_or_default())
    }
}

/// An opaque callable handle. Functions are compared by identity and never
/// pass the object type gate.
#[derive(Clone)]
pub struct Function(Rc<str>);

impl Function {
    pub fn new(name: impl Into<Rc<str>>) -> Self {
        Function(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }

    pub fn ptr_eq(&self, other: &Function) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[Function: {}]", self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PropertyKey {
    String(String),
    Symbol(Symbol),
}

impl From<&str> for PropertyKey {
    fn from(s: &str) -> Self {
        PropertyKey::String(s.to_owned())
    }
}

impl From<String> for PropertyKey {
    fn from(s: String) -> Self {
        PropertyKey::String(s)
    }
}

impl From<Symbol> for PropertyKey {
    fn from(s: Symbol) -> Self {
        PropertyKey::Symbol(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ObjectKind {
    Plain,
    Array,
    /// Host objects whose state lives outside their properties (dates,
    /// maps, sets, regexes, errors, buffers, promises).
    Exotic(String),
}

#[derive(Clone)]
struct Property {
    value: Value,
    enumerable: bool,
}

struct ObjectData {
    kind: ObjectKind,
    properties: IndexMap<PropertyKey, Property>,
    prototype: Option<Object>,
}

/// A shared, mutable keyed collection. Cloning the handle keeps the identity.
#[derive(Clone)]
pub struct Object(Rc<RefCell<ObjectData>>);

impl Default for Object {
    fn default() -> Self {
        Self::new()
    }
}

impl Object {
    pub fn new() -> Self {
        Self::with_kind(ObjectKind::Plain, None)
    }

    /// A plain object whose property reads fall back to `prototype`.
    pub fn with_prototype(prototype: &Object) -> Self {
        Self::with_kind(ObjectKind::Plain, Some(prototype.clone()))
    }

    pub fn exotic(tag: impl Into<String>) -> Self {
        Self::with_kind(ObjectKind::Exotic(tag.into()), None)
    }

    /// A dense array. Elements land under their canonical index keys.
    pub fn array<I, V>(items: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let arr = Self::with_kind(ObjectKind::Array, None);
        for (i, item) in items.into_iter().enumerate() {
            arr.set(i.to_string(), item);
        }
        arr
    }

    /// A possibly sparse array; `None` entries are holes (missing keys).
    pub fn sparse_array<I>(items: I) -> Self
    where
        I: IntoIterator<Item = Option<Value>>,
    {
        let arr = Self::with_kind(ObjectKind::Array, None);
        for (i, item) in items.into_iter().enumerate() {
            if let Some(v) = item {
                arr.set(i.to_string(), v);
            }
        }
        arr
    }

    /// Plain object from `(key, value)` pairs, in insertion order.
    pub fn from_entries<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let obj = Self::new();
        for (k, v) in entries {
            obj.set(k, v);
        }
        obj
    }

    fn with_kind(kind: ObjectKind, prototype: Option<Object>) -> Self {
        Object(Rc::new(RefCell::new(ObjectData {
            kind,
            properties: IndexMap::new(),
            prototype,
        })))
    }

    pub fn kind(&self) -> ObjectKind {
        self.0.borrow().kind.clone()
    }

    pub fn ptr_eq(&self, other: &Object) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Assign an enumerable string-keyed property. Reassigning an existing key
    /// keeps its position and enumerability.
    pub fn set(&self, key: impl Into<String>, value: impl Into<Value>) {
        let key = PropertyKey::String(key.into());
        let value = value.into();
        let mut data = self.0.borrow_mut();
        match data.properties.get_mut(&key) {
            Some(prop) => prop.value = value,
            None => {
                data.properties.insert(key, Property { value, enumerable: true });
            }
        }
    }

    pub fn set_symbol(&self, symbol: &Symbol, value: impl Into<Value>) {
        self.define(symbol.clone(), value, true);
    }

    /// Define (or redefine) a property with explicit enumerability.
    pub fn define(&self, key: impl Into<PropertyKey>, value: impl Into<Value>, enumerable: bool) {
        self.0.borrow_mut().properties.insert(
            key.into(),
            Property { value: value.into(), enumerable },
        );
    }

    pub fn remove(&self, key: &str) -> Option<Value> {
        self.0
            .borrow_mut()
            .properties
            .shift_remove(&PropertyKey::from(key))
            .map(|p| p.value)
    }

    /// Own property lookup, regardless of enumerability.
    pub fn has_own(&self, key: &str) -> bool {
        self.0.borrow().properties.contains_key(&PropertyKey::from(key))
    }

    pub fn get_own(&self, key: &str) -> Option<Value> {
        self.0
            .borrow()
            .properties
            .get(&PropertyKey::from(key))
            .map(|p| p.value.clone())
    }

    pub fn get_symbol(&self, symbol: &Symbol) -> Option<Value> {
        self.0
            .borrow()
            .properties
            .get(&PropertyKey::Symbol(symbol.clone()))
            .map(|p| p.value.clone())
    }

    /// Property read walking the prototype chain.
    pub fn get(&self, key: &str) -> Option<Value> {
        let mut current = self.clone();
        loop {
            if let Some(v) = current.get_own(key) {
                return Some(v);
            }
            let next = current.0.borrow().prototype.clone();
            current = next?;
        }
    }

    /// Own enumerable string keys: array indices ascending, then the rest in
    /// insertion order. Symbol keys, non-enumerable keys and inherited keys
    /// are never listed.
    pub fn own_enumerable_keys(&self) -> Vec<String> {
        let data = self.0.borrow();
        let (mut indexed, named): (Vec<(u32, String)>, Vec<String>) = data
            .properties
            .iter()
            .filter_map(|(key, prop)| match key {
                PropertyKey::String(s) if prop.enumerable => Some(s),
                _ => None,
            })
            .partition_map(|s| match array_index(s) {
                Some(i) => Either::Left((i, s.clone())),
                None => Either::Right(s.clone()),
            });
        indexed.sort_unstable_by_key(|(i, _)| *i);
        indexed.into_iter().map(|(_, s)| s).chain(named).collect()
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let keys = self.own_enumerable_keys().into_iter().join(", ");
        match self.kind() {
            ObjectKind::Plain => write!(f, "{{{keys}}}"),
            ObjectKind::Array => write!(f, "[{keys}]"),
            ObjectKind::Exotic(tag) => write!(f, "{tag} {{{keys}}}"),
        }
    }
}

/// Canonical array index: a decimal integer without leading zeros, below 2^32 - 1.
fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    if key.len() > 1 && key.starts_with('0') {
        return None;
    }
    key.parse::<u32>().ok().filter(|&i| i != u32::MAX)
}
