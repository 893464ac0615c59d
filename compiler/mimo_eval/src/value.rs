//! Runtime values for the Mimo interpreter.
//!
//! Scalars are stored inline. Arrays and objects are shared, mutable
//! containers behind `Rc<RefCell<_>>`: assigning or passing one copies the
//! handle, never the contents, and `=` compares them by identity.
//!
//! Objects keep their keys in insertion order so printing, iteration and
//! `keys()` are deterministic.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use chrono::{DateTime, SecondsFormat, Utc};
use rustc_hash::FxHashMap;

use crate::function::{BuiltinFunction, FunctionValue};

/// Largest array or string a single operation may produce: index growth,
/// `range()`, `repeat()` and padding are checked against it.
pub const MAX_COLLECTION_LEN: usize = 1 << 24;

/// Shared handle to an array.
pub type ArrayRef = Rc<RefCell<Vec<Value>>>;

/// Shared handle to an object.
pub type ObjectRef = Rc<RefCell<ObjectMap>>;

/// Object property storage.
pub type ObjectMap = OrderedMap<Value>;

/// Runtime value.
#[derive(Clone)]
pub enum Value {
    Null,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Array(ArrayRef),
    Object(ObjectRef),
    /// User-defined function or closure.
    Function(Rc<FunctionValue>),
    /// Native function.
    Builtin(Rc<BuiltinFunction>),
    DateTime(DateTime<Utc>),
}

impl Value {
    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into())
    }

    pub fn array(items: Vec<Value>) -> Self {
        Value::Array(Rc::new(RefCell::new(items)))
    }

    pub fn object(map: ObjectMap) -> Self {
        Value::Object(Rc::new(RefCell::new(map)))
    }

    pub fn builtin(function: BuiltinFunction) -> Self {
        Value::Builtin(Rc::new(function))
    }

    /// Name reported by `type()` and in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::Function(_) | Value::Builtin(_) => "function",
            Value::DateTime(_) => "datetime",
        }
    }

    /// `null`, `false`, `0` and `""` are falsy; everything else is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Null => false,
            Value::Bool(b) => *b,
            Value::Number(n) => *n != 0.0,
            Value::String(s) => !s.is_empty(),
            _ => true,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_callable(&self) -> bool {
        matches!(self, Value::Function(_) | Value::Builtin(_))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// The number as an integer, if it is finite and has no fractional part.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Value::Number(n) if n.is_finite() && n.fract() == 0.0 => Some(*n as i64),
            _ => None,
        }
    }

    /// Strict equality: scalars by value, containers and functions by identity.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => Rc::ptr_eq(a, b),
            (Value::Object(a), Value::Object(b)) => Rc::ptr_eq(a, b),
            (Value::Function(a), Value::Function(b)) => Rc::ptr_eq(a, b),
            (Value::Builtin(a), Value::Builtin(b)) => Rc::ptr_eq(a, b),
            (Value::DateTime(a), Value::DateTime(b)) => a == b,
            _ => false,
        }
    }

    /// Strict equality, except that `NaN` equals `NaN`. Used for set-like
    /// array operations and `includes`.
    pub fn same_value_zero(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Number(a), Value::Number(b)) if a.is_nan() && b.is_nan() => true,
            _ => self.strict_equals(other),
        }
    }

    /// Structural equality for arrays and objects; strict equality otherwise.
    pub fn deep_equals(&self, other: &Value) -> bool {
        deep_equals(self, other, &mut Vec::new())
    }

    /// Key used when a value indexes an object (`obj[1]` reads key `"1"`).
    pub fn property_key(&self) -> String {
        self.to_string()
    }
}

fn container_ptr(value: &Value) -> Option<*const ()> {
    match value {
        Value::Array(a) => Some(Rc::as_ptr(a).cast()),
        Value::Object(o) => Some(Rc::as_ptr(o).cast()),
        _ => None,
    }
}

fn deep_equals(a: &Value, b: &Value, seen: &mut Vec<(*const (), *const ())>) -> bool {
    if a.strict_equals(b) {
        return true;
    }
    if let (Some(pa), Some(pb)) = (container_ptr(a), container_ptr(b)) {
        if seen.contains(&(pa, pb)) {
            return true;
        }
        seen.push((pa, pb));
    }
    let equal = match (a, b) {
        (Value::Array(x), Value::Array(y)) => {
            let (x, y) = (x.borrow(), y.borrow());
            x.len() == y.len() && x.iter().zip(y.iter()).all(|(l, r)| deep_equals(l, r, seen))
        }
        (Value::Object(x), Value::Object(y)) => {
            let (x, y) = (x.borrow(), y.borrow());
            x.len() == y.len()
                && x.iter().all(|(key, l)| {
                    y.get(key).is_some_and(|r| deep_equals(l, r, seen))
                })
        }
        _ => false,
    };
    if container_ptr(a).is_some() && container_ptr(b).is_some() {
        seen.pop();
    }
    equal
}

/// Format a number the way Mimo prints it: integral values without a
/// decimal point, exponent notation outside `[1e-6, 1e21)`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if n == 0.0 {
        return "0".to_string();
    }
    let abs = n.abs();
    if (1e-6..1e21).contains(&abs) {
        return format!("{n}");
    }
    let exp = format!("{n:e}");
    match exp.split_once('e') {
        Some((mantissa, power)) if !power.starts_with('-') => format!("{mantissa}e+{power}"),
        _ => exp,
    }
}

fn write_value(f: &mut fmt::Formatter<'_>, value: &Value, seen: &mut Vec<*const ()>) -> fmt::Result {
    match value {
        Value::Null => f.write_str("null"),
        Value::Bool(b) => write!(f, "{b}"),
        Value::Number(n) => f.write_str(&format_number(*n)),
        Value::String(s) => f.write_str(s),
        Value::Array(items) => {
            let ptr = Rc::as_ptr(items).cast();
            if seen.contains(&ptr) {
                return f.write_str("[...]");
            }
            seen.push(ptr);
            f.write_str("[")?;
            for (i, item) in items.borrow().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write_value(f, item, seen)?;
            }
            seen.pop();
            f.write_str("]")
        }
        Value::Object(map) => {
            let ptr = Rc::as_ptr(map).cast();
            if seen.contains(&ptr) {
                return f.write_str("{...}");
            }
            seen.push(ptr);
            f.write_str("{")?;
            for (i, (key, item)) in map.borrow().iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{key}: ")?;
                write_value(f, item, seen)?;
            }
            seen.pop();
            f.write_str("}")
        }
        Value::Function(func) => write!(f, "<function {}>", func.name()),
        Value::Builtin(func) => write!(f, "<function {}>", func.name),
        Value::DateTime(dt) => write!(
            f,
            "datetime({})",
            dt.to_rfc3339_opts(SecondsFormat::Millis, true)
        ),
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_value(f, self, &mut Vec::new())
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => write!(f, "String({s:?})"),
            Value::Null => f.write_str("Null"),
            other => write!(f, "{}({other})", other.type_name()),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.strict_equals(other)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
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

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Value::array(items)
    }
}

impl From<ObjectMap> for Value {
    fn from(map: ObjectMap) -> Self {
        Value::object(map)
    }
}

/// String-keyed map that remembers insertion order.
///
/// Replacing an existing key keeps its original position.
#[derive(Clone, Debug)]
pub struct OrderedMap<V> {
    entries: Vec<(String, V)>,
    index: FxHashMap<String, usize>,
}

impl<V> Default for OrderedMap<V> {
    fn default() -> Self {
        OrderedMap {
            entries: Vec::new(),
            index: FxHashMap::default(),
        }
    }
}

impl<V> OrderedMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match self.index.get(key) {
            Some(&i) => Some(&mut self.entries[i].1),
            None => None,
        }
    }

    /// Insert or replace; returns the previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: V) -> Option<V> {
        let key = key.into();
        if let Some(&i) = self.index.get(&key) {
            return Some(std::mem::replace(&mut self.entries[i].1, value));
        }
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, value));
        None
    }

    /// Remove a key, shifting later entries down.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let i = self.index.remove(key)?;
        let (_, value) = self.entries.remove(i);
        for slot in self.index.values_mut() {
            if *slot > i {
                *slot -= 1;
            }
        }
        Some(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for OrderedMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}
