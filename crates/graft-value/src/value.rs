//! The dynamic value type.

use std::fmt;

use indexmap::IndexMap;

use crate::handle::{ArrayHandle, Handle, MapHandle, ObjectHandle, Opaque, SetHandle};
use crate::key::PropertyKey;

/// Most `Undefined` holes a single array write may pad in.
///
/// Writes further past the end than this are ignored, so a sparse numeric
/// key cannot force an unbounded allocation.
pub const MAX_ARRAY_GAP: usize = 1 << 16;

/// A dynamically-shaped value.
///
/// Primitives are held inline. Containers ([`Value::Object`], [`Value::Array`],
/// [`Value::Set`], [`Value::Map`]) are shared [`Handle`]s: cloning a `Value`
/// clones the handle, so the clone aliases the same container.
#[derive(Clone, Default)]
pub enum Value {
    /// An absent value.
    #[default]
    Undefined,
    /// An explicit null.
    Null,
    Bool(bool),
    /// IEEE-754 double, the only ordinary numeric type.
    Number(f64),
    /// Integer with independent value semantics.
    BigInt(i128),
    String(String),
    /// Non-data token, compared by identity.
    Symbol(Opaque),
    /// Non-data callable tag, compared by identity.
    Function(Opaque),
    Object(ObjectHandle),
    Array(ArrayHandle),
    Set(SetHandle),
    Map(MapHandle),
}

impl Value {
    /// A fresh, empty keyed container.
    pub fn new_object() -> Self {
        Self::Object(Handle::new(IndexMap::new()))
    }

    /// A fresh, empty sequence.
    pub fn new_array() -> Self {
        Self::Array(Handle::new(Vec::new()))
    }

    /// A fresh, empty set.
    pub fn new_set() -> Self {
        Self::Set(Handle::new(Vec::new()))
    }

    /// A fresh, empty map.
    pub fn new_map() -> Self {
        Self::Map(Handle::new(Vec::new()))
    }

    /// Build a keyed container from `(name, value)` pairs.
    pub fn object_from<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        let map = entries.into_iter().map(|(k, v)| (k.into(), v)).collect();
        Self::Object(Handle::new(map))
    }

    /// Build a set, dropping members strictly equal to an earlier one.
    pub fn set_from<I: IntoIterator<Item = Value>>(members: I) -> Self {
        let set = Self::new_set();
        for member in members {
            set.add(member);
        }
        set
    }

    /// Build a map from `(key, value)` entries; later keys overwrite earlier ones.
    pub fn map_from<I: IntoIterator<Item = (Value, Value)>>(entries: I) -> Self {
        let map = Self::new_map();
        for (key, value) in entries {
            map.set(PropertyKey::Entry(key), value);
        }
        map
    }

    /// A fresh symbol token.
    pub fn symbol(name: impl AsRef<str>) -> Self {
        Self::Symbol(Opaque::new(name))
    }

    /// A fresh function tag.
    pub fn function(name: impl AsRef<str>) -> Self {
        Self::Function(Opaque::new(name))
    }

    /// The runtime type name, as a dynamic language would report it.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Undefined => "undefined",
            Self::Null => "null",
            Self::Bool(_) => "boolean",
            Self::Number(_) => "number",
            Self::BigInt(_) => "bigint",
            Self::String(_) => "string",
            Self::Symbol(_) => "symbol",
            Self::Function(_) => "function",
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
        }
    }

    /// Returns `true` for objects, arrays, sets and maps.
    pub fn is_container(&self) -> bool {
        matches!(
            self,
            Self::Object(_) | Self::Array(_) | Self::Set(_) | Self::Map(_)
        )
    }

    /// Returns `true` for symbols and functions.
    pub fn is_non_data(&self) -> bool {
        matches!(self, Self::Symbol(_) | Self::Function(_))
    }

    /// Returns `true` for scalars that are copied rather than merged:
    /// booleans, numbers, big integers, strings, and `Undefined`.
    ///
    /// `Null` is deliberately not a scalar here; it behaves as an empty slot.
    pub fn is_scalar(&self) -> bool {
        matches!(
            self,
            Self::Undefined | Self::Bool(_) | Self::Number(_) | Self::BigInt(_) | Self::String(_)
        )
    }

    /// Returns `true` for `Undefined` and `Null`.
    pub fn is_nullish(&self) -> bool {
        matches!(self, Self::Undefined | Self::Null)
    }

    /// Dynamic-language truthiness, inverted.
    ///
    /// `Undefined`, `Null`, `false`, `0`, `-0`, NaN, `0n` and `""` are falsy.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Undefined | Self::Null => true,
            Self::Bool(b) => !b,
            Self::Number(n) => *n == 0.0 || n.is_nan(),
            Self::BigInt(n) => *n == 0,
            Self::String(s) => s.is_empty(),
            _ => false,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectHandle> {
        match self {
            Self::Object(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayHandle> {
        match self {
            Self::Array(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&SetHandle> {
        match self {
            Self::Set(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapHandle> {
        match self {
            Self::Map(h) => Some(h),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Identity of the underlying container or token, if any.
    pub fn addr(&self) -> Option<usize> {
        match self {
            Self::Object(h) => Some(h.addr()),
            Self::Array(h) | Self::Set(h) => Some(h.addr()),
            Self::Map(h) => Some(h.addr()),
            _ => None,
        }
    }

    /// Returns `true` if both values are the same container or token.
    /// Primitives are never the same reference.
    pub fn same_ref(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Object(a), Self::Object(b)) => a.ptr_eq(b),
            (Self::Array(a), Self::Array(b)) | (Self::Set(a), Self::Set(b)) => a.ptr_eq(b),
            (Self::Map(a), Self::Map(b)) => a.ptr_eq(b),
            (Self::Symbol(a), Self::Symbol(b)) | (Self::Function(a), Self::Function(b)) => {
                a.ptr_eq(b)
            }
            _ => false,
        }
    }

    /// Strict equality: primitives by value (NaN is unequal to itself and
    /// `0 == -0`), everything else by identity.
    pub fn strict_equals(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Undefined, Self::Undefined) | (Self::Null, Self::Null) => true,
            (Self::Bool(a), Self::Bool(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::BigInt(a), Self::BigInt(b)) => a == b,
            (Self::String(a), Self::String(b)) => a == b,
            _ => self.same_ref(other),
        }
    }

    /// A fresh, empty container of the same shape family as `self`:
    /// sequence for arrays, set for sets, map for maps, keyed otherwise.
    pub fn empty_like(&self) -> Value {
        match self {
            Self::Array(_) => Self::new_array(),
            Self::Set(_) => Self::new_set(),
            Self::Map(_) => Self::new_map(),
            _ => Self::new_object(),
        }
    }

    /// Number of own entries of a container.
    pub fn len(&self) -> Option<usize> {
        match self {
            Self::Object(h) => Some(h.borrow().len()),
            Self::Array(h) | Self::Set(h) => Some(h.borrow().len()),
            Self::Map(h) => Some(h.borrow().len()),
            _ => None,
        }
    }

    /// Returns `true` for containers with no entries.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }

    /// Read one property. Missing properties, and properties of values that
    /// have none (sets, primitives), read as `Undefined`.
    pub fn property(&self, key: &PropertyKey) -> Value {
        match self {
            Self::Object(h) => key
                .as_name()
                .and_then(|name| h.borrow().get(&name).cloned())
                .unwrap_or_default(),
            Self::Array(h) => key
                .as_index()
                .and_then(|index| h.borrow().get(index).cloned())
                .unwrap_or_default(),
            Self::Map(h) => match key {
                PropertyKey::Entry(k) => h
                    .borrow()
                    .iter()
                    .find(|(existing, _)| existing.strict_equals(k))
                    .map(|(_, v)| v.clone())
                    .unwrap_or_default(),
                _ => Value::Undefined,
            },
            _ => Value::Undefined,
        }
    }

    /// Write one property. Returns `false` when the write is ignored because
    /// `self` has no addressable property for `key`.
    ///
    /// Writing an array slot past the end pads with `Undefined`, up to
    /// [`MAX_ARRAY_GAP`] holes.
    pub fn set_property(&self, key: &PropertyKey, value: Value) -> bool {
        match self {
            Self::Object(h) => match key.as_name() {
                Some(name) => {
                    h.borrow_mut().insert(name, value);
                    true
                }
                None => false,
            },
            Self::Array(h) => match key.as_index() {
                Some(index) => {
                    let mut items = h.borrow_mut();
                    if index >= items.len() {
                        if index - items.len() > MAX_ARRAY_GAP {
                            return false;
                        }
                        match index.checked_add(1) {
                            Some(len) => items.resize(len, Value::Undefined),
                            None => return false,
                        }
                    }
                    items[index] = value;
                    true
                }
                None => false,
            },
            Self::Map(h) => match key {
                PropertyKey::Entry(k) => {
                    let mut entries = h.borrow_mut();
                    match entries.iter_mut().find(|(existing, _)| existing.strict_equals(k)) {
                        Some((_, slot)) => *slot = value,
                        None => entries.push((k.clone(), value)),
                    }
                    true
                }
                _ => false,
            },
            _ => false,
        }
    }

    /// Shorthand for [`Value::property`].
    pub fn get(&self, key: impl Into<PropertyKey>) -> Value {
        self.property(&key.into())
    }

    /// Shorthand for [`Value::set_property`].
    pub fn set(&self, key: impl Into<PropertyKey>, value: impl Into<Value>) -> bool {
        self.set_property(&key.into(), value.into())
    }

    /// Snapshot of the enumerable own properties.
    ///
    /// Objects enumerate their keys in insertion order and arrays their
    /// indices. Sets, maps and primitives have no enumerable own properties.
    pub fn own_entries(&self) -> Vec<(PropertyKey, Value)> {
        match self {
            Self::Object(h) => h
                .borrow()
                .iter()
                .map(|(k, v)| (PropertyKey::Name(k.clone()), v.clone()))
                .collect(),
            Self::Array(h) => h
                .borrow()
                .iter()
                .enumerate()
                .map(|(i, v)| (PropertyKey::Index(i), v.clone()))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Snapshot of the elements of an array or the members of a set.
    pub fn elements(&self) -> Vec<Value> {
        match self {
            Self::Array(h) | Self::Set(h) => h.borrow().clone(),
            _ => Vec::new(),
        }
    }

    /// Snapshot of the entries of a map.
    pub fn map_entries(&self) -> Vec<(Value, Value)> {
        match self {
            Self::Map(h) => h.borrow().clone(),
            _ => Vec::new(),
        }
    }

    /// Append to an array. Returns `false` if `self` is not an array.
    pub fn push(&self, value: impl Into<Value>) -> bool {
        match self {
            Self::Array(h) => {
                h.borrow_mut().push(value.into());
                true
            }
            _ => false,
        }
    }

    /// Add a member to a set. Returns `true` if the member was new.
    pub fn add(&self, value: impl Into<Value>) -> bool {
        let value = value.into();
        match self {
            Self::Set(h) => {
                let mut members = h.borrow_mut();
                if members.iter().any(|m| m.strict_equals(&value)) {
                    return false;
                }
                members.push(value);
                true
            }
            _ => false,
        }
    }

    /// Returns `true` if an array or set holds an element strictly equal to
    /// `value`.
    pub fn includes(&self, value: &Value) -> bool {
        match self {
            Self::Array(h) | Self::Set(h) => h.borrow().iter().any(|e| e.strict_equals(value)),
            _ => false,
        }
    }

    /// Remove every entry of a container. Clearing is how callers break
    /// reference cycles they no longer need.
    pub fn clear(&self) {
        match self {
            Self::Object(h) => h.borrow_mut().clear(),
            Self::Array(h) | Self::Set(h) => h.borrow_mut().clear(),
            Self::Map(h) => h.borrow_mut().clear(),
            _ => {}
        }
    }
}

// Containers print shallowly so cyclic graphs never recurse.
impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undefined => write!(f, "undefined"),
            Self::Null => write!(f, "null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::BigInt(n) => write!(f, "{n}n"),
            Self::String(s) => write!(f, "{s:?}"),
            Self::Symbol(o) => write!(f, "Symbol({})", o.name()),
            Self::Function(o) => write!(f, "[Function {}]", o.name()),
            Self::Object(h) => match h.try_borrow() {
                Ok(map) => write!(f, "Object({:#x}, {} keys)", h.addr(), map.len()),
                Err(_) => write!(f, "Object({:#x}, <borrowed>)", h.addr()),
            },
            Self::Array(h) | Self::Set(h) => {
                let kind = if matches!(self, Self::Array(_)) { "Array" } else { "Set" };
                match h.try_borrow() {
                    Ok(items) => write!(f, "{kind}({:#x}, {} items)", h.addr(), items.len()),
                    Err(_) => write!(f, "{kind}({:#x}, <borrowed>)", h.addr()),
                }
            }
            Self::Map(h) => match h.try_borrow() {
                Ok(entries) => write!(f, "Map({:#x}, {} entries)", h.addr(), entries.len()),
                Err(_) => write!(f, "Map({:#x}, <borrowed>)", h.addr()),
            },
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Self::Number(f64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(n as f64)
    }
}

impl From<i128> for Value {
    fn from(n: i128) -> Self {
        Self::BigInt(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Vec<Value>> for Value {
    fn from(items: Vec<Value>) -> Self {
        Self::Array(Handle::new(items))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn falsy_values() {
        for v in [
            Value::Undefined,
            Value::Null,
            Value::from(false),
            Value::from(0),
            Value::from(-0.0),
            Value::from(f64::NAN),
            Value::from(0i128),
            Value::from(""),
        ] {
            assert!(v.is_falsy(), "{v:?} should be falsy");
        }
        for v in [
            Value::from(true),
            Value::from(1),
            Value::from("0"),
            Value::new_object(),
            Value::new_array(),
            Value::function("f"),
            Value::symbol("s"),
        ] {
            assert!(!v.is_falsy(), "{v:?} should be truthy");
        }
    }

    #[test]
    fn strict_equality() {
        assert!(Value::from(1).strict_equals(&Value::from(1.0)));
        assert!(Value::from(0.0).strict_equals(&Value::from(-0.0)));
        assert!(!Value::from(f64::NAN).strict_equals(&Value::from(f64::NAN)));
        assert!(Value::from("a").strict_equals(&Value::from("a")));
        assert!(!Value::from(1).strict_equals(&Value::from("1")));
        assert!(!Value::Null.strict_equals(&Value::Undefined));

        let a = Value::new_object();
        assert!(a.strict_equals(&a.clone()));
        assert!(!a.strict_equals(&Value::new_object()));
    }

    #[test]
    fn empty_like_matches_shape_family() {
        assert_eq!(Value::new_array().empty_like().type_name(), "array");
        assert_eq!(Value::new_set().empty_like().type_name(), "set");
        assert_eq!(Value::new_map().empty_like().type_name(), "map");
        assert_eq!(Value::new_object().empty_like().type_name(), "object");
    }

    #[test]
    fn object_properties() {
        let obj = Value::object_from([("name", Value::from("foo"))]);
        assert_eq!(obj.get("name").as_str(), Some("foo"));
        assert!(matches!(obj.get("missing"), Value::Undefined));

        assert!(obj.set(3usize, "three"));
        assert_eq!(obj.get("3").as_str(), Some("three"));
        assert_eq!(obj.len(), Some(2));
    }

    #[test]
    fn array_properties() {
        let arr = Value::from(vec![Value::from(1)]);
        assert!(arr.set(2usize, "x"));
        assert_eq!(arr.len(), Some(3));
        assert!(matches!(arr.get(1usize), Value::Undefined));
        assert_eq!(arr.get("2").as_str(), Some("x"));

        assert!(!arr.set("length", 0));
        assert!(matches!(arr.get("length"), Value::Undefined));
    }

    #[test]
    fn far_array_writes_are_ignored() {
        let arr = Value::from(vec![Value::from(1)]);
        assert!(!arr.set("18446744073709551615", "x"));
        assert!(!arr.set("50000000", "x"));
        assert!(!arr.set(1 + MAX_ARRAY_GAP + 1, "x"));
        assert_eq!(arr.len(), Some(1));

        assert!(arr.set(1 + MAX_ARRAY_GAP, "edge"));
        assert_eq!(arr.len(), Some(MAX_ARRAY_GAP + 2));
        assert_eq!(arr.get(1 + MAX_ARRAY_GAP).as_str(), Some("edge"));
    }

    #[test]
    fn map_entries_key_by_strict_equality() {
        let key = Value::new_object();
        let map = Value::map_from([
            (Value::from("a"), Value::from(1)),
            (key.clone(), Value::from(2)),
            (Value::from("a"), Value::from(3)),
        ]);
        assert_eq!(map.len(), Some(2));
        assert_eq!(map.property(&PropertyKey::Entry(Value::from("a"))).as_f64(), Some(3.0));
        assert_eq!(map.property(&PropertyKey::Entry(key)).as_f64(), Some(2.0));
        assert!(matches!(map.get("a"), Value::Undefined));
        assert!(map.own_entries().is_empty());
    }

    #[test]
    fn sets_deduplicate() {
        let shared = Value::new_object();
        let set = Value::set_from([
            Value::from(1),
            Value::from(1),
            shared.clone(),
            shared.clone(),
            Value::new_object(),
        ]);
        assert_eq!(set.len(), Some(3));
        assert!(set.includes(&shared));
        assert!(!set.add(Value::from(1)));
        assert!(!set.set("x", 1));
    }

    #[test]
    fn own_entries_snapshot() {
        let obj = Value::object_from([("a", Value::from(1)), ("b", Value::from(2))]);
        let keys: Vec<String> = obj
            .own_entries()
            .into_iter()
            .filter_map(|(k, _)| k.as_name())
            .collect();
        assert_eq!(keys, vec!["a", "b"]);

        let arr = Value::from(vec![Value::from("x")]);
        let entries = arr.own_entries();
        assert!(matches!(entries[0].0, PropertyKey::Index(0)));
    }

    #[test]
    fn debug_does_not_follow_cycles() {
        let obj = Value::new_object();
        obj.set("self", obj.clone());
        let rendered = format!("{obj:?}");
        assert!(rendered.starts_with("Object("));
        obj.clear();
        assert!(obj.is_empty());
    }
}
