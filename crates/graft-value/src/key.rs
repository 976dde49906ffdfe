use std::fmt;

use crate::value::Value;

/// Address of one property inside a container.
///
/// Objects are addressed by name, arrays by index, and maps by entry key.
/// [`Value::get`] and [`Value::set`] coerce between the first two the way a
/// dynamic language would (an index names the object key `"3"`, and the name
/// `"3"` addresses array slot 3).
#[derive(Clone, Debug)]
pub enum PropertyKey {
    /// A named property of a keyed container.
    Name(String),
    /// A slot of an ordered sequence.
    Index(usize),
    /// An entry of a map, keyed by strict equality.
    Entry(Value),
}

impl PropertyKey {
    /// The key as an object property name, if it has one.
    pub fn as_name(&self) -> Option<String> {
        match self {
            Self::Name(name) => Some(name.clone()),
            Self::Index(index) => Some(index.to_string()),
            Self::Entry(Value::String(s)) => Some(s.clone()),
            Self::Entry(Value::Number(n)) if n.is_finite() && n.fract() == 0.0 => {
                Some(if *n == 0.0 { "0".to_string() } else { format!("{n:.0}") })
            }
            Self::Entry(Value::BigInt(n)) => Some(n.to_string()),
            Self::Entry(_) => None,
        }
    }

    /// The key as a sequence index, if it has one.
    ///
    /// Only canonical decimal names qualify: `"3"` is an index, `"03"` is not.
    pub fn as_index(&self) -> Option<usize> {
        match self {
            Self::Index(index) => Some(*index),
            Self::Name(_) | Self::Entry(_) => {
                let name = self.as_name()?;
                let index = name.parse::<usize>().ok()?;
                (index.to_string() == name).then_some(index)
            }
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Entry(key) => write!(f, "<{key:?}>"),
        }
    }
}

impl From<&str> for PropertyKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for PropertyKey {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for PropertyKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_names_are_canonical() {
        assert_eq!(PropertyKey::from("3").as_index(), Some(3));
        assert_eq!(PropertyKey::from("03").as_index(), None);
        assert_eq!(PropertyKey::from("street").as_index(), None);
        assert_eq!(PropertyKey::from(7usize).as_name().as_deref(), Some("7"));
    }

    #[test]
    fn entry_keys_coerce_to_names() {
        let key = PropertyKey::Entry(Value::from(2.0));
        assert_eq!(key.as_name().as_deref(), Some("2"));
        assert_eq!(key.as_index(), Some(2));
        assert_eq!(PropertyKey::Entry(Value::new_object()).as_name(), None);
    }
}
