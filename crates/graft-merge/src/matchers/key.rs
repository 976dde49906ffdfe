use graft_value::Value;

use crate::matcher::Matcher;

/// Correlates objects by a key field such as `id`.
///
/// Two objects match when the source carries a non-null value at the field
/// and the target's value there is strictly equal to it.
pub struct KeyMatcher {
    field: String,
    name: String,
}

impl KeyMatcher {
    /// Create a matcher keyed on `field`.
    pub fn new(field: impl Into<String>) -> Self {
        let field = field.into();
        let name = format!("key:{field}");
        Self { field, name }
    }

    /// The field this matcher compares.
    pub fn field(&self) -> &str {
        &self.field
    }
}

impl Matcher for KeyMatcher {
    fn name(&self) -> &str {
        &self.name
    }

    fn matches(&self, target: &Value, source: &Value) -> bool {
        if target.as_object().is_none() || source.as_object().is_none() {
            return false;
        }
        let wanted = source.get(self.field.as_str());
        !wanted.is_nullish() && target.get(self.field.as_str()).strict_equals(&wanted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: i32, label: &str) -> Value {
        Value::object_from([("id", Value::from(id)), ("label", Value::from(label))])
    }

    #[test]
    fn matches_equal_keys() {
        let matcher = KeyMatcher::new("id");
        assert_eq!(matcher.name(), "key:id");
        assert_eq!(matcher.field(), "id");
        assert!(matcher.matches(&item(1, "old"), &item(1, "new")));
        assert!(!matcher.matches(&item(1, "old"), &item(2, "old")));
    }

    #[test]
    fn zero_is_a_valid_key() {
        let matcher = KeyMatcher::new("id");
        assert!(matcher.matches(&item(0, "a"), &item(0, "b")));
    }

    #[test]
    fn missing_keys_never_match() {
        let matcher = KeyMatcher::new("id");
        let bare = Value::object_from([("label", Value::from("x"))]);
        assert!(!matcher.matches(&bare, &bare.clone()));
        assert!(!matcher.matches(&Value::from(1), &Value::from(1)));
    }
}
