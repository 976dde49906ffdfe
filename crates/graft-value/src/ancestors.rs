//! Identity-based ancestor chains.

use crate::value::Value;

/// The containers on the current path from a traversal root down to the
/// value being processed.
///
/// Membership is identity ([`Value::same_ref`]), never structural equality.
/// The chain is passed by value into each recursive step so sibling branches
/// never observe each other's entries.
#[derive(Clone, Debug, Default)]
pub struct Ancestors(Vec<Value>);

impl Ancestors {
    /// An empty chain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a value onto the end of the chain.
    pub fn push(&mut self, value: Value) {
        self.0.push(value);
    }

    /// A copy of this chain with `value` appended.
    pub fn extended(&self, value: &Value) -> Self {
        let mut next = self.clone();
        next.push(value.clone());
        next
    }

    /// Returns `true` if `value` is one of the containers on the chain.
    /// Primitives are never on a chain.
    pub fn contains(&self, value: &Value) -> bool {
        self.0.iter().any(|ancestor| ancestor.same_ref(value))
    }

    /// Number of containers on the chain.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the chain is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_is_by_identity() {
        let a = Value::new_object();
        let twin = Value::new_object();
        let chain = Ancestors::new().extended(&a);

        assert!(chain.contains(&a));
        assert!(chain.contains(&a.clone()));
        assert!(!chain.contains(&twin));
    }

    #[test]
    fn extended_leaves_original_untouched() {
        let root = Value::new_object();
        let child = Value::new_array();
        let chain = Ancestors::new().extended(&root);
        let branch = chain.extended(&child);

        assert_eq!(chain.len(), 1);
        assert_eq!(branch.len(), 2);
        assert!(!chain.contains(&child));
    }

    #[test]
    fn primitives_are_never_members() {
        let mut chain = Ancestors::new();
        chain.push(Value::from("x"));
        assert!(!chain.contains(&Value::from("x")));
        assert!(!chain.is_empty());
    }
}
