//! Shared container handles.
//!
//! Every container in a value graph lives behind a [`Handle`]. Handles are
//! cheap to clone and compare by identity, never by content.

use std::cell::{BorrowError, Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::value::Value;

/// Keyed container: insertion-ordered string keys.
pub type ObjectHandle = Handle<IndexMap<String, Value>>;

/// Ordered, index-addressable sequence.
pub type ArrayHandle = Handle<Vec<Value>>;

/// Insertion-ordered collection of strictly-distinct values.
pub type SetHandle = Handle<Vec<Value>>;

/// Insertion-ordered entries keyed by strictly-distinct values.
pub type MapHandle = Handle<Vec<(Value, Value)>>;

/// A shared, interior-mutable reference to one container.
///
/// Two handles are the same container iff [`Handle::ptr_eq`] holds. Borrows
/// are short-lived: callers snapshot what they need and release the borrow
/// before recursing, so aliased graphs never trip a `RefCell` conflict.
pub struct Handle<T>(Rc<RefCell<T>>);

impl<T> Handle<T> {
    /// Wrap a fresh container.
    pub fn new(inner: T) -> Self {
        Self(Rc::new(RefCell::new(inner)))
    }

    /// Immutably borrow the container.
    pub fn borrow(&self) -> Ref<'_, T> {
        self.0.borrow()
    }

    /// Mutably borrow the container.
    pub fn borrow_mut(&self) -> RefMut<'_, T> {
        self.0.borrow_mut()
    }

    /// Immutably borrow the container, failing if it is mutably borrowed.
    pub fn try_borrow(&self) -> Result<Ref<'_, T>, BorrowError> {
        self.0.try_borrow()
    }

    /// Returns `true` if both handles point at the same container.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    /// Address of the container, stable for as long as any handle lives.
    pub fn addr(&self) -> usize {
        Rc::as_ptr(&self.0) as *const () as usize
    }

    /// Number of live handles to this container.
    pub fn handle_count(&self) -> usize {
        Rc::strong_count(&self.0)
    }
}

impl<T> Clone for Handle<T> {
    fn clone(&self) -> Self {
        Self(Rc::clone(&self.0))
    }
}

impl<T: Default> Default for Handle<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T> fmt::Debug for Handle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Handle({:#x})", self.addr())
    }
}

/// An opaque, identity-compared token standing in for non-data values
/// (symbols and functions). Opaque values are never merged.
#[derive(Clone)]
pub struct Opaque(Rc<str>);

impl Opaque {
    /// Create a new token. Every call yields a distinct identity, even for
    /// equal names.
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Rc::from(name.as_ref()))
    }

    /// The descriptive name.
    pub fn name(&self) -> &str {
        &self.0
    }

    /// Returns `true` if both tokens are the same token.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for Opaque {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Opaque({})", self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_identity() {
        let a: ArrayHandle = Handle::new(vec![Value::from(1)]);
        let b = a.clone();
        assert!(a.ptr_eq(&b));
        assert_eq!(a.addr(), b.addr());
        assert_eq!(a.handle_count(), 2);

        b.borrow_mut().push(Value::from(2));
        assert_eq!(a.borrow().len(), 2);
    }

    #[test]
    fn equal_contents_are_distinct_handles() {
        let a: ArrayHandle = Handle::new(Vec::new());
        let b: ArrayHandle = Handle::new(Vec::new());
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn opaque_tokens_compare_by_identity() {
        let a = Opaque::new("iterator");
        let b = Opaque::new("iterator");
        assert!(a.ptr_eq(&a.clone()));
        assert!(!a.ptr_eq(&b));
        assert_eq!(a.name(), "iterator");
    }

    #[test]
    fn try_borrow_fails_while_mutably_borrowed() {
        let a: ArrayHandle = Handle::default();
        let _guard = a.borrow_mut();
        assert!(a.try_borrow().is_err());
    }
}
